//! Backing table for the named outreach queues.
//!
//! A row is one undelivered signal on one channel; dequeue removes it, so
//! this table never holds consumed messages. See [`crate::queue`].

use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "queue_message")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub channel: String,
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    pub enqueued_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
