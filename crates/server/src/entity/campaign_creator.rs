//! Link between a campaign and an invited creator.
//!
//! Carries the negotiation state independently of outreach delivery status.
//! The outreach pipeline only reads this table; `thread_id` is written by the
//! external assistant-based WhatsApp flow to tie a conversation thread to a
//! creator-campaign pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum CampaignCreatorStatus {
    #[sea_orm(string_value = "invited")]
    Invited,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "declined")]
    Declined,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "campaign_creator")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_id: i32,
    pub creator_id: i32,
    pub offered_rate: f64,
    pub negotiated_rate: Option<f64>,
    pub final_rate: Option<f64>,
    pub status: CampaignCreatorStatus,
    pub invited_at: OffsetDateTime,
    pub accepted_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub deliverables_completed: i32,
    pub deliverables_total: i32,
    pub thread_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
