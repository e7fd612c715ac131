//! Durable point-to-point outreach queues, one named channel per
//! notification type, backed by the `queue_message` table.
//!
//! Messages are signals, not payloads: they carry only the outreach id and a
//! status string, and the consumer re-reads the authoritative record at
//! dispatch time. Because the queue lives in the same database as the record
//! store, the invitation handler enqueues inside its own transaction via
//! [`enqueue_on`], so a record and its signal commit atomically.

use std::sync::Arc;

use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::error;

use crate::entity::queue_message;

/// Wire format of a queue message: exactly these two keys, JSON-encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachSignal {
    pub outreach_id: i32,
    pub status: String,
}

/// Handle on the queue table. Cheap to clone.
#[derive(Clone)]
pub struct OutreachQueue {
    db: Arc<DatabaseConnection>,
}

impl OutreachQueue {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Publish a signal on the named channel.
    pub async fn enqueue(&self, channel: &str, signal: &OutreachSignal) -> Result<(), DbErr> {
        enqueue_on(self.db.as_ref(), channel, signal).await
    }

    /// Single non-blocking fetch-and-acknowledge.
    ///
    /// Takes the oldest message on the channel and deletes it in the same
    /// transaction, so the message is consumed whether or not the caller's
    /// subsequent processing succeeds. An empty channel returns `Ok(None)`
    /// immediately.
    pub async fn dequeue(&self, channel: &str) -> Result<Option<OutreachSignal>, DbErr> {
        let txn = self.db.begin().await?;
        let Some(row) = queue_message::Entity::find()
            .filter(queue_message::Column::Channel.eq(channel))
            .order_by_asc(queue_message::Column::Id)
            .one(&txn)
            .await?
        else {
            txn.commit().await?;
            return Ok(None);
        };
        queue_message::Entity::delete_by_id(row.id).exec(&txn).await?;
        txn.commit().await?;

        match serde_json::from_str(&row.payload) {
            Ok(signal) => Ok(Some(signal)),
            Err(e) => {
                // The row is already gone; a payload that cannot be parsed is
                // dropped rather than poisoning the channel.
                error!(
                    name = "queue.dequeue.malformed_payload",
                    target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                    %channel,
                    error = %e,
                    message = "Discarding malformed queue payload"
                );
                Ok(None)
            }
        }
    }
}

/// Insert a signal using any connection, including an open transaction.
pub async fn enqueue_on<C: ConnectionTrait>(
    conn: &C,
    channel: &str,
    signal: &OutreachSignal,
) -> Result<(), DbErr> {
    let payload = serde_json::to_string(signal)
        .map_err(|e| DbErr::Custom(format!("failed to serialize queue payload: {e}")))?;
    queue_message::ActiveModel {
        channel: Set(channel.to_string()),
        payload: Set(payload),
        enqueued_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(())
}
