//! Persistent log of every outreach attempt, one row per notification.
//!
//! Written by the invitation handler at invite time, re-read by the dispatch
//! consumers, and updated with the delivery outcome. Rows are never deleted;
//! the channel is immutable after creation and the status only moves forward.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Notification channel. Each channel has its own queue and its own
/// dispatch consumer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutreachType {
    #[sea_orm(string_value = "EMAIL")]
    Email,
    #[sea_orm(string_value = "WHATSAPP")]
    Whatsapp,
    #[sea_orm(string_value = "INSTAGRAM_DM")]
    InstagramDm,
}

/// Delivery lifecycle of an outreach attempt.
///
/// Lowercase string values are the canonical on-the-wire form everywhere,
/// including the queue signal's `status` field.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum OutreachStatus {
    #[sea_orm(string_value = "initiated")]
    Initiated,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "read")]
    Read,
    #[sea_orm(string_value = "replied")]
    Replied,
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl OutreachStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutreachStatus::Initiated => "initiated",
            OutreachStatus::Sent => "sent",
            OutreachStatus::Delivered => "delivered",
            OutreachStatus::Read => "read",
            OutreachStatus::Replied => "replied",
            OutreachStatus::Failed => "failed",
        }
    }

    /// Position in the forward-only lifecycle. `Failed` is outside the chain.
    fn rank(&self) -> Option<u8> {
        match self {
            OutreachStatus::Initiated => Some(0),
            OutreachStatus::Sent => Some(1),
            OutreachStatus::Delivered => Some(2),
            OutreachStatus::Read => Some(3),
            OutreachStatus::Replied => Some(4),
            OutreachStatus::Failed => None,
        }
    }

    /// Whether a record may move from `self` to `next`.
    ///
    /// Transitions are strictly forward; `Failed` is terminal and only
    /// reachable before the message left the delivery layer.
    pub fn can_transition_to(&self, next: OutreachStatus) -> bool {
        match (*self, next) {
            (OutreachStatus::Initiated | OutreachStatus::Sent, OutreachStatus::Failed) => true,
            (OutreachStatus::Failed, _) | (_, OutreachStatus::Failed) => false,
            (from, to) => match (from.rank(), to.rank()) {
                (Some(a), Some(b)) => b > a,
                _ => false,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "outreach_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_creator_id: i32,
    pub outreach_type: OutreachType,
    pub recipient_contact: String,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: OutreachStatus,
    pub sent_at: Option<OffsetDateTime>,
    pub delivered_at: Option<OffsetDateTime>,
    pub read_at: Option<OffsetDateTime>,
    pub replied_at: Option<OffsetDateTime>,
    #[sea_orm(column_type = "Text", nullable)]
    pub response_message: Option<String>,
    pub is_positive_response: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
