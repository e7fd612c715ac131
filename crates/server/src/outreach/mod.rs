//! The outreach dispatch pipeline shared by both consumers.
//!
//! A dispatcher turns one queued outreach id into a delivery attempt and
//! reports what happened as a [`DispatchOutcome`]; the poll loop in
//! [`consumer`] owns logging and never lets a single message's failure
//! terminate the consumer.

pub mod consumer;
pub mod email;
pub mod whatsapp;

pub use consumer::{poll_once, run_consumer};
pub use email::EmailDispatcher;
pub use whatsapp::WhatsAppDispatcher;

use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, IntoActiveModel};
use time::OffsetDateTime;
use tracing::warn;

use crate::entity::outreach_log::{self, OutreachStatus, OutreachType};
use crate::error::DispatchError;

/// Typed result of one dispatch attempt.
///
/// Everything except `Delivered` leaves the external channel untouched or
/// records a failure; none of these crash the consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handed to the external channel successfully.
    Delivered { outreach_id: i32 },
    /// No outreach row for the signalled id.
    RecordMissing { outreach_id: i32 },
    /// The record belongs to a different channel; skipped without a delivery
    /// attempt.
    ChannelMismatch {
        outreach_id: i32,
        expected: OutreachType,
        actual: OutreachType,
    },
    /// A join target (campaign_creator, campaign, creator) was missing;
    /// aborted before any external call.
    LinkMissing {
        outreach_id: i32,
        what: &'static str,
    },
    /// The external delivery call failed.
    Failed { outreach_id: i32, reason: String },
}

/// One channel's dispatch logic. Implementations re-read the authoritative
/// outreach record and perform the channel-specific external send.
#[allow(async_fn_in_trait)]
pub trait Dispatcher {
    fn channel(&self) -> OutreachType;

    async fn dispatch(&self, outreach_id: i32) -> Result<DispatchOutcome, DispatchError>;
}

/// Write the delivery outcome back onto the record, honoring the
/// forward-only status rule. A record that already advanced past the target
/// status is left alone.
pub(crate) async fn mark_outreach<C: ConnectionTrait>(
    conn: &C,
    record: outreach_log::Model,
    next: OutreachStatus,
) -> Result<(), DbErr> {
    if !record.status.can_transition_to(next) {
        warn!(
            outreach_id = record.id,
            from = record.status.as_str(),
            to = next.as_str(),
            "Skipping status write-back, transition not allowed"
        );
        return Ok(());
    }
    let mut model = record.into_active_model();
    model.status = Set(next);
    if next == OutreachStatus::Sent {
        model.sent_at = Set(Some(OffsetDateTime::now_utc()));
    }
    model.update(conn).await?;
    Ok(())
}
