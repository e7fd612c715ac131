//! Email dispatch: re-read the outreach record, send over SMTP (or the mock
//! mailer), and write the outcome back onto the record.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entity::outreach_log::{self, OutreachStatus, OutreachType};
use crate::error::DispatchError;
use crate::mailer::Mailer;
use crate::outreach::{DispatchOutcome, Dispatcher, mark_outreach};

pub struct EmailDispatcher {
    db: Arc<DatabaseConnection>,
    mailer: Arc<Mailer>,
}

impl EmailDispatcher {
    pub fn new(db: Arc<DatabaseConnection>, mailer: Arc<Mailer>) -> Self {
        Self { db, mailer }
    }
}

impl Dispatcher for EmailDispatcher {
    fn channel(&self) -> OutreachType {
        OutreachType::Email
    }

    async fn dispatch(&self, outreach_id: i32) -> Result<DispatchOutcome, DispatchError> {
        let Some(record) = outreach_log::Entity::find_by_id(outreach_id)
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(DispatchOutcome::RecordMissing { outreach_id });
        };

        if record.outreach_type != OutreachType::Email {
            return Ok(DispatchOutcome::ChannelMismatch {
                outreach_id,
                expected: OutreachType::Email,
                actual: record.outreach_type,
            });
        }

        let subject = record.subject.clone().unwrap_or_default();
        match self
            .mailer
            .send(&record.recipient_contact, &subject, &record.message, false)
            .await
        {
            Ok(()) => {
                mark_outreach(self.db.as_ref(), record, OutreachStatus::Sent).await?;
                Ok(DispatchOutcome::Delivered { outreach_id })
            }
            Err(e) => {
                mark_outreach(self.db.as_ref(), record, OutreachStatus::Failed).await?;
                Ok(DispatchOutcome::Failed {
                    outreach_id,
                    reason: e.to_string(),
                })
            }
        }
    }
}
