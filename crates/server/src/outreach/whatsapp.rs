//! WhatsApp dispatch: re-read the outreach record, join out to the
//! campaign-creator link, campaign and creator, and post the
//! `connect_influencer` template to the messaging API.
//!
//! Every lookup fails closed: a missing row anywhere aborts the dispatch
//! before the HTTP call is made.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entity::outreach_log::{self, OutreachStatus, OutreachType};
use crate::entity::{campaign, campaign_creator, creator};
use crate::error::DispatchError;
use crate::outreach::{DispatchOutcome, Dispatcher, mark_outreach};
use crate::whatsapp::{CONNECT_INFLUENCER_TEMPLATE, WhatsAppClient};

pub struct WhatsAppDispatcher {
    db: Arc<DatabaseConnection>,
    client: Arc<WhatsAppClient>,
}

impl WhatsAppDispatcher {
    pub fn new(db: Arc<DatabaseConnection>, client: Arc<WhatsAppClient>) -> Self {
        Self { db, client }
    }
}

impl Dispatcher for WhatsAppDispatcher {
    fn channel(&self) -> OutreachType {
        OutreachType::Whatsapp
    }

    async fn dispatch(&self, outreach_id: i32) -> Result<DispatchOutcome, DispatchError> {
        let db = self.db.as_ref();
        let Some(record) = outreach_log::Entity::find_by_id(outreach_id).one(db).await? else {
            return Ok(DispatchOutcome::RecordMissing { outreach_id });
        };

        if record.outreach_type != OutreachType::Whatsapp {
            return Ok(DispatchOutcome::ChannelMismatch {
                outreach_id,
                expected: OutreachType::Whatsapp,
                actual: record.outreach_type,
            });
        }

        let Some(link) = campaign_creator::Entity::find_by_id(record.campaign_creator_id)
            .one(db)
            .await?
        else {
            return Ok(DispatchOutcome::LinkMissing {
                outreach_id,
                what: "campaign_creator",
            });
        };
        let Some(campaign) = campaign::Entity::find_by_id(link.campaign_id).one(db).await? else {
            return Ok(DispatchOutcome::LinkMissing {
                outreach_id,
                what: "campaign",
            });
        };
        let Some(creator) = creator::Entity::find_by_id(link.creator_id).one(db).await? else {
            return Ok(DispatchOutcome::LinkMissing {
                outreach_id,
                what: "creator",
            });
        };

        // The template takes the campaign description twice; the repetition
        // is part of the external template's parameter contract.
        let description = campaign.description.clone().unwrap_or_default();
        let body_params = [
            creator.full_name.as_str(),
            campaign.brand_name.as_str(),
            description.as_str(),
            description.as_str(),
        ];

        match self
            .client
            .send_template(
                &record.recipient_contact,
                CONNECT_INFLUENCER_TEMPLATE,
                &body_params,
            )
            .await
        {
            Ok(()) => {
                mark_outreach(db, record, OutreachStatus::Sent).await?;
                Ok(DispatchOutcome::Delivered { outreach_id })
            }
            Err(e) => {
                mark_outreach(db, record, OutreachStatus::Failed).await?;
                Ok(DispatchOutcome::Failed {
                    outreach_id,
                    reason: e.to_string(),
                })
            }
        }
    }
}
