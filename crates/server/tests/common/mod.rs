//! Shared fixtures for the integration tests: an in-memory SQLite database
//! with migrations applied, plus row seeding helpers.

#![allow(dead_code)]

use std::sync::Arc;

use influenceflow_server::config::{AppConfig, QueueConfig, SmtpConfig, WhatsAppConfig};
use influenceflow_server::entity::campaign::CampaignStatus;
use influenceflow_server::entity::campaign_creator::CampaignCreatorStatus;
use influenceflow_server::entity::outreach_log::{OutreachStatus, OutreachType};
use influenceflow_server::entity::{campaign, campaign_creator, creator, outreach_log};
use migration::{Migrator, MigratorTrait};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection};
use time::OffsetDateTime;

/// Fresh in-memory database with the full schema. Single connection so the
/// whole test sees one SQLite instance.
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    Arc::new(db)
}

pub fn test_config(whatsapp_url: &str) -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        smtp: SmtpConfig {
            server: "smtp.example.com".into(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: "InfluenceFlow <noreply@example.com>".into(),
            timeout_secs: 5,
        },
        whatsapp: WhatsAppConfig {
            api_url: whatsapp_url.into(),
            api_token: "test-token".into(),
            timeout_secs: 5,
        },
        queue: QueueConfig::default(),
    }
}

pub async fn seed_campaign(db: &DatabaseConnection, description: Option<&str>) -> campaign::Model {
    let now = OffsetDateTime::now_utc();
    campaign::ActiveModel {
        title: Set("Summer Launch".into()),
        description: Set(description.map(str::to_string)),
        brand_name: Set("Acme".into()),
        budget: Set(10_000.0),
        start_date: Set(now),
        end_date: Set(now + time::Duration::days(30)),
        status: Set(CampaignStatus::Active),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed campaign")
}

pub async fn seed_creator(db: &DatabaseConnection, phone: Option<&str>) -> creator::Model {
    let now = OffsetDateTime::now_utc();
    // Unique-ish values so a test can seed more than one creator.
    let tag = now.unix_timestamp_nanos();
    creator::ActiveModel {
        email: Set(format!("jamie{tag}@example.com")),
        username: Set(format!("jamie{tag}")),
        full_name: Set("Jamie Rivers".into()),
        phone: Set(phone.map(str::to_string)),
        category: Set("lifestyle".into()),
        instagram_handle: Set(Some("@jamierivers".into())),
        base_rate: Set(Some(400.0)),
        is_active: Set(true),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed creator")
}

pub async fn seed_link(
    db: &DatabaseConnection,
    campaign_id: i32,
    creator_id: i32,
) -> campaign_creator::Model {
    campaign_creator::ActiveModel {
        campaign_id: Set(campaign_id),
        creator_id: Set(creator_id),
        offered_rate: Set(500.0),
        status: Set(CampaignCreatorStatus::Invited),
        invited_at: Set(OffsetDateTime::now_utc()),
        deliverables_completed: Set(0),
        deliverables_total: Set(3),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed campaign_creator")
}

pub async fn seed_outreach(
    db: &DatabaseConnection,
    campaign_creator_id: i32,
    outreach_type: OutreachType,
    recipient: &str,
) -> outreach_log::Model {
    outreach_log::ActiveModel {
        campaign_creator_id: Set(campaign_creator_id),
        outreach_type: Set(outreach_type),
        recipient_contact: Set(recipient.into()),
        subject: Set(Some("Collaboration Opportunity".into())),
        message: Set("Hi Jamie, we'd love to work with you.".into()),
        status: Set(OutreachStatus::Initiated),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed outreach_log")
}
