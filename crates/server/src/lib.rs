//! Outreach backend for the InfluenceFlow influencer-marketing platform.
//!
//! Campaign invitations create an outreach record and enqueue a signal on a
//! durable per-channel queue; long-running dispatch consumers pick the signal
//! up, re-read the record, and relay it to the external delivery channel
//! (SMTP for email, a templated-messaging HTTP API for WhatsApp).

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::mailer::Mailer;

pub mod api;
pub mod config;
pub mod email_templates;
pub mod entity;
pub mod error;
pub mod mailer;
pub mod outreach;
pub mod queue;
pub mod whatsapp;

/// Shared handles for the API process, passed to handlers via `Extension`.
#[derive(Clone)]
pub struct AppResources {
    pub db: Arc<DatabaseConnection>,
    pub mailer: Arc<Mailer>,
    pub config: Arc<AppConfig>,
}
