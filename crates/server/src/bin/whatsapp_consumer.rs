//! WhatsApp dispatch consumer: polls the WhatsApp outreach channel, joins
//! the record out to its campaign and creator, and posts the templated
//! message to the external messaging API.

use influenceflow_server::config::load_config_or_panic;
use influenceflow_server::outreach::{WhatsAppDispatcher, run_consumer};
use influenceflow_server::queue::OutreachQueue;
use influenceflow_server::whatsapp::WhatsAppClient;
use sea_orm::Database;
use std::sync::Arc;
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install().expect("Failed to install `color_eyre::install`");
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("influenceflow_server=info,sea_orm=warn")),
        )
        .init();

    let config = load_config_or_panic();

    let db = Arc::new(
        Database::connect(&config.database_url)
            .await
            .expect("Failed to connect to database"),
    );

    let client = Arc::new(WhatsAppClient::from_config(&config.whatsapp)?);
    let queue = OutreachQueue::new(db.clone());
    let dispatcher = WhatsAppDispatcher::new(db, client);

    info!(
        channel = %config.queue.whatsapp_channel,
        poll_interval_ms = config.queue.poll_interval_ms,
        "WhatsApp consumer starting"
    );
    run_consumer(
        &queue,
        &config.queue.whatsapp_channel,
        &dispatcher,
        Duration::from_millis(config.queue.poll_interval_ms),
    )
    .await;

    info!("WhatsApp consumer stopped");
    Ok(())
}
