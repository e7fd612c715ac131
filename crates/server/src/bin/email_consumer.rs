//! Email dispatch consumer: polls the email outreach channel and relays
//! records over SMTP (or the mock mailer when credentials are absent).

use influenceflow_server::config::load_config_or_panic;
use influenceflow_server::mailer::Mailer;
use influenceflow_server::outreach::{EmailDispatcher, run_consumer};
use influenceflow_server::queue::OutreachQueue;
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

    let mailer = Arc::new(Mailer::from_config(&config.smtp)?);
    let queue = OutreachQueue::new(db.clone());
    let dispatcher = EmailDispatcher::new(db, mailer);

    info!(
        channel = %config.queue.email_channel,
        poll_interval_ms = config.queue.poll_interval_ms,
        "Email consumer starting"
    );
    run_consumer(
        &queue,
        &config.queue.email_channel,
        &dispatcher,
        Duration::from_millis(config.queue.poll_interval_ms),
    )
    .await;

    info!("Email consumer stopped");
    Ok(())
}
