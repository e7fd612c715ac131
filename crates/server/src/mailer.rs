//! Email delivery over SMTP, with a mock mode for unconfigured environments.

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::config::SmtpConfig;
use crate::error::DispatchError;

/// Outbound mailer. `Mock` logs the send and reports success, so the rest of
/// the pipeline behaves identically with or without SMTP credentials.
pub enum Mailer {
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
    Mock,
}

impl Mailer {
    /// Build from config. Empty username or password selects mock mode.
    pub fn from_config(cfg: &SmtpConfig) -> Result<Self, DispatchError> {
        if cfg.username.is_empty() || cfg.password.is_empty() {
            warn!("SMTP credentials not configured, using mock mailer");
            return Ok(Mailer::Mock);
        }

        let creds = Credentials::new(cfg.username.clone(), cfg.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.server)
            .map_err(|e| DispatchError::Smtp(e.to_string()))?
            .port(cfg.port)
            .credentials(creds)
            .timeout(Some(std::time::Duration::from_secs(cfg.timeout_secs)))
            .build();
        let from = cfg
            .from
            .parse()
            .map_err(|e| DispatchError::Address(format!("{}: {e}", cfg.from)))?;
        Ok(Mailer::Smtp { transport, from })
    }

    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> Result<(), DispatchError> {
        match self {
            Mailer::Mock => {
                info!(%to, %subject, "Mock email sent");
                Ok(())
            }
            Mailer::Smtp { transport, from } => {
                let to_mailbox: Mailbox = to
                    .parse()
                    .map_err(|e| DispatchError::Address(format!("{to}: {e}")))?;
                let content_type = if is_html {
                    ContentType::TEXT_HTML
                } else {
                    ContentType::TEXT_PLAIN
                };
                let message = Message::builder()
                    .from(from.clone())
                    .to(to_mailbox)
                    .subject(subject)
                    .singlepart(
                        SinglePart::builder()
                            .header(content_type)
                            .body(body.to_string()),
                    )
                    .map_err(|e| DispatchError::Smtp(e.to_string()))?;

                transport
                    .send(message)
                    .await
                    .map_err(|e| DispatchError::Smtp(e.to_string()))?;
                info!(%to, "Email sent");
                Ok(())
            }
        }
    }
}
