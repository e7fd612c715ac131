//! Client for the external templated-messaging (WhatsApp) API.

use serde::Serialize;
use tracing::info;

use crate::config::WhatsAppConfig;
use crate::error::DispatchError;

/// Template used for the initial creator outreach. Registered externally;
/// expects exactly four positional text parameters.
pub const CONNECT_INFLUENCER_TEMPLATE: &str = "connect_influencer";

#[derive(Serialize)]
struct TemplateMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    template: Template<'a>,
}

#[derive(Serialize)]
struct Template<'a> {
    name: &'a str,
    language: Language,
    components: Vec<Component<'a>>,
}

#[derive(Serialize)]
struct Language {
    code: &'static str,
}

#[derive(Serialize)]
struct Component<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    parameters: Vec<TextParameter<'a>>,
}

#[derive(Serialize)]
struct TextParameter<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

pub struct WhatsAppClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl WhatsAppClient {
    pub fn from_config(cfg: &WhatsAppConfig) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| DispatchError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            token: cfg.api_token.clone(),
        })
    }

    /// Post a templated message, English locale, positional text parameters.
    /// Non-2xx responses are returned as `DispatchError::Http`.
    pub async fn send_template(
        &self,
        to: &str,
        template_name: &str,
        body_params: &[&str],
    ) -> Result<(), DispatchError> {
        let payload = TemplateMessage {
            messaging_product: "whatsapp",
            to,
            kind: "template",
            template: Template {
                name: template_name,
                language: Language { code: "en" },
                components: vec![Component {
                    kind: "body",
                    parameters: body_params
                        .iter()
                        .map(|text| TextParameter { kind: "text", text })
                        .collect(),
                }],
            },
        };

        let url = format!("{}/messages", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let context = response.text().await.unwrap_or_default();
            return Err(DispatchError::Http { status, context });
        }
        info!(%to, template = template_name, "WhatsApp template message sent");
        Ok(())
    }
}
