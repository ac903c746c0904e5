//! WhatsApp Cloud API template messages.

use std::time::Duration;

use async_trait::async_trait;
use gate_config::WhatsAppConfig;
use serde::{Deserialize, Serialize};

use crate::{Delivery, Notifier, NotifyError, VisitAlert};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct TemplateMessage<'a> {
    messaging_product: &'static str,
    to: String,
    #[serde(rename = "type")]
    kind: &'static str,
    template: Template<'a>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Template<'a> {
    name: &'a str,
    language: Language<'a>,
    components: Vec<Component<'a>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Language<'a> {
    code: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Component<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    parameters: Vec<TextParameter<'a>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct TextParameter<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

impl<'a> TextParameter<'a> {
    const fn text(text: &'a str) -> Self {
        Self { kind: "text", text }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GraphResponse {
    #[serde(default)]
    messages: Vec<GraphMessage>,
    #[serde(default)]
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
struct GraphMessage {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    #[serde(default)]
    message: String,
}

/// Sends the `gatepass_alert` template (or whichever is configured) through
/// the Graph API.
#[derive(Debug, Clone)]
pub struct WhatsAppNotifier {
    http: reqwest::Client,
    config: WhatsAppConfig,
}

impl WhatsAppNotifier {
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client fails to build.
    pub fn new(config: WhatsAppConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gatepass/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { http, config })
    }

    fn message<'a>(&'a self, alert: &'a VisitAlert) -> TemplateMessage<'a> {
        TemplateMessage {
            messaging_product: "whatsapp",
            to: recipient(&alert.phone),
            kind: "template",
            template: Template {
                name: &self.config.template,
                language: Language {
                    code: &self.config.language,
                },
                components: vec![Component {
                    kind: "body",
                    parameters: vec![
                        TextParameter::text(&alert.name),
                        TextParameter::text(&alert.purpose),
                        TextParameter::text(&alert.house),
                    ],
                }],
            },
        }
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn notify(&self, alert: &VisitAlert) -> Result<Delivery, NotifyError> {
        if !self.is_configured() {
            return Err(NotifyError::NotConfigured);
        }
        let message = self.message(alert);
        if message.to.is_empty() {
            return Err(NotifyError::MissingRecipient);
        }

        let resp = self
            .http
            .post(self.config.messages_url())
            .bearer_auth(&self.config.token)
            .json(&message)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let delivery = read_delivery(status, &body)?;
        tracing::info!(
            to = %message.to,
            message_id = delivery.message_id.as_deref().unwrap_or("-"),
            "visitor alert sent"
        );
        Ok(delivery)
    }
}

/// Digits only; the Graph API rejects `+`, spaces, and dashes.
fn recipient(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

fn read_delivery(status: u16, body: &str) -> Result<Delivery, NotifyError> {
    let parsed: GraphResponse = serde_json::from_str(body).unwrap_or_default();
    if !(200..300).contains(&status) || parsed.error.is_some() {
        let message = parsed
            .error
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(NotifyError::Rejected { status, message });
    }
    Ok(Delivery {
        message_id: parsed.messages.into_iter().next().map(|m| m.id),
    })
}
