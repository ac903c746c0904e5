//! WhatsApp Cloud API configuration for member alerts.

use serde::{Deserialize, Serialize};

fn default_graph_url() -> String {
    "https://graph.facebook.com/v18.0".to_string()
}

fn default_template() -> String {
    "gatepass_alert".to_string()
}

fn default_language() -> String {
    "en_US".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhatsAppConfig {
    /// Sending phone number id.
    #[serde(default)]
    pub phone_id: String,

    /// Bearer token for the Graph API.
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_graph_url")]
    pub graph_url: String,

    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            phone_id: String::new(),
            token: String::new(),
            graph_url: default_graph_url(),
            template: default_template(),
            language: default_language(),
        }
    }
}

impl WhatsAppConfig {
    pub fn is_configured(&self) -> bool {
        !self.phone_id.is_empty() && !self.token.is_empty()
    }

    /// Message endpoint for the configured phone id.
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.graph_url.trim_end_matches('/'), self.phone_id)
    }
}
