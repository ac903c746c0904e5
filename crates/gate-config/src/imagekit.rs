//! Image host (ImageKit) configuration.

use serde::{Deserialize, Serialize};

fn default_upload_url() -> String {
    "https://upload.imagekit.io/api/v1/files/upload".to_string()
}

fn default_api_url() -> String {
    "https://api.imagekit.io/v1/files".to_string()
}

fn default_folder() -> String {
    "/visitors".to_string()
}

fn default_tags() -> Vec<String> {
    vec!["gatepass".to_string(), "visitor".to_string()]
}

/// Lifetime of an upload signature, in seconds.
const fn default_signature_ttl_secs() -> u64 {
    600
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageKitConfig {
    /// Account identifier mixed into every upload signature.
    #[serde(default)]
    pub account_id: String,

    #[serde(default)]
    pub public_key: String,

    /// Signing key. Never sent over the wire.
    #[serde(default)]
    pub private_key: String,

    /// Public delivery endpoint (e.g., `https://ik.imagekit.io/demo`).
    #[serde(default)]
    pub url_endpoint: String,

    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Base of the file management API, used for deletes.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_folder")]
    pub folder: String,

    #[serde(default = "default_tags")]
    pub tags: Vec<String>,

    #[serde(default = "default_signature_ttl_secs")]
    pub signature_ttl_secs: u64,
}

impl Default for ImageKitConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            public_key: String::new(),
            private_key: String::new(),
            url_endpoint: String::new(),
            upload_url: default_upload_url(),
            api_url: default_api_url(),
            folder: default_folder(),
            tags: default_tags(),
            signature_ttl_secs: default_signature_ttl_secs(),
        }
    }
}

impl ImageKitConfig {
    /// Check if uploads can be signed.
    pub fn is_configured(&self) -> bool {
        !self.account_id.is_empty() && !self.public_key.is_empty() && !self.private_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ImageKitConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.signature_ttl_secs, 600);
        assert_eq!(config.folder, "/visitors");
        assert_eq!(config.tags, vec!["gatepass", "visitor"]);
    }

    #[test]
    fn configured_when_keys_set() {
        let config = ImageKitConfig {
            account_id: "acct".into(),
            public_key: "public_abc".into(),
            private_key: "private_xyz".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn not_configured_without_private_key() {
        let config = ImageKitConfig {
            account_id: "acct".into(),
            public_key: "public_abc".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
