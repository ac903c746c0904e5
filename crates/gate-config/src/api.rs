//! Directory API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://saralsociety.com/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root of the REST API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Serve every call from the in-memory directory instead of the network.
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            use_mock: false,
        }
    }
}

impl ApiConfig {
    pub fn is_configured(&self) -> bool {
        self.use_mock || !self.base_url.trim().is_empty()
    }

    /// `base_url` with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_society_api() {
        let config = ApiConfig::default();
        assert!(config.is_configured());
        assert_eq!(config.base_url(), "https://saralsociety.com/api");
        assert_eq!(config.timeout_secs, 15);
        assert!(!config.use_mock);
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/api/".into(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn mock_mode_needs_no_url() {
        let config = ApiConfig {
            base_url: String::new(),
            use_mock: true,
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
