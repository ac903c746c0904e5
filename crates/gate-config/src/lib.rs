//! # gate-config
//!
//! Layered configuration loading for gatepass using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GATEPASS_*` prefix, `__` as separator)
//! 2. Project-level `.gatepass/config.toml`
//! 3. User-level `~/.config/gatepass/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GATEPASS_API__BASE_URL` -> `api.base_url`,
//! `GATEPASS_IMAGEKIT__PRIVATE_KEY` -> `imagekit.private_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use gate_config::GateConfig;
//!
//! let config = GateConfig::load_with_dotenv().expect("config");
//!
//! if config.imagekit.is_configured() {
//!     println!("uploading to {}", config.imagekit.upload_url);
//! }
//! ```

mod api;
mod error;
mod general;
mod imagekit;
mod whatsapp;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use imagekit::ImageKitConfig;
pub use whatsapp::WhatsAppConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for every environment override.
pub const ENV_PREFIX: &str = "GATEPASS_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GateConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub imagekit: ImageKitConfig,
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl GateConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading the nearest `.env` file.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".gatepass/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would only fail later, at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.imagekit.signature_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "imagekit.signature_ttl_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if let Some(block) = self
            .general
            .blocks
            .iter()
            .find(|b| b.name.trim().is_empty() || b.floors == 0 || b.flats_per_floor == 0)
        {
            return Err(ConfigError::InvalidValue {
                field: "general.blocks".into(),
                reason: format!("block '{}' needs a name, floors, and flats", block.name),
            });
        }
        Ok(())
    }

    /// Fail with [`ConfigError::NotConfigured`] unless `section` is usable.
    pub fn require(&self, section: &str) -> Result<(), ConfigError> {
        let configured = match section {
            "api" => self.api.is_configured(),
            "imagekit" => self.imagekit.is_configured(),
            "whatsapp" => self.whatsapp.is_configured(),
            _ => true,
        };
        if configured {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: section.to_string(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gatepass").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for `.env`, then
    /// falls back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = GateConfig::default();
        assert!(config.api.is_configured());
        assert!(!config.imagekit.is_configured());
        assert!(!config.whatsapp.is_configured());
        assert_eq!(config.general.default_limit, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn require_reports_the_missing_section() {
        let err = GateConfig::default().require("imagekit").unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "imagekit"));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let mut config = GateConfig::default();
        config.api.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
