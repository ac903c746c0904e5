//! General application configuration.

use gate_core::housing::{BlockLayout, HouseCatalog, default_blocks};
use serde::{Deserialize, Serialize};

fn default_society_name() -> String {
    "Saral Revanta".to_string()
}

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Display name used in the CLI header.
    #[serde(default = "default_society_name")]
    pub society_name: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Residential blocks, used to list and check house numbers.
    #[serde(default = "default_blocks")]
    pub blocks: Vec<BlockLayout>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            society_name: default_society_name(),
            default_limit: default_limit(),
            blocks: default_blocks(),
        }
    }
}

impl GeneralConfig {
    pub fn house_catalog(&self) -> HouseCatalog {
        HouseCatalog::new(self.blocks.clone())
    }
}
