use anyhow::Context;
use gate_config::GateConfig;

use crate::cli::GlobalFlags;

/// Load layered config (defaults, TOML files, `.env`, `GATEPASS_*`), then
/// apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GateConfig> {
    let mut config = GateConfig::load_with_dotenv().context("failed to load gatepass config")?;
    if flags.mock {
        config.api.use_mock = true;
    }
    Ok(config)
}
