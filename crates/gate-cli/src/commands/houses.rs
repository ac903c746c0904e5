use gate_config::GateConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HousesArgs;
use crate::commands::shared::respond::respond;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct BlockHouses {
    block: String,
    houses: Vec<String>,
}

/// Handle `gatepass houses`. Needs no sign-in.
pub fn handle(args: &HousesArgs, config: &GateConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    respond(list(args.block.as_deref(), config), flags)
}

fn list(
    block: Option<&str>,
    config: &GateConfig,
) -> Result<Vec<BlockHouses>, gate_core::errors::CoreError> {
    let catalog = config.general.house_catalog();
    match block {
        Some(name) => Ok(vec![BlockHouses {
            block: name.trim().to_uppercase(),
            houses: catalog.houses(name)?,
        }]),
        None => Ok(catalog
            .blocks()
            .iter()
            .map(|b| BlockHouses {
                block: b.name.clone(),
                houses: b.houses(),
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_lists_both_blocks() {
        let blocks = list(None, &GateConfig::default()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].houses.len(), 28);
        assert_eq!(blocks[1].houses.len(), 21);
    }

    #[test]
    fn single_block_is_case_insensitive() {
        let blocks = list(Some("b"), &GateConfig::default()).unwrap();
        assert_eq!(blocks[0].block, "B");
        assert_eq!(blocks[0].houses.last().map(String::as_str), Some("703"));
    }

    #[test]
    fn unknown_block_fails() {
        assert!(list(Some("Z"), &GateConfig::default()).is_err());
    }
}
