//! The society's block/floor/flat layout.
//!
//! House numbers are `{floor}{flat:02}`: floor 3, flat 2 is `302`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One residential block.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BlockLayout {
    pub name: String,
    pub floors: u32,
    pub flats_per_floor: u32,
}

impl BlockLayout {
    #[must_use]
    pub fn new(name: &str, floors: u32, flats_per_floor: u32) -> Self {
        Self {
            name: name.to_string(),
            floors,
            flats_per_floor,
        }
    }

    /// Every house in the block, floor by floor.
    #[must_use]
    pub fn houses(&self) -> Vec<String> {
        (1..=self.floors)
            .flat_map(|floor| {
                (1..=self.flats_per_floor).map(move |flat| format!("{floor}{flat:02}"))
            })
            .collect()
    }
}

/// Blocks A (7 floors × 4 flats) and B (7 floors × 3 flats).
#[must_use]
pub fn default_blocks() -> Vec<BlockLayout> {
    vec![BlockLayout::new("A", 7, 4), BlockLayout::new("B", 7, 3)]
}

/// Lookup over a set of blocks.
#[derive(Debug, Clone)]
pub struct HouseCatalog {
    blocks: Vec<BlockLayout>,
}

impl Default for HouseCatalog {
    fn default() -> Self {
        Self::new(default_blocks())
    }
}

impl HouseCatalog {
    #[must_use]
    pub const fn new(blocks: Vec<BlockLayout>) -> Self {
        Self { blocks }
    }

    #[must_use]
    pub fn blocks(&self) -> &[BlockLayout] {
        &self.blocks
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for an unknown block name.
    pub fn houses(&self, block: &str) -> Result<Vec<String>, CoreError> {
        self.block(block)
            .map(BlockLayout::houses)
            .ok_or_else(|| CoreError::validation(format!("unknown block '{block}'")))
    }

    #[must_use]
    pub fn contains(&self, block: &str, house: &str) -> bool {
        self.block(block)
            .is_some_and(|b| b.houses().iter().any(|h| h == house))
    }

    /// Whether `house` exists in any block.
    #[must_use]
    pub fn knows_house(&self, house: &str) -> bool {
        self.blocks
            .iter()
            .any(|b| b.houses().iter().any(|h| h == house))
    }

    fn block(&self, name: &str) -> Option<&BlockLayout> {
        self.blocks
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn block_a_has_28_houses() {
        let houses = HouseCatalog::default().houses("A").unwrap();
        assert_eq!(houses.len(), 28);
        assert_eq!(houses.first().map(String::as_str), Some("101"));
        assert_eq!(houses.last().map(String::as_str), Some("704"));
    }

    #[test]
    fn block_b_stops_at_flat_three() {
        let catalog = HouseCatalog::default();
        assert!(catalog.contains("b", "703"));
        assert!(!catalog.contains("B", "704"));
    }

    #[test]
    fn unknown_block_is_rejected() {
        assert!(HouseCatalog::default().houses("C").is_err());
    }

    #[test]
    fn knows_house_across_blocks() {
        let catalog = HouseCatalog::default();
        assert!(catalog.knows_house("504"));
        assert!(!catalog.knows_house("801"));
    }
}
