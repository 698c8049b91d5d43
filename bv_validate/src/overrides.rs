//! Curated reference corrections and exclusions

use bv_core::config::{load_toml, parse_toml};
use bv_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Correction for one unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitOverride {
    /// Replaces the dataset's reference value
    #[serde(default)]
    pub reference_bv: Option<u32>,
    /// Leave the unit out, with the reason
    #[serde(default)]
    pub exclude: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Override table keyed by unit id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceOverrides {
    #[serde(default)]
    pub units: BTreeMap<String, UnitOverride>,
}

impl ReferenceOverrides {
    pub fn get(&self, id: &str) -> Option<&UnitOverride> {
        self.units.get(id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Load an override table from a TOML file
pub fn load_overrides(path: &Path) -> Result<ReferenceOverrides, ConfigError> {
    load_toml(path)
}

/// Load an override table from a TOML string
pub fn parse_overrides(content: &str) -> Result<ReferenceOverrides, ConfigError> {
    parse_toml(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let toml = r#"
[units."Atlas AS7-D"]
reference_bv = 1897
note = "errata"

[units."Thunder Hawk TDK-7X"]
exclude = "three Gauss rifles fed from one bin in the source data"
"#;
        let overrides = parse_overrides(toml).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("Atlas AS7-D").unwrap().reference_bv, Some(1897));
        assert!(overrides.get("Thunder Hawk TDK-7X").unwrap().exclude.is_some());
        assert!(overrides.get("Locust LCT-1V").is_none());
    }
}
