//! Lookup tables: identifier corrections, name mappings and chassis exceptions

use super::ConfigError;
use crate::catalog::EquipmentCatalog;
use crate::resolver::table_key;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Catalog-less identifier that borrows another entry's BV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackEntry {
    /// Canonical id whose catalog record supplies BV, slots and category
    pub base: String,
    /// Heat that replaces the base entry's heat
    #[serde(default)]
    pub heat: Option<f64>,
}

/// Static lookup data, loaded once and shared read-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataTables {
    /// Verified corrections that intercept known-wrong generic mappings
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
    /// Known non-canonical identifiers
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Generated mapping from source-data names to canonical ids
    #[serde(default)]
    pub name_mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub fallbacks: BTreeMap<String, FallbackEntry>,
    /// "Chassis Model" (or bare chassis) -> implicit full protection
    #[serde(default)]
    pub implicit_protection: BTreeMap<String, bool>,
    /// Point-defense ids whose BV is counted as offensive equipment
    #[serde(default)]
    pub offensive_point_defense: Vec<String>,
}

impl DataTables {
    /// Rekey every identifier table with the resolver's lookup key
    fn normalized(self) -> Self {
        fn rekey<V>(map: BTreeMap<String, V>) -> BTreeMap<String, V> {
            map.into_iter().map(|(k, v)| (table_key(&k), v)).collect()
        }
        DataTables {
            overrides: rekey(self.overrides),
            aliases: rekey(self.aliases),
            name_mappings: rekey(self.name_mappings),
            fallbacks: rekey(self.fallbacks),
            implicit_protection: rekey(self.implicit_protection),
            offensive_point_defense: self.offensive_point_defense,
        }
    }

    /// Exception lookup for implicit chassis protection
    pub fn implicit_protection_for(&self, chassis: &str, model: &str) -> Option<bool> {
        let full = table_key(&format!("{} {}", chassis, model));
        self.implicit_protection
            .get(&full)
            .or_else(|| self.implicit_protection.get(&table_key(chassis)))
            .copied()
    }

    pub fn counts_point_defense_as_offensive(&self, id: &str) -> bool {
        self.offensive_point_defense.iter().any(|pd| pd == id)
    }

    /// Table targets that name no catalog entry
    pub fn dangling_targets(&self, catalog: &EquipmentCatalog) -> Vec<String> {
        let mut missing: Vec<String> = self
            .overrides
            .values()
            .chain(self.aliases.values())
            .chain(self.name_mappings.values())
            .chain(self.fallbacks.values().map(|f| &f.base))
            .filter(|id| !catalog.contains(id))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}

/// Load lookup tables from a TOML file
pub fn load_tables(path: &Path) -> Result<DataTables, ConfigError> {
    let tables: DataTables = super::load_toml(path)?;
    Ok(tables.normalized())
}

/// Load lookup tables from a TOML string
pub fn parse_tables(content: &str) -> Result<DataTables, ConfigError> {
    let tables: DataTables = super::parse_toml(content)?;
    Ok(tables.normalized())
}

const BUNDLED_TABLES: &str = include_str!("../../config/tables.toml");

/// Bundled lookup tables, parsed once per process
///
/// # Panics
/// If the tables compiled into the crate do not parse.
pub fn default_tables() -> &'static DataTables {
    static TABLES: OnceLock<DataTables> = OnceLock::new();
    TABLES.get_or_init(|| super::bundled("lookup tables", parse_tables(BUNDLED_TABLES)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_catalog;

    #[test]
    fn test_parse_tables_rekeys() {
        let toml = r#"
[overrides]
"SRM 4 (OS)" = "srm-4-os"

[aliases]
"LB 10-X AC" = "lb-10x-ac"

[fallbacks."Prototype ER Medium Laser"]
base = "er-medium-laser"
heat = 6

[implicit_protection]
"Hybrid Raider HR-1" = true
"#;

        let tables = parse_tables(toml).unwrap();
        assert_eq!(
            tables.overrides.get(&table_key("srm 4 (os)")).map(String::as_str),
            Some("srm-4-os")
        );
        assert!(tables.aliases.contains_key(&table_key("lb 10-x  ac")));
        let fallback = &tables.fallbacks[&table_key("prototype er medium laser")];
        assert_eq!(fallback.heat, Some(6.0));
        assert_eq!(tables.implicit_protection_for("Hybrid Raider", "HR-1"), Some(true));
        assert_eq!(tables.implicit_protection_for("Hybrid Raider", "HR-2"), None);
    }

    #[test]
    fn test_bundled_tables_parse() {
        let tables = match parse_tables(BUNDLED_TABLES) {
            Ok(tables) => tables,
            Err(err) => panic!("bundled tables: {}", err),
        };
        assert!(!tables.overrides.is_empty());
        assert!(!tables.aliases.is_empty());
        assert!(!tables.fallbacks.is_empty());
        assert!(tables.counts_point_defense_as_offensive("laser-ams"));
    }

    #[test]
    fn test_default_tables_point_at_catalog() {
        let tables = default_tables();
        assert!(!tables.name_mappings.is_empty());
        let dangling = tables.dangling_targets(default_catalog());
        assert!(dangling.is_empty(), "Dangling table targets: {:?}", dangling);
    }
}
