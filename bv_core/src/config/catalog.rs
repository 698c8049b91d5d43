//! Equipment catalog loading

use super::ConfigError;
use crate::catalog::{CatalogEntry, EquipmentCatalog, EquipmentRole};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

/// Container for catalog entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(rename = "equipment")]
    pub equipment: Vec<CatalogEntry>,
}

/// Load an equipment catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<EquipmentCatalog, ConfigError> {
    let file: CatalogFile = super::load_toml(path)?;
    build_catalog(file)
}

/// Load an equipment catalog from a TOML string
pub fn parse_catalog(content: &str) -> Result<EquipmentCatalog, ConfigError> {
    let file: CatalogFile = super::parse_toml(content)?;
    build_catalog(file)
}

const BUNDLED_CATALOG: &str = include_str!("../../config/equipment.toml");

/// Bundled catalog, parsed once per process
///
/// # Panics
/// If the catalog compiled into the crate does not parse.
pub fn default_catalog() -> &'static EquipmentCatalog {
    static CATALOG: OnceLock<EquipmentCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| super::bundled("equipment catalog", parse_catalog(BUNDLED_CATALOG)))
}

fn build_catalog(file: CatalogFile) -> Result<EquipmentCatalog, ConfigError> {
    validate_entries(&file.equipment)?;
    Ok(EquipmentCatalog::from_entries(file.equipment))
}

fn validate_entries(entries: &[CatalogEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate catalog id '{}'",
                entry.id
            )));
        }
        if entry.slots == 0 {
            return Err(ConfigError::ValidationError(format!(
                "catalog entry '{}' occupies no slots",
                entry.id
            )));
        }
        if entry.role == EquipmentRole::Ammo && entry.ammo_for.is_none() {
            return Err(ConfigError::ValidationError(format!(
                "ammunition '{}' does not name the weapon family it feeds",
                entry.id
            )));
        }
    }
    Ok(())
}
