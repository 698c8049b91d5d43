//! Configuration loading from TOML files

mod catalog;
mod rules;
mod tables;

pub use catalog::{default_catalog, load_catalog, parse_catalog};
pub use rules::{BvRules, CockpitRules, DefenseRules, ExplosiveRules, HeatRules, WeaponRules};
pub use tables::{default_tables, load_tables, parse_tables, DataTables, FallbackEntry};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Unwrap data compiled into the crate; a parse failure is a packaging defect
fn bundled<T>(what: &str, parsed: Result<T, ConfigError>) -> T {
    match parsed {
        Ok(value) => value,
        Err(err) => panic!("bundled {} is invalid: {}", what, err),
    }
}

/// Load a rules file, falling back to defaults for missing keys
pub fn load_rules(path: &Path) -> Result<BvRules, ConfigError> {
    let rules: BvRules = load_toml(path)?;
    rules.validate()?;
    Ok(rules)
}
