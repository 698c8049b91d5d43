//! Unit records with reference values

use crate::ValidateError;
use bv_core::UnitConstruction;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One unit to validate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationUnit {
    /// Stable identifier, usually "Chassis Model"
    pub id: String,
    /// Published BV, when known
    #[serde(default)]
    pub reference_bv: Option<u32>,
    pub unit: UnitConstruction,
}

/// A unit file holds one record or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum UnitFile {
    Many(Vec<ValidationUnit>),
    One(Box<ValidationUnit>),
}

fn read_file(path: &Path) -> Result<Vec<ValidationUnit>, ValidateError> {
    let content = fs::read_to_string(path).map_err(|source| ValidateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: UnitFile = serde_json::from_str(&content).map_err(|source| ValidateError::UnitFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match file {
        UnitFile::Many(units) => units,
        UnitFile::One(unit) => vec![*unit],
    })
}

/// Load units from a JSON file, or from every `.json` file in a directory
///
/// Units are returned sorted by id.
pub fn load_dataset(path: &Path) -> Result<Vec<ValidationUnit>, ValidateError> {
    let mut units = if path.is_dir() {
        let entries = fs::read_dir(path).map_err(|source| ValidateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ValidateError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let file = entry.path();
            if file.extension().is_some_and(|ext| ext == "json") {
                files.push(file);
            }
        }
        files.sort();

        let mut units = Vec::new();
        for file in files {
            units.extend(read_file(&file)?);
        }
        units
    } else {
        read_file(path)?
    };

    units.sort_by(|a, b| a.id.cmp(&b.id));
    tracing::info!("loaded {} units from {}", units.len(), path.display());
    Ok(units)
}

/// Reproducible random subset of `count` units, kept in id order
pub fn sample(units: Vec<ValidationUnit>, count: usize, seed: u64) -> Vec<ValidationUnit> {
    if count >= units.len() {
        return units;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut chosen: Vec<ValidationUnit> = units.choose_multiple(&mut rng, count).cloned().collect();
    chosen.sort_by(|a, b| a.id.cmp(&b.id));
    chosen
}
