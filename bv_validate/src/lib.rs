//! bv_validate - batch validation of computed Battle Value
//!
//! Loads unit records with reference values, runs them through the
//! calculation engine in parallel, and classifies each result by how far it
//! lands from its reference.

pub mod classify;
pub mod dataset;
pub mod overrides;
pub mod report;
pub mod runner;

pub use classify::{classify, Exclusion, Outcome};
pub use dataset::{load_dataset, sample, ValidationUnit};
pub use overrides::{load_overrides, parse_overrides, ReferenceOverrides, UnitOverride};
pub use report::{UnitReport, ValidationReport, ValidationSummary};
pub use runner::ValidationRunner;

use bv_core::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Harness error
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse unit file {path}: {source}")]
    UnitFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
