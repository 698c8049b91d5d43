//! Calculation errors and recoverable diagnostics

use crate::types::{Location, Topology};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An identifier that no resolution stage could map to a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedEquipment {
    pub identifier: String,
    pub location: Location,
}

impl fmt::Display for UnresolvedEquipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({:?})", self.identifier, self.location)
    }
}

/// Fatal calculation error; no partial BV is ever returned alongside one
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BvError {
    #[error("unresolvable equipment: {}", format_unresolved(.0))]
    UnresolvableEquipment(Vec<UnresolvedEquipment>),
    #[error("unsupported chassis topology: {0:?}")]
    UnsupportedChassis(Topology),
    #[error("invalid construction data: {0}")]
    InvalidConstruction(String),
}

impl BvError {
    /// Identifiers that failed resolution, if this is a resolution failure
    pub fn unresolved(&self) -> &[UnresolvedEquipment] {
        match self {
            BvError::UnresolvableEquipment(items) => items,
            _ => &[],
        }
    }
}

fn format_unresolved(items: &[UnresolvedEquipment]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Recoverable issue recorded alongside a best-effort result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Construction data contradicts itself; the calculation used scanned data
    InconsistentConstructionData { location: Option<Location>, message: String },
    /// Slot scanning produced conflicting signals; `chosen` was used
    AmbiguousSystemDetection { system: String, candidates: Vec<String>, chosen: String },
    /// A structured field disagreed with scanned slots and took precedence
    StructuredOverride { system: String, structured: String, scanned: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InconsistentConstructionData { location, message } => match location {
                Some(loc) => write!(f, "inconsistent construction data in {:?}: {}", loc, message),
                None => write!(f, "inconsistent construction data: {}", message),
            },
            Diagnostic::AmbiguousSystemDetection { system, candidates, chosen } => write!(
                f,
                "ambiguous {} detection ({}), chose {}",
                system,
                candidates.join(" / "),
                chosen
            ),
            Diagnostic::StructuredOverride { system, structured, scanned } => write!(
                f,
                "{}: structured {} overrides scanned {}",
                system, structured, scanned
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_message_lists_all() {
        let err = BvError::UnresolvableEquipment(vec![
            UnresolvedEquipment {
                identifier: "Mystery Cannon".to_string(),
                location: Location::RightArm,
            },
            UnresolvedEquipment {
                identifier: "Odd Pod".to_string(),
                location: Location::LeftTorso,
            },
        ]);
        let message = err.to_string();
        assert!(message.contains("Mystery Cannon"));
        assert!(message.contains("Odd Pod"));
        assert_eq!(err.unresolved().len(), 2);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::AmbiguousSystemDetection {
            system: "engine".to_string(),
            candidates: vec!["light".to_string(), "xl_clan".to_string()],
            chosen: "light".to_string(),
        };
        assert!(diag.to_string().contains("chose light"));
    }
}
