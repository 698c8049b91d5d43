//! Outcome classification against reference values

use serde::{Deserialize, Serialize};

/// Why a unit was left out of the accuracy figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Exclusion {
    UnsupportedTopology,
    MissingArmor,
    NoReference,
    UnresolvedEquipment(Vec<String>),
    InvalidConstruction(String),
    /// Excluded by the curated override table
    Curated(String),
}

impl Exclusion {
    /// Short label for grouping in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Exclusion::UnsupportedTopology => "unsupported topology",
            Exclusion::MissingArmor => "missing armor",
            Exclusion::NoReference => "no reference",
            Exclusion::UnresolvedEquipment(_) => "unresolved equipment",
            Exclusion::InvalidConstruction(_) => "invalid construction",
            Exclusion::Curated(_) => "curated",
        }
    }
}

/// Accuracy band of one computed value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Exact,
    /// Within 1% of the reference
    Within1,
    /// Within 5% of the reference
    Within5,
    Over5,
    Excluded(Exclusion),
}

impl Outcome {
    pub fn is_excluded(&self) -> bool {
        matches!(self, Outcome::Excluded(_))
    }
}

/// Signed percentage error of `computed` against `reference`
pub fn error_percent(computed: u32, reference: u32) -> f64 {
    if reference == 0 {
        return if computed == 0 { 0.0 } else { 100.0 };
    }
    (computed as f64 - reference as f64) / reference as f64 * 100.0
}

/// Band a computed value by its distance from the reference
pub fn classify(computed: u32, reference: u32) -> Outcome {
    if computed == reference {
        return Outcome::Exact;
    }
    let error = error_percent(computed, reference).abs();
    if error <= 1.0 {
        Outcome::Within1
    } else if error <= 5.0 {
        Outcome::Within5
    } else {
        Outcome::Over5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(classify(1000, 1000), Outcome::Exact);
        assert_eq!(classify(1010, 1000), Outcome::Within1);
        assert_eq!(classify(990, 1000), Outcome::Within1);
        assert_eq!(classify(1050, 1000), Outcome::Within5);
        assert_eq!(classify(1051, 1000), Outcome::Over5);
    }

    #[test]
    fn test_error_percent() {
        assert!((error_percent(1100, 1000) - 10.0).abs() < 1e-9);
        assert!((error_percent(900, 1000) + 10.0).abs() < 1e-9);
        assert!(error_percent(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exclusion_serializes_with_reason() {
        let json = serde_json::to_string(&Exclusion::Curated("refit".to_string())).unwrap();
        assert_eq!(json, r#"{"reason":"curated","detail":"refit"}"#);
    }
}
