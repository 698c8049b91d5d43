//! Per-unit results and batch summaries

use crate::classify::{Exclusion, Outcome};
use crate::dataset::ValidationUnit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validation result for one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitReport {
    pub id: String,
    pub reference_bv: Option<u32>,
    pub computed_bv: Option<u32>,
    /// Signed; positive when the computed value is high
    pub error_percent: Option<f64>,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<String>,
}

impl UnitReport {
    pub fn new(entry: &ValidationUnit) -> Self {
        UnitReport {
            id: entry.id.clone(),
            reference_bv: entry.reference_bv,
            computed_bv: None,
            error_percent: None,
            outcome: Outcome::Excluded(Exclusion::NoReference),
            warnings: Vec::new(),
            fallbacks: Vec::new(),
        }
    }
}

/// Counts per accuracy band
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub exact: usize,
    pub within_1: usize,
    pub within_5: usize,
    pub over_5: usize,
    /// Excluded units grouped by reason label
    pub excluded: BTreeMap<String, usize>,
}

impl ValidationSummary {
    pub fn excluded_total(&self) -> usize {
        self.excluded.values().sum()
    }

    /// Units that were actually compared against a reference
    pub fn compared(&self) -> usize {
        self.exact + self.within_1 + self.within_5 + self.over_5
    }

    /// Share of compared units within 1%, as a percentage
    pub fn accuracy(&self) -> f64 {
        let compared = self.compared();
        if compared == 0 {
            return 0.0;
        }
        (self.exact + self.within_1) as f64 / compared as f64 * 100.0
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Units:      {}", self.total),
            format!("Exact:      {}", self.exact),
            format!("Within 1%:  {}", self.within_1),
            format!("Within 5%:  {}", self.within_5),
            format!("Over 5%:    {}", self.over_5),
            format!("Accuracy:   {:.1}% within 1%", self.accuracy()),
        ];
        if !self.excluded.is_empty() {
            lines.push(format!("Excluded:   {}", self.excluded_total()));
            for (reason, count) in &self.excluded {
                lines.push(format!("  {:<22}{}", reason, count));
            }
        }
        lines.join("\n")
    }
}

/// Full batch result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub units: Vec<UnitReport>,
}

impl ValidationReport {
    pub fn new(units: Vec<UnitReport>) -> Self {
        ValidationReport { units }
    }

    pub fn summary(&self) -> ValidationSummary {
        let mut summary = ValidationSummary {
            total: self.units.len(),
            ..Default::default()
        };
        for unit in &self.units {
            match &unit.outcome {
                Outcome::Exact => summary.exact += 1,
                Outcome::Within1 => summary.within_1 += 1,
                Outcome::Within5 => summary.within_5 += 1,
                Outcome::Over5 => summary.over_5 += 1,
                Outcome::Excluded(reason) => *summary.excluded.entry(reason.label().to_string()).or_insert(0) += 1,
            }
        }
        summary
    }

    /// Compared units with the largest absolute error first
    pub fn worst(&self, count: usize) -> Vec<&UnitReport> {
        let mut compared: Vec<&UnitReport> = self.units.iter().filter(|u| u.error_percent.is_some()).collect();
        compared.sort_by(|a, b| {
            let a_err = a.error_percent.unwrap_or(0.0).abs();
            let b_err = b.error_percent.unwrap_or(0.0).abs();
            b_err.total_cmp(&a_err).then(a.id.cmp(&b.id))
        });
        compared.truncate(count);
        compared
    }

    /// How often each unresolved identifier blocked a unit, most frequent first
    pub fn unresolved_frequency(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for unit in &self.units {
            if let Outcome::Excluded(Exclusion::UnresolvedEquipment(identifiers)) = &unit.outcome {
                for identifier in identifiers {
                    *counts.entry(identifier.as_str()).or_insert(0) += 1;
                }
            }
        }
        let mut frequency: Vec<(String, usize)> = counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        frequency.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        frequency
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
