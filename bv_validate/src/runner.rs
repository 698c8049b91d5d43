//! Parallel validation over a dataset

use crate::classify::{classify, error_percent, Exclusion, Outcome};
use crate::dataset::ValidationUnit;
use crate::overrides::ReferenceOverrides;
use crate::report::{UnitReport, ValidationReport};
use bv_core::{BvEngine, BvError};
use rayon::prelude::*;

/// Runs every unit through one shared engine
pub struct ValidationRunner<'a> {
    engine: BvEngine<'a>,
    overrides: ReferenceOverrides,
}

impl<'a> ValidationRunner<'a> {
    pub fn new(engine: BvEngine<'a>) -> Self {
        ValidationRunner {
            engine,
            overrides: ReferenceOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: ReferenceOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn engine(&self) -> &BvEngine<'a> {
        &self.engine
    }

    /// Validate every unit; reports come back in dataset order
    pub fn run(&self, units: &[ValidationUnit]) -> ValidationReport {
        let reports: Vec<UnitReport> = units.par_iter().map(|entry| self.validate(entry)).collect();
        let report = ValidationReport::new(reports);
        let summary = report.summary();
        tracing::info!(
            "validated {} units: {} exact, {} within 1%, {} within 5%, {} over 5%, {} excluded",
            summary.total,
            summary.exact,
            summary.within_1,
            summary.within_5,
            summary.over_5,
            summary.excluded_total()
        );
        report
    }

    /// Validate one unit
    pub fn validate(&self, entry: &ValidationUnit) -> UnitReport {
        let unit = &entry.unit;
        let mut report = UnitReport::new(entry);
        let correction = self.overrides.get(&entry.id);
        report.reference_bv = correction.and_then(|c| c.reference_bv).or(entry.reference_bv);

        if let Some(reason) = correction.and_then(|c| c.exclude.as_ref()) {
            report.outcome = Outcome::Excluded(Exclusion::Curated(reason.clone()));
            return report;
        }
        if !unit.topology.is_supported() {
            report.outcome = Outcome::Excluded(Exclusion::UnsupportedTopology);
            return report;
        }
        if unit.total_armor_points() == 0 {
            report.outcome = Outcome::Excluded(Exclusion::MissingArmor);
            return report;
        }

        let result = match self.engine.calculate(unit) {
            Ok(result) => result,
            Err(err) => {
                tracing::debug!("{}: {}", entry.id, err);
                report.outcome = Outcome::Excluded(match err {
                    BvError::UnresolvableEquipment(items) => {
                        Exclusion::UnresolvedEquipment(items.into_iter().map(|i| i.identifier).collect())
                    }
                    BvError::UnsupportedChassis(_) => Exclusion::UnsupportedTopology,
                    BvError::InvalidConstruction(message) => Exclusion::InvalidConstruction(message),
                });
                return report;
            }
        };

        report.computed_bv = Some(result.total);
        report.warnings = result.diagnostics.iter().map(ToString::to_string).collect();
        report.fallbacks = result
            .resolution
            .fallbacks
            .iter()
            .map(|f| format!("{} -> {}", f.identifier, f.id))
            .collect();

        report.outcome = match report.reference_bv {
            Some(reference) => {
                report.error_percent = Some(error_percent(result.total, reference));
                classify(result.total, reference)
            }
            None => Outcome::Excluded(Exclusion::NoReference),
        };
        if report.outcome == Outcome::Over5 {
            tracing::debug!(
                "{}: computed {} vs reference {:?}",
                entry.id,
                result.total,
                report.reference_bv
            );
        }
        report
    }
}
