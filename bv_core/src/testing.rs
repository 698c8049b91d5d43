//! Shared fixtures for unit tests

use crate::config::{default_catalog, default_tables, BvRules};
use crate::contribution::{BvAccumulator, BvStage, PreparedUnit};
use crate::unit::UnitConstruction;
use std::sync::OnceLock;

pub fn rules() -> &'static BvRules {
    static RULES: OnceLock<BvRules> = OnceLock::new();
    RULES.get_or_init(BvRules::default)
}

pub fn prepare(unit: &UnitConstruction) -> PreparedUnit<'_> {
    PreparedUnit::prepare(unit, default_catalog(), default_tables(), rules()).unwrap()
}

/// Run a single stage against a fresh accumulator
pub fn apply(stage: &dyn BvStage, unit: &UnitConstruction) -> BvAccumulator {
    let prepared = prepare(unit);
    let mut acc = BvAccumulator::new();
    stage.apply(&prepared, &mut acc);
    acc
}
