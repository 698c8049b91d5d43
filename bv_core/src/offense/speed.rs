//! Speed factor and tonnage bonus

use crate::contribution::{BvAccumulator, BvStage, PreparedUnit};

/// Offensive speed factor, at the two-decimal precision of the published table
pub fn speed_factor(run_mp: u32, jump_mp: u32) -> f64 {
    let mp = run_mp as f64 + jump_mp.div_ceil(2) as f64;
    let raw = (1.0 + (mp - 5.0) / 10.0).powf(1.2);
    (raw * 100.0).round() / 100.0
}

pub struct TonnageStage;

impl BvStage for TonnageStage {
    fn id(&self) -> &str {
        "tonnage"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, unit: &PreparedUnit<'_>, acc: &mut BvAccumulator) {
        let mut bonus = unit.unit.tonnage as f64;
        if unit.systems.tsm {
            bonus *= unit.rules.defense.tsm_tonnage_factor;
            acc.record_modifier("tonnage", "triple-strength myomer", unit.rules.defense.tsm_tonnage_factor);
        }
        acc.tonnage_bonus += bonus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crate::types::Location;
    use crate::unit::UnitConstruction;

    #[test]
    fn test_speed_factor_table() {
        assert!((speed_factor(6, 0) - 1.12).abs() < 1e-9);
        assert!((speed_factor(5, 0) - 1.0).abs() < 1e-9);
        assert!((speed_factor(8, 0) - 1.37).abs() < 1e-9);
        // Jump 5 counts as 3
        assert!((speed_factor(6, 5) - 1.5).abs() < 1e-9);
        assert!((speed_factor(2, 0) - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_tonnage_bonus() {
        let unit = UnitConstruction::new("Test", "T-1", 50, 4);
        let acc = testing::apply(&TonnageStage, &unit);
        assert!((acc.tonnage_bonus - 50.0).abs() < f64::EPSILON);

        let tsm = unit.with_equipment("TSM", Location::LeftTorso);
        let acc = testing::apply(&TonnageStage, &tsm);
        assert!((acc.tonnage_bonus - 75.0).abs() < f64::EPSILON);
    }
}
