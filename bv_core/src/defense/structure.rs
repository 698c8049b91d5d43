//! Structure, armor and gyro valuation

use crate::contribution::{BvAccumulator, BvStage, PreparedUnit};
use crate::types::{ArmorType, EngineType, StructureType};
use crate::unit::UnitConstruction;

/// Structure BV for a number of internal structure points
pub fn structure_bv(points: u32, factor: f64, structure: StructureType, engine: EngineType) -> f64 {
    points as f64 * factor * structure.bv_multiplier() * engine.structure_multiplier()
}

/// Armor points weighted by each location's armor type
pub fn weighted_armor(unit: &UnitConstruction, default_type: ArmorType) -> f64 {
    unit.armor
        .values()
        .map(|a| a.total() as f64 * a.armor_type.unwrap_or(default_type).bv_multiplier())
        .sum()
}

pub struct StructureArmorStage;

impl BvStage for StructureArmorStage {
    fn id(&self) -> &str {
        "structure_armor"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn apply(&self, unit: &PreparedUnit<'_>, acc: &mut BvAccumulator) {
        let systems = &unit.systems;
        let points: u32 = systems.structure_points.values().sum();

        acc.structure_bv += structure_bv(
            points,
            unit.rules.defense.structure_factor,
            systems.structure,
            systems.engine,
        );
        acc.armor_bv += weighted_armor(unit.unit, systems.armor);
        acc.gyro_bv += unit.unit.tonnage as f64 * systems.gyro.bv_multiplier();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crate::types::{GyroType, Location};

    fn fifty_tonner() -> UnitConstruction {
        UnitConstruction::new("Test", "T-50", 50, 4)
            .with_engine(EngineType::Standard)
            .with_armor(Location::Head, 9, 0)
            .with_armor(Location::CenterTorso, 20, 7)
            .with_armor(Location::LeftTorso, 16, 4)
            .with_armor(Location::RightTorso, 16, 4)
            .with_armor(Location::LeftArm, 16, 0)
            .with_armor(Location::RightArm, 16, 0)
            .with_armor(Location::LeftLeg, 20, 0)
            .with_armor(Location::RightLeg, 20, 0)
    }

    #[test]
    fn test_standard_fifty_tonner() {
        let acc = testing::apply(&StructureArmorStage, &fifty_tonner());
        assert!((acc.structure_bv - 124.5).abs() < 1e-9);
        assert!((acc.armor_bv - 148.0).abs() < f64::EPSILON);
        assert!((acc.gyro_bv - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_xl_halves_structure() {
        let unit = fifty_tonner().with_engine(EngineType::XlInnerSphere);
        let acc = testing::apply(&StructureArmorStage, &unit);
        assert!((acc.structure_bv - 62.25).abs() < 1e-9);
    }

    #[test]
    fn test_patchwork_and_hardened_armor() {
        let unit = UnitConstruction::new("Test", "T-50", 50, 4)
            .with_armor_type(ArmorType::Hardened)
            .with_armor(Location::CenterTorso, 10, 0)
            .with_armor(Location::LeftArm, 10, 0)
            .with_location_armor_type(Location::LeftArm, ArmorType::Standard);
        assert!((weighted_armor(&unit, ArmorType::Hardened) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heavy_duty_gyro() {
        let unit = fifty_tonner().with_gyro(GyroType::HeavyDuty);
        let acc = testing::apply(&StructureArmorStage, &unit);
        assert!((acc.gyro_bv - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_explicit_structure_points() {
        let unit = fifty_tonner()
            .with_structure(StructureType::Reinforced)
            .with_internal_structure(Location::CenterTorso, 10);
        let acc = testing::apply(&StructureArmorStage, &unit);
        assert!((acc.structure_bv - 30.0).abs() < f64::EPSILON);
    }
}
