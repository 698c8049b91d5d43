//! Flat offensive equipment outside heat ordering

use crate::catalog::EquipmentRole;
use crate::contribution::{BvAccumulator, BvStage, PreparedUnit};

pub struct OffensiveEquipmentStage;

impl BvStage for OffensiveEquipmentStage {
    fn id(&self) -> &str {
        "offensive_equipment"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, unit: &PreparedUnit<'_>, acc: &mut BvAccumulator) {
        for item in &unit.items {
            let counted = match item.role() {
                EquipmentRole::Offensive => true,
                EquipmentRole::PointDefense => unit.tables.counts_point_defense_as_offensive(item.id()),
                _ => false,
            };
            if counted {
                acc.offensive_equipment_bv += item.equipment.bv();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crate::types::Location;
    use crate::unit::UnitConstruction;

    #[test]
    fn test_laser_ams_and_melee() {
        let unit = UnitConstruction::new("Test", "T-1", 50, 4)
            .with_equipment("Laser Anti-Missile System", Location::CenterTorso)
            .with_equipment("Hatchet", Location::RightArm)
            .with_equipment("Anti-Missile System", Location::LeftTorso);
        let acc = testing::apply(&OffensiveEquipmentStage, &unit);
        // Laser AMS 45 + hatchet 75; standard AMS stays defensive
        assert!((acc.offensive_equipment_bv - 120.0).abs() < f64::EPSILON);
    }
}
