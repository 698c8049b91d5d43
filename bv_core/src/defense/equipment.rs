//! Defensive equipment: AMS, ECM, probes, shields, pods

use crate::catalog::EquipmentRole;
use crate::contribution::{BvAccumulator, BvStage, PreparedUnit};
use std::collections::BTreeMap;

/// Summed catalog BV of point-defense weapons per family
pub fn point_defense_families(unit: &PreparedUnit<'_>) -> BTreeMap<String, f64> {
    let mut families = BTreeMap::new();
    for item in unit.items_with_role(EquipmentRole::PointDefense) {
        *families.entry(item.entry().family_key().to_string()).or_insert(0.0) += item.equipment.bv();
    }
    families
}

pub struct DefensiveEquipmentStage;

impl BvStage for DefensiveEquipmentStage {
    fn id(&self) -> &str {
        "defensive_equipment"
    }

    fn apply(&self, unit: &PreparedUnit<'_>, acc: &mut BvAccumulator) {
        for item in &unit.items {
            match item.role() {
                EquipmentRole::Defensive => acc.defensive_equipment_bv += item.equipment.bv(),
                EquipmentRole::PointDefense
                    if !unit.tables.counts_point_defense_as_offensive(item.id()) =>
                {
                    acc.defensive_equipment_bv += item.equipment.bv()
                }
                _ => {}
            }
        }

        // Point-defense ammo, capped at the BV of the weapons it feeds
        let families = point_defense_families(unit);
        let mut ammo: BTreeMap<&str, f64> = BTreeMap::new();
        for item in unit.items_with_role(EquipmentRole::Ammo) {
            let Some(feeds) = item.entry().ammo_for.as_deref() else {
                continue;
            };
            if families.contains_key(feeds) {
                *ammo.entry(feeds).or_insert(0.0) += item.equipment.bv() * item.tons;
            }
        }
        for (family, value) in ammo {
            let cap = families.get(family).copied().unwrap_or(0.0);
            if value > cap {
                acc.record_modifier(family, "point-defense ammo cap", cap);
            }
            acc.defensive_equipment_bv += value.min(cap);
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
    fn test_flat_defensive_bv() {
        let unit = UnitConstruction::new("Test", "T-1", 50, 4)
            .with_equipment("Guardian ECM Suite", Location::LeftTorso)
            .with_equipment("Beagle Active Probe", Location::RightTorso)
            .with_equipment("Medium Laser", Location::RightArm);
        let acc = testing::apply(&DefensiveEquipmentStage, &unit);
        assert!((acc.defensive_equipment_bv - 71.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ams_ammo_capped_at_weapon() {
        let unit = UnitConstruction::new("Test", "T-1", 50, 4)
            .with_equipment("Anti-Missile System", Location::CenterTorso)
            .with_ammo("AMS Ammo", Location::LeftTorso, 4.0);
        let acc = testing::apply(&DefensiveEquipmentStage, &unit);
        // AMS 32 + ammo min(4 x 11, 32)
        assert!((acc.defensive_equipment_bv - 64.0).abs() < f64::EPSILON);
        assert_eq!(acc.modifiers.len(), 1);
    }

    #[test]
    fn test_laser_ams_counted_offensively() {
        let unit = UnitConstruction::new("Test", "T-1", 50, 4)
            .with_equipment("Laser Anti-Missile System", Location::CenterTorso);
        let acc = testing::apply(&DefensiveEquipmentStage, &unit);
        assert!(acc.defensive_equipment_bv.abs() < f64::EPSILON);
    }
}
