//! Ammunition BV, capped by the weapons it feeds

use crate::catalog::EquipmentRole;
use crate::contribution::{BvAccumulator, BvStage, PreparedUnit};
use crate::defense::point_defense_families;
use std::collections::BTreeMap;

pub struct AmmoStage;

impl BvStage for AmmoStage {
    fn id(&self) -> &str {
        "ammo"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, unit: &PreparedUnit<'_>, acc: &mut BvAccumulator) {
        // Point-defense ammo is valued defensively
        let point_defense = point_defense_families(unit);

        let mut weapon_bv: BTreeMap<&str, f64> = BTreeMap::new();
        for weapon in unit.items_with_role(EquipmentRole::Weapon) {
            *weapon_bv.entry(weapon.entry().family_key()).or_insert(0.0) += weapon.equipment.bv();
        }

        let mut ammo_bv: BTreeMap<&str, f64> = BTreeMap::new();
        for item in unit.items_with_role(EquipmentRole::Ammo) {
            let Some(feeds) = item.entry().ammo_for.as_deref() else {
                continue;
            };
            if point_defense.contains_key(feeds) {
                continue;
            }
            *ammo_bv.entry(feeds).or_insert(0.0) += item.equipment.bv() * item.tons;
        }

        for (family, value) in ammo_bv {
            let cap = weapon_bv.get(family).copied().unwrap_or(0.0);
            if value > cap {
                acc.record_modifier(family, "ammo cap", cap);
            }
            acc.ammo_bv += value.min(cap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crate::types::Location;
    use crate::unit::UnitConstruction;

    fn unit() -> UnitConstruction {
        UnitConstruction::new("Test", "T-1", 50, 4)
    }

    #[test]
    fn test_ammo_per_ton() {
        let unit = unit()
            .with_equipment("LRM 20", Location::LeftTorso)
            .with_ammo("LRM-20 Ammo", Location::LeftTorso, 2.0);
        let acc = testing::apply(&AmmoStage, &unit);
        assert!((acc.ammo_bv - 46.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ammo_capped_at_weapon_bv() {
        let unit = unit()
            .with_equipment("SRM 2", Location::LeftArm)
            .with_ammo("SRM 2 Ammo", Location::LeftTorso, 10.0);
        let acc = testing::apply(&AmmoStage, &unit);
        // Ten tons at 3 each, capped at one SRM 2 (21)
        assert!((acc.ammo_bv - 21.0).abs() < f64::EPSILON);
        assert_eq!(acc.modifiers[0].label, "ammo cap");
    }

    #[test]
    fn test_orphan_ammo_is_worthless() {
        let unit = unit().with_ammo("AC/20 Ammo", Location::LeftTorso, 2.0);
        let acc = testing::apply(&AmmoStage, &unit);
        assert!(acc.ammo_bv.abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_defense_ammo_skipped() {
        let unit = unit()
            .with_equipment("Anti-Missile System", Location::CenterTorso)
            .with_ammo("AMS Ammo", Location::CenterTorso, 1.0);
        let acc = testing::apply(&AmmoStage, &unit);
        assert!(acc.ammo_bv.abs() < f64::EPSILON);
    }
}
