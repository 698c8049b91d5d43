//! Weapon modifier pipeline and heat ordering

use super::heat::{bv_heat, HeatProfile};
use crate::catalog::{EquipmentRole, EquipmentTrait};
use crate::contribution::{BvAccumulator, BvStage, ChainStep, ModifierChain, MountedItem, PreparedUnit};
use std::collections::{BTreeSet, HashMap, HashSet};

/// A weapon with its modifier chain and BV-context heat
#[derive(Debug, Clone)]
pub struct RatedWeapon<'u> {
    pub item: &'u MountedItem,
    pub chain: ModifierChain,
    pub heat: f64,
}

/// Pair each accessory with the first unpaired compatible weapon in its location
fn pair_accessories<'u>(
    weapons: &[&'u MountedItem],
    accessories: impl Iterator<Item = &'u MountedItem>,
    compatible: impl Fn(&MountedItem) -> bool,
) -> HashMap<usize, &'u MountedItem> {
    let mut paired = HashMap::new();
    for accessory in accessories {
        let target = weapons
            .iter()
            .find(|w| w.location == accessory.location && compatible(w) && !paired.contains_key(&w.index));
        if let Some(weapon) = target {
            paired.insert(weapon.index, accessory);
        }
    }
    paired
}

/// Weapons linked by a weapon array in the same location
fn linked_by_arrays(weapons: &[&MountedItem], unit: &PreparedUnit<'_>) -> HashSet<usize> {
    let mut linked = HashSet::new();
    for array in unit.items.iter().filter(|i| i.has_trait(EquipmentTrait::WeaponArray)) {
        let family = array.entry().family_key();
        let capacity = array.entry().capacity.unwrap_or(u32::MAX) as usize;
        let members: Vec<usize> = weapons
            .iter()
            .filter(|w| {
                w.location == array.location
                    && w.entry().family_key() == family
                    && !linked.contains(&w.index)
            })
            .take(capacity)
            .map(|w| w.index)
            .collect();
        linked.extend(members);
    }
    linked
}

/// Build the modifier chain of every weapon, in mount order
pub fn rate_weapons<'u>(unit: &'u PreparedUnit<'_>) -> Vec<RatedWeapon<'u>> {
    let rules = &unit.rules.weapon;
    let systems = &unit.systems;
    let weapons: Vec<&MountedItem> = unit.items_with_role(EquipmentRole::Weapon).collect();

    let linked = linked_by_arrays(&weapons, unit);
    let shielded: BTreeSet<_> = unit
        .items
        .iter()
        .filter(|i| i.has_trait(EquipmentTrait::ActiveShield))
        .map(|i| i.location)
        .collect();
    let capacitors = pair_accessories(
        &weapons,
        unit.items.iter().filter(|i| i.has_trait(EquipmentTrait::Capacitor)),
        |w| w.has_trait(EquipmentTrait::CapacitorCompatible),
    );
    let guidance = pair_accessories(
        &weapons,
        unit.items.iter().filter(|i| i.has_trait(EquipmentTrait::Guidance)),
        |w| w.has_trait(EquipmentTrait::GuidanceCompatible),
    );

    weapons
        .iter()
        .map(|&item| {
            let mut chain = ModifierChain::with_base(item.equipment.bv());
            let mut heat = bv_heat(item.entry(), rules);

            if linked.contains(&item.index) {
                chain.multiply("linked weapon array", rules.linked_array);
            }
            if item.location.is_arm() && systems.aes.contains(&item.location) {
                chain.multiply("actuator enhancement", rules.aes_arm);
            }
            if shielded.contains(&item.location) {
                chain.multiply("active shield", rules.active_shield);
            }
            if item.rear {
                chain.multiply("rear facing", rules.rear_facing);
            }
            if systems.drone_os {
                chain.multiply("drone operating system", rules.drone_control);
            }
            if let Some(capacitor) = capacitors.get(&item.index) {
                chain.add("capacitor", capacitor.equipment.bv());
                heat += capacitor.equipment.heat();
            }
            if let Some(system) = guidance.get(&item.index) {
                chain.multiply("guidance", system.entry().modifier.unwrap_or(1.0));
            }
            if systems.targeting_computer && item.has_trait(EquipmentTrait::DirectFire) {
                chain.multiply("targeting computer", rules.targeting_computer);
            }

            RatedWeapon { item, chain, heat }
        })
        .collect()
}

/// Order weapons for heat: heat-free first, then BV descending, heat
/// ascending, then mount order
pub fn order_for_heat(weapons: &mut [RatedWeapon<'_>]) {
    weapons.sort_by(|a, b| {
        let a_free = a.heat <= 0.0;
        let b_free = b.heat <= 0.0;
        b_free
            .cmp(&a_free)
            .then(b.chain.compute().total_cmp(&a.chain.compute()))
            .then(a.heat.total_cmp(&b.heat))
            .then(a.item.index.cmp(&b.item.index))
    });
}

/// Halve every weapon after the one whose heat brings the running total to
/// the threshold; returns how many were halved. Heat-free weapons never
/// reach the threshold themselves.
pub fn apply_heat_threshold(weapons: &mut [RatedWeapon<'_>], threshold: f64, penalty: f64) -> u32 {
    let mut running = 0.0;
    let mut reached = false;
    let mut halved = 0;
    for weapon in weapons.iter_mut() {
        if reached && weapon.heat > 0.0 {
            weapon.chain.multiply("heat", penalty);
            halved += 1;
        }
        if weapon.heat > 0.0 {
            running += weapon.heat;
            if running >= threshold {
                reached = true;
            }
        }
    }
    halved
}

pub struct WeaponStage;

impl BvStage for WeaponStage {
    fn id(&self) -> &str {
        "weapons"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, unit: &PreparedUnit<'_>, acc: &mut BvAccumulator) {
        let profile = HeatProfile::for_unit(unit);
        let mut weapons = rate_weapons(unit);
        order_for_heat(&mut weapons);
        let halved = apply_heat_threshold(&mut weapons, profile.threshold, unit.rules.weapon.heat_penalty);

        for weapon in &weapons {
            for step in &weapon.chain.steps {
                let value = match step {
                    ChainStep::Multiply { factor, .. } => *factor,
                    ChainStep::Add { amount, .. } => *amount,
                };
                acc.record_modifier(weapon.item.label(), step.label(), value);
            }
            acc.offensive_weapon_bv += weapon.chain.compute();
        }

        acc.heat_threshold = profile.threshold;
        acc.weapons_halved = halved;
        tracing::debug!(
            "{} weapons, threshold {:.1}, {} halved",
            weapons.len(),
            profile.threshold,
            halved
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crate::types::{HeatSinkKind, JumpType, Location};
    use crate::unit::UnitConstruction;

    fn base() -> UnitConstruction {
        UnitConstruction::new("Test", "T-1", 50, 4).with_heat_sinks(HeatSinkKind::Single, 10)
    }

    #[test]
    fn test_under_threshold_keeps_full_bv() {
        let unit = base()
            .with_equipment("Medium Laser", Location::LeftArm)
            .with_equipment("Medium Laser", Location::RightArm);
        let acc = testing::apply(&WeaponStage, &unit);
        assert!((acc.offensive_weapon_bv - 92.0).abs() < f64::EPSILON);
        assert_eq!(acc.weapons_halved, 0);
        assert!((acc.heat_threshold - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weapon_reaching_threshold_keeps_full_bv() {
        // Threshold 14: PPC (10) + large laser (8) reaches it, medium laser halved
        let unit = base()
            .with_equipment("Medium Laser", Location::LeftArm)
            .with_equipment("PPC", Location::RightArm)
            .with_equipment("Large Laser", Location::RightTorso);
        let acc = testing::apply(&WeaponStage, &unit);
        assert_eq!(acc.weapons_halved, 1);
        assert!((acc.offensive_weapon_bv - (176.0 + 123.0 + 23.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_threshold_keeps_first_heat_weapon() {
        // No sinks and jump 6: threshold 6 + 0 - 6 = 0
        let unit = UnitConstruction::new("Test", "T-1", 50, 4)
            .with_heat_sinks(HeatSinkKind::Single, 0)
            .with_jump(6, JumpType::Standard)
            .with_equipment("Machine Gun", Location::LeftArm)
            .with_equipment("Medium Laser", Location::RightArm);
        let prepared = testing::prepare(&unit);
        let profile = HeatProfile::for_unit(&prepared);
        assert!(profile.threshold.abs() < f64::EPSILON);

        let mut weapons = rate_weapons(&prepared);
        order_for_heat(&mut weapons);
        let halved = apply_heat_threshold(&mut weapons, profile.threshold, 0.5);
        assert_eq!(halved, 0);
        assert!(weapons.iter().all(|w| !w.chain.has_step("heat")));

        let second = unit.with_equipment("Medium Laser", Location::LeftTorso);
        let acc = testing::apply(&WeaponStage, &second);
        assert_eq!(acc.weapons_halved, 1);
    }

    #[test]
    fn test_heat_free_weapons_first() {
        let prepared_unit = base()
            .with_equipment("Large Laser", Location::RightArm)
            .with_equipment("Machine Gun", Location::LeftArm);
        let prepared = testing::prepare(&prepared_unit);
        let mut weapons = rate_weapons(&prepared);
        order_for_heat(&mut weapons);
        assert_eq!(weapons[0].item.id(), "machine-gun");
    }

    #[test]
    fn test_rear_and_targeting_computer() {
        let unit = base()
            .with_rear_equipment("Medium Laser", Location::CenterTorso)
            .with_equipment("LRM 20", Location::LeftTorso)
            .with_equipment("Targeting Computer", Location::RightTorso);
        let prepared = testing::prepare(&unit);
        let weapons = rate_weapons(&prepared);
        let laser = &weapons[0];
        assert_eq!(laser.chain.labels(), vec!["rear facing", "targeting computer"]);
        assert!((laser.chain.compute() - 46.0 * 0.5 * 1.25).abs() < 1e-9);
        // Missiles are not direct fire
        assert!(weapons[1].chain.steps.is_empty());
    }

    #[test]
    fn test_guidance_and_capacitor_pairing() {
        let unit = base()
            .with_equipment("LRM 20", Location::LeftTorso)
            .with_equipment("LRM 20", Location::LeftTorso)
            .with_equipment("Artemis IV FCS", Location::LeftTorso)
            .with_equipment("PPC", Location::RightArm)
            .with_equipment("PPC Capacitor", Location::RightArm);
        let prepared = testing::prepare(&unit);
        let weapons = rate_weapons(&prepared);

        assert!((weapons[0].chain.compute() - 181.0 * 1.2).abs() < 1e-9);
        assert!((weapons[1].chain.compute() - 181.0).abs() < f64::EPSILON);
        let ppc = &weapons[2];
        assert!(ppc.chain.has_step("capacitor"));
        assert!((ppc.heat - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drone_os_applies_to_every_weapon() {
        let unit = base()
            .with_equipment("Medium Laser", Location::LeftArm)
            .with_equipment("SRM 4", Location::RightArm)
            .with_equipment("Drone Operating System", Location::CenterTorso);
        let prepared = testing::prepare(&unit);
        let weapons = rate_weapons(&prepared);
        assert!(weapons.iter().all(|w| w.chain.has_step("drone operating system")));
    }

    #[test]
    fn test_linked_array_and_shield() {
        let unit = base()
            .with_equipment("Machine Gun", Location::LeftArm)
            .with_equipment("Machine Gun", Location::LeftArm)
            .with_equipment("Machine Gun Array", Location::LeftArm)
            .with_equipment("Medium Laser", Location::RightArm)
            .with_equipment("Medium Shield", Location::RightArm);
        let prepared = testing::prepare(&unit);
        let weapons = rate_weapons(&prepared);
        assert!(weapons[0].chain.has_step("linked weapon array"));
        assert!(weapons[1].chain.has_step("linked weapon array"));
        assert!((weapons[2].chain.compute() - 23.0).abs() < f64::EPSILON);
    }
}
