//! Explosive penalty with CASE / CASE II / implicit protection

use crate::catalog::{EquipmentRole, ExplosiveCategory};
use crate::config::ExplosiveRules;
use crate::contribution::{BvAccumulator, BvStage, MountedItem, PreparedUnit, UnitSystems};
use crate::error::Diagnostic;
use crate::types::Location;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How well a location is protected against internal explosions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protection {
    None,
    /// CASE: standard explosives charged at the reduced rate
    Partial,
    /// CASE II or implicit chassis protection: no penalty
    Full,
}

impl Protection {
    /// Protection in effect for a location
    ///
    /// Partial protection only helps side torsos and arms; an arm is covered
    /// by CASE in the arm itself or in the side torso it transfers to.
    pub fn for_location(location: Location, systems: &UnitSystems) -> Protection {
        if systems.case_ii.contains(&location) {
            return Protection::Full;
        }
        if location == Location::Head {
            return Protection::None;
        }
        if systems.implicit_protection {
            return Protection::Full;
        }

        let partial = if location.is_side_torso() {
            systems.case.contains(&location)
        } else if location.is_arm() {
            systems.case.contains(&location)
                || location
                    .transfers_to()
                    .is_some_and(|torso| systems.case.contains(&torso))
        } else {
            false
        };
        if partial {
            Protection::Partial
        } else {
            Protection::None
        }
    }
}

/// Penalty for explosive equipment occupying `slots` critical slots
pub fn explosive_penalty(
    category: ExplosiveCategory,
    slots: u32,
    protection: Protection,
    rules: &ExplosiveRules,
) -> f64 {
    if protection == Protection::Full {
        return 0.0;
    }
    let slots = slots as f64;
    match category {
        ExplosiveCategory::None => 0.0,
        ExplosiveCategory::Standard if protection == Protection::Partial => slots * rules.reduced_per_slot,
        ExplosiveCategory::Standard => slots * rules.standard_per_slot,
        ExplosiveCategory::Reduced => slots * rules.reduced_per_slot,
        ExplosiveCategory::Gauss => slots * rules.gauss_per_slot,
        ExplosiveCategory::Hvac => rules.hvac_flat,
    }
}

/// Critical slots an item occupies; each started ton of ammunition is a bin
fn occupied_slots(item: &MountedItem) -> u32 {
    let span = item.equipment.slots();
    if item.role() == EquipmentRole::Ammo {
        (item.tons.ceil() as u32).max(1) * span
    } else {
        span
    }
}

pub struct ExplosiveStage;

impl BvStage for ExplosiveStage {
    fn id(&self) -> &str {
        "explosive"
    }

    fn apply(&self, unit: &PreparedUnit<'_>, acc: &mut BvAccumulator) {
        let rules = &unit.rules.explosive;
        let mut slots_used: BTreeMap<Location, u32> = BTreeMap::new();

        for item in &unit.items {
            let category = item.equipment.explosive();
            if category == ExplosiveCategory::None {
                continue;
            }
            let slots = occupied_slots(item);
            *slots_used.entry(item.location).or_insert(0) += slots;

            let protection = Protection::for_location(item.location, &unit.systems);
            let penalty = explosive_penalty(category, slots, protection, rules);
            if penalty > 0.0 {
                acc.record_modifier(item.label(), "explosive penalty", -penalty);
            }
            acc.explosive_penalty += penalty;
        }

        for (location, used) in slots_used {
            if used > location.slot_capacity() {
                acc.warn(Diagnostic::InconsistentConstructionData {
                    location: Some(location),
                    message: format!(
                        "{} explosive slots exceed the location's {} slots",
                        used,
                        location.slot_capacity()
                    ),
                });
            }
        }
    }
}
