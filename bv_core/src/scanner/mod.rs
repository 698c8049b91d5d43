//! Crit scanner - infers unit systems from the raw critical-slot grid
//!
//! Slot names are compacted (lowercase, separators removed, tech markers
//! stripped) and matched against an ordered pattern table, so
//! `ISDoubleHeatSink`, `Double Heat Sink (Clan)` and `CLCASEII` all classify.
//! The scanner is a fallback: structured unit fields always take precedence.

mod patterns;

pub use patterns::{classify, engine_marker, SlotKind};

use crate::catalog::EquipmentCatalog;
use crate::error::Diagnostic;
use crate::resolver::{normalize, table_key};
use crate::types::{
    ArmorType, CockpitType, EngineType, GyroType, HeatSinkKind, JumpType, Location, StructureType,
    TechBase,
};
use crate::unit::UnitConstruction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Equipment present in the slot grid, recorded under its canonical id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredEquipment {
    pub id: String,
    pub location: Location,
    pub count: u32,
}

/// Systems detected from critical slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectedSystems {
    pub engine: Option<EngineType>,
    pub gyro: Option<GyroType>,
    pub cockpit: Option<CockpitType>,
    pub structure: Option<StructureType>,
    pub armor: Option<ArmorType>,
    pub heat_sink_kind: Option<HeatSinkKind>,
    /// Heat sinks visible in slots (engine-integrated sinks excluded)
    pub visible_heat_sinks: u32,
    pub jump_type: Option<JumpType>,
    pub case: BTreeSet<Location>,
    pub case_ii: BTreeSet<Location>,
    pub stealth: bool,
    pub clan_engine_marker: bool,
    pub clan_structure_marker: bool,
    pub inferred: Vec<InferredEquipment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan a unit's slot grid
pub fn scan(unit: &UnitConstruction, catalog: &EquipmentCatalog) -> DetectedSystems {
    let mut detected = DetectedSystems::default();
    let clan_default = unit.tech_base == TechBase::Clan;

    let mut engine_slots: BTreeMap<Location, u32> = BTreeMap::new();
    let mut engine_named: Option<EngineType> = None;
    let mut clan_marks = 0u32;
    // (location, kind) -> occurrences
    let mut sink_counts: BTreeMap<(Location, HeatSinkKind), u32> = BTreeMap::new();
    let mut system_counts: BTreeMap<(Location, &'static str), u32> = BTreeMap::new();

    for (&location, slots) in &unit.critical_slots {
        for raw in slots {
            let name = normalize(raw);
            let compact = table_key(&name.key);
            let clan = match name.tech {
                Some(tech) => tech == TechBase::Clan,
                None => clan_default,
            };
            if name.tech == Some(TechBase::Clan) {
                clan_marks += 1;
            }

            let Some(kind) = classify(&compact) else {
                continue;
            };
            match kind {
                SlotKind::Engine => {
                    *engine_slots.entry(location).or_insert(0) += 1;
                    if name.tech == Some(TechBase::Clan) {
                        detected.clan_engine_marker = true;
                    }
                    if let Some(marked) = engine_marker(&compact, clan) {
                        engine_named = Some(marked);
                    }
                }
                SlotKind::Gyro(gyro) => {
                    detected.gyro.get_or_insert(gyro);
                }
                SlotKind::Cockpit(cockpit) => {
                    detected.cockpit.get_or_insert(cockpit);
                }
                SlotKind::Structure(structure) => {
                    detected.structure.get_or_insert(structure);
                    if name.tech == Some(TechBase::Clan) {
                        detected.clan_structure_marker = true;
                    }
                }
                SlotKind::Armor(armor) => {
                    detected.armor.get_or_insert(armor);
                    if armor == ArmorType::Stealth {
                        detected.stealth = true;
                    }
                }
                SlotKind::HeatSink(kind) => {
                    let kind = if kind == HeatSinkKind::Double && clan {
                        HeatSinkKind::DoubleClan
                    } else {
                        kind
                    };
                    *sink_counts.entry((location, kind)).or_insert(0) += 1;
                }
                SlotKind::Case => {
                    detected.case.insert(location);
                    let id = if clan { "clan-case" } else { "case" };
                    *system_counts.entry((location, id)).or_insert(0) += 1;
                }
                SlotKind::CaseII => {
                    detected.case_ii.insert(location);
                    let id = if clan { "clan-case-ii" } else { "case-ii" };
                    *system_counts.entry((location, id)).or_insert(0) += 1;
                }
                SlotKind::JumpJet(jump_type) => {
                    detected.jump_type.get_or_insert(jump_type);
                }
                other => {
                    if let Some(id) = system_id(other, clan) {
                        *system_counts.entry((location, id)).or_insert(0) += 1;
                    }
                }
            }
        }
    }

    detected.engine = infer_engine(
        &engine_slots,
        engine_named,
        clan_default || clan_marks > 0,
        &mut detected.diagnostics,
    );
    if detected.engine.is_some_and(EngineType::is_clan) {
        detected.clan_engine_marker = true;
    }

    tally_heat_sinks(&sink_counts, catalog, &mut detected);

    for ((location, id), occurrences) in system_counts {
        let span = catalog.get(id).map(|e| e.slots).unwrap_or(1).max(1);
        detected.inferred.push(InferredEquipment {
            id: id.to_string(),
            location,
            count: occurrences.div_ceil(span),
        });
    }

    tracing::debug!(
        "scanned {}: engine {:?}, {} visible heat sinks, {} inferred items",
        unit.display_name(),
        detected.engine,
        detected.visible_heat_sinks,
        detected.inferred.len()
    );
    detected
}

/// Canonical catalog id for a system slot
fn system_id(kind: SlotKind, clan: bool) -> Option<&'static str> {
    let id = match kind {
        SlotKind::Tsm => "tsm",
        SlotKind::Masc => {
            if clan {
                "clan-masc"
            } else {
                "masc"
            }
        }
        SlotKind::Supercharger => "supercharger",
        SlotKind::Aes => "arm-aes",
        SlotKind::DroneOs => "drone-operating-system",
        SlotKind::TargetingComputer => {
            if clan {
                "clan-targeting-computer"
            } else {
                "targeting-computer"
            }
        }
        SlotKind::AdvancedFireControl => "advanced-fire-control",
        _ => return None,
    };
    Some(id)
}

/// Engine type from explicit markers or the side-torso slot count
fn infer_engine(
    engine_slots: &BTreeMap<Location, u32>,
    named: Option<EngineType>,
    clan_hint: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<EngineType> {
    if named.is_some() {
        return named;
    }
    if engine_slots.is_empty() {
        return None;
    }

    let left = engine_slots.get(&Location::LeftTorso).copied().unwrap_or(0);
    let right = engine_slots.get(&Location::RightTorso).copied().unwrap_or(0);
    if left != right {
        diagnostics.push(Diagnostic::InconsistentConstructionData {
            location: None,
            message: format!(
                "engine occupies {} left torso slots but {} right torso slots",
                left, right
            ),
        });
    }

    match left.max(right) {
        0 => Some(EngineType::Standard),
        2 => {
            let chosen = if clan_hint { EngineType::XlClan } else { EngineType::Light };
            diagnostics.push(Diagnostic::AmbiguousSystemDetection {
                system: "engine".to_string(),
                candidates: vec!["light".to_string(), "xl_clan".to_string()],
                chosen: if clan_hint { "xl_clan" } else { "light" }.to_string(),
            });
            Some(chosen)
        }
        3 => Some(EngineType::XlInnerSphere),
        4 => Some(EngineType::XxlClan),
        6 => Some(EngineType::XxlInnerSphere),
        other => {
            diagnostics.push(Diagnostic::InconsistentConstructionData {
                location: None,
                message: format!("no engine type occupies {} side torso slots", other),
            });
            None
        }
    }
}

/// Visible heat sinks, collapsing multi-slot sinks per location
fn tally_heat_sinks(
    counts: &BTreeMap<(Location, HeatSinkKind), u32>,
    catalog: &EquipmentCatalog,
    detected: &mut DetectedSystems,
) {
    let mut per_kind: BTreeMap<HeatSinkKind, u32> = BTreeMap::new();
    for (&(_, kind), &occurrences) in counts {
        let span = catalog.heat_sink_slots(kind).unwrap_or(1).max(1);
        *per_kind.entry(kind).or_insert(0) += occurrences.div_ceil(span);
    }

    detected.visible_heat_sinks = per_kind.values().sum();
    let chosen = per_kind
        .iter()
        .max_by_key(|(_, &count)| count)
        .map(|(&kind, _)| kind);

    if per_kind.len() > 1 {
        if let Some(kind) = chosen {
            detected.diagnostics.push(Diagnostic::AmbiguousSystemDetection {
                system: "heat sinks".to_string(),
                candidates: per_kind.keys().map(|k| format!("{:?}", k)).collect(),
                chosen: format!("{:?}", kind),
            });
        }
    }
    detected.heat_sink_kind = chosen;
}
