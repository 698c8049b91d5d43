//! PreparedUnit - resolved equipment and effective systems for one calculation

use crate::catalog::{CatalogEntry, EquipmentCatalog, EquipmentRole, EquipmentTrait};
use crate::config::{BvRules, DataTables};
use crate::defense::{internal_structure_points, run_mp};
use crate::error::{BvError, Diagnostic, UnresolvedEquipment};
use crate::resolver::{sorted_key, EquipmentResolver, ResolutionReport, ResolvedEquipment};
use crate::scanner::{scan, DetectedSystems};
use crate::types::{
    ArmorType, CockpitType, EngineType, Facing, GyroType, HeatSinkKind, JumpType, Location,
    StructureType, TechBase,
};
use crate::unit::UnitConstruction;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;

/// Heat sinks a fusion engine carries without using critical slots
const MAX_INTEGRATED_HEAT_SINKS: u32 = 10;

/// One piece of mounted equipment, resolved and placed
#[derive(Debug, Clone)]
pub struct MountedItem {
    /// Position in mount order; inferred items follow declared ones
    pub index: usize,
    /// Identifier as written by the source data
    pub identifier: String,
    pub location: Location,
    pub rear: bool,
    /// Tons carried, for ammunition
    pub tons: f64,
    /// Added from the slot grid rather than the equipment list
    pub inferred: bool,
    pub equipment: ResolvedEquipment,
}

impl MountedItem {
    pub fn entry(&self) -> &CatalogEntry {
        &self.equipment.entry
    }

    pub fn id(&self) -> &str {
        self.equipment.id()
    }

    pub fn role(&self) -> EquipmentRole {
        self.equipment.role()
    }

    pub fn has_trait(&self, t: EquipmentTrait) -> bool {
        self.equipment.entry.has_trait(t)
    }

    /// Label used in modifier records
    pub fn label(&self) -> String {
        format!("{} ({:?})", self.id(), self.location)
    }
}

/// Effective unit systems after merging structured fields with scanned slots
#[derive(Debug, Clone, Default)]
pub struct UnitSystems {
    pub engine: EngineType,
    pub gyro: GyroType,
    pub cockpit: CockpitType,
    pub structure: StructureType,
    pub armor: ArmorType,
    pub heat_sink_kind: HeatSinkKind,
    pub heat_sinks: u32,
    pub jump_type: JumpType,
    pub structure_points: BTreeMap<Location, u32>,
    pub case: BTreeSet<Location>,
    pub case_ii: BTreeSet<Location>,
    /// Full protection on every non-head location without CASE fitted
    pub implicit_protection: bool,
    pub stealth: bool,
    pub tsm: bool,
    pub masc: bool,
    pub supercharger: bool,
    pub aes: BTreeSet<Location>,
    pub drone_os: bool,
    pub targeting_computer: bool,
    pub advanced_fire_control: bool,
    pub run_mp: u32,
}

impl UnitSystems {
    /// Heat dissipated per turn
    pub fn dissipation(&self) -> f64 {
        self.heat_sinks as f64 * self.heat_sink_kind.dissipation()
    }
}

/// Everything the stages read; built once per calculation
#[derive(Debug, Clone)]
pub struct PreparedUnit<'a> {
    pub unit: &'a UnitConstruction,
    pub rules: &'a BvRules,
    pub tables: &'a DataTables,
    pub items: Vec<MountedItem>,
    pub systems: UnitSystems,
    pub diagnostics: Vec<Diagnostic>,
    pub resolution: ResolutionReport,
}

impl<'a> PreparedUnit<'a> {
    /// Resolve equipment, scan slots and derive the effective systems
    pub fn prepare(
        unit: &'a UnitConstruction,
        catalog: &'a EquipmentCatalog,
        tables: &'a DataTables,
        rules: &'a BvRules,
    ) -> Result<Self, BvError> {
        if !unit.topology.is_supported() {
            return Err(BvError::UnsupportedChassis(unit.topology));
        }

        let detected = scan(unit, catalog);
        let mut resolver = EquipmentResolver::new(catalog, tables, unit.tech_base);
        let mut items = Vec::with_capacity(unit.equipment.len());
        let mut failures = Vec::new();

        for (index, mounted) in unit.equipment.iter().enumerate() {
            match resolver.resolve(&mounted.id) {
                Some(equipment) => items.push(MountedItem {
                    index,
                    identifier: mounted.id.clone(),
                    location: mounted.location,
                    rear: mounted.facing == Facing::Rear,
                    tons: mounted.tons.unwrap_or(1.0),
                    inferred: false,
                    equipment,
                }),
                None => failures.push(UnresolvedEquipment {
                    identifier: mounted.id.clone(),
                    location: mounted.location,
                }),
            }
        }

        let mut next_index = unit.equipment.len();
        for inferred in &detected.inferred {
            let present = items
                .iter()
                .filter(|i| i.id() == inferred.id && i.location == inferred.location)
                .count() as u32;
            for _ in present..inferred.count {
                match resolver.resolve_canonical(&inferred.id) {
                    Some(equipment) => items.push(MountedItem {
                        index: next_index,
                        identifier: inferred.id.clone(),
                        location: inferred.location,
                        rear: false,
                        tons: 1.0,
                        inferred: true,
                        equipment,
                    }),
                    None => failures.push(UnresolvedEquipment {
                        identifier: inferred.id.clone(),
                        location: inferred.location,
                    }),
                }
                next_index += 1;
            }
        }

        if !failures.is_empty() {
            return Err(BvError::UnresolvableEquipment(failures));
        }

        mark_rear_mounts(unit, &mut items);

        let mut diagnostics = detected.diagnostics.clone();
        let systems = derive_systems(unit, tables, &detected, &items, &mut diagnostics)?;
        for diagnostic in &diagnostics {
            tracing::warn!("{}: {}", unit.display_name(), diagnostic);
        }

        Ok(PreparedUnit {
            unit,
            rules,
            tables,
            items,
            systems,
            diagnostics,
            resolution: resolver.report(),
        })
    }

    pub fn items_with_role(&self, role: EquipmentRole) -> impl Iterator<Item = &MountedItem> {
        self.items.iter().filter(move |i| i.role() == role)
    }

    pub fn items_in(&self, location: Location) -> impl Iterator<Item = &MountedItem> {
        self.items.iter().filter(move |i| i.location == location)
    }
}

/// Flag weapons mounted rear-facing, either declared or listed as `(R)` slots.
/// Slot entries are matched on sorted characters, so word order may differ.
fn mark_rear_mounts(unit: &UnitConstruction, items: &mut [MountedItem]) {
    let mut budget: HashMap<(Location, String), u32> = HashMap::new();
    for (&location, slots) in &unit.critical_slots {
        for raw in slots {
            if raw.to_ascii_lowercase().contains("(r)") {
                *budget.entry((location, sorted_key(raw))).or_insert(0) += 1;
            }
        }
    }
    if budget.is_empty() {
        return;
    }

    for item in items.iter_mut().filter(|i| !i.inferred) {
        let span = item.equipment.slots().max(1);
        let key = (item.location, sorted_key(&item.identifier));
        let Some(remaining) = budget.get_mut(&key) else {
            continue;
        };
        if *remaining > 0 {
            *remaining = remaining.saturating_sub(span);
            item.rear = true;
        }
    }
}

fn derive_systems(
    unit: &UnitConstruction,
    tables: &DataTables,
    detected: &DetectedSystems,
    items: &[MountedItem],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<UnitSystems, BvError> {
    let has = |t: EquipmentTrait| items.iter().any(|i| i.has_trait(t));
    let located = |t: EquipmentTrait| -> BTreeSet<Location> {
        items.iter().filter(|i| i.has_trait(t)).map(|i| i.location).collect()
    };

    let engine = prefer("engine", unit.engine, detected.engine, diagnostics);
    let gyro = prefer("gyro", unit.gyro, detected.gyro, diagnostics);
    let cockpit = prefer("cockpit", unit.cockpit, detected.cockpit, diagnostics);
    let structure = prefer("structure", unit.structure, detected.structure, diagnostics);
    let armor = prefer("armor", unit.armor_type, detected.armor, diagnostics);

    let (heat_sink_kind, heat_sinks) = match unit.heat_sinks {
        Some(declared) => {
            if let Some(scanned) = detected.heat_sink_kind {
                prefer("heat sinks", Some(declared.kind), Some(scanned), diagnostics);
            }
            (declared.kind, declared.count)
        }
        None => {
            if unit.omni {
                diagnostics.push(Diagnostic::InconsistentConstructionData {
                    location: None,
                    message: "omni unit without a declared heat sink total; counted from slots".to_string(),
                });
            }
            let rating = unit.tonnage.saturating_mul(unit.walk_mp);
            let integrated = (rating / 25).min(MAX_INTEGRATED_HEAT_SINKS);
            (
                detected.heat_sink_kind.unwrap_or_default(),
                detected.visible_heat_sinks + integrated,
            )
        }
    };

    let jump_type = unit.jump_type.or(detected.jump_type).unwrap_or(if has(EquipmentTrait::ImprovedJumpJet) {
        JumpType::Improved
    } else {
        JumpType::Standard
    });

    let structure_points = if unit.internal_structure.is_empty() {
        internal_structure_points(unit.tonnage, unit.topology).ok_or_else(|| {
            BvError::InvalidConstruction(format!(
                "no internal structure given and {} tons is outside the structure table",
                unit.tonnage
            ))
        })?
    } else {
        unit.internal_structure.clone()
    };

    let mut case = located(EquipmentTrait::Case);
    case.extend(detected.case.iter().copied());
    let mut case_ii = located(EquipmentTrait::CaseII);
    case_ii.extend(detected.case_ii.iter().copied());

    let clan_markers = engine.is_clan()
        || detected.clan_engine_marker
        || detected.clan_structure_marker
        || unit.tech_base == TechBase::Clan;
    let implicit_protection = tables
        .implicit_protection_for(&unit.chassis, &unit.model)
        .unwrap_or(clan_markers);

    let tsm = has(EquipmentTrait::Tsm);
    let masc = has(EquipmentTrait::Masc);
    let supercharger = has(EquipmentTrait::Supercharger);

    Ok(UnitSystems {
        engine,
        gyro,
        cockpit,
        structure,
        armor,
        heat_sink_kind,
        heat_sinks,
        jump_type,
        structure_points,
        case,
        case_ii,
        implicit_protection,
        stealth: armor == ArmorType::Stealth || detected.stealth || has(EquipmentTrait::Stealth),
        tsm,
        masc,
        supercharger,
        aes: located(EquipmentTrait::Aes),
        drone_os: has(EquipmentTrait::DroneOs),
        targeting_computer: has(EquipmentTrait::TargetingComputer),
        advanced_fire_control: has(EquipmentTrait::AdvancedFireControl),
        run_mp: run_mp(unit.walk_mp, tsm, masc, supercharger),
    })
}

/// Structured value if present, else scanned, else the type default
fn prefer<T: Copy + PartialEq + Default + Debug>(
    system: &str,
    structured: Option<T>,
    scanned: Option<T>,
    diagnostics: &mut Vec<Diagnostic>,
) -> T {
    match (structured, scanned) {
        (Some(s), Some(d)) if s != d => {
            diagnostics.push(Diagnostic::StructuredOverride {
                system: system.to_string(),
                structured: format!("{:?}", s),
                scanned: format!("{:?}", d),
            });
            s
        }
        (Some(s), _) => s,
        (None, Some(d)) => d,
        (None, None) => T::default(),
    }
}
