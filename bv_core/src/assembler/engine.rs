//! BvEngine - runs the stage pipeline and assembles the final value

use super::result::{BvBreakdown, BvResult, CockpitAdjustment};
use crate::catalog::EquipmentCatalog;
use crate::config::{default_catalog, default_tables, BvRules, DataTables};
use crate::contribution::{run_stages, BvAccumulator, BvStage, PreparedUnit};
use crate::defense::constants::MIN_DEFENSIVE_VALUE;
use crate::defense::{defensive_factor, DefensiveEquipmentStage, ExplosiveStage, StructureArmorStage};
use crate::error::BvError;
use crate::offense::{speed_factor, AmmoStage, OffensiveEquipmentStage, TonnageStage, WeaponStage};
use crate::types::CockpitType;
use crate::unit::UnitConstruction;

/// The standard stage set
pub fn default_stages() -> Vec<Box<dyn BvStage>> {
    vec![
        Box::new(StructureArmorStage),
        Box::new(DefensiveEquipmentStage),
        Box::new(ExplosiveStage),
        Box::new(WeaponStage),
        Box::new(AmmoStage),
        Box::new(OffensiveEquipmentStage),
        Box::new(TonnageStage),
    ]
}

/// Calculates Battle Value against a shared catalog and tables
///
/// The engine holds no per-unit state, so one instance can be shared across
/// threads; each calculation builds its own resolver cache.
pub struct BvEngine<'a> {
    catalog: &'a EquipmentCatalog,
    tables: &'a DataTables,
    rules: BvRules,
    stages: Vec<Box<dyn BvStage>>,
}

impl<'a> BvEngine<'a> {
    pub fn new(catalog: &'a EquipmentCatalog, tables: &'a DataTables) -> Self {
        BvEngine {
            catalog,
            tables,
            rules: BvRules::default(),
            stages: default_stages(),
        }
    }

    pub fn with_rules(mut self, rules: BvRules) -> Self {
        self.rules = rules;
        self
    }

    /// Add an extra stage after the standard ones of equal priority
    pub fn with_stage(mut self, stage: Box<dyn BvStage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn rules(&self) -> &BvRules {
        &self.rules
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        self.catalog
    }

    /// Calculate the BV of one unit
    pub fn calculate(&self, unit: &UnitConstruction) -> Result<BvResult, BvError> {
        let prepared = PreparedUnit::prepare(unit, self.catalog, self.tables, &self.rules)?;
        let acc = run_stages(&self.stages, &prepared);
        let result = self.assemble(&prepared, acc);
        tracing::debug!("{}", result.summary());
        Ok(result)
    }

    fn assemble(&self, prepared: &PreparedUnit<'_>, mut acc: BvAccumulator) -> BvResult {
        let rules = &self.rules;
        let systems = &prepared.systems;
        let jump_mp = prepared.unit.jump_mp;

        // Defensive
        let defensive_base = acc.defensive_base(rules.defense.armor_factor).max(MIN_DEFENSIVE_VALUE);
        let movement = defensive_factor(systems.run_mp, jump_mp, systems.stealth, rules.defense.stealth_tmm);
        let defensive_bv = defensive_base * movement;

        // Offensive
        let offensive_base = acc.offensive_base();
        let speed = speed_factor(systems.run_mp, jump_mp);
        let offensive_bv = offensive_base * speed;

        // Cockpit, first matching rule only
        let (cockpit, cockpit_factor) = if systems.cockpit.is_reduced_capability() {
            (CockpitAdjustment::ReducedCapability, rules.cockpit.reduced_capability)
        } else if systems.cockpit.is_industrial() && !systems.advanced_fire_control {
            (CockpitAdjustment::IndustrialFireControl, rules.cockpit.industrial_fire_control)
        } else if systems.cockpit == CockpitType::Interface {
            (CockpitAdjustment::Interface, rules.cockpit.interface)
        } else {
            (CockpitAdjustment::None, 1.0)
        };

        let unrounded = match cockpit {
            CockpitAdjustment::None => defensive_bv + offensive_bv,
            CockpitAdjustment::IndustrialFireControl => defensive_bv + offensive_bv * cockpit_factor,
            CockpitAdjustment::ReducedCapability | CockpitAdjustment::Interface => {
                (defensive_bv + offensive_bv) * cockpit_factor
            }
        };
        if cockpit != CockpitAdjustment::None {
            acc.record_modifier("cockpit", format!("{:?}", systems.cockpit), cockpit_factor);
        }

        let breakdown = BvBreakdown {
            structure_bv: acc.structure_bv,
            armor_bv: acc.armor_bv * rules.defense.armor_factor,
            gyro_bv: acc.gyro_bv,
            defensive_equipment_bv: acc.defensive_equipment_bv,
            explosive_penalty: acc.explosive_penalty,
            defensive_base,
            defensive_factor: movement,
            defensive_bv,
            weapon_bv: acc.offensive_weapon_bv,
            ammo_bv: acc.ammo_bv,
            offensive_equipment_bv: acc.offensive_equipment_bv,
            tonnage_bonus: acc.tonnage_bonus,
            offensive_base,
            speed_factor: speed,
            offensive_bv,
            heat_threshold: acc.heat_threshold,
            weapons_halved: acc.weapons_halved,
            cockpit_factor,
        };

        BvResult {
            unit: prepared.unit.display_name(),
            total: unrounded.round().max(0.0) as u32,
            breakdown,
            cockpit,
            modifiers: acc.modifiers,
            diagnostics: acc.diagnostics,
            resolution: prepared.resolution.clone(),
        }
    }
}

impl Default for BvEngine<'static> {
    fn default() -> Self {
        BvEngine::new(default_catalog(), default_tables())
    }
}

/// Calculate a unit's BV against a catalog with the bundled resolver tables
pub fn calculate_bv(unit: &UnitConstruction, catalog: &EquipmentCatalog) -> Result<BvResult, BvError> {
    BvEngine::new(catalog, default_tables()).calculate(unit)
}
