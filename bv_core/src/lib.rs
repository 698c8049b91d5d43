//! bv_core - Battle Value calculation for BattleMech construction data
//!
//! This library provides:
//! - EquipmentCatalog: Canonical per-item BV facts loaded from TOML
//! - EquipmentResolver: Staged mapping of raw identifiers to catalog entries
//! - Crit scanning: Engine, gyro, CASE and other systems read from slot grids
//! - BvEngine: Defensive and offensive pipelines assembled into one rounded total

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod contribution;
pub mod defense;
pub mod error;
pub mod offense;
pub mod prelude;
pub mod resolver;
pub mod scanner;
pub mod types;
pub mod unit;

#[cfg(test)]
mod testing;

// Re-export core types for convenience
pub use assembler::{calculate_bv, skill_adjusted_bv, BvBreakdown, BvEngine, BvResult, CockpitAdjustment};
pub use catalog::{CatalogEntry, EquipmentCatalog, EquipmentRole, EquipmentTrait, ExplosiveCategory, FireMode};
pub use config::{default_catalog, default_tables, BvRules, ConfigError, DataTables};
pub use contribution::{AppliedModifier, BvAccumulator, BvStage, ModifierChain, PreparedUnit};
pub use error::{BvError, Diagnostic, UnresolvedEquipment};
pub use resolver::{EquipmentResolver, ResolutionReport, ResolutionStage};
pub use types::{
    ArmorType, CockpitType, EngineType, Facing, GyroType, HeatSinkKind, JumpType, Location, StructureType, TechBase,
    Topology,
};
pub use unit::{HeatSinkSpec, LocationArmor, MountedEquipment, UnitConstruction};
