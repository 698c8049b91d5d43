//! Prelude module for convenient imports
//!
//! ```rust
//! use bv_core::prelude::*;
//! ```

// Calculation
pub use crate::assembler::{calculate_bv, skill_adjusted_bv, BvEngine, BvResult};
pub use crate::error::{BvError, Diagnostic};

// Input
pub use crate::types::{ArmorType, CockpitType, EngineType, HeatSinkKind, JumpType, Location, TechBase, Topology};
pub use crate::unit::UnitConstruction;

// Data
pub use crate::catalog::EquipmentCatalog;
pub use crate::config::{default_catalog, default_tables, BvRules, DataTables};
