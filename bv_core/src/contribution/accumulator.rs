//! BvAccumulator - collects stage contributions before assembly

use crate::error::Diagnostic;
use serde::{Deserialize, Serialize};

/// A modifier applied to one item during the calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedModifier {
    /// Item or quantity the modifier applied to
    pub target: String,
    pub label: String,
    /// Multiplier, or amount added for additive modifiers
    pub value: f64,
}

/// Named partial contributions; nothing here is ever rounded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BvAccumulator {
    // === Defensive ===
    pub structure_bv: f64,
    /// Armor points weighted by armor type, before the per-point factor
    pub armor_bv: f64,
    pub gyro_bv: f64,
    pub defensive_equipment_bv: f64,
    pub explosive_penalty: f64,

    // === Offensive ===
    pub offensive_weapon_bv: f64,
    pub ammo_bv: f64,
    pub offensive_equipment_bv: f64,
    pub tonnage_bonus: f64,

    // === Heat ===
    pub heat_threshold: f64,
    pub weapons_halved: u32,

    pub modifiers: Vec<AppliedModifier>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BvAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_modifier(&mut self, target: impl Into<String>, label: impl Into<String>, value: f64) {
        self.modifiers.push(AppliedModifier {
            target: target.into(),
            label: label.into(),
            value,
        });
    }

    pub fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Defensive subtotal before the movement factor
    pub fn defensive_base(&self, armor_factor: f64) -> f64 {
        self.armor_bv * armor_factor + self.structure_bv + self.gyro_bv + self.defensive_equipment_bv
            - self.explosive_penalty
    }

    /// Offensive subtotal before the speed factor
    pub fn offensive_base(&self) -> f64 {
        self.offensive_weapon_bv + self.ammo_bv + self.offensive_equipment_bv + self.tonnage_bonus
    }
}
