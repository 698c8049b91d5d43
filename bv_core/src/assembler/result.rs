//! BvResult - outcome of one calculation

use crate::contribution::AppliedModifier;
use crate::error::Diagnostic;
use crate::resolver::ResolutionReport;
use serde::{Deserialize, Serialize};

/// Cockpit multiplier and what it scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CockpitAdjustment {
    None,
    /// Reduced-capability cockpit, applied to the total
    ReducedCapability,
    /// Industrial cockpit without advanced fire control, applied to offense
    IndustrialFireControl,
    /// Interface cockpit, applied to the total
    Interface,
}

/// Every intermediate value of a calculation, unrounded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BvBreakdown {
    // === Defensive ===
    pub structure_bv: f64,
    pub armor_bv: f64,
    pub gyro_bv: f64,
    pub defensive_equipment_bv: f64,
    pub explosive_penalty: f64,
    /// Defensive subtotal after the floor, before movement
    pub defensive_base: f64,
    pub defensive_factor: f64,
    pub defensive_bv: f64,

    // === Offensive ===
    pub weapon_bv: f64,
    pub ammo_bv: f64,
    pub offensive_equipment_bv: f64,
    pub tonnage_bonus: f64,
    pub offensive_base: f64,
    pub speed_factor: f64,
    pub offensive_bv: f64,

    // === Heat ===
    pub heat_threshold: f64,
    pub weapons_halved: u32,

    pub cockpit_factor: f64,
}

/// Result of a BV calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BvResult {
    /// Chassis and model
    pub unit: String,
    /// Final BV, rounded once
    pub total: u32,
    pub breakdown: BvBreakdown,
    pub cockpit: CockpitAdjustment,
    /// Every modifier applied, in application order
    pub modifiers: Vec<AppliedModifier>,
    pub diagnostics: Vec<Diagnostic>,
    /// Identifiers resolved through overrides or fallbacks
    pub resolution: ResolutionReport,
}

impl BvResult {
    /// Whether the calculation raised any diagnostics
    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Modifiers applied to a given target
    pub fn modifiers_for<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a AppliedModifier> + 'a {
        self.modifiers.iter().filter(move |m| m.target == target)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let b = &self.breakdown;
        let mut parts = vec![format!("{}: {} BV", self.unit, self.total)];

        parts.push(format!("{:.1} defensive (x{:.2})", b.defensive_bv, b.defensive_factor));
        parts.push(format!("{:.1} offensive (x{:.2})", b.offensive_bv, b.speed_factor));

        if b.explosive_penalty > 0.0 {
            parts.push(format!("{:.0} explosive penalty", b.explosive_penalty));
        }

        if b.weapons_halved > 0 {
            parts.push(format!("{} weapons over heat", b.weapons_halved));
        }

        if self.cockpit != CockpitAdjustment::None {
            parts.push(format!("cockpit x{:.2}", b.cockpit_factor));
        }

        if !self.resolution.is_empty() {
            parts.push(format!(
                "{} overrides, {} fallbacks",
                self.resolution.overrides.len(),
                self.resolution.fallbacks.len()
            ));
        }

        if !self.diagnostics.is_empty() {
            parts.push(format!("{} warnings", self.diagnostics.len()));
        }

        parts.join(", ")
    }
}

impl Default for BvResult {
    fn default() -> Self {
        BvResult {
            unit: String::new(),
            total: 0,
            breakdown: BvBreakdown::default(),
            cockpit: CockpitAdjustment::None,
            modifiers: Vec::new(),
            diagnostics: Vec::new(),
            resolution: ResolutionReport::default(),
        }
    }
}
