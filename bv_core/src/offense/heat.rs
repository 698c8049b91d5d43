//! BV-context heat: per-weapon heat substitution and the heat threshold

use crate::catalog::{CatalogEntry, FireMode};
use crate::config::{HeatRules, WeaponRules};
use crate::contribution::PreparedUnit;
use crate::types::{EngineType, JumpType};
use serde::{Deserialize, Serialize};

/// Heat a weapon counts for when ordering weapons
pub fn bv_heat(entry: &CatalogEntry, rules: &WeaponRules) -> f64 {
    let scale = match entry.fire_mode {
        FireMode::Standard => 1.0,
        FireMode::Ultra => rules.ultra_heat,
        FireMode::Rotary => rules.rotary_heat,
        FireMode::Streak => rules.streak_heat,
        FireMode::OneShot => rules.one_shot_heat,
    };
    entry.heat * scale
}

/// Worse of running heat and jumping heat
pub fn movement_heat(engine: EngineType, jump_type: JumpType, jump_mp: u32) -> f64 {
    let mut jump = jump_type.jump_heat(jump_mp);
    if engine.doubles_jump_heat() {
        jump *= 2.0;
    }
    engine.running_heat().max(jump)
}

/// Heat budget a unit can spend on weapons before later weapons are halved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatProfile {
    pub dissipation: f64,
    pub movement_heat: f64,
    pub stealth_heat: f64,
    pub threshold: f64,
}

impl HeatProfile {
    pub fn new(dissipation: f64, movement_heat: f64, stealth_heat: f64, rules: &HeatRules) -> Self {
        HeatProfile {
            dissipation,
            movement_heat,
            stealth_heat,
            threshold: rules.base_threshold + dissipation - movement_heat - stealth_heat,
        }
    }

    pub fn for_unit(unit: &PreparedUnit<'_>) -> Self {
        let systems = &unit.systems;
        let stealth_heat = if systems.stealth {
            unit.rules.heat.stealth_heat
        } else {
            0.0
        };
        Self::new(
            systems.dissipation(),
            movement_heat(systems.engine, systems.jump_type, unit.unit.jump_mp),
            stealth_heat,
            &unit.rules.heat,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_catalog;

    #[test]
    fn test_fire_mode_heat() {
        let rules = WeaponRules::default();
        let catalog = default_catalog();
        let uac = catalog.get("ultra-ac-5").unwrap();
        assert!((bv_heat(uac, &rules) - 2.0).abs() < f64::EPSILON);
        let rac = catalog.get("rotary-ac-5").unwrap();
        assert!((bv_heat(rac, &rules) - 6.0).abs() < f64::EPSILON);
        let streak = catalog.get("streak-srm-6").unwrap();
        assert!((bv_heat(streak, &rules) - 2.0).abs() < f64::EPSILON);
        let laser = catalog.get("medium-laser").unwrap();
        assert!((bv_heat(laser, &rules) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_movement_heat() {
        assert!((movement_heat(EngineType::Standard, JumpType::Standard, 0) - 2.0).abs() < f64::EPSILON);
        assert!((movement_heat(EngineType::Standard, JumpType::Standard, 5) - 5.0).abs() < f64::EPSILON);
        assert!((movement_heat(EngineType::Ice, JumpType::Standard, 0)).abs() < f64::EPSILON);
        assert!((movement_heat(EngineType::XxlInnerSphere, JumpType::Standard, 4) - 8.0).abs() < f64::EPSILON);
        assert!((movement_heat(EngineType::Standard, JumpType::Mechanical, 4) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_threshold() {
        let profile = HeatProfile::new(10.0, 2.0, 0.0, &HeatRules::default());
        assert!((profile.threshold - 14.0).abs() < f64::EPSILON);
        let stealthy = HeatProfile::new(20.0, 2.0, 10.0, &HeatRules::default());
        assert!((stealthy.threshold - 14.0).abs() < f64::EPSILON);
    }
}
