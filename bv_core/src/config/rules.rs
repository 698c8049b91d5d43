//! Tunable rule constants

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Rule constants consumed by the calculation stages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BvRules {
    #[serde(default)]
    pub defense: DefenseRules,
    #[serde(default)]
    pub explosive: ExplosiveRules,
    #[serde(default)]
    pub weapon: WeaponRules,
    #[serde(default)]
    pub heat: HeatRules,
    #[serde(default)]
    pub cockpit: CockpitRules,
}

impl BvRules {
    /// Reject negative multipliers and rates
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("defense.armor_factor", self.defense.armor_factor),
            ("defense.structure_factor", self.defense.structure_factor),
            ("defense.stealth_tmm", self.defense.stealth_tmm),
            ("defense.tsm_tonnage_factor", self.defense.tsm_tonnage_factor),
            ("explosive.standard_per_slot", self.explosive.standard_per_slot),
            ("explosive.reduced_per_slot", self.explosive.reduced_per_slot),
            ("explosive.gauss_per_slot", self.explosive.gauss_per_slot),
            ("explosive.hvac_flat", self.explosive.hvac_flat),
            ("weapon.linked_array", self.weapon.linked_array),
            ("weapon.aes_arm", self.weapon.aes_arm),
            ("weapon.active_shield", self.weapon.active_shield),
            ("weapon.rear_facing", self.weapon.rear_facing),
            ("weapon.drone_control", self.weapon.drone_control),
            ("weapon.targeting_computer", self.weapon.targeting_computer),
            ("weapon.heat_penalty", self.weapon.heat_penalty),
            ("heat.stealth_heat", self.heat.stealth_heat),
            ("cockpit.reduced_capability", self.cockpit.reduced_capability),
            ("cockpit.industrial_fire_control", self.cockpit.industrial_fire_control),
            ("cockpit.interface", self.cockpit.interface),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseRules {
    /// Defensive BV per point of armor (after armor type multiplier)
    #[serde(default = "default_armor_factor")]
    pub armor_factor: f64,
    /// Defensive BV per point of internal structure
    #[serde(default = "default_structure_factor")]
    pub structure_factor: f64,
    /// Target movement modifier granted by stealth armor
    #[serde(default = "default_stealth_tmm")]
    pub stealth_tmm: f64,
    /// Tonnage bonus multiplier with triple-strength myomer
    #[serde(default = "default_tsm_tonnage_factor")]
    pub tsm_tonnage_factor: f64,
}

impl Default for DefenseRules {
    fn default() -> Self {
        DefenseRules {
            armor_factor: 2.5,
            structure_factor: 1.5,
            stealth_tmm: 2.0,
            tsm_tonnage_factor: 1.5,
        }
    }
}

fn default_armor_factor() -> f64 {
    2.5
}
fn default_structure_factor() -> f64 {
    1.5
}
fn default_stealth_tmm() -> f64 {
    2.0
}
fn default_tsm_tonnage_factor() -> f64 {
    1.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosiveRules {
    /// Penalty per slot of standard explosive equipment (ammunition)
    #[serde(default = "default_standard_per_slot")]
    pub standard_per_slot: f64,
    /// Penalty per slot of reduced-risk equipment, also charged for standard
    /// equipment behind partial protection
    #[serde(default = "default_low_per_slot")]
    pub reduced_per_slot: f64,
    /// Penalty per slot of gauss-family weapons
    #[serde(default = "default_low_per_slot")]
    pub gauss_per_slot: f64,
    /// Flat penalty per hyper-velocity weapon regardless of slots
    #[serde(default = "default_low_per_slot")]
    pub hvac_flat: f64,
}

impl Default for ExplosiveRules {
    fn default() -> Self {
        ExplosiveRules {
            standard_per_slot: 15.0,
            reduced_per_slot: 1.0,
            gauss_per_slot: 1.0,
            hvac_flat: 1.0,
        }
    }
}

fn default_standard_per_slot() -> f64 {
    15.0
}
fn default_low_per_slot() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponRules {
    #[serde(default = "default_linked_array")]
    pub linked_array: f64,
    #[serde(default = "default_aes_arm")]
    pub aes_arm: f64,
    #[serde(default = "default_half")]
    pub active_shield: f64,
    #[serde(default = "default_half")]
    pub rear_facing: f64,
    #[serde(default = "default_drone_control")]
    pub drone_control: f64,
    #[serde(default = "default_targeting_computer")]
    pub targeting_computer: f64,
    /// Multiplier for weapons past the heat threshold
    #[serde(default = "default_half")]
    pub heat_penalty: f64,
    /// BV-context heat scaling by fire mode
    #[serde(default = "default_ultra_heat")]
    pub ultra_heat: f64,
    #[serde(default = "default_rotary_heat")]
    pub rotary_heat: f64,
    #[serde(default = "default_half")]
    pub streak_heat: f64,
    #[serde(default = "default_one_shot_heat")]
    pub one_shot_heat: f64,
}

impl Default for WeaponRules {
    fn default() -> Self {
        WeaponRules {
            linked_array: 0.67,
            aes_arm: 1.25,
            active_shield: 0.5,
            rear_facing: 0.5,
            drone_control: 0.8,
            targeting_computer: 1.25,
            heat_penalty: 0.5,
            ultra_heat: 2.0,
            rotary_heat: 6.0,
            streak_heat: 0.5,
            one_shot_heat: 0.25,
        }
    }
}

fn default_linked_array() -> f64 {
    0.67
}
fn default_aes_arm() -> f64 {
    1.25
}
fn default_half() -> f64 {
    0.5
}
fn default_drone_control() -> f64 {
    0.8
}
fn default_targeting_computer() -> f64 {
    1.25
}
fn default_ultra_heat() -> f64 {
    2.0
}
fn default_rotary_heat() -> f64 {
    6.0
}
fn default_one_shot_heat() -> f64 {
    0.25
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatRules {
    /// Heat a unit may build before the threshold is reached, on top of dissipation
    #[serde(default = "default_base_threshold")]
    pub base_threshold: f64,
    /// Heat generated by an engaged stealth system
    #[serde(default = "default_stealth_heat")]
    pub stealth_heat: f64,
}

impl Default for HeatRules {
    fn default() -> Self {
        HeatRules {
            base_threshold: 6.0,
            stealth_heat: 10.0,
        }
    }
}

fn default_base_threshold() -> f64 {
    6.0
}
fn default_stealth_heat() -> f64 {
    10.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CockpitRules {
    #[serde(default = "default_reduced_capability")]
    pub reduced_capability: f64,
    /// Offensive multiplier for industrial cockpits without advanced fire control
    #[serde(default = "default_industrial_fire_control")]
    pub industrial_fire_control: f64,
    #[serde(default = "default_interface")]
    pub interface: f64,
}

impl Default for CockpitRules {
    fn default() -> Self {
        CockpitRules {
            reduced_capability: 0.95,
            industrial_fire_control: 0.9,
            interface: 1.3,
        }
    }
}

fn default_reduced_capability() -> f64 {
    0.95
}
fn default_industrial_fire_control() -> f64 {
    0.9
}
fn default_interface() -> f64 {
    1.3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = BvRules::default();
        assert!((rules.defense.armor_factor - 2.5).abs() < f64::EPSILON);
        assert!((rules.explosive.standard_per_slot - 15.0).abs() < f64::EPSILON);
        assert!((rules.weapon.drone_control - 0.8).abs() < f64::EPSILON);
        assert!((rules.heat.base_threshold - 6.0).abs() < f64::EPSILON);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_rules() {
        let toml = r#"
[explosive]
standard_per_slot = 20

[cockpit]
interface = 1.25
"#;

        let rules: BvRules = toml::from_str(toml).unwrap();
        assert!((rules.explosive.standard_per_slot - 20.0).abs() < f64::EPSILON);
        assert!((rules.explosive.gauss_per_slot - 1.0).abs() < f64::EPSILON);
        assert!((rules.cockpit.interface - 1.25).abs() < f64::EPSILON);
        assert!((rules.weapon.rear_facing - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut rules = BvRules::default();
        rules.weapon.rear_facing = -0.5;
        assert!(rules.validate().is_err());
    }
}
