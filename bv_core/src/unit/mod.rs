//! UnitConstruction - immutable construction data for one BattleMech

use crate::config::ConfigError;
use crate::types::{
    ArmorType, CockpitType, EngineType, Facing, GyroType, HeatSinkKind, JumpType, Location,
    StructureType, TechBase, Topology,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Armor points on one location
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationArmor {
    #[serde(default)]
    pub front: u32,
    #[serde(default)]
    pub rear: u32,
    /// Patchwork armor type; falls back to the unit's armor type
    #[serde(default)]
    pub armor_type: Option<ArmorType>,
}

impl LocationArmor {
    pub fn total(&self) -> u32 {
        self.front + self.rear
    }
}

/// Declared heat sinks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatSinkSpec {
    pub kind: HeatSinkKind,
    pub count: u32,
}

/// One mounted equipment record as written by the source data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountedEquipment {
    pub id: String,
    pub location: Location,
    #[serde(default)]
    pub facing: Facing,
    /// Tons of ammunition carried by this record
    #[serde(default)]
    pub tons: Option<f64>,
}

/// Construction data for one unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitConstruction {
    pub chassis: String,
    #[serde(default)]
    pub model: String,
    pub tonnage: u32,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub tech_base: TechBase,
    #[serde(default)]
    pub omni: bool,
    pub walk_mp: u32,
    #[serde(default)]
    pub jump_mp: u32,
    #[serde(default)]
    pub jump_type: Option<JumpType>,

    // === Components (scanned from slots when absent) ===
    #[serde(default)]
    pub engine: Option<EngineType>,
    #[serde(default)]
    pub gyro: Option<GyroType>,
    #[serde(default)]
    pub cockpit: Option<CockpitType>,
    #[serde(default)]
    pub structure: Option<StructureType>,
    #[serde(default)]
    pub armor_type: Option<ArmorType>,
    #[serde(default)]
    pub heat_sinks: Option<HeatSinkSpec>,

    // === Per-location data ===
    /// Explicit internal structure points; the tonnage table is used when empty
    #[serde(default)]
    pub internal_structure: BTreeMap<Location, u32>,
    #[serde(default)]
    pub armor: BTreeMap<Location, LocationArmor>,
    #[serde(default)]
    pub equipment: Vec<MountedEquipment>,
    /// Raw critical-slot names per location, in slot order
    #[serde(default)]
    pub critical_slots: BTreeMap<Location, Vec<String>>,
}

impl UnitConstruction {
    /// Create a unit with the given chassis, model, tonnage and walking MP
    pub fn new(chassis: impl Into<String>, model: impl Into<String>, tonnage: u32, walk_mp: u32) -> Self {
        UnitConstruction {
            chassis: chassis.into(),
            model: model.into(),
            tonnage,
            walk_mp,
            ..Default::default()
        }
    }

    /// Parse a unit from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// "Chassis Model" display name
    pub fn display_name(&self) -> String {
        if self.model.is_empty() {
            self.chassis.clone()
        } else {
            format!("{} {}", self.chassis, self.model)
        }
    }

    pub fn total_armor_points(&self) -> u32 {
        self.armor.values().map(LocationArmor::total).sum()
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_tech_base(mut self, tech_base: TechBase) -> Self {
        self.tech_base = tech_base;
        self
    }

    pub fn omni(mut self) -> Self {
        self.omni = true;
        self
    }

    pub fn with_jump(mut self, jump_mp: u32, jump_type: JumpType) -> Self {
        self.jump_mp = jump_mp;
        self.jump_type = Some(jump_type);
        self
    }

    pub fn with_engine(mut self, engine: EngineType) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_gyro(mut self, gyro: GyroType) -> Self {
        self.gyro = Some(gyro);
        self
    }

    pub fn with_cockpit(mut self, cockpit: CockpitType) -> Self {
        self.cockpit = Some(cockpit);
        self
    }

    pub fn with_structure(mut self, structure: StructureType) -> Self {
        self.structure = Some(structure);
        self
    }

    pub fn with_armor_type(mut self, armor_type: ArmorType) -> Self {
        self.armor_type = Some(armor_type);
        self
    }

    pub fn with_heat_sinks(mut self, kind: HeatSinkKind, count: u32) -> Self {
        self.heat_sinks = Some(HeatSinkSpec { kind, count });
        self
    }

    pub fn with_internal_structure(mut self, location: Location, points: u32) -> Self {
        self.internal_structure.insert(location, points);
        self
    }

    pub fn with_armor(mut self, location: Location, front: u32, rear: u32) -> Self {
        self.armor.insert(
            location,
            LocationArmor {
                front,
                rear,
                armor_type: None,
            },
        );
        self
    }

    /// Set a patchwork armor type on an already armored location
    pub fn with_location_armor_type(mut self, location: Location, armor_type: ArmorType) -> Self {
        self.armor.entry(location).or_default().armor_type = Some(armor_type);
        self
    }

    pub fn with_equipment(mut self, id: impl Into<String>, location: Location) -> Self {
        self.equipment.push(MountedEquipment {
            id: id.into(),
            location,
            facing: Facing::Front,
            tons: None,
        });
        self
    }

    pub fn with_rear_equipment(mut self, id: impl Into<String>, location: Location) -> Self {
        self.equipment.push(MountedEquipment {
            id: id.into(),
            location,
            facing: Facing::Rear,
            tons: None,
        });
        self
    }

    pub fn with_ammo(mut self, id: impl Into<String>, location: Location, tons: f64) -> Self {
        self.equipment.push(MountedEquipment {
            id: id.into(),
            location,
            facing: Facing::Front,
            tons: Some(tons),
        });
        self
    }

    /// Replace the slot list of a location
    pub fn with_slots(mut self, location: Location, slots: &[&str]) -> Self {
        self.critical_slots
            .insert(location, slots.iter().map(|s| s.to_string()).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let unit = UnitConstruction::new("Hunchback", "HBK-4G", 50, 4)
            .with_engine(EngineType::Standard)
            .with_armor(Location::CenterTorso, 26, 5)
            .with_armor(Location::Head, 9, 0)
            .with_equipment("AC/20", Location::RightTorso)
            .with_ammo("AC/20 Ammo", Location::LeftTorso, 2.0);

        assert_eq!(unit.display_name(), "Hunchback HBK-4G");
        assert_eq!(unit.total_armor_points(), 40);
        assert_eq!(unit.equipment.len(), 2);
        assert_eq!(unit.equipment[1].tons, Some(2.0));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "chassis": "Locust",
            "model": "LCT-1V",
            "tonnage": 20,
            "walk_mp": 8,
            "engine": "standard",
            "heat_sinks": { "kind": "single", "count": 10 },
            "armor": {
                "head": { "front": 8 },
                "center_torso": { "front": 10, "rear": 2 }
            },
            "equipment": [
                { "id": "Medium Laser", "location": "center_torso" },
                { "id": "Machine Gun Ammo", "location": "center_torso", "tons": 1.0 }
            ],
            "critical_slots": {
                "head": ["Life Support", "Sensors", "Cockpit"]
            }
        }"#;

        let unit = UnitConstruction::from_json_str(json).unwrap();
        assert_eq!(unit.tonnage, 20);
        assert_eq!(unit.topology, Topology::Biped);
        assert_eq!(unit.armor[&Location::CenterTorso].rear, 2);
        assert_eq!(unit.equipment[0].facing, Facing::Front);
        assert_eq!(unit.critical_slots[&Location::Head].len(), 3);
        assert!(unit.gyro.is_none());
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            UnitConstruction::from_json_str("{ \"chassis\": 5 }"),
            Err(ConfigError::JsonError(_))
        ));
    }
}
