//! Core construction types: locations, topology, and component type tables

use serde::{Deserialize, Serialize};

/// Mech body location
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Head,
    CenterTorso,
    LeftTorso,
    RightTorso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    // Quad chassis
    FrontLeftLeg,
    FrontRightLeg,
    RearLeftLeg,
    RearRightLeg,
}

impl Location {
    /// Get all biped locations
    pub fn biped() -> &'static [Location] {
        &[
            Location::Head,
            Location::CenterTorso,
            Location::LeftTorso,
            Location::RightTorso,
            Location::LeftArm,
            Location::RightArm,
            Location::LeftLeg,
            Location::RightLeg,
        ]
    }

    /// Get all quad locations
    pub fn quad() -> &'static [Location] {
        &[
            Location::Head,
            Location::CenterTorso,
            Location::LeftTorso,
            Location::RightTorso,
            Location::FrontLeftLeg,
            Location::FrontRightLeg,
            Location::RearLeftLeg,
            Location::RearRightLeg,
        ]
    }

    pub fn is_leg(self) -> bool {
        matches!(
            self,
            Location::LeftLeg
                | Location::RightLeg
                | Location::FrontLeftLeg
                | Location::FrontRightLeg
                | Location::RearLeftLeg
                | Location::RearRightLeg
        )
    }

    pub fn is_arm(self) -> bool {
        matches!(self, Location::LeftArm | Location::RightArm)
    }

    pub fn is_side_torso(self) -> bool {
        matches!(self, Location::LeftTorso | Location::RightTorso)
    }

    /// Number of critical slots the location provides
    pub fn slot_capacity(self) -> u32 {
        if self == Location::Head || self.is_leg() {
            6
        } else {
            12
        }
    }

    /// Location that receives damage transferred out of this one
    pub fn transfers_to(self) -> Option<Location> {
        match self {
            Location::LeftArm | Location::FrontLeftLeg | Location::LeftLeg | Location::RearLeftLeg => {
                Some(Location::LeftTorso)
            }
            Location::RightArm
            | Location::FrontRightLeg
            | Location::RightLeg
            | Location::RearRightLeg => Some(Location::RightTorso),
            Location::LeftTorso | Location::RightTorso => Some(Location::CenterTorso),
            Location::Head | Location::CenterTorso => None,
        }
    }

    /// Parse a location label in any of the common spellings
    /// ("LA", "Left Arm", "left_arm", "FLL")
    pub fn from_label(label: &str) -> Option<Location> {
        let compact: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let location = match compact.as_str() {
            "hd" | "h" | "head" => Location::Head,
            "ct" | "centertorso" => Location::CenterTorso,
            "lt" | "lefttorso" => Location::LeftTorso,
            "rt" | "righttorso" => Location::RightTorso,
            "la" | "leftarm" => Location::LeftArm,
            "ra" | "rightarm" => Location::RightArm,
            "ll" | "leftleg" => Location::LeftLeg,
            "rl" | "rightleg" => Location::RightLeg,
            "fll" | "frontleftleg" => Location::FrontLeftLeg,
            "frl" | "frontrightleg" => Location::FrontRightLeg,
            "rll" | "rearleftleg" => Location::RearLeftLeg,
            "rrl" | "rearrightleg" => Location::RearRightLeg,
            _ => return None,
        };
        Some(location)
    }
}

/// Chassis topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    Biped,
    Quad,
    Tripod,
    Lam,
    QuadVee,
}

impl Topology {
    /// Whether the engine computes BV for this topology
    pub fn is_supported(self) -> bool {
        matches!(self, Topology::Biped | Topology::Quad)
    }

    pub fn locations(self) -> &'static [Location] {
        match self {
            Topology::Quad | Topology::QuadVee => Location::quad(),
            _ => Location::biped(),
        }
    }
}

/// Technology base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechBase {
    #[default]
    InnerSphere,
    Clan,
    Mixed,
}

impl TechBase {
    pub fn from_label(label: &str) -> TechBase {
        let upper = label.trim().to_ascii_uppercase();
        if upper.starts_with("MIXED") || upper == "BOTH" || upper == "2" {
            TechBase::Mixed
        } else if upper.starts_with("CLAN") || upper == "CL" || upper == "1" {
            TechBase::Clan
        } else {
            TechBase::InnerSphere
        }
    }
}

/// Mounting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    Front,
    Rear,
}

/// Engine type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    #[default]
    Standard,
    Ice,
    FuelCell,
    Fission,
    Compact,
    Light,
    XlInnerSphere,
    XlClan,
    XxlInnerSphere,
    XxlClan,
}

impl EngineType {
    /// Structure BV multiplier for engine survivability
    pub fn structure_multiplier(self) -> f64 {
        match self {
            EngineType::Standard
            | EngineType::Ice
            | EngineType::FuelCell
            | EngineType::Fission
            | EngineType::Compact => 1.0,
            EngineType::XlInnerSphere => 0.5,
            EngineType::XlClan => 0.75,
            EngineType::Light => 0.75,
            EngineType::XxlInnerSphere => 0.25,
            EngineType::XxlClan => 0.5,
        }
    }

    /// Heat generated by running
    pub fn running_heat(self) -> f64 {
        match self {
            EngineType::Ice | EngineType::FuelCell => 0.0,
            EngineType::XxlInnerSphere | EngineType::XxlClan => 6.0,
            _ => 2.0,
        }
    }

    pub fn doubles_jump_heat(self) -> bool {
        matches!(self, EngineType::XxlInnerSphere | EngineType::XxlClan)
    }

    /// Engine critical slots occupied in each side torso
    pub fn side_torso_slots(self) -> u32 {
        match self {
            EngineType::Light | EngineType::XlClan => 2,
            EngineType::XlInnerSphere => 3,
            EngineType::XxlClan => 4,
            EngineType::XxlInnerSphere => 6,
            _ => 0,
        }
    }

    pub fn is_clan(self) -> bool {
        matches!(self, EngineType::XlClan | EngineType::XxlClan)
    }

    /// Map an engine label to a type; falls back to keyword matching
    pub fn from_label(label: &str) -> EngineType {
        let upper = label.trim().to_ascii_uppercase();
        let clan = upper.contains("CLAN") || upper.starts_with("CL ");
        if upper.contains("XXL") {
            if clan {
                EngineType::XxlClan
            } else {
                EngineType::XxlInnerSphere
            }
        } else if upper.contains("XL") || upper.contains("EXTRA-LIGHT") || upper.contains("EXTRA LIGHT") {
            if clan {
                EngineType::XlClan
            } else {
                EngineType::XlInnerSphere
            }
        } else if upper.contains("LIGHT") {
            EngineType::Light
        } else if upper.contains("COMPACT") {
            EngineType::Compact
        } else if upper.contains("ICE") || upper.contains("COMBUSTION") {
            EngineType::Ice
        } else if upper.contains("FUEL") || upper.contains("CELL") {
            EngineType::FuelCell
        } else if upper.contains("FISSION") {
            EngineType::Fission
        } else {
            EngineType::Standard
        }
    }
}

/// Gyro type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GyroType {
    #[default]
    Standard,
    Xl,
    Compact,
    HeavyDuty,
    Superheavy,
    None,
}

impl GyroType {
    /// BV per ton of unit weight
    pub fn bv_multiplier(self) -> f64 {
        match self {
            GyroType::HeavyDuty => 1.0,
            _ => 0.5,
        }
    }

    pub fn from_label(label: &str) -> GyroType {
        let upper = label.trim().to_ascii_uppercase();
        if upper == "NONE" {
            GyroType::None
        } else if upper.contains("SUPERHEAVY") || upper.contains("SUPER HEAVY") {
            GyroType::Superheavy
        } else if upper.contains("XL") || upper.contains("EXTRA") {
            GyroType::Xl
        } else if upper.contains("COMPACT") {
            GyroType::Compact
        } else if upper.contains("HEAVY") {
            GyroType::HeavyDuty
        } else {
            GyroType::Standard
        }
    }
}

/// Cockpit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CockpitType {
    #[default]
    Standard,
    Small,
    CommandConsole,
    SmallCommandConsole,
    TorsoMounted,
    Primitive,
    Industrial,
    PrimitiveIndustrial,
    SuperheavyIndustrial,
    Superheavy,
    Interface,
    QuadVee,
}

impl CockpitType {
    /// Cockpits whose reduced capability discounts the whole unit
    pub fn is_reduced_capability(self) -> bool {
        matches!(
            self,
            CockpitType::Small | CockpitType::SmallCommandConsole | CockpitType::TorsoMounted
        )
    }

    /// Industrial cockpits lack advanced fire control unless it is fitted separately
    pub fn is_industrial(self) -> bool {
        matches!(
            self,
            CockpitType::Industrial
                | CockpitType::PrimitiveIndustrial
                | CockpitType::SuperheavyIndustrial
        )
    }

    pub fn from_label(label: &str) -> CockpitType {
        let upper = label.trim().to_ascii_uppercase();
        if upper.contains("INDUSTRIAL") {
            if upper.contains("PRIMITIVE") {
                CockpitType::PrimitiveIndustrial
            } else if upper.contains("SUPERHEAVY") {
                CockpitType::SuperheavyIndustrial
            } else {
                CockpitType::Industrial
            }
        } else if upper.contains("COMMAND CONSOLE") {
            if upper.contains("SMALL") {
                CockpitType::SmallCommandConsole
            } else {
                CockpitType::CommandConsole
            }
        } else if upper.contains("SMALL") {
            CockpitType::Small
        } else if upper.contains("TORSO") {
            CockpitType::TorsoMounted
        } else if upper.contains("PRIMITIVE") {
            CockpitType::Primitive
        } else if upper.contains("SUPERHEAVY") {
            CockpitType::Superheavy
        } else if upper.contains("INTERFACE") {
            CockpitType::Interface
        } else if upper.contains("QUADVEE") {
            CockpitType::QuadVee
        } else {
            CockpitType::Standard
        }
    }
}

/// Internal structure type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    #[default]
    Standard,
    EndoSteel,
    EndoComposite,
    Composite,
    Industrial,
    Reinforced,
}

impl StructureType {
    pub fn bv_multiplier(self) -> f64 {
        match self {
            StructureType::Standard | StructureType::EndoSteel | StructureType::EndoComposite => 1.0,
            StructureType::Composite | StructureType::Industrial => 0.5,
            StructureType::Reinforced => 2.0,
        }
    }

    pub fn from_label(label: &str) -> StructureType {
        let upper = label.trim().to_ascii_uppercase();
        if upper.contains("ENDO") && upper.contains("COMPOSITE") {
            StructureType::EndoComposite
        } else if upper.contains("ENDO") {
            StructureType::EndoSteel
        } else if upper.contains("REINFORCED") {
            StructureType::Reinforced
        } else if upper.contains("COMPOSITE") {
            StructureType::Composite
        } else if upper.contains("INDUSTRIAL") {
            StructureType::Industrial
        } else {
            StructureType::Standard
        }
    }
}

/// Armor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    #[default]
    Standard,
    FerroFibrous,
    LightFerroFibrous,
    HeavyFerroFibrous,
    Stealth,
    Ablative,
    Hardened,
    Reactive,
    Reflective,
    BallisticReinforced,
    FerroLamellor,
    Primitive,
    Industrial,
    HeavyIndustrial,
    Commercial,
}

impl ArmorType {
    pub fn bv_multiplier(self) -> f64 {
        match self {
            ArmorType::Hardened => 2.0,
            ArmorType::Reactive | ArmorType::Reflective | ArmorType::BallisticReinforced => 1.5,
            ArmorType::FerroLamellor => 1.2,
            ArmorType::Commercial => 0.5,
            _ => 1.0,
        }
    }

    pub fn from_label(label: &str) -> ArmorType {
        let upper = label.trim().to_ascii_uppercase();
        if upper.contains("STEALTH") {
            ArmorType::Stealth
        } else if upper.contains("REACTIVE") {
            ArmorType::Reactive
        } else if upper.contains("REFLECTIVE") {
            ArmorType::Reflective
        } else if upper.contains("HARDENED") {
            ArmorType::Hardened
        } else if upper.contains("BALLISTIC") {
            ArmorType::BallisticReinforced
        } else if upper.contains("LAMELLOR") {
            ArmorType::FerroLamellor
        } else if upper.contains("ABLATIVE") {
            ArmorType::Ablative
        } else if upper.contains("HEAVY") && upper.contains("FERRO") {
            ArmorType::HeavyFerroFibrous
        } else if upper.contains("LIGHT") && upper.contains("FERRO") {
            ArmorType::LightFerroFibrous
        } else if upper.contains("FERRO") {
            ArmorType::FerroFibrous
        } else if upper.contains("PRIMITIVE") {
            ArmorType::Primitive
        } else if upper.contains("COMMERCIAL") {
            ArmorType::Commercial
        } else if upper.contains("HEAVY") && upper.contains("INDUSTRIAL") {
            ArmorType::HeavyIndustrial
        } else if upper.contains("INDUSTRIAL") {
            ArmorType::Industrial
        } else {
            ArmorType::Standard
        }
    }
}

/// Heat sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatSinkKind {
    #[default]
    Single,
    Double,
    DoubleClan,
    Laser,
    Compact,
}

impl HeatSinkKind {
    /// Heat dissipated per sink
    pub fn dissipation(self) -> f64 {
        match self {
            HeatSinkKind::Single | HeatSinkKind::Compact => 1.0,
            HeatSinkKind::Double | HeatSinkKind::DoubleClan | HeatSinkKind::Laser => 2.0,
        }
    }
}

/// Jump system type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpType {
    #[default]
    Standard,
    Improved,
    Mechanical,
}

impl JumpType {
    /// Heat generated by a jump of `jump_mp` hexes
    pub fn jump_heat(self, jump_mp: u32) -> f64 {
        if jump_mp == 0 {
            return 0.0;
        }
        match self {
            JumpType::Standard => jump_mp.max(3) as f64,
            JumpType::Improved => jump_mp.div_ceil(2).max(3) as f64,
            JumpType::Mechanical => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_labels() {
        assert_eq!(EngineType::from_label("XL Engine (Clan)"), EngineType::XlClan);
        assert_eq!(EngineType::from_label("XL Fusion Engine"), EngineType::XlInnerSphere);
        assert_eq!(EngineType::from_label("XXL Engine(IS)"), EngineType::XxlInnerSphere);
        assert_eq!(EngineType::from_label("Light Fusion Engine"), EngineType::Light);
        assert_eq!(EngineType::from_label("Internal Combustion Engine"), EngineType::Ice);
        assert_eq!(EngineType::from_label("Fusion Engine"), EngineType::Standard);
    }

    #[test]
    fn test_engine_multipliers() {
        assert!((EngineType::Standard.structure_multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((EngineType::XlInnerSphere.structure_multiplier() - 0.5).abs() < f64::EPSILON);
        assert!((EngineType::XlClan.structure_multiplier() - 0.75).abs() < f64::EPSILON);
        assert!((EngineType::XxlInnerSphere.structure_multiplier() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jump_heat() {
        assert!((JumpType::Standard.jump_heat(2) - 3.0).abs() < f64::EPSILON);
        assert!((JumpType::Standard.jump_heat(5) - 5.0).abs() < f64::EPSILON);
        assert!((JumpType::Improved.jump_heat(5) - 3.0).abs() < f64::EPSILON);
        assert!((JumpType::Improved.jump_heat(8) - 4.0).abs() < f64::EPSILON);
        assert!((JumpType::Standard.jump_heat(0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_location_labels() {
        assert_eq!(Location::from_label("LA"), Some(Location::LeftArm));
        assert_eq!(Location::from_label("Right Torso"), Some(Location::RightTorso));
        assert_eq!(Location::from_label("front_left_leg"), Some(Location::FrontLeftLeg));
        assert_eq!(Location::from_label("tail"), None);
    }

    #[test]
    fn test_armor_labels() {
        assert_eq!(ArmorType::from_label("Ferro-Fibrous(Clan)"), ArmorType::FerroFibrous);
        assert_eq!(ArmorType::from_label("Heavy Ferro-Fibrous"), ArmorType::HeavyFerroFibrous);
        assert_eq!(ArmorType::from_label("Laser-Reflective"), ArmorType::Reflective);
        assert!((ArmorType::Hardened.bv_multiplier() - 2.0).abs() < f64::EPSILON);
    }
}
