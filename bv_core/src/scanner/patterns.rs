//! Slot-name patterns, most specific first

use crate::types::{ArmorType, CockpitType, EngineType, GyroType, HeatSinkKind, JumpType, StructureType};

/// What a critical-slot entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Engine,
    Gyro(GyroType),
    Cockpit(CockpitType),
    Structure(StructureType),
    Armor(ArmorType),
    HeatSink(HeatSinkKind),
    Case,
    CaseII,
    Tsm,
    Masc,
    Supercharger,
    Aes,
    DroneOs,
    TargetingComputer,
    AdvancedFireControl,
    JumpJet(JumpType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    /// Pattern appears anywhere in the compact name
    Contains,
    /// Compact name equals the pattern
    Exact,
}

use Match::{Contains, Exact};

/// Ordered so that longer names shadow their substrings
/// (caseii before case, doubleheatsink before heatsink, xlgyro before gyro)
const PATTERNS: &[(&str, Match, SlotKind)] = &[
    ("heavydutygyro", Contains, SlotKind::Gyro(GyroType::HeavyDuty)),
    ("superheavygyro", Contains, SlotKind::Gyro(GyroType::Superheavy)),
    ("compactgyro", Contains, SlotKind::Gyro(GyroType::Compact)),
    ("xlgyro", Contains, SlotKind::Gyro(GyroType::Xl)),
    ("gyro", Contains, SlotKind::Gyro(GyroType::Standard)),
    ("smallcommandconsole", Contains, SlotKind::Cockpit(CockpitType::SmallCommandConsole)),
    ("commandconsole", Contains, SlotKind::Cockpit(CockpitType::CommandConsole)),
    ("smallcockpit", Contains, SlotKind::Cockpit(CockpitType::Small)),
    ("torsomountedcockpit", Contains, SlotKind::Cockpit(CockpitType::TorsoMounted)),
    ("primitiveindustrialcockpit", Contains, SlotKind::Cockpit(CockpitType::PrimitiveIndustrial)),
    ("industrialcockpit", Contains, SlotKind::Cockpit(CockpitType::Industrial)),
    ("primitivecockpit", Contains, SlotKind::Cockpit(CockpitType::Primitive)),
    ("interfacecockpit", Contains, SlotKind::Cockpit(CockpitType::Interface)),
    ("cockpit", Contains, SlotKind::Cockpit(CockpitType::Standard)),
    ("engine", Contains, SlotKind::Engine),
    ("endocomposite", Contains, SlotKind::Structure(StructureType::EndoComposite)),
    ("endosteel", Contains, SlotKind::Structure(StructureType::EndoSteel)),
    ("reinforcedstructure", Contains, SlotKind::Structure(StructureType::Reinforced)),
    ("compositestructure", Contains, SlotKind::Structure(StructureType::Composite)),
    ("lightferrofibrous", Contains, SlotKind::Armor(ArmorType::LightFerroFibrous)),
    ("heavyferrofibrous", Contains, SlotKind::Armor(ArmorType::HeavyFerroFibrous)),
    ("ferrolamellor", Contains, SlotKind::Armor(ArmorType::FerroLamellor)),
    ("ferrofibrous", Contains, SlotKind::Armor(ArmorType::FerroFibrous)),
    ("stealth", Contains, SlotKind::Armor(ArmorType::Stealth)),
    ("reactivearmor", Contains, SlotKind::Armor(ArmorType::Reactive)),
    ("reflectivearmor", Contains, SlotKind::Armor(ArmorType::Reflective)),
    ("laserreflective", Contains, SlotKind::Armor(ArmorType::Reflective)),
    ("laserheatsink", Contains, SlotKind::HeatSink(HeatSinkKind::Laser)),
    ("compactheatsink", Contains, SlotKind::HeatSink(HeatSinkKind::Compact)),
    ("doubleheatsink", Contains, SlotKind::HeatSink(HeatSinkKind::Double)),
    ("heatsink", Contains, SlotKind::HeatSink(HeatSinkKind::Single)),
    ("caseii", Exact, SlotKind::CaseII),
    ("case", Exact, SlotKind::Case),
    ("triplestrengthmyomer", Contains, SlotKind::Tsm),
    ("tsm", Exact, SlotKind::Tsm),
    ("masc", Exact, SlotKind::Masc),
    ("supercharger", Contains, SlotKind::Supercharger),
    ("actuatorenhancementsystem", Contains, SlotKind::Aes),
    ("armaes", Contains, SlotKind::Aes),
    ("aes", Exact, SlotKind::Aes),
    ("droneoperatingsystem", Contains, SlotKind::DroneOs),
    ("targetingcomputer", Contains, SlotKind::TargetingComputer),
    ("advancedfirecontrol", Contains, SlotKind::AdvancedFireControl),
    ("mechanicaljumpbooster", Contains, SlotKind::JumpJet(JumpType::Mechanical)),
    ("improvedjumpjet", Contains, SlotKind::JumpJet(JumpType::Improved)),
    ("jumpjet", Contains, SlotKind::JumpJet(JumpType::Standard)),
];

/// Classify a compact (lowercase alphanumeric, tech-stripped) slot name
pub fn classify(compact: &str) -> Option<SlotKind> {
    PATTERNS.iter().find_map(|(pattern, mode, kind)| {
        let hit = match mode {
            Contains => compact.contains(pattern),
            Exact => compact == *pattern,
        };
        hit.then_some(*kind)
    })
}

/// Engine type named explicitly by an engine slot, if any
pub fn engine_marker(compact: &str, clan: bool) -> Option<EngineType> {
    if compact.contains("xxl") {
        Some(if clan { EngineType::XxlClan } else { EngineType::XxlInnerSphere })
    } else if compact.contains("xl") {
        Some(if clan { EngineType::XlClan } else { EngineType::XlInnerSphere })
    } else if compact.contains("light") {
        Some(EngineType::Light)
    } else if compact.contains("compact") {
        Some(EngineType::Compact)
    } else if compact.contains("ice") || compact.contains("combustion") {
        Some(EngineType::Ice)
    } else if compact.contains("fuelcell") {
        Some(EngineType::FuelCell)
    } else if compact.contains("fission") {
        Some(EngineType::Fission)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_names_win() {
        assert_eq!(classify("caseii"), Some(SlotKind::CaseII));
        assert_eq!(classify("case"), Some(SlotKind::Case));
        assert_eq!(classify("doubleheatsink"), Some(SlotKind::HeatSink(HeatSinkKind::Double)));
        assert_eq!(classify("heatsink"), Some(SlotKind::HeatSink(HeatSinkKind::Single)));
        assert_eq!(classify("heavydutygyro"), Some(SlotKind::Gyro(GyroType::HeavyDuty)));
        assert_eq!(classify("improvedjumpjet"), Some(SlotKind::JumpJet(JumpType::Improved)));
        assert_eq!(classify("smallcockpit"), Some(SlotKind::Cockpit(CockpitType::Small)));
    }

    #[test]
    fn test_exact_patterns_do_not_match_inside_names() {
        assert_eq!(classify("briefcase"), None);
        assert_eq!(classify("mediumlaser"), None);
        assert_eq!(classify("lowerarmactuator"), None);
    }

    #[test]
    fn test_engine_markers() {
        assert_eq!(engine_marker("xlengine", false), Some(EngineType::XlInnerSphere));
        assert_eq!(engine_marker("xxlengine", true), Some(EngineType::XxlClan));
        assert_eq!(engine_marker("fusionengine", false), None);
        assert_eq!(engine_marker("lightengine", false), Some(EngineType::Light));
    }
}
