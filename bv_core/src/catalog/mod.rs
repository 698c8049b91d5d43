//! Equipment catalog - the single source of per-item BV facts

use crate::types::{HeatSinkKind, TechBase};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How an item participates in the BV calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentRole {
    /// Offensive weapon subject to heat ordering
    Weapon,
    /// Anti-missile and similar weapons counted defensively
    PointDefense,
    /// Flat defensive BV (ECM, probes, shields, pods, modular armor)
    Defensive,
    /// Flat offensive BV outside heat ordering
    Offensive,
    Ammo,
    /// No BV of its own; affects other items or unit systems
    System,
}

/// Explosive penalty category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplosiveCategory {
    #[default]
    None,
    Standard,
    Reduced,
    Gauss,
    Hvac,
}

/// Firing behaviour that changes the heat counted for BV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireMode {
    #[default]
    Standard,
    Ultra,
    Rotary,
    Streak,
    OneShot,
}

/// Behavioural tags carried by catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentTrait {
    DirectFire,
    CapacitorCompatible,
    GuidanceCompatible,
    Capacitor,
    Guidance,
    WeaponArray,
    ActiveShield,
    PassiveShield,
    Case,
    #[serde(rename = "case_ii")]
    CaseII,
    Tsm,
    Masc,
    Supercharger,
    Aes,
    DroneOs,
    TargetingComputer,
    AdvancedFireControl,
    JumpJet,
    ImprovedJumpJet,
    Stealth,
}

/// Catalog record for one canonical equipment identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tech_base: TechBase,
    pub role: EquipmentRole,
    /// Base BV (per ton for ammunition)
    #[serde(default)]
    pub bv: f64,
    #[serde(default)]
    pub heat: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_slots")]
    pub slots: u32,
    #[serde(default)]
    pub explosive: ExplosiveCategory,
    #[serde(default)]
    pub fire_mode: FireMode,
    #[serde(default)]
    pub traits: Vec<EquipmentTrait>,
    /// Weapon family shared with its ammunition and weapon arrays
    #[serde(default)]
    pub family: Option<String>,
    /// Family of the weapon this ammunition feeds
    #[serde(default)]
    pub ammo_for: Option<String>,
    /// BV multiplier applied to linked weapons (guidance systems)
    #[serde(default)]
    pub modifier: Option<f64>,
    /// Number of weapons a weapon array links
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub heat_sink: Option<HeatSinkKind>,
}

fn default_slots() -> u32 {
    1
}

impl CatalogEntry {
    pub fn has_trait(&self, t: EquipmentTrait) -> bool {
        self.traits.contains(&t)
    }

    /// Family shared with ammunition; a weapon without one is its own family
    pub fn family_key(&self) -> &str {
        self.family.as_deref().unwrap_or(&self.id)
    }
}

/// Immutable lookup from canonical identifier to catalog record
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl EquipmentCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        EquipmentCatalog {
            entries: HashMap::new(),
        }
    }

    /// Build a catalog from entries; later duplicates replace earlier ones
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.register(entry);
        }
        catalog
    }

    /// Register an entry under its canonical id
    pub fn register(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Get an entry by canonical id
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Critical slots one heat sink of `kind` occupies outside the engine
    pub fn heat_sink_slots(&self, kind: HeatSinkKind) -> Option<u32> {
        self.entries
            .values()
            .filter(|e| e.heat_sink == Some(kind))
            .map(|e| e.slots)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, role: EquipmentRole) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            tech_base: TechBase::InnerSphere,
            role,
            bv: 10.0,
            heat: 1.0,
            weight: 1.0,
            slots: 1,
            explosive: ExplosiveCategory::None,
            fire_mode: FireMode::Standard,
            traits: vec![EquipmentTrait::DirectFire],
            family: None,
            ammo_for: None,
            modifier: None,
            capacity: None,
            heat_sink: None,
        }
    }

    #[test]
    fn test_register_and_get() {
        let catalog = EquipmentCatalog::from_entries(vec![
            entry("medium-laser", EquipmentRole::Weapon),
            entry("ams", EquipmentRole::PointDefense),
        ]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("ams"));
        assert!(catalog.get("medium-laser").unwrap().has_trait(EquipmentTrait::DirectFire));
        assert!(catalog.get("large-laser").is_none());
    }

    #[test]
    fn test_parse_entry_defaults() {
        let toml = r#"
id = "ecm"
name = "Guardian ECM Suite"
role = "defensive"
bv = 61
"#;
        let parsed: CatalogEntry = toml::from_str(toml).unwrap();
        assert_eq!(parsed.slots, 1);
        assert_eq!(parsed.explosive, ExplosiveCategory::None);
        assert_eq!(parsed.fire_mode, FireMode::Standard);
        assert!(parsed.traits.is_empty());
    }

    #[test]
    fn test_trait_names() {
        let toml = r#"
id = "case-ii"
name = "CASE II"
role = "system"
traits = ["case_ii", "drone_os", "aes"]
"#;
        let parsed: CatalogEntry = toml::from_str(toml).unwrap();
        assert_eq!(
            parsed.traits,
            vec![EquipmentTrait::CaseII, EquipmentTrait::DroneOs, EquipmentTrait::Aes]
        );
        let written = toml::to_string(&parsed).unwrap();
        assert!(written.contains("\"case_ii\""));
    }

    #[test]
    fn test_heat_sink_slots() {
        let mut double = entry("double-heat-sink", EquipmentRole::System);
        double.slots = 3;
        double.heat_sink = Some(HeatSinkKind::Double);
        let catalog = EquipmentCatalog::from_entries(vec![double]);
        assert_eq!(catalog.heat_sink_slots(HeatSinkKind::Double), Some(3));
        assert_eq!(catalog.heat_sink_slots(HeatSinkKind::Laser), None);
    }
}
