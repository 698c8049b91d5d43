//! Equipment resolver - maps raw identifiers to catalog entries
//!
//! Resolution runs a fixed chain of stages; the first stage to resolve wins:
//! 1. Override table (verified corrections for known-wrong generic mappings)
//! 2. Alias table
//! 3. Normalization followed by catalog lookup
//! 4. Generated name-mapping table
//! 5. Fallback table (borrows another entry's BV, may replace heat)
//!
//! A failed resolution is reported, never valued at zero.

mod normalize;

pub use normalize::{normalize, sorted_key, table_key, tech_marker, NormalizedName};

use crate::catalog::{CatalogEntry, EquipmentCatalog, EquipmentRole, ExplosiveCategory};
use crate::config::DataTables;
use crate::types::TechBase;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which resolution stage produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStage {
    Override,
    Alias,
    Normalized,
    NameMapping,
    Fallback,
    /// Canonical id supplied by the crit scanner
    Inferred,
}

/// A raw identifier resolved against the catalog
#[derive(Debug, Clone)]
pub struct ResolvedEquipment {
    /// Catalog record; heat already replaced for fallbacks
    pub entry: CatalogEntry,
    pub stage: ResolutionStage,
}

impl ResolvedEquipment {
    pub fn id(&self) -> &str {
        &self.entry.id
    }

    pub fn bv(&self) -> f64 {
        self.entry.bv
    }

    pub fn heat(&self) -> f64 {
        self.entry.heat
    }

    pub fn slots(&self) -> u32 {
        self.entry.slots
    }

    pub fn explosive(&self) -> ExplosiveCategory {
        self.entry.explosive
    }

    pub fn role(&self) -> EquipmentRole {
        self.entry.role
    }
}

/// Override or fallback applied during one calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub identifier: String,
    pub id: String,
    pub stage: ResolutionStage,
}

/// Overrides and fallbacks used by a calculation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub overrides: Vec<ResolutionRecord>,
    pub fallbacks: Vec<ResolutionRecord>,
}

impl ResolutionReport {
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.fallbacks.is_empty()
    }
}

/// Outcome of a single resolution stage
enum StageOutcome {
    Resolved(ResolvedEquipment),
    Pass,
}

type Stage<'a> = fn(&EquipmentResolver<'a>, &str) -> StageOutcome;

/// Per-calculation resolver; its cache lives only as long as one calculation
pub struct EquipmentResolver<'a> {
    catalog: &'a EquipmentCatalog,
    tables: &'a DataTables,
    unit_tech: TechBase,
    cache: HashMap<String, Option<ResolvedEquipment>>,
}

impl<'a> EquipmentResolver<'a> {
    pub fn new(catalog: &'a EquipmentCatalog, tables: &'a DataTables, unit_tech: TechBase) -> Self {
        EquipmentResolver {
            catalog,
            tables,
            unit_tech,
            cache: HashMap::new(),
        }
    }

    /// Resolve a raw identifier, caching the outcome for this calculation
    pub fn resolve(&mut self, raw: &str) -> Option<ResolvedEquipment> {
        if let Some(cached) = self.cache.get(raw) {
            return cached.clone();
        }
        let resolved = self.run_stages(raw);
        match &resolved {
            Some(r) => tracing::debug!("resolved '{}' -> {} ({:?})", raw, r.id(), r.stage),
            None => tracing::debug!("could not resolve '{}'", raw),
        }
        self.cache.insert(raw.to_string(), resolved.clone());
        resolved
    }

    /// Resolve a canonical id directly, as used for scanner-inferred items
    pub fn resolve_canonical(&self, id: &str) -> Option<ResolvedEquipment> {
        self.catalog.get(id).map(|entry| ResolvedEquipment {
            entry: entry.clone(),
            stage: ResolutionStage::Inferred,
        })
    }

    /// Overrides and fallbacks applied so far, sorted by identifier
    pub fn report(&self) -> ResolutionReport {
        let mut report = ResolutionReport::default();
        for (identifier, resolved) in &self.cache {
            let Some(resolved) = resolved else { continue };
            let record = ResolutionRecord {
                identifier: identifier.clone(),
                id: resolved.id().to_string(),
                stage: resolved.stage,
            };
            match resolved.stage {
                ResolutionStage::Override => report.overrides.push(record),
                ResolutionStage::Fallback => report.fallbacks.push(record),
                _ => {}
            }
        }
        report.overrides.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        report.fallbacks.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        report
    }

    fn run_stages(&self, raw: &str) -> Option<ResolvedEquipment> {
        let stages: [Stage<'a>; 5] = [
            Self::by_override,
            Self::by_alias,
            Self::by_normalization,
            Self::by_name_mapping,
            Self::by_fallback,
        ];
        stages.iter().find_map(|stage| match stage(self, raw) {
            StageOutcome::Resolved(resolved) => Some(resolved),
            StageOutcome::Pass => None,
        })
    }

    fn by_override(&self, raw: &str) -> StageOutcome {
        self.table_target(self.tables.overrides.get(&table_key(raw)), ResolutionStage::Override)
    }

    fn by_alias(&self, raw: &str) -> StageOutcome {
        self.table_target(self.tables.aliases.get(&table_key(raw)), ResolutionStage::Alias)
    }

    fn by_normalization(&self, raw: &str) -> StageOutcome {
        let normalized = normalize(raw);
        if normalized.key.is_empty() {
            return StageOutcome::Pass;
        }
        let tech = normalized.tech.unwrap_or(self.unit_tech);
        let clan_key = format!("clan-{}", normalized.key);
        let candidates = if tech == TechBase::Clan {
            [clan_key.as_str(), normalized.key.as_str()]
        } else {
            [normalized.key.as_str(), clan_key.as_str()]
        };

        for candidate in candidates {
            if let Some(entry) = self.catalog.get(candidate) {
                return self.found(entry, ResolutionStage::Normalized);
            }
        }
        // Normalized spellings of aliased names
        self.table_target(
            self.tables.aliases.get(&table_key(&normalized.key)),
            ResolutionStage::Alias,
        )
    }

    fn by_name_mapping(&self, raw: &str) -> StageOutcome {
        self.table_target(
            self.tables.name_mappings.get(&table_key(raw)),
            ResolutionStage::NameMapping,
        )
    }

    fn by_fallback(&self, raw: &str) -> StageOutcome {
        let fallback = self
            .tables
            .fallbacks
            .get(&table_key(raw))
            .or_else(|| self.tables.fallbacks.get(&table_key(&normalize(raw).key)));
        let Some(fallback) = fallback else {
            return StageOutcome::Pass;
        };
        let Some(base) = self.catalog.get(&fallback.base) else {
            tracing::warn!("fallback for '{}' names unknown entry '{}'", raw, fallback.base);
            return StageOutcome::Pass;
        };
        let mut entry = base.clone();
        if let Some(heat) = fallback.heat {
            entry.heat = heat;
        }
        StageOutcome::Resolved(ResolvedEquipment {
            entry,
            stage: ResolutionStage::Fallback,
        })
    }

    fn table_target(&self, target: Option<&String>, stage: ResolutionStage) -> StageOutcome {
        let Some(target) = target else {
            return StageOutcome::Pass;
        };
        match self.catalog.get(target) {
            Some(entry) => self.found(entry, stage),
            None => {
                tracing::warn!("{:?} table points at unknown catalog id '{}'", stage, target);
                StageOutcome::Pass
            }
        }
    }

    fn found(&self, entry: &CatalogEntry, stage: ResolutionStage) -> StageOutcome {
        StageOutcome::Resolved(ResolvedEquipment {
            entry: entry.clone(),
            stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_catalog, parse_tables};

    fn fixtures() -> (EquipmentCatalog, DataTables) {
        let catalog = parse_catalog(
            r#"
[[equipment]]
id = "srm-6"
name = "SRM 6"
role = "weapon"
bv = 59
heat = 4

[[equipment]]
id = "srm-6-os"
name = "SRM 6 (OS)"
role = "weapon"
bv = 12
heat = 4
fire_mode = "one_shot"

[[equipment]]
id = "er-medium-laser"
name = "ER Medium Laser"
role = "weapon"
bv = 62
heat = 5

[[equipment]]
id = "clan-er-medium-laser"
name = "ER Medium Laser (Clan)"
tech_base = "clan"
role = "weapon"
bv = 108
heat = 5

[[equipment]]
id = "ams"
name = "Anti-Missile System"
role = "point_defense"
bv = 32
heat = 1

[[equipment]]
id = "er-ppc"
name = "ER PPC"
role = "weapon"
bv = 229
heat = 15
slots = 3
"#,
        )
        .unwrap();

        let tables = parse_tables(
            r#"
[overrides]
"SRM 6 (OS)" = "srm-6-os"

[aliases]
"Anti-Missile System" = "ams"

[name_mappings]
ISERPPC = "er-ppc"

[fallbacks."Prototype ER Medium Laser"]
base = "er-medium-laser"
heat = 7
"#,
        )
        .unwrap();

        (catalog, tables)
    }

    #[test]
    fn test_override_beats_normalization() {
        let (catalog, tables) = fixtures();
        let mut resolver = EquipmentResolver::new(&catalog, &tables, TechBase::InnerSphere);

        let os = resolver.resolve("SRM 6 (OS)").unwrap();
        assert_eq!(os.id(), "srm-6-os");
        assert_eq!(os.stage, ResolutionStage::Override);

        let full = resolver.resolve("SRM 6").unwrap();
        assert_eq!(full.id(), "srm-6");
        assert_eq!(full.stage, ResolutionStage::Normalized);
    }

    #[test]
    fn test_tech_base_picks_clan_entry() {
        let (catalog, tables) = fixtures();

        let mut is = EquipmentResolver::new(&catalog, &tables, TechBase::InnerSphere);
        assert_eq!(is.resolve("ER Medium Laser").unwrap().id(), "er-medium-laser");
        assert_eq!(is.resolve("CLERMediumLaser").unwrap().id(), "clan-er-medium-laser");

        let mut clan = EquipmentResolver::new(&catalog, &tables, TechBase::Clan);
        assert_eq!(clan.resolve("ER Medium Laser").unwrap().id(), "clan-er-medium-laser");
        assert_eq!(clan.resolve("ISERMediumLaser").unwrap().id(), "er-medium-laser");
    }

    #[test]
    fn test_alias_and_mapping() {
        let (catalog, tables) = fixtures();
        let mut resolver = EquipmentResolver::new(&catalog, &tables, TechBase::InnerSphere);
        assert_eq!(resolver.resolve("Anti-Missile System").unwrap().stage, ResolutionStage::Alias);
        assert_eq!(resolver.resolve("IS Anti-Missile System").unwrap().id(), "ams");

        let ppc = resolver.resolve("ISERPPC").unwrap();
        assert_eq!(ppc.id(), "er-ppc");
        assert_eq!(ppc.stage, ResolutionStage::NameMapping);
    }

    #[test]
    fn test_fallback_overrides_heat_and_is_reported() {
        let (catalog, tables) = fixtures();
        let mut resolver = EquipmentResolver::new(&catalog, &tables, TechBase::InnerSphere);

        let proto = resolver.resolve("Prototype ER Medium Laser").unwrap();
        assert_eq!(proto.stage, ResolutionStage::Fallback);
        assert!((proto.bv() - 62.0).abs() < f64::EPSILON);
        assert!((proto.heat() - 7.0).abs() < f64::EPSILON);

        resolver.resolve("SRM 6 (OS)");
        let report = resolver.report();
        assert_eq!(report.fallbacks.len(), 1);
        assert_eq!(report.overrides.len(), 1);
        assert_eq!(report.overrides[0].id, "srm-6-os");
    }

    #[test]
    fn test_canonical_ids_are_marked_inferred() {
        let (catalog, tables) = fixtures();
        let resolver = EquipmentResolver::new(&catalog, &tables, TechBase::InnerSphere);
        let ams = resolver.resolve_canonical("ams").unwrap();
        assert_eq!(ams.stage, ResolutionStage::Inferred);
        assert!(resolver.resolve_canonical("Anti-Missile System").is_none());
    }

    #[test]
    fn test_one_shot_spellings_reach_one_shot_entry() {
        let (catalog, tables) = fixtures();
        let mut resolver = EquipmentResolver::new(&catalog, &tables, TechBase::InnerSphere);
        for raw in ["IS SRM 6 (OS)", "SRM6 (I-OS)", "CLSRM6 (OS)"] {
            let resolved = resolver.resolve(raw).unwrap();
            assert_eq!(resolved.id(), "srm-6-os", "{}", raw);
            assert_eq!(resolved.stage, ResolutionStage::Normalized);
        }
        assert!(resolver.resolve("Medium Laser (OS)").is_none());
    }

    #[test]
    fn test_unknown_identifier_fails() {
        let (catalog, tables) = fixtures();
        let mut resolver = EquipmentResolver::new(&catalog, &tables, TechBase::InnerSphere);
        assert!(resolver.resolve("Mystery Cannon").is_none());
        assert!(resolver.resolve("").is_none());
        assert!(resolver.report().is_empty());
    }
}
