//! BvStage - trait for pipeline stages that add to the accumulator

mod accumulator;
mod chain;
mod prepared;

pub use accumulator::{AppliedModifier, BvAccumulator};
pub use chain::{ChainStep, ModifierChain};
pub use prepared::{MountedItem, PreparedUnit, UnitSystems};

/// Trait for anything that contributes a partial BV
pub trait BvStage: Send + Sync {
    /// Unique identifier for this stage
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Structure and armor: -100
    /// - Defensive equipment and explosives: 0
    /// - Weapons and ammo: 100
    /// - Flat offensive terms: 200
    fn priority(&self) -> i32 {
        0
    }

    /// Add this stage's contribution to the accumulator
    fn apply(&self, unit: &PreparedUnit<'_>, acc: &mut BvAccumulator);
}

/// Run stages in priority order; ties keep their given order
pub fn run_stages(stages: &[Box<dyn BvStage>], unit: &PreparedUnit<'_>) -> BvAccumulator {
    let mut ordered: Vec<&dyn BvStage> = stages.iter().map(|s| s.as_ref()).collect();
    ordered.sort_by_key(|s| s.priority());

    let mut acc = BvAccumulator::new();
    acc.diagnostics.extend(unit.diagnostics.iter().cloned());
    for stage in ordered {
        stage.apply(unit, &mut acc);
        tracing::debug!("stage {} applied", stage.id());
    }
    acc
}
