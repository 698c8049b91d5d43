//! Final assembly - combine stage contributions into a rounded total

mod engine;
mod result;
mod skill;

pub use engine::{calculate_bv, default_stages, BvEngine};
pub use result::{BvBreakdown, BvResult, CockpitAdjustment};
pub use skill::{skill_adjusted_bv, skill_multiplier};
