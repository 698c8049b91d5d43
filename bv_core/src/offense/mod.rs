//! Offensive contributions: weapons, ammunition, flat equipment and speed

mod ammo;
mod equipment;
pub mod heat;
mod speed;
mod weapons;

pub use ammo::AmmoStage;
pub use equipment::OffensiveEquipmentStage;
pub use heat::{bv_heat, movement_heat, HeatProfile};
pub use speed::{speed_factor, TonnageStage};
pub use weapons::{apply_heat_threshold, order_for_heat, rate_weapons, RatedWeapon, WeaponStage};
