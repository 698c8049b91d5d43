//! Defensive stages - structure, armor, defensive equipment, explosive penalty

mod equipment;
mod explosive;
mod movement;
mod structure;

pub use equipment::{point_defense_families, DefensiveEquipmentStage};
pub use explosive::{explosive_penalty, ExplosiveStage, Protection};
pub use movement::{defensive_factor, run_mp, target_movement_modifier};
pub use structure::StructureArmorStage;

use crate::types::{Location, Topology};
use std::collections::BTreeMap;

/// Defense calculation constants
pub mod constants {
    /// Internal structure points of the head at every tonnage
    pub const HEAD_STRUCTURE: u32 = 3;

    /// Smallest defensive value a unit can have
    pub const MIN_DEFENSIVE_VALUE: f64 = 1.0;

    /// Extra TMM for a unit that jumps
    pub const JUMP_TMM_BONUS: u32 = 1;
}

/// Standard internal structure: (tonnage, center torso, side torso, arm, leg)
const STRUCTURE_TABLE: &[(u32, u32, u32, u32, u32)] = &[
    (10, 4, 3, 1, 2),
    (15, 5, 4, 2, 3),
    (20, 6, 5, 3, 4),
    (25, 8, 6, 4, 6),
    (30, 10, 7, 5, 7),
    (35, 11, 8, 6, 8),
    (40, 12, 10, 6, 10),
    (45, 14, 11, 7, 11),
    (50, 16, 12, 8, 12),
    (55, 18, 13, 9, 13),
    (60, 20, 14, 10, 14),
    (65, 21, 15, 10, 15),
    (70, 22, 15, 11, 15),
    (75, 23, 16, 12, 16),
    (80, 25, 17, 13, 17),
    (85, 27, 18, 14, 18),
    (90, 29, 19, 15, 19),
    (95, 30, 20, 16, 20),
    (100, 31, 21, 17, 21),
];

/// Standard internal structure points per location for a tonnage
///
/// Quads carry four legs at leg values instead of arms.
pub fn internal_structure_points(tonnage: u32, topology: Topology) -> Option<BTreeMap<Location, u32>> {
    let &(_, center, side, arm, leg) = STRUCTURE_TABLE.iter().find(|row| row.0 == tonnage)?;

    let mut points = BTreeMap::new();
    points.insert(Location::Head, constants::HEAD_STRUCTURE);
    points.insert(Location::CenterTorso, center);
    points.insert(Location::LeftTorso, side);
    points.insert(Location::RightTorso, side);
    match topology {
        Topology::Quad | Topology::QuadVee => {
            for location in [
                Location::FrontLeftLeg,
                Location::FrontRightLeg,
                Location::RearLeftLeg,
                Location::RearRightLeg,
            ] {
                points.insert(location, leg);
            }
        }
        Topology::Biped | Topology::Tripod | Topology::Lam => {
            points.insert(Location::LeftArm, arm);
            points.insert(Location::RightArm, arm);
            points.insert(Location::LeftLeg, leg);
            points.insert(Location::RightLeg, leg);
        }
    }
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifty_ton_biped_total() {
        let points = internal_structure_points(50, Topology::Biped).unwrap();
        assert_eq!(points.values().sum::<u32>(), 83);
        assert_eq!(points[&Location::LeftArm], 8);
    }

    #[test]
    fn test_quad_uses_four_legs() {
        let points = internal_structure_points(50, Topology::Quad).unwrap();
        assert!(!points.contains_key(&Location::LeftArm));
        assert_eq!(points[&Location::FrontLeftLeg], 12);
        assert_eq!(points.values().sum::<u32>(), 3 + 16 + 24 + 48);
    }

    #[test]
    fn test_table_covers_every_weight_class() {
        for tonnage in (10..=100).step_by(5) {
            assert!(internal_structure_points(tonnage, Topology::Biped).is_some(), "{} t", tonnage);
        }
        assert!(internal_structure_points(52, Topology::Biped).is_none());
        assert!(internal_structure_points(105, Topology::Biped).is_none());
    }
}
