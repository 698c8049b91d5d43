//! Movement: running MP and target movement modifier

use super::constants::JUMP_TMM_BONUS;

/// Running MP from walking MP and speed-boosting systems
pub fn run_mp(walk_mp: u32, tsm: bool, masc: bool, supercharger: bool) -> u32 {
    let walk = if tsm { walk_mp.saturating_add(1) } else { walk_mp };
    match (masc, supercharger) {
        (true, true) => walk.saturating_mul(5).div_ceil(2),
        (true, false) | (false, true) => walk.saturating_mul(2),
        (false, false) => walk.saturating_mul(3).div_ceil(2),
    }
}

/// Target movement modifier for hexes moved
pub fn target_movement_modifier(mp: u32) -> u32 {
    match mp {
        0..=2 => 0,
        3..=4 => 1,
        5..=6 => 2,
        7..=9 => 3,
        10..=17 => 4,
        18..=24 => 5,
        _ => 6,
    }
}

/// Defensive factor `1 + TMM / 10`, using the better of running and jumping
pub fn defensive_factor(run_mp: u32, jump_mp: u32, stealth: bool, stealth_tmm: f64) -> f64 {
    let run = target_movement_modifier(run_mp);
    let jump = if jump_mp > 0 {
        target_movement_modifier(jump_mp) + JUMP_TMM_BONUS
    } else {
        0
    };
    let mut tmm = run.max(jump) as f64;
    if stealth {
        tmm += stealth_tmm;
    }
    1.0 + tmm / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mp() {
        assert_eq!(run_mp(4, false, false, false), 6);
        assert_eq!(run_mp(5, false, false, false), 8);
        assert_eq!(run_mp(4, true, false, false), 8);
        assert_eq!(run_mp(4, false, true, false), 8);
        assert_eq!(run_mp(5, false, true, true), 13);
    }

    #[test]
    fn test_tmm_table() {
        assert_eq!(target_movement_modifier(2), 0);
        assert_eq!(target_movement_modifier(6), 2);
        assert_eq!(target_movement_modifier(9), 3);
        assert_eq!(target_movement_modifier(10), 4);
        assert_eq!(target_movement_modifier(25), 6);
    }

    #[test]
    fn test_defensive_factor() {
        assert!((defensive_factor(6, 0, false, 2.0) - 1.2).abs() < 1e-9);
        // Jumping 6 beats running 6: TMM 2 + 1
        assert!((defensive_factor(6, 6, false, 2.0) - 1.3).abs() < 1e-9);
        assert!((defensive_factor(6, 0, true, 2.0) - 1.4).abs() < 1e-9);
    }
}
