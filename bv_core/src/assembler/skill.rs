//! Pilot skill adjustment

use crate::error::BvError;

/// Multipliers indexed by gunnery (rows) then piloting (columns), 0 to 8
const SKILL_TABLE: [[f64; 9]; 9] = [
    [2.42, 2.31, 2.21, 2.10, 1.93, 1.75, 1.68, 1.59, 1.50],
    [2.21, 2.11, 2.02, 1.92, 1.76, 1.60, 1.54, 1.46, 1.38],
    [1.93, 1.85, 1.76, 1.68, 1.54, 1.40, 1.35, 1.28, 1.21],
    [1.66, 1.58, 1.51, 1.44, 1.32, 1.20, 1.16, 1.10, 1.04],
    [1.38, 1.32, 1.26, 1.20, 1.10, 1.00, 0.95, 0.90, 0.85],
    [1.31, 1.19, 1.13, 1.08, 0.99, 0.90, 0.86, 0.81, 0.77],
    [1.24, 1.12, 1.07, 1.02, 0.94, 0.85, 0.81, 0.77, 0.72],
    [1.17, 1.06, 1.01, 0.96, 0.88, 0.80, 0.76, 0.72, 0.68],
    [1.10, 0.99, 0.95, 0.90, 0.83, 0.75, 0.71, 0.68, 0.64],
];

/// Multiplier for a gunnery/piloting pair
pub fn skill_multiplier(gunnery: u8, piloting: u8) -> Result<f64, BvError> {
    SKILL_TABLE
        .get(gunnery as usize)
        .and_then(|row| row.get(piloting as usize))
        .copied()
        .ok_or_else(|| {
            BvError::InvalidConstruction(format!(
                "skill {}/{} outside the 0-8 range",
                gunnery, piloting
            ))
        })
}

/// BV for a pilot other than the 4/5 baseline; rounds once
pub fn skill_adjusted_bv(total: u32, gunnery: u8, piloting: u8) -> Result<u32, BvError> {
    let multiplier = skill_multiplier(gunnery, piloting)?;
    Ok((total as f64 * multiplier).round() as u32)
}
