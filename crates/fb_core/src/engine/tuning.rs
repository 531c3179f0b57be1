//! Simulation tuning coefficients.
//!
//! Every probability the possession loop uses is derived from a named
//! coefficient here, never from an inline magic number. `SimTuning` carries
//! the overridable set; callers pass a modified copy through `GamePlan` to
//! reshape the statistical model without touching engine code. Tests assert
//! bounds and consistency, not exact distributions.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Clock layout constants. These are structural, not tunable: the rotation
/// invariants (48-minute positions, 240 total minutes) assume them.
pub mod clock {
    /// Seconds per quarter.
    pub const QUARTER_SECS: u32 = 720;
    pub const QUARTERS: u8 = 4;
    /// Seconds per overtime period.
    pub const OVERTIME_SECS: u32 = 300;
    /// Substitution windows open at quarter boundaries and mid-quarter.
    pub const SUB_WINDOW_SECS: u32 = 360;
}

/// Rating scale helpers.
pub mod ratings {
    pub const MAX: f32 = 100.0;

    /// Normalize a 0..=100 rating to 0.0..=1.0.
    #[inline]
    pub fn normalize(value: u8) -> f32 {
        f32::from(value) / MAX
    }
}

/// Personal-foul limit; reaching it forces a substitution for the rest of
/// the game.
pub const FOUL_LIMIT: u8 = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimTuning {
    // ---- possession pacing ----
    /// Mean possession length in seconds before pace modifiers.
    pub possession_mean_secs: f32,
    /// Standard deviation of the per-possession length draw.
    pub possession_jitter_sd: f32,
    pub possession_min_secs: u32,
    pub possession_max_secs: u32,

    // ---- possession outcome mix ----
    /// Baseline probability a possession ends in a turnover.
    pub base_turnover_rate: f32,
    /// How strongly the pressure-vs-handling differential swings turnovers.
    pub turnover_swing: f32,
    /// Share of turnovers credited to a defender as a steal.
    pub steal_share_of_turnovers: f32,
    /// Baseline probability a shot attempt draws a shooting foul.
    pub base_foul_rate: f32,
    /// Foul multiplier for three-point attempts (fouled far less often).
    pub three_point_foul_factor: f32,

    // ---- shot selection and conversion ----
    /// Baseline share of attempts taken from three.
    pub three_point_share_base: f32,
    /// Attribute-driven swing around the baseline share.
    pub three_point_share_swing: f32,
    pub two_point_base_pct: f32,
    pub three_point_base_pct: f32,
    /// How strongly the offense-vs-defense differential swings make
    /// probability.
    pub attribute_swing: f32,
    /// Make probability clamp, keeping every outcome bounded.
    pub min_make_pct: f32,
    pub max_make_pct: f32,
    pub free_throw_base_pct: f32,
    pub free_throw_swing: f32,
    /// Baseline probability a two-point attempt is blocked.
    pub block_rate: f32,
    /// Block multiplier for three-point attempts.
    pub three_point_block_factor: f32,
    /// Share of made baskets that carry an assist.
    pub assist_rate: f32,

    // ---- rebounding ----
    /// Baseline share of misses rebounded by the offense.
    pub offensive_rebound_share: f32,
    /// Attribute-driven swing around the baseline share.
    pub rebound_swing: f32,
    pub min_offensive_rebound_share: f32,
    pub max_offensive_rebound_share: f32,
}

impl Default for SimTuning {
    fn default() -> Self {
        Self {
            possession_mean_secs: 14.5,
            possession_jitter_sd: 3.5,
            possession_min_secs: 5,
            possession_max_secs: 24,

            base_turnover_rate: 0.13,
            turnover_swing: 0.55,
            steal_share_of_turnovers: 0.52,
            base_foul_rate: 0.105,
            three_point_foul_factor: 0.30,

            three_point_share_base: 0.34,
            three_point_share_swing: 0.26,
            two_point_base_pct: 0.50,
            three_point_base_pct: 0.355,
            attribute_swing: 0.22,
            min_make_pct: 0.05,
            max_make_pct: 0.85,
            free_throw_base_pct: 0.76,
            free_throw_swing: 0.22,
            block_rate: 0.065,
            three_point_block_factor: 0.25,
            assist_rate: 0.58,

            offensive_rebound_share: 0.26,
            rebound_swing: 0.18,
            min_offensive_rebound_share: 0.10,
            max_offensive_rebound_share: 0.45,
        }
    }
}

/// Shared default instance for callers that never override anything.
pub static DEFAULT_TUNING: Lazy<SimTuning> = Lazy::new(SimTuning::default);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_probabilities() {
        let t = SimTuning::default();
        for value in [
            t.base_turnover_rate,
            t.steal_share_of_turnovers,
            t.base_foul_rate,
            t.three_point_share_base,
            t.two_point_base_pct,
            t.three_point_base_pct,
            t.free_throw_base_pct,
            t.block_rate,
            t.assist_rate,
            t.offensive_rebound_share,
        ] {
            assert!((0.0..=1.0).contains(&value), "coefficient out of range: {value}");
        }
        assert!(t.min_make_pct < t.max_make_pct);
        assert!(t.possession_min_secs < t.possession_max_secs);
    }

    #[test]
    fn sub_windows_tile_the_quarter() {
        assert_eq!(clock::QUARTER_SECS % clock::SUB_WINDOW_SECS, 0);
    }
}
