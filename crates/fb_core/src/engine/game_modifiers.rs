//! Game modifiers (sparse scalar bundle).
//!
//! This module is the single entry point for external systems (coaching
//! staff bonuses, playbook effects) to inject small deterministic scalar
//! adjustments into game simulation without touching the possession logic.
//! The engine only consumes these numbers; computing them belongs to the
//! modifier provider collaborator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TeamGameModifiers {
    /// Multiplies make probability on every field-goal attempt.
    pub shooting_mult: f32,
    /// Extra multiplier applied to three-point attempts only.
    pub three_point_mult: f32,
    /// Scales possession tempo; above 1.0 means shorter possessions.
    pub pace_mult: f32,
    /// Multiplies this team's share when a rebound is contested.
    pub rebounding_mult: f32,
    /// Multiplies this team's own turnover probability; below 1.0 is good.
    pub turnover_mult: f32,
    /// Multiplies free-throw make probability.
    pub free_throw_mult: f32,
}

impl Default for TeamGameModifiers {
    fn default() -> Self {
        Self {
            shooting_mult: 1.0,
            three_point_mult: 1.0,
            pace_mult: 1.0,
            rebounding_mult: 1.0,
            turnover_mult: 1.0,
            free_throw_mult: 1.0,
        }
    }
}

impl TeamGameModifiers {
    /// Apply one named modifier. Unknown names are ignored so providers can
    /// ship forward-compatible bundles.
    pub fn apply_named(&mut self, name: &str, value: f32) {
        match name {
            "shooting" => self.shooting_mult = clamp_finite(value, 0.80, 1.20, 1.0),
            "three_point" => self.three_point_mult = clamp_finite(value, 0.80, 1.20, 1.0),
            "pace" => self.pace_mult = clamp_finite(value, 0.85, 1.15, 1.0),
            "rebounding" => self.rebounding_mult = clamp_finite(value, 0.80, 1.20, 1.0),
            "turnover" => self.turnover_mult = clamp_finite(value, 0.80, 1.20, 1.0),
            "free_throw" => self.free_throw_mult = clamp_finite(value, 0.80, 1.20, 1.0),
            _ => {}
        }
    }

    pub fn from_named(map: &HashMap<String, f32>) -> Self {
        let mut modifiers = Self::default();
        // Stable application order; the map's iteration order must not
        // matter because each key sets a distinct field.
        for (name, value) in map {
            modifiers.apply_named(name, *value);
        }
        modifiers
    }
}

fn clamp_finite(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if !value.is_finite() {
        return default;
    }
    value.clamp(min, max)
}
