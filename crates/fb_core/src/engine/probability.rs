//! Probability calculation utilities for game simulation.
//!
//! All functions are pure: they take ratings and tuning as input and return
//! probabilities or weights. This keeps the statistical model unit-testable
//! without a full `GameEngine`.

use super::tuning::{ratings, SimTuning};
use crate::models::player::{PlayerAttributes, Position};

/// Weight used when picking the focal offensive player for a possession.
/// Scoring-oriented attributes dominate, with ball-handling keeping guards
/// involved; role-appropriate per position.
pub fn focal_weight(attrs: &PlayerAttributes, position: Position) -> f32 {
    let shooting = ratings::normalize(attrs.shooting);
    let three = ratings::normalize(attrs.three_point);
    let inside = ratings::normalize(attrs.inside_scoring);
    let handling = ratings::normalize(attrs.ball_handling);

    let scoring = match position {
        Position::PG => shooting * 0.35 + three * 0.25 + handling * 0.30 + inside * 0.10,
        Position::SG => shooting * 0.40 + three * 0.35 + handling * 0.15 + inside * 0.10,
        Position::SF => shooting * 0.35 + three * 0.25 + inside * 0.25 + handling * 0.15,
        Position::PF => inside * 0.40 + shooting * 0.30 + three * 0.15 + handling * 0.15,
        Position::C => inside * 0.55 + shooting * 0.25 + three * 0.05 + handling * 0.15,
    };
    // Keep every player selectable; a zero weight would freeze a slot out
    // of the box score entirely.
    0.05 + scoring
}

/// Aggregate defensive pressure of the five on-court defenders, 0..1.
pub fn defensive_pressure(defenders: &[&PlayerAttributes]) -> f32 {
    if defenders.is_empty() {
        return 0.5;
    }
    let sum: f32 = defenders
        .iter()
        .map(|a| ratings::normalize(a.defense) * 0.6 + ratings::normalize(a.steals) * 0.4)
        .sum();
    sum / defenders.len() as f32
}

/// Probability the possession ends in a turnover before a shot goes up.
pub fn turnover_probability(
    handler: &PlayerAttributes,
    pressure: f32,
    turnover_mult: f32,
    tuning: &SimTuning,
) -> f32 {
    let handling = ratings::normalize(handler.ball_handling);
    let p = tuning.base_turnover_rate * (1.0 + tuning.turnover_swing * (pressure - handling));
    (p * turnover_mult).clamp(0.03, 0.30)
}

/// Share of this player's attempts taken from beyond the arc.
pub fn three_point_share(attrs: &PlayerAttributes, tuning: &SimTuning) -> f32 {
    let three = ratings::normalize(attrs.three_point);
    let inside = ratings::normalize(attrs.inside_scoring);
    // Players shade toward their stronger scoring zone.
    let lean = three - inside;
    (tuning.three_point_share_base + tuning.three_point_share_swing * lean).clamp(0.05, 0.60)
}

/// Probability a field-goal attempt draws a shooting foul.
pub fn foul_probability(defender: &PlayerAttributes, is_three: bool, tuning: &SimTuning) -> f32 {
    let discipline = ratings::normalize(defender.defense);
    let mut p = tuning.base_foul_rate * (1.25 - 0.5 * discipline);
    if is_three {
        p *= tuning.three_point_foul_factor;
    }
    p.clamp(0.01, 0.25)
}

/// Probability the contest blocks the shot outright.
pub fn block_probability(defender: &PlayerAttributes, is_three: bool, tuning: &SimTuning) -> f32 {
    let blocks = ratings::normalize(defender.blocks);
    let mut p = tuning.block_rate * (0.4 + 1.2 * blocks);
    if is_three {
        p *= tuning.three_point_block_factor;
    }
    p.clamp(0.0, 0.20)
}

/// Make probability for a field-goal attempt: base percentage for the shot
/// class, swung by the shooter-vs-contest differential, scaled by the
/// offense's modifiers, clamped to the tuning bounds.
pub fn shot_make_probability(
    shooter: &PlayerAttributes,
    contest: f32,
    is_three: bool,
    shooting_mult: f32,
    three_point_mult: f32,
    tuning: &SimTuning,
) -> f32 {
    let skill = if is_three {
        ratings::normalize(shooter.three_point) * 0.8 + ratings::normalize(shooter.shooting) * 0.2
    } else {
        ratings::normalize(shooter.inside_scoring) * 0.6
            + ratings::normalize(shooter.shooting) * 0.4
    };
    let base = if is_three {
        tuning.three_point_base_pct
    } else {
        tuning.two_point_base_pct
    };

    let mut p = base + tuning.attribute_swing * (skill - contest);
    p *= shooting_mult;
    if is_three {
        p *= three_point_mult;
    }
    p.clamp(tuning.min_make_pct, tuning.max_make_pct)
}

/// Free-throw make probability.
pub fn free_throw_probability(
    shooter: &PlayerAttributes,
    free_throw_mult: f32,
    tuning: &SimTuning,
) -> f32 {
    let touch = ratings::normalize(shooter.shooting);
    let p = tuning.free_throw_base_pct + tuning.free_throw_swing * (touch - 0.5);
    (p * free_throw_mult).clamp(0.40, 0.95)
}

/// Contest strength against a shot: the positional matchup carries most of
/// it, team help the rest.
pub fn contest_strength(matchup: &PlayerAttributes, team_defense: f32) -> f32 {
    ratings::normalize(matchup.defense) * 0.7 + team_defense * 0.3
}

/// Probability the offense keeps a missed shot alive.
pub fn offensive_rebound_probability(
    offense_rebounding: f32,
    defense_rebounding: f32,
    offense_mult: f32,
    defense_mult: f32,
    tuning: &SimTuning,
) -> f32 {
    let diff = offense_rebounding - defense_rebounding;
    let mut p = tuning.offensive_rebound_share + tuning.rebound_swing * diff;
    // Competing multipliers shift the contested share toward the stronger
    // bundle without letting either side run away with it.
    p *= offense_mult / defense_mult;
    p.clamp(tuning.min_offensive_rebound_share, tuning.max_offensive_rebound_share)
}

/// Team rebounding strength of five on-court players, 0..1.
pub fn team_rebounding(players: &[&PlayerAttributes]) -> f32 {
    if players.is_empty() {
        return 0.5;
    }
    let sum: f32 = players.iter().map(|a| ratings::normalize(a.rebounding)).sum();
    sum / players.len() as f32
}

/// Team defensive rating of five on-court players, 0..1.
pub fn team_defense(players: &[&PlayerAttributes]) -> f32 {
    if players.is_empty() {
        return 0.5;
    }
    let sum: f32 = players.iter().map(|a| ratings::normalize(a.defense)).sum();
    sum / players.len() as f32
}
