//! Box-score finalization.
//!
//! The possession loop records raw counts; this module derives everything
//! computed after the final buzzer: experience deltas and the assembled
//! `GameResult`. Scores are recomputed from made shots here, so a drift
//! between the running score and the box score cannot survive finalization.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::game::{BoxScore, GameResult, PlayerLine};

/// Experience reported per player: floor time plus box-score production.
/// Development collaborators apply growth curves; the engine only reports.
pub fn experience_delta(line: &PlayerLine) -> u32 {
    if line.seconds_played == 0 {
        return 0;
    }
    // Any floor time at all earns at least one point of experience.
    let minutes = (line.seconds_played / 60).max(1);
    let production = u32::from(line.points)
        + u32::from(line.rebounds())
        + u32::from(line.assists)
        + u32::from(line.steals)
        + u32::from(line.blocks);
    minutes + production / 2
}

/// Assemble the final result from the recorded lines. Team scores are
/// recomputed from the box score itself, so they always reconcile with the
/// made shots underneath them.
pub fn finalize(
    mut box_score: BoxScore,
    overtimes: u8,
    home_possessions: u16,
    away_possessions: u16,
) -> GameResult {
    let mut experience = HashMap::new();
    for line in box_score.home.iter_mut().chain(box_score.away.iter_mut()) {
        line.experience = experience_delta(line);
        experience.insert(line.player_id, line.experience);
    }

    let home_score = box_score.home_totals().points;
    let away_score = box_score.away_totals().points;
    debug_assert!(box_score.is_consistent());

    GameResult {
        home_score,
        away_score,
        box_score,
        overtimes,
        home_possessions,
        away_possessions,
        experience,
    }
}

/// Convenience lookup for collaborators that only need one delta.
pub fn experience_for(result: &GameResult, player_id: Uuid) -> u32 {
    result.experience.get(&player_id).copied().unwrap_or(0)
}
