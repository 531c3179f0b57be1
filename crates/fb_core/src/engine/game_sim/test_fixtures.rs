//! Centralized test helpers for the simulation modules.

use crate::engine::game_sim::GamePlan;
use crate::models::player::{Player, PlayerAttributes, Position};
use crate::models::playoffs::Conference;
use crate::models::team::Team;

/// A 13-player roster with a mild rating spread around `base`, positions
/// cycling PG..C so every slot has natural cover.
pub(crate) fn test_team(name: &str, base: u8) -> Team {
    let roster: Vec<Player> = (0..13)
        .map(|i| {
            let rating = base.saturating_sub((i / 5 * 8) as u8);
            Player::new(
                format!("{name} {i:02}"),
                Position::ALL[i % 5],
                PlayerAttributes::uniform(rating),
            )
        })
        .collect();
    let lineup = [roster[0].id, roster[1].id, roster[2].id, roster[3].id, roster[4].id];
    Team::new(name, Conference::East, roster, lineup)
}

/// Two evenly-matched teams under the default tuning.
pub(crate) fn plan_for(seed: u64) -> GamePlan {
    GamePlan::new(test_team("Home", 70), test_team("Away", 68), seed)
}
