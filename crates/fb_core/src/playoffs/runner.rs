//! Partial bracket advancement: simulate every series the user is not
//! playing in, leaving the user's own series strictly untouched.
//!
//! Series resolve sequentially with per-game seeds derived from one base
//! seed, so a whole postseason is reproducible from a single number.

use std::collections::HashMap;

use uuid::Uuid;

use crate::engine::game_modifiers::TeamGameModifiers;
use crate::engine::game_sim::{GameEngine, GamePlan};
use crate::engine::tuning::SimTuning;
use crate::error::{Result, SimError};
use crate::models::game::Game;
use crate::models::playoffs::{PlayoffBracket, PlayoffRound, PlayoffSeries};
use crate::models::team::Team;

use super::bracket::{advance_round, is_round_complete, with_game_result};

/// Simulate remaining games of every incomplete series in the current round
/// that does NOT involve `user_team`. Returns the updated bracket snapshot
/// plus every game generated. Never advances the round pointer; callers do
/// that once the user's series resolves too.
pub fn resolve_non_user_series(
    bracket: &PlayoffBracket,
    teams: &[Team],
    user_team: Option<Uuid>,
    modifiers: &HashMap<Uuid, TeamGameModifiers>,
    base_seed: u64,
    tuning: &SimTuning,
) -> Result<(PlayoffBracket, Vec<Game>)> {
    let mut current = bracket.clone();
    let mut games = Vec::new();
    let mut game_counter: u64 = 0;

    loop {
        // Re-read each pass: folding a play-in result can append the
        // synthesized second-chance game to the round.
        let Some(series) = current
            .current_series()
            .iter()
            .find(|s| {
                !s.is_complete && user_team.map_or(true, |user| !s.involves(user))
            })
            .cloned()
        else {
            break;
        };

        let game = simulate_series_game(
            &series,
            teams,
            modifiers,
            derive_seed(base_seed, game_counter),
            tuning,
        )?;
        game_counter += 1;
        current = with_game_result(&current, &game)?;
        games.push(game);
    }

    log::debug!(
        "resolved {} non-user playoff games in round {}",
        games.len(),
        bracket.current_round
    );
    Ok((current, games))
}

/// Convenience loop for fully simulated postseasons (no user team): resolve
/// and advance until the bracket completes. Returns the final bracket and
/// every game played along the way.
pub fn simulate_bracket(
    bracket: &PlayoffBracket,
    teams: &[Team],
    modifiers: &HashMap<Uuid, TeamGameModifiers>,
    base_seed: u64,
    tuning: &SimTuning,
) -> Result<(PlayoffBracket, Vec<Game>)> {
    let mut current = bracket.clone();
    let mut games = Vec::new();
    let mut round_counter: u64 = 0;

    while current.current_round != PlayoffRound::Complete {
        let (resolved, mut played) = resolve_non_user_series(
            &current,
            teams,
            None,
            modifiers,
            derive_seed(base_seed, 1_000_000 + round_counter),
            tuning,
        )?;
        games.append(&mut played);
        current = resolved;
        round_counter += 1;

        if current.current_round == PlayoffRound::Complete {
            break;
        }
        debug_assert!(is_round_complete(&current));
        current = advance_round(&current)?;
    }
    Ok((current, games))
}

/// Next game of a series: hosts follow the 2-2-1-1-1 pattern (games 1, 2,
/// 5 and 7 at the better seed).
fn simulate_series_game(
    series: &PlayoffSeries,
    teams: &[Team],
    modifiers: &HashMap<Uuid, TeamGameModifiers>,
    seed: u64,
    tuning: &SimTuning,
) -> Result<Game> {
    let game_no = series.game_ids.len() + 1;
    let (host_id, visitor_id) = match game_no {
        1 | 2 | 5 | 7 => (series.home_team_id, series.away_team_id),
        _ => (series.away_team_id, series.home_team_id),
    };
    let host = find_team(teams, host_id)?;
    let visitor = find_team(teams, visitor_id)?;

    let plan = GamePlan {
        home_team: host.clone(),
        away_team: visitor.clone(),
        seed,
        home_modifiers: modifiers.get(&host_id).copied().unwrap_or_default(),
        away_modifiers: modifiers.get(&visitor_id).copied().unwrap_or_default(),
        is_playoff: true,
        tuning: tuning.clone(),
    };
    let result = GameEngine::new(plan)?.simulate();
    Ok(Game::playoff(host_id, visitor_id, series.id).with_result(&result))
}

fn find_team(teams: &[Team], id: Uuid) -> Result<&Team> {
    teams.iter().find(|t| t.id == id).ok_or(SimError::UnknownTeam(id))
}

/// splitmix64 step: spreads one base seed into independent per-game seeds.
fn derive_seed(base: u64, n: u64) -> u64 {
    let mut z = base.wrapping_add(n.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
