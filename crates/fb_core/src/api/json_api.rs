//! JSON boundary for game simulation.
//!
//! String-in, string-out so host shells and scripting layers can drive the
//! engine without linking against the model types. Errors come back as
//! `"CODE: message"` strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::game_modifiers::TeamGameModifiers;
use crate::engine::game_sim::{GameEngine, GamePlan};
use crate::engine::rotation::generate_preset;
use crate::engine::tuning::SimTuning;
use crate::models::game::{BoxScore, TeamTotals};
use crate::models::player::{Player, PlayerAttributes, Position};
use crate::models::playoffs::Conference;
use crate::models::team::Team;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "E_REQUEST";
    pub const SCHEMA_VERSION: &str = "E_SCHEMA";
    pub const INVALID_TEAM: &str = "E_TEAM";
    pub const SIMULATION: &str = "E_SIM";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: TeamData,
    pub away_team: TeamData,
    /// Named multiplier maps from the modifier provider (coaching staff,
    /// playbooks). Unknown names are ignored, values are clamped.
    #[serde(default)]
    pub home_modifiers: Option<HashMap<String, f32>>,
    #[serde(default)]
    pub away_modifiers: Option<HashMap<String, f32>>,
    #[serde(default)]
    pub is_playoff: bool,
}

#[derive(Debug, Deserialize)]
pub struct TeamData {
    pub name: String,
    pub players: Vec<PlayerData>,
    /// When set, a rotation preset of this size is generated for the team;
    /// otherwise the starting five plays the whole game.
    #[serde(default)]
    pub rotation_size: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerData {
    pub name: String,
    pub position: Position,
    /// Full rating block; wins over `overall` when both are present.
    #[serde(default)]
    pub attributes: Option<PlayerAttributes>,
    /// Shorthand: one rating applied across the block.
    #[serde(default)]
    pub overall: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    pub overtimes: u8,
    pub home_possessions: u16,
    pub away_possessions: u16,
    pub home_totals: TeamTotals,
    pub away_totals: TeamTotals,
    pub box_score: BoxScore,
}

/// Simulate one game from a JSON request, returning the response as JSON.
pub fn simulate_game_json(request_json: &str) -> Result<String, String> {
    let request: GameRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    if request.schema_version != crate::SCHEMA_VERSION {
        return Err(err_code(
            error_codes::SCHEMA_VERSION,
            format!(
                "expected {}, got {}",
                crate::SCHEMA_VERSION,
                request.schema_version
            ),
        ));
    }

    tracing::debug!(seed = request.seed, "simulating game via JSON API");

    let home_team = build_team(&request.home_team, Conference::East)?;
    let away_team = build_team(&request.away_team, Conference::West)?;

    let plan = GamePlan {
        home_team,
        away_team,
        seed: request.seed,
        home_modifiers: named_modifiers(request.home_modifiers.as_ref()),
        away_modifiers: named_modifiers(request.away_modifiers.as_ref()),
        is_playoff: request.is_playoff,
        tuning: SimTuning::default(),
    };

    let mut engine =
        GameEngine::new(plan).map_err(|e| err_code(error_codes::INVALID_TEAM, e))?;
    let result = engine.simulate();

    let response = GameResponse {
        schema_version: crate::SCHEMA_VERSION,
        home_team: request.home_team.name,
        away_team: request.away_team.name,
        home_score: result.home_score,
        away_score: result.away_score,
        overtimes: result.overtimes,
        home_possessions: result.home_possessions,
        away_possessions: result.away_possessions,
        home_totals: result.box_score.home_totals(),
        away_totals: result.box_score.away_totals(),
        box_score: result.box_score,
    };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SIMULATION, e))
}

fn named_modifiers(map: Option<&HashMap<String, f32>>) -> TeamGameModifiers {
    map.map(TeamGameModifiers::from_named).unwrap_or_default()
}

fn build_team(data: &TeamData, conference: Conference) -> Result<Team, String> {
    let roster: Vec<Player> = data
        .players
        .iter()
        .map(|p| {
            let attributes = p
                .attributes
                .map(PlayerAttributes::clamped)
                .unwrap_or_else(|| PlayerAttributes::uniform(p.overall.unwrap_or(60)));
            Player::new(p.name.clone(), p.position, attributes)
        })
        .collect();

    let lineup = starting_five(&roster)
        .ok_or_else(|| err_code(error_codes::INVALID_TEAM, format!("{}: empty roster", data.name)))?;
    let mut team = Team::new(data.name.clone(), conference, roster, lineup);

    if let Some(size) = data.rotation_size {
        let preset = generate_preset(size, &team.roster)
            .map_err(|e| err_code(error_codes::INVALID_TEAM, e))?;
        team.rotation = Some(preset);
    }

    team.validate().map_err(|e| err_code(error_codes::INVALID_TEAM, e))?;
    Ok(team)
}

/// Best player per position slot, ranked by aggregate rating with name as
/// the deterministic tie-break; best remaining player for uncovered slots.
fn starting_five(roster: &[Player]) -> Option<[Uuid; 5]> {
    if roster.len() < 5 {
        return None;
    }
    let mut ranked: Vec<usize> = (0..roster.len()).collect();
    ranked.sort_by(|&a, &b| {
        roster[b]
            .overall()
            .cmp(&roster[a].overall())
            .then_with(|| roster[a].name.cmp(&roster[b].name))
    });

    let mut taken = vec![false; roster.len()];
    let mut lineup: [Option<Uuid>; 5] = [None; 5];
    for position in Position::ALL {
        if let Some(&idx) = ranked
            .iter()
            .find(|&&i| !taken[i] && roster[i].position == position)
        {
            lineup[position.index()] = Some(roster[idx].id);
            taken[idx] = true;
        }
    }
    for slot in 0..5 {
        if lineup[slot].is_none() {
            let idx = *ranked.iter().find(|&&i| !taken[i])?;
            lineup[slot] = Some(roster[idx].id);
            taken[idx] = true;
        }
    }
    Some(lineup.map(|id| id.expect("every slot filled above")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roster_json(prefix: &str, overall: u8) -> serde_json::Value {
        let positions = ["PG", "SG", "SF", "PF", "C"];
        let players: Vec<serde_json::Value> = (0..13)
            .map(|i| {
                json!({
                    "name": format!("{prefix} {i:02}"),
                    "position": positions[i % 5],
                    "overall": overall,
                })
            })
            .collect();
        json!(players)
    }

    fn request(seed: u64) -> String {
        json!({
            "schema_version": 1,
            "seed": seed,
            "home_team": {
                "name": "Harbor City",
                "players": roster_json("HC", 72),
                "rotation_size": 9,
            },
            "away_team": {
                "name": "Ridgeline",
                "players": roster_json("RL", 70),
            },
        })
        .to_string()
    }

    #[test]
    fn basic_simulation_round_trips_json() {
        let response = simulate_game_json(&request(42)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert!(parsed["home_score"].is_number());
        assert!(parsed["away_score"].is_number());
        assert_ne!(parsed["home_score"], parsed["away_score"]);
        assert_eq!(parsed["home_team"], "Harbor City");
    }

    #[test]
    fn same_seed_same_response() {
        let a = simulate_game_json(&request(999)).unwrap();
        let b = simulate_game_json(&request(999)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_schema_version_is_refused() {
        let mut value: serde_json::Value = serde_json::from_str(&request(1)).unwrap();
        value["schema_version"] = json!(9);
        let err = simulate_game_json(&value.to_string()).unwrap_err();
        assert!(err.starts_with(error_codes::SCHEMA_VERSION), "{err}");
    }

    #[test]
    fn modifiers_are_accepted_and_clamped() {
        let mut value: serde_json::Value = serde_json::from_str(&request(5)).unwrap();
        value["home_modifiers"] = json!({"shooting": 99.0, "pace": 1.05, "mystery": 2.0});
        let response = simulate_game_json(&value.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert!(parsed["home_score"].is_number());
    }

    #[test]
    fn short_roster_is_refused() {
        let value = json!({
            "schema_version": 1,
            "seed": 3,
            "home_team": {"name": "Tiny", "players": [
                {"name": "Solo", "position": "PG", "overall": 80}
            ]},
            "away_team": {"name": "Ridgeline", "players": roster_json("RL", 70)},
        });
        let err = simulate_game_json(&value.to_string()).unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_TEAM), "{err}");
    }

    #[test]
    fn unsupported_rotation_size_is_refused() {
        let mut value: serde_json::Value = serde_json::from_str(&request(5)).unwrap();
        value["home_team"]["rotation_size"] = json!(7);
        let err = simulate_game_json(&value.to_string()).unwrap_err();
        assert!(err.contains("unsupported rotation size"), "{err}");
    }
}
