//! # fb_core - Deterministic Basketball Game Simulation & Playoff Engine
//!
//! This library simulates franchise basketball: possession-by-possession
//! games driven by player ratings and rotation plans, and the postseason
//! machinery that turns regular-season results into seeds, a play-in
//! tournament and a best-of-7 bracket ending in a champion.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result)
//! - Hard rotation invariants: 48 minutes per position, 240 in total
//! - Internally consistent box scores (points always reconcile with shots)
//! - Pure snapshot transitions for the playoff bracket
//! - JSON API for easy integration with host shells

// Game engine APIs often take several scalar knobs at once.
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod playoffs;

// Re-export the main API surface.
pub use api::{simulate_game_json, GameRequest, GameResponse};
pub use engine::{
    generate_preset, GameEngine, GamePlan, SimTuning, TeamGameModifiers, DEFAULT_TUNING,
};
pub use error::{Result, SimError};
pub use models::{
    BoxScore, Conference, Game, GameResult, Player, PlayerAttributes, PlayerLine, PlayoffBracket,
    PlayoffRound, PlayoffSeries, Position, RotationConfig, RotationViolation, SeededTeam, Team,
};
pub use playoffs::{
    advance_round, compute_seeds, generate_bracket, is_round_complete, resolve_non_user_series,
    simulate_bracket, with_game_result,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
