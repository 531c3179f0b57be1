//! Playoff progression: seeding, bracket generation, round advancement and
//! the non-user series runner.

pub mod bracket;
pub mod runner;
pub mod seeding;

pub use bracket::{advance_round, generate_bracket, is_round_complete, with_game_result};
pub use runner::{resolve_non_user_series, simulate_bracket};
pub use seeding::compute_seeds;
