//! Simulation engine: possession loop, rotation management, probability
//! model and the tuning surface.

pub mod game_modifiers;
pub mod game_sim;
pub mod probability;
pub mod rotation;
pub mod stats;
pub mod tuning;

pub use game_modifiers::TeamGameModifiers;
pub use game_sim::{GameEngine, GamePlan, PossessionOutcome};
pub use rotation::{generate_preset, RotationSchedule, SUPPORTED_PRESET_SIZES};
pub use stats::experience_delta;
pub use tuning::{SimTuning, DEFAULT_TUNING, FOUL_LIMIT};
