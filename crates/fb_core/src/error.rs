//! Engine error taxonomy.
//!
//! Three families of failure, all local and recoverable by the caller:
//! configuration errors (invalid rotation input, rejected before any
//! simulation work), precondition refusals (advancing an incomplete playoff
//! round), and structural impossibilities (a conference missing one of the
//! seeds a play-in game needs).

use thiserror::Error;
use uuid::Uuid;

use crate::models::playoffs::{Conference, PlayoffRound};
use crate::models::rotation::RotationViolation;

#[derive(Error, Debug)]
pub enum SimError {
    /// Rotation input failed validation. Carries every violation found, not
    /// just the first; the simulator never substitutes around a bad config.
    #[error("invalid rotation: {}", format_violations(.0))]
    InvalidRotation(Vec<RotationViolation>),

    #[error("unsupported rotation size {0}, presets exist for 6, 8, 9 and 10")]
    UnsupportedRotationSize(u8),

    #[error("roster too small: requested {needed} rotation players, roster has {found}")]
    RosterTooSmall { needed: usize, found: usize },

    #[error("invalid team {name}: {reason}")]
    InvalidTeam { name: String, reason: String },

    #[error("playoff round {0} is not complete")]
    RoundIncomplete(PlayoffRound),

    #[error("bracket is already complete")]
    BracketComplete,

    #[error("no seed {seed} in the {conference} conference")]
    MissingSeed { conference: Conference, seed: u8 },

    #[error("series {0} is already complete")]
    SeriesComplete(Uuid),

    #[error("game does not belong to series {0}")]
    SeriesMismatch(Uuid),

    #[error("game {0} has not been played")]
    GameNotPlayed(Uuid),

    #[error("unknown team id {0}")]
    UnknownTeam(Uuid),

    #[error("unsupported schema version: expected {expected}, got {found}")]
    SchemaVersion { expected: u8, found: u8 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

fn format_violations(violations: &[RotationViolation]) -> String {
    violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Position;

    #[test]
    fn invalid_rotation_lists_every_violation() {
        let err = SimError::InvalidRotation(vec![
            RotationViolation::PositionUncovered { position: Position::C },
            RotationViolation::TotalMinutes { minutes: 236 },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("C"), "message should name the position: {msg}");
        assert!(msg.contains("236"), "message should carry the bad total: {msg}");
        assert!(msg.contains("; "), "violations should be enumerated: {msg}");
    }
}
