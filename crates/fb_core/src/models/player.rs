//! Player data for the game simulation engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five on-court positions. Order matters: lineup slots, depth charts
/// and matchup assignments all use this ordering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    #[default]
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::PG,
        Position::SG,
        Position::SF,
        Position::PF,
        Position::C,
    ];

    /// Lineup slot index (0..5) for this position.
    pub fn index(&self) -> usize {
        match self {
            Position::PG => 0,
            Position::SG => 1,
            Position::SF => 2,
            Position::PF => 3,
            Position::C => 4,
        }
    }

    pub fn is_guard(&self) -> bool {
        matches!(self, Position::PG | Position::SG)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::SF | Position::PF)
    }

    pub fn is_center(&self) -> bool {
        matches!(self, Position::C)
    }

    /// Frontcourt slots contest most inside shots and rebounds.
    pub fn is_frontcourt(&self) -> bool {
        matches!(self, Position::SF | Position::PF | Position::C)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed rating block. Every value lives on a 0..=100 scale; constructors
/// clamp so downstream probability math never sees an out-of-range rating.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAttributes {
    pub shooting: u8,
    pub three_point: u8,
    pub inside_scoring: u8,
    pub passing: u8,
    pub ball_handling: u8,
    pub rebounding: u8,
    pub defense: u8,
    pub steals: u8,
    pub blocks: u8,
    pub speed: u8,
}

impl PlayerAttributes {
    pub const MAX_RATING: u8 = 100;

    /// Uniform rating block, handy for tests and API shorthand rosters.
    pub fn uniform(rating: u8) -> Self {
        let r = rating.min(Self::MAX_RATING);
        Self {
            shooting: r,
            three_point: r,
            inside_scoring: r,
            passing: r,
            ball_handling: r,
            rebounding: r,
            defense: r,
            steals: r,
            blocks: r,
            speed: r,
        }
    }

    /// Copy with every rating clamped to the valid scale.
    pub fn clamped(self) -> Self {
        Self {
            shooting: self.shooting.min(Self::MAX_RATING),
            three_point: self.three_point.min(Self::MAX_RATING),
            inside_scoring: self.inside_scoring.min(Self::MAX_RATING),
            passing: self.passing.min(Self::MAX_RATING),
            ball_handling: self.ball_handling.min(Self::MAX_RATING),
            rebounding: self.rebounding.min(Self::MAX_RATING),
            defense: self.defense.min(Self::MAX_RATING),
            steals: self.steals.min(Self::MAX_RATING),
            blocks: self.blocks.min(Self::MAX_RATING),
            speed: self.speed.min(Self::MAX_RATING),
        }
    }

    pub fn in_range(&self) -> bool {
        *self == self.clamped()
    }

    /// Aggregate rating used to rank players for rotation presets.
    pub fn overall(&self) -> u16 {
        self.shooting as u16
            + self.three_point as u16
            + self.inside_scoring as u16
            + self.passing as u16
            + self.ball_handling as u16
            + self.rebounding as u16
            + self.defense as u16
            + self.steals as u16
            + self.blocks as u16
            + self.speed as u16
    }
}

/// A roster player. Immutable during a single game simulation; the engine
/// borrows rosters read-only and reports experience deltas without touching
/// ratings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub position: Position,
    pub attributes: PlayerAttributes,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position, attributes: PlayerAttributes) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            attributes: attributes.clamped(),
        }
    }

    pub fn overall(&self) -> u16 {
        self.attributes.overall()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_clamps_ratings() {
        let attrs = PlayerAttributes {
            shooting: 140,
            three_point: 101,
            ..PlayerAttributes::uniform(50)
        };
        let p = Player::new("Test", Position::SG, attrs);
        assert_eq!(p.attributes.shooting, 100);
        assert_eq!(p.attributes.three_point, 100);
        assert_eq!(p.attributes.passing, 50);
        assert!(p.attributes.in_range());
    }

    #[test]
    fn position_slots_cover_all_five() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
    }

    #[test]
    fn position_serde_uses_uppercase_labels() {
        let json = serde_json::to_string(&Position::PG).unwrap();
        assert_eq!(json, "\"PG\"");
        let back: Position = serde_json::from_str("\"C\"").unwrap();
        assert_eq!(back, Position::C);
    }
}
