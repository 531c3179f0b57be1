//! Rotation configuration: who plays, at which position, for how many
//! minutes.
//!
//! Invariant: for each of the five positions, the minutes of the players
//! whose depth-chart entry is that position sum to exactly 48, so the grand
//! total is exactly 240 (5 x 48). Validation reports every violation found;
//! a config with a non-empty violation list never reaches the simulator.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::{Player, Position};

/// Regulation game length per position slot, in minutes.
pub const GAME_MINUTES: u16 = 48;
/// Sum of all rotation minutes (five slots x 48).
pub const TOTAL_ROTATION_MINUTES: u16 = 5 * GAME_MINUTES;
pub const MIN_ROTATION_SIZE: u8 = 6;
pub const MAX_ROTATION_SIZE: u8 = 10;

/// One depth-chart row: a player covering a position at a given depth
/// (1 = starter, 2 = first backup, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepthChartEntry {
    pub player_id: Uuid,
    pub position: Position,
    pub depth: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RotationConfig {
    pub rotation_size: u8,
    /// Target minutes per rotation player. Keys mirror the depth chart.
    pub player_minutes: HashMap<Uuid, u8>,
    pub depth_chart: Vec<DepthChartEntry>,
}

/// A single validation failure. The validator enumerates all of them
/// instead of stopping at the first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RotationViolation {
    PlayerNotOnRoster { player_id: Uuid },
    DuplicatePlayer { player_id: Uuid },
    MissingMinutes { player_id: Uuid },
    InvalidDepth { player_id: Uuid, depth: u8 },
    PositionUncovered { position: Position },
    PositionMinutes { position: Position, minutes: u16 },
    TotalMinutes { minutes: u16 },
    SizeMismatch { declared: u8, found: usize },
    SizeOutOfRange { size: u8 },
}

impl fmt::Display for RotationViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RotationViolation::PlayerNotOnRoster { player_id } => {
                write!(f, "player {player_id} is not on the roster")
            }
            RotationViolation::DuplicatePlayer { player_id } => {
                write!(f, "player {player_id} appears twice in the depth chart")
            }
            RotationViolation::MissingMinutes { player_id } => {
                write!(f, "player {player_id} has a depth-chart entry but no minutes")
            }
            RotationViolation::InvalidDepth { player_id, depth } => {
                write!(f, "player {player_id} has invalid depth {depth}")
            }
            RotationViolation::PositionUncovered { position } => {
                write!(f, "position {position} has no depth-chart entry")
            }
            RotationViolation::PositionMinutes { position, minutes } => {
                write!(f, "position {position} minutes sum to {minutes}, expected {GAME_MINUTES}")
            }
            RotationViolation::TotalMinutes { minutes } => {
                write!(f, "total minutes sum to {minutes}, expected {TOTAL_ROTATION_MINUTES}")
            }
            RotationViolation::SizeMismatch { declared, found } => {
                write!(f, "rotation size declared {declared} but depth chart has {found} entries")
            }
            RotationViolation::SizeOutOfRange { size } => {
                write!(
                    f,
                    "rotation size {size} outside {MIN_ROTATION_SIZE}..={MAX_ROTATION_SIZE}"
                )
            }
        }
    }
}

impl RotationConfig {
    /// Check this config against a roster. Returns every violation found;
    /// an empty list means the config is valid.
    pub fn validate(&self, roster: &[Player]) -> Vec<RotationViolation> {
        let mut violations = Vec::new();
        let roster_ids: HashSet<Uuid> = roster.iter().map(|p| p.id).collect();

        if !(MIN_ROTATION_SIZE..=MAX_ROTATION_SIZE).contains(&self.rotation_size) {
            violations.push(RotationViolation::SizeOutOfRange { size: self.rotation_size });
        }
        if self.depth_chart.len() != self.rotation_size as usize {
            violations.push(RotationViolation::SizeMismatch {
                declared: self.rotation_size,
                found: self.depth_chart.len(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.depth_chart {
            if !roster_ids.contains(&entry.player_id) {
                violations.push(RotationViolation::PlayerNotOnRoster { player_id: entry.player_id });
            }
            if !seen.insert(entry.player_id) {
                violations.push(RotationViolation::DuplicatePlayer { player_id: entry.player_id });
            }
            if entry.depth == 0 {
                violations.push(RotationViolation::InvalidDepth {
                    player_id: entry.player_id,
                    depth: entry.depth,
                });
            }
            if !self.player_minutes.contains_key(&entry.player_id) {
                violations.push(RotationViolation::MissingMinutes { player_id: entry.player_id });
            }
        }

        let mut total: u16 = 0;
        for position in Position::ALL {
            let mut covered = false;
            let mut minutes: u16 = 0;
            for entry in self.depth_chart.iter().filter(|e| e.position == position) {
                covered = true;
                minutes += u16::from(self.minutes_for(entry.player_id));
            }
            if !covered {
                violations.push(RotationViolation::PositionUncovered { position });
            } else if minutes != GAME_MINUTES {
                violations.push(RotationViolation::PositionMinutes { position, minutes });
            }
            total += minutes;
        }
        if total != TOTAL_ROTATION_MINUTES {
            violations.push(RotationViolation::TotalMinutes { minutes: total });
        }

        violations
    }

    pub fn is_valid(&self, roster: &[Player]) -> bool {
        self.validate(roster).is_empty()
    }

    pub fn minutes_for(&self, player_id: Uuid) -> u8 {
        self.player_minutes.get(&player_id).copied().unwrap_or(0)
    }

    /// Depth-chart entries at a position, ordered by depth.
    pub fn entries_at(&self, position: Position) -> Vec<&DepthChartEntry> {
        let mut entries: Vec<&DepthChartEntry> =
            self.depth_chart.iter().filter(|e| e.position == position).collect();
        entries.sort_by_key(|e| e.depth);
        entries
    }
}
