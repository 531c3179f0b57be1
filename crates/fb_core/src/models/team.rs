//! Team data: roster, starting five, optional rotation plan.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::{Player, Position};
use super::playoffs::Conference;
use super::rotation::RotationConfig;
use crate::error::SimError;

pub const MIN_ROSTER_SIZE: usize = 13;
pub const MAX_ROSTER_SIZE: usize = 17;

/// A franchise roster. The starting lineup is ordered by position slot
/// (index 0 = PG ... index 4 = C); a player may start out of their natural
/// position, the slot decides the matchup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub conference: Conference,
    pub roster: Vec<Player>,
    pub starting_lineup: [Uuid; 5],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationConfig>,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        conference: Conference,
        roster: Vec<Player>,
        starting_lineup: [Uuid; 5],
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            conference,
            roster,
            starting_lineup,
            rotation: None,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(MIN_ROSTER_SIZE..=MAX_ROSTER_SIZE).contains(&self.roster.len()) {
            return Err(self.invalid(format!(
                "roster must have {MIN_ROSTER_SIZE}..={MAX_ROSTER_SIZE} players, found {}",
                self.roster.len()
            )));
        }

        for player in &self.roster {
            if !player.attributes.in_range() {
                return Err(self.invalid(format!("player {} has out-of-range ratings", player.name)));
            }
        }

        for (slot, starter_id) in self.starting_lineup.iter().enumerate() {
            if self.player(*starter_id).is_none() {
                return Err(self.invalid(format!(
                    "starter at {} is not on the roster",
                    Position::ALL[slot]
                )));
            }
        }
        for i in 0..5 {
            for j in (i + 1)..5 {
                if self.starting_lineup[i] == self.starting_lineup[j] {
                    return Err(self.invalid("duplicate player in starting lineup".to_string()));
                }
            }
        }

        if let Some(rotation) = &self.rotation {
            let violations = rotation.validate(&self.roster);
            if !violations.is_empty() {
                return Err(SimError::InvalidRotation(violations));
            }
        }

        Ok(())
    }

    pub fn player(&self, id: Uuid) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn roster_index(&self, id: Uuid) -> Option<usize> {
        self.roster.iter().position(|p| p.id == id)
    }

    /// Roster indices of the starting five, lineup slot order.
    pub fn starter_indices(&self) -> Result<[usize; 5], SimError> {
        let mut indices = [0usize; 5];
        for (slot, starter_id) in self.starting_lineup.iter().enumerate() {
            indices[slot] = self
                .roster_index(*starter_id)
                .ok_or_else(|| self.invalid(format!("starter at {} missing", Position::ALL[slot])))?;
        }
        Ok(indices)
    }

    pub fn average_overall(&self) -> f32 {
        if self.roster.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.roster.iter().map(|p| u32::from(p.overall())).sum();
        sum as f32 / self.roster.len() as f32
    }

    fn invalid(&self, reason: String) -> SimError {
        SimError::InvalidTeam { name: self.name.clone(), reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::PlayerAttributes;

    fn team_of(n: usize) -> Team {
        let roster: Vec<Player> = (0..n)
            .map(|i| {
                Player::new(
                    format!("Player {i}"),
                    Position::ALL[i % 5],
                    PlayerAttributes::uniform(55),
                )
            })
            .collect();
        let lineup = [roster[0].id, roster[1].id, roster[2].id, roster[3].id, roster[4].id];
        Team::new("Test", Conference::East, roster, lineup)
    }

    #[test]
    fn thirteen_player_roster_with_clean_lineup_validates() {
        assert!(team_of(13).validate().is_ok());
    }

    #[test]
    fn undersized_roster_is_rejected() {
        let err = team_of(9).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidTeam { .. }));
    }

    #[test]
    fn duplicate_starter_is_rejected() {
        let mut team = team_of(13);
        team.starting_lineup[1] = team.starting_lineup[0];
        assert!(team.validate().is_err());
    }

    #[test]
    fn starter_off_roster_is_rejected() {
        let mut team = team_of(13);
        team.starting_lineup[4] = Uuid::new_v4();
        assert!(team.validate().is_err());
    }
}
