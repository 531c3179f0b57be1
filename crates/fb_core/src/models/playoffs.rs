//! Playoff data: series, seeds and the bracket aggregate.
//!
//! The bracket is mutable-by-replacement: transition functions in
//! `crate::playoffs` take `&PlayoffBracket` and return a new snapshot, so a
//! caller can simulate, compare and commit without risking a half-updated
//! aggregate. Series mutate only by appending decided games.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::game::Game;
use crate::error::SimError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Conference {
    East,
    West,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::East, Conference::West];
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Conference::East => f.write_str("East"),
            Conference::West => f.write_str("West"),
        }
    }
}

/// Linear round progression; no cycles, no skipping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlayoffRound {
    PlayIn,
    FirstRound,
    ConferenceSemis,
    ConferenceFinals,
    Finals,
    Complete,
}

impl PlayoffRound {
    pub fn next(&self) -> Option<PlayoffRound> {
        match self {
            PlayoffRound::PlayIn => Some(PlayoffRound::FirstRound),
            PlayoffRound::FirstRound => Some(PlayoffRound::ConferenceSemis),
            PlayoffRound::ConferenceSemis => Some(PlayoffRound::ConferenceFinals),
            PlayoffRound::ConferenceFinals => Some(PlayoffRound::Finals),
            PlayoffRound::Finals => Some(PlayoffRound::Complete),
            PlayoffRound::Complete => None,
        }
    }
}

impl fmt::Display for PlayoffRound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            PlayoffRound::PlayIn => "play-in",
            PlayoffRound::FirstRound => "first round",
            PlayoffRound::ConferenceSemis => "conference semifinals",
            PlayoffRound::ConferenceFinals => "conference finals",
            PlayoffRound::Finals => "finals",
            PlayoffRound::Complete => "complete",
        };
        f.write_str(label)
    }
}

/// One team's seeding entry: dense 1..=15 within its conference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeededTeam {
    pub team_id: Uuid,
    pub name: String,
    pub conference: Conference,
    pub seed: u8,
    pub wins: u16,
    pub losses: u16,
}

/// A best-of-7 series, or a one-game play-in framed as a minimal series.
/// The home side is the better-seeded entrant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayoffSeries {
    pub id: Uuid,
    pub round: PlayoffRound,
    /// `None` only for the finals, which cross conferences.
    pub conference: Option<Conference>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_wins: u8,
    pub away_wins: u8,
    pub game_ids: Vec<Uuid>,
    pub is_complete: bool,
    pub winner_id: Option<Uuid>,
}

impl PlayoffSeries {
    pub fn best_of_seven(
        round: PlayoffRound,
        conference: Option<Conference>,
        home_team_id: Uuid,
        away_team_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            conference,
            home_team_id,
            away_team_id,
            home_wins: 0,
            away_wins: 0,
            game_ids: Vec::new(),
            is_complete: false,
            winner_id: None,
        }
    }

    pub fn play_in(conference: Conference, home_team_id: Uuid, away_team_id: Uuid) -> Self {
        Self::best_of_seven(PlayoffRound::PlayIn, Some(conference), home_team_id, away_team_id)
    }

    /// 1 for play-in games, 4 everywhere else.
    pub fn wins_needed(&self) -> u8 {
        if self.round == PlayoffRound::PlayIn {
            1
        } else {
            4
        }
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn loser_id(&self) -> Option<Uuid> {
        self.winner_id.map(|w| {
            if w == self.home_team_id {
                self.away_team_id
            } else {
                self.home_team_id
            }
        })
    }

    /// Fold a decided game into the series. Completion happens the instant
    /// either counter reaches `wins_needed()`.
    pub fn record_game(&mut self, game: &Game) -> Result<(), SimError> {
        if self.is_complete {
            return Err(SimError::SeriesComplete(self.id));
        }
        if game.series_id != Some(self.id) {
            return Err(SimError::SeriesMismatch(self.id));
        }
        let winner = game.winner_id().ok_or(SimError::GameNotPlayed(game.id))?;
        if !self.involves(game.home_team_id) || !self.involves(game.away_team_id) {
            return Err(SimError::SeriesMismatch(self.id));
        }

        if winner == self.home_team_id {
            self.home_wins += 1;
        } else {
            self.away_wins += 1;
        }
        self.game_ids.push(game.id);

        let needed = self.wins_needed();
        if self.home_wins == needed {
            self.is_complete = true;
            self.winner_id = Some(self.home_team_id);
        } else if self.away_wins == needed {
            self.is_complete = true;
            self.winner_id = Some(self.away_team_id);
        }
        Ok(())
    }
}

/// The full postseason aggregate for one season.
///
/// `play_in` is generated with exactly 4 one-game series (7v8 and 9v10 per
/// conference); the two synthesized second-chance games are appended once
/// their inputs decide, growing the list to 6.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayoffBracket {
    pub season_id: Uuid,
    pub seeds: Vec<SeededTeam>,
    pub play_in: Vec<PlayoffSeries>,
    pub first_round: Vec<PlayoffSeries>,
    pub conference_semis: Vec<PlayoffSeries>,
    pub conference_finals: Vec<PlayoffSeries>,
    pub finals: Vec<PlayoffSeries>,
    pub current_round: PlayoffRound,
}

impl PlayoffBracket {
    /// Series list for the round `current_round` points at. Empty once the
    /// bracket is complete.
    pub fn current_series(&self) -> &[PlayoffSeries] {
        self.round_series(self.current_round)
    }

    pub fn round_series(&self, round: PlayoffRound) -> &[PlayoffSeries] {
        match round {
            PlayoffRound::PlayIn => &self.play_in,
            PlayoffRound::FirstRound => &self.first_round,
            PlayoffRound::ConferenceSemis => &self.conference_semis,
            PlayoffRound::ConferenceFinals => &self.conference_finals,
            PlayoffRound::Finals => &self.finals,
            PlayoffRound::Complete => &[],
        }
    }

    pub(crate) fn round_series_mut(&mut self, round: PlayoffRound) -> &mut Vec<PlayoffSeries> {
        match round {
            PlayoffRound::PlayIn => &mut self.play_in,
            PlayoffRound::FirstRound => &mut self.first_round,
            PlayoffRound::ConferenceSemis => &mut self.conference_semis,
            PlayoffRound::ConferenceFinals => &mut self.conference_finals,
            PlayoffRound::Finals => &mut self.finals,
            PlayoffRound::Complete => &mut self.finals,
        }
    }

    pub fn series(&self, series_id: Uuid) -> Option<&PlayoffSeries> {
        self.all_series().find(|s| s.id == series_id)
    }

    pub fn all_series(&self) -> impl Iterator<Item = &PlayoffSeries> {
        self.play_in
            .iter()
            .chain(self.first_round.iter())
            .chain(self.conference_semis.iter())
            .chain(self.conference_finals.iter())
            .chain(self.finals.iter())
    }

    pub fn seed_entry(&self, team_id: Uuid) -> Option<&SeededTeam> {
        self.seeds.iter().find(|s| s.team_id == team_id)
    }

    /// Original seed number for a team, used for reseeding between rounds.
    pub fn seed_of(&self, team_id: Uuid) -> Option<u8> {
        self.seed_entry(team_id).map(|s| s.seed)
    }

    /// The finals winner, once there is one.
    pub fn champion(&self) -> Option<Uuid> {
        self.finals.iter().find(|s| s.is_complete).and_then(|s| s.winner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::GameResult;
    use std::collections::HashMap;

    fn decided_game(series: &PlayoffSeries, home_wins: bool) -> Game {
        let game = Game::playoff(series.home_team_id, series.away_team_id, series.id);
        let (h, a) = if home_wins { (100, 90) } else { (90, 100) };
        game.with_result(&GameResult {
            home_score: h,
            away_score: a,
            box_score: Default::default(),
            overtimes: 0,
            home_possessions: 96,
            away_possessions: 95,
            experience: HashMap::new(),
        })
    }

    #[test]
    fn series_completes_exactly_at_four_wins() {
        let mut series = PlayoffSeries::best_of_seven(
            PlayoffRound::FirstRound,
            Some(Conference::East),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        for i in 0..3 {
            series.record_game(&decided_game(&series, true)).unwrap();
            assert!(!series.is_complete, "not complete after {} wins", i + 1);
            assert!(series.winner_id.is_none());
        }
        series.record_game(&decided_game(&series, false)).unwrap();
        assert!(!series.is_complete, "3-1 is not complete");
        series.record_game(&decided_game(&series, true)).unwrap();
        assert!(series.is_complete);
        assert_eq!(series.winner_id, Some(series.home_team_id));
        assert_eq!(series.game_ids.len(), 5);
    }

    #[test]
    fn completed_series_rejects_further_games() {
        let mut series =
            PlayoffSeries::play_in(Conference::West, Uuid::new_v4(), Uuid::new_v4());
        series.record_game(&decided_game(&series, true)).unwrap();
        assert!(series.is_complete, "play-in completes after one game");
        let err = series.record_game(&decided_game(&series, true)).unwrap_err();
        assert!(matches!(err, SimError::SeriesComplete(_)));
    }

    #[test]
    fn unplayed_game_is_rejected() {
        let mut series =
            PlayoffSeries::play_in(Conference::East, Uuid::new_v4(), Uuid::new_v4());
        let game = Game::playoff(series.home_team_id, series.away_team_id, series.id);
        assert!(matches!(series.record_game(&game), Err(SimError::GameNotPlayed(_))));
    }

    #[test]
    fn foreign_game_is_rejected() {
        let mut series =
            PlayoffSeries::play_in(Conference::East, Uuid::new_v4(), Uuid::new_v4());
        let other = PlayoffSeries::play_in(Conference::West, Uuid::new_v4(), Uuid::new_v4());
        let game = decided_game(&other, true);
        assert!(matches!(series.record_game(&game), Err(SimError::SeriesMismatch(_))));
    }

    #[test]
    fn round_progression_is_linear() {
        let mut round = PlayoffRound::PlayIn;
        let expected = [
            PlayoffRound::FirstRound,
            PlayoffRound::ConferenceSemis,
            PlayoffRound::ConferenceFinals,
            PlayoffRound::Finals,
            PlayoffRound::Complete,
        ];
        for next in expected {
            round = round.next().unwrap();
            assert_eq!(round, next);
        }
        assert_eq!(round.next(), None);
    }
}
