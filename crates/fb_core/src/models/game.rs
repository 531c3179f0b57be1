//! Game records and box scores.
//!
//! A `Game` is created unplayed (scores `None`) and completed only through
//! the `with_result` copy helper; nothing mutates a played game in place.
//! `GameResult` is the raw simulator output that gets folded into a `Game`.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::{Player, Position};

/// Per-player box-score row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerLine {
    pub player_id: Uuid,
    pub player_name: String,
    pub position: Position,
    pub seconds_played: u32,
    pub points: u16,
    pub field_goals_made: u16,
    pub field_goals_attempted: u16,
    pub three_points_made: u16,
    pub three_points_attempted: u16,
    pub free_throws_made: u16,
    pub free_throws_attempted: u16,
    pub offensive_rebounds: u16,
    pub defensive_rebounds: u16,
    pub assists: u16,
    pub steals: u16,
    pub blocks: u16,
    pub turnovers: u16,
    pub fouls: u8,
    /// Per-game experience delta, reported to development collaborators.
    /// The engine never applies it to ratings.
    pub experience: u32,
}

impl PlayerLine {
    pub fn for_player(player: &Player) -> Self {
        Self {
            player_id: player.id,
            player_name: player.name.clone(),
            position: player.position,
            ..Self::default()
        }
    }

    pub fn rebounds(&self) -> u16 {
        self.offensive_rebounds + self.defensive_rebounds
    }

    pub fn minutes(&self) -> u32 {
        self.seconds_played / 60
    }

    /// Points recomputed from made shots. Equals `points` in any
    /// consistent line.
    pub fn points_from_shots(&self) -> u16 {
        let twos = self.field_goals_made.saturating_sub(self.three_points_made);
        2 * twos + 3 * self.three_points_made + self.free_throws_made
    }
}

/// Team-level totals derived from player lines.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamTotals {
    pub points: u16,
    pub field_goals_made: u16,
    pub field_goals_attempted: u16,
    pub three_points_made: u16,
    pub three_points_attempted: u16,
    pub free_throws_made: u16,
    pub free_throws_attempted: u16,
    pub rebounds: u16,
    pub assists: u16,
    pub steals: u16,
    pub blocks: u16,
    pub turnovers: u16,
    pub fouls: u16,
}

impl TeamTotals {
    pub fn from_lines(lines: &[PlayerLine]) -> Self {
        let mut t = Self::default();
        for line in lines {
            t.points += line.points;
            t.field_goals_made += line.field_goals_made;
            t.field_goals_attempted += line.field_goals_attempted;
            t.three_points_made += line.three_points_made;
            t.three_points_attempted += line.three_points_attempted;
            t.free_throws_made += line.free_throws_made;
            t.free_throws_attempted += line.free_throws_attempted;
            t.rebounds += line.rebounds();
            t.assists += line.assists;
            t.steals += line.steals;
            t.blocks += line.blocks;
            t.turnovers += line.turnovers;
            t.fouls += u16::from(line.fouls);
        }
        t
    }
}

/// Full two-sided box score. Lines are ordered by roster slot and include
/// every roster player (zeroed rows for those who did not play).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoxScore {
    pub home: Vec<PlayerLine>,
    pub away: Vec<PlayerLine>,
}

impl BoxScore {
    pub fn home_totals(&self) -> TeamTotals {
        TeamTotals::from_lines(&self.home)
    }

    pub fn away_totals(&self) -> TeamTotals {
        TeamTotals::from_lines(&self.away)
    }

    /// Internal-consistency check: attempts cover makes and points
    /// reconcile with made shots, on both sides.
    pub fn is_consistent(&self) -> bool {
        [&self.home, &self.away].iter().all(|lines| {
            lines.iter().all(|l| {
                l.field_goals_attempted >= l.field_goals_made
                    && l.three_points_attempted >= l.three_points_made
                    && l.field_goals_made >= l.three_points_made
                    && l.free_throws_attempted >= l.free_throws_made
                    && l.points == l.points_from_shots()
            })
        })
    }
}

/// Raw simulator output for one contest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameResult {
    pub home_score: u16,
    pub away_score: u16,
    pub box_score: BoxScore,
    pub overtimes: u8,
    pub home_possessions: u16,
    pub away_possessions: u16,
    /// Experience deltas keyed by player id (both rosters).
    pub experience: HashMap<Uuid, u32>,
}

/// One scheduled or completed contest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_score: Option<BoxScore>,
    pub is_playoff_game: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<NaiveDate>,
    #[serde(default)]
    pub overtimes: u8,
}

impl Game {
    /// A regular-season game, unplayed.
    pub fn scheduled(home_team_id: Uuid, away_team_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team_id,
            away_team_id,
            home_score: None,
            away_score: None,
            box_score: None,
            is_playoff_game: false,
            series_id: None,
            scheduled_for: None,
            overtimes: 0,
        }
    }

    /// A playoff game attached to a series.
    pub fn playoff(home_team_id: Uuid, away_team_id: Uuid, series_id: Uuid) -> Self {
        Self {
            is_playoff_game: true,
            series_id: Some(series_id),
            ..Self::scheduled(home_team_id, away_team_id)
        }
    }

    pub fn with_date(self, date: NaiveDate) -> Self {
        Self { scheduled_for: Some(date), ..self }
    }

    /// Copy-with-result helper: the only way a game acquires scores.
    pub fn with_result(&self, result: &GameResult) -> Self {
        Self {
            home_score: Some(result.home_score),
            away_score: Some(result.away_score),
            box_score: Some(result.box_score.clone()),
            overtimes: result.overtimes,
            ..self.clone()
        }
    }

    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    pub fn winner_id(&self) -> Option<Uuid> {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) if h > a => Some(self.home_team_id),
            (Some(h), Some(a)) if a > h => Some(self.away_team_id),
            _ => None,
        }
    }

    pub fn loser_id(&self) -> Option<Uuid> {
        self.winner_id().map(|w| {
            if w == self.home_team_id {
                self.away_team_id
            } else {
                self.home_team_id
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: u16, fgm: u16, fga: u16, tpm: u16, tpa: u16, ftm: u16, fta: u16) -> PlayerLine {
        PlayerLine {
            points,
            field_goals_made: fgm,
            field_goals_attempted: fga,
            three_points_made: tpm,
            three_points_attempted: tpa,
            free_throws_made: ftm,
            free_throws_attempted: fta,
            ..PlayerLine::default()
        }
    }

    #[test]
    fn points_reconcile_with_made_shots() {
        // 4 twos, 2 threes, 3 free throws = 17 points.
        let l = line(17, 6, 13, 2, 5, 3, 4);
        assert_eq!(l.points_from_shots(), 17);
        let b = BoxScore { home: vec![l], away: vec![] };
        assert!(b.is_consistent());
    }

    #[test]
    fn inconsistent_line_is_detected() {
        let l = line(18, 6, 13, 2, 5, 3, 4); // one point too many
        let b = BoxScore { home: vec![l], away: vec![] };
        assert!(!b.is_consistent());
    }

    #[test]
    fn with_result_does_not_touch_identity() {
        let game = Game::scheduled(Uuid::new_v4(), Uuid::new_v4());
        let result = GameResult {
            home_score: 101,
            away_score: 94,
            box_score: BoxScore::default(),
            overtimes: 0,
            home_possessions: 98,
            away_possessions: 97,
            experience: HashMap::new(),
        };
        let played = game.with_result(&result);
        assert_eq!(played.id, game.id);
        assert_eq!(played.winner_id(), Some(game.home_team_id));
        assert!(!game.is_played(), "original stays unplayed");
        assert!(played.is_played());
    }

    #[test]
    fn game_serde_round_trip_preserves_every_field() {
        let result = GameResult {
            home_score: 113,
            away_score: 108,
            box_score: BoxScore { home: vec![line(17, 6, 13, 2, 5, 3, 4)], away: vec![] },
            overtimes: 1,
            home_possessions: 101,
            away_possessions: 100,
            experience: HashMap::from([(Uuid::new_v4(), 31)]),
        };
        let game = Game::playoff(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
            .with_date(chrono::NaiveDate::from_ymd_opt(2026, 4, 18).unwrap())
            .with_result(&result);
        let json = serde_json::to_string(&game).unwrap();
        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game);
    }
}
