//! Game Simulation Engine.
//!
//! Orchestrates one full contest: possession loop, substitution windows,
//! fouls, overtime and box-score recording.
//!
//! ## Architecture
//!
//! Three layers, mirrored across the engine module:
//! - `probability.rs`: stateless attribute-to-probability math
//! - `rotation.rs`: who is on the floor at any moment
//! - `game_sim/`: the stateful loop tying both to a seeded RNG
//!
//! ```text
//! [INPUT]  GamePlan { home_team, away_team, seed, modifiers, tuning }
//!    |
//!    v
//! GameEngine::new      -- validates teams and rotations, builds schedules
//!    |
//!    v
//! GameEngine::simulate -- 4 quarters x 720s of possessions; substitution
//!    |                    checkpoints at quarter starts and mid-quarter;
//!    |                    overtime periods until the scores differ
//!    v
//! [OUTPUT] GameResult { scores, BoxScore, possessions, experience }
//! ```
//!
//! | Sub-module    | Responsibility                              |
//! |---------------|---------------------------------------------|
//! | `possession`  | focal-player selection, turnover branch     |
//! | `shooting`    | shot resolution, fouls, free throws, assists|
//! | `rebounding`  | miss resolution and rebound attribution     |

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::game_modifiers::TeamGameModifiers;
use super::rotation::RotationSchedule;
use super::stats;
use super::tuning::{clock, SimTuning};
use crate::error::Result;
use crate::models::game::{BoxScore, GameResult, PlayerLine};
use crate::models::player::PlayerAttributes;
use crate::models::team::Team;

mod possession;
mod rebounding;
mod shooting;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use possession::PossessionOutcome;

/// Which bench a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Home,
    Away,
}

impl Side {
    pub(crate) fn other(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Everything needed to simulate one game. Teams are moved in; the engine
/// treats rosters as read-only for the whole simulation.
#[derive(Debug, Clone)]
pub struct GamePlan {
    pub home_team: Team,
    pub away_team: Team,
    pub seed: u64,
    pub home_modifiers: TeamGameModifiers,
    pub away_modifiers: TeamGameModifiers,
    pub is_playoff: bool,
    pub tuning: SimTuning,
}

impl GamePlan {
    pub fn new(home_team: Team, away_team: Team, seed: u64) -> Self {
        Self {
            home_team,
            away_team,
            seed,
            home_modifiers: TeamGameModifiers::default(),
            away_modifiers: TeamGameModifiers::default(),
            is_playoff: false,
            tuning: SimTuning::default(),
        }
    }
}

pub struct GameEngine {
    home: Team,
    away: Team,
    tuning: SimTuning,
    home_modifiers: TeamGameModifiers,
    away_modifiers: TeamGameModifiers,
    rng: ChaCha8Rng,
    home_schedule: RotationSchedule,
    away_schedule: RotationSchedule,
    home_lines: Vec<PlayerLine>,
    away_lines: Vec<PlayerLine>,
    home_score: u16,
    away_score: u16,
    home_possessions: u16,
    away_possessions: u16,
    overtimes: u8,
    is_playoff: bool,
}

impl GameEngine {
    /// Validates both teams (including any rotation configs) before any
    /// simulation work; a malformed rotation is rejected here, never
    /// silently substituted around.
    pub fn new(plan: GamePlan) -> Result<Self> {
        plan.home_team.validate()?;
        plan.away_team.validate()?;

        let home_schedule = match &plan.home_team.rotation {
            Some(config) => RotationSchedule::from_config(config, &plan.home_team)?,
            None => RotationSchedule::from_starters(&plan.home_team)?,
        };
        let away_schedule = match &plan.away_team.rotation {
            Some(config) => RotationSchedule::from_config(config, &plan.away_team)?,
            None => RotationSchedule::from_starters(&plan.away_team)?,
        };

        let home_lines = plan.home_team.roster.iter().map(PlayerLine::for_player).collect();
        let away_lines = plan.away_team.roster.iter().map(PlayerLine::for_player).collect();

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(plan.seed),
            home: plan.home_team,
            away: plan.away_team,
            tuning: plan.tuning,
            home_modifiers: plan.home_modifiers,
            away_modifiers: plan.away_modifiers,
            home_schedule,
            away_schedule,
            home_lines,
            away_lines,
            home_score: 0,
            away_score: 0,
            home_possessions: 0,
            away_possessions: 0,
            overtimes: 0,
            is_playoff: plan.is_playoff,
        })
    }

    /// Run the contest to completion and hand back the result. Synchronous
    /// and allocation-light; a full game resolves in well under a second.
    pub fn simulate(&mut self) -> GameResult {
        log::debug!(
            "simulating {} at {}{}",
            self.away.name,
            self.home.name,
            if self.is_playoff { " (playoff)" } else { "" }
        );

        // Opening possessions per quarter: the side losing the tip gets the
        // middle quarters.
        let quarter_openers = [Side::Home, Side::Away, Side::Away, Side::Home];
        for opener in quarter_openers.iter().take(clock::QUARTERS as usize) {
            self.run_period(clock::QUARTER_SECS, *opener, true);
        }

        // Scores never end level: play overtime periods with the lineups
        // frozen until someone leads.
        let mut ot_opener = Side::Home;
        while self.home_score == self.away_score {
            self.overtimes += 1;
            self.run_period(clock::OVERTIME_SECS, ot_opener, false);
            ot_opener = ot_opener.other();
        }

        log::debug!(
            "final {} {} - {} {} ({} OT)",
            self.home.name,
            self.home_score,
            self.away.name,
            self.away_score,
            self.overtimes
        );

        let box_score = BoxScore {
            home: std::mem::take(&mut self.home_lines),
            away: std::mem::take(&mut self.away_lines),
        };
        let result = stats::finalize(
            box_score,
            self.overtimes,
            self.home_possessions,
            self.away_possessions,
        );
        debug_assert_eq!(result.home_score, self.home_score);
        debug_assert_eq!(result.away_score, self.away_score);
        result
    }

    fn run_period(&mut self, period_secs: u32, opener: Side, allow_subs: bool) {
        if allow_subs {
            self.home_schedule.checkpoint();
            self.away_schedule.checkpoint();
        }

        let mut clock = period_secs;
        let mut offense = opener;
        let mut mid_window_done = false;
        while clock > 0 {
            if allow_subs && !mid_window_done && clock <= clock::SUB_WINDOW_SECS {
                self.home_schedule.checkpoint();
                self.away_schedule.checkpoint();
                mid_window_done = true;
            }

            let duration = self.possession_secs(offense).min(clock);
            let outcome = self.run_possession(offense);
            self.home_schedule.add_seconds(duration);
            self.away_schedule.add_seconds(duration);
            self.accrue_line_seconds(duration);
            clock -= duration;

            if !outcome.retained {
                offense = offense.other();
            }
        }
    }

    /// Length of the next possession in seconds: a bounded draw around the
    /// pace-adjusted mean.
    fn possession_secs(&mut self, offense: Side) -> u32 {
        let pace = self.modifiers(offense).pace_mult;
        let mean = self.tuning.possession_mean_secs / pace;
        let normal = Normal::new(mean, self.tuning.possession_jitter_sd)
            .unwrap_or_else(|_| Normal::new(mean, 1.0).expect("unit sd is valid"));
        let drawn = normal.sample(&mut self.rng);
        (drawn.round() as i64)
            .clamp(
                i64::from(self.tuning.possession_min_secs),
                i64::from(self.tuning.possession_max_secs),
            ) as u32
    }

    fn accrue_line_seconds(&mut self, secs: u32) {
        for &idx in &self.home_schedule.on_court() {
            self.home_lines[idx].seconds_played += secs;
        }
        for &idx in &self.away_schedule.on_court() {
            self.away_lines[idx].seconds_played += secs;
        }
    }

    // ---- side-indexed accessors -------------------------------------------

    pub(crate) fn on_court(&self, side: Side) -> [usize; 5] {
        match side {
            Side::Home => self.home_schedule.on_court(),
            Side::Away => self.away_schedule.on_court(),
        }
    }

    pub(crate) fn attrs(&self, side: Side, roster_idx: usize) -> PlayerAttributes {
        match side {
            Side::Home => self.home.roster[roster_idx].attributes,
            Side::Away => self.away.roster[roster_idx].attributes,
        }
    }

    pub(crate) fn five_attrs(&self, side: Side, five: &[usize; 5]) -> [PlayerAttributes; 5] {
        let mut out = [PlayerAttributes::default(); 5];
        for (slot, &idx) in five.iter().enumerate() {
            out[slot] = self.attrs(side, idx);
        }
        out
    }

    pub(crate) fn modifiers(&self, side: Side) -> &TeamGameModifiers {
        match side {
            Side::Home => &self.home_modifiers,
            Side::Away => &self.away_modifiers,
        }
    }

    pub(crate) fn line_mut(&mut self, side: Side, roster_idx: usize) -> &mut PlayerLine {
        match side {
            Side::Home => &mut self.home_lines[roster_idx],
            Side::Away => &mut self.away_lines[roster_idx],
        }
    }

    pub(crate) fn add_points(&mut self, side: Side, roster_idx: usize, points: u16) {
        self.line_mut(side, roster_idx).points += points;
        match side {
            Side::Home => self.home_score += points,
            Side::Away => self.away_score += points,
        }
    }

    pub(crate) fn count_possession(&mut self, side: Side) {
        match side {
            Side::Home => self.home_possessions += 1,
            Side::Away => self.away_possessions += 1,
        }
    }

    pub(crate) fn schedule_mut(&mut self, side: Side) -> &mut RotationSchedule {
        match side {
            Side::Home => &mut self.home_schedule,
            Side::Away => &mut self.away_schedule,
        }
    }

    pub(crate) fn player_name(&self, side: Side, roster_idx: usize) -> &str {
        match side {
            Side::Home => &self.home.roster[roster_idx].name,
            Side::Away => &self.away.roster[roster_idx].name,
        }
    }

    pub(crate) fn tuning(&self) -> &SimTuning {
        &self.tuning
    }

    /// Cumulative weighted pick: weights need not be normalized, and
    /// zero-weight entries are never chosen while any weight is positive.
    pub(crate) fn weighted_pick(&mut self, weights: &[f32]) -> usize {
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }
        let mut remaining = self.rng.gen::<f32>() * total;
        for (i, weight) in weights.iter().enumerate() {
            remaining -= weight;
            if remaining <= 0.0 {
                return i;
            }
        }
        weights.len() - 1
    }

    pub(crate) fn chance(&mut self, p: f32) -> bool {
        self.rng.gen::<f32>() < p
    }
}
