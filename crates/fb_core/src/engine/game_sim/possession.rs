//! Possession resolution: focal-player selection and the turnover branch.
//!
//! A possession either dies on a turnover here or goes up as a shot in
//! `shooting.rs`. Rebound handling lives in `rebounding.rs`.

use super::{GameEngine, Side};
use crate::engine::probability;
use crate::models::player::Position;

/// What one possession produced.
#[derive(Debug, Clone, Copy)]
pub struct PossessionOutcome {
    pub points: u16,
    /// Offense keeps the ball (offensive rebound).
    pub retained: bool,
}

impl PossessionOutcome {
    pub(crate) fn scored(points: u16) -> Self {
        Self { points, retained: false }
    }

    pub(crate) fn empty() -> Self {
        Self { points: 0, retained: false }
    }

    pub(crate) fn retained() -> Self {
        Self { points: 0, retained: true }
    }
}

impl GameEngine {
    pub(crate) fn run_possession(&mut self, offense: Side) -> PossessionOutcome {
        self.count_possession(offense);

        let off_five = self.on_court(offense);
        let def_five = self.on_court(offense.other());
        let focal_slot = self.pick_focal(offense, &off_five);
        let focal_idx = off_five[focal_slot];

        // Turnover before a shot goes up?
        let def_attrs = self.five_attrs(offense.other(), &def_five);
        let pressure = probability::defensive_pressure(&def_attrs.iter().collect::<Vec<_>>());
        let handler = self.attrs(offense, focal_idx);
        let turnover_p = probability::turnover_probability(
            &handler,
            pressure,
            self.modifiers(offense).turnover_mult,
            self.tuning(),
        );
        if self.chance(turnover_p) {
            self.line_mut(offense, focal_idx).turnovers += 1;
            let steal_share = self.tuning().steal_share_of_turnovers;
            if self.chance(steal_share) {
                let stealer_slot = self.pick_stealer(offense.other(), &def_five);
                self.line_mut(offense.other(), def_five[stealer_slot]).steals += 1;
            }
            return PossessionOutcome::empty();
        }

        self.resolve_shot(offense, focal_slot, off_five, def_five)
    }

    /// Pick the offensive focal player, weighted by role-appropriate
    /// scoring attributes.
    fn pick_focal(&mut self, offense: Side, five: &[usize; 5]) -> usize {
        let weights: Vec<f32> = five
            .iter()
            .enumerate()
            .map(|(slot, &idx)| {
                let attrs = self.attrs(offense, idx);
                probability::focal_weight(&attrs, Position::ALL[slot])
            })
            .collect();
        self.weighted_pick(&weights)
    }

    fn pick_stealer(&mut self, defense: Side, five: &[usize; 5]) -> usize {
        let weights: Vec<f32> = five
            .iter()
            .map(|&idx| {
                let attrs = self.attrs(defense, idx);
                0.1 + crate::engine::tuning::ratings::normalize(attrs.steals)
            })
            .collect();
        self.weighted_pick(&weights)
    }
}
