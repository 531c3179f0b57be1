//! Rebound resolution after a missed attempt.

use super::possession::PossessionOutcome;
use super::{GameEngine, Side};
use crate::engine::probability;
use crate::engine::tuning::ratings;

impl GameEngine {
    /// Split the board between the teams, then attribute it to a
    /// rebounding-weighted individual. Frontcourt weighting comes from the
    /// attribute itself; centers carry high rebounding ratings.
    pub(crate) fn resolve_rebound(&mut self, offense: Side) -> PossessionOutcome {
        let defense = offense.other();
        let off_five = self.on_court(offense);
        let def_five = self.on_court(defense);

        let off_attrs = self.five_attrs(offense, &off_five);
        let def_attrs = self.five_attrs(defense, &def_five);
        let offense_strength =
            probability::team_rebounding(&off_attrs.iter().collect::<Vec<_>>());
        let defense_strength =
            probability::team_rebounding(&def_attrs.iter().collect::<Vec<_>>());

        let or_p = probability::offensive_rebound_probability(
            offense_strength,
            defense_strength,
            self.modifiers(offense).rebounding_mult,
            self.modifiers(defense).rebounding_mult,
            self.tuning(),
        );

        if self.chance(or_p) {
            let slot = self.pick_rebounder(offense, &off_five);
            self.line_mut(offense, off_five[slot]).offensive_rebounds += 1;
            PossessionOutcome::retained()
        } else {
            let slot = self.pick_rebounder(defense, &def_five);
            self.line_mut(defense, def_five[slot]).defensive_rebounds += 1;
            PossessionOutcome::empty()
        }
    }

    fn pick_rebounder(&mut self, side: Side, five: &[usize; 5]) -> usize {
        let weights: Vec<f32> = five
            .iter()
            .map(|&idx| {
                let attrs = self.attrs(side, idx);
                0.1 + ratings::normalize(attrs.rebounding)
            })
            .collect();
        self.weighted_pick(&weights)
    }
}
