//! Shot resolution: shot class, fouls and free throws, blocks, makes and
//! assist attribution.

use super::possession::PossessionOutcome;
use super::{GameEngine, Side};
use crate::engine::probability;
use crate::engine::tuning::{ratings, FOUL_LIMIT};

impl GameEngine {
    pub(crate) fn resolve_shot(
        &mut self,
        offense: Side,
        focal_slot: usize,
        off_five: [usize; 5],
        def_five: [usize; 5],
    ) -> PossessionOutcome {
        let defense = offense.other();
        let shooter_idx = off_five[focal_slot];
        let shooter = self.attrs(offense, shooter_idx);

        let is_three = {
            let share = probability::three_point_share(&shooter, self.tuning());
            self.chance(share)
        };

        // The positional matchup contests the shot; team defense helps.
        let defender_idx = def_five[focal_slot];
        let defender = self.attrs(defense, defender_idx);
        let def_attrs = self.five_attrs(defense, &def_five);
        let team_defense = probability::team_defense(&def_attrs.iter().collect::<Vec<_>>());

        // Shooting foul before the release: free-throw trip, no attempt
        // charged.
        let foul_p = probability::foul_probability(&defender, is_three, self.tuning());
        if self.chance(foul_p) {
            self.charge_foul(defense, defender_idx);
            let trips = if is_three { 3 } else { 2 };
            let made = self.shoot_free_throws(offense, shooter_idx, trips);
            return PossessionOutcome::scored(made);
        }

        {
            let line = self.line_mut(offense, shooter_idx);
            line.field_goals_attempted += 1;
            if is_three {
                line.three_points_attempted += 1;
            }
        }

        let block_p = probability::block_probability(&defender, is_three, self.tuning());
        if self.chance(block_p) {
            self.line_mut(defense, defender_idx).blocks += 1;
            return self.resolve_rebound(offense);
        }

        let contest = probability::contest_strength(&defender, team_defense);
        let modifiers = *self.modifiers(offense);
        let make_p = probability::shot_make_probability(
            &shooter,
            contest,
            is_three,
            modifiers.shooting_mult,
            modifiers.three_point_mult,
            self.tuning(),
        );
        if self.chance(make_p) {
            let points: u16 = if is_three { 3 } else { 2 };
            {
                let line = self.line_mut(offense, shooter_idx);
                line.field_goals_made += 1;
                if is_three {
                    line.three_points_made += 1;
                }
            }
            self.add_points(offense, shooter_idx, points);
            self.maybe_credit_assist(offense, focal_slot, &off_five);
            return PossessionOutcome::scored(points);
        }

        self.resolve_rebound(offense)
    }

    /// A trip to the line. The ball goes back to the defense afterwards;
    /// the engine does not model a live rebound off the final attempt.
    fn shoot_free_throws(&mut self, offense: Side, shooter_idx: usize, trips: u16) -> u16 {
        let shooter = self.attrs(offense, shooter_idx);
        let ft_p = probability::free_throw_probability(
            &shooter,
            self.modifiers(offense).free_throw_mult,
            self.tuning(),
        );
        let mut made = 0u16;
        for _ in 0..trips {
            self.line_mut(offense, shooter_idx).free_throws_attempted += 1;
            if self.chance(ft_p) {
                self.line_mut(offense, shooter_idx).free_throws_made += 1;
                self.add_points(offense, shooter_idx, 1);
                made += 1;
            }
        }
        made
    }

    /// Personal foul bookkeeping; the sixth rules the player out and the
    /// rotation refills the slot immediately.
    pub(crate) fn charge_foul(&mut self, side: Side, roster_idx: usize) {
        let fouls = {
            let line = self.line_mut(side, roster_idx);
            line.fouls += 1;
            line.fouls
        };
        if fouls >= FOUL_LIMIT {
            log::debug!("{} fouled out", self.player_name(side, roster_idx));
            self.schedule_mut(side).rule_out(roster_idx);
        }
    }

    /// Made baskets often come off a pass; credit a passing-weighted
    /// teammate, never the scorer.
    fn maybe_credit_assist(&mut self, offense: Side, scorer_slot: usize, five: &[usize; 5]) {
        let assist_rate = self.tuning().assist_rate;
        if !self.chance(assist_rate) {
            return;
        }
        let weights: Vec<f32> = five
            .iter()
            .enumerate()
            .map(|(slot, &idx)| {
                if slot == scorer_slot {
                    return 0.0;
                }
                let attrs = self.attrs(offense, idx);
                0.1 + ratings::normalize(attrs.passing)
            })
            .collect();
        let assister_slot = self.weighted_pick(&weights);
        if assister_slot != scorer_slot {
            self.line_mut(offense, five[assister_slot]).assists += 1;
        }
    }
}
