//! Rotation management: preset generation and in-game substitution
//! bookkeeping.
//!
//! `generate_preset` is a pure function from a ranked roster to a valid
//! `RotationConfig`. `RotationSchedule` is the runtime side: it tracks
//! cumulative on-court seconds per player and, at each substitution window,
//! puts the player with the most remaining target time on the floor. A
//! fouled-out player is ruled out for the rest of the game and replaced
//! immediately.

use crate::error::{Result, SimError};
use crate::models::player::Position;
use crate::models::rotation::{DepthChartEntry, RotationConfig, GAME_MINUTES};
use crate::models::team::Team;

pub const SUPPORTED_PRESET_SIZES: [u8; 4] = [6, 8, 9, 10];

/// Fixed backup minutes per supported rotation size. A position with a
/// backup splits its 48 minutes starter/backup; positions without one keep
/// the starter on for the full 48.
fn bench_minutes(size: u8) -> u8 {
    match size {
        6 => 12,
        8 => 14,
        9 => 15,
        _ => 16,
    }
}

/// Build a rotation preset from a roster: rank players by aggregate rating,
/// fill the five starting slots first, then the bench by rank, and
/// distribute minutes with a fixed starter/bench split so every position
/// sums to exactly 48.
pub fn generate_preset(size: u8, roster: &[crate::models::Player]) -> Result<RotationConfig> {
    if !SUPPORTED_PRESET_SIZES.contains(&size) {
        return Err(SimError::UnsupportedRotationSize(size));
    }
    if roster.len() < size as usize {
        return Err(SimError::RosterTooSmall { needed: size as usize, found: roster.len() });
    }

    // Rank by overall, name as the deterministic tie-break.
    let mut ranked: Vec<usize> = (0..roster.len()).collect();
    ranked.sort_by(|&a, &b| {
        roster[b]
            .overall()
            .cmp(&roster[a].overall())
            .then_with(|| roster[a].name.cmp(&roster[b].name))
    });

    // Starters: best available at each position, best remaining player for
    // any slot nobody covers naturally.
    let mut taken = vec![false; roster.len()];
    let mut starters: [Option<usize>; 5] = [None; 5];
    for position in Position::ALL {
        let slot = position.index();
        if let Some(&idx) = ranked
            .iter()
            .find(|&&i| !taken[i] && roster[i].position == position)
        {
            starters[slot] = Some(idx);
            taken[idx] = true;
        }
    }
    for position in Position::ALL {
        let slot = position.index();
        if starters[slot].is_none() {
            let idx = *ranked
                .iter()
                .find(|&&i| !taken[i])
                .expect("roster size checked above");
            starters[slot] = Some(idx);
            taken[idx] = true;
        }
    }

    // Bench: next players by rank.
    let bench: Vec<usize> = ranked
        .iter()
        .copied()
        .filter(|&i| !taken[i])
        .take(size as usize - 5)
        .collect();

    // Assign each bench player a position to back up: their own when it is
    // still open, otherwise the first uncovered slot.
    let mut backed_up: [Option<usize>; 5] = [None; 5];
    for &idx in &bench {
        let natural = roster[idx].position.index();
        let slot = if backed_up[natural].is_none() {
            natural
        } else {
            (0..5)
                .find(|&s| backed_up[s].is_none())
                .expect("more positions than bench players")
        };
        backed_up[slot] = Some(idx);
    }

    let split = bench_minutes(size);
    let mut depth_chart = Vec::with_capacity(size as usize);
    let mut player_minutes = std::collections::HashMap::new();
    for position in Position::ALL {
        let slot = position.index();
        let starter = starters[slot].expect("all slots filled");
        let starter_minutes = match backed_up[slot] {
            Some(_) => GAME_MINUTES as u8 - split,
            None => GAME_MINUTES as u8,
        };
        depth_chart.push(DepthChartEntry {
            player_id: roster[starter].id,
            position,
            depth: 1,
        });
        player_minutes.insert(roster[starter].id, starter_minutes);
        if let Some(backup) = backed_up[slot] {
            depth_chart.push(DepthChartEntry {
                player_id: roster[backup].id,
                position,
                depth: 2,
            });
            player_minutes.insert(roster[backup].id, split);
        }
    }

    let config = RotationConfig { rotation_size: size, player_minutes, depth_chart };
    debug_assert!(config.validate(roster).is_empty());
    Ok(config)
}

#[derive(Debug, Clone)]
struct ScheduledPlayer {
    roster_idx: usize,
    target_secs: u32,
    depth: u8,
}

/// Runtime substitution state for one team.
#[derive(Debug, Clone)]
pub struct RotationSchedule {
    /// Eligible players per position slot, depth order.
    slots: [Vec<ScheduledPlayer>; 5],
    on_court: [usize; 5],
    seconds_played: Vec<u32>,
    ruled_out: Vec<bool>,
    /// Natural positions of the whole roster, for emergency fills.
    roster_positions: Vec<Position>,
}

impl RotationSchedule {
    /// Build from a validated rotation config. Rejects invalid configs with
    /// the full violation list; the simulator never works around one.
    pub fn from_config(config: &RotationConfig, team: &Team) -> Result<Self> {
        let violations = config.validate(&team.roster);
        if !violations.is_empty() {
            return Err(SimError::InvalidRotation(violations));
        }

        let mut slots: [Vec<ScheduledPlayer>; 5] = Default::default();
        for position in Position::ALL {
            let entries = config.entries_at(position);
            let slot = &mut slots[position.index()];
            for entry in entries {
                let roster_idx = team
                    .roster_index(entry.player_id)
                    .expect("validated against roster");
                slot.push(ScheduledPlayer {
                    roster_idx,
                    target_secs: u32::from(config.minutes_for(entry.player_id)) * 60,
                    depth: entry.depth,
                });
            }
        }

        let mut schedule = Self {
            slots,
            // Sentinel occupants so the first checkpoint cannot mistake a
            // real roster index for an already-filled slot.
            on_court: [usize::MAX; 5],
            seconds_played: vec![0; team.roster.len()],
            ruled_out: vec![false; team.roster.len()],
            roster_positions: team.roster.iter().map(|p| p.position).collect(),
        };
        schedule.checkpoint();
        Ok(schedule)
    }

    /// Static five for teams without a rotation config: the starters play
    /// the entire game.
    pub fn from_starters(team: &Team) -> Result<Self> {
        let starters = team.starter_indices()?;
        let mut slots: [Vec<ScheduledPlayer>; 5] = Default::default();
        for (slot, &roster_idx) in starters.iter().enumerate() {
            slots[slot].push(ScheduledPlayer {
                roster_idx,
                target_secs: GAME_MINUTES as u32 * 60,
                depth: 1,
            });
        }
        Ok(Self {
            slots,
            on_court: starters,
            seconds_played: vec![0; team.roster.len()],
            ruled_out: vec![false; team.roster.len()],
            roster_positions: team.roster.iter().map(|p| p.position).collect(),
        })
    }

    pub fn on_court(&self) -> [usize; 5] {
        self.on_court
    }

    pub fn is_on_court(&self, roster_idx: usize) -> bool {
        self.on_court.contains(&roster_idx)
    }

    pub fn seconds_played(&self, roster_idx: usize) -> u32 {
        self.seconds_played[roster_idx]
    }

    /// Accrue elapsed game time to the five on the floor.
    pub fn add_seconds(&mut self, secs: u32) {
        for &idx in &self.on_court {
            self.seconds_played[idx] += secs;
        }
    }

    /// Substitution window: per slot, put the eligible player with the most
    /// remaining target time on the floor (lower depth wins ties).
    pub fn checkpoint(&mut self) {
        for slot in 0..5 {
            if let Some(idx) = self.pick_for_slot(slot) {
                self.on_court[slot] = idx;
            }
        }
    }

    /// Rule a player out for the rest of the game (foul-out). If they are
    /// on the floor the slot is refilled immediately.
    pub fn rule_out(&mut self, roster_idx: usize) {
        self.ruled_out[roster_idx] = true;
        if let Some(slot) = (0..5).find(|&s| self.on_court[s] == roster_idx) {
            match self.pick_for_slot(slot) {
                Some(replacement) => self.on_court[slot] = replacement,
                None => {
                    if let Some(replacement) = self.emergency_fill(slot) {
                        self.on_court[slot] = replacement;
                    }
                    // A roster with nobody left keeps the fouled-out player
                    // on paper; the box score already reflects reality.
                }
            }
        }
    }

    fn pick_for_slot(&self, slot: usize) -> Option<usize> {
        let mut best: Option<(&ScheduledPlayer, i64)> = None;
        for candidate in &self.slots[slot] {
            if self.ruled_out[candidate.roster_idx] {
                continue;
            }
            // The same player never appears in two slots (validated), but an
            // emergency fill may borrow someone; skip anyone already placed
            // at another slot.
            if (0..5).any(|s| s != slot && self.on_court[s] == candidate.roster_idx) {
                continue;
            }
            let remaining =
                i64::from(candidate.target_secs) - i64::from(self.seconds_played[candidate.roster_idx]);
            let better = match best {
                None => true,
                Some((current, best_remaining)) => {
                    remaining > best_remaining
                        || (remaining == best_remaining && candidate.depth < current.depth)
                }
            };
            if better {
                best = Some((candidate, remaining));
            }
        }
        best.map(|(p, _)| p.roster_idx)
    }

    /// Last resort when a slot's whole depth chart is ruled out: any
    /// available roster player, same natural position preferred.
    fn emergency_fill(&self, slot: usize) -> Option<usize> {
        let position = Position::ALL[slot];
        let available = |idx: &usize| -> bool {
            !self.ruled_out[*idx] && !self.on_court.contains(idx)
        };
        (0..self.roster_positions.len())
            .filter(available)
            .find(|&idx| self.roster_positions[idx] == position)
            .or_else(|| (0..self.roster_positions.len()).find(available))
    }

    /// Player ids are not tracked here; callers map roster indices back.
    pub fn roster_len(&self) -> usize {
        self.seconds_played.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Player, PlayerAttributes};
    use crate::models::playoffs::Conference;
    use crate::models::rotation::TOTAL_ROTATION_MINUTES;
    use crate::models::team::Team;

    fn roster(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                // Spread of ratings so ranking is non-trivial.
                let rating = 80u8.saturating_sub((i * 3) as u8);
                Player::new(
                    format!("Player {i:02}"),
                    Position::ALL[i % 5],
                    PlayerAttributes::uniform(rating),
                )
            })
            .collect()
    }

    fn team(n: usize) -> Team {
        let roster = roster(n);
        let lineup = [roster[0].id, roster[1].id, roster[2].id, roster[3].id, roster[4].id];
        Team::new("Test", Conference::East, roster, lineup)
    }

    #[test]
    fn presets_are_valid_for_every_supported_size() {
        let roster = roster(14);
        for size in SUPPORTED_PRESET_SIZES {
            let config = generate_preset(size, &roster).unwrap();
            assert_eq!(config.rotation_size, size);
            assert_eq!(config.depth_chart.len(), size as usize);
            assert!(config.validate(&roster).is_empty(), "size {size} preset invalid");
            let total: u16 = config
                .depth_chart
                .iter()
                .map(|e| u16::from(config.minutes_for(e.player_id)))
                .sum();
            assert_eq!(total, TOTAL_ROTATION_MINUTES);
        }
    }

    #[test]
    fn preset_rejects_unsupported_size() {
        let roster = roster(14);
        assert!(matches!(
            generate_preset(7, &roster),
            Err(SimError::UnsupportedRotationSize(7))
        ));
        assert!(matches!(
            generate_preset(11, &roster),
            Err(SimError::UnsupportedRotationSize(11))
        ));
    }

    #[test]
    fn preset_rejects_short_roster() {
        let roster = roster(8);
        assert!(matches!(
            generate_preset(10, &roster),
            Err(SimError::RosterTooSmall { needed: 10, found: 8 })
        ));
    }

    #[test]
    fn preset_starters_are_the_best_at_their_positions() {
        let roster = roster(15);
        let config = generate_preset(10, &roster).unwrap();
        for position in Position::ALL {
            let entries = config.entries_at(position);
            assert_eq!(entries.len(), 2, "size 10 backs up every position");
            let starter = roster.iter().find(|p| p.id == entries[0].player_id).unwrap();
            let backup = roster.iter().find(|p| p.id == entries[1].player_id).unwrap();
            assert!(starter.overall() >= backup.overall());
        }
    }

    #[test]
    fn schedule_rejects_invalid_config() {
        let team = team(13);
        let mut config = generate_preset(8, &team.roster).unwrap();
        let starter = config.depth_chart[0].player_id;
        config.player_minutes.insert(starter, 10); // breaks the position sum
        let err = RotationSchedule::from_config(&config, &team).unwrap_err();
        assert!(matches!(err, SimError::InvalidRotation(_)));
    }

    #[test]
    fn schedule_tracks_toward_minute_targets() {
        let mut team = team(14);
        let config = generate_preset(9, &team.roster).unwrap();
        team.rotation = Some(config.clone());
        let mut schedule = RotationSchedule::from_config(&config, &team).unwrap();

        // Eight 6-minute windows: checkpoint, then accrue.
        for _ in 0..8 {
            schedule.checkpoint();
            schedule.add_seconds(360);
        }

        // Every slot put exactly 48 minutes on the floor.
        let mut slot_totals = [0u32; 5];
        for entry in &config.depth_chart {
            let idx = team.roster_index(entry.player_id).unwrap();
            slot_totals[entry.position.index()] += schedule.seconds_played(idx);
        }
        for total in slot_totals {
            assert_eq!(total, 48 * 60);
        }

        // No rotation player missed their target by more than one window.
        for entry in &config.depth_chart {
            let idx = team.roster_index(entry.player_id).unwrap();
            let target = u32::from(config.minutes_for(entry.player_id)) * 60;
            let played = schedule.seconds_played(idx);
            let gap = target.abs_diff(played);
            assert!(
                gap <= 360,
                "player at {} depth {} played {played}s against target {target}s",
                entry.position,
                entry.depth
            );
        }
    }

    #[test]
    fn static_five_plays_the_whole_game() {
        let team = team(13);
        let mut schedule = RotationSchedule::from_starters(&team).unwrap();
        let starters = schedule.on_court();
        for _ in 0..8 {
            schedule.checkpoint();
            schedule.add_seconds(360);
        }
        assert_eq!(schedule.on_court(), starters);
        for idx in starters {
            assert_eq!(schedule.seconds_played(idx), 48 * 60);
        }
    }

    #[test]
    fn fouled_out_player_is_replaced_and_never_returns() {
        let mut team = team(14);
        let config = generate_preset(10, &team.roster).unwrap();
        team.rotation = Some(config.clone());
        let mut schedule = RotationSchedule::from_config(&config, &team).unwrap();

        let victim = schedule.on_court()[0];
        schedule.rule_out(victim);
        assert_ne!(schedule.on_court()[0], victim);
        for _ in 0..8 {
            schedule.checkpoint();
            assert!(!schedule.is_on_court(victim));
            schedule.add_seconds(360);
        }
    }
}
