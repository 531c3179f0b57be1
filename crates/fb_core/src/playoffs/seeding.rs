//! Seeding: regular-season records to dense per-conference seeds.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{Result, SimError};
use crate::models::game::Game;
use crate::models::playoffs::SeededTeam;
use crate::models::team::Team;

/// Compute dense seeds 1..N within each conference.
///
/// Ordering: wins descending, win percentage descending, then team name
/// ascending as the final deterministic tie-break, so the result is a total
/// order with no duplicate seeds.
///
/// Precondition: callers pass a season whose regular-season games are all
/// played. Unplayed games are skipped, not counted; computing seeds
/// mid-season silently yields a partial ranking, and detecting that is the
/// season collaborator's job, not this calculator's.
pub fn compute_seeds(teams: &[Team], games: &[Game]) -> Result<Vec<SeededTeam>> {
    let mut records: HashMap<Uuid, (u16, u16)> = teams.iter().map(|t| (t.id, (0, 0))).collect();

    for game in games {
        if game.is_playoff_game || !game.is_played() {
            continue;
        }
        // Simulated games never tie; skip rather than panic on foreign data.
        let (Some(winner), Some(loser)) = (game.winner_id(), game.loser_id()) else {
            continue;
        };
        records
            .get_mut(&winner)
            .ok_or(SimError::UnknownTeam(winner))?
            .0 += 1;
        records
            .get_mut(&loser)
            .ok_or(SimError::UnknownTeam(loser))?
            .1 += 1;
    }

    let mut seeded = Vec::with_capacity(teams.len());
    for conference in crate::models::playoffs::Conference::ALL {
        let mut conference_teams: Vec<&Team> =
            teams.iter().filter(|t| t.conference == conference).collect();
        conference_teams.sort_by(|a, b| {
            let (aw, al) = records[&a.id];
            let (bw, bl) = records[&b.id];
            bw.cmp(&aw)
                .then_with(|| win_pct(bw, bl).total_cmp(&win_pct(aw, al)))
                .then_with(|| a.name.cmp(&b.name))
        });
        for (i, team) in conference_teams.iter().enumerate() {
            let (wins, losses) = records[&team.id];
            seeded.push(SeededTeam {
                team_id: team.id,
                name: team.name.clone(),
                conference,
                seed: (i + 1) as u8,
                wins,
                losses,
            });
        }
    }
    Ok(seeded)
}

fn win_pct(wins: u16, losses: u16) -> f64 {
    let played = u32::from(wins) + u32::from(losses);
    if played == 0 {
        return 0.0;
    }
    f64::from(wins) / f64::from(played)
}
