//! Bracket generation and the round state machine.
//!
//! Every function here is a pure transformation: it takes a bracket
//! snapshot and returns a new one (or refuses). An out-of-order transition
//! can therefore never leave a half-updated aggregate behind.

use uuid::Uuid;

use crate::error::{Result, SimError};
use crate::models::game::Game;
use crate::models::playoffs::{
    Conference, PlayoffBracket, PlayoffRound, PlayoffSeries, SeededTeam,
};

/// Build the postseason from final seeds: exactly four play-in one-game
/// series (7v8 and 9v10 per conference), later rounds empty until earned.
pub fn generate_bracket(season_id: Uuid, seeds: &[SeededTeam]) -> Result<PlayoffBracket> {
    let mut play_in = Vec::with_capacity(4);
    for conference in Conference::ALL {
        let seven = seed_in(seeds, conference, 7)?;
        let eight = seed_in(seeds, conference, 8)?;
        let nine = seed_in(seeds, conference, 9)?;
        let ten = seed_in(seeds, conference, 10)?;
        play_in.push(PlayoffSeries::play_in(conference, seven.team_id, eight.team_id));
        play_in.push(PlayoffSeries::play_in(conference, nine.team_id, ten.team_id));
    }

    Ok(PlayoffBracket {
        season_id,
        seeds: seeds.to_vec(),
        play_in,
        first_round: Vec::new(),
        conference_semis: Vec::new(),
        conference_finals: Vec::new(),
        finals: Vec::new(),
        current_round: PlayoffRound::PlayIn,
    })
}

/// Fold one decided game into its series, returning a new bracket snapshot.
///
/// Play-in bookkeeping rides along: once both initial games of a conference
/// are decided, the second-chance game (7v8 loser hosting the 9v10 winner)
/// is synthesized. The bracket flips to `Complete` the moment the finals
/// series does.
pub fn with_game_result(bracket: &PlayoffBracket, game: &Game) -> Result<PlayoffBracket> {
    let series_id = game.series_id.ok_or(SimError::SeriesMismatch(game.id))?;

    let mut next = bracket.clone();
    let mut touched_round = None;
    for round in [
        PlayoffRound::PlayIn,
        PlayoffRound::FirstRound,
        PlayoffRound::ConferenceSemis,
        PlayoffRound::ConferenceFinals,
        PlayoffRound::Finals,
    ] {
        if let Some(series) =
            next.round_series_mut(round).iter_mut().find(|s| s.id == series_id)
        {
            series.record_game(game)?;
            touched_round = Some(round);
            break;
        }
    }
    let touched_round = touched_round.ok_or(SimError::SeriesMismatch(series_id))?;

    match touched_round {
        PlayoffRound::PlayIn => synthesize_second_play_in(&mut next),
        PlayoffRound::Finals => {
            if next.finals.iter().all(|s| s.is_complete) {
                next.current_round = PlayoffRound::Complete;
            }
        }
        _ => {}
    }
    Ok(next)
}

/// True iff every series the current round points at is complete. For the
/// play-in this includes the two synthesized games, so seeds 7 and 8 are
/// actually decided before the first round can be built.
pub fn is_round_complete(bracket: &PlayoffBracket) -> bool {
    match bracket.current_round {
        PlayoffRound::PlayIn => {
            bracket.play_in.len() == 6 && bracket.play_in.iter().all(|s| s.is_complete)
        }
        PlayoffRound::Complete => true,
        round => {
            let series = bracket.round_series(round);
            !series.is_empty() && series.iter().all(|s| s.is_complete)
        }
    }
}

/// Advance to the next round, populating its series. Refuses while the
/// current round is incomplete; the input bracket is never altered.
pub fn advance_round(bracket: &PlayoffBracket) -> Result<PlayoffBracket> {
    if bracket.current_round == PlayoffRound::Complete {
        return Err(SimError::BracketComplete);
    }
    if !is_round_complete(bracket) {
        return Err(SimError::RoundIncomplete(bracket.current_round));
    }

    let mut next = bracket.clone();
    match bracket.current_round {
        PlayoffRound::PlayIn => next.first_round = build_first_round(bracket)?,
        PlayoffRound::FirstRound => {
            next.conference_semis =
                pair_round_winners(bracket, PlayoffRound::FirstRound, PlayoffRound::ConferenceSemis)?
        }
        PlayoffRound::ConferenceSemis => {
            next.conference_finals = pair_round_winners(
                bracket,
                PlayoffRound::ConferenceSemis,
                PlayoffRound::ConferenceFinals,
            )?
        }
        PlayoffRound::ConferenceFinals => next.finals = build_finals(bracket),
        PlayoffRound::Finals | PlayoffRound::Complete => {}
    }
    next.current_round = bracket
        .current_round
        .next()
        .expect("non-complete rounds always have a successor");
    Ok(next)
}

fn seed_in(seeds: &[SeededTeam], conference: Conference, seed: u8) -> Result<&SeededTeam> {
    seeds
        .iter()
        .find(|s| s.conference == conference && s.seed == seed)
        .ok_or(SimError::MissingSeed { conference, seed })
}

/// Seed numbers of a play-in series' participants, ordered (low, high).
fn participant_seeds(bracket: &PlayoffBracket, series: &PlayoffSeries) -> (u8, u8) {
    let a = bracket.seed_of(series.home_team_id).unwrap_or(u8::MAX);
    let b = bracket.seed_of(series.away_team_id).unwrap_or(u8::MAX);
    (a.min(b), a.max(b))
}

fn play_in_between(
    bracket: &PlayoffBracket,
    conference: Conference,
    low: u8,
    high: u8,
) -> Option<PlayoffSeries> {
    bracket
        .play_in
        .iter()
        .find(|s| {
            s.conference == Some(conference) && participant_seeds(bracket, s) == (low, high)
        })
        .cloned()
}

fn synthesize_second_play_in(bracket: &mut PlayoffBracket) {
    for conference in Conference::ALL {
        let Some(seven_eight) = play_in_between(bracket, conference, 7, 8) else { continue };
        let Some(nine_ten) = play_in_between(bracket, conference, 9, 10) else { continue };
        if !(seven_eight.is_complete && nine_ten.is_complete) {
            continue;
        }
        let (Some(host), Some(visitor)) = (seven_eight.loser_id(), nine_ten.winner_id) else {
            continue;
        };
        let exists = bracket.play_in.iter().any(|s| {
            s.conference == Some(conference) && s.involves(host) && s.involves(visitor)
        });
        if !exists {
            bracket.play_in.push(PlayoffSeries::play_in(conference, host, visitor));
        }
    }
}

/// First-round matchups 1v8, 2v7, 3v6, 4v5 per conference. The 7-entrant is
/// the 7v8 winner; the 8-entrant is the second-chance winner.
fn build_first_round(bracket: &PlayoffBracket) -> Result<Vec<PlayoffSeries>> {
    let mut series = Vec::with_capacity(8);
    for conference in Conference::ALL {
        let seven_eight = play_in_between(bracket, conference, 7, 8)
            .ok_or(SimError::MissingSeed { conference, seed: 7 })?;
        let seventh = seven_eight
            .winner_id
            .ok_or(SimError::RoundIncomplete(PlayoffRound::PlayIn))?;
        let second = bracket
            .play_in
            .iter()
            .find(|s| {
                s.conference == Some(conference)
                    && s.id != seven_eight.id
                    && s.involves(seven_eight.loser_id().expect("complete series has a loser"))
            })
            .ok_or(SimError::RoundIncomplete(PlayoffRound::PlayIn))?;
        let eighth = second
            .winner_id
            .ok_or(SimError::RoundIncomplete(PlayoffRound::PlayIn))?;

        let entrant = |slot: u8| -> Result<Uuid> {
            match slot {
                7 => Ok(seventh),
                8 => Ok(eighth),
                n => seed_in(&bracket.seeds, conference, n).map(|s| s.team_id),
            }
        };
        for (high, low) in [(1, 8), (2, 7), (3, 6), (4, 5)] {
            series.push(PlayoffSeries::best_of_seven(
                PlayoffRound::FirstRound,
                Some(conference),
                entrant(high)?,
                entrant(low)?,
            ));
        }
    }
    Ok(series)
}

/// Reseed winners within each conference: best remaining original seed
/// hosts worst remaining, producing half as many series.
fn pair_round_winners(
    bracket: &PlayoffBracket,
    from: PlayoffRound,
    to: PlayoffRound,
) -> Result<Vec<PlayoffSeries>> {
    let mut series = Vec::new();
    for conference in Conference::ALL {
        let mut winners: Vec<Uuid> = bracket
            .round_series(from)
            .iter()
            .filter(|s| s.conference == Some(conference))
            .map(|s| s.winner_id.ok_or(SimError::RoundIncomplete(from)))
            .collect::<Result<_>>()?;
        winners.sort_by_key(|id| bracket.seed_of(*id).unwrap_or(u8::MAX));

        let mut lo = 0;
        let mut hi = winners.len();
        while lo + 1 < hi {
            hi -= 1;
            series.push(PlayoffSeries::best_of_seven(
                to,
                Some(conference),
                winners[lo],
                winners[hi],
            ));
            lo += 1;
        }
    }
    Ok(series)
}

/// The finals pair the conference champions regardless of seed; the better
/// regular-season record hosts.
fn build_finals(bracket: &PlayoffBracket) -> Vec<PlayoffSeries> {
    let mut champions: Vec<Uuid> = bracket
        .conference_finals
        .iter()
        .filter_map(|s| s.winner_id)
        .collect();
    champions.sort_by(|a, b| {
        let ra = bracket.seed_entry(*a);
        let rb = bracket.seed_entry(*b);
        let wins = |e: Option<&SeededTeam>| e.map(|s| s.wins).unwrap_or(0);
        let name = |e: Option<&SeededTeam>| e.map(|s| s.name.clone()).unwrap_or_default();
        wins(rb).cmp(&wins(ra)).then_with(|| name(ra).cmp(&name(rb)))
    });
    match champions.as_slice() {
        [home, away] => vec![PlayoffSeries::best_of_seven(
            PlayoffRound::Finals,
            None,
            *home,
            *away,
        )],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::GameResult;

    fn seeds(per_conference: u8) -> Vec<SeededTeam> {
        let mut out = Vec::new();
        for conference in Conference::ALL {
            for seed in 1..=per_conference {
                out.push(SeededTeam {
                    team_id: Uuid::new_v4(),
                    name: format!("{conference} {seed:02}"),
                    conference,
                    seed,
                    wins: 70 - u16::from(seed) * 4,
                    losses: 12 + u16::from(seed) * 4,
                });
            }
        }
        out
    }

    fn win_for(series: &PlayoffSeries, winner: Uuid) -> Game {
        let home_wins = winner == series.home_team_id;
        let (h, a) = if home_wins { (104, 99) } else { (99, 104) };
        Game::playoff(series.home_team_id, series.away_team_id, series.id).with_result(
            &GameResult {
                home_score: h,
                away_score: a,
                box_score: Default::default(),
                overtimes: 0,
                home_possessions: 98,
                away_possessions: 97,
                experience: Default::default(),
            },
        )
    }

    /// Decide every incomplete series in the current round in favor of the
    /// better original seed.
    fn chalk_round(mut bracket: PlayoffBracket) -> PlayoffBracket {
        loop {
            let Some(series) = bracket
                .current_series()
                .iter()
                .find(|s| !s.is_complete)
                .cloned()
            else {
                break;
            };
            let favorite = if bracket.seed_of(series.home_team_id).unwrap_or(u8::MAX)
                <= bracket.seed_of(series.away_team_id).unwrap_or(u8::MAX)
            {
                series.home_team_id
            } else {
                series.away_team_id
            };
            let needed = series.wins_needed();
            for _ in 0..needed {
                let updated = bracket.series(series.id).unwrap().clone();
                bracket = with_game_result(&bracket, &win_for(&updated, favorite)).unwrap();
            }
        }
        bracket
    }

    #[test]
    fn generation_yields_exactly_four_play_in_games() {
        let bracket = generate_bracket(Uuid::new_v4(), &seeds(15)).unwrap();
        assert_eq!(bracket.play_in.len(), 4);
        assert_eq!(bracket.current_round, PlayoffRound::PlayIn);
        for conference in Conference::ALL {
            let pairs: Vec<(u8, u8)> = bracket
                .play_in
                .iter()
                .filter(|s| s.conference == Some(conference))
                .map(|s| participant_seeds(&bracket, s))
                .collect();
            assert!(pairs.contains(&(7, 8)));
            assert!(pairs.contains(&(9, 10)));
        }
    }

    #[test]
    fn missing_seed_fails_loudly() {
        let err = generate_bracket(Uuid::new_v4(), &seeds(8)).unwrap_err();
        assert!(matches!(err, SimError::MissingSeed { seed: 9, .. }));
    }

    #[test]
    fn second_play_in_pits_seven_eight_loser_against_nine_ten_winner() {
        let bracket = generate_bracket(Uuid::new_v4(), &seeds(15)).unwrap();
        // Upset in the 7v8 game: the 8 seed wins. The 9 seed takes 9v10.
        let mut current = bracket.clone();
        for conference in Conference::ALL {
            let seven_eight = play_in_between(&current, conference, 7, 8).unwrap();
            current =
                with_game_result(&current, &win_for(&seven_eight, seven_eight.away_team_id))
                    .unwrap();
            let nine_ten = play_in_between(&current, conference, 9, 10).unwrap();
            current = with_game_result(&current, &win_for(&nine_ten, nine_ten.home_team_id))
                .unwrap();
        }
        assert_eq!(current.play_in.len(), 6);
        for conference in Conference::ALL {
            let seven_eight = play_in_between(&current, conference, 7, 8).unwrap();
            let nine_ten = play_in_between(&current, conference, 9, 10).unwrap();
            let second = current
                .play_in
                .iter()
                .find(|s| {
                    s.conference == Some(conference)
                        && participant_seeds(&current, s) == (7, 9)
                })
                .expect("second game exists");
            // Loser of 7v8 (the 7 seed) hosts; winner of 9v10 (the 9 seed)
            // visits. The 7v8 winner appears nowhere.
            assert_eq!(Some(second.home_team_id), seven_eight.loser_id());
            assert_eq!(Some(second.away_team_id), nine_ten.winner_id);
            assert!(!second.involves(seven_eight.winner_id.unwrap()));
        }
    }

    #[test]
    fn advance_refuses_while_round_is_incomplete() {
        let bracket = generate_bracket(Uuid::new_v4(), &seeds(15)).unwrap();
        let err = advance_round(&bracket).unwrap_err();
        assert!(matches!(err, SimError::RoundIncomplete(PlayoffRound::PlayIn)));
        // Pure function: the input is untouched by construction, and the
        // round pointer never moved.
        assert_eq!(bracket.current_round, PlayoffRound::PlayIn);
        assert_eq!(bracket.first_round.len(), 0);
    }

    #[test]
    fn first_round_matchups_follow_seed_order() {
        let bracket = generate_bracket(Uuid::new_v4(), &seeds(15)).unwrap();
        let after_play_in = chalk_round(bracket);
        let advanced = advance_round(&after_play_in).unwrap();
        assert_eq!(advanced.current_round, PlayoffRound::FirstRound);
        assert_eq!(advanced.first_round.len(), 8);
        for conference in Conference::ALL {
            let pairs: Vec<(u8, u8)> = advanced
                .first_round
                .iter()
                .filter(|s| s.conference == Some(conference))
                .map(|s| participant_seeds(&advanced, s))
                .collect();
            // Chalk play-in: 7 beat 8 and then 8 beat 9 for the last slot.
            assert_eq!(pairs, vec![(1, 8), (2, 7), (3, 6), (4, 5)]);
        }
    }

    #[test]
    fn full_chalk_bracket_crowns_the_best_seed() {
        let mut bracket = generate_bracket(Uuid::new_v4(), &seeds(15)).unwrap();
        while bracket.current_round != PlayoffRound::Complete {
            bracket = chalk_round(bracket);
            if bracket.current_round == PlayoffRound::Complete {
                break;
            }
            match advance_round(&bracket) {
                Ok(next) => bracket = next,
                Err(SimError::BracketComplete) => break,
                Err(e) => panic!("unexpected: {e}"),
            }
        }
        assert_eq!(bracket.current_round, PlayoffRound::Complete);
        assert_eq!(bracket.first_round.len(), 8);
        assert_eq!(bracket.conference_semis.len(), 4);
        assert_eq!(bracket.conference_finals.len(), 2);
        assert_eq!(bracket.finals.len(), 1);

        let champion = bracket.champion().expect("exactly one champion");
        let entry = bracket.seed_entry(champion).unwrap();
        assert_eq!(entry.seed, 1, "chalk bracket ends with a 1 seed on top");
    }

    #[test]
    fn reseeding_pairs_best_remaining_with_worst_remaining() {
        // Force upsets in the first round so reseeding matters: winners are
        // seeds 1, 2, 5, 6 in each conference.
        let bracket = generate_bracket(Uuid::new_v4(), &seeds(15)).unwrap();
        let mut current = chalk_round(bracket);
        current = advance_round(&current).unwrap();
        loop {
            let Some(series) = current
                .current_series()
                .iter()
                .find(|s| !s.is_complete)
                .cloned()
            else {
                break;
            };
            let (low, high) = participant_seeds(&current, &series);
            // Seeds 3 and 4 lose their series; everyone else holds serve.
            let winner_seed = match (low, high) {
                (3, 6) => 6,
                (4, 5) => 5,
                _ => low,
            };
            let winner = if current.seed_of(series.home_team_id) == Some(winner_seed) {
                series.home_team_id
            } else {
                series.away_team_id
            };
            for _ in 0..series.wins_needed() {
                let updated = current.series(series.id).unwrap().clone();
                current = with_game_result(&current, &win_for(&updated, winner)).unwrap();
            }
        }
        let semis = advance_round(&current).unwrap();
        for conference in Conference::ALL {
            let pairs: Vec<(u8, u8)> = semis
                .conference_semis
                .iter()
                .filter(|s| s.conference == Some(conference))
                .map(|s| participant_seeds(&semis, s))
                .collect();
            assert_eq!(pairs, vec![(1, 6), (2, 5)], "best hosts worst after upsets");
        }
    }
}
