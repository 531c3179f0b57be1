// Batch simulation statistics.
// Run with: cargo run --bin sim_stats --release
//
// Simulates a block of seeded games between two reference teams, prints
// per-game and aggregate statistics, then runs one full postseason to a
// champion.

use std::collections::HashMap;

use fb_core::{
    compute_seeds, generate_bracket, generate_preset, simulate_bracket, Conference, Game,
    GameEngine, GamePlan, Player, PlayerAttributes, Position, SimTuning, Team,
};
use uuid::Uuid;

fn reference_team(name: &str, conference: Conference, base: u8) -> Team {
    let roster: Vec<Player> = (0..14)
        .map(|i| {
            Player::new(
                format!("{name} {i:02}"),
                Position::ALL[i % 5],
                PlayerAttributes::uniform(base.saturating_sub((i / 5 * 6) as u8)),
            )
        })
        .collect();
    let lineup = [roster[0].id, roster[1].id, roster[2].id, roster[3].id, roster[4].id];
    let mut team = Team::new(name, conference, roster, lineup);
    team.rotation = Some(generate_preset(9, &team.roster).expect("reference roster fits"));
    team
}

fn main() {
    let num_games = 25u64;
    let mut total_points = 0u32;
    let mut total_attempts = 0u32;
    let mut total_threes = 0u32;
    let mut total_rebounds = 0u32;
    let mut total_turnovers = 0u32;
    let mut overtimes = 0u32;
    let mut home_wins = 0u32;

    println!("=== {num_games} games: Harbor City vs Ridgeline ===");
    for seed in 0..num_games {
        let home = reference_team("Harbor City", Conference::East, 76);
        let away = reference_team("Ridgeline", Conference::West, 74);
        let plan = GamePlan::new(home, away, seed * 7919);
        let result = GameEngine::new(plan).expect("valid reference teams").simulate();

        let ht = result.box_score.home_totals();
        let at = result.box_score.away_totals();
        println!(
            "seed {seed:>2}: {:>3} - {:<3} ({} OT)  fga {}-{}  reb {}-{}  to {}-{}",
            result.home_score,
            result.away_score,
            result.overtimes,
            ht.field_goals_attempted,
            at.field_goals_attempted,
            ht.rebounds,
            at.rebounds,
            ht.turnovers,
            at.turnovers,
        );

        total_points += u32::from(result.home_score) + u32::from(result.away_score);
        total_attempts +=
            u32::from(ht.field_goals_attempted) + u32::from(at.field_goals_attempted);
        total_threes += u32::from(ht.three_points_attempted) + u32::from(at.three_points_attempted);
        total_rebounds += u32::from(ht.rebounds) + u32::from(at.rebounds);
        total_turnovers += u32::from(ht.turnovers) + u32::from(at.turnovers);
        overtimes += u32::from(result.overtimes);
        if result.home_score > result.away_score {
            home_wins += 1;
        }
    }

    let per_game = |v: u32| v as f64 / num_games as f64;
    println!("\n=== Summary ===");
    println!("Avg combined points:   {:.1}", per_game(total_points));
    println!("Avg combined FGA:      {:.1}", per_game(total_attempts));
    println!("Avg combined 3PA:      {:.1}", per_game(total_threes));
    println!("Avg combined rebounds: {:.1}", per_game(total_rebounds));
    println!("Avg combined turnovers:{:.1}", per_game(total_turnovers));
    println!("Overtime periods:      {overtimes}");
    println!("Home record:           {home_wins}-{}", num_games as u32 - home_wins);

    // One full postseason from synthetic standings.
    println!("\n=== Postseason run ===");
    let mut teams = Vec::new();
    for conference in Conference::ALL {
        for i in 0..15u8 {
            teams.push(reference_team(
                &format!("{conference} {i:02}"),
                conference,
                82u8.saturating_sub(i * 2),
            ));
        }
    }
    let mut games = Vec::new();
    for conference in Conference::ALL {
        let ids: Vec<usize> =
            (0..teams.len()).filter(|&i| teams[i].conference == conference).collect();
        for a in 0..ids.len() {
            for b in (a + 1)..ids.len() {
                let plan = GamePlan::new(
                    teams[ids[a]].clone(),
                    teams[ids[b]].clone(),
                    (a * 31 + b) as u64,
                );
                let result = GameEngine::new(plan).expect("league teams are valid").simulate();
                games.push(Game::scheduled(teams[ids[a]].id, teams[ids[b]].id).with_result(&result));
            }
        }
    }
    let seeds = compute_seeds(&teams, &games).expect("league is closed");
    let bracket = generate_bracket(Uuid::new_v4(), &seeds).expect("both conferences seeded");
    let (done, playoff_games) =
        simulate_bracket(&bracket, &teams, &HashMap::new(), 20_260_806, &SimTuning::default())
            .expect("bracket simulates to completion");

    let champion = done.champion().expect("champion exists");
    let entry = done.seed_entry(champion).expect("champion was seeded");
    println!("Playoff games played:  {}", playoff_games.len());
    println!(
        "Champion:              {} ({} seed, {}-{})",
        entry.name, entry.seed, entry.wins, entry.losses
    );
}
