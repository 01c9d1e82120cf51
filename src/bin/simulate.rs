//! Simulation driver: run a session for N rounds with random scores and
//! print the per-player fairness table.
//! Run with: cargo run --bin simulate
//! Override with env: PLAYERS (default 9), COURTS (default 2), ROUNDS (default 12).

use open_play::{
    apply_next_round, complete_round, end_session, generate_round_assignment, start_live_session,
    start_round, update_stats_for_round, Court, Player, RoundResults, Score, Session,
};
use rand::Rng;
use std::collections::HashSet;

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let player_count = env_usize("PLAYERS", 9);
    let court_count = env_usize("COURTS", 2);
    let round_count = env_usize("ROUNDS", 12);

    let mut rng = rand::thread_rng();
    let directory: Vec<Player> = (0..player_count)
        .map(|i| {
            let rating = 3.0 + f64::from(rng.gen_range(0..5)) * 0.5;
            Player::with_rating(format!("Player {}", i + 1), rating)
        })
        .collect();
    let courts: Vec<Court> = (0..court_count)
        .map(|i| Court::new(format!("Court {}", i + 1)))
        .collect();

    let session = Session::with_roster(directory.iter().map(|p| p.id).collect(), courts);
    let mut session = start_live_session(&session)?;
    let paused = HashSet::new();

    log::info!(
        "Simulating {} rounds: {} players on {} court(s)",
        round_count,
        player_count,
        court_count
    );

    for _ in 0..round_count {
        let assignment = generate_round_assignment(&session, &directory, &paused)?;
        session = apply_next_round(&session, &assignment)?;
        session = start_round(&session)?;

        let mut results = RoundResults::new();
        let round = match session.current_round() {
            Some(r) => r.clone(),
            None => break,
        };
        for game in &round.games {
            // Winner to 11, loser somewhere below.
            let score = if rng.gen::<bool>() {
                Score { serve_score: 11, receive_score: rng.gen_range(0..11) }
            } else {
                Score { serve_score: rng.gen_range(0..11), receive_score: 11 }
            };
            results.insert(game.id, Some(score));
        }

        let stats =
            update_stats_for_round(&round, &results, &directory, &session.live_data.player_stats);
        session = complete_round(&session, &results, stats)?;
        log::info!(
            "round {}: {} game(s), {} sitting out",
            round.round_number,
            round.games.len(),
            round.sitting_out_ids.len()
        );
    }

    println!(
        "{:<12} {:>6} {:>7} {:>6} {:>6} {:>8} {:>9}",
        "Player", "Rating", "Played", "SatOut", "Score", "Against", "Partners"
    );
    for p in &directory {
        let s = session.stats_for(p.id);
        println!(
            "{:<12} {:>6.1} {:>7} {:>6} {:>6} {:>8} {:>9}",
            p.name,
            p.rating.unwrap_or(0.0),
            s.games_played,
            s.games_sat_out,
            s.total_score,
            s.total_score_against,
            s.partners.len()
        );
    }

    session = end_session(&session)?;
    log::info!(
        "session {} complete after {} round(s)",
        session.id,
        session.live_data.rounds.len()
    );
    Ok(())
}
