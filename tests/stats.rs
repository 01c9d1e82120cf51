//! Integration tests for the stats aggregator.

use open_play::{
    update_stats_for_round, Court, Game, Player, PlayerId, PlayerStats, Round, RoundPhase,
    RoundResults, Score, Team,
};
use std::collections::HashMap;

/// Four rated players, one unrated bench-warmer, one court, one game:
/// (P0, P1) serving against (P2, P3), P4 sitting out.
fn fixture() -> (Vec<Player>, Round) {
    let players = vec![
        Player::with_rating("P0", 3.5),
        Player::with_rating("P1", 4.0),
        Player::with_rating("P2", 4.0),
        Player::with_rating("P3", 3.0),
        Player::new("P4"),
    ];
    let court = Court::new("Court 1");
    let game = Game::new(
        court.id,
        Team::new(players[0].id, players[1].id),
        Team::new(players[2].id, players[3].id),
    );
    let round = Round {
        round_number: 1,
        games: vec![game],
        sitting_out_ids: vec![players[4].id],
        phase: RoundPhase::Started,
    };
    (players, round)
}

fn scored(round: &Round, serve_score: u32, receive_score: u32) -> RoundResults {
    let mut results = RoundResults::new();
    results.insert(round.games[0].id, Some(Score { serve_score, receive_score }));
    results
}

#[test]
fn scored_game_updates_both_sides() {
    let (players, round) = fixture();
    let results = scored(&round, 11, 7);
    let stats = update_stats_for_round(&round, &results, &players, &HashMap::new());

    for (me, teammate) in [(0, 1), (1, 0)] {
        let s = &stats[&players[me].id];
        assert_eq!(s.games_played, 1);
        assert_eq!(s.consecutive_games, 1);
        assert_eq!(s.total_score, 11);
        assert_eq!(s.total_score_against, 7);
        assert_eq!(s.partner_count(players[teammate].id), 1);
        assert_eq!(s.opponent_count(players[2].id), 1);
        assert_eq!(s.opponent_count(players[3].id), 1);
    }
    for (me, teammate) in [(2, 3), (3, 2)] {
        let s = &stats[&players[me].id];
        assert_eq!(s.total_score, 7);
        assert_eq!(s.total_score_against, 11);
        assert_eq!(s.partner_count(players[teammate].id), 1);
    }
}

#[test]
fn sitting_out_resets_the_consecutive_streak() {
    let (players, round) = fixture();
    let mut prior = HashMap::new();
    let mut streaky = PlayerStats::new(players[4].id);
    streaky.games_played = 6;
    streaky.consecutive_games = 6;
    prior.insert(players[4].id, streaky);

    let stats = update_stats_for_round(&round, &RoundResults::new(), &players, &prior);
    let s = &stats[&players[4].id];
    assert_eq!(s.games_sat_out, 1);
    assert_eq!(s.consecutive_games, 0);
    assert_eq!(s.games_played, 6);
}

#[test]
fn aggregation_is_pure_and_leaves_prior_untouched() {
    let (players, round) = fixture();
    let results = scored(&round, 11, 7);
    let prior: HashMap<PlayerId, PlayerStats> = HashMap::new();
    let _ = update_stats_for_round(&round, &results, &players, &prior);
    assert!(prior.is_empty());
}

#[test]
fn unscored_games_still_count_participation() {
    let (players, round) = fixture();
    let mut results = RoundResults::new();
    results.insert(round.games[0].id, None);
    let stats = update_stats_for_round(&round, &results, &players, &HashMap::new());

    let s = &stats[&players[0].id];
    assert_eq!(s.games_played, 1);
    assert_eq!(s.total_score, 0);
    assert_eq!(s.total_score_against, 0);
}

#[test]
fn score_already_on_the_game_is_used_when_results_have_no_entry() {
    let (players, mut round) = fixture();
    round.games[0].score = Some(Score { serve_score: 9, receive_score: 11 });
    let stats = update_stats_for_round(&round, &RoundResults::new(), &players, &HashMap::new());

    assert_eq!(stats[&players[0].id].total_score, 9);
    assert_eq!(stats[&players[0].id].total_score_against, 11);
    assert_eq!(stats[&players[2].id].total_score, 11);
}

#[test]
fn average_rating_tracks_rated_opponents() {
    let (players, round) = fixture();
    let stats = update_stats_for_round(&round, &RoundResults::new(), &players, &HashMap::new());

    // P0 faced P2 (4.0) and P3 (3.0).
    let s = &stats[&players[0].id];
    assert_eq!(s.rated_opponents_seen, 2);
    assert!((s.average_rating.unwrap() - 3.5).abs() < 1e-9);

    // P2 faced P0 (3.5) and P1 (4.0).
    let s = &stats[&players[2].id];
    assert!((s.average_rating.unwrap() - 3.75).abs() < 1e-9);
}

#[test]
fn unrated_opponents_do_not_skew_the_average() {
    let (mut players, round) = fixture();
    players[3].rating = None;
    let stats = update_stats_for_round(&round, &RoundResults::new(), &players, &HashMap::new());

    // P0 now only saw one rated opponent (P2 at 4.0).
    let s = &stats[&players[0].id];
    assert_eq!(s.rated_opponents_seen, 1);
    assert!((s.average_rating.unwrap() - 4.0).abs() < 1e-9);
    // The sitting-out player has no rating history at all.
    assert_eq!(stats[&players[4].id].average_rating, None);
}

#[test]
fn counters_accumulate_across_rounds() {
    let (players, round) = fixture();
    let results = scored(&round, 11, 7);
    let after_one = update_stats_for_round(&round, &results, &players, &HashMap::new());
    let after_two = update_stats_for_round(&round, &results, &players, &after_one);

    let s = &after_two[&players[0].id];
    assert_eq!(s.games_played, 2);
    assert_eq!(s.consecutive_games, 2);
    assert_eq!(s.total_score, 22);
    assert_eq!(s.partner_count(players[1].id), 2);
    assert_eq!(after_two[&players[4].id].games_sat_out, 2);
}
