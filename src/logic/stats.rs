//! Stats aggregation: fold a completed round into per-player history.

use crate::models::{Player, PlayerId, PlayerStats, Round, RoundResults};
use std::collections::HashMap;

/// Aggregate one round into new per-player stats. Pure: `prior` is cloned,
/// never mutated, and players without history get zeroed entries.
///
/// Playing players gain a game, a consecutive-game, a partner tally for
/// their teammate and an opponent tally for each opposing player; scored
/// games also add to `total_score`/`total_score_against` (scores are read
/// from `results`, falling back to a score already on the game). Sitting-out
/// players gain a sit-out and reset their consecutive-game streak.
///
/// The caller guards re-invocation: `complete_round` rejects an already
/// completed round, so a round is aggregated exactly once.
pub fn update_stats_for_round(
    round: &Round,
    results: &RoundResults,
    directory: &[Player],
    prior: &HashMap<PlayerId, PlayerStats>,
) -> HashMap<PlayerId, PlayerStats> {
    let mut stats = prior.clone();
    let rating_of =
        |id: PlayerId| directory.iter().find(|p| p.id == id).and_then(|p| p.rating);

    for game in &round.games {
        let score = results.get(&game.id).copied().flatten().or(game.score);
        let sides = [
            (
                game.serve_team,
                game.receive_team,
                score.map(|s| s.serve_score),
                score.map(|s| s.receive_score),
            ),
            (
                game.receive_team,
                game.serve_team,
                score.map(|s| s.receive_score),
                score.map(|s| s.serve_score),
            ),
        ];

        for (team, other, own_score, score_against) in sides {
            let members = [
                (team.players[0], team.players[1]),
                (team.players[1], team.players[0]),
            ];
            for (me, teammate) in members {
                let s = stats.entry(me).or_insert_with(|| PlayerStats::new(me));
                s.games_played += 1;
                s.consecutive_games += 1;
                *s.partners.entry(teammate).or_insert(0) += 1;
                for opponent in other.players {
                    *s.opponents.entry(opponent).or_insert(0) += 1;
                }
                if let (Some(own), Some(against)) = (own_score, score_against) {
                    s.total_score += own;
                    s.total_score_against += against;
                }
                for opponent in other.players {
                    if let Some(rating) = rating_of(opponent) {
                        s.record_opponent_rating(rating);
                    }
                }
            }
        }
    }

    for &id in &round.sitting_out_ids {
        let s = stats.entry(id).or_insert_with(|| PlayerStats::new(id));
        s.games_sat_out += 1;
        s.consecutive_games = 0;
    }

    stats
}
