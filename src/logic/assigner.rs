//! Team/game assignment: form balanced doubles games across usable courts.

use crate::logic::partnerships::{self, PoolUnit};
use crate::logic::rotation;
use crate::logic::{courts, roster};
use crate::models::{
    EngineError, GameAssignment, Player, PlayerId, PlayerStats, RoundAssignment, RoundPhase,
    Session, SessionState, Team,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Cost weight for a repeat partnership within a candidate split.
const PARTNER_WEIGHT: u32 = 1;
/// Cost weight for a repeat opposition within a candidate matchup.
const OPPONENT_WEIGHT: u32 = 1;

/// One way to fill a court: two teams plus the pool units they consume.
struct Candidate {
    team_a: [PlayerId; 2],
    team_b: [PlayerId; 2],
    unit_indices: Vec<usize>,
}

/// Generate the next round's assignment for a live session.
///
/// 1. Resolve the eligible pool, fold fixed partnerships into atomic units,
///    and bench `pool - 4 x usable courts` players by rotation priority.
/// 2. Shuffle the playing units (pair members stay together) and fill each
///    usable court in declared order with the 4-player split that minimizes
///    repeat partnerships and oppositions; courts whose rating minimum fewer
///    than 4 pool players meet are skipped for the round.
/// 3. Anyone left unplaced (rating mismatches, pair remainders) sits out.
///
/// Tie-breaks and the serve/receive coin flip use fresh per-invocation
/// randomness, so regenerating replaces the layout with a different one.
pub fn generate_round_assignment(
    session: &Session,
    directory: &[Player],
    paused: &HashSet<PlayerId>,
) -> Result<RoundAssignment, EngineError> {
    if session.state != SessionState::Live {
        return Err(EngineError::InvalidState);
    }
    if matches!(session.current_round(), Some(r) if r.phase == RoundPhase::Started) {
        return Err(EngineError::InvalidState);
    }

    let eligible = roster::eligible_players(session, directory, paused)?;
    let (units, forced_out) =
        partnerships::build_units(&eligible, session.partnership_constraint.as_ref());

    let usable = courts::usable_courts(&session.courts);
    let slots = usable.len() * 4;
    let stats = &session.live_data.player_stats;

    let mut rng = rand::thread_rng();
    let (benched, mut pool) = rotation::select_sitting_out(units, stats, slots, &mut rng);

    let mut sitting_out_ids: Vec<PlayerId> = forced_out;
    sitting_out_ids.extend(benched);

    pool.shuffle(&mut rng);

    let mut game_assignments: Vec<GameAssignment> = Vec::new();
    for court in usable {
        let qualified: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, u)| u.members().iter().all(|p| courts::meets_minimum(p, court)))
            .map(|(i, _)| i)
            .collect();
        let qualified_players: usize = qualified.iter().map(|&i| pool[i].len()).sum();
        if qualified_players < 4 {
            log::debug!(
                "court '{}' skipped: {} qualifying players",
                court.name,
                qualified_players
            );
            continue;
        }

        let candidates = enumerate_candidates(&pool, &qualified);
        let best = match pick_best(candidates, stats, &mut rng) {
            Some(c) => c,
            None => continue,
        };

        // Coin flip which side serves first.
        let (serve, receive) = if rng.gen::<bool>() {
            (best.team_a, best.team_b)
        } else {
            (best.team_b, best.team_a)
        };
        game_assignments.push(GameAssignment {
            court_id: court.id,
            serve_team: Team::new(serve[0], serve[1]),
            receive_team: Team::new(receive[0], receive[1]),
        });

        let mut used = best.unit_indices;
        used.sort_unstable_by(|a, b| b.cmp(a));
        for idx in used {
            pool.remove(idx);
        }
    }

    // Whatever the courts could not seat sits out on top of the benched set.
    for unit in pool {
        sitting_out_ids.extend(unit.member_ids());
    }

    if game_assignments.is_empty() {
        return Err(EngineError::GenerationEmpty);
    }

    log::debug!(
        "round {}: {} game(s), {} sitting out",
        session.next_round_number(),
        game_assignments.len(),
        sitting_out_ids.len()
    );

    Ok(RoundAssignment {
        round_number: session.next_round_number(),
        game_assignments,
        sitting_out_ids,
    })
}

/// Every way to seat 4 qualifying players on one court, with fixed pairs
/// always kept intact as a team: pair vs pair, pair vs two singles, or four
/// singles in each of the three splits.
fn enumerate_candidates(pool: &[PoolUnit], qualified: &[usize]) -> Vec<Candidate> {
    let pairs: Vec<usize> = qualified
        .iter()
        .copied()
        .filter(|&i| pool[i].is_pair())
        .collect();
    let singles: Vec<usize> = qualified
        .iter()
        .copied()
        .filter(|&i| !pool[i].is_pair())
        .collect();

    let pair_ids = |i: usize| -> [PlayerId; 2] {
        let ids = pool[i].member_ids();
        [ids[0], ids[1]]
    };
    let single_id = |i: usize| pool[i].member_ids()[0];

    let mut candidates = Vec::new();

    for (pi, &p1) in pairs.iter().enumerate() {
        for &p2 in &pairs[pi + 1..] {
            candidates.push(Candidate {
                team_a: pair_ids(p1),
                team_b: pair_ids(p2),
                unit_indices: vec![p1, p2],
            });
        }
    }

    for &p in &pairs {
        for (si, &s1) in singles.iter().enumerate() {
            for &s2 in &singles[si + 1..] {
                candidates.push(Candidate {
                    team_a: pair_ids(p),
                    team_b: [single_id(s1), single_id(s2)],
                    unit_indices: vec![p, s1, s2],
                });
            }
        }
    }

    for a in 0..singles.len() {
        for b in (a + 1)..singles.len() {
            for c in (b + 1)..singles.len() {
                for d in (c + 1)..singles.len() {
                    let ids = [
                        single_id(singles[a]),
                        single_id(singles[b]),
                        single_id(singles[c]),
                        single_id(singles[d]),
                    ];
                    let indices = vec![singles[a], singles[b], singles[c], singles[d]];
                    // Three ways to split four players into two teams.
                    for (t1, t2) in [
                        ([ids[0], ids[1]], [ids[2], ids[3]]),
                        ([ids[0], ids[2]], [ids[1], ids[3]]),
                        ([ids[0], ids[3]], [ids[1], ids[2]]),
                    ] {
                        candidates.push(Candidate {
                            team_a: t1,
                            team_b: t2,
                            unit_indices: indices.clone(),
                        });
                    }
                }
            }
        }
    }

    candidates
}

/// Times `a` and `b` have already been teammates.
fn partner_count(stats: &HashMap<PlayerId, PlayerStats>, a: PlayerId, b: PlayerId) -> u32 {
    stats.get(&a).map(|s| s.partner_count(b)).unwrap_or(0)
}

/// Times `a` and `b` have already faced each other.
fn opponent_count(stats: &HashMap<PlayerId, PlayerStats>, a: PlayerId, b: PlayerId) -> u32 {
    stats.get(&a).map(|s| s.opponent_count(b)).unwrap_or(0)
}

/// Weighted repeat-partner/repeat-opponent cost of one candidate split.
fn candidate_cost(stats: &HashMap<PlayerId, PlayerStats>, candidate: &Candidate) -> u32 {
    let partner = partner_count(stats, candidate.team_a[0], candidate.team_a[1])
        + partner_count(stats, candidate.team_b[0], candidate.team_b[1]);
    let mut opponent = 0;
    for &a in &candidate.team_a {
        for &b in &candidate.team_b {
            opponent += opponent_count(stats, a, b);
        }
    }
    PARTNER_WEIGHT * partner + OPPONENT_WEIGHT * opponent
}

/// Lowest-cost candidate, ties broken randomly.
fn pick_best(
    candidates: Vec<Candidate>,
    stats: &HashMap<PlayerId, PlayerStats>,
    rng: &mut impl Rng,
) -> Option<Candidate> {
    candidates
        .into_iter()
        .map(|c| (candidate_cost(stats, &c), rng.gen::<u32>(), c))
        .min_by_key(|(cost, tiebreak, _)| (*cost, *tiebreak))
        .map(|(_, _, c)| c)
}
