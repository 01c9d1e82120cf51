//! Fair rotation: decide who sits out this round.

use crate::logic::partnerships::PoolUnit;
use crate::models::{PlayerId, PlayerStats};
use rand::Rng;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Bench sort key for one player: longest current playing streak first, then
/// most lifetime games, so rest rotates to whoever has gone longest without a
/// break and lifetime playtime equalizes.
fn bench_key(stats: &HashMap<PlayerId, PlayerStats>, id: PlayerId) -> (u32, u32) {
    stats
        .get(&id)
        .map(|s| (s.consecutive_games, s.games_played))
        .unwrap_or((0, 0))
}

/// Bench key for a unit: a pair benches on its worse (higher) member.
fn unit_bench_key(stats: &HashMap<PlayerId, PlayerStats>, unit: &PoolUnit) -> (u32, u32) {
    unit.member_ids()
        .into_iter()
        .map(|id| bench_key(stats, id))
        .max()
        .unwrap_or((0, 0))
}

/// Select players to sit out so the remaining pool fits `slots` (4 per usable
/// court). Units bench whole: a fixed pair is never split to hit the count,
/// so when only pairs remain for a 1-player remainder the pool stays one
/// over and the assigner's leftover path benches the surplus.
///
/// Returns the benched ids and the playing units. Ties are broken randomly
/// per invocation.
pub(crate) fn select_sitting_out(
    units: Vec<PoolUnit>,
    stats: &HashMap<PlayerId, PlayerStats>,
    slots: usize,
    rng: &mut impl Rng,
) -> (Vec<PlayerId>, Vec<PoolUnit>) {
    let pool_size: usize = units.iter().map(|u| u.len()).sum();
    let mut need = pool_size.saturating_sub(slots);

    let mut ranked: Vec<(PoolUnit, (Reverse<u32>, Reverse<u32>, u32))> = units
        .into_iter()
        .map(|u| {
            let (consec, played) = unit_bench_key(stats, &u);
            (u, (Reverse(consec), Reverse(played), rng.gen::<u32>()))
        })
        .collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1));

    let mut sitting_out = Vec::new();
    let mut playing = Vec::new();
    for (unit, _) in ranked {
        if need >= unit.len() {
            need -= unit.len();
            sitting_out.extend(unit.member_ids());
        } else {
            playing.push(unit);
        }
    }

    (sitting_out, playing)
}
