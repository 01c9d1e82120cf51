//! Roster resolution: the eligible player pool for a round.

use crate::models::{EngineError, Player, PlayerId, Session};
use std::collections::HashSet;

/// Minimum pool size for any round (one doubles game).
pub(crate) const MIN_PLAYERS: usize = 4;

/// Resolve the eligible pool for a round: session roster members that exist
/// in the directory, are not paused on the player record, and are not in the
/// caller's paused set. Roster order is preserved.
///
/// Fails with `NotEnoughPlayers` when fewer than 4 players remain; generation
/// must not silently degrade below one game.
pub(crate) fn eligible_players(
    session: &Session,
    directory: &[Player],
    paused: &HashSet<PlayerId>,
) -> Result<Vec<Player>, EngineError> {
    let eligible: Vec<Player> = session
        .player_ids
        .iter()
        .filter_map(|id| directory.iter().find(|p| p.id == *id))
        .filter(|p| !p.paused && !paused.contains(&p.id))
        .cloned()
        .collect();

    if eligible.len() < MIN_PLAYERS {
        return Err(EngineError::NotEnoughPlayers {
            required: MIN_PLAYERS,
            available: eligible.len(),
        });
    }
    Ok(eligible)
}
