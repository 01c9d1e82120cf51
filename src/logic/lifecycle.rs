//! Session and round lifecycle: pure command transforms over a session
//! snapshot. Every command returns a new `Session`; on error the input is
//! untouched, so callers never see a partially applied mutation.

use crate::models::{
    Court, CourtId, EngineError, PlayerId, PlayerStats, Round, RoundAssignment, RoundPhase,
    RoundResults, Session, SessionState,
};
use chrono::Utc;
use std::collections::HashMap;

/// Start a live session: New -> Live.
///
/// Requires at least 4 players and enough players to fill every active court
/// (4 per court). Live data starts empty; the first round is generated and
/// applied by the caller.
pub fn start_live_session(session: &Session) -> Result<Session, EngineError> {
    if session.state != SessionState::New {
        return Err(EngineError::InvalidState);
    }
    let required = 4.max(4 * session.active_courts().len());
    let available = session.player_ids.len();
    if available < required {
        return Err(EngineError::NotEnoughPlayersToStart { required, available });
    }
    let mut next = session.clone();
    next.state = SessionState::Live;
    next.live_data.rounds.clear();
    next.live_data.player_stats.clear();
    Ok(next)
}

/// Check that every court an assignment references is configured.
fn check_assignment_courts(
    session: &Session,
    assignment: &RoundAssignment,
) -> Result<(), EngineError> {
    for game in &assignment.game_assignments {
        if session.find_court(game.court_id).is_none() {
            return Err(EngineError::CourtNotFound(game.court_id));
        }
    }
    Ok(())
}

/// Append a freshly generated assignment as the next Pending round.
///
/// Requires a live session with no open round (the previous round, if any,
/// must be Completed) and a sequential round number.
pub fn apply_next_round(
    session: &Session,
    assignment: &RoundAssignment,
) -> Result<Session, EngineError> {
    if session.state != SessionState::Live {
        return Err(EngineError::InvalidState);
    }
    let expected = match session.current_round() {
        None => 1,
        Some(r) if r.phase == RoundPhase::Completed => r.round_number + 1,
        Some(_) => return Err(EngineError::InvalidState),
    };
    if assignment.round_number != expected {
        return Err(EngineError::InvalidState);
    }
    check_assignment_courts(session, assignment)?;

    let mut next = session.clone();
    next.live_data.rounds.push(Round::from_assignment(assignment));
    Ok(next)
}

/// Replace the current Pending round with a new assignment (reshuffle or a
/// regenerate after a court change). Disallowed once the round has started.
pub fn update_current_round(
    session: &Session,
    assignment: &RoundAssignment,
) -> Result<Session, EngineError> {
    if session.state != SessionState::Live {
        return Err(EngineError::InvalidState);
    }
    let current = session.current_round().ok_or(EngineError::InvalidState)?;
    if current.phase != RoundPhase::Pending || assignment.round_number != current.round_number {
        return Err(EngineError::InvalidState);
    }
    check_assignment_courts(session, assignment)?;

    let mut next = session.clone();
    if let Some(round) = next.current_round_mut() {
        *round = Round::from_assignment(assignment);
    }
    Ok(next)
}

/// Start the current Pending round: stamps `started_at` on every game.
pub fn start_round(session: &Session) -> Result<Session, EngineError> {
    if session.state != SessionState::Live {
        return Err(EngineError::InvalidState);
    }
    match session.current_round() {
        Some(r) if r.phase == RoundPhase::Pending => {}
        _ => return Err(EngineError::InvalidState),
    }

    let mut next = session.clone();
    let now = Utc::now();
    if let Some(round) = next.current_round_mut() {
        round.phase = RoundPhase::Started;
        for game in &mut round.games {
            game.started_at = Some(now);
        }
    }
    Ok(next)
}

/// Complete the current Started round: apply scores, mark games completed,
/// and install the caller-computed stats (see `update_stats_for_round`).
///
/// Completing an already Completed round is rejected, which is what makes
/// stats aggregation once-per-round. Opening the following Pending round is
/// a separate generate + apply command by the caller.
pub fn complete_round(
    session: &Session,
    results: &RoundResults,
    updated_stats: HashMap<PlayerId, PlayerStats>,
) -> Result<Session, EngineError> {
    if session.state != SessionState::Live {
        return Err(EngineError::InvalidState);
    }
    let current = session.current_round().ok_or(EngineError::InvalidState)?;
    if current.phase != RoundPhase::Started {
        return Err(EngineError::InvalidState);
    }
    for game_id in results.keys() {
        if !current.games.iter().any(|g| g.id == *game_id) {
            return Err(EngineError::GameNotFound(*game_id));
        }
    }

    let mut next = session.clone();
    let now = Utc::now();
    if let Some(round) = next.current_round_mut() {
        for game in &mut round.games {
            if let Some(Some(score)) = results.get(&game.id) {
                game.score = Some(*score);
            }
            game.is_completed = true;
            game.completed_at = Some(now);
        }
        round.phase = RoundPhase::Completed;
    }
    next.live_data.player_stats = updated_stats;
    Ok(next)
}

/// Where a player currently sits within a round.
enum Slot {
    /// Game index, serve side flag, position within the team.
    Game(usize, bool, usize),
    /// Index into `sitting_out_ids`.
    SittingOut(usize),
}

fn find_slot(round: &Round, id: PlayerId) -> Option<Slot> {
    for (gi, game) in round.games.iter().enumerate() {
        for (pos, &pid) in game.serve_team.players.iter().enumerate() {
            if pid == id {
                return Some(Slot::Game(gi, true, pos));
            }
        }
        for (pos, &pid) in game.receive_team.players.iter().enumerate() {
            if pid == id {
                return Some(Slot::Game(gi, false, pos));
            }
        }
    }
    round
        .sitting_out_ids
        .iter()
        .position(|&pid| pid == id)
        .map(Slot::SittingOut)
}

fn write_slot(round: &mut Round, slot: &Slot, id: PlayerId) {
    match *slot {
        Slot::Game(gi, serve, pos) => {
            let team = if serve {
                &mut round.games[gi].serve_team
            } else {
                &mut round.games[gi].receive_team
            };
            team.players[pos] = id;
        }
        Slot::SittingOut(idx) => round.sitting_out_ids[idx] = id,
    }
}

/// Swap two players' positions in the current round (game slot or sit-out
/// slot) without re-running the assigner. Allowed while the round is Pending
/// or Started; rejected when it would leave a game without 4 distinct
/// players.
pub fn swap_players(session: &Session, a: PlayerId, b: PlayerId) -> Result<Session, EngineError> {
    if session.state != SessionState::Live || a == b {
        return Err(EngineError::InvalidState);
    }
    let current = session.current_round().ok_or(EngineError::InvalidState)?;
    if current.phase == RoundPhase::Completed {
        return Err(EngineError::InvalidState);
    }

    let slot_a = find_slot(current, a).ok_or(EngineError::PlayerNotFound(a))?;
    let slot_b = find_slot(current, b).ok_or(EngineError::PlayerNotFound(b))?;

    let mut next = session.clone();
    if let Some(round) = next.current_round_mut() {
        write_slot(round, &slot_a, b);
        write_slot(round, &slot_b, a);
        if round.games.iter().any(|g| !g.has_distinct_players()) {
            return Err(EngineError::InvalidState);
        }
    }
    Ok(next)
}

/// End a live session: Live -> Complete. Valid mid-round; the open round
/// stays in the history as-is.
pub fn end_session(session: &Session) -> Result<Session, EngineError> {
    if session.state != SessionState::Live {
        return Err(EngineError::InvalidState);
    }
    let mut next = session.clone();
    next.state = SessionState::Complete;
    Ok(next)
}

/// Archive a completed session: Complete -> Archived.
pub fn archive_session(session: &Session) -> Result<Session, EngineError> {
    if session.state != SessionState::Complete {
        return Err(EngineError::InvalidState);
    }
    let mut next = session.clone();
    next.state = SessionState::Archived;
    Ok(next)
}

/// Restore an archived session: Archived -> Complete. The only way back out
/// of Archived.
pub fn restore_session(session: &Session) -> Result<Session, EngineError> {
    if session.state != SessionState::Archived {
        return Err(EngineError::InvalidState);
    }
    let mut next = session.clone();
    next.state = SessionState::Complete;
    Ok(next)
}

fn check_admin_state(session: &Session) -> Result<(), EngineError> {
    match session.state {
        SessionState::New | SessionState::Live => Ok(()),
        _ => Err(EngineError::InvalidState),
    }
}

/// Add a player to the session roster (New or Live). The current round is
/// untouched; the player joins the pool at the next generation.
pub fn add_player(session: &Session, player_id: PlayerId) -> Result<Session, EngineError> {
    check_admin_state(session)?;
    if session.player_ids.contains(&player_id) {
        return Err(EngineError::DuplicatePlayer(player_id));
    }
    let mut next = session.clone();
    next.player_ids.push(player_id);
    Ok(next)
}

/// Remove a player from the session roster (New or Live). Round history and
/// the current round keep their recorded ids.
pub fn remove_player(session: &Session, player_id: PlayerId) -> Result<Session, EngineError> {
    check_admin_state(session)?;
    if !session.player_ids.contains(&player_id) {
        return Err(EngineError::PlayerNotFound(player_id));
    }
    let mut next = session.clone();
    next.player_ids.retain(|&id| id != player_id);
    Ok(next)
}

/// Add a court (New or Live). Takes effect at the next generation; the
/// caller regenerates the Pending round right after a court change.
pub fn add_court(session: &Session, court: Court) -> Result<Session, EngineError> {
    check_admin_state(session)?;
    if session.find_court(court.id).is_some() {
        return Err(EngineError::DuplicateCourt(court.id));
    }
    let mut next = session.clone();
    next.courts.push(court);
    Ok(next)
}

/// Replace a court's configuration by id (New or Live).
pub fn update_court(session: &Session, court: Court) -> Result<Session, EngineError> {
    check_admin_state(session)?;
    let mut next = session.clone();
    let existing = next
        .courts
        .iter_mut()
        .find(|c| c.id == court.id)
        .ok_or(EngineError::CourtNotFound(court.id))?;
    *existing = court;
    Ok(next)
}

/// Remove a court by id (New or Live).
pub fn remove_court(session: &Session, court_id: CourtId) -> Result<Session, EngineError> {
    check_admin_state(session)?;
    if session.find_court(court_id).is_none() {
        return Err(EngineError::CourtNotFound(court_id));
    }
    let mut next = session.clone();
    next.courts.retain(|c| c.id != court_id);
    Ok(next)
}
