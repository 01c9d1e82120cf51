//! Session, SessionState, and EngineError.

use crate::models::court::{Court, CourtId};
use crate::models::game::GameId;
use crate::models::player::PlayerId;
use crate::models::round::{Round, RoundPhase};
use crate::models::stats::PlayerStats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Errors that can occur during session operations.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// Not enough eligible players to generate a round (need at least 4).
    NotEnoughPlayers { required: usize, available: usize },
    /// Not enough players to start a live session (need 4 per active court).
    NotEnoughPlayersToStart { required: usize, available: usize },
    /// The assigner produced zero games (e.g. no usable court fits 4 players).
    GenerationEmpty,
    /// Session or round is not in a state that allows this action.
    InvalidState,
    /// Player not found in the directory, session roster, or current round.
    PlayerNotFound(PlayerId),
    /// Court not found in the session.
    CourtNotFound(CourtId),
    /// Game not found in the current round.
    GameNotFound(GameId),
    /// Player is already in the session roster.
    DuplicatePlayer(PlayerId),
    /// Court with this id is already configured.
    DuplicateCourt(CourtId),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotEnoughPlayers { required, available } => {
                write!(f, "Need at least {} eligible players to generate a round (have {})", required, available)
            }
            EngineError::NotEnoughPlayersToStart { required, available } => {
                write!(f, "Need at least {} players to start (have {})", required, available)
            }
            EngineError::GenerationEmpty => write!(f, "No games could be generated"),
            EngineError::InvalidState => write!(f, "Invalid state for this action"),
            EngineError::PlayerNotFound(_) => write!(f, "Player not found"),
            EngineError::CourtNotFound(_) => write!(f, "Court not found"),
            EngineError::GameNotFound(_) => write!(f, "Game not found in the current round"),
            EngineError::DuplicatePlayer(_) => write!(f, "Player is already in the session"),
            EngineError::DuplicateCourt(_) => write!(f, "Court is already configured"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Lifecycle state of a session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Configuring roster and courts; no rounds yet.
    #[default]
    New,
    /// Rounds being generated, started, and completed.
    Live,
    /// Ended; history retained, no further rounds.
    Complete,
    /// Archived; restorable back to Complete.
    Archived,
}

/// A configured fixed partnership: the two players are always teammates when
/// both are playing, and sit out together when one is unavailable.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Partnership {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
}

/// Fixed-partnership configuration for a session.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PartnershipConstraint {
    pub partnerships: Vec<Partnership>,
}

/// Round history and cumulative stats of a live session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveData {
    pub rounds: Vec<Round>,
    pub player_stats: HashMap<PlayerId, PlayerStats>,
}

/// Full session state: roster, courts, constraints, flags, and live data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Roster: ids into the externally-owned player directory.
    pub player_ids: Vec<PlayerId>,
    /// Courts in declared priority order.
    pub courts: Vec<Court>,
    pub partnership_constraint: Option<PartnershipConstraint>,
    /// Whether the session records game scores.
    pub scoring_enabled: bool,
    /// Whether the UI should display player ratings.
    pub show_ratings: bool,
    pub state: SessionState,
    pub live_data: LiveData,
}

impl Session {
    /// Create a new session in the New state with an empty roster.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            player_ids: Vec::new(),
            courts: Vec::new(),
            partnership_constraint: None,
            scoring_enabled: true,
            show_ratings: false,
            state: SessionState::New,
            live_data: LiveData::default(),
        }
    }

    /// Create a session with an initial roster and courts. Still New until started.
    pub fn with_roster(player_ids: Vec<PlayerId>, courts: Vec<Court>) -> Self {
        Self {
            player_ids,
            courts,
            ..Self::new()
        }
    }

    /// Active courts in declared order.
    pub fn active_courts(&self) -> Vec<&Court> {
        self.courts.iter().filter(|c| c.is_active).collect()
    }

    pub fn find_court(&self, id: CourtId) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    /// The most recent round, whatever its phase.
    pub fn current_round(&self) -> Option<&Round> {
        self.live_data.rounds.last()
    }

    pub(crate) fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.live_data.rounds.last_mut()
    }

    /// Round number the next generated assignment should carry: the current
    /// Pending round's number when one exists (reshuffle replaces it),
    /// otherwise one past the last round.
    pub fn next_round_number(&self) -> u32 {
        match self.current_round() {
            Some(r) if r.phase == RoundPhase::Pending => r.round_number,
            Some(r) => r.round_number + 1,
            None => 1,
        }
    }

    /// Cumulative stats for a player, zeroed if the player has no history yet.
    pub fn stats_for(&self, id: PlayerId) -> PlayerStats {
        self.live_data
            .player_stats
            .get(&id)
            .cloned()
            .unwrap_or_else(|| PlayerStats::new(id))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
