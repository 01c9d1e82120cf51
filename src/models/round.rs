//! Round, RoundAssignment, and per-round results.

use crate::models::court::CourtId;
use crate::models::game::{Game, GameId, Score, Team};
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle phase of a round within a live session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Generated but not started; may be reshuffled or edited.
    #[default]
    Pending,
    /// In play; games have `started_at` stamped.
    Started,
    /// Results applied and stats aggregated.
    Completed,
}

/// One round of a live session: its games plus the players sitting out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub games: Vec<Game>,
    /// Eligible players not assigned to any game this round.
    pub sitting_out_ids: Vec<PlayerId>,
    pub phase: RoundPhase,
}

impl Round {
    /// Build a Pending round from a generated assignment.
    pub fn from_assignment(assignment: &RoundAssignment) -> Self {
        Self {
            round_number: assignment.round_number,
            games: assignment
                .game_assignments
                .iter()
                .map(|g| Game::new(g.court_id, g.serve_team, g.receive_team))
                .collect(),
            sitting_out_ids: assignment.sitting_out_ids.clone(),
            phase: RoundPhase::Pending,
        }
    }

    /// All player ids that appear in a game this round.
    pub fn playing_ids(&self) -> Vec<PlayerId> {
        self.games.iter().flat_map(|g| g.player_ids()).collect()
    }
}

/// One game slot of a generated assignment (no game id yet; ids are assigned
/// when the round is applied to a session).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameAssignment {
    pub court_id: CourtId,
    pub serve_team: Team,
    pub receive_team: Team,
}

/// Output of the assigner: the games to play and who sits out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundAssignment {
    pub round_number: u32,
    pub game_assignments: Vec<GameAssignment>,
    pub sitting_out_ids: Vec<PlayerId>,
}

/// Results for a round, keyed by game id. None means the game finished
/// without a recorded score.
pub type RoundResults = HashMap<GameId, Option<Score>>;
