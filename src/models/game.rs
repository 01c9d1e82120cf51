//! Game, Team, and Score for doubles games.

use crate::models::court::CourtId;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// An unordered pair of two distinct players forming one side of a doubles game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub players: [PlayerId; 2],
}

impl Team {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        Self { players: [a, b] }
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players[0] == id || self.players[1] == id
    }

    /// The other member of the team, if `id` is a member.
    pub fn partner_of(&self, id: PlayerId) -> Option<PlayerId> {
        if self.players[0] == id {
            Some(self.players[1])
        } else if self.players[1] == id {
            Some(self.players[0])
        } else {
            None
        }
    }
}

/// Final score of a game, from the serve team's perspective.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub serve_score: u32,
    pub receive_score: u32,
}

/// A single doubles game: serve team vs. receive team on one court.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub court_id: CourtId,
    pub serve_team: Team,
    pub receive_team: Team,
    /// None until a result is recorded (or the session runs without scoring).
    pub score: Option<Score>,
    pub is_completed: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(court_id: CourtId, serve_team: Team, receive_team: Team) -> Self {
        Self {
            id: Uuid::new_v4(),
            court_id,
            serve_team,
            receive_team,
            score: None,
            is_completed: false,
            started_at: None,
            completed_at: None,
        }
    }

    /// All four player ids in this game (serve team first).
    pub fn player_ids(&self) -> [PlayerId; 4] {
        [
            self.serve_team.players[0],
            self.serve_team.players[1],
            self.receive_team.players[0],
            self.receive_team.players[1],
        ]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.serve_team.contains(id) || self.receive_team.contains(id)
    }

    /// A game is valid only with 4 pairwise-distinct players.
    pub fn has_distinct_players(&self) -> bool {
        let ids = self.player_ids();
        for i in 0..4 {
            for j in (i + 1)..4 {
                if ids[i] == ids[j] {
                    return false;
                }
            }
        }
        true
    }
}
