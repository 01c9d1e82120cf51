//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in games and lookups).
pub type PlayerId = Uuid;

/// A player in the directory. Sessions reference players by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Skill rating (e.g. 3.5, 4.0). None for unrated players.
    pub rating: Option<f64>,
    /// Session-scoped pause: a paused player is excluded from round generation.
    pub paused: bool,
}

impl Player {
    /// Create a new unrated, unpaused player with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rating: None,
            paused: false,
        }
    }

    /// Create a new player with a skill rating.
    pub fn with_rating(name: impl Into<String>, rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..Self::new(name)
        }
    }
}
