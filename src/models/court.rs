//! Court data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a court.
pub type CourtId = Uuid;

/// A court in the session. Inactive courts are skipped during round generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    pub is_active: bool,
    /// Minimum skill rating to play on this court. Unrated players do not
    /// qualify for a court with a minimum.
    pub minimum_rating: Option<f64>,
}

impl Court {
    /// Create a new active court with no rating requirement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
            minimum_rating: None,
        }
    }

    /// Create a new active court with a minimum rating requirement.
    pub fn with_minimum_rating(name: impl Into<String>, minimum: f64) -> Self {
        Self {
            minimum_rating: Some(minimum),
            ..Self::new(name)
        }
    }
}
