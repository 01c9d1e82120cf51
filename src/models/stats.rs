//! Per-player cumulative statistics for a session.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cumulative participation/outcome counters for one player in one session.
/// All counters only grow across completed rounds, except `consecutive_games`
/// which resets to 0 on a sit-out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub games_played: u32,
    pub games_sat_out: u32,
    /// Games played since the player's last sit-out.
    pub consecutive_games: u32,
    pub total_score: u32,
    pub total_score_against: u32,
    /// How often each other player has been this player's teammate.
    pub partners: HashMap<PlayerId, u32>,
    /// How often each other player has been on the opposing team.
    pub opponents: HashMap<PlayerId, u32>,
    /// Running mean rating of rated opponents faced so far.
    pub average_rating: Option<f64>,
    /// Sample count behind `average_rating`.
    pub rated_opponents_seen: u32,
}

impl PlayerStats {
    /// Zeroed stats for a player who has not appeared in any round yet.
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            games_played: 0,
            games_sat_out: 0,
            consecutive_games: 0,
            total_score: 0,
            total_score_against: 0,
            partners: HashMap::new(),
            opponents: HashMap::new(),
            average_rating: None,
            rated_opponents_seen: 0,
        }
    }

    /// Times this player has partnered with `other`.
    pub fn partner_count(&self, other: PlayerId) -> u32 {
        self.partners.get(&other).copied().unwrap_or(0)
    }

    /// Times this player has faced `other` across the net.
    pub fn opponent_count(&self, other: PlayerId) -> u32 {
        self.opponents.get(&other).copied().unwrap_or(0)
    }

    /// Fold one rated opponent's rating into the running average.
    pub fn record_opponent_rating(&mut self, rating: f64) {
        let n = self.rated_opponents_seen as f64;
        let mean = self.average_rating.unwrap_or(0.0);
        self.average_rating = Some((mean * n + rating) / (n + 1.0));
        self.rated_opponents_seen += 1;
    }
}
