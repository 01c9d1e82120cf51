//! Court eligibility: which courts can host which players.

use crate::models::{Court, Player};

/// Active courts in declared order. The order is stable round to round so
/// that constrained courts fill from the same priority each time.
pub(crate) fn usable_courts(courts: &[Court]) -> Vec<&Court> {
    courts.iter().filter(|c| c.is_active).collect()
}

/// Whether a player qualifies for a court's minimum rating.
///
/// Policy: an unrated player fails a court that has a minimum. A court with
/// no minimum accepts everyone.
pub(crate) fn meets_minimum(player: &Player, court: &Court) -> bool {
    match court.minimum_rating {
        None => true,
        Some(min) => match player.rating {
            Some(r) => r >= min,
            None => false,
        },
    }
}
