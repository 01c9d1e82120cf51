//! Session business logic: round assignment, rotation, stats, lifecycle.

mod assigner;
mod courts;
mod lifecycle;
mod partnerships;
mod roster;
mod rotation;
mod stats;

pub use assigner::generate_round_assignment;
pub use lifecycle::{
    add_court, add_player, apply_next_round, archive_session, complete_round, end_session,
    remove_court, remove_player, restore_session, start_live_session, start_round, swap_players,
    update_court, update_current_round,
};
pub use stats::update_stats_for_round;
