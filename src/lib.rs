//! Doubles open-play organizer: round assignment engine and player stats.

pub mod logic;
pub mod models;

pub use logic::{
    add_court, add_player, apply_next_round, archive_session, complete_round, end_session,
    generate_round_assignment, remove_court, remove_player, restore_session, start_live_session,
    start_round, swap_players, update_court, update_current_round, update_stats_for_round,
};
pub use models::{
    Court, CourtId, EngineError, Game, GameAssignment, GameId, LiveData, Partnership,
    PartnershipConstraint, Player, PlayerId, PlayerStats, Round, RoundAssignment, RoundPhase,
    RoundResults, Score, Session, SessionId, SessionState, Team,
};
