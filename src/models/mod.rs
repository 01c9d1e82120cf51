//! Data structures for doubles sessions: players, courts, games, rounds, stats.

mod court;
mod game;
mod player;
mod round;
mod session;
mod stats;

pub use court::{Court, CourtId};
pub use game::{Game, GameId, Score, Team};
pub use player::{Player, PlayerId};
pub use round::{GameAssignment, Round, RoundAssignment, RoundPhase, RoundResults};
pub use session::{
    EngineError, LiveData, Partnership, PartnershipConstraint, Session, SessionId, SessionState,
};
pub use stats::PlayerStats;
