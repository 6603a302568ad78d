//! Data structures for the tournament hub: users, tournaments, joined players, errors.

mod error;
mod player;
mod tournament;
mod user;

pub use error::ArenaError;
pub use player::JoinedPlayer;
pub use tournament::{
    Category, MatchType, RoomDetails, Tournament, TournamentDraft, TournamentId, TournamentStatus,
};
pub use user::{Identity, ProfileCard, UserId, UserProfile};
