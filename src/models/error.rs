//! ArenaError: every way a hub operation can be refused.

use crate::models::tournament::{Category, MatchType, TournamentId};
use crate::models::user::UserId;

/// Errors that can occur during hub operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArenaError {
    /// No session, or the session uid has no profile yet.
    NotSignedIn,
    /// Sign-in token missing, expired, or not signed by the identity provider.
    InvalidCredential,
    /// Caller is not in the admin set.
    Forbidden,
    /// No user profile with this uid.
    UserNotFound(UserId),
    /// No tournament with this id.
    TournamentNotFound(TournamentId),
    /// Joins close at start time.
    TournamentStarted,
    /// No seats left.
    TournamentFull,
    /// The user already holds a seat in this tournament.
    AlreadyJoined,
    /// Tournament requires a game UID and the profile has none.
    GameUidRequired,
    /// Coin balance below the entry fee.
    InsufficientCoins { needed: u64, available: u64 },
    /// FF UID and IGN are both required.
    ProfileIncomplete,
    /// Another user already registered this FF UID.
    FfUidTaken,
    /// Notification token was blank.
    EmptyToken,
    /// Tournament title was blank.
    MissingTitle,
    /// Match type does not belong to the category (e.g. Solo in Clash Squad).
    InvalidMatchType { category: Category, match_type: MatchType },
    /// Battle Royale tournaments need a positive seat count.
    InvalidSeatCount,
    /// An edit tried to shrink the seat count below the number already joined.
    SeatsBelowJoined { joined: u32, total: u32 },
    /// Player not found in the tournament's roster.
    PlayerNotFound(UserId),
    /// Undo buffer is empty or its window has passed.
    NothingToUndo,
    /// Coin credit must be positive.
    InvalidCoinAmount,
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArenaError::NotSignedIn => write!(f, "Please login first"),
            ArenaError::InvalidCredential => write!(f, "Sign-in could not be verified"),
            ArenaError::Forbidden => write!(f, "Access denied: you are not an admin"),
            ArenaError::UserNotFound(_) => write!(f, "User not found"),
            ArenaError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            ArenaError::TournamentStarted => write!(f, "Tournament started"),
            ArenaError::TournamentFull => write!(f, "Tournament full"),
            ArenaError::AlreadyJoined => write!(f, "You're already in this tournament"),
            ArenaError::GameUidRequired => write!(f, "This tournament requires your FF UID on your profile"),
            ArenaError::InsufficientCoins { needed, available } => {
                write!(f, "Not enough coins (need {}, have {})", needed, available)
            }
            ArenaError::ProfileIncomplete => write!(f, "FF UID and IGN required"),
            ArenaError::FfUidTaken => write!(f, "FF UID already registered"),
            ArenaError::EmptyToken => write!(f, "Notification token must not be empty"),
            ArenaError::MissingTitle => write!(f, "Tournament title is required"),
            ArenaError::InvalidMatchType { category, match_type } => {
                write!(f, "Match type {} is not available for {}", match_type, category)
            }
            ArenaError::InvalidSeatCount => write!(f, "Total seats must be greater than zero"),
            ArenaError::SeatsBelowJoined { joined, total } => {
                write!(f, "Cannot set {} seats: {} players already joined", total, joined)
            }
            ArenaError::PlayerNotFound(_) => write!(f, "Player not found"),
            ArenaError::NothingToUndo => write!(f, "Nothing to undo"),
            ArenaError::InvalidCoinAmount => write!(f, "Coin amount must be greater than zero"),
        }
    }
}

impl std::error::Error for ArenaError {}
