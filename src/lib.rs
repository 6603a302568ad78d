//! Free Fire tournament hub: library with models, store, business logic and the HTTP API.

pub mod auth;
pub mod config;
pub mod logic;
pub mod models;
pub mod notify;
pub mod persist;
pub mod store;
pub mod web;

pub use auth::TokenVerifier;
pub use config::Config;
pub use logic::{
    admin_board, collect_due_reminders, create_tournament, credit_coins, delete_tournament,
    expire_undo, join_tournament, kick_player, list_players, list_tournaments,
    register_notification_token, roster_csv, sign_in, tournament_card, undo_delete,
    update_profile, update_tournament, validate_draft, AdminTournamentRow, Countdown,
    DisplayStatus, JoinReceipt, ProfileUpdate, Reminder, ReminderBatch, SignIn, TournamentCard,
    TournamentFilter,
};
pub use models::{
    ArenaError, Category, Identity, JoinedPlayer, MatchType, ProfileCard, RoomDetails, Tournament,
    TournamentDraft, TournamentId, TournamentStatus, UserId, UserProfile,
};
pub use store::{ArenaStore, DeletedTournament, TournamentEntry};
