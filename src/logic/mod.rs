//! Hub business logic: profiles, listing, joining, admin, rosters, reminders.

mod admin;
mod countdown;
mod join;
mod listing;
mod profile;
mod reminders;
mod roster;

pub use admin::{
    create_tournament, credit_coins, delete_tournament, expire_undo, undo_delete,
    update_tournament, validate_draft,
};
pub use countdown::{Countdown, DisplayStatus};
pub use join::{join_tournament, JoinReceipt};
pub use listing::{
    admin_board, list_tournaments, tournament_card, AdminTournamentRow, TournamentCard,
    TournamentFilter,
};
pub use profile::{register_notification_token, sign_in, update_profile, ProfileUpdate, SignIn};
pub use reminders::{collect_due_reminders, Reminder, ReminderBatch};
pub use roster::{kick_player, list_players, roster_csv};
