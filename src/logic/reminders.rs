//! Tournament start reminders for joined players with push enabled.

use crate::logic::countdown::Countdown;
use crate::models::{TournamentId, UserId};
use crate::store::ArenaStore;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// One push message to one device.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Reminder {
    pub uid: UserId,
    pub token: String,
    pub tournament_id: TournamentId,
    pub title: String,
    pub body: String,
}

/// Tournaments announced in one sweep and the messages to push for them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReminderBatch {
    pub announced: Vec<TournamentId>,
    pub reminders: Vec<Reminder>,
}

/// Reminders for every tournament starting within `lead` that has not been
/// announced yet. Each such tournament is marked `reminder_sent`, even when
/// none of its players registered a token.
pub fn collect_due_reminders(
    store: &mut ArenaStore,
    now: DateTime<Utc>,
    lead: Duration,
) -> ReminderBatch {
    let mut batch = ReminderBatch::default();
    for entry in store.tournaments.values_mut() {
        let t = &mut entry.tournament;
        if t.reminder_sent || t.has_started(now) || t.start_time - now > lead {
            continue;
        }
        t.reminder_sent = true;
        batch.announced.push(t.id);
        let body = format!("{} starts in {}", t.title, Countdown::until(t.start_time, now));
        for uid in entry.players.keys() {
            let token = store
                .users
                .get(uid)
                .and_then(|p| p.notification_token.clone());
            if let Some(token) = token {
                batch.reminders.push(Reminder {
                    uid: uid.clone(),
                    token,
                    tournament_id: t.id,
                    title: "Tournament starting soon".to_string(),
                    body: body.clone(),
                });
            }
        }
    }
    batch
}
