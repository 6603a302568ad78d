//! Admin actions: create / edit / delete (with undo) tournaments and top up wallets.

use crate::models::{ArenaError, Category, RoomDetails, Tournament, TournamentDraft, TournamentId};
use crate::store::{ArenaStore, DeletedTournament, TournamentEntry};
use chrono::{DateTime, Duration, Utc};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalise a draft and resolve its seat count.
///
/// Clash Squad seats come from the match type (4v4 = 8, 6v6 = 12); Battle
/// Royale needs an explicit positive count. Blank optional text becomes `None`
/// and kill prize is dropped outside Battle Royale.
pub fn validate_draft(mut draft: TournamentDraft) -> Result<(TournamentDraft, u32), ArenaError> {
    draft.title = draft.title.trim().to_string();
    if draft.title.is_empty() {
        return Err(ArenaError::MissingTitle);
    }
    if draft.match_type.category() != draft.category {
        return Err(ArenaError::InvalidMatchType {
            category: draft.category,
            match_type: draft.match_type,
        });
    }
    let total_seats = match draft.match_type.fixed_seats() {
        Some(seats) => seats,
        None => draft
            .total_seats
            .filter(|&n| n > 0)
            .ok_or(ArenaError::InvalidSeatCount)?,
    };
    draft.total_seats = Some(total_seats);
    draft.prize = draft.prize.trim().to_string();
    draft.room = RoomDetails {
        room_type: non_blank(draft.room.room_type),
        room_id: non_blank(draft.room.room_id),
        room_password: non_blank(draft.room.room_password),
        game_uid: non_blank(draft.room.game_uid),
    };
    draft.kill_per_pkr = match draft.category {
        Category::Br => non_blank(draft.kill_per_pkr),
        Category::Cs => None,
    };
    draft.image_url = non_blank(draft.image_url);
    Ok((draft, total_seats))
}

/// Publish a new tournament with every seat free.
pub fn create_tournament(
    store: &mut ArenaStore,
    admin: &str,
    draft: TournamentDraft,
    now: DateTime<Utc>,
) -> Result<Tournament, ArenaError> {
    store.require_admin(admin)?;
    let (draft, total_seats) = validate_draft(draft)?;
    let tournament = Tournament::from_draft(draft, total_seats, now);
    log::info!("{} created tournament {} ({})", admin, tournament.id, tournament.title);
    store
        .tournaments
        .insert(tournament.id, TournamentEntry::new(tournament.clone()));
    Ok(tournament)
}

/// Apply an edited draft. Id, creation time and roster are kept; free seats are
/// recomputed against the roster so the new total can never drop below it.
pub fn update_tournament(
    store: &mut ArenaStore,
    admin: &str,
    id: TournamentId,
    draft: TournamentDraft,
    now: DateTime<Utc>,
) -> Result<Tournament, ArenaError> {
    store.require_admin(admin)?;
    let (draft, total_seats) = validate_draft(draft)?;
    let entry = store.entry_mut(id)?;
    let joined = entry.players.len() as u32;
    if total_seats < joined {
        return Err(ArenaError::SeatsBelowJoined {
            joined,
            total: total_seats,
        });
    }

    let t = &mut entry.tournament;
    if t.start_time != draft.start_time {
        t.reminder_sent = false;
    }
    t.title = draft.title;
    t.category = draft.category;
    t.match_type = draft.match_type;
    t.total_seats = total_seats;
    t.start_time = draft.start_time;
    t.entry_fee = draft.entry_fee;
    t.prize = draft.prize;
    t.room = draft.room;
    t.require_game_uid = draft.require_game_uid;
    t.status = draft.status;
    t.kill_per_pkr = draft.kill_per_pkr;
    t.image_url = draft.image_url;
    t.updated_at = now;
    entry.sync_seats();
    log::info!("{} updated tournament {}", admin, id);
    Ok(entry.tournament.clone())
}

/// Remove a tournament and its roster. The last deleted one can be restored
/// with [`undo_delete`] until the undo window passes.
pub fn delete_tournament(
    store: &mut ArenaStore,
    admin: &str,
    id: TournamentId,
    now: DateTime<Utc>,
) -> Result<Tournament, ArenaError> {
    store.require_admin(admin)?;
    let entry = store
        .tournaments
        .remove(&id)
        .ok_or(ArenaError::TournamentNotFound(id))?;
    let tournament = entry.tournament.clone();
    log::info!("{} deleted tournament {} ({} players)", admin, id, entry.players.len());
    store.recently_deleted = Some(DeletedTournament {
        entry,
        deleted_at: now,
    });
    Ok(tournament)
}

/// Restore the last deleted tournament if it was deleted within `window`.
pub fn undo_delete(
    store: &mut ArenaStore,
    admin: &str,
    now: DateTime<Utc>,
    window: Duration,
) -> Result<Tournament, ArenaError> {
    store.require_admin(admin)?;
    expire_undo(store, now, window);
    let deleted = store
        .recently_deleted
        .take()
        .ok_or(ArenaError::NothingToUndo)?;
    let id = deleted.entry.tournament.id;
    if store.tournaments.contains_key(&id) {
        return Err(ArenaError::NothingToUndo);
    }
    let tournament = deleted.entry.tournament.clone();
    store.tournaments.insert(id, deleted.entry);
    log::info!("{} restored tournament {}", admin, id);
    Ok(tournament)
}

/// Drop the undo buffer once its window has passed. Returns true if something was dropped.
pub fn expire_undo(store: &mut ArenaStore, now: DateTime<Utc>, window: Duration) -> bool {
    let expired = store
        .recently_deleted
        .as_ref()
        .is_some_and(|d| now - d.deleted_at > window);
    if expired {
        store.recently_deleted = None;
    }
    expired
}

/// Add coins to a user's wallet. Returns the new balance.
pub fn credit_coins(
    store: &mut ArenaStore,
    admin: &str,
    uid: &str,
    amount: u64,
) -> Result<u64, ArenaError> {
    store.require_admin(admin)?;
    if amount == 0 {
        return Err(ArenaError::InvalidCoinAmount);
    }
    let profile = store.user_mut(uid)?;
    profile.coins = profile.coins.saturating_add(amount);
    log::info!("{} credited {} coins to {} (balance {})", admin, amount, uid, profile.coins);
    Ok(profile.coins)
}
