//! Joining a tournament: seat and coin accounting in one step.

use crate::models::{ArenaError, JoinedPlayer, TournamentId};
use crate::store::ArenaStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a successful join cost and left behind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct JoinReceipt {
    pub tournament_id: TournamentId,
    pub entry_fee_paid: u64,
    pub seats_left: u32,
    pub coins_left: u64,
}

/// Take a seat in tournament `id` for user `uid`.
///
/// 1. Tournament must exist and not have started.
/// 2. A seat must be free and the user must not already hold one.
/// 3. If the tournament requires a game UID, the profile must carry one.
/// 4. Paid tournaments require `coins >= entry_fee`; the fee is deducted.
/// 5. The player is recorded and `seats_left` drops by one.
///
/// Every check happens before any mutation and the caller holds `store`
/// exclusively, so two joins can never both take the last seat or spend the
/// same coins.
pub fn join_tournament(
    store: &mut ArenaStore,
    id: TournamentId,
    uid: &str,
    now: DateTime<Utc>,
) -> Result<JoinReceipt, ArenaError> {
    let entry = store.entry(id)?;
    let t = &entry.tournament;
    if t.has_started(now) {
        return Err(ArenaError::TournamentStarted);
    }
    if t.seats_left == 0 {
        return Err(ArenaError::TournamentFull);
    }
    if entry.has_player(uid) {
        return Err(ArenaError::AlreadyJoined);
    }
    let fee = t.entry_fee;
    let require_game_uid = t.require_game_uid;

    let profile = store.user_mut(uid)?;
    if require_game_uid && profile.ff_uid.is_empty() {
        return Err(ArenaError::GameUidRequired);
    }
    profile.spend(fee)?;
    let coins_left = profile.coins;
    let player = JoinedPlayer::from_profile(profile, fee, now);

    let entry = store.entry_mut(id)?;
    entry.players.insert(player.uid.clone(), player);
    entry.tournament.seats_left -= 1;
    log::info!(
        "{} joined {} (fee {}, {} seats left)",
        uid,
        id,
        fee,
        entry.tournament.seats_left
    );
    Ok(JoinReceipt {
        tournament_id: id,
        entry_fee_paid: fee,
        seats_left: entry.tournament.seats_left,
        coins_left,
    })
}
