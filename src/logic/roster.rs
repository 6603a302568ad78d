//! Joined players: listing, kicking, CSV export.

use crate::models::{ArenaError, JoinedPlayer, TournamentId};
use crate::store::ArenaStore;
use serde::Serialize;

/// Roster in join order.
pub fn list_players(
    store: &ArenaStore,
    admin: &str,
    id: TournamentId,
) -> Result<Vec<JoinedPlayer>, ArenaError> {
    store.require_admin(admin)?;
    let mut players: Vec<JoinedPlayer> = store.entry(id)?.players.values().cloned().collect();
    players.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then_with(|| a.uid.cmp(&b.uid)));
    Ok(players)
}

/// Remove a player from the roster and free their seat. With `refund`, the fee
/// they paid goes back to their wallet.
pub fn kick_player(
    store: &mut ArenaStore,
    admin: &str,
    id: TournamentId,
    uid: &str,
    refund: bool,
) -> Result<JoinedPlayer, ArenaError> {
    store.require_admin(admin)?;
    let entry = store.entry_mut(id)?;
    let player = entry
        .players
        .remove(uid)
        .ok_or_else(|| ArenaError::PlayerNotFound(uid.to_string()))?;
    entry.sync_seats();

    if refund && player.entry_fee_paid > 0 {
        match store.users.get_mut(uid) {
            Some(profile) => profile.coins = profile.coins.saturating_add(player.entry_fee_paid),
            None => log::warn!("Kicked {} from {} but no profile to refund", uid, id),
        }
    }
    log::info!("{} kicked {} from {} (refund: {})", admin, player.label(), id, refund);
    Ok(player)
}

#[derive(Serialize)]
struct RosterRow<'a> {
    ign: &'a str,
    ff_uid: &'a str,
    uid: &'a str,
    email: &'a str,
    phone: &'a str,
    region: &'a str,
    entry_fee_paid: u64,
    joined_at: String,
}

/// Render a roster as CSV with a header row.
pub fn roster_csv(players: &[JoinedPlayer]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for p in players {
        wtr.serialize(RosterRow {
            ign: p.label(),
            ff_uid: &p.ff_uid,
            uid: &p.uid,
            email: p.email.as_deref().unwrap_or(""),
            phone: &p.phone,
            region: &p.region,
            entry_fee_paid: p.entry_fee_paid,
            joined_at: p.joined_at.to_rfc3339(),
        })?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
