//! Public tournament list (filtered, with joined flags) and the admin board.

use crate::logic::countdown::{Countdown, DisplayStatus};
use crate::models::{
    ArenaError, Category, MatchType, RoomDetails, Tournament, TournamentId, TournamentStatus,
};
use crate::store::{ArenaStore, TournamentEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Category and match type filter. `None` means "all".
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TournamentFilter {
    pub category: Option<Category>,
    pub match_type: Option<MatchType>,
}

impl TournamentFilter {
    /// Parse query values. "all", blank, or unrecognised values select everything.
    pub fn parse(category: Option<&str>, match_type: Option<&str>) -> Self {
        Self {
            category: category.and_then(|c| c.parse().ok()),
            match_type: match_type.and_then(|m| m.parse().ok()),
        }
    }

    pub fn matches(&self, t: &Tournament) -> bool {
        self.category.map_or(true, |c| t.category == c)
            && self.match_type.map_or(true, |m| t.match_type == m)
    }
}

/// One card on the public list.
#[derive(Clone, Debug, Serialize)]
pub struct TournamentCard {
    pub id: TournamentId,
    pub title: String,
    pub category: Category,
    pub match_type: MatchType,
    pub start_time: DateTime<Utc>,
    pub prize: String,
    pub entry_fee: u64,
    pub total_seats: u32,
    pub seats_left: u32,
    pub kill_per_pkr: Option<String>,
    pub image_url: Option<String>,
    pub require_game_uid: bool,
    pub status: TournamentStatus,
    pub display_status: DisplayStatus,
    pub countdown: String,
    pub urgent: bool,
    /// The viewer already holds a seat.
    pub joined: bool,
    /// Only present for joined players and admins.
    pub room: Option<RoomDetails>,
}

impl TournamentCard {
    pub fn build(entry: &TournamentEntry, viewer: Option<&str>, viewer_is_admin: bool, now: DateTime<Utc>) -> Self {
        let t = &entry.tournament;
        let joined = viewer.is_some_and(|uid| entry.has_player(uid));
        let countdown = Countdown::until(t.start_time, now);
        Self {
            id: t.id,
            title: t.title.clone(),
            category: t.category,
            match_type: t.match_type,
            start_time: t.start_time,
            prize: t.prize.clone(),
            entry_fee: t.entry_fee,
            total_seats: t.total_seats,
            seats_left: t.seats_left,
            kill_per_pkr: t.kill_per_pkr.clone(),
            image_url: t.image_url.clone(),
            require_game_uid: t.require_game_uid,
            status: t.status,
            display_status: DisplayStatus::at(t.start_time, now),
            countdown: countdown.to_string(),
            urgent: countdown.is_urgent(),
            joined,
            room: (joined || viewer_is_admin).then(|| t.room.clone()),
        }
    }
}

/// Tournaments matching `filter`, soonest first.
pub fn list_tournaments(
    store: &ArenaStore,
    filter: TournamentFilter,
    viewer: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<TournamentCard> {
    let is_admin = viewer.is_some_and(|uid| store.is_admin(uid));
    let mut entries: Vec<&TournamentEntry> = store
        .tournaments
        .values()
        .filter(|e| filter.matches(&e.tournament))
        .collect();
    entries.sort_by_key(|e| (e.tournament.start_time, e.tournament.id));
    entries
        .into_iter()
        .map(|e| TournamentCard::build(e, viewer, is_admin, now))
        .collect()
}

/// A single card (404 if missing).
pub fn tournament_card(
    store: &ArenaStore,
    id: TournamentId,
    viewer: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TournamentCard, ArenaError> {
    let entry = store.entry(id)?;
    let is_admin = viewer.is_some_and(|uid| store.is_admin(uid));
    Ok(TournamentCard::build(entry, viewer, is_admin, now))
}

/// One row on the admin board.
#[derive(Clone, Debug, Serialize)]
pub struct AdminTournamentRow {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub joined: u32,
    /// "joined/total".
    pub seats: String,
    pub countdown: String,
    pub urgent: bool,
}

/// Admin board: latest start first, stale soon/now tournaments hidden.
pub fn admin_board(
    store: &ArenaStore,
    admin: &str,
    now: DateTime<Utc>,
) -> Result<Vec<AdminTournamentRow>, ArenaError> {
    store.require_admin(admin)?;
    let mut entries: Vec<&TournamentEntry> = store
        .tournaments
        .values()
        .filter(|e| !e.tournament.is_stale(now))
        .collect();
    entries.sort_by(|a, b| {
        b.tournament
            .start_time
            .cmp(&a.tournament.start_time)
            .then(a.tournament.id.cmp(&b.tournament.id))
    });
    Ok(entries
        .into_iter()
        .map(|e| {
            let joined = e.players.len() as u32;
            let countdown = Countdown::until(e.tournament.start_time, now);
            AdminTournamentRow {
                tournament: e.tournament.clone(),
                joined,
                seats: format!("{}/{}", joined, e.tournament.total_seats),
                countdown: countdown.to_string(),
                urgent: countdown.is_urgent(),
            }
        })
        .collect())
}
