//! ArenaStore: every user, admin, tournament and roster held by the server.
//!
//! The store is plain data. The web layer keeps it behind one `RwLock`, so each
//! operation in `logic` sees and mutates a consistent snapshot.

use crate::models::{ArenaError, JoinedPlayer, Tournament, TournamentId, UserId, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A tournament together with its joined players (keyed by uid).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentEntry {
    pub tournament: Tournament,
    pub players: BTreeMap<UserId, JoinedPlayer>,
}

impl TournamentEntry {
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            players: BTreeMap::new(),
        }
    }

    pub fn has_player(&self, uid: &str) -> bool {
        self.players.contains_key(uid)
    }

    /// Recompute `seats_left` from the roster. Saturates at zero.
    pub fn sync_seats(&mut self) {
        let joined = self.players.len() as u32;
        self.tournament.seats_left = self.tournament.total_seats.saturating_sub(joined);
    }
}

/// Last deleted tournament, kept for the undo window.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeletedTournament {
    pub entry: TournamentEntry,
    pub deleted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArenaStore {
    pub users: HashMap<UserId, UserProfile>,
    pub admins: BTreeSet<UserId>,
    pub tournaments: HashMap<TournamentId, TournamentEntry>,
    #[serde(default)]
    pub recently_deleted: Option<DeletedTournament>,
}

impl ArenaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the given uids granted admin rights.
    pub fn with_admins<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        let mut store = Self::new();
        store.grant_admins(admins);
        store
    }

    pub fn grant_admins<I, S>(&mut self, admins: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        self.admins.extend(admins.into_iter().map(Into::into));
    }

    /// Make the admin set exactly `admins`. Uids no longer listed lose admin
    /// rights; returns them.
    pub fn set_admins<I, S>(&mut self, admins: I) -> Vec<UserId>
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        let configured: BTreeSet<UserId> = admins.into_iter().map(Into::into).collect();
        let revoked = self.admins.difference(&configured).cloned().collect();
        self.admins = configured;
        revoked
    }

    pub fn is_admin(&self, uid: &str) -> bool {
        self.admins.contains(uid)
    }

    pub fn require_admin(&self, uid: &str) -> Result<(), ArenaError> {
        if self.is_admin(uid) {
            Ok(())
        } else {
            Err(ArenaError::Forbidden)
        }
    }

    pub fn user(&self, uid: &str) -> Result<&UserProfile, ArenaError> {
        self.users
            .get(uid)
            .ok_or_else(|| ArenaError::UserNotFound(uid.to_string()))
    }

    pub fn user_mut(&mut self, uid: &str) -> Result<&mut UserProfile, ArenaError> {
        self.users
            .get_mut(uid)
            .ok_or_else(|| ArenaError::UserNotFound(uid.to_string()))
    }

    pub fn entry(&self, id: TournamentId) -> Result<&TournamentEntry, ArenaError> {
        self.tournaments
            .get(&id)
            .ok_or(ArenaError::TournamentNotFound(id))
    }

    pub fn entry_mut(&mut self, id: TournamentId) -> Result<&mut TournamentEntry, ArenaError> {
        self.tournaments
            .get_mut(&id)
            .ok_or(ArenaError::TournamentNotFound(id))
    }

    pub fn has_joined(&self, id: TournamentId, uid: &str) -> bool {
        self.tournaments
            .get(&id)
            .is_some_and(|e| e.has_player(uid))
    }

    /// Ids of all tournaments the user holds a seat in.
    pub fn joined_by(&self, uid: &str) -> BTreeSet<TournamentId> {
        self.tournaments
            .iter()
            .filter(|(_, e)| e.has_player(uid))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_admins_revokes_unlisted() {
        let mut store = ArenaStore::with_admins(["a1", "a2"]);
        let revoked = store.set_admins(["a2", "a3"]);
        assert_eq!(revoked, vec!["a1".to_string()]);
        assert!(!store.is_admin("a1"));
        assert!(store.is_admin("a2"));
        assert!(store.is_admin("a3"));
        assert_eq!(store.require_admin("a1"), Err(ArenaError::Forbidden));
    }
}
