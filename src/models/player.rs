//! JoinedPlayer: a seat taken in a tournament.

use crate::models::user::{UserId, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a user's profile at the moment they joined.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct JoinedPlayer {
    pub uid: UserId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub ff_uid: String,
    pub ign: String,
    pub region: String,
    pub phone: String,
    pub entry_fee_paid: u64,
}

impl JoinedPlayer {
    pub fn from_profile(profile: &UserProfile, entry_fee_paid: u64, joined_at: DateTime<Utc>) -> Self {
        Self {
            uid: profile.uid.clone(),
            email: profile.email.clone(),
            display_name: profile.display_name.clone(),
            joined_at,
            ff_uid: profile.ff_uid.clone(),
            ign: profile.ign.clone(),
            region: profile.region.clone(),
            phone: profile.pk_phone_number.clone(),
            entry_fee_paid,
        }
    }

    /// Label for rosters: IGN, falling back to the uid.
    pub fn label(&self) -> &str {
        if self.ign.is_empty() {
            &self.uid
        } else {
            &self.ign
        }
    }
}
