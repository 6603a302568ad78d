//! User profile, sign-in identity, and the profile card view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque uid issued by the identity provider.
pub type UserId = String;

/// Identity asserted by the sign-in provider.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// A player's stored profile and wallet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: UserId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub coins: u64,
    /// Free Fire account UID. Empty until the profile is completed.
    pub ff_uid: String,
    /// In-game name.
    pub ign: String,
    pub region: String,
    pub pk_phone_number: String,
    /// Push registration token, if the user enabled notifications.
    #[serde(default)]
    pub notification_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Fresh profile for a first sign-in: zero coins, game fields empty.
    pub fn new(identity: &Identity, now: DateTime<Utc>) -> Self {
        Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            photo_url: identity.photo_url.clone(),
            coins: 0,
            ff_uid: String::new(),
            ign: String::new(),
            region: String::new(),
            pk_phone_number: String::new(),
            notification_token: None,
            created_at: now,
            updated_at: None,
        }
    }

    /// FF UID and IGN must be filled before the profile counts as complete.
    pub fn needs_completion(&self) -> bool {
        self.ff_uid.is_empty() || self.ign.is_empty()
    }

    /// Check and deduct `amount` coins.
    pub fn spend(&mut self, amount: u64) -> Result<(), crate::ArenaError> {
        if self.coins < amount {
            return Err(crate::ArenaError::InsufficientCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }

    pub fn card(&self) -> ProfileCard {
        ProfileCard::from_profile(self)
    }
}

const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Display-ready view of a profile (for the profile page / top bar).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProfileCard {
    pub email: String,
    /// IGN if set, else the provider display name.
    pub name: String,
    pub ff_uid: String,
    pub region: String,
    pub phone: String,
    pub coins: u64,
    pub photo_url: Option<String>,
}

impl ProfileCard {
    pub fn from_profile(p: &UserProfile) -> Self {
        let name = if p.ign.is_empty() {
            p.display_name.as_deref()
        } else {
            Some(p.ign.as_str())
        };
        Self {
            email: or_na(p.email.as_deref()),
            name: or_na(name),
            ff_uid: or_na(Some(&p.ff_uid)),
            region: or_na(Some(&p.region)),
            phone: or_na(Some(&p.pk_phone_number)),
            coins: p.coins,
            photo_url: p.photo_url.clone(),
        }
    }
}
