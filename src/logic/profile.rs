//! Sign-in bookkeeping and profile completion.

use crate::models::{ArenaError, Identity, UserProfile};
use crate::store::ArenaStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a sign-in: the stored profile plus what the UI should show next.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SignIn {
    pub profile: UserProfile,
    pub is_admin: bool,
    /// FF UID or IGN still missing: prompt the profile form.
    pub needs_profile: bool,
}

/// Profile form fields.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct ProfileUpdate {
    pub ff_uid: String,
    pub ign: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub pk_phone_number: String,
}

/// Record a sign-in. First sign-in creates a profile with zero coins; later ones
/// refresh the provider fields (email, name, photo) and keep everything else.
pub fn sign_in(
    store: &mut ArenaStore,
    identity: &Identity,
    now: DateTime<Utc>,
) -> Result<SignIn, ArenaError> {
    if identity.uid.trim().is_empty() {
        return Err(ArenaError::NotSignedIn);
    }
    let profile = store
        .users
        .entry(identity.uid.clone())
        .and_modify(|p| {
            if identity.email.is_some() {
                p.email = identity.email.clone();
            }
            if identity.display_name.is_some() {
                p.display_name = identity.display_name.clone();
            }
            if identity.photo_url.is_some() {
                p.photo_url = identity.photo_url.clone();
            }
        })
        .or_insert_with(|| {
            log::info!("Created profile for {}", identity.uid);
            UserProfile::new(identity, now)
        })
        .clone();
    Ok(SignIn {
        needs_profile: profile.needs_completion(),
        is_admin: store.is_admin(&identity.uid),
        profile,
    })
}

/// Save the profile form. FF UID and IGN are required; an FF UID may belong to one user only.
pub fn update_profile(
    store: &mut ArenaStore,
    uid: &str,
    update: ProfileUpdate,
    now: DateTime<Utc>,
) -> Result<UserProfile, ArenaError> {
    let ff_uid = update.ff_uid.trim();
    let ign = update.ign.trim();
    if ff_uid.is_empty() || ign.is_empty() {
        return Err(ArenaError::ProfileIncomplete);
    }
    let taken = store
        .users
        .values()
        .any(|p| p.uid != uid && p.ff_uid == ff_uid);
    if taken {
        return Err(ArenaError::FfUidTaken);
    }

    let profile = store.user_mut(uid)?;
    profile.ff_uid = ff_uid.to_string();
    profile.ign = ign.to_string();
    profile.region = update.region.trim().to_string();
    profile.pk_phone_number = update.pk_phone_number.trim().to_string();
    profile.updated_at = Some(now);
    Ok(profile.clone())
}

/// Remember the device's push token so start reminders can reach it.
pub fn register_notification_token(
    store: &mut ArenaStore,
    uid: &str,
    token: &str,
) -> Result<(), ArenaError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ArenaError::EmptyToken);
    }
    store.user_mut(uid)?.notification_token = Some(token.to_string());
    Ok(())
}
