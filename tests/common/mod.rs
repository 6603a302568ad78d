//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use ff_tournament_web::{
    create_tournament, sign_in, update_profile, ArenaStore, Category, Identity, MatchType,
    ProfileUpdate, RoomDetails, Tournament, TournamentDraft, TournamentStatus,
};

pub const ADMIN: &str = "admin-uid";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
}

pub fn identity(uid: &str) -> Identity {
    Identity {
        uid: uid.to_string(),
        email: Some(format!("{uid}@example.com")),
        display_name: Some(format!("Player {uid}")),
        photo_url: None,
    }
}

pub fn store() -> ArenaStore {
    ArenaStore::with_admins([ADMIN])
}

/// Sign `uid` in, complete the profile, and give them `coins`.
pub fn player(store: &mut ArenaStore, uid: &str, coins: u64) {
    sign_in(store, &identity(uid), now()).unwrap();
    update_profile(
        store,
        uid,
        ProfileUpdate {
            ff_uid: format!("ff-{uid}"),
            ign: format!("ign-{uid}"),
            region: "PK".into(),
            pk_phone_number: "03001234567".into(),
        },
        now(),
    )
    .unwrap();
    store.user_mut(uid).unwrap().coins = coins;
}

pub fn draft(category: Category, match_type: MatchType, seats: Option<u32>, fee: u64) -> TournamentDraft {
    TournamentDraft {
        title: format!("{} {}", category, match_type),
        category,
        match_type,
        total_seats: seats,
        start_time: now() + Duration::hours(2),
        entry_fee: fee,
        prize: "500 coins".into(),
        room: RoomDetails {
            room_type: Some("custom".into()),
            room_id: Some("123456".into()),
            room_password: Some("secret".into()),
            game_uid: None,
        },
        require_game_uid: false,
        status: TournamentStatus::Soon,
        kill_per_pkr: Some("10".into()),
        image_url: None,
    }
}

/// Battle Royale solo with `seats` seats and `fee` entry.
pub fn br_solo(store: &mut ArenaStore, seats: u32, fee: u64) -> Tournament {
    create_tournament(store, ADMIN, draft(Category::Br, MatchType::Solo, Some(seats), fee), now()).unwrap()
}
