//! Integration tests for admin actions: drafts, edits, delete/undo, rosters, wallets.

mod common;

use chrono::Duration;
use common::{br_solo, draft, now, player, store, ADMIN};
use ff_tournament_web::{
    admin_board, create_tournament, credit_coins, delete_tournament, expire_undo,
    join_tournament, kick_player, list_players, roster_csv, undo_delete, update_tournament,
    validate_draft, ArenaError, Category, MatchType, TournamentStatus,
};

#[test]
fn clash_squad_seats_come_from_match_type() {
    let (_, seats) = validate_draft(draft(Category::Cs, MatchType::FourVFour, Some(99), 0)).unwrap();
    assert_eq!(seats, 8);
    let (d, seats) = validate_draft(draft(Category::Cs, MatchType::SixVSix, None, 0)).unwrap();
    assert_eq!(seats, 12);
    assert_eq!(d.kill_per_pkr, None);
}

#[test]
fn battle_royale_needs_positive_seats() {
    assert_eq!(
        validate_draft(draft(Category::Br, MatchType::Squad, None, 0)),
        Err(ArenaError::InvalidSeatCount)
    );
    assert_eq!(
        validate_draft(draft(Category::Br, MatchType::Squad, Some(0), 0)),
        Err(ArenaError::InvalidSeatCount)
    );
    let (d, seats) = validate_draft(draft(Category::Br, MatchType::Squad, Some(48), 0)).unwrap();
    assert_eq!(seats, 48);
    assert_eq!(d.kill_per_pkr.as_deref(), Some("10"));
}

#[test]
fn match_type_must_belong_to_category() {
    assert_eq!(
        validate_draft(draft(Category::Cs, MatchType::Solo, Some(10), 0)),
        Err(ArenaError::InvalidMatchType {
            category: Category::Cs,
            match_type: MatchType::Solo
        })
    );
}

#[test]
fn blank_title_and_optional_fields_are_normalised() {
    let mut d = draft(Category::Br, MatchType::Duo, Some(20), 0);
    d.title = "   ".into();
    assert_eq!(validate_draft(d), Err(ArenaError::MissingTitle));

    let mut d = draft(Category::Br, MatchType::Duo, Some(20), 0);
    d.title = "  Sunday Duo Cup ".into();
    d.room.room_password = Some("  ".into());
    d.image_url = Some(String::new());
    let (d, _) = validate_draft(d).unwrap();
    assert_eq!(d.title, "Sunday Duo Cup");
    assert_eq!(d.room.room_password, None);
    assert_eq!(d.image_url, None);
}

#[test]
fn non_admin_is_forbidden() {
    let mut s = store();
    player(&mut s, "u1", 0);
    let d = draft(Category::Br, MatchType::Solo, Some(10), 0);
    assert_eq!(create_tournament(&mut s, "u1", d, now()), Err(ArenaError::Forbidden));
    assert_eq!(admin_board(&s, "u1", now()).err(), Some(ArenaError::Forbidden));
    assert_eq!(credit_coins(&mut s, "u1", "u1", 100), Err(ArenaError::Forbidden));
}

#[test]
fn create_starts_with_every_seat_free() {
    let mut s = store();
    let t = br_solo(&mut s, 50, 20);
    assert_eq!(t.total_seats, 50);
    assert_eq!(t.seats_left, 50);
    assert_eq!(t.created_at, now());
    assert!(s.entry(t.id).unwrap().players.is_empty());
}

#[test]
fn update_recomputes_seats_against_roster() {
    let mut s = store();
    player(&mut s, "u1", 0);
    player(&mut s, "u2", 0);
    let t = br_solo(&mut s, 10, 0);
    join_tournament(&mut s, t.id, "u1", now()).unwrap();
    join_tournament(&mut s, t.id, "u2", now()).unwrap();

    let later = now() + Duration::minutes(1);
    let updated = update_tournament(&mut s, ADMIN, t.id, draft(Category::Br, MatchType::Solo, Some(4), 0), later).unwrap();
    assert_eq!(updated.total_seats, 4);
    assert_eq!(updated.seats_left, 2);
    assert_eq!(updated.created_at, t.created_at);
    assert_eq!(updated.updated_at, later);
    assert_eq!(s.entry(t.id).unwrap().players.len(), 2);

    assert_eq!(
        update_tournament(&mut s, ADMIN, t.id, draft(Category::Br, MatchType::Solo, Some(1), 0), later),
        Err(ArenaError::SeatsBelowJoined { joined: 2, total: 1 })
    );
}

#[test]
fn moving_start_time_rearms_reminder() {
    let mut s = store();
    let t = br_solo(&mut s, 10, 0);
    s.entry_mut(t.id).unwrap().tournament.reminder_sent = true;

    let same = draft(Category::Br, MatchType::Solo, Some(10), 0);
    update_tournament(&mut s, ADMIN, t.id, same.clone(), now()).unwrap();
    assert!(s.entry(t.id).unwrap().tournament.reminder_sent);

    let mut moved = same;
    moved.start_time = moved.start_time + Duration::hours(1);
    update_tournament(&mut s, ADMIN, t.id, moved, now()).unwrap();
    assert!(!s.entry(t.id).unwrap().tournament.reminder_sent);
}

#[test]
fn delete_can_be_undone_within_window() {
    let mut s = store();
    player(&mut s, "u1", 0);
    let t = br_solo(&mut s, 10, 0);
    join_tournament(&mut s, t.id, "u1", now()).unwrap();

    delete_tournament(&mut s, ADMIN, t.id, now()).unwrap();
    assert!(s.entry(t.id).is_err());

    let restored = undo_delete(&mut s, ADMIN, now() + Duration::seconds(10), Duration::seconds(15)).unwrap();
    assert_eq!(restored.id, t.id);
    assert!(s.has_joined(t.id, "u1"));
    assert_eq!(
        undo_delete(&mut s, ADMIN, now() + Duration::seconds(11), Duration::seconds(15)),
        Err(ArenaError::NothingToUndo)
    );
}

#[test]
fn undo_after_window_is_refused() {
    let mut s = store();
    let t = br_solo(&mut s, 10, 0);
    delete_tournament(&mut s, ADMIN, t.id, now()).unwrap();
    assert_eq!(
        undo_delete(&mut s, ADMIN, now() + Duration::seconds(16), Duration::seconds(15)),
        Err(ArenaError::NothingToUndo)
    );
    assert!(s.entry(t.id).is_err());
}

#[test]
fn only_last_delete_is_kept() {
    let mut s = store();
    let a = br_solo(&mut s, 10, 0);
    let b = br_solo(&mut s, 10, 0);
    delete_tournament(&mut s, ADMIN, a.id, now()).unwrap();
    delete_tournament(&mut s, ADMIN, b.id, now()).unwrap();

    let restored = undo_delete(&mut s, ADMIN, now(), Duration::seconds(15)).unwrap();
    assert_eq!(restored.id, b.id);
    assert!(s.entry(a.id).is_err());
}

#[test]
fn expire_undo_clears_buffer() {
    let mut s = store();
    let t = br_solo(&mut s, 10, 0);
    delete_tournament(&mut s, ADMIN, t.id, now()).unwrap();
    assert!(!expire_undo(&mut s, now() + Duration::seconds(5), Duration::seconds(15)));
    assert!(expire_undo(&mut s, now() + Duration::seconds(20), Duration::seconds(15)));
    assert!(s.recently_deleted.is_none());
}

#[test]
fn kick_frees_seat_and_optionally_refunds() {
    let mut s = store();
    player(&mut s, "u1", 100);
    player(&mut s, "u2", 100);
    let t = br_solo(&mut s, 2, 25);
    join_tournament(&mut s, t.id, "u1", now()).unwrap();
    join_tournament(&mut s, t.id, "u2", now()).unwrap();
    assert_eq!(s.entry(t.id).unwrap().tournament.seats_left, 0);

    kick_player(&mut s, ADMIN, t.id, "u1", false).unwrap();
    assert_eq!(s.user("u1").unwrap().coins, 75);
    kick_player(&mut s, ADMIN, t.id, "u2", true).unwrap();
    assert_eq!(s.user("u2").unwrap().coins, 100);

    assert_eq!(s.entry(t.id).unwrap().tournament.seats_left, 2);
    assert_eq!(
        kick_player(&mut s, ADMIN, t.id, "u2", true),
        Err(ArenaError::PlayerNotFound("u2".into()))
    );
}

#[test]
fn roster_lists_in_join_order_and_exports_csv() {
    let mut s = store();
    player(&mut s, "u1", 0);
    player(&mut s, "u2", 0);
    let t = br_solo(&mut s, 10, 0);
    join_tournament(&mut s, t.id, "u2", now()).unwrap();
    join_tournament(&mut s, t.id, "u1", now() + Duration::seconds(1)).unwrap();

    let players = list_players(&s, ADMIN, t.id).unwrap();
    let order: Vec<&str> = players.iter().map(|p| p.uid.as_str()).collect();
    assert_eq!(order, ["u2", "u1"]);

    let csv = roster_csv(&players).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ign,ff_uid,uid,email,phone,region,entry_fee_paid,joined_at")
    );
    assert!(lines.next().unwrap().starts_with("ign-u2,ff-u2,u2,u2@example.com,03001234567,PK,0,"));
    assert_eq!(lines.count(), 1);
}

#[test]
fn credit_coins_tops_up_wallet() {
    let mut s = store();
    player(&mut s, "u1", 10);
    assert_eq!(credit_coins(&mut s, ADMIN, "u1", 90), Ok(100));
    assert_eq!(credit_coins(&mut s, ADMIN, "u1", 0), Err(ArenaError::InvalidCoinAmount));
    assert_eq!(
        credit_coins(&mut s, ADMIN, "nobody", 5),
        Err(ArenaError::UserNotFound("nobody".into()))
    );
}

#[test]
fn admin_board_is_latest_first_and_hides_stale() {
    let mut s = store();
    let early = br_solo(&mut s, 10, 0);
    let mut late_draft = draft(Category::Cs, MatchType::FourVFour, None, 0);
    late_draft.start_time = now() + Duration::hours(5);
    let late = create_tournament(&mut s, ADMIN, late_draft, now()).unwrap();

    let mut stale_draft = draft(Category::Br, MatchType::Duo, Some(10), 0);
    stale_draft.start_time = now() - Duration::minutes(31);
    let stale = create_tournament(&mut s, ADMIN, stale_draft.clone(), now()).unwrap();

    stale_draft.status = TournamentStatus::Ongoing;
    let running = create_tournament(&mut s, ADMIN, stale_draft, now()).unwrap();

    let rows = admin_board(&s, ADMIN, now()).unwrap();
    let ids: Vec<_> = rows.iter().map(|r| r.tournament.id).collect();
    assert_eq!(ids, vec![late.id, early.id, running.id]);
    assert!(!ids.contains(&stale.id));
    assert_eq!(rows[0].seats, "0/8");
}
