//! Integration tests for the public list: ordering, filters, joined flags, room visibility.

mod common;

use chrono::Duration;
use common::{br_solo, draft, now, player, store, ADMIN};
use ff_tournament_web::{
    create_tournament, join_tournament, list_tournaments, tournament_card, Category, DisplayStatus,
    MatchType, TournamentFilter,
};

#[test]
fn list_is_soonest_first() {
    let mut s = store();
    let mut later = draft(Category::Br, MatchType::Squad, Some(48), 0);
    later.start_time = now() + Duration::days(1);
    let later = create_tournament(&mut s, ADMIN, later, now()).unwrap();
    let sooner = br_solo(&mut s, 10, 0);

    let cards = list_tournaments(&s, TournamentFilter::default(), None, now());
    let ids: Vec<_> = cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);
}

#[test]
fn filters_by_category_and_match_type() {
    let mut s = store();
    let solo = br_solo(&mut s, 10, 0);
    let cs = create_tournament(&mut s, ADMIN, draft(Category::Cs, MatchType::SixVSix, None, 0), now()).unwrap();

    let only_cs = list_tournaments(&s, TournamentFilter::parse(Some("cs"), Some("all")), None, now());
    assert_eq!(only_cs.len(), 1);
    assert_eq!(only_cs[0].id, cs.id);

    let br_solo_only = list_tournaments(&s, TournamentFilter::parse(Some("br"), Some("Solo")), None, now());
    assert_eq!(br_solo_only.len(), 1);
    assert_eq!(br_solo_only[0].id, solo.id);

    let none = list_tournaments(&s, TournamentFilter::parse(Some("br"), Some("6v6")), None, now());
    assert!(none.is_empty());

    let all = list_tournaments(&s, TournamentFilter::parse(Some("all"), None), None, now());
    assert_eq!(all.len(), 2);
}

#[test]
fn joined_flag_and_room_details_follow_viewer() {
    let mut s = store();
    player(&mut s, "u1", 0);
    player(&mut s, "u2", 0);
    let t = br_solo(&mut s, 10, 0);
    join_tournament(&mut s, t.id, "u1", now()).unwrap();

    let mine = tournament_card(&s, t.id, Some("u1"), now()).unwrap();
    assert!(mine.joined);
    assert_eq!(mine.room.unwrap().room_password.as_deref(), Some("secret"));

    let theirs = tournament_card(&s, t.id, Some("u2"), now()).unwrap();
    assert!(!theirs.joined);
    assert!(theirs.room.is_none());

    let anonymous = tournament_card(&s, t.id, None, now()).unwrap();
    assert!(anonymous.room.is_none());

    let admin = tournament_card(&s, t.id, Some(ADMIN), now()).unwrap();
    assert!(!admin.joined);
    assert!(admin.room.is_some());
}

#[test]
fn card_carries_clock_badges() {
    let mut s = store();
    let t = br_solo(&mut s, 10, 0);

    let card = tournament_card(&s, t.id, None, now()).unwrap();
    assert_eq!(card.display_status, DisplayStatus::Soon);
    assert_eq!(card.countdown, "2h 0m 0s");
    assert!(!card.urgent);

    let card = tournament_card(&s, t.id, None, t.start_time - Duration::minutes(3)).unwrap();
    assert_eq!(card.display_status, DisplayStatus::Now);
    assert!(card.urgent);

    let card = tournament_card(&s, t.id, None, t.start_time).unwrap();
    assert_eq!(card.display_status, DisplayStatus::Playing);
    assert_eq!(card.countdown, "LIVE NOW");
}
