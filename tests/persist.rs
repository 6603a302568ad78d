//! Integration tests for the on-disk snapshot.

mod common;

use common::{br_solo, now, player, store, ADMIN};
use ff_tournament_web::{delete_tournament, join_tournament, persist};

#[test]
fn snapshot_round_trips_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arena.json");

    let mut s = store();
    player(&mut s, "u1", 60);
    let kept = br_solo(&mut s, 10, 20);
    let deleted = br_solo(&mut s, 10, 0);
    join_tournament(&mut s, kept.id, "u1", now()).unwrap();
    delete_tournament(&mut s, ADMIN, deleted.id, now()).unwrap();

    persist::save(&path, &s).unwrap();
    let loaded = persist::load(&path).unwrap();

    assert!(loaded.is_admin(ADMIN));
    assert_eq!(loaded.user("u1").unwrap().coins, 40);
    assert_eq!(loaded.entry(kept.id).unwrap(), s.entry(kept.id).unwrap());
    assert_eq!(
        loaded.recently_deleted.as_ref().map(|d| d.entry.tournament.id),
        Some(deleted.id)
    );
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn missing_file_loads_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = persist::load(&dir.path().join("absent.json")).unwrap();
    assert!(loaded.tournaments.is_empty());
    assert!(loaded.users.is_empty());
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arena.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(persist::load(&path), Err(persist::PersistError::Json(_))));
}

#[test]
fn configured_admins_replace_persisted_ones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arena.json");
    persist::save(&path, &store()).unwrap();

    let mut loaded = persist::load(&path).unwrap();
    assert!(loaded.is_admin(ADMIN));
    let revoked = loaded.set_admins(["new-admin"]);
    assert_eq!(revoked, vec![ADMIN.to_string()]);
    assert!(!loaded.is_admin(ADMIN));
    assert!(loaded.is_admin("new-admin"));
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone").join("arena.json");
    assert!(matches!(persist::save(&path, &store()), Err(persist::PersistError::Io(_))));
}
