//! Session Store Tests
//!
//! The persistence contract: loads never fail (missing, malformed, or
//! unreadable documents degrade to a fresh session with a logged warning),
//! and saves are fire-and-forget.

use crate::core::session::combat::{HitLocation, SESSION_VERSION};
use crate::storage::{KeyValueStore, MemoryStore, SessionStore, SESSION_KEY};
use crate::tests::common::fixtures::{
    create_test_session, id_of, init_test_logging, FailingStore,
};

#[test]
fn test_save_load_roundtrip() {
    let mut session = create_test_session();
    session.toggle_combat();
    let dummy = id_of(&session, "Dummy");
    session.apply_damage(&dummy, 15, HitLocation::Body).unwrap();

    let mut store = SessionStore::new(MemoryStore::new());
    store.save(&session);
    let loaded = store.load();

    assert_eq!(loaded.combatants.len(), 2);
    assert!(loaded.active);
    assert_eq!(loaded.version, SESSION_VERSION);

    let dummy_back = loaded.combatant(&dummy).unwrap();
    assert_eq!(dummy_back.hp.current, 6);
    assert_eq!(dummy_back.armor.body.current, 10);

    assert_eq!(loaded.log.len(), session.log.len());
    assert_eq!(
        loaded.log.latest().unwrap().message,
        session.log.latest().unwrap().message
    );
}

#[test]
fn test_load_missing_key_starts_fresh() {
    let store = SessionStore::new(MemoryStore::new());
    let session = store.load();
    assert!(session.is_empty());
    assert_eq!(session.round, 1);
    assert_eq!(session.current_turn, 0);
    assert!(!session.active);
    assert!(session.log.is_empty());
}

#[test]
fn test_load_malformed_document_starts_fresh() {
    init_test_logging();
    let mut backing = MemoryStore::new();
    backing.set(SESSION_KEY, "not json at all").unwrap();

    let session = SessionStore::new(backing).load();
    assert!(session.is_empty());
    assert_eq!(session.round, 1);
}

#[test]
fn test_load_wrong_types_starts_fresh() {
    let mut backing = MemoryStore::new();
    backing.set(SESSION_KEY, "{\"round\": \"three\"}").unwrap();

    let session = SessionStore::new(backing).load();
    assert_eq!(session.round, 1);
    assert!(session.is_empty());
}

#[test]
fn test_load_fills_missing_fields() {
    let mut backing = MemoryStore::new();
    backing
        .set(SESSION_KEY, "{\"round\": 5, \"combatActive\": true}")
        .unwrap();

    let session = SessionStore::new(backing).load();
    assert_eq!(session.round, 5);
    assert!(session.active);
    assert!(session.combatants.is_empty());
    assert_eq!(session.current_turn, 0);
    assert!(session.log.is_empty());
}

#[test]
fn test_load_newer_version_starts_fresh() {
    init_test_logging();
    let mut backing = MemoryStore::new();
    backing
        .set(SESSION_KEY, "{\"version\": 99, \"round\": 5}")
        .unwrap();

    let session = SessionStore::new(backing).load();
    assert_eq!(session.version, SESSION_VERSION);
    assert_eq!(session.round, 1);
}

#[test]
fn test_load_clamps_out_of_range_cursor() {
    let mut session = create_test_session();
    session.current_turn = 42;

    let mut store = SessionStore::new(MemoryStore::new());
    store.save(&session);
    let loaded = store.load();
    assert_eq!(loaded.current_turn, 1); // clamped into the roster
}

#[test]
fn test_save_failure_is_swallowed() {
    init_test_logging();
    let mut store = SessionStore::new(FailingStore::new());
    store.save(&create_test_session());

    // Reads find nothing; load degrades to a fresh session.
    assert!(store.load().is_empty());
}

#[test]
fn test_read_failure_starts_fresh() {
    init_test_logging();
    let store = SessionStore::new(FailingStore::failing_reads());
    assert!(store.load().is_empty());
}

#[test]
fn test_custom_key() {
    let mut store = SessionStore::new(MemoryStore::new()).with_key("table_two");
    store.save(&create_test_session());
    assert_eq!(store.load().combatants.len(), 2);
}

#[test]
fn test_reset_removes_document() {
    let mut store = SessionStore::new(MemoryStore::new());
    store.save(&create_test_session());
    assert_eq!(store.load().combatants.len(), 2);

    store.reset();
    assert!(store.load().is_empty());
}
