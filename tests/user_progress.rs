//! End-to-end per-user persistence: two profiles grade words through the
//! engine, records round-trip through the store, and neither bleeds into
//! the other.

use tempfile::TempDir;

use vocadr::catalog::{Catalog, WordKey};
use vocadr::engine::progress::ProgressEngine;
use vocadr::store::json_store::JsonStore;
use vocadr::store::schema::{DayStatus, WordStatus};
use vocadr::store::users::UserRegistry;

fn setup() -> (TempDir, JsonStore, Catalog) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    (dir, store, Catalog::bundled())
}

#[test]
fn two_users_keep_separate_records() {
    let (_dir, store, catalog) = setup();
    let engine = ProgressEngine::new(&catalog);

    let mut registry = UserRegistry::new(store.load_registry());
    registry.create("alice").unwrap();
    registry.create("bob").unwrap();
    store.save_registry(&registry.data).unwrap();

    // Alice masters day 1 completely
    let mut alice = store.load_progress("alice");
    for id in 1..=8 {
        engine.set_status(&mut alice, WordKey::new(1, id), WordStatus::Mastered);
    }
    store.save_progress("alice", &alice).unwrap();

    // Bob gets two words wrong
    let mut bob = store.load_progress("bob");
    engine.set_status(&mut bob, WordKey::new(1, 1), WordStatus::Wrong);
    engine.set_status(&mut bob, WordKey::new(2, 1), WordStatus::Wrong);
    store.save_progress("bob", &bob).unwrap();

    let alice = store.load_progress("alice");
    let bob = store.load_progress("bob");

    assert_eq!(alice.mastered_words, 8);
    assert_eq!(alice.completed_days, 1);
    assert_eq!(alice.days_progress["day-1"], DayStatus::Completed);

    assert_eq!(bob.mastered_words, 0);
    assert_eq!(bob.studied_words, 2);
    assert_eq!(bob.word_status["1-1"], WordStatus::Wrong);
    assert!(!bob.days_progress.contains_key("day-3"));
}

#[test]
fn registry_round_trips_active_user() {
    let (_dir, store, _catalog) = setup();

    let mut registry = UserRegistry::new(store.load_registry());
    registry.create("alice").unwrap();
    registry.set_active("alice");
    store.save_registry(&registry.data).unwrap();

    let reloaded = UserRegistry::new(store.load_registry());
    assert_eq!(reloaded.active(), "alice");
    assert_eq!(
        reloaded.all_names(),
        vec!["default".to_string(), "alice".to_string()]
    );
}

#[test]
fn deleting_a_user_removes_their_record_only() {
    let (dir, store, catalog) = setup();
    let engine = ProgressEngine::new(&catalog);

    let mut registry = UserRegistry::new(store.load_registry());
    registry.create("alice").unwrap();
    registry.create("bob").unwrap();

    let mut alice = store.load_progress("alice");
    engine.set_status(&mut alice, WordKey::new(1, 1), WordStatus::Correct);
    store.save_progress("alice", &alice).unwrap();
    store.save_progress("bob", &store.load_progress("bob")).unwrap();

    assert!(registry.remove("alice"));
    store.delete_progress("alice");
    store.save_registry(&registry.data).unwrap();

    assert!(!dir.path().join("progress_alice.json").exists());
    assert!(dir.path().join("progress_bob.json").exists());

    // A fresh record appears if the name is recreated
    let fresh = store.load_progress("alice");
    assert_eq!(fresh.studied_words, 0);
}

#[test]
fn toggle_state_survives_a_round_trip() {
    let (_dir, store, catalog) = setup();
    let engine = ProgressEngine::new(&catalog);

    let mut progress = store.load_progress("default");
    let key = WordKey::new(2, 3);
    engine.set_status(&mut progress, key, WordStatus::Mastered);
    // Same grade again toggles the entry off
    engine.set_status(&mut progress, key, WordStatus::Mastered);
    store.save_progress("default", &progress).unwrap();

    let reloaded = store.load_progress("default");
    assert!(!reloaded.word_status.contains_key("2-3"));
    assert_eq!(reloaded.mastered_words, 0);
    // First assignment still counts as studied
    assert_eq!(reloaded.studied_words, 1);
}
