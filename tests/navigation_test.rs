//! Integration tests for the session store
//!
//! These tests drive the guided flow end to end against the built-in
//! dataset, with both in-memory and file-backed storage.

use emonav::state::{FileStorage, MemoryStorage, NavigationError, SESSION_STORAGE_KEY};
use emonav::{CoreEmotion, EmotionCatalog, SessionState, SessionStore, Step};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use tempfile::TempDir;

fn catalog() -> EmotionCatalog {
    EmotionCatalog::builtin().unwrap()
}

fn memory_store() -> SessionStore<MemoryStorage> {
    SessionStore::load(MemoryStorage::new())
}

fn assert_invariants(state: &SessionState) {
    if state.selected_secondary.is_some() {
        assert!(state.selected_core.is_some(), "secondary without core: {:?}", state);
    }
    if let Some(emotion) = &state.selected_emotion {
        assert_eq!(Some(emotion.core), state.selected_core);
        assert_eq!(Some(&emotion.secondary), state.selected_secondary.as_ref());
    }
    assert_eq!(state.current_step, state.derive_step());
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_secondary_without_core_is_refused() {
    let mut store = memory_store();

    let result = store.select_secondary("Isolated");

    assert_eq!(result, Err(NavigationError::NoCoreSelected));
    assert_eq!(store.state().current_step, Step::Core);
}

#[test]
fn test_back_from_validation_returns_to_tertiary() {
    let catalog = catalog();
    let mut store = memory_store();

    store.select_core(CoreEmotion::Sad);
    store.select_secondary("Isolated").unwrap();
    store.select_emotion(catalog.get("sad-lonely").unwrap().clone()).unwrap();
    assert_eq!(store.current_step(), Step::Validation);

    store.go_back();

    let state = store.state();
    assert_eq!(state.current_step, Step::Tertiary);
    assert_eq!(state.selected_secondary.as_deref(), Some("Isolated"));
    assert!(state.selected_emotion.is_none());
}

#[test]
fn test_invalid_persisted_data_starts_fresh() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());
    fs::write(storage.path_for(SESSION_STORAGE_KEY), "{\"currentStep\": [oops").unwrap();

    let store = SessionStore::load(storage);

    let state = store.state();
    assert_eq!(state.current_step, Step::Core);
    assert!(state.selected_core.is_none());
    assert!(state.selected_secondary.is_none());
    assert!(state.selected_emotion.is_none());
    assert!(state.navigation_history.is_empty());
    assert!(temp.path().join("emotion-session.json.bak").exists());
}

// =========================================================================
// Back/forward symmetry and reset
// =========================================================================

#[test]
fn test_select_core_then_back_restores_default() {
    let mut store = memory_store();

    store.select_core(CoreEmotion::Scared);
    store.go_back();

    assert!(store.state().same_position(&SessionState::default()));
}

#[test]
fn test_select_secondary_then_back_restores_core_state() {
    let mut store = memory_store();

    store.select_core(CoreEmotion::Joyful);
    let after_core = store.state().clone();
    store.select_secondary("Appreciation").unwrap();
    store.go_back();

    assert!(store.state().same_position(&after_core));
}

#[test]
fn test_back_after_reselecting_secondary_keeps_latest() {
    let mut store = memory_store();
    store.select_core(CoreEmotion::Sad);
    store.select_secondary("Isolated").unwrap();
    store.select_secondary("Loss").unwrap();

    store.go_back();

    let state = store.state();
    assert_eq!(state.current_step, Step::Tertiary);
    assert_eq!(state.selected_core, Some(CoreEmotion::Sad));
    assert_eq!(state.selected_secondary.as_deref(), Some("Loss"));
    assert_eq!(state.navigation_history.len(), 2);
}

#[test]
fn test_back_after_reselecting_core_keeps_latest() {
    let mut store = memory_store();
    store.select_core(CoreEmotion::Sad);
    store.select_core(CoreEmotion::Mad);

    store.go_back();

    assert_eq!(store.state().selected_core, Some(CoreEmotion::Mad));
    assert_eq!(store.current_step(), Step::Secondary);
    assert!(store.state().selected_secondary.is_none());
}

#[test]
fn test_start_over_twice_equals_once() {
    let mut store = memory_store();
    store.select_core(CoreEmotion::Mad);
    store.select_secondary("Blocked").unwrap();

    store.start_over();
    let once = store.state().clone();
    store.start_over();

    assert!(store.state().same_position(&once));
    assert!(store.state().same_position(&SessionState::default()));
}

#[test]
fn test_can_go_back_tracks_history() {
    let mut store = memory_store();
    assert!(!store.can_go_back());

    store.select_core(CoreEmotion::Peaceful);
    assert!(store.can_go_back());

    store.go_back();
    assert!(!store.can_go_back());
}

// =========================================================================
// Invariants across operation sequences
// =========================================================================

#[test]
fn test_invariants_hold_for_mixed_sequence() {
    let catalog = catalog();
    let mut store = memory_store();

    let _ = store.select_secondary("Loss");
    assert_invariants(store.state());

    store.select_core(CoreEmotion::Sad);
    assert_invariants(store.state());

    let _ = store.select_emotion_id(&catalog, "sad-grief");
    assert_invariants(store.state());

    store.select_secondary("Loss").unwrap();
    store.select_emotion_id(&catalog, "sad-grief").unwrap();
    assert_invariants(store.state());

    let _ = store.select_emotion_id(&catalog, "mad-furious");
    assert_invariants(store.state());
    assert_eq!(store.state().selected_emotion.as_ref().unwrap().id, "sad-grief");

    store.select_core(CoreEmotion::Powerful);
    store.select_secondary("Agency").unwrap();
    assert_invariants(store.state());

    for _ in 0..8 {
        store.go_back();
        assert_invariants(store.state());
    }
    assert!(store.state().same_position(&SessionState::default()));
}

#[test]
fn test_invariants_hold_for_generated_sequences() {
    let catalog = catalog();
    let ids: Vec<&str> = catalog
        .all()
        .iter()
        .map(|e| e.id.as_str())
        .chain(["does-not-exist"])
        .collect();
    let labels: Vec<&str> = catalog.all().iter().map(|e| e.secondary.as_str()).collect();

    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = memory_store();
        let mut expected_history = 0usize;

        for _ in 0..60 {
            match rng.gen_range(0..6) {
                0 => {
                    let core = *catalog.cores().choose(&mut rng).unwrap();
                    store.select_core(core);
                    expected_history += 1;
                }
                1 | 2 => {
                    let label = *labels.choose(&mut rng).unwrap();
                    if store.select_secondary(label).is_ok() {
                        expected_history += 1;
                    }
                }
                3 => {
                    // Pick a leaf under the current grouping when there is one
                    let id = match (store.state().selected_core, store.state().selected_secondary.clone()) {
                        (Some(core), Some(secondary)) if rng.gen_bool(0.7) => catalog
                            .tertiaries(core, &secondary)
                            .choose(&mut rng)
                            .map(|e| e.id.clone())
                            .unwrap_or_else(|| "does-not-exist".to_string()),
                        _ => ids.choose(&mut rng).unwrap().to_string(),
                    };
                    if store.select_emotion_id(&catalog, &id).is_ok() {
                        expected_history += 1;
                    }
                }
                4 => {
                    store.go_back();
                    expected_history = expected_history.saturating_sub(1);
                }
                _ => {
                    store.start_over();
                    expected_history = 0;
                }
            }

            let state = store.state();
            assert_invariants(state);
            assert_eq!(state.navigation_history.len(), expected_history, "seed {}", seed);

            let json = serde_json::to_string(state).unwrap();
            let restored: SessionState = serde_json::from_str(&json).unwrap();
            assert_eq!(&restored, state, "seed {}", seed);
        }
    }
}

#[test]
fn test_history_length_counts_forward_transitions() {
    let catalog = catalog();
    let mut store = memory_store();

    store.select_core(CoreEmotion::Scared);
    store.select_secondary("Worry").unwrap();
    store.select_emotion_id(&catalog, "scared-anxious").unwrap();
    let _ = store.select_emotion_id(&catalog, "does-not-exist");
    assert_eq!(store.state().navigation_history.len(), 3);

    store.go_back();
    assert_eq!(store.state().navigation_history.len(), 2);
}

#[test]
fn test_unknown_emotion_id_leaves_state() {
    let catalog = catalog();
    let mut store = memory_store();
    store.select_core(CoreEmotion::Sad);
    store.select_secondary("Isolated").unwrap();
    let before = store.state().clone();

    let result = store.select_emotion_id(&catalog, "does-not-exist");

    assert_eq!(
        result,
        Err(NavigationError::EmotionNotFound("does-not-exist".to_string()))
    );
    assert_eq!(store.state(), &before);
}

// =========================================================================
// Persistence
// =========================================================================

#[test]
fn test_session_survives_reload() {
    let temp = TempDir::new().unwrap();
    let catalog = catalog();

    let saved = {
        let mut store = SessionStore::load(FileStorage::new(temp.path()));
        store.select_core(CoreEmotion::Sad);
        store.select_secondary("Guilt/Shame").unwrap();
        store.select_emotion_id(&catalog, "sad-regretful").unwrap();
        store.state().clone()
    };

    let store = SessionStore::load(FileStorage::new(temp.path()));

    assert_eq!(store.state(), &saved);
    assert_eq!(store.current_step(), Step::Validation);
}

#[test]
fn test_round_trip_for_every_reachable_step() {
    let catalog = catalog();
    let mut store = memory_store();
    let mut snapshots = vec![store.state().clone()];

    store.select_core(CoreEmotion::Mad);
    snapshots.push(store.state().clone());
    store.select_secondary("Trust Broken").unwrap();
    snapshots.push(store.state().clone());
    store.select_emotion_id(&catalog, "mad-betrayed").unwrap();
    snapshots.push(store.state().clone());
    store.go_back();
    snapshots.push(store.state().clone());

    for state in snapshots {
        let json = serde_json::to_string(&state).unwrap();
        let restored: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}

#[test]
fn test_persisted_layout_is_camel_case() {
    let temp = TempDir::new().unwrap();
    let mut store = SessionStore::load(FileStorage::new(temp.path()));
    store.select_core(CoreEmotion::Joyful);

    let content = fs::read_to_string(temp.path().join("emotion-session.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(value["currentStep"], "secondary");
    assert_eq!(value["selectedCore"], "Joyful");
    assert_eq!(value["navigationHistory"][0]["selection"], "Joyful");
}

#[test]
fn test_unwritable_storage_keeps_flow_working() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    fs::write(&blocker, "file in the way").unwrap();

    let mut store = SessionStore::load(FileStorage::new(blocker.join("state")));
    store.select_core(CoreEmotion::Sad);
    store.select_secondary("Loss").unwrap();

    assert_eq!(store.current_step(), Step::Tertiary);
    assert!(store.is_dirty());
}
