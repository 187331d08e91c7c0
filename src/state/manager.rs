//! SessionStore - guided-flow transitions over the persisted session

use super::storage::{SessionStorage, StorageResult, SESSION_STORAGE_KEY};
use crate::catalog::EmotionCatalog;
use crate::models::{now_millis, CoreEmotion, EmotionData, NavigationEntry, SessionState, Step};

/// A transition was refused because its precondition does not hold
///
/// The session is left unchanged; the caller decides where to send the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavigationError {
    #[error("Precondition violated: no core emotion selected")]
    NoCoreSelected,

    #[error("Precondition violated: no secondary emotion selected")]
    NoSecondarySelected,

    #[error("Emotion '{id}' belongs to {core} / {secondary}, not the current selection")]
    EmotionMismatch {
        id: String,
        core: CoreEmotion,
        secondary: String,
    },

    #[error("Emotion not found: {0}")]
    EmotionNotFound(String),
}

fn refuse(err: NavigationError) -> NavigationError {
    tracing::warn!("{}", err);
    err
}

/// Owner of the single session record for one user session
///
/// Every successful transition re-derives the step, stamps the record and
/// writes it to storage before returning. A failed write leaves the store
/// dirty; the in-memory state stays authoritative.
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    key: String,
    state: SessionState,
    dirty: bool,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Load the session under the default key
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, SESSION_STORAGE_KEY)
    }

    /// Load the session under `key`, falling back to a fresh session
    ///
    /// A missing, empty or unreadable slot yields the default state. An
    /// unparseable value is quarantined. A parsed value that breaks the
    /// selection invariants is repaired.
    pub fn load_with_key(mut storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let state = match storage.read(&key) {
            Ok(Some(content)) if !content.trim().is_empty() => {
                match serde_json::from_str::<SessionState>(&content) {
                    Ok(state) => {
                        let repaired = state.clone().normalized();
                        if repaired != state {
                            tracing::warn!("Repaired inconsistent session state under '{}'", key);
                        }
                        repaired
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Failed to parse session under '{}': {}. Starting fresh.",
                            key,
                            e
                        );
                        if let Err(quarantine_err) = storage.quarantine(&key) {
                            tracing::warn!("Failed to set aside corrupt session: {}", quarantine_err);
                        }
                        SessionState::default()
                    }
                }
            }
            Ok(_) => SessionState::default(),
            Err(e) => {
                tracing::warn!("Failed to read session under '{}': {}. Starting fresh.", key, e);
                SessionState::default()
            }
        };

        Self {
            storage,
            key,
            state,
            dirty: false,
        }
    }

    /// Write the current state to storage
    pub fn save(&mut self) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(&self.state)?;
        self.storage.write(&self.key, &content)?;
        self.dirty = false;
        Ok(())
    }

    /// Retry a write that failed earlier
    pub fn save_if_dirty(&mut self) -> StorageResult<()> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    /// Whether the in-memory state is ahead of storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Forward Transitions
    // =========================================================================

    /// Choose a core emotion; clears any deeper selection
    pub fn select_core(&mut self, core: CoreEmotion) {
        self.state
            .navigation_history
            .push(NavigationEntry::new(Step::Core, core.label()));
        self.state.selected_core = Some(core);
        self.state.selected_secondary = None;
        self.state.selected_emotion = None;

        self.commit("select_core");
    }

    /// Choose a secondary grouping under the selected core
    pub fn select_secondary(&mut self, secondary: impl Into<String>) -> Result<(), NavigationError> {
        if self.state.selected_core.is_none() {
            return Err(refuse(NavigationError::NoCoreSelected));
        }

        let secondary = secondary.into();
        self.state
            .navigation_history
            .push(NavigationEntry::new(Step::Secondary, secondary.clone()));
        self.state.selected_secondary = Some(secondary);
        self.state.selected_emotion = None;

        self.commit("select_secondary");
        Ok(())
    }

    /// Finalize a specific emotion
    ///
    /// The record must sit under the currently selected core and secondary.
    pub fn select_emotion(&mut self, emotion: EmotionData) -> Result<(), NavigationError> {
        let Some(core) = self.state.selected_core else {
            return Err(refuse(NavigationError::NoCoreSelected));
        };
        let Some(secondary) = self.state.selected_secondary.as_deref() else {
            return Err(refuse(NavigationError::NoSecondarySelected));
        };

        if !emotion.belongs_to(core, secondary) {
            return Err(refuse(NavigationError::EmotionMismatch {
                id: emotion.id,
                core: emotion.core,
                secondary: emotion.secondary,
            }));
        }

        self.state
            .navigation_history
            .push(NavigationEntry::new(Step::Tertiary, emotion.tertiary.clone()));
        self.state.selected_emotion = Some(emotion);

        self.commit("select_emotion");
        Ok(())
    }

    /// Resolve `id` through the catalog, then `select_emotion`
    pub fn select_emotion_id(
        &mut self,
        catalog: &EmotionCatalog,
        id: &str,
    ) -> Result<(), NavigationError> {
        let emotion = catalog
            .get(id)
            .cloned()
            .ok_or_else(|| refuse(NavigationError::EmotionNotFound(id.to_string())))?;
        self.select_emotion(emotion)
    }

    // =========================================================================
    // Backward Transitions
    // =========================================================================

    /// Undo the most recent forward selection
    ///
    /// After the pop, the step of the new last entry decides what is cleared:
    /// a core entry clears the secondary and the emotion, a secondary entry
    /// clears the emotion. Remaining selections keep their current values and
    /// any that no longer fit their ancestors are dropped before the step is
    /// re-derived.
    pub fn go_back(&mut self) {
        self.state.navigation_history.pop();

        let Some(top) = self.state.navigation_history.last().map(|entry| entry.step) else {
            self.state = SessionState::default();
            self.commit("go_back");
            return;
        };

        match top {
            Step::Core => {
                self.state.selected_secondary = None;
                self.state.selected_emotion = None;
            }
            Step::Secondary => self.state.selected_emotion = None,
            Step::Tertiary | Step::Validation => {}
        }

        self.state = std::mem::take(&mut self.state).normalized();

        self.commit("go_back");
    }

    /// Reset to a fresh session
    pub fn start_over(&mut self) {
        self.state = SessionState::default();
        self.commit("start_over");
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn commit(&mut self, action: &str) {
        self.state.current_step = self.state.derive_step();
        self.state.timestamp = now_millis();

        tracing::debug!(
            "{} -> step={} history={}",
            action,
            self.state.current_step,
            self.state.navigation_history.len()
        );

        if let Err(e) = self.save() {
            tracing::warn!("Failed to persist session after {}: {}", action, e);
            self.dirty = true;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
