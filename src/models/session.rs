//! Session record for a single walk through the feelings wheel
//!
//! `SessionState` is the one persisted entity. Its `current_step` is always
//! derived from which selections are populated; `SessionStore` is the only
//! writer and re-derives it on every transition.

use super::emotion::{CoreEmotion, EmotionData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current time truncated to whole milliseconds
///
/// Persisted timestamps are epoch milliseconds, so in-memory values carry the
/// same precision and survive a save/load unchanged.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

// =============================================================================
// Steps
// =============================================================================

/// Position in the guided flow
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Choosing a core emotion
    #[default]
    Core,
    /// Core chosen, choosing a secondary grouping
    Secondary,
    /// Secondary chosen, choosing a specific emotion
    Tertiary,
    /// A specific emotion has been chosen
    Validation,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Core => "core",
            Step::Secondary => "secondary",
            Step::Tertiary => "tertiary",
            Step::Validation => "validation",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Step::Core => "🎯",
            Step::Secondary => "🔎",
            Step::Tertiary => "🧭",
            Step::Validation => "💚",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One forward selection, kept on the history stack
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationEntry {
    /// Step that produced this entry
    pub step: Step,

    /// Human-readable selection (core label, secondary label, or emotion name)
    pub selection: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl NavigationEntry {
    pub fn new(step: Step, selection: impl Into<String>) -> Self {
        Self {
            step,
            selection: selection.into(),
            timestamp: now_millis(),
        }
    }
}

// =============================================================================
// Session State
// =============================================================================

/// Where the user is in the core → secondary → tertiary walk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub current_step: Step,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_core: Option<CoreEmotion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_secondary: Option<String>,

    /// The finalized leaf record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_emotion: Option<EmotionData>,

    /// Forward selections, oldest first
    #[serde(default)]
    pub navigation_history: Vec<NavigationEntry>,

    /// Last modification
    #[serde(with = "chrono::serde::ts_milliseconds", default = "now_millis")]
    pub timestamp: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_step: Step::Core,
            selected_core: None,
            selected_secondary: None,
            selected_emotion: None,
            navigation_history: Vec::new(),
            timestamp: now_millis(),
        }
    }
}

impl SessionState {
    /// Step implied by the populated selections
    pub fn derive_step(&self) -> Step {
        if self.selected_emotion.is_some() {
            Step::Validation
        } else if self.selected_secondary.is_some() {
            Step::Tertiary
        } else if self.selected_core.is_some() {
            Step::Secondary
        } else {
            Step::Core
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.navigation_history.is_empty()
    }

    /// Same position in the flow, ignoring timestamps
    pub fn same_position(&self, other: &SessionState) -> bool {
        self.current_step == other.current_step
            && self.selected_core == other.selected_core
            && self.selected_secondary == other.selected_secondary
            && self.selected_emotion == other.selected_emotion
            && self.navigation_history.len() == other.navigation_history.len()
            && self
                .navigation_history
                .iter()
                .zip(&other.navigation_history)
                .all(|(a, b)| a.step == b.step && a.selection == b.selection)
    }

    /// Check the selection invariants and the derived step
    pub fn is_consistent(&self) -> bool {
        if self.selected_secondary.is_some() && self.selected_core.is_none() {
            return false;
        }

        if let Some(emotion) = &self.selected_emotion {
            match (self.selected_core, self.selected_secondary.as_deref()) {
                (Some(core), Some(secondary)) if emotion.belongs_to(core, secondary) => {}
                _ => return false,
            }
        }

        self.current_step == self.derive_step()
    }

    /// Repair a record that violates the selection invariants
    ///
    /// Deeper selections that disagree with their ancestors are dropped, then
    /// the step is re-derived. History is left as-is.
    pub fn normalized(mut self) -> Self {
        if self.selected_core.is_none() {
            self.selected_secondary = None;
        }

        let emotion_fits = match (
            &self.selected_emotion,
            self.selected_core,
            self.selected_secondary.as_deref(),
        ) {
            (Some(emotion), Some(core), Some(secondary)) => emotion.belongs_to(core, secondary),
            (None, _, _) => true,
            _ => false,
        };
        if !emotion_fits {
            self.selected_emotion = None;
        }

        self.current_step = self.derive_step();
        self
    }
}
