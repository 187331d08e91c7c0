//! Emotion records for the feelings wheel
//!
//! Defines the fixed set of core emotions and the leaf records that sit
//! underneath them:
//! - `CoreEmotion` - the six top-level categories
//! - `CoreInfo` - display metadata for a core (description, color)
//! - `EmotionData` - a specific (tertiary) emotion with its supportive content

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Core Emotions
// =============================================================================

/// Top-level emotion category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoreEmotion {
    Sad,
    Mad,
    Scared,
    Joyful,
    Powerful,
    Peaceful,
}

impl CoreEmotion {
    /// All core emotions, in wheel order
    pub const ALL: [CoreEmotion; 6] = [
        CoreEmotion::Sad,
        CoreEmotion::Mad,
        CoreEmotion::Scared,
        CoreEmotion::Joyful,
        CoreEmotion::Powerful,
        CoreEmotion::Peaceful,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CoreEmotion::Sad => "Sad",
            CoreEmotion::Mad => "Mad",
            CoreEmotion::Scared => "Scared",
            CoreEmotion::Joyful => "Joyful",
            CoreEmotion::Powerful => "Powerful",
            CoreEmotion::Peaceful => "Peaceful",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CoreEmotion::Sad => "😢",
            CoreEmotion::Mad => "😠",
            CoreEmotion::Scared => "😨",
            CoreEmotion::Joyful => "😊",
            CoreEmotion::Powerful => "💪",
            CoreEmotion::Peaceful => "😌",
        }
    }
}

impl fmt::Display for CoreEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the six core labels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown core emotion '{0}' (expected one of: Sad, Mad, Scared, Joyful, Powerful, Peaceful)")]
pub struct UnknownCoreEmotion(pub String);

impl FromStr for CoreEmotion {
    type Err = UnknownCoreEmotion;

    /// Case-insensitive, so both labels ("Sad") and slugs ("sad") parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CoreEmotion::ALL
            .into_iter()
            .find(|core| core.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCoreEmotion(s.to_string()))
    }
}

/// Display metadata for a core emotion, supplied by the dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreInfo {
    pub core: CoreEmotion,

    /// Short description shown next to the core label
    pub description: String,

    /// Hex color (e.g., "#4A90E2")
    #[serde(default)]
    pub color: Option<String>,
}

// =============================================================================
// Leaf Records
// =============================================================================

/// A specific emotion (the leaf of the wheel) with its supportive content
///
/// Serialized with camelCase keys so a persisted session keeps the same
/// shape as the record a browser would have stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionData {
    /// Unique identifier (e.g., "sad-lonely")
    pub id: String,

    /// Top-level category
    pub core: CoreEmotion,

    /// Mid-level grouping, unique only within its core
    pub secondary: String,

    /// Display name of the specific emotion
    pub tertiary: String,

    pub definition: String,

    /// Real-world scenarios
    #[serde(default)]
    pub examples: Vec<String>,

    /// Supportive validation message
    pub validation: String,

    /// Regulation techniques
    #[serde(default)]
    pub general_techniques: Vec<String>,

    /// Reflective question
    pub journal_prompt: String,
}

impl EmotionData {
    /// Whether this record sits under the given core and secondary grouping
    pub fn belongs_to(&self, core: CoreEmotion, secondary: &str) -> bool {
        self.core == core && self.secondary == secondary
    }

    /// Case-insensitive substring match over the searchable text fields
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.tertiary.to_lowercase().contains(needle_lowercase)
            || self.definition.to_lowercase().contains(needle_lowercase)
            || self
                .examples
                .iter()
                .any(|example| example.to_lowercase().contains(needle_lowercase))
            || self
                .general_techniques
                .iter()
                .any(|technique| technique.to_lowercase().contains(needle_lowercase))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_emotion(id: &str, core: CoreEmotion, secondary: &str, tertiary: &str) -> EmotionData {
        EmotionData {
            id: id.to_string(),
            core,
            secondary: secondary.to_string(),
            tertiary: tertiary.to_string(),
            definition: format!("Definition of {}", tertiary),
            examples: vec![format!("An example of feeling {}", tertiary.to_lowercase())],
            validation: "This is a human response.".to_string(),
            general_techniques: vec!["Breathe slowly".to_string()],
            journal_prompt: "What do I need right now?".to_string(),
        }
    }

    #[test]
    fn test_core_emotion_parse_case_insensitive() {
        assert_eq!("Sad".parse::<CoreEmotion>().unwrap(), CoreEmotion::Sad);
        assert_eq!("peaceful".parse::<CoreEmotion>().unwrap(), CoreEmotion::Peaceful);
        assert_eq!(" MAD ".parse::<CoreEmotion>().unwrap(), CoreEmotion::Mad);
    }

    #[test]
    fn test_core_emotion_parse_unknown() {
        let err = "Hungry".parse::<CoreEmotion>().unwrap_err();
        assert_eq!(err, UnknownCoreEmotion("Hungry".to_string()));
        assert!(err.to_string().contains("Hungry"));
    }

    #[test]
    fn test_core_emotion_display_matches_label() {
        for core in CoreEmotion::ALL {
            assert_eq!(core.to_string(), core.label());
            assert_eq!(core.label().parse::<CoreEmotion>().unwrap(), core);
        }
    }

    #[test]
    fn test_emotion_data_camel_case_keys() {
        let emotion = sample_emotion("sad-lonely", CoreEmotion::Sad, "Isolated", "Lonely");
        let json = serde_json::to_value(&emotion).unwrap();

        assert_eq!(json["core"], "Sad");
        assert!(json.get("generalTechniques").is_some());
        assert!(json.get("journalPrompt").is_some());
        assert!(json.get("general_techniques").is_none());
    }

    #[test]
    fn test_emotion_data_matches() {
        let emotion = sample_emotion("sad-lonely", CoreEmotion::Sad, "Isolated", "Lonely");

        assert!(emotion.matches("lonely"));
        assert!(emotion.matches("breathe"));
        assert!(!emotion.matches("furious"));
    }

    #[test]
    fn test_belongs_to() {
        let emotion = sample_emotion("sad-lonely", CoreEmotion::Sad, "Isolated", "Lonely");

        assert!(emotion.belongs_to(CoreEmotion::Sad, "Isolated"));
        assert!(!emotion.belongs_to(CoreEmotion::Mad, "Isolated"));
        assert!(!emotion.belongs_to(CoreEmotion::Sad, "Loss"));
    }
}
