//! Emotion Catalog
//!
//! Read-only view over the static feelings-wheel table. Answers the three
//! questions the guided flow asks at each level:
//! - which secondary groupings exist under a core
//! - which specific emotions sit under a core + secondary
//! - which record an id refers to
//!
//! The table never changes after load, so every query is deterministic.

mod dataset;
mod search;
mod slug;

pub use dataset::{validate_records, CoreGroup, DatasetFile, EmotionEntry};
pub use search::{DatasetStats, ValidationTone};
pub use slug::slugify;

use crate::models::{CoreEmotion, CoreInfo, EmotionData};
use std::fs;
use std::path::Path;

/// Default dataset, compiled into the binary
const BUILTIN_DATASET: &str = include_str!("../../data/emotions.yaml");

/// Result type for catalog loading
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or validating a dataset
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read dataset file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Emotion '{tertiary}' under {core} has an empty id")]
    EmptyId { core: CoreEmotion, tertiary: String },

    #[error("Duplicate emotion id: {0}")]
    DuplicateId(String),

    #[error("Duplicate emotion '{tertiary}' under {core} / {secondary}")]
    DuplicateEmotion {
        core: CoreEmotion,
        secondary: String,
        tertiary: String,
    },

    #[error("Core emotion {0} is listed more than once")]
    DuplicateCore(CoreEmotion),
}

/// Immutable emotion table with hierarchy lookups
#[derive(Debug, Clone)]
pub struct EmotionCatalog {
    core_info: Vec<CoreInfo>,
    records: Vec<EmotionData>,
}

impl EmotionCatalog {
    /// Load the dataset shipped with the crate
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_yaml_str(BUILTIN_DATASET)
    }

    /// Load a dataset from a YAML file
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        let (core_info, records) = DatasetFile::parse(content)?.into_parts()?;
        tracing::debug!("Loaded {} emotions across {} cores", records.len(), core_info.len());
        Ok(Self { core_info, records })
    }

    /// Build from an already-flattened table (records keep their given order)
    pub fn from_records(core_info: Vec<CoreInfo>, records: Vec<EmotionData>) -> CatalogResult<Self> {
        validate_records(&records)?;
        Ok(Self { core_info, records })
    }

    // =========================================================================
    // Hierarchy Queries
    // =========================================================================

    /// The six core emotions, in wheel order
    pub fn cores(&self) -> &'static [CoreEmotion] {
        &CoreEmotion::ALL
    }

    /// Display metadata for a core, if the dataset provides it
    pub fn core_info(&self, core: CoreEmotion) -> Option<&CoreInfo> {
        self.core_info.iter().find(|info| info.core == core)
    }

    /// All records under a core, in table order
    pub fn by_core(&self, core: CoreEmotion) -> Vec<&EmotionData> {
        self.records.iter().filter(|e| e.core == core).collect()
    }

    /// Distinct secondary groupings under a core, in order of first appearance
    pub fn secondaries(&self, core: CoreEmotion) -> Vec<&str> {
        let mut secondaries: Vec<&str> = Vec::new();
        for record in self.records.iter().filter(|e| e.core == core) {
            if !secondaries.contains(&record.secondary.as_str()) {
                secondaries.push(&record.secondary);
            }
        }
        secondaries
    }

    /// Specific emotions under a core + secondary, in table order
    ///
    /// An empty result means "no such grouping".
    pub fn tertiaries(&self, core: CoreEmotion, secondary: &str) -> Vec<&EmotionData> {
        self.records
            .iter()
            .filter(|e| e.belongs_to(core, secondary))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&EmotionData> {
        self.records.iter().find(|e| e.id == id)
    }

    /// Full table, in table order
    pub fn all(&self) -> &[EmotionData] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve user input to a secondary label under `core`
    ///
    /// Accepts the exact label, a case-insensitive label, or its slug
    /// ("guilt-shame" for "Guilt/Shame").
    pub fn find_secondary(&self, core: CoreEmotion, input: &str) -> Option<&str> {
        let input = input.trim();
        let secondaries = self.secondaries(core);

        secondaries
            .iter()
            .find(|s| **s == input)
            .or_else(|| secondaries.iter().find(|s| s.eq_ignore_ascii_case(input)))
            .or_else(|| {
                let wanted = slugify(input);
                secondaries.iter().find(|s| slugify(s) == wanted)
            })
            .copied()
    }
}
