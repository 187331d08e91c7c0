//! Dataset file format
//!
//! A dataset groups leaf records under their core emotion:
//!
//! ```yaml
//! cores:
//!   - core: Sad
//!     description: Feelings of loss, disappointment, or longing
//!     color: "#4A90E2"
//!     emotions:
//!       - id: sad-lonely
//!         secondary: Isolated
//!         tertiary: Lonely
//!         ...
//! ```
//!
//! Records inherit `core` from their group. Table order is group order,
//! then record order within the group.

use super::{CatalogError, CatalogResult};
use crate::models::{CoreEmotion, CoreInfo, EmotionData};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    pub cores: Vec<CoreGroup>,
}

/// All records for one core emotion plus its display metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreGroup {
    pub core: CoreEmotion,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub emotions: Vec<EmotionEntry>,
}

/// A leaf record as written in the dataset (without its core)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub id: String,
    pub secondary: String,
    pub tertiary: String,
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
    pub validation: String,
    #[serde(default)]
    pub general_techniques: Vec<String>,
    pub journal_prompt: String,
}

impl EmotionEntry {
    fn into_record(self, core: CoreEmotion) -> EmotionData {
        EmotionData {
            id: self.id,
            core,
            secondary: self.secondary,
            tertiary: self.tertiary,
            definition: self.definition,
            examples: self.examples,
            validation: self.validation,
            general_techniques: self.general_techniques,
            journal_prompt: self.journal_prompt,
        }
    }
}

impl DatasetFile {
    pub fn parse(content: &str) -> CatalogResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Flatten into core metadata and the ordered record table
    pub fn into_parts(self) -> CatalogResult<(Vec<CoreInfo>, Vec<EmotionData>)> {
        let mut seen_cores = HashSet::new();
        let mut infos = Vec::with_capacity(self.cores.len());
        let mut records = Vec::new();

        for group in self.cores {
            if !seen_cores.insert(group.core) {
                return Err(CatalogError::DuplicateCore(group.core));
            }

            infos.push(CoreInfo {
                core: group.core,
                description: group.description,
                color: group.color,
            });

            let core = group.core;
            records.extend(group.emotions.into_iter().map(|entry| entry.into_record(core)));
        }

        validate_records(&records)?;
        Ok((infos, records))
    }
}

/// Check table-wide uniqueness rules
///
/// - `id` is non-empty and unique across the table
/// - `(core, secondary, tertiary)` is unique
pub fn validate_records(records: &[EmotionData]) -> CatalogResult<()> {
    let mut ids = HashSet::new();
    let mut triples = HashSet::new();

    for record in records {
        if record.id.trim().is_empty() {
            return Err(CatalogError::EmptyId {
                core: record.core,
                tertiary: record.tertiary.clone(),
            });
        }

        if !ids.insert(record.id.as_str()) {
            return Err(CatalogError::DuplicateId(record.id.clone()));
        }

        if !triples.insert((record.core, record.secondary.as_str(), record.tertiary.as_str())) {
            return Err(CatalogError::DuplicateEmotion {
                core: record.core,
                secondary: record.secondary.clone(),
                tertiary: record.tertiary.clone(),
            });
        }
    }

    Ok(())
}
