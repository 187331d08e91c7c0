//! Convenience projections over the full table: text search, random
//! sampling, validation-tone filters and summary statistics.
//!
//! Every result is a subset of `EmotionCatalog::all()`.

use super::EmotionCatalog;
use crate::models::{CoreEmotion, EmotionData};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Tone of an emotion's validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ValidationTone {
    /// Mentions what the feeling "shows" or a "strength"
    Supportive,
    /// Speaks to "power" or being "capable"
    Empowering,
    /// Frames the feeling as "human" or "normal"
    Normalizing,
}

impl ValidationTone {
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ValidationTone::Supportive => &["shows", "strength"],
            ValidationTone::Empowering => &["power", "capable"],
            ValidationTone::Normalizing => &["human", "normal"],
        }
    }

    pub fn matches(&self, validation: &str) -> bool {
        let validation = validation.to_lowercase();
        self.keywords().iter().any(|kw| validation.contains(kw))
    }
}

/// Summary numbers for a dataset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetStats {
    pub total_emotions: usize,
    /// Record count per core, in wheel order
    pub emotions_by_core: Vec<(CoreEmotion, usize)>,
    /// Distinct secondary labels across the whole table
    pub total_secondary_categories: usize,
    pub average_examples_per_emotion: f64,
    pub average_techniques_per_emotion: f64,
}

impl EmotionCatalog {
    /// Case-insensitive substring search over name, definition, examples
    /// and techniques. A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&EmotionData> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.all().iter().filter(|e| e.matches(&needle)).collect()
    }

    /// Up to `count` distinct records, in random order
    pub fn random<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&EmotionData> {
        self.all().choose_multiple(rng, count).collect()
    }

    /// `random` with the thread-local generator
    pub fn sample(&self, count: usize) -> Vec<&EmotionData> {
        self.random(count, &mut rand::thread_rng())
    }

    pub fn by_validation_tone(&self, tone: ValidationTone) -> Vec<&EmotionData> {
        self.all()
            .iter()
            .filter(|e| tone.matches(&e.validation))
            .collect()
    }

    pub fn stats(&self) -> DatasetStats {
        let records = self.all();
        let total = records.len();

        let emotions_by_core = CoreEmotion::ALL
            .iter()
            .map(|core| (*core, records.iter().filter(|e| e.core == *core).count()))
            .collect();

        let secondaries: HashSet<&str> = records.iter().map(|e| e.secondary.as_str()).collect();

        let average = |sum: usize| {
            if total == 0 {
                0.0
            } else {
                sum as f64 / total as f64
            }
        };

        DatasetStats {
            total_emotions: total,
            emotions_by_core,
            total_secondary_categories: secondaries.len(),
            average_examples_per_emotion: average(records.iter().map(|e| e.examples.len()).sum()),
            average_techniques_per_emotion: average(
                records.iter().map(|e| e.general_techniques.len()).sum(),
            ),
        }
    }
}
