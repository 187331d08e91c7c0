// Emonav - Feelings Wheel Navigator
// Guided core → secondary → specific emotion walk with a locally persisted session

pub mod catalog;
pub mod cli;
pub mod config;
pub mod models;
pub mod state;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use catalog::{CatalogError, EmotionCatalog};
pub use config::EmonavConfig;
pub use models::{CoreEmotion, EmotionData, NavigationEntry, SessionState, Step};
pub use state::{FileStorage, MemoryStorage, NavigationError, SessionStorage, SessionStore};
