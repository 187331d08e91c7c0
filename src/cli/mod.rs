//! Command-line front end
//!
//! Every command builds an `AppContext` (config + catalog + session
//! directory), does one thing, and prints the result.

pub mod browse;
pub mod config;
pub mod discover;
pub mod explore;
pub mod navigate;
pub mod render;

use crate::catalog::EmotionCatalog;
use crate::config::EmonavConfig;
use crate::models::CoreEmotion;
use crate::state::{FileStorage, SessionStore};
use crate::{Context, Result};
use std::path::{Path, PathBuf};

/// Global options shared by every command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// Path to config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted session
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Replacement dataset (YAML)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Resolved configuration, dataset and session location
pub struct AppContext {
    pub config: EmonavConfig,
    pub catalog: EmotionCatalog,
    pub state_dir: PathBuf,
}

impl AppContext {
    /// Load config, apply CLI overrides, then load the dataset
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let config = EmonavConfig::load_or_default(args.config.as_deref())?;
        Self::with_config(config, args)
    }

    /// Apply CLI overrides to an already-loaded config, then load the dataset
    pub fn with_config(mut config: EmonavConfig, args: &GlobalArgs) -> Result<Self> {
        if let Some(dir) = &args.state_dir {
            config.state_dir = Some(dir.clone());
        }
        if let Some(dataset) = &args.dataset {
            config.dataset = Some(dataset.clone());
        }

        let catalog = load_catalog(config.dataset.as_deref())?;
        let state_dir = config.resolve_state_dir();

        Ok(Self {
            config,
            catalog,
            state_dir,
        })
    }

    /// Open the persisted session
    pub fn open_store(&self) -> SessionStore<FileStorage> {
        SessionStore::load(FileStorage::new(&self.state_dir))
    }
}

/// Parse a core label, with a readable error
pub fn parse_core(input: &str) -> Result<CoreEmotion> {
    Ok(input.parse::<CoreEmotion>()?)
}

fn load_catalog(dataset: Option<&Path>) -> Result<EmotionCatalog> {
    match dataset {
        Some(path) => EmotionCatalog::from_path(path)
            .with_context(|| format!("Failed to load dataset {}", path.display())),
        None => EmotionCatalog::builtin().context("Failed to load built-in dataset"),
    }
}
