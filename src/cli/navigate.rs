//! Session commands: select, back, reset, status

use super::render::print_position;
use super::{parse_core, AppContext};
use crate::state::{FileStorage, NavigationError, SessionStore};
use crate::Result;
use clap::Subcommand;
use colored::Colorize;

#[derive(Subcommand)]
pub enum SelectCommands {
    /// Choose a core emotion (Sad, Mad, Scared, Joyful, Powerful, Peaceful)
    Core {
        /// Core emotion label (case-insensitive)
        core: String,
    },

    /// Choose a secondary grouping under the selected core
    Secondary {
        /// Grouping label or slug (e.g., "Guilt/Shame" or "guilt-shame")
        secondary: String,
    },

    /// Choose a specific emotion under the selected grouping
    Emotion {
        /// Emotion id (e.g., "sad-lonely")
        id: String,
    },
}

pub fn run_select(ctx: &AppContext, cmd: SelectCommands) -> Result<()> {
    let mut store = ctx.open_store();

    let outcome = match cmd {
        SelectCommands::Core { core } => {
            let core = parse_core(&core)?;
            store.select_core(core);
            Ok(())
        }
        SelectCommands::Secondary { secondary } => {
            let selected_core = store.state().selected_core;
            match selected_core {
                Some(core) => match ctx.catalog.find_secondary(core, &secondary) {
                    Some(label) => store.select_secondary(label),
                    None => {
                        println!(
                            "{}",
                            format!("Grouping '{}' not found under {}", secondary, core).yellow()
                        );
                        return Ok(());
                    }
                },
                None => store.select_secondary(secondary),
            }
        }
        SelectCommands::Emotion { id } => store.select_emotion_id(&ctx.catalog, &id),
    };

    report(ctx, &store, outcome);
    Ok(())
}

pub fn run_back(ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store();
    if !store.can_go_back() {
        println!("{}", "Already at the start.".yellow());
    }
    store.go_back();
    report(ctx, &store, Ok(()));
    Ok(())
}

pub fn run_reset(ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store();
    store.start_over();
    println!("{}", "🔄 Starting over.".cyan());
    report(ctx, &store, Ok(()));
    Ok(())
}

pub fn run_status(ctx: &AppContext, json: bool) -> Result<()> {
    let store = ctx.open_store();

    if json {
        let state = store.state();
        let status = serde_json::json!({
            "currentStep": state.current_step,
            "canGoBack": store.can_go_back(),
            "session": state,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", "Session status".cyan().bold());
        println!();
        print_position(store.state(), &ctx.catalog);
    }
    Ok(())
}

/// Print the outcome of a transition and the resulting position
fn report(ctx: &AppContext, store: &SessionStore<FileStorage>, outcome: Result<(), NavigationError>) {
    if let Err(e) = outcome {
        println!("{}", format!("⚠  {}", e).yellow());
        if matches!(e, NavigationError::NoCoreSelected) {
            println!("{}", "   Choose a core emotion first: emonav select core <core>".bright_black());
        }
        return;
    }

    if store.is_dirty() {
        eprintln!(
            "{}",
            format!(
                "⚠  Session could not be saved to {}; continuing without persistence",
                ctx.state_dir.display()
            )
            .yellow()
        );
    }

    print_position(store.state(), &ctx.catalog);
}
