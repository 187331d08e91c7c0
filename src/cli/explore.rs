//! Interactive walk through the wheel
//!
//! Prompts for a choice at each step and applies it to the persisted
//! session, so an interrupted walk resumes where it left off.

use super::render::{breadcrumb, print_emotion};
use super::AppContext;
use crate::catalog::EmotionCatalog;
use crate::models::{CoreEmotion, SessionState, Step};
use crate::state::{NavigationError, SessionStorage, SessionStore};
use crate::Result;
use colored::Colorize;
use dialoguer::Select;

/// One selectable menu entry
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    Core(CoreEmotion),
    Secondary(String),
    Emotion(String),
    Back,
    StartOver,
    Quit,
}

/// Menu entries (label, choice) for the current step
pub fn choices_for(state: &SessionState, catalog: &EmotionCatalog) -> Vec<(String, Choice)> {
    let mut choices: Vec<(String, Choice)> = match state.current_step {
        Step::Core => catalog
            .cores()
            .iter()
            .map(|core| {
                let description = catalog
                    .core_info(*core)
                    .map(|info| format!(" - {}", info.description))
                    .unwrap_or_default();
                (format!("{} {}{}", core.emoji(), core, description), Choice::Core(*core))
            })
            .collect(),
        Step::Secondary => state
            .selected_core
            .map(|core| {
                catalog
                    .secondaries(core)
                    .into_iter()
                    .map(|s| (s.to_string(), Choice::Secondary(s.to_string())))
                    .collect()
            })
            .unwrap_or_default(),
        Step::Tertiary => match (state.selected_core, state.selected_secondary.as_deref()) {
            (Some(core), Some(secondary)) => catalog
                .tertiaries(core, secondary)
                .into_iter()
                .map(|e| (format!("{} - {}", e.tertiary, e.definition), Choice::Emotion(e.id.clone())))
                .collect(),
            _ => Vec::new(),
        },
        Step::Validation => Vec::new(),
    };

    if state.can_go_back() {
        choices.push(("← Back".to_string(), Choice::Back));
        choices.push(("↺ Start over".to_string(), Choice::StartOver));
    }
    choices.push(("✕ Quit".to_string(), Choice::Quit));
    choices
}

/// Apply a menu choice; returns `false` when the walk should stop
pub fn apply_choice<S: SessionStorage>(
    store: &mut SessionStore<S>,
    catalog: &EmotionCatalog,
    choice: Choice,
) -> std::result::Result<bool, NavigationError> {
    match choice {
        Choice::Core(core) => store.select_core(core),
        Choice::Secondary(secondary) => store.select_secondary(secondary)?,
        Choice::Emotion(id) => store.select_emotion_id(catalog, &id)?,
        Choice::Back => store.go_back(),
        Choice::StartOver => store.start_over(),
        Choice::Quit => return Ok(false),
    }
    Ok(true)
}

fn prompt_for(state: &SessionState) -> String {
    match state.current_step {
        Step::Core => "How are you feeling right now?".to_string(),
        Step::Secondary => "Which of these is closest?".to_string(),
        Step::Tertiary => "Which specific feeling fits best?".to_string(),
        Step::Validation => "What next?".to_string(),
    }
}

pub fn run(ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_store();

    println!("{}", "🧭 Let's explore what you're feeling.".cyan().bold());

    loop {
        let state = store.state();
        println!();
        println!("{}", breadcrumb(state).bright_black());

        if let Some(emotion) = &state.selected_emotion {
            println!();
            print_emotion(emotion);
            println!();
        }

        let choices = choices_for(state, &ctx.catalog);
        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();

        let selection = Select::new()
            .with_prompt(prompt_for(state))
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| anyhow::anyhow!("Terminal not available: {}", e))?;

        let Some(index) = selection else {
            break;
        };

        let choice = choices[index].1.clone();
        match apply_choice(&mut store, &ctx.catalog, choice) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("{}", format!("⚠  {}", e).yellow()),
        }

        if store.is_dirty() {
            eprintln!("{}", "⚠  Session could not be saved; continuing in memory".yellow());
        }
    }

    println!("{}", "Take care. Your place is saved.".green());
    Ok(())
}
