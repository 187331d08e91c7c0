//! Terminal rendering for emotions and session position

use crate::catalog::EmotionCatalog;
use crate::models::{CoreEmotion, EmotionData, SessionState, Step};
use colored::{ColoredString, Colorize};

/// Core label tinted with its wheel color
pub fn core_label(core: CoreEmotion) -> ColoredString {
    let label = core.label();
    let tinted = match core {
        CoreEmotion::Sad => label.blue(),
        CoreEmotion::Mad => label.red(),
        CoreEmotion::Scared => label.yellow(),
        CoreEmotion::Joyful => label.green(),
        CoreEmotion::Powerful => label.magenta(),
        CoreEmotion::Peaceful => label.cyan(),
    };
    tinted.bold()
}

pub fn step_label(step: Step) -> ColoredString {
    let name = step.name();
    match step {
        Step::Core => name.yellow(),
        Step::Secondary => name.cyan(),
        Step::Tertiary => name.blue(),
        Step::Validation => name.green(),
    }
}

/// One-line summary: "Lonely (sad-lonely) - A feeling of ..."
pub fn emotion_line(emotion: &EmotionData) -> String {
    format!(
        "{} {} - {}",
        emotion.tertiary.bold(),
        format!("({})", emotion.id).bright_black(),
        emotion.definition
    )
}

/// Breadcrumb for the current selections, e.g. "Sad › Isolated › Lonely"
pub fn breadcrumb(state: &SessionState) -> String {
    let mut parts = Vec::new();
    if let Some(core) = state.selected_core {
        parts.push(core.label().to_string());
    }
    if let Some(secondary) = &state.selected_secondary {
        parts.push(secondary.clone());
    }
    if let Some(emotion) = &state.selected_emotion {
        parts.push(emotion.tertiary.clone());
    }

    if parts.is_empty() {
        "(nothing selected)".to_string()
    } else {
        parts.join(" › ")
    }
}

/// Full supportive content for a finalized emotion
pub fn print_emotion(emotion: &EmotionData) {
    println!(
        "{} {}  {}",
        emotion.core.emoji(),
        emotion.tertiary.bold(),
        format!("{} › {}", emotion.core, emotion.secondary).bright_black()
    );
    println!();
    println!("{}", emotion.definition);

    if !emotion.examples.is_empty() {
        println!();
        println!("{}", "You might feel this when:".cyan().bold());
        for example in &emotion.examples {
            println!("   • {}", example);
        }
    }

    println!();
    println!("{}", "💚 Validation".green().bold());
    println!("   {}", emotion.validation);

    if !emotion.general_techniques.is_empty() {
        println!();
        println!("{}", "Things that can help:".cyan().bold());
        for (i, technique) in emotion.general_techniques.iter().enumerate() {
            println!("   {}. {}", i + 1, technique);
        }
    }

    println!();
    println!("{}", "📝 Journal prompt".yellow().bold());
    println!("   {}", emotion.journal_prompt.italic());
}

/// Session position plus the choices available at the current step
pub fn print_position(state: &SessionState, catalog: &EmotionCatalog) {
    println!(
        "   Step:    {} {}",
        state.current_step.emoji(),
        step_label(state.current_step)
    );
    println!("   Path:    {}", breadcrumb(state));
    println!("   History: {} step(s)", state.navigation_history.len());
    println!(
        "   Updated: {}",
        state.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    println!();

    match state.current_step {
        Step::Core => {
            println!("{}", "Choose a core emotion:".cyan());
            for core in catalog.cores() {
                println!("   • {}", core_label(*core));
            }
        }
        Step::Secondary => {
            if let Some(core) = state.selected_core {
                println!("{}", format!("What kind of {} feeling?", core.label().to_lowercase()).cyan());
                for secondary in catalog.secondaries(core) {
                    println!("   • {}", secondary);
                }
            }
        }
        Step::Tertiary => {
            if let (Some(core), Some(secondary)) = (state.selected_core, &state.selected_secondary) {
                let emotions = catalog.tertiaries(core, secondary);
                if emotions.is_empty() {
                    println!("{}", format!("No emotions found under {} › {}", core, secondary).yellow());
                } else {
                    println!("{}", "Which of these feels closest?".cyan());
                    for emotion in emotions {
                        println!("   • {}", emotion_line(emotion));
                    }
                }
            }
        }
        Step::Validation => {
            if let Some(emotion) = &state.selected_emotion {
                print_emotion(emotion);
            }
        }
    }
}
