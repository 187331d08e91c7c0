//! Read-only browsing of the feelings wheel

use super::render::{core_label, emotion_line, print_emotion};
use super::{parse_core, AppContext};
use crate::Result;
use colored::Colorize;

/// List the six core emotions with their descriptions
pub fn run_cores(ctx: &AppContext) -> Result<()> {
    println!("{}", "Core emotions:".green().bold());
    for core in ctx.catalog.cores() {
        let description = ctx
            .catalog
            .core_info(*core)
            .map(|info| info.description.as_str())
            .unwrap_or("");
        println!("   {} {}  {}", core.emoji(), core_label(*core), description.bright_black());
    }
    Ok(())
}

/// List the secondary groupings under a core
pub fn run_secondaries(ctx: &AppContext, core: &str) -> Result<()> {
    let core = parse_core(core)?;
    let secondaries = ctx.catalog.secondaries(core);

    if secondaries.is_empty() {
        println!("{}", format!("No groupings found under {}", core).yellow());
        return Ok(());
    }

    println!("{} {}", core_label(core), "groupings:".green().bold());
    for secondary in secondaries {
        println!("   • {}", secondary);
    }
    Ok(())
}

/// List the specific emotions under a core + secondary
pub fn run_emotions(ctx: &AppContext, core: &str, secondary: &str) -> Result<()> {
    let core = parse_core(core)?;
    let Some(secondary) = ctx.catalog.find_secondary(core, secondary) else {
        println!("{}", format!("Grouping '{}' not found under {}", secondary, core).yellow());
        return Ok(());
    };

    println!("{} › {}", core_label(core), secondary.bold());
    for emotion in ctx.catalog.tertiaries(core, secondary) {
        println!("   • {}", emotion_line(emotion));
    }
    Ok(())
}

/// Show the full content for one emotion
pub fn run_show(ctx: &AppContext, id: &str, json: bool) -> Result<()> {
    let Some(emotion) = ctx.catalog.get(id) else {
        if json {
            println!("{}", serde_json::json!({ "error": "emotion_not_found", "id": id }));
        } else {
            println!("{}", format!("Emotion '{}' not found", id).red());
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(emotion)?);
    } else {
        print_emotion(emotion);
    }
    Ok(())
}
