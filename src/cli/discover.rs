//! Discovery commands: search, random picks, validation tone, dataset stats

use super::render::{core_label, emotion_line};
use super::AppContext;
use crate::catalog::ValidationTone;
use crate::models::EmotionData;
use crate::Result;
use colored::Colorize;

fn print_matches(title: String, emotions: &[&EmotionData]) {
    if emotions.is_empty() {
        println!("{}", "No emotions matched.".yellow());
        return;
    }

    println!("{}", title.green().bold());
    for emotion in emotions {
        println!(
            "   • {}  {}",
            emotion_line(emotion),
            format!("[{} › {}]", emotion.core, emotion.secondary).bright_black()
        );
    }
}

pub fn run_search(ctx: &AppContext, query: &str) -> Result<()> {
    let results = ctx.catalog.search(query);
    print_matches(format!("🔍 {} match(es) for '{}':", results.len(), query.trim()), &results);
    Ok(())
}

pub fn run_random(ctx: &AppContext, count: Option<usize>) -> Result<()> {
    let count = count.unwrap_or(ctx.config.random_count);
    let picks = ctx.catalog.sample(count);
    print_matches("🎲 Some emotions to consider:".to_string(), &picks);
    Ok(())
}

pub fn run_tone(ctx: &AppContext, tone: ValidationTone) -> Result<()> {
    let results = ctx.catalog.by_validation_tone(tone);
    print_matches(format!("💚 {:?} validations:", tone), &results);
    Ok(())
}

pub fn run_stats(ctx: &AppContext, json: bool) -> Result<()> {
    let stats = ctx.catalog.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "📊 Dataset".cyan().bold());
    println!("   Emotions:             {}", stats.total_emotions);
    println!("   Secondary groupings:  {}", stats.total_secondary_categories);
    println!("   Avg examples:         {:.1}", stats.average_examples_per_emotion);
    println!("   Avg techniques:       {:.1}", stats.average_techniques_per_emotion);
    println!();
    for (core, count) in &stats.emotions_by_core {
        println!("   {:<10} {}", core_label(*core), count);
    }
    Ok(())
}
