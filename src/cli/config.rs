//! Config CLI commands

use super::GlobalArgs;
use crate::config::EmonavConfig;
use crate::Result;
use clap::Subcommand;
use colored::Colorize;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default config.toml (keeps an existing file unless --force)
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration, with defaults filled in
    Show,
}

pub fn run(cmd: ConfigCommands, args: &GlobalArgs) -> Result<()> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => EmonavConfig::default_path()
            .ok_or_else(|| anyhow::anyhow!("Cannot find a config directory; pass --config"))?,
    };

    match cmd {
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                println!(
                    "{}",
                    format!("Config already exists at {} (use --force to overwrite)", path.display())
                        .yellow()
                );
                return Ok(());
            }

            EmonavConfig::default().save(&path)?;
            println!("{}", format!("✅ Wrote {}", path.display()).green());
        }
        ConfigCommands::Show => {
            let config = EmonavConfig::load(&path)?;
            println!("{}", format!("# {}", path.display()).bright_black());
            println!("{}", toml::to_string_pretty(&config)?);
            println!(
                "{}",
                format!("# session directory: {}", config.resolve_state_dir().display()).bright_black()
            );
        }
    }

    Ok(())
}
