use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use emonav::catalog::ValidationTone;
use emonav::cli::config::ConfigCommands;
use emonav::cli::navigate::SelectCommands;
use emonav::cli::{browse, discover, explore, navigate, AppContext, GlobalArgs};
use emonav::{EmonavConfig, Result};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "emonav")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Feelings wheel navigator", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show where the current session is
    Status {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// List the six core emotions
    Cores,

    /// List the secondary groupings under a core emotion
    Secondaries {
        /// Core emotion (e.g., "sad")
        core: String,
    },

    /// List the specific emotions under a core + secondary grouping
    Emotions {
        /// Core emotion (e.g., "sad")
        core: String,

        /// Secondary grouping label or slug (e.g., "unmet-expectations")
        secondary: String,
    },

    /// Show the full content for an emotion
    Show {
        /// Emotion id (e.g., "sad-lonely")
        id: String,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Advance the session by one selection
    #[command(subcommand)]
    Select(SelectCommands),

    /// Undo the most recent selection
    Back,

    /// Clear the session and start from the core emotions
    Reset,

    /// Search emotions by name, definition, examples and techniques
    Search {
        /// Text to look for (case-insensitive)
        query: String,
    },

    /// Show a few randomly chosen emotions
    Random {
        /// How many to show (defaults to random_count from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// List emotions whose validation message has a given tone
    Tone {
        #[arg(value_enum)]
        tone: ValidationTone,
    },

    /// Show dataset statistics
    Stats {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Walk the wheel interactively
    Explore,

    /// Configuration file management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::from_default_env();
    let filter = match format!("emonav={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Load config, start logging, and build the context for dataset-backed commands
fn context(global: &GlobalArgs) -> Result<AppContext> {
    let config = EmonavConfig::load_or_default(global.config.as_deref())?;
    let level = if global.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    init_logging(&level);

    AppContext::with_config(config, global)
}

fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;

    match command {
        Commands::Status { json } => navigate::run_status(&context(&global)?, json)?,
        Commands::Cores => browse::run_cores(&context(&global)?)?,
        Commands::Secondaries { core } => browse::run_secondaries(&context(&global)?, &core)?,
        Commands::Emotions { core, secondary } => {
            browse::run_emotions(&context(&global)?, &core, &secondary)?
        }
        Commands::Show { id, json } => browse::run_show(&context(&global)?, &id, json)?,
        Commands::Select(cmd) => navigate::run_select(&context(&global)?, cmd)?,
        Commands::Back => navigate::run_back(&context(&global)?)?,
        Commands::Reset => navigate::run_reset(&context(&global)?)?,
        Commands::Search { query } => discover::run_search(&context(&global)?, &query)?,
        Commands::Random { count } => discover::run_random(&context(&global)?, count)?,
        Commands::Tone { tone } => discover::run_tone(&context(&global)?, tone)?,
        Commands::Stats { json } => discover::run_stats(&context(&global)?, json)?,
        Commands::Explore => explore::run(&context(&global)?)?,
        Commands::Config(cmd) => {
            init_logging(if global.verbose { "debug" } else { "warn" });
            emonav::cli::config::run(cmd, &global)?
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "emonav", &mut io::stdout())
        }
    }

    Ok(())
}
