mod args;
mod commands;
mod recur_config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::args::PatternArgs;
use crate::recur_config::RecurConfig;

#[derive(Parser)]
#[command(name = "recur")]
#[command(about = "Preview the dates a recurring pattern produces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the generated dates (at most 100)
    Dates {
        #[command(flatten)]
        pattern: PatternArgs,

        /// Print a JSON array of dates
        #[arg(long, conflicts_with = "pretty")]
        json: bool,

        /// Use the configured date format instead of YYYY-MM-DD
        #[arg(long)]
        pretty: bool,
    },
    /// Describe the pattern and preview its next occurrences
    Summary {
        #[command(flatten)]
        pattern: PatternArgs,

        /// How many upcoming dates to list
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[arg(long)]
        json: bool,
    },
    /// Show a month calendar with occurrences highlighted
    Calendar {
        #[command(flatten)]
        pattern: PatternArgs,

        /// Month to show (YYYY-MM, defaults to the start date's month)
        #[arg(short, long)]
        month: Option<String>,

        /// Number of consecutive months to show
        #[arg(long, default_value_t = 1)]
        months: usize,
    },
    /// Manage the user config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create the config file with all options commented out
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Print the effective settings
    Show,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = RecurConfig::load()?;

    if !settings.color {
        owo_colors::set_override(false);
    }

    match cli.command {
        Commands::Dates {
            pattern,
            json,
            pretty,
        } => commands::dates::run(pattern.into_config(&settings)?, &settings, json, pretty),
        Commands::Summary {
            pattern,
            count,
            json,
        } => commands::summary::run(pattern.into_config(&settings)?, &settings, count, json),
        Commands::Calendar {
            pattern,
            month,
            months,
        } => commands::calendar::run(pattern.into_config(&settings)?, month.as_deref(), months),
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init { force } => commands::config::init(force),
            ConfigCommands::Show => commands::config::show(&settings),
        },
    }
}
