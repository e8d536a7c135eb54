//! cslgen CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "cslgen")]
#[command(version)]
#[command(about = "Generate customized CSL styles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one style file per configured style id
    Generate {
        /// YAML configuration with publications and parameters
        #[arg(short, long)]
        config: PathBuf,

        /// Base CSL style (defaults to the embedded Chicago author-date)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Write styles to DIR
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Only generate the publication that owns this style id
        #[arg(long)]
        only: Option<String>,

        /// Value of info/updated (RFC 3339, defaults to now)
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// List the configuration parameters with their defaults
    Params {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Load a configuration and report problems
    Check {
        /// YAML configuration to check
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cslgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            template,
            output_dir,
            only,
            timestamp,
        } => commands::generate::execute(commands::generate::GenerateArgs {
            config,
            template,
            output_dir,
            only,
            timestamp,
        }),
        Commands::Params { json } => commands::params::execute(commands::params::ParamsArgs { json }),
        Commands::Check { config } => commands::check::execute(commands::check::CheckArgs { config }),
    }
}
