//! readiness CLI: take, score and review readiness assessments.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "readiness", version, about = "Self-assessment quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where questions and results come from.
#[derive(Args, Clone, Default)]
pub struct StoreArgs {
    /// Read questions and results from this content pack instead of a configured store
    #[arg(long)]
    pack: Option<PathBuf>,

    /// Named store from the config file
    #[arg(long, conflicts_with = "pack")]
    store: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take {
        #[command(flatten)]
        source: StoreArgs,

        /// Directory for the saved outcome (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score a file of answers without the interactive flow
    Score {
        /// JSON object mapping question id to a value from 1 to 5
        #[arg(long)]
        answers: PathBuf,

        #[command(flatten)]
        source: StoreArgs,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the results for a completed assessment
    Results {
        /// Outcome JSON saved by `take` or `score --format json`
        #[arg(long)]
        outcome: Option<PathBuf>,

        #[command(flatten)]
        source: StoreArgs,

        /// Output format: text, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate content pack TOML files
    Validate {
        /// Path to content pack file or directory
        #[arg(long)]
        pack: PathBuf,
    },

    /// Create starter config and example content pack
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("readiness=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take { source, output } => commands::take::execute(source, output).await,
        Commands::Score {
            answers,
            source,
            format,
        } => commands::score::execute(answers, source, format).await,
        Commands::Results {
            outcome,
            source,
            format,
            output,
        } => commands::results::execute(outcome, source, format, output).await,
        Commands::Validate { pack } => commands::validate::execute(pack),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
