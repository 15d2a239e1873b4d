//! Email Triage - ontopic/offtopic email classifier with a feedback log
//!
//! Entry point for the `email-triage` command line tool.

use clap::{Parser, Subcommand};
use email_triage::{GateMode, TriageConfig};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

mod cli;

#[derive(Parser)]
#[command(name = "email-triage")]
#[command(about = "Classify emails as ontopic/offtopic and record feedback", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Configuration file (overrides EMAIL_TRIAGE_CONFIG and default locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one email (argument, --file, or stdin)
    Classify {
        /// Email text
        text: Option<String>,

        /// Read the email from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Override the configured keyword gate
        #[arg(long, value_enum)]
        gate: Option<GateMode>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive review shell: classify emails and approve/disapprove predictions
    Shell {
        /// Override the configured keyword gate
        #[arg(long, value_enum)]
        gate: Option<GateMode>,
    },

    /// Inspect or download the feedback log
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Show the document-type lexicon, or which types a text mentions
    Lexicon {
        /// Text to check against the lexicon
        text: Option<String>,
    },

    /// Load the model artifacts and report their shape
    Status {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum LogAction {
    /// Print feedback records
    Show {
        /// Only the most recent N records
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve/disapprove counts per predicted label
    Summary {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the full log (stdout if no output path)
    Export {
        /// Output path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration as TOML
    Show,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::new(format!(
        "email_triage={}",
        level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("email-triage v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = TriageConfig::resolve(cli.config)?;

    match cli.command {
        Commands::Classify {
            text,
            file,
            gate,
            json,
        } => cli::classify::handle(&config, text, file, gate, json)?,
        Commands::Shell { gate } => cli::shell::handle(&config, gate).await?,
        Commands::Log { action } => match action {
            LogAction::Show { limit, json } => cli::log::show(&config, limit, json)?,
            LogAction::Summary { json } => cli::log::summary(&config, json)?,
            LogAction::Export { output } => cli::log::export(&config, output)?,
        },
        Commands::Lexicon { text } => cli::lexicon::handle(text),
        Commands::Status { json } => cli::status::handle(&config, json)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::config::show(&config)?,
        },
    }

    Ok(())
}
