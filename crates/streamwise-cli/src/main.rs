//! The streamwise user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "streamwise",
    version,
    about = "Aptitude assessment and academic stream recommendations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the assessment questions
    Questions {
        /// Question bank TOML (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score an answer sheet and recommend streams
    Assess {
        /// Chosen option per question, comma-separated; "-" skips (e.g. "0,2,-,1")
        #[arg(long, allow_hyphen_values = true)]
        answers: String,

        /// Question bank TOML (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Stream model TOML (defaults to the built-in model)
        #[arg(long)]
        streams: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Save the report: json, html, all
        #[arg(long)]
        save: Option<String>,

        /// Output directory for saved reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Recommend streams from a stored score vector
    Recommend {
        /// JSON file with the seven domain scores
        #[arg(long)]
        scores: PathBuf,

        /// Stream model TOML (defaults to the built-in model)
        #[arg(long)]
        streams: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two assessment reports
    Compare {
        /// Earlier report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Later report JSON
        #[arg(long)]
        current: PathBuf,

        /// Change in percentage points treated as significant
        #[arg(long)]
        threshold: Option<f64>,

        /// Exit code 1 if any domain declined
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank and stream model TOML files
    Validate {
        /// Question bank file or directory
        #[arg(long)]
        bank: PathBuf,

        /// Stream model file
        #[arg(long)]
        streams: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    // Logs go to stderr so `--format json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("streamwise=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Questions {
            bank,
            format,
            config,
        } => commands::questions::execute(bank, format, config),
        Commands::Assess {
            answers,
            bank,
            streams,
            format,
            save,
            output,
            config,
        } => commands::assess::execute(answers, bank, streams, format, save, output, config),
        Commands::Recommend {
            scores,
            streams,
            format,
            config,
        } => commands::recommend::execute(scores, streams, format, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
            config,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format, config),
        Commands::Validate { bank, streams } => commands::validate::execute(bank, streams),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
