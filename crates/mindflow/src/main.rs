// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mindflow - a journaling companion.
//!
//! This is the binary entry point.

mod doctor;
mod render;
mod shell;

use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use mindflow_config::MindflowConfig;
use mindflow_core::MindflowError;
use mindflow_gemini::GeminiAnalyzer;
use mindflow_journal::{JournalSession, SubmitOutcome};
use mindflow_security::RedactingWriter;

/// Mindflow - write a journal entry, get a reflection back.
#[derive(Parser, Debug)]
#[command(name = "mindflow", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the default hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive journal (default).
    Shell,
    /// Analyse a single entry and print the result.
    Analyze {
        /// The entry text.
        text: String,
    },
    /// Check configuration and credentials without calling the API.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Doctor { plain }) = cli.command {
        init_tracing("warn", Arc::new(RwLock::new(Vec::new())));
        let failures = doctor::run_doctor(cli.config.as_deref(), plain).await;
        std::process::exit(if failures > 0 { 1 } else { 0 });
    }

    let loaded = match &cli.config {
        Some(path) => mindflow_config::load_and_validate_path(path),
        None => mindflow_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            mindflow_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let secrets = Arc::new(RwLock::new(Vec::new()));
    init_tracing(&config.journal.log_level, secrets.clone());

    let result = match cli.command {
        Some(Commands::Analyze { text }) => run_analyze(&config, &secrets, &text).await,
        Some(Commands::Shell) | Some(Commands::Doctor { .. }) | None => {
            match build_session(&config, &secrets) {
                Ok(session) => shell::run_shell(&config, session).await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Builds the analyzer and wraps it in a session.
///
/// Fails with `MissingCredentials` before any analysis is possible when no
/// key can be found. The resolved key is registered for log redaction.
fn build_session(
    config: &MindflowConfig,
    secrets: &Arc<RwLock<Vec<String>>>,
) -> Result<JournalSession, MindflowError> {
    let api_key = mindflow_gemini::resolve_api_key(config.gemini.api_key.as_deref())?;
    RedactingWriter::<std::io::Stderr>::add_secret_value(secrets, api_key.clone());

    let analyzer = GeminiAnalyzer::with_api_key(&config.gemini, api_key)?;
    tracing::info!(model = %config.gemini.model, "Gemini analyzer initialized");

    Ok(JournalSession::new(Arc::new(analyzer))
        .with_deadline(Duration::from_secs(config.gemini.request_timeout_secs)))
}

/// Runs `mindflow analyze`: one submission, card on success, exit 1 otherwise.
async fn run_analyze(
    config: &MindflowConfig,
    secrets: &Arc<RwLock<Vec<String>>>,
    text: &str,
) -> Result<(), MindflowError> {
    let session = build_session(config, secrets)?;

    eprintln!("{}", "Analyzing your thoughts...".dimmed());
    match analyze_report(session.submit(text.trim()).await) {
        Ok(card) => {
            println!("{card}");
            Ok(())
        }
        Err(message) => {
            eprintln!("{}", message.red());
            std::process::exit(1);
        }
    }
}

/// The card to print for a new entry, or the line explaining why there is none.
fn analyze_report(outcome: SubmitOutcome) -> Result<String, String> {
    match outcome {
        SubmitOutcome::Added(entry) => Ok(render::entry_card(&entry)),
        SubmitOutcome::Failed(app_error) => Err(app_error.message().to_string()),
        SubmitOutcome::Rejected(reason) => {
            Err(format!("nothing analysed: {}", render::reject_reason(reason)))
        }
    }
}

/// Installs the stderr subscriber; every line passes through the redactor.
fn init_tracing(log_level: &str, secrets: Arc<RwLock<Vec<String>>>) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mindflow={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), secrets.clone()))
        .init();
}
