// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mindflow shell` command implementation.
//!
//! Interactive REPL over one [`JournalSession`]. Plain lines are journal
//! entries; lines starting with `/` are commands. The session lives exactly
//! as long as the REPL.

use colored::Colorize;
use mindflow_config::MindflowConfig;
use mindflow_core::MindflowError;
use mindflow_journal::{JournalSession, RejectReason, SubmitOutcome};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::render;

/// One parsed line of shell input.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    Entry(&'a str),
    Dashboard,
    Entries,
    Retry,
    Help,
    Quit,
    Blank,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> ShellInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellInput::Blank;
    }
    match trimmed {
        "/dashboard" => ShellInput::Dashboard,
        "/entries" => ShellInput::Entries,
        "/retry" => ShellInput::Retry,
        "/help" => ShellInput::Help,
        "/quit" | "/exit" => ShellInput::Quit,
        escaped if escaped.starts_with("//") => ShellInput::Entry(&escaped[1..]),
        // A bare `/word` is most likely a mistyped command; anything longer is prose.
        cmd if cmd
            .strip_prefix('/')
            .is_some_and(|word| word.chars().all(char::is_alphanumeric)) =>
        {
            ShellInput::Unknown(cmd)
        }
        entry => ShellInput::Entry(entry),
    }
}

fn print_help() {
    println!("Write anything and press enter to add an entry.");
    println!("  {}  show emotion and sentiment trends", "/dashboard".yellow());
    println!("  {}    list all entries, newest first", "/entries".yellow());
    println!("  {}      try the last failed entry again", "/retry".yellow());
    println!("  {}       show this help", "/help".yellow());
    println!("  {}       leave (entries are not kept)", "/quit".yellow());
    println!("Begin an entry with {} to start it with a literal slash.", "//".yellow());
}

/// Runs the `mindflow shell` interactive REPL.
pub async fn run_shell(config: &MindflowConfig, session: JournalSession) -> Result<(), MindflowError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| MindflowError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", config.journal.name.bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());
    println!("{}\n", render::empty_journal());

    let prompt = format!("{}> ", "journal".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let input = parse_line(&line);
                if input != ShellInput::Blank {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match input {
                    ShellInput::Blank => continue,
                    ShellInput::Quit => break,
                    ShellInput::Help => print_help(),
                    ShellInput::Dashboard => println!("{}", render::dashboard(&session.dashboard())),
                    ShellInput::Entries => print_entries(&session),
                    ShellInput::Retry => {
                        let outcome = session.retry().await;
                        report(outcome);
                    }
                    ShellInput::Entry(text) => {
                        println!("{}", "Analyzing your thoughts...".dimmed());
                        let outcome = session.submit(text).await;
                        report(outcome);
                    }
                    ShellInput::Unknown(cmd) => {
                        eprintln!(
                            "{}: unknown command {cmd}, try /help (start with // to write it as an entry)",
                            "error".red()
                        );
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!(
        "{}",
        format!("{} entries this session, goodbye", session.entry_count()).dimmed()
    );
    Ok(())
}

fn print_entries(session: &JournalSession) {
    let entries = session.entries();
    if entries.is_empty() {
        println!("{}", render::empty_journal());
        return;
    }
    for entry in &entries {
        println!("{}", render::entry_card(entry));
    }
}

fn report(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Added(entry) => println!("{}", render::entry_card(&entry)),
        SubmitOutcome::Failed(app_error) => {
            eprintln!("{}", app_error.message().red());
            eprintln!("Type {} to try again.", "/retry".yellow());
        }
        SubmitOutcome::Rejected(RejectReason::NothingToRetry) => {
            println!("{}", "Nothing to retry.".dimmed());
        }
        SubmitOutcome::Rejected(reason) => {
            eprintln!("{}: {}", "skipped".yellow(), render::reject_reason(reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_trimmed() {
        assert_eq!(parse_line("  rough day \n"), ShellInput::Entry("rough day"));
    }

    #[test]
    fn commands_are_recognised() {
        assert_eq!(parse_line("/dashboard"), ShellInput::Dashboard);
        assert_eq!(parse_line(" /entries "), ShellInput::Entries);
        assert_eq!(parse_line("/retry"), ShellInput::Retry);
        assert_eq!(parse_line("/help"), ShellInput::Help);
        assert_eq!(parse_line("/quit"), ShellInput::Quit);
        assert_eq!(parse_line("/exit"), ShellInput::Quit);
    }

    #[test]
    fn blank_and_unknown() {
        assert_eq!(parse_line("   "), ShellInput::Blank);
        assert_eq!(parse_line("/dance"), ShellInput::Unknown("/dance"));
    }

    #[test]
    fn slash_prose_is_an_entry() {
        assert_eq!(
            parse_line("/sigh, another long day"),
            ShellInput::Entry("/sigh, another long day")
        );
        assert_eq!(parse_line("/ feeling split"), ShellInput::Entry("/ feeling split"));
    }

    #[test]
    fn double_slash_escapes_a_command_word() {
        assert_eq!(parse_line("//sigh"), ShellInput::Entry("/sigh"));
        assert_eq!(parse_line("//quit"), ShellInput::Entry("/quit"));
    }
}
