// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mindflow doctor` command implementation.
//!
//! Checks configuration and credentials without spending API quota.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use mindflow_config::{ConfigError, MindflowConfig};
use mindflow_core::{HealthStatus, PluginAdapter};
use mindflow_gemini::{API_KEY_ENV_VARS, GeminiAnalyzer};

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Runs all checks, prints a report, and returns the number of failures.
///
/// Configuration is loaded here rather than by the caller, so a broken file
/// is reported as a failed check. The remaining checks then run against the
/// compiled defaults.
pub async fn run_doctor(config_path: Option<&Path>, plain: bool) -> usize {
    let use_color = !plain && std::io::stdout().is_terminal();

    let start = Instant::now();
    let loaded = match config_path {
        Some(path) => mindflow_config::load_and_validate_path(path),
        None => mindflow_config::load_and_validate(),
    };
    let config_result = check_config(&loaded, start);
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            mindflow_config::render_errors(&errors);
            MindflowConfig::default()
        }
    };

    let results = vec![
        config_result,
        check_credentials(&config, |name| std::env::var(name).ok()),
        check_analyzer(&config).await,
    ];

    println!();
    println!("  mindflow doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        match result.status {
            CheckStatus::Fail => fail_count += 1,
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Pass => {}
        }
        println!("{}", format_line(result, use_color));
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    fail_count
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    use colored::Colorize;

    let duration_ms = result.duration.as_millis();
    let (symbol, message) = if use_color {
        match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.clone()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow().to_string()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red().to_string()),
        }
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        (tag.to_string(), result.message.clone())
    };
    format!("    {symbol} {:<14} {message} ({duration_ms}ms)", result.name)
}

/// Check configuration loads without errors.
fn check_config(loaded: &Result<MindflowConfig, Vec<ConfigError>>, start: Instant) -> CheckResult {
    let (status, message) = match loaded {
        Ok(_) => (CheckStatus::Pass, "valid".to_string()),
        Err(errors) => (CheckStatus::Fail, format!("{} error(s)", errors.len())),
    };
    CheckResult {
        name: "Configuration".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Names where the API key would come from, without revealing it.
fn credential_source(
    config: &MindflowConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<&'static str> {
    if config
        .gemini
        .api_key
        .as_deref()
        .is_some_and(|k| !k.trim().is_empty())
    {
        return Some("gemini.api_key");
    }
    API_KEY_ENV_VARS
        .iter()
        .copied()
        .find(|name| lookup(name).is_some_and(|v| !v.trim().is_empty()))
}

fn check_credentials(config: &MindflowConfig, lookup: impl Fn(&str) -> Option<String>) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match credential_source(config, lookup) {
        Some(source) => (CheckStatus::Pass, format!("found in {source}")),
        None => (
            CheckStatus::Fail,
            format!(
                "missing; set gemini.api_key or one of {}",
                API_KEY_ENV_VARS.join(", ")
            ),
        ),
    };
    CheckResult {
        name: "API key".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Builds the analyzer and asks it for its health.
async fn check_analyzer(config: &MindflowConfig) -> CheckResult {
    let start = Instant::now();
    let (status, message) = match GeminiAnalyzer::new(&config.gemini) {
        Ok(analyzer) => match analyzer.health_check().await {
            Ok(HealthStatus::Healthy) => (
                CheckStatus::Pass,
                format!("{} ready ({})", analyzer.name(), config.gemini.model),
            ),
            Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, reason),
            Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
            Err(e) => (CheckStatus::Fail, e.to_string()),
        },
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "Analyzer".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}
