// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Mindflow configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MindflowConfig {
    /// Journal session and logging settings.
    #[serde(default)]
    pub journal: JournalConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Journal session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JournalConfig {
    /// Display name shown in the shell banner and used in the prompt.
    #[serde(default = "default_journal_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            name: default_journal_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_journal_name() -> String {
    "mindflow".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Gemini `generateContent` configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` falls back to `GEMINI_API_KEY`, then `API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for analysis.
    #[serde(default = "default_model")]
    pub model: String,

    /// API root, without the `/models/...` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature. Low values keep analyses consistent.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Deadline for one analysis request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_temperature() -> f64 {
    0.5
}

fn default_request_timeout_secs() -> u64 {
    60
}
