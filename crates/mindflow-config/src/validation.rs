// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::MindflowConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &MindflowConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.journal.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "journal.log_level `{}` is not one of {}",
                config.journal.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    let base_url = config.gemini.base_url.trim();
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.base_url `{base_url}` must be an http(s) URL"),
        });
    }

    let temperature = config.gemini.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.temperature must be between 0.0 and 2.0, got {temperature}"),
        });
    }

    if config.gemini.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(key) = &config.gemini.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "gemini.api_key must not be blank when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
