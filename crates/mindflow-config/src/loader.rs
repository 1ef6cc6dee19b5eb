// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mindflow.toml` > `~/.config/mindflow/mindflow.toml` > `/etc/mindflow/mindflow.toml`
//! with environment variable overrides via `MINDFLOW_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MindflowConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mindflow/mindflow.toml` (system-wide)
/// 3. `~/.config/mindflow/mindflow.toml` (user XDG config)
/// 4. `./mindflow.toml` (local directory)
/// 5. `MINDFLOW_*` environment variables
pub fn load_config() -> Result<MindflowConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<MindflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MindflowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MindflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MindflowConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MindflowConfig::default()))
        .merge(Toml::file("/etc/mindflow/mindflow.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mindflow/mindflow.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mindflow.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `MINDFLOW_GEMINI_API_KEY` must map to `gemini.api_key`, not
/// `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("MINDFLOW_").map(|key| {
        // Keys arrive with the prefix stripped but still upper-case.
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("journal_", "journal.", 1)
            .replacen("gemini_", "gemini.", 1);
        mapped.into()
    })
}
