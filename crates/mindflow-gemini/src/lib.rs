// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini analysis adapter for Mindflow.
//!
//! This crate implements [`AnalysisAdapter`] on top of the Gemini
//! `generateContent` API using structured JSON output.

pub mod client;
pub mod schema;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use mindflow_config::model::GeminiConfig;
use mindflow_core::error::MindflowError;
use mindflow_core::traits::{AnalysisAdapter, PluginAdapter};
use mindflow_core::types::{AnalysisResult, HealthStatus};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig};

/// Environment variables consulted, in order, when the config has no key.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Gemini-backed analyzer implementing [`AnalysisAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` -> `API_KEY` -> error.
pub struct GeminiAnalyzer {
    client: GeminiClient,
    temperature: f64,
}

impl GeminiAnalyzer {
    /// Creates an analyzer from the `[gemini]` config section.
    ///
    /// Fails with [`MindflowError::MissingCredentials`] when no key can be
    /// resolved; callers treat that as fatal.
    pub fn new(config: &GeminiConfig) -> Result<Self, MindflowError> {
        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let analyzer = Self::with_api_key(config, api_key)?;

        info!(model = %config.model, "Gemini analyzer initialized");
        Ok(analyzer)
    }

    /// Creates an analyzer with an explicit key, bypassing env lookup.
    pub fn with_api_key(config: &GeminiConfig, api_key: String) -> Result<Self, MindflowError> {
        let client = GeminiClient::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Self {
            client,
            temperature: config.temperature,
        })
    }

    /// Builds the structured-output request for one entry.
    fn to_request(&self, text: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), schema::analysis_prompt(text))],
            system_instruction: Some(Content::text(None, schema::SYSTEM_INSTRUCTION)),
            generation_config: GenerationConfig {
                response_mime_type: schema::RESPONSE_MIME_TYPE.to_string(),
                response_schema: schema::analysis_schema(),
                temperature: self.temperature,
            },
        }
    }
}

#[async_trait]
impl PluginAdapter for GeminiAnalyzer {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, MindflowError> {
        // Constructing the client already proved a key exists; probing the
        // API would spend quota.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl AnalysisAdapter for GeminiAnalyzer {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, MindflowError> {
        debug!(chars = text.chars().count(), model = %self.client.model(), "requesting analysis");

        let response = self.client.generate_content(&self.to_request(text)).await?;

        let raw = response.text().ok_or_else(|| MindflowError::MalformedResponse {
            message: match response.block_reason() {
                Some(reason) => format!("prompt blocked: {reason}"),
                None => "response contained no candidate text".to_string(),
            },
        })?;

        let analysis = schema::parse_analysis(&raw)?;

        info!(
            sentiment = %analysis.sentiment,
            emotions = analysis.emotions.len(),
            triggers = analysis.triggers.len(),
            suggestions = analysis.suggestions.len(),
            "analysis completed"
        );
        Ok(analysis)
    }
}

/// Resolves the API key from config, then the process environment.
pub fn resolve_api_key(configured: Option<&str>) -> Result<String, MindflowError> {
    resolve_api_key_with(configured, |name| std::env::var(name).ok())
}

/// Resolution logic with an injectable environment lookup.
pub fn resolve_api_key_with(
    configured: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, MindflowError> {
    if let Some(key) = configured.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    API_KEY_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_string())
        .ok_or_else(|| MindflowError::MissingCredentials {
            variables: format!("gemini.api_key, {}", API_KEY_ENV_VARS.join(", ")),
        })
}
