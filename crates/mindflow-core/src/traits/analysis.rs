// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Analysis adapter trait for structured-generation backends.

use async_trait::async_trait;

use crate::error::MindflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::AnalysisResult;

/// Adapter that turns journal text into a validated [`AnalysisResult`].
///
/// Implementations make exactly one outbound call per invocation. They do
/// not cache and do not retry; retry is a caller decision. Callers must not
/// pass text that is empty after trimming.
#[async_trait]
pub trait AnalysisAdapter: PluginAdapter {
    /// Analyzes one journal entry.
    ///
    /// Fails with [`MindflowError::InvalidCredentials`],
    /// [`MindflowError::Network`], [`MindflowError::ServiceUnavailable`],
    /// [`MindflowError::MalformedResponse`], or [`MindflowError::Timeout`].
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, MindflowError>;
}
