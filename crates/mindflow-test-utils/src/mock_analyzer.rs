// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock analysis adapter for deterministic testing.
//!
//! `MockAnalyzer` implements `AnalysisAdapter` with pre-configured outcomes,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify, Semaphore};

use mindflow_core::traits::{AnalysisAdapter, PluginAdapter};
use mindflow_core::types::{AnalysisResult, HealthStatus};
use mindflow_core::MindflowError;

use crate::fixtures;

/// A mock analyzer that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// [`fixtures::default_analysis`] is returned.
///
/// A gated mock parks every call until [`MockAnalyzer::release`] is called,
/// which lets a test observe the caller while a request is in flight.
#[derive(Clone)]
pub struct MockAnalyzer {
    outcomes: Arc<Mutex<VecDeque<Result<AnalysisResult, MindflowError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
    started: Arc<Notify>,
    gate: Option<Arc<Semaphore>>,
}

impl MockAnalyzer {
    /// Create a new mock with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            started: Arc::new(Notify::new()),
            gate: None,
        }
    }

    /// Create a mock pre-loaded with the given outcomes.
    pub fn with_outcomes(outcomes: Vec<Result<AnalysisResult, MindflowError>>) -> Self {
        let mock = Self::new();
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            ..mock
        }
    }

    /// Make every call wait for a [`release`](Self::release) before answering.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Queue a successful analysis.
    pub async fn push_success(&self, analysis: AnalysisResult) {
        self.outcomes.lock().await.push_back(Ok(analysis));
    }

    /// Queue a failure.
    pub async fn push_failure(&self, error: MindflowError) {
        self.outcomes.lock().await.push_back(Err(error));
    }

    /// Let one parked call proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Wait until a call has entered `analyze`.
    pub async fn wait_for_call(&self) {
        self.started.notified().await;
    }

    /// Texts passed to `analyze`, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockAnalyzer {
    fn name(&self) -> &str {
        "mock-analyzer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, MindflowError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl AnalysisAdapter for MockAnalyzer {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, MindflowError> {
        self.calls.lock().await.push(text.to_string());
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| MindflowError::Internal(format!("mock gate closed: {e}")))?;
            permit.forget();
        }

        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(fixtures::default_analysis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindflow_core::Sentiment;

    #[tokio::test]
    async fn returns_queued_outcomes_in_order() {
        let mock = MockAnalyzer::with_outcomes(vec![
            Ok(fixtures::analysis(Sentiment::Positive, &["Joy"])),
            Err(MindflowError::MalformedResponse {
                message: "bad".into(),
            }),
        ]);

        let first = mock.analyze("one").await.unwrap();
        assert_eq!(first.sentiment, Sentiment::Positive);
        assert!(mock.analyze("two").await.is_err());
        assert_eq!(mock.analyze("three").await.unwrap(), fixtures::default_analysis());
        assert_eq!(mock.calls().await, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn gated_mock_waits_for_release() {
        let mock = MockAnalyzer::new().gated();
        let task = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.analyze("held").await })
        };

        mock.wait_for_call().await;
        assert!(!task.is_finished());
        mock.release();
        assert!(task.await.unwrap().is_ok());
    }
}
