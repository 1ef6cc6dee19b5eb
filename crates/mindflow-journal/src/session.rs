// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-flight request lifecycle for one journal session.
//!
//! A session moves Idle -> InFlight on an accepted submission and back to
//! Idle when the analyzer answers, whether it succeeded or failed. Only one
//! analysis is outstanding at a time; a submission that arrives while one is
//! in flight is rejected, not queued.
//!
//! The session owns the entry store and the current [`AppError`]. State is
//! kept behind a mutex that is never held across the analyzer call, so the
//! session can be shared by reference while a request is pending.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mindflow_core::{AnalysisAdapter, AnalysisResult, JournalEntry, MindflowError};
use tracing::{debug, info, warn};

use crate::aggregate::{self, DashboardSummary, EmotionCount, SentimentCount};
use crate::store::EntryStore;

/// States in the request FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RequestState {
    /// No analysis outstanding; submissions are accepted.
    Idle,
    /// An analysis is outstanding; submissions are rejected.
    InFlight,
}

/// Coarse, user-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credentials,
    Network,
    Unavailable,
}

impl ErrorCategory {
    /// The message shown to the user for this category.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCategory::Credentials => {
                "API key is invalid or missing. Please check your configuration."
            }
            ErrorCategory::Network => {
                "Network error. Please check your internet connection and try again."
            }
            ErrorCategory::Unavailable => {
                "Failed to analyze the entry. The AI service may be temporarily unavailable."
            }
        }
    }
}

/// Maps an analysis failure to its user-facing category.
pub fn classify(err: &MindflowError) -> ErrorCategory {
    if err.is_credential_failure() {
        return ErrorCategory::Credentials;
    }
    match err {
        MindflowError::Network { .. } => ErrorCategory::Network,
        _ => ErrorCategory::Unavailable,
    }
}

/// The last failed submission, kept so the user can retry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    category: ErrorCategory,
    original_text: String,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &'static str {
        self.category.message()
    }

    /// The exact text that was submitted.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }
}

/// Why a submission or retry was turned away without calling the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The text was empty after trimming.
    EmptyInput,
    /// Another analysis is in flight.
    Busy,
    /// `retry` was called with no failed submission on record.
    NothingToRetry,
}

/// Result of [`JournalSession::submit`] and [`JournalSession::retry`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The analysis succeeded; the new entry is now at the head of the store.
    Added(JournalEntry),
    /// The analysis failed; the returned error is now the session's error.
    Failed(AppError),
    /// Nothing happened.
    Rejected(RejectReason),
}

#[derive(Debug, Default)]
struct SessionInner {
    in_flight: bool,
    store: EntryStore,
    error: Option<AppError>,
}

/// One journaling session: entry store, error slot, and the single-flight
/// submit/retry state machine around an [`AnalysisAdapter`].
pub struct JournalSession {
    analyzer: Arc<dyn AnalysisAdapter>,
    deadline: Option<Duration>,
    inner: Mutex<SessionInner>,
}

impl JournalSession {
    /// Creates an idle session with an empty store.
    pub fn new(analyzer: Arc<dyn AnalysisAdapter>) -> Self {
        Self {
            analyzer,
            deadline: None,
            inner: Mutex::new(SessionInner::default()),
        }
    }

    /// Bounds every analyzer call; expiry fails the submission with
    /// [`MindflowError::Timeout`].
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Submits `text` for analysis.
    ///
    /// Rejected without side effects when `text` is blank or a request is
    /// already in flight. Otherwise clears the current error, calls the
    /// analyzer once, and either prepends a new entry or records an
    /// [`AppError`] carrying `text` verbatim.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            debug!("rejecting blank submission");
            return SubmitOutcome::Rejected(RejectReason::EmptyInput);
        }

        let flight = {
            let mut inner = self.lock();
            if inner.in_flight {
                debug!("rejecting submission while a request is in flight");
                return SubmitOutcome::Rejected(RejectReason::Busy);
            }
            inner.error = None;
            inner.in_flight = true;
            InFlightGuard { session: self }
        };

        info!(chars = text.chars().count(), "analysis started");
        let result = self.call_analyzer(text).await;

        let mut inner = self.lock();
        inner.in_flight = false;
        flight.disarm();

        match result {
            Ok(analysis) => {
                let entry = JournalEntry::new(text, Some(analysis));
                inner.store.prepend(entry.clone());
                info!(entry_id = %entry.id(), entries = inner.store.len(), "entry added");
                SubmitOutcome::Added(entry)
            }
            Err(err) => {
                let app_error = AppError {
                    category: classify(&err),
                    original_text: text.to_string(),
                };
                warn!(error = %err, category = ?app_error.category, "analysis failed");
                inner.error = Some(app_error.clone());
                SubmitOutcome::Failed(app_error)
            }
        }
    }

    /// Re-submits the text of the last failed submission.
    ///
    /// A no-op when no error is on record. Otherwise clears the error and
    /// behaves exactly like [`submit`](Self::submit) with the original text.
    /// There is no limit on how often a user may retry.
    pub async fn retry(&self) -> SubmitOutcome {
        let text = {
            let mut inner = self.lock();
            match inner.error.take() {
                Some(err) => err.original_text,
                None => return SubmitOutcome::Rejected(RejectReason::NothingToRetry),
            }
        };

        info!("retrying failed submission");
        self.submit(&text).await
    }

    pub fn state(&self) -> RequestState {
        if self.lock().in_flight {
            RequestState::InFlight
        } else {
            RequestState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state() == RequestState::InFlight
    }

    /// The current error, if the last submission failed.
    pub fn error(&self) -> Option<AppError> {
        self.lock().error.clone()
    }

    /// Snapshot of all entries, newest first.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.lock().store.all().to_vec()
    }

    pub fn entry_count(&self) -> usize {
        self.lock().store.len()
    }

    pub fn emotion_frequency(&self) -> Vec<EmotionCount> {
        aggregate::emotion_frequency(self.lock().store.all())
    }

    pub fn sentiment_distribution(&self) -> [SentimentCount; 3] {
        aggregate::sentiment_distribution(self.lock().store.all())
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_entries(self.lock().store.all())
    }

    async fn call_analyzer(&self, text: &str) -> Result<AnalysisResult, MindflowError> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.analyzer.analyze(text))
                .await
                .unwrap_or(Err(MindflowError::Timeout { duration: deadline })),
            None => self.analyzer.analyze(text).await,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        // State transitions cannot panic halfway, so a poisoned lock still
        // holds consistent data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the session to Idle if a submission future is dropped mid-flight.
struct InFlightGuard<'a> {
    session: &'a JournalSession,
}

impl InFlightGuard<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.lock().in_flight = false;
    }
}
