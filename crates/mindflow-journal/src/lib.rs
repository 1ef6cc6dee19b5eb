// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Journal session logic for Mindflow.
//!
//! - [`store::EntryStore`]: newest-first, in-memory list of analysed entries
//! - [`aggregate`]: emotion frequency and sentiment distribution over a snapshot
//! - [`session::JournalSession`]: the single-flight submit/retry state machine

pub mod aggregate;
pub mod session;
pub mod store;

pub use aggregate::{DashboardSummary, EmotionCount, SentimentCount};
pub use session::{
    AppError, ErrorCategory, JournalSession, RejectReason, RequestState, SubmitOutcome, classify,
};
pub use store::EntryStore;
