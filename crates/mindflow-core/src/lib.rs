// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Mindflow.
//!
//! Holds the journal data model, the shared error taxonomy, and the adapter
//! traits that analysis backends implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MindflowError;
pub use traits::{AnalysisAdapter, PluginAdapter};
pub use types::{AnalysisResult, EntryId, HealthStatus, JournalEntry, Sentiment};
