// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Journal data model shared across the workspace.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a journal entry.
///
/// Backed by a UUID v7, so the leading bits carry the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generates a fresh timestamp-ordered identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Overall sentiment of an entry.
///
/// Declaration order is the fixed dashboard order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All sentiments in dashboard order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];
}

/// Structured analysis of one journal entry.
///
/// Every field is required when deserializing; a payload missing any of them
/// is rejected rather than partially filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub emotions: Vec<String>,
    pub triggers: Vec<String>,
    pub suggestions: Vec<String>,
    pub summary: String,
}

/// A submitted journal text paired with its analysis.
///
/// Fields are private: an entry is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    id: EntryId,
    date: String,
    created_at: DateTime<Utc>,
    text: String,
    analysis: Option<AnalysisResult>,
}

impl JournalEntry {
    /// Builds an entry stamped with the current time.
    pub fn new(text: impl Into<String>, analysis: Option<AnalysisResult>) -> Self {
        Self::at(Utc::now(), text, analysis)
    }

    /// Builds an entry stamped with the given instant.
    pub fn at(
        created_at: DateTime<Utc>,
        text: impl Into<String>,
        analysis: Option<AnalysisResult>,
    ) -> Self {
        Self {
            id: EntryId::generate(),
            date: format_display_date(&created_at.with_timezone(&Local)),
            created_at,
            text: text.into(),
            analysis,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Human-readable local creation time, e.g. `3/14/2026, 9:05:02 PM`.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }
}

fn format_display_date<Tz: chrono::TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
