// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned analyses and entries.

use mindflow_core::{AnalysisResult, JournalEntry, Sentiment};

/// An analysis with the given sentiment and emotions and filler elsewhere.
pub fn analysis(sentiment: Sentiment, emotions: &[&str]) -> AnalysisResult {
    AnalysisResult {
        sentiment,
        emotions: emotions.iter().map(|e| e.to_string()).collect(),
        triggers: vec!["Daily routine".to_string()],
        suggestions: vec![
            "Take a mindful breath".to_string(),
            "Write one more line tomorrow".to_string(),
        ],
        summary: format!("A {} entry.", sentiment.to_string().to_lowercase()),
    }
}

/// The fallback analysis returned by an empty [`crate::MockAnalyzer`].
pub fn default_analysis() -> AnalysisResult {
    analysis(Sentiment::Neutral, &["Calm", "Curiosity"])
}

/// An analysed entry.
pub fn entry(text: &str, sentiment: Sentiment, emotions: &[&str]) -> JournalEntry {
    JournalEntry::new(text, Some(analysis(sentiment, emotions)))
}

/// An entry whose analysis is absent.
pub fn unanalysed_entry(text: &str) -> JournalEntry {
    JournalEntry::new(text, None)
}
