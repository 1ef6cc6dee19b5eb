// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard aggregation over a snapshot of entries.
//!
//! Both summaries are recomputed from scratch on each call. Entries without
//! an analysis contribute nothing.

use std::collections::HashMap;

use mindflow_core::{JournalEntry, Sentiment};
use serde::Serialize;

/// How many times one emotion label appears across analysed entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionCount {
    pub label: String,
    pub count: usize,
}

/// How many analysed entries carry one sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentCount {
    pub sentiment: Sentiment,
    pub count: usize,
}

/// Emotion label counts, highest first.
///
/// Labels are compared exactly. Equal counts keep the order in which the
/// labels were first seen while walking `entries` front to back.
pub fn emotion_frequency(entries: &[JournalEntry]) -> Vec<EmotionCount> {
    let mut counts: Vec<EmotionCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for analysis in entries.iter().filter_map(JournalEntry::analysis) {
        for label in &analysis.emotions {
            match index.get(label.as_str()) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(label.as_str(), counts.len());
                    counts.push(EmotionCount {
                        label: label.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    // Stable sort preserves first-seen order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Sentiment counts in the fixed order Positive, Negative, Neutral.
///
/// All three categories are always present; the counts sum to the number of
/// analysed entries.
pub fn sentiment_distribution(entries: &[JournalEntry]) -> [SentimentCount; 3] {
    let mut distribution = Sentiment::ALL.map(|sentiment| SentimentCount { sentiment, count: 0 });

    for analysis in entries.iter().filter_map(JournalEntry::analysis) {
        if let Some(slot) = distribution
            .iter_mut()
            .find(|s| s.sentiment == analysis.sentiment)
        {
            slot.count += 1;
        }
    }

    distribution
}

/// Everything the dashboard view needs, computed in one pass over a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_entries: usize,
    pub analysed_entries: usize,
    pub emotion_frequency: Vec<EmotionCount>,
    pub sentiment_distribution: [SentimentCount; 3],
}

impl DashboardSummary {
    pub fn from_entries(entries: &[JournalEntry]) -> Self {
        Self {
            total_entries: entries.len(),
            analysed_entries: entries.iter().filter(|e| e.analysis().is_some()).count(),
            emotion_frequency: emotion_frequency(entries),
            sentiment_distribution: sentiment_distribution(entries),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }
}
