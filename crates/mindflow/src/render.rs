// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for entry cards and the dashboard.

use std::fmt::Write;

use colored::{ColoredString, Colorize};
use mindflow_core::{JournalEntry, Sentiment};
use mindflow_journal::{DashboardSummary, RejectReason};

/// Widest bar drawn for the most frequent label.
const BAR_WIDTH: usize = 30;

fn sentiment_label(sentiment: Sentiment) -> ColoredString {
    let label = sentiment.to_string();
    match sentiment {
        Sentiment::Positive => label.green(),
        Sentiment::Negative => label.red(),
        Sentiment::Neutral => label.white(),
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max).max(1);
    "█".repeat(width)
}

/// One entry as a multi-line card.
pub fn entry_card(entry: &JournalEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", entry.date().dimmed());

    match entry.analysis() {
        Some(analysis) => {
            let _ = writeln!(out, "  {} {}", "Sentiment:".bold(), sentiment_label(analysis.sentiment));
            let _ = writeln!(out, "  {} {}", "Summary:".bold(), analysis.summary.italic());
            let _ = writeln!(
                out,
                "  {} {}",
                "Detected Emotions:".bold(),
                analysis.emotions.join(", ").cyan()
            );
            let _ = writeln!(
                out,
                "  {} {}",
                "Potential Triggers:".bold(),
                analysis.triggers.join(", ")
            );
            let _ = writeln!(out, "  {}", "Wellness Suggestions:".bold());
            for suggestion in &analysis.suggestions {
                let _ = writeln!(out, "    - {suggestion}");
            }
        }
        None => {
            let _ = writeln!(out, "  {}", "No analysis available.".dimmed());
        }
    }

    let _ = writeln!(out, "  {}", "Your Entry:".bold());
    for line in entry.text().lines() {
        let _ = writeln!(out, "    {line}");
    }
    out
}

/// Emotion frequency bars and the sentiment distribution.
pub fn dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();

    if summary.is_empty() {
        let _ = writeln!(out, "{}", "Dashboard is empty".bold());
        let _ = writeln!(
            out,
            "{}",
            "Write some journal entries to see your emotional trends.".dimmed()
        );
        return out;
    }

    let _ = writeln!(out, "{}", "Emotion Frequency".bold());
    if summary.emotion_frequency.is_empty() {
        let _ = writeln!(out, "  {}", "No emotions detected yet.".dimmed());
    } else {
        let max = summary.emotion_frequency[0].count;
        let width = summary
            .emotion_frequency
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);
        for emotion in &summary.emotion_frequency {
            let _ = writeln!(
                out,
                "  {:<width$}  {} {}",
                emotion.label,
                bar(emotion.count, max).cyan(),
                emotion.count
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Sentiment Distribution".bold());
    let max = summary
        .sentiment_distribution
        .iter()
        .map(|s| s.count)
        .max()
        .unwrap_or(0);
    for slot in &summary.sentiment_distribution {
        let label = format!("{:<8}", slot.sentiment.to_string());
        let painted = match slot.sentiment {
            Sentiment::Positive => bar(slot.count, max).green(),
            Sentiment::Negative => bar(slot.count, max).red(),
            Sentiment::Neutral => bar(slot.count, max).white(),
        };
        let _ = writeln!(out, "  {label}  {painted} {}", slot.count);
    }

    let _ = writeln!(
        out,
        "\n  {}",
        format!(
            "{} entries, {} analysed",
            summary.total_entries, summary.analysed_entries
        )
        .dimmed()
    );
    out
}

/// Placeholder shown when the journal has no entries.
pub fn empty_journal() -> String {
    format!(
        "{}\n{}",
        "Your journal awaits".bold(),
        "Your thoughts are safe here. Start writing to see your insights.".dimmed()
    )
}

pub fn reject_reason(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::EmptyInput => "the entry is empty",
        RejectReason::Busy => "an analysis is already in progress",
        RejectReason::NothingToRetry => "there is no failed entry to retry",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindflow_test_utils::fixtures;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn bar_scales_to_max() {
        assert_eq!(bar(4, 4).chars().count(), BAR_WIDTH);
        assert_eq!(bar(2, 4).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 100).chars().count(), 1);
        assert_eq!(bar(0, 4), "");
    }

    #[test]
    fn card_shows_every_section() {
        plain();
        let entry = fixtures::entry("Slept badly, long meeting.", Sentiment::Negative, &["Fatigue"]);
        let card = entry_card(&entry);

        assert!(card.starts_with(entry.date()));
        assert!(card.contains("Sentiment: Negative"));
        assert!(card.contains("Detected Emotions: Fatigue"));
        assert!(card.contains("Potential Triggers:"));
        assert!(card.contains("Wellness Suggestions:"));
        assert!(card.contains("    Slept badly, long meeting."));
    }

    #[test]
    fn card_without_analysis() {
        plain();
        let card = entry_card(&fixtures::unanalysed_entry("just text"));
        assert!(card.contains("No analysis available."));
        assert!(card.contains("just text"));
    }

    #[test]
    fn empty_dashboard_hint() {
        plain();
        let out = dashboard(&DashboardSummary::from_entries(&[]));
        assert!(out.contains("Dashboard is empty"));
        assert!(!out.contains("Emotion Frequency"));
    }

    #[test]
    fn dashboard_lists_emotions_by_count_and_all_sentiments() {
        plain();
        let entries = vec![
            fixtures::entry("b", Sentiment::Positive, &["Joy"]),
            fixtures::entry("a", Sentiment::Positive, &["Joy", "Calm"]),
        ];
        let out = dashboard(&DashboardSummary::from_entries(&entries));

        let joy = out.find("Joy").unwrap();
        let calm = out.find("Calm").unwrap();
        assert!(joy < calm);

        let positive = out.find("Positive").unwrap();
        let negative = out.find("Negative").unwrap();
        let neutral = out.find("Neutral").unwrap();
        assert!(positive < negative && negative < neutral);
        assert!(out.contains("2 entries, 2 analysed"));
    }
}
