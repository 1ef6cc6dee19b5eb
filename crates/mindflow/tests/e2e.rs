// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: journal session driving the Gemini analyzer against a
//! mock HTTP server.

use std::sync::Arc;
use std::time::Duration;

use mindflow_core::Sentiment;
use mindflow_gemini::GeminiAnalyzer;
use mindflow_journal::{ErrorCategory, JournalSession, RequestState, SubmitOutcome};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/models/gemini-2.5-flash:generateContent";

fn session_for(server: &MockServer) -> JournalSession {
    let toml = format!("[gemini]\nbase_url = \"{}\"\n", server.uri());
    let config = mindflow_config::load_and_validate_str(&toml).unwrap();
    let analyzer = GeminiAnalyzer::with_api_key(&config.gemini, "test-key".into()).unwrap();
    JournalSession::new(Arc::new(analyzer)).with_deadline(Duration::from_secs(5))
}

fn candidate(analysis: Value) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": analysis.to_string() }] },
            "finishReason": "STOP"
        }]
    })
}

fn analysis(sentiment: &str, emotions: &[&str]) -> Value {
    json!({
        "sentiment": sentiment,
        "emotions": emotions,
        "triggers": ["Work"],
        "suggestions": ["Take a short walk.", "Write down one good thing."],
        "summary": "A day with mixed feelings."
    })
}

#[tokio::test]
async fn entry_flows_from_http_to_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candidate(analysis("Positive", &["Joy", "Calm"]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let outcome = session.submit("Coffee with an old friend.").await;

    let SubmitOutcome::Added(entry) = outcome else {
        panic!("expected Added, got {outcome:?}");
    };
    let result = entry.analysis().unwrap();
    assert_eq!(result.sentiment, Sentiment::Positive);
    assert_eq!(result.emotions, ["Joy", "Calm"]);

    let dashboard = session.dashboard();
    assert_eq!(dashboard.total_entries, 1);
    assert_eq!(dashboard.emotion_frequency[0].label, "Joy");
    assert_eq!(dashboard.sentiment_distribution[0].count, 1);
}

#[tokio::test]
async fn rejected_key_then_retry_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED" }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candidate(analysis("Neutral", &["Focus"]))),
        )
        .mount(&server)
        .await;

    let session = session_for(&server);

    let first = session.submit("Quiet afternoon.").await;
    let SubmitOutcome::Failed(app_error) = first else {
        panic!("expected Failed, got {first:?}");
    };
    assert_eq!(app_error.category(), ErrorCategory::Credentials);
    assert_eq!(session.entry_count(), 0);

    let second = session.retry().await;
    assert!(matches!(second, SubmitOutcome::Added(ref e) if e.text() == "Quiet afternoon."));
    assert!(session.error().is_none());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn missing_summary_is_reported_as_unavailable() {
    let server = MockServer::start().await;
    let mut partial = analysis("Negative", &["Sadness"]);
    partial.as_object_mut().unwrap().remove("summary");
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(partial)))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let outcome = session.submit("Missed the train.").await;

    let SubmitOutcome::Failed(app_error) = outcome else {
        panic!("expected Failed, got {outcome:?}");
    };
    assert_eq!(app_error.category(), ErrorCategory::Unavailable);
    assert_eq!(app_error.original_text(), "Missed the train.");
    assert_eq!(session.entry_count(), 0);
}

#[tokio::test]
async fn server_error_returns_session_to_idle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let outcome = session.submit("Storm outside.").await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.category() == ErrorCategory::Unavailable));
    assert_eq!(session.state(), RequestState::Idle);
}

#[tokio::test]
async fn blank_entry_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let outcome = session.submit("   ").await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
}
