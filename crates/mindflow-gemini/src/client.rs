// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication, and mapping of transport and HTTP failures onto
//! [`MindflowError`] kinds. It never retries.

use std::time::Duration;

use mindflow_core::MindflowError;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key, sent as `x-goog-api-key`
    /// * `model` - Model identifier, e.g. `gemini-2.5-flash`
    /// * `base_url` - API root such as `https://generativelanguage.googleapis.com/v1beta`
    /// * `timeout` - Whole-request deadline
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, MindflowError> {
        let mut key_header = HeaderValue::from_str(&api_key)
            .map_err(|e| MindflowError::Config(format!("invalid API key header value: {e}")))?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key_header);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MindflowError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends one `generateContent` request and returns the decoded body.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, MindflowError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generateContent response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| self.transport_error(e))?;
            return serde_json::from_str::<GenerateContentResponse>(&body).map_err(|e| {
                MindflowError::MalformedResponse {
                    message: format!("failed to parse API response: {e}"),
                }
            });
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify_status(status, &body);
        warn!(status = %status, error = %err, "generateContent request failed");
        Err(err)
    }

    fn transport_error(&self, e: reqwest::Error) -> MindflowError {
        if e.is_timeout() {
            MindflowError::Timeout {
                duration: self.timeout,
            }
        } else {
            MindflowError::Network {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

/// Maps a non-success status and its body onto an error kind.
///
/// 401 and 403 are always credential failures. A 400 counts as one only when
/// the payload names the API key, since Gemini also uses 400 for bad requests.
fn classify_status(status: StatusCode, body: &str) -> MindflowError {
    let api_err = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let message = match &api_err {
        Some(e) => format!("Gemini API error ({} {}): {}", status.as_u16(), e.error.status, e.error.message),
        None => format!("API returned {status}: {body}"),
    };

    let key_rejected = api_err
        .as_ref()
        .is_some_and(|e| e.error.mentions_invalid_key());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            MindflowError::InvalidCredentials { message }
        }
        StatusCode::BAD_REQUEST if key_rejected => MindflowError::InvalidCredentials { message },
        _ => MindflowError::ServiceUnavailable {
            message,
            source: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, GenerationConfig};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "gemini-2.5-flash";

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            "test-api-key".into(),
            MODEL.into(),
            base_url.to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), "Hello")],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: serde_json::json!({"type": "OBJECT"}),
                temperature: 0.5,
            },
        }
    }

    fn endpoint_path() -> String {
        format!("/models/{MODEL}:generateContent")
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        });

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await.unwrap();

        assert_eq!(result.text().as_deref(), Some("{}"));
        assert_eq!(result.usage_metadata.unwrap().total_token_count, 15);
    }

    #[tokio::test]
    async fn client_sends_key_header_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {"temperature": 0.5, "responseMimeType": "application/json"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(&test_request()).await;
        assert!(result.is_ok(), "headers and body should match: {result:?}");
    }

    #[tokio::test]
    async fn invalid_key_400_is_credential_failure() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{"reason": "API_KEY_INVALID"}]
            }
        });

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(
            matches!(err, MindflowError::InvalidCredentials { .. }),
            "got: {err}"
        );
    }

    #[tokio::test]
    async fn forbidden_is_credential_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, MindflowError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn plain_bad_request_is_unavailable() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 400, "message": "Invalid JSON payload received.", "status": "INVALID_ARGUMENT"}
        });

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, MindflowError::ServiceUnavailable { .. }));
        assert!(err.to_string().contains("Invalid JSON payload"), "got: {err}");
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
        });

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, MindflowError::ServiceUnavailable { .. }));
        assert!(err.to_string().contains("UNAVAILABLE"), "got: {err}");
    }

    #[tokio::test]
    async fn unparseable_success_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, MindflowError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"candidates": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(
            "test-api-key".into(),
            MODEL.into(),
            server.uri(),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, MindflowError::Timeout { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn connection_refused_is_network_failure() {
        // Port 1 is reserved and nothing listens on it.
        let client = test_client("http://127.0.0.1:1");
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, MindflowError::Network { .. }), "got: {err}");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = test_client("https://example.test/v1beta/");
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
