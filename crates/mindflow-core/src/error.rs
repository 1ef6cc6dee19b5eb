// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Mindflow.

use thiserror::Error;

/// The primary error type shared by the analysis client, the journal
/// controller, and the binary.
#[derive(Debug, Error)]
pub enum MindflowError {
    /// Configuration errors (invalid values, unreadable files).
    #[error("configuration error: {0}")]
    Config(String),

    /// No API credential could be resolved at startup. Fatal.
    #[error("missing credentials: set one of {variables}")]
    MissingCredentials { variables: String },

    /// The analysis service rejected the credential.
    #[error("invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// The request never produced an HTTP response (DNS, connect, reset).
    #[error("network error: {message}")]
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The service answered with a non-success status other than a
    /// credential rejection.
    #[error("service unavailable: {message}")]
    ServiceUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The service answered, but the payload did not match the analysis schema.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MindflowError {
    /// Returns true for errors that originate from the credential, either
    /// absent or rejected.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            MindflowError::MissingCredentials { .. } | MindflowError::InvalidCredentials { .. }
        )
    }
}
