// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret handling for Mindflow.
//!
//! Keeps API keys out of log output and user-facing error strings.

pub mod redact;

pub use redact::{RedactingWriter, redact};
