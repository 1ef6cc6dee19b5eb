// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Mindflow.
//!
//! Provides a mock analysis adapter and data fixtures for fast,
//! deterministic tests without calling the Gemini API.
//!
//! # Components
//!
//! - [`MockAnalyzer`] - Mock analyzer with queued outcomes and an optional gate
//! - [`fixtures`] - Canned analyses and entries

pub mod fixtures;
pub mod mock_analyzer;

pub use mock_analyzer::MockAnalyzer;
