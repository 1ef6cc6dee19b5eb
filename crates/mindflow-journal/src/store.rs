// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory entry store.

use mindflow_core::JournalEntry;

/// Ordered journal entries, newest first.
///
/// Append-only from the caller's side: there is no removal, no
/// deduplication, no capacity bound, and nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` ahead of every existing entry.
    pub fn prepend(&mut self, entry: JournalEntry) {
        self.entries.insert(0, entry);
    }

    /// All entries, newest first.
    pub fn all(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
