//! Narrative log of what happened, for players to read.

use serde::{Deserialize, Serialize};

/// One narrated event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Round the event happened in (0 during setup).
    pub round: u32,
    pub message: String,
}

/// Append-only list of action descriptions. Undo cuts it back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeLog {
    entries: Vec<LogEntry>,
}

impl NarrativeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: u32, message: impl Into<String>) {
        self.entries.push(LogEntry {
            round,
            message: message.into(),
        });
    }

    /// Drop entries after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Entries from one round.
    pub fn round(&self, round: u32) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.round == round)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
