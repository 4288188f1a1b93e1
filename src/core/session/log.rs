//! Combat Event Log
//!
//! Bounded, newest-first history of what happened during an encounter.
//! Entries carry a display category and a creation timestamp; once the cap
//! is reached the oldest entries are dropped silently.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries retained.
pub const LOG_CAP: usize = 100;

/// How many entries the screen shows by default.
pub const LOG_DISPLAY: usize = 20;

// ============================================================================
// Log Entry
// ============================================================================

/// Display category for a log entry. Styling only; no behavior hangs off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Damage,
    Heal,
    Status,
    Initiative,
    Turn,
    Info,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Damage => "damage",
            LogKind::Heal => "heal",
            LogKind::Status => "status",
            LogKind::Initiative => "initiative",
            LogKind::Turn => "turn",
            LogKind::Info => "info",
        }
    }
}

/// One line in the combat log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Combat Log
// ============================================================================

/// Newest-first event log, capped at [`LOG_CAP`] entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry, timestamped now. Oldest entries fall off the end.
    pub fn record(&mut self, message: impl Into<String>, kind: LogKind) {
        self.entries.push_front(LogEntry {
            message: message.into(),
            kind,
            timestamp: Utc::now(),
        });
        self.entries.truncate(LOG_CAP);
    }

    /// All retained entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().take(n)
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
