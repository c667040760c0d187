// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The operator-facing activity log.

use std::collections::VecDeque;
use std::fmt;

use chrono::{Local, NaiveTime};

/// Timestamp format of log entries.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One activity log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall-clock time the entry was recorded.
    pub time: NaiveTime,
    /// What happened.
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time.format(TIME_FORMAT), self.message)
    }
}

/// Newest-first list of completed actions and failures.
///
/// Holds at most `capacity` entries; recording past that drops the oldest.
/// A capacity of zero keeps everything.
#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl ActivityLog {
    /// Creates an empty log.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Records `message` at the current local time.
    pub fn record(&mut self, message: impl Into<String>) {
        self.record_at(Local::now().time(), message);
    }

    /// Records `message` at `time`.
    pub fn record_at(&mut self, time: NaiveTime, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            time,
            message: message.into(),
        });
        if self.capacity > 0 {
            self.entries.truncate(self.capacity);
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    /// The most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries held, `0` for unbounded.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
