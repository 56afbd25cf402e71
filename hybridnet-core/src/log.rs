//! Bounded, timestamped event log shared by every session action.
//!
//! Entries are kept newest first; once the log is full the oldest entry is
//! evicted on every append.

use std::{collections::VecDeque, fmt, sync::Arc};

use chrono::{DateTime, Local};
use parking_lot::Mutex;

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

#[derive(Clone, Debug)]
pub struct EventLog {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
        });
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest entry first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    /// Rendered `[HH:MM:SS] message` lines, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Handle shared between the session and deferred probe tasks.
#[derive(Clone, Debug)]
pub struct SharedLog(Arc<Mutex<EventLog>>);

impl SharedLog {
    pub fn new(capacity: usize) -> Self {
        Self(Arc::new(Mutex::new(EventLog::new(capacity))))
    }

    pub fn push(&self, message: impl Into<String>) {
        self.0.lock().push(message);
    }

    /// Append several messages under one lock so they land together.
    pub fn extend<I, S>(&self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self.0.lock();
        for message in messages {
            guard.push(message);
        }
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.lock().messages()
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.lock().lines()
    }

    pub fn snapshot(&self) -> EventLog {
        self.0.lock().clone()
    }
}
