//! Calculation history.
//!
//! A bounded, ordered log of `expression = result` records. Persistence is
//! delegated to a [`HistoryStore`]; the log keeps working in memory when the
//! store fails.

mod store;

pub use store::{HistoryStore, JsonFileStore, MemoryStore};

use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, warn};

/// Maximum number of entries kept; the oldest are dropped first.
pub const HISTORY_LIMIT: usize = 50;

const SEPARATOR: &str = " = ";

/// One evaluated expression and its displayed result.
///
/// Lines loaded from a store that are not in `expression = result` form are
/// kept as they are, with no result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    expression: String,
    result: Option<String>,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: Some(result.into()),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Recover an entry from its persisted form.
    pub fn from_line(line: &str) -> Self {
        match line.rsplit_once(SEPARATOR) {
            Some((expression, result)) => Self::new(expression, result),
            None => Self {
                expression: line.to_string(),
                result: None,
            },
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Some(result) => write!(f, "{}{}{}", self.expression, SEPARATOR, result),
            None => f.write_str(&self.expression),
        }
    }
}

/// Ordered history, newest last.
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    store: Box<dyn HistoryStore>,
}

impl HistoryLog {
    /// Create a log backed by `store`, loading whatever it holds.
    ///
    /// A missing or unreadable store yields an empty log.
    pub fn load(store: Box<dyn HistoryStore>) -> Self {
        let lines = store.load().unwrap_or_else(|error| {
            warn!(%error, "could not load history, starting empty");
            Vec::new()
        });

        let mut log = Self {
            entries: VecDeque::with_capacity(HISTORY_LIMIT),
            store,
        };
        for line in lines {
            log.push(HistoryEntry::from_line(&line));
        }
        debug!(entries = log.len(), "history loaded");
        log
    }

    /// Append `entry` and persist the log.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.push(entry);
        self.persist();
    }

    /// Entries in insertion order, newest last.
    pub fn all(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the log to its store. Failures are logged and otherwise ignored.
    pub fn persist(&self) {
        let lines: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        if let Err(error) = self.store.save(&lines) {
            warn!(%error, "could not save history");
        }
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > HISTORY_LIMIT {
            self.entries.pop_front();
        }
    }
}

impl fmt::Debug for HistoryLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryLog")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
