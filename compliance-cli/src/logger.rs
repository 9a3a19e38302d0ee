//! Logging abstraction for testable output.
//!
//! Commands report progress through a [`Logger`] so tests can assert on what
//! a run said without capturing the process's stderr.

use std::io::Write;
use std::sync::{Arc, PoisonError, RwLock};

/// How much a run prints, from the `-v` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// PASS/FAIL verdicts and failure detail.
    Normal,
    /// Files loaded, per-section entry counts.
    Verbose,
    /// Every remaining item and the sections each check covered.
    Debug,
}

impl Verbosity {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Sink for command output.
pub trait Logger: Send + Sync {
    fn log(&self, level: Verbosity, message: &str);

    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }
}

/// Writes lines at or below its level to stderr.
#[derive(Debug)]
pub struct StderrLogger {
    level: Verbosity,
}

impl StderrLogger {
    pub fn new(level: Verbosity) -> Self {
        Self { level }
    }

    /// Create a logger from the `-v` flag count.
    pub fn from_count(count: u8) -> Self {
        Self::new(Verbosity::from_count(count))
    }

    pub fn level(&self) -> Verbosity {
        self.level
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            let _ = writeln!(std::io::stderr().lock(), "{}", message);
        }
    }
}

/// A captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
}

/// Captures every line in memory. Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct MockLogger {
    level: Verbosity,
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl MockLogger {
    pub fn new(level: Verbosity) -> Self {
        Self {
            level,
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn capture_all() -> Self {
        Self::new(Verbosity::Debug)
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn messages_at_level(&self, level: Verbosity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    /// Lines a [`StderrLogger`] at this mock's level would have printed.
    pub fn visible(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level <= self.level)
            .map(|e| e.message)
            .collect()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|e| e.message.contains(needle))
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Verbosity, message: &str) {
        // Captured regardless of level; `level` only matters for `visible`.
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                message: message.to_string(),
            });
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NullLogger {
    fn log(&self, _level: Verbosity, _message: &str) {}
}
