//! Logging capability handed to each stage of an invocation.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub use tracing::Level;

pub trait Logger {
    fn log(&self, level: Level, message: &str);

    /// Pushes buffered entries to their sink.
    fn flush(&self) {}

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }
}

/// Flushes the logger when dropped.
#[must_use = "the logger is flushed when the scope is dropped"]
pub struct LogScope<'a> {
    logger: &'a dyn Logger,
}

impl<'a> LogScope<'a> {
    pub fn new(logger: &'a dyn Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &'a dyn Logger {
        self.logger
    }
}

impl Drop for LogScope<'_> {
    fn drop(&mut self) {
        self.logger.flush();
    }
}

/// Forwards entries to the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::TRACE => tracing::trace!("{message}"),
            Level::DEBUG => tracing::debug!("{message}"),
            Level::INFO => tracing::info!("{message}"),
            Level::WARN => tracing::warn!("{message}"),
            _ => tracing::error!("{message}"),
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(Level, String)>>,
    flushes: AtomicUsize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(_, message)| message.contains(needle))
    }

    pub fn at_level(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_string()));
        }
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }
}
