//! In-memory sink

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Sink, SinkKind};
use crate::channel::Channel;

/// A sink that keeps every line in memory
///
/// Clones share the same storage, so a test can hand one clone to a
/// `LevelLogger` and inspect the other.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sevlog_core::{Channel, LevelLogger, MemorySink};
///
/// let sink = MemorySink::new();
/// let logger = LevelLogger::builder()
///     .sink(Channel::Info, Arc::new(sink.clone()))
///     .build();
///
/// logger.info(&[&"ready"]);
/// assert!(sink.lines()[0].ends_with("ready\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<(Channel, String)>>>,
}

impl MemorySink {
    /// Create a new empty memory sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    /// All captured lines with the channel they were written for
    pub fn entries(&self) -> Vec<(Channel, String)> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all captured lines
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&self, channel: Channel, line: &str) {
        self.entries.lock().push((channel, line.to_string()));
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Memory
    }
}
