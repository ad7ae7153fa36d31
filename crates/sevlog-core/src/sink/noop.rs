//! No-op sink implementation

use super::{Sink, SinkKind};
use crate::channel::Channel;

/// A sink that does nothing
///
/// Useful for silencing a channel entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl NoOpSink {
    /// Create a new no-op sink
    pub fn new() -> Self {
        Self
    }
}

impl Sink for NoOpSink {
    fn write_line(&self, _channel: Channel, _line: &str) {}

    fn kind(&self) -> SinkKind {
        SinkKind::NoOp
    }
}
