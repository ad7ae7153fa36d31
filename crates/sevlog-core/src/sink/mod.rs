//! Output sinks bound to severity channels
//!
//! Implementations:
//! - `StreamSink`: stdout/stderr (or an injected writer), tag-prefixed
//! - `SyslogSink`: local syslog daemon at the channel's priority
//! - `MemorySink`: captures lines, for tests and embedding
//! - `NoOpSink`: discards everything

mod memory;
mod noop;
mod stream;
mod syslog;
mod writer;

use std::sync::Arc;

use crate::channel::Channel;

pub use memory::MemorySink;
pub use noop::NoOpSink;
pub use stream::StreamSink;
pub use self::syslog::SyslogSink;
pub use writer::SinkWriter;

#[cfg(test)]
pub(crate) use stream::tests::SharedBuffer;

/// Kind of destination a sink writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Stream,
    Syslog,
    Memory,
    NoOp,
}

/// Write-only destination for formatted log lines
///
/// `line` already carries the location prefix and ends with `\n`. A sink
/// hands it to its destination in a single write. Failures are swallowed:
/// logging never fails the caller.
pub trait Sink: Send + Sync {
    /// Write one complete line for `channel`
    fn write_line(&self, channel: Channel, line: &str);

    /// Kind of destination behind this sink
    fn kind(&self) -> SinkKind;

    /// Best-effort flush of buffered output
    fn flush(&self) {}
}

/// Type alias for an Arc-wrapped sink
pub type SharedSink = Arc<dyn Sink>;
