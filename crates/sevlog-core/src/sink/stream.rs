//! Local-stream sink

use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;

use super::{Sink, SinkKind};
use crate::channel::{Channel, Stream};

enum Target {
    Stdout,
    Stderr,
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// A sink that writes tag-prefixed lines to stdout, stderr or a writer
///
/// Each line is assembled as `<TAG>: <line>` and written with one
/// `write_all` while holding the stream lock, so concurrent callers never
/// interleave within a line.
pub struct StreamSink {
    prefix: String,
    target: Target,
}

impl StreamSink {
    /// Sink on stdout with the given tag
    pub fn stdout(tag: &str) -> Self {
        Self::new(tag, Target::Stdout)
    }

    /// Sink on stderr with the given tag
    pub fn stderr(tag: &str) -> Self {
        Self::new(tag, Target::Stderr)
    }

    /// Default sink for a channel: its tag on its default stream
    pub fn for_channel(channel: Channel) -> Self {
        match channel.default_stream() {
            Stream::Stdout => Self::stdout(channel.tag()),
            Stream::Stderr => Self::stderr(channel.tag()),
        }
    }

    /// Sink on an arbitrary writer
    pub fn with_writer<W>(tag: &str, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::new(tag, Target::Writer(Mutex::new(Box::new(writer))))
    }

    fn new(tag: &str, target: Target) -> Self {
        Self {
            prefix: format!("{}: ", tag),
            target,
        }
    }

    /// Prefix written before every line, e.g. `"ERR: "`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Stream this sink writes to, `None` for injected writers
    pub fn stream(&self) -> Option<Stream> {
        match self.target {
            Target::Stdout => Some(Stream::Stdout),
            Target::Stderr => Some(Stream::Stderr),
            Target::Writer(_) => None,
        }
    }

    fn write_buf(&self, buf: &[u8]) -> io::Result<()> {
        match &self.target {
            Target::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(buf)?;
                out.flush()
            }
            Target::Stderr => {
                let mut out = io::stderr().lock();
                out.write_all(buf)?;
                out.flush()
            }
            Target::Writer(writer) => {
                let mut out = writer.lock();
                out.write_all(buf)?;
                out.flush()
            }
        }
    }
}

impl Sink for StreamSink {
    fn write_line(&self, _channel: Channel, line: &str) {
        let mut buf = String::with_capacity(self.prefix.len() + line.len());
        buf.push_str(&self.prefix);
        buf.push_str(line);
        let _ = self.write_buf(buf.as_bytes());
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Stream
    }

    fn flush(&self) {
        let _ = match &self.target {
            Target::Stdout => io::stdout().flush(),
            Target::Stderr => io::stderr().flush(),
            Target::Writer(writer) => writer.lock().flush(),
        };
    }
}

impl fmt::Debug for StreamSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink")
            .field("prefix", &self.prefix)
            .field("stream", &self.stream())
            .finish()
    }
}
