//! `io::Write` adapter over a sink

use std::fmt;
use std::io;

use super::SharedSink;
use crate::channel::Channel;

/// Writer that forwards each completed line to a channel's sink
///
/// For components that only accept an `io::Write`. Bytes are buffered
/// until a `\n` arrives, then written as one line. No location prefix is
/// added. A trailing partial line is written on `flush` or drop.
pub struct SinkWriter {
    channel: Channel,
    sink: SharedSink,
    pending: Vec<u8>,
}

impl SinkWriter {
    pub fn new(channel: Channel, sink: SharedSink) -> Self {
        Self {
            channel,
            sink,
            pending: Vec::new(),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    fn emit(&self, bytes: &[u8]) {
        let line = String::from_utf8_lossy(bytes);
        self.sink.write_line(self.channel, &line);
    }

    fn emit_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut partial = std::mem::take(&mut self.pending);
        partial.push(b'\n');
        self.emit(&partial);
    }
}

impl io::Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit_pending();
        self.sink.flush();
        Ok(())
    }
}

impl Drop for SinkWriter {
    fn drop(&mut self) {
        self.emit_pending();
    }
}

impl fmt::Debug for SinkWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkWriter")
            .field("channel", &self.channel)
            .field("kind", &self.sink.kind())
            .field("pending", &self.pending.len())
            .finish()
    }
}
