//! System-log sink

use std::fmt;

use parking_lot::Mutex;
use syslog::{Formatter3164, Logger, LoggerBackend};

use super::{Sink, SinkKind};
use crate::channel::Channel;
use crate::config::{Facility, SyslogOptions};
use crate::error::{SinkError, SinkResult};

type Connection = Logger<LoggerBackend, Formatter3164>;

/// A sink that submits lines to the local syslog daemon
///
/// Each sink owns its own connection, opened for a single channel and
/// written at that channel's priority. No tag is added: the priority
/// already carries the severity.
pub struct SyslogSink {
    channel: Channel,
    connection: Mutex<Connection>,
}

impl SyslogSink {
    /// Open a connection for `channel` over the local unix socket
    pub fn connect(channel: Channel, options: &SyslogOptions) -> SinkResult<Self> {
        let formatter = Formatter3164 {
            facility: to_syslog_facility(options.facility),
            hostname: None,
            process: options.ident.clone(),
            pid: std::process::id(),
        };

        let connection = syslog::unix(formatter)
            .map_err(|e| SinkError::syslog_unavailable(channel, e))?;

        Ok(Self {
            channel,
            connection: Mutex::new(connection),
        })
    }

    /// Channel whose priority this sink writes at
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl Sink for SyslogSink {
    fn write_line(&self, _channel: Channel, line: &str) {
        // syslog frames its own records
        let message = line.strip_suffix('\n').unwrap_or(line);
        let mut conn = self.connection.lock();
        let _ = match self.channel {
            Channel::Emergency => conn.emerg(message),
            Channel::Alert => conn.alert(message),
            Channel::Critical => conn.crit(message),
            Channel::Error => conn.err(message),
            Channel::Warning => conn.warning(message),
            Channel::Notice => conn.notice(message),
            Channel::Info => conn.info(message),
            Channel::Debug => conn.debug(message),
        };
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Syslog
    }
}

impl fmt::Debug for SyslogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyslogSink")
            .field("channel", &self.channel)
            .finish()
    }
}

fn to_syslog_facility(facility: Facility) -> syslog::Facility {
    match facility {
        Facility::User => syslog::Facility::LOG_USER,
        Facility::Daemon => syslog::Facility::LOG_DAEMON,
        Facility::Local0 => syslog::Facility::LOG_LOCAL0,
        Facility::Local1 => syslog::Facility::LOG_LOCAL1,
        Facility::Local2 => syslog::Facility::LOG_LOCAL2,
        Facility::Local3 => syslog::Facility::LOG_LOCAL3,
        Facility::Local4 => syslog::Facility::LOG_LOCAL4,
        Facility::Local5 => syslog::Facility::LOG_LOCAL5,
        Facility::Local6 => syslog::Facility::LOG_LOCAL6,
        Facility::Local7 => syslog::Facility::LOG_LOCAL7,
    }
}
