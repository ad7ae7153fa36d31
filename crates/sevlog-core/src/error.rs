//! Sink error types

use thiserror::Error;

use crate::channel::Channel;

/// Errors raised while setting up sinks or the global logger
///
/// Logging calls themselves never return errors; these only surface from
/// construction and installation paths.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The system log could not be reached for a channel
    #[error("system log unavailable for {channel}: {reason}")]
    SyslogUnavailable { channel: Channel, reason: String },

    /// The process-wide logger was already set
    #[error("Global logger already initialized")]
    AlreadyInitialized,

    /// The `log` facade refused the bridge
    #[error("log bridge error: {0}")]
    Bridge(String),
}

impl SinkError {
    /// Create a syslog unavailable error
    pub fn syslog_unavailable(channel: Channel, reason: impl ToString) -> Self {
        Self::SyslogUnavailable {
            channel,
            reason: reason.to_string(),
        }
    }

    /// Channel this error concerns, if any
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::SyslogUnavailable { channel, .. } => Some(*channel),
            _ => None,
        }
    }
}

pub type SinkResult<T> = Result<T, SinkError>;
