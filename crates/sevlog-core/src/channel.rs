//! Severity channels

use std::fmt;
use std::str::FromStr;

/// Local output stream a channel writes to when no system log is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => write!(f, "stdout"),
            Stream::Stderr => write!(f, "stderr"),
        }
    }
}

/// One of the eight fixed severity channels, most severe first
///
/// The ordering only drives the default stream and the syslog priority.
/// There is no level filtering: every channel is always active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl Channel {
    /// All channels in severity order
    pub const ALL: [Channel; 8] = [
        Channel::Emergency,
        Channel::Alert,
        Channel::Critical,
        Channel::Error,
        Channel::Warning,
        Channel::Notice,
        Channel::Info,
        Channel::Debug,
    ];

    /// Slot of this channel in a sink table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Syslog severity (0 = emerg .. 7 = debug)
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// Three-letter tag written in front of local-stream lines
    pub fn tag(self) -> &'static str {
        match self {
            Channel::Emergency => "EMR",
            Channel::Alert => "ALR",
            Channel::Critical => "CRT",
            Channel::Error => "ERR",
            Channel::Warning => "WRN",
            Channel::Notice => "NTC",
            Channel::Info => "INF",
            Channel::Debug => "DBG",
        }
    }

    /// Stream used by the local-stream sink of this channel
    pub fn default_stream(self) -> Stream {
        match self {
            Channel::Emergency | Channel::Critical | Channel::Error | Channel::Warning => {
                Stream::Stderr
            }
            Channel::Alert | Channel::Notice | Channel::Info | Channel::Debug => Stream::Stdout,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Emergency => "emergency",
            Channel::Alert => "alert",
            Channel::Critical => "critical",
            Channel::Error => "error",
            Channel::Warning => "warning",
            Channel::Notice => "notice",
            Channel::Info => "info",
            Channel::Debug => "debug",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a channel name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown channel: {0}")]
pub struct ParseChannelError(pub String);

impl FromStr for Channel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emergency" | "emerg" | "emr" => Ok(Channel::Emergency),
            "alert" | "alr" => Ok(Channel::Alert),
            "critical" | "crit" | "crt" => Ok(Channel::Critical),
            "error" | "err" => Ok(Channel::Error),
            "warning" | "warn" | "wrn" => Ok(Channel::Warning),
            "notice" | "ntc" => Ok(Channel::Notice),
            "info" | "inf" => Ok(Channel::Info),
            "debug" | "dbg" => Ok(Channel::Debug),
            _ => Err(ParseChannelError(s.to_string())),
        }
    }
}
