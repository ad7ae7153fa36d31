//! sevlog Core
//!
//! Leveled logging over eight severity channels, emergency through debug.
//! Each channel is bound once to a sink: stdout/stderr with a short tag, or
//! the local syslog daemon at the matching priority when `SEVLOG_SYSLOG` is
//! set at start-up. Every line carries the caller's location:
//!
//! ```text
//! ERR: src:server.rs:88: upstream refused connection
//! ```
//!
//! ## Explicit logger
//!
//! ```rust
//! use sevlog_core::{LevelLogger, LoggerConfig};
//!
//! let logger = LevelLogger::new(&LoggerConfig::new());
//! logger.info(&[&"listening on", &8080]);
//! logger.warning_fmt(format_args!("{} retries left", 2));
//!
//! // A panic inside the closure is logged on the critical channel
//! let value = logger.guard(|| 21 * 2);
//! assert_eq!(value, Some(42));
//! ```
//!
//! ## Global logger
//!
//! ```rust,ignore
//! sevlog_core::notice!("cache warmed in {}ms", elapsed);
//! sevlog_core::guard(|| worker.run());
//! sevlog_core::fatal!("config missing: {}", path.display());
//! ```

pub mod bridge;
pub mod channel;
pub mod config;
pub mod error;
pub mod global;
pub mod guard;
pub mod location;
pub mod logger;
pub mod sink;

// Re-export commonly used types
pub use channel::{Channel, ParseChannelError, Stream};
pub use config::{Facility, LoggerConfig, ParseFacilityError, SyslogOptions};
pub use error::{SinkError, SinkResult};
pub use guard::{catch, Fault};
pub use location::Location;
pub use logger::{LevelLogger, LevelLoggerBuilder, LocalSinkFactory, SyslogConnector};
pub use sink::{
    MemorySink, NoOpSink, SharedSink, Sink, SinkKind, SinkWriter, StreamSink, SyslogSink,
};

pub use bridge::install_log_bridge;
pub use global::{global, guard, init, is_initialized};
