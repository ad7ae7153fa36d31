//! Process-wide logger and logging macros
//!
//! The global logger is set once, either explicitly with [`init`] or on
//! first use from the environment. It is never replaced.

use once_cell::sync::OnceCell;

use crate::error::{SinkError, SinkResult};
use crate::logger::LevelLogger;

static GLOBAL: OnceCell<LevelLogger> = OnceCell::new();

/// Install `logger` as the process-wide logger
///
/// Fails with [`SinkError::AlreadyInitialized`] once a logger is in place,
/// including one created implicitly by [`global`].
pub fn init(logger: LevelLogger) -> SinkResult<()> {
    GLOBAL
        .set(logger)
        .map_err(|_| SinkError::AlreadyInitialized)
}

/// The process-wide logger, built from the environment on first use
pub fn global() -> &'static LevelLogger {
    GLOBAL.get_or_init(LevelLogger::from_env)
}

pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

/// [`LevelLogger::guard`] on the global logger
#[track_caller]
pub fn guard<F, R>(f: F) -> Option<R>
where
    F: FnOnce() -> R,
{
    global().guard(f)
}

/// Log on the emergency channel
///
/// Writes to the global logger, or to an explicit one with
/// `emerg!(logger: &my_logger, ...)`.
#[macro_export]
macro_rules! emerg {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.emerg_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().emerg_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! alert {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.alert_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().alert_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! crit {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.crit_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().crit_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.error_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().error_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warning {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.warning_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().warning_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! notice {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.notice_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().notice_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.info_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().info_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.debug_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().debug_fmt(::std::format_args!($($arg)+))
    };
}

/// Log on the emergency channel, then exit the process with status 1
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.fatal_fmt(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().fatal_fmt(::std::format_args!($($arg)+))
    };
}
