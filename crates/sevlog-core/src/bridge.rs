//! Bridge from the `log` facade
//!
//! Lets third-party crates that log through `log::info!` and friends land
//! on the matching channel. Record file and line become the location prefix.

use log::{Level, LevelFilter, Metadata, Record};

use crate::channel::Channel;
use crate::error::{SinkError, SinkResult};
use crate::global::global;
use crate::location::Location;
use crate::logger::LevelLogger;

/// Channel a `log` level is written on
pub fn channel_for(level: Level) -> Channel {
    match level {
        Level::Error => Channel::Error,
        Level::Warn => Channel::Warning,
        Level::Info => Channel::Info,
        Level::Debug | Level::Trace => Channel::Debug,
    }
}

impl log::Log for LevelLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let file = record
            .file()
            .or_else(|| record.module_path())
            .unwrap_or(record.target());
        let location = Location::new(file, record.line().unwrap_or(0));
        self.emit(channel_for(record.level()), location, *record.args());
    }

    fn flush(&self) {
        LevelLogger::flush(self);
    }
}

/// Route the `log` facade into the global logger
pub fn install_log_bridge() -> SinkResult<()> {
    log::set_logger(global()).map_err(|e| SinkError::Bridge(e.to_string()))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
