//! Start-up configuration read from the environment
//!
//! Recognized variables:
//! - `SEVLOG_SYSLOG`: bind all channels to the system log
//! - `SEVLOG_SYSLOG_IDENT`: process name reported to syslog
//! - `SEVLOG_SYSLOG_FACILITY`: `user`, `daemon`, `local0` .. `local7`
//! - `SEVLOG_QUIET`: do not report syslog fallbacks on stderr

use std::fmt;
use std::str::FromStr;

pub const ENV_SYSLOG: &str = "SEVLOG_SYSLOG";
pub const ENV_SYSLOG_IDENT: &str = "SEVLOG_SYSLOG_IDENT";
pub const ENV_SYSLOG_FACILITY: &str = "SEVLOG_SYSLOG_FACILITY";
pub const ENV_QUIET: &str = "SEVLOG_QUIET";

const DEFAULT_IDENT: &str = "sevlog";

/// Syslog facility the system-log sinks submit under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facility {
    #[default]
    User,
    Daemon,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facility::User => "user",
            Facility::Daemon => "daemon",
            Facility::Local0 => "local0",
            Facility::Local1 => "local1",
            Facility::Local2 => "local2",
            Facility::Local3 => "local3",
            Facility::Local4 => "local4",
            Facility::Local5 => "local5",
            Facility::Local6 => "local6",
            Facility::Local7 => "local7",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a syslog facility name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown syslog facility: {0}")]
pub struct ParseFacilityError(pub String);

impl FromStr for Facility {
    type Err = ParseFacilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let name = name.strip_prefix("log_").unwrap_or(name.as_str());
        match name {
            "user" => Ok(Facility::User),
            "daemon" => Ok(Facility::Daemon),
            "local0" => Ok(Facility::Local0),
            "local1" => Ok(Facility::Local1),
            "local2" => Ok(Facility::Local2),
            "local3" => Ok(Facility::Local3),
            "local4" => Ok(Facility::Local4),
            "local5" => Ok(Facility::Local5),
            "local6" => Ok(Facility::Local6),
            "local7" => Ok(Facility::Local7),
            _ => Err(ParseFacilityError(s.to_string())),
        }
    }
}

/// Connection settings for system-log sinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyslogOptions {
    /// Process name shown in syslog entries
    pub ident: String,
    pub facility: Facility,
}

impl Default for SyslogOptions {
    fn default() -> Self {
        Self {
            ident: default_ident(),
            facility: Facility::User,
        }
    }
}

/// Logger configuration, fixed for the lifetime of a `LevelLogger`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Bind channels to the system log instead of stdout/stderr
    pub system_log: bool,
    pub syslog: SyslogOptions,
    /// Print a line on stderr for every channel that fell back to a stream
    pub report_fallbacks: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            system_log: false,
            syslog: SyslogOptions::default(),
            report_fallbacks: true,
        }
    }
}

impl LoggerConfig {
    /// Local streams only, with default tags
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ident = lookup(ENV_SYSLOG_IDENT)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_ident);

        // Unknown facility names fall back to `user`
        let facility: Facility = lookup(ENV_SYSLOG_FACILITY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            system_log: lookup(ENV_SYSLOG).map(|v| parse_flag(&v)).unwrap_or(false),
            syslog: SyslogOptions { ident, facility },
            report_fallbacks: !lookup(ENV_QUIET).map(|v| parse_flag(&v)).unwrap_or(false),
        }
    }

    /// Enable or disable system-log sinks
    pub fn with_system_log(mut self, enabled: bool) -> Self {
        self.system_log = enabled;
        self
    }

    pub fn with_syslog_options(mut self, options: SyslogOptions) -> Self {
        self.syslog = options;
        self
    }

    pub fn with_report_fallbacks(mut self, report: bool) -> Self {
        self.report_fallbacks = report;
        self
    }
}

/// Interpret an environment flag: empty and explicit negatives are false
pub fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

fn default_ident() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_IDENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_flag() {
        for on in ["1", "true", "TRUE", "yes", "on", "anything"] {
            assert!(parse_flag(on), "{on} should be true");
        }
        for off in ["", "  ", "0", "false", "False", "no", "OFF"] {
            assert!(!parse_flag(off), "{off:?} should be false");
        }
    }

    #[test]
    fn test_defaults_without_env() {
        let config = LoggerConfig::from_lookup(|_| None);
        assert!(!config.system_log);
        assert!(config.report_fallbacks);
        assert_eq!(config.syslog.facility, Facility::User);
        assert!(!config.syslog.ident.is_empty());
    }

    #[test]
    fn test_syslog_toggle() {
        let config = LoggerConfig::from_lookup(lookup_from(&[(ENV_SYSLOG, "1")]));
        assert!(config.system_log);

        let config = LoggerConfig::from_lookup(lookup_from(&[(ENV_SYSLOG, "")]));
        assert!(!config.system_log);
    }

    #[test]
    fn test_syslog_options_from_env() {
        let config = LoggerConfig::from_lookup(lookup_from(&[
            (ENV_SYSLOG, "yes"),
            (ENV_SYSLOG_IDENT, " billing "),
            (ENV_SYSLOG_FACILITY, "LOCAL3"),
            (ENV_QUIET, "1"),
        ]));
        assert_eq!(config.syslog.ident, "billing");
        assert_eq!(config.syslog.facility, Facility::Local3);
        assert!(!config.report_fallbacks);
    }

    #[test]
    fn test_facility_parse() {
        assert_eq!("daemon".parse::<Facility>().unwrap(), Facility::Daemon);
        assert_eq!("LOG_LOCAL7".parse::<Facility>().unwrap(), Facility::Local7);
        let err = "kern".parse::<Facility>().unwrap_err();
        assert_eq!(err, ParseFacilityError("kern".to_string()));
        assert_eq!(err.to_string(), "Unknown syslog facility: kern");

        let config = LoggerConfig::from_lookup(lookup_from(&[(ENV_SYSLOG_FACILITY, "bogus")]));
        assert_eq!(config.syslog.facility, Facility::User);
    }

    #[test]
    fn test_builder_methods() {
        let config = LoggerConfig::new()
            .with_system_log(true)
            .with_report_fallbacks(false);
        assert!(config.system_log);
        assert!(!config.report_fallbacks);
    }
}
