//! The level logger: eight channels, one sink each

use std::fmt::{self, Display, Write as _};
use std::sync::Arc;

use crate::channel::Channel;
use crate::config::LoggerConfig;
use crate::error::{SinkError, SinkResult};
use crate::guard::{self, Fault};
use crate::location::Location;
use crate::sink::{SharedSink, SinkKind, SinkWriter, StreamSink, SyslogSink};

/// Factory for system-log sinks, one call per channel
pub type SyslogConnector = Box<dyn Fn(Channel) -> SinkResult<SharedSink> + Send + Sync>;

/// Factory for local fallback sinks, one call per channel
pub type LocalSinkFactory = Box<dyn Fn(Channel) -> SharedSink + Send + Sync>;

/// A table of eight sinks, one per severity channel
///
/// The table is fixed at construction. Every write resolves its caller's
/// location through `#[track_caller]`, renders the message and hands a
/// single buffer to the channel's sink.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sevlog_core::{Channel, LevelLogger, MemorySink};
///
/// let sink = MemorySink::new();
/// let logger = LevelLogger::builder()
///     .sink(Channel::Warning, Arc::new(sink.clone()))
///     .build();
///
/// logger.warning(&[&"disk", &91, &"%"]);
/// logger.warning_fmt(format_args!("disk at {}%", 91));
///
/// let lines = sink.lines();
/// assert!(lines[0].ends_with(": disk 91 %\n"));
/// assert!(lines[1].ends_with(": disk at 91%\n"));
/// ```
pub struct LevelLogger {
    sinks: [SharedSink; 8],
    fallbacks: Vec<SinkError>,
}

impl LevelLogger {
    /// Build from the process environment (see [`LoggerConfig::from_env`])
    pub fn from_env() -> Self {
        Self::new(&LoggerConfig::from_env())
    }

    /// Build from an explicit configuration
    pub fn new(config: &LoggerConfig) -> Self {
        Self::builder().config(config.clone()).build()
    }

    pub fn builder() -> LevelLoggerBuilder {
        LevelLoggerBuilder::new()
    }

    /// Write `args` on `channel`, prefixed with `location`
    ///
    /// The rendered line always ends with exactly one `\n`.
    pub fn emit(&self, channel: Channel, location: Location<'_>, args: fmt::Arguments<'_>) {
        let mut line = location.to_string();
        let _ = line.write_fmt(args);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        self.sinks[channel.index()].write_line(channel, &line);
    }

    /// Write space-separated values on `channel`
    #[track_caller]
    pub fn log(&self, channel: Channel, values: &[&dyn Display]) {
        self.emit(channel, Location::caller(), format_args!("{}", Joined(values)));
    }

    /// Write a formatted message on `channel`
    #[track_caller]
    pub fn log_fmt(&self, channel: Channel, args: fmt::Arguments<'_>) {
        self.emit(channel, Location::caller(), args);
    }

    #[track_caller]
    pub fn emerg(&self, values: &[&dyn Display]) {
        self.log(Channel::Emergency, values);
    }

    #[track_caller]
    pub fn emerg_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Channel::Emergency, args);
    }

    #[track_caller]
    pub fn alert(&self, values: &[&dyn Display]) {
        self.log(Channel::Alert, values);
    }

    #[track_caller]
    pub fn alert_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Channel::Alert, args);
    }

    #[track_caller]
    pub fn crit(&self, values: &[&dyn Display]) {
        self.log(Channel::Critical, values);
    }

    #[track_caller]
    pub fn crit_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Channel::Critical, args);
    }

    #[track_caller]
    pub fn error(&self, values: &[&dyn Display]) {
        self.log(Channel::Error, values);
    }

    #[track_caller]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Channel::Error, args);
    }

    #[track_caller]
    pub fn warning(&self, values: &[&dyn Display]) {
        self.log(Channel::Warning, values);
    }

    #[track_caller]
    pub fn warning_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Channel::Warning, args);
    }

    #[track_caller]
    pub fn notice(&self, values: &[&dyn Display]) {
        self.log(Channel::Notice, values);
    }

    #[track_caller]
    pub fn notice_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Channel::Notice, args);
    }

    #[track_caller]
    pub fn info(&self, values: &[&dyn Display]) {
        self.log(Channel::Info, values);
    }

    #[track_caller]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Channel::Info, args);
    }

    #[track_caller]
    pub fn debug(&self, values: &[&dyn Display]) {
        self.log(Channel::Debug, values);
    }

    #[track_caller]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Channel::Debug, args);
    }

    /// Write on the emergency channel, then exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, values: &[&dyn Display]) -> ! {
        self.log(Channel::Emergency, values);
        self.exit()
    }

    /// Formatted form of [`LevelLogger::fatal`]
    #[track_caller]
    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) -> ! {
        self.log_fmt(Channel::Emergency, args);
        self.exit()
    }

    fn exit(&self) -> ! {
        self.flush();
        std::process::exit(1)
    }

    /// Run `f`, logging a panic on the critical channel instead of unwinding
    ///
    /// Returns `None` when `f` panicked. The critical line carries the panic
    /// value and the stack trace taken at the panic site, and is attributed
    /// to the call site of `guard`.
    #[track_caller]
    pub fn guard<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce() -> R,
    {
        let location = Location::caller();
        match guard::catch(f) {
            Ok(value) => Some(value),
            Err(fault) => {
                self.report(location, &fault);
                None
            }
        }
    }

    /// Log a captured fault on the critical channel
    pub fn report(&self, location: Location<'_>, fault: &Fault) {
        self.emit(Channel::Critical, location, format_args!("{}", fault));
    }

    /// Sink bound to `channel`
    pub fn sink(&self, channel: Channel) -> &SharedSink {
        &self.sinks[channel.index()]
    }

    pub fn emerg_sink(&self) -> &SharedSink {
        self.sink(Channel::Emergency)
    }

    pub fn alert_sink(&self) -> &SharedSink {
        self.sink(Channel::Alert)
    }

    pub fn crit_sink(&self) -> &SharedSink {
        self.sink(Channel::Critical)
    }

    pub fn error_sink(&self) -> &SharedSink {
        self.sink(Channel::Error)
    }

    pub fn warning_sink(&self) -> &SharedSink {
        self.sink(Channel::Warning)
    }

    pub fn notice_sink(&self) -> &SharedSink {
        self.sink(Channel::Notice)
    }

    pub fn info_sink(&self) -> &SharedSink {
        self.sink(Channel::Info)
    }

    pub fn debug_sink(&self) -> &SharedSink {
        self.sink(Channel::Debug)
    }

    /// `io::Write` handle onto a channel's sink, for third-party components
    pub fn writer(&self, channel: Channel) -> SinkWriter {
        SinkWriter::new(channel, Arc::clone(self.sink(channel)))
    }

    /// Kind of sink bound to each channel, in channel order
    pub fn kinds(&self) -> [SinkKind; 8] {
        Channel::ALL.map(|channel| self.sink(channel).kind())
    }

    /// System-log connections that failed and fell back to a local stream
    pub fn fallbacks(&self) -> &[SinkError] {
        &self.fallbacks
    }

    /// Flush every sink
    pub fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }
}

impl fmt::Debug for LevelLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLogger")
            .field("kinds", &self.kinds())
            .field("fallbacks", &self.fallbacks)
            .finish()
    }
}

/// Values rendered space-separated
struct Joined<'a>(&'a [&'a dyn Display]);

impl Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Builder for a [`LevelLogger`] with injectable sink factories
///
/// Construction tries the system log for every channel when enabled, and
/// binds a local sink to every channel it did not get. Channels pinned with
/// [`LevelLoggerBuilder::sink`] skip both steps.
pub struct LevelLoggerBuilder {
    config: LoggerConfig,
    connector: Option<SyslogConnector>,
    local: Option<LocalSinkFactory>,
    pinned: [Option<SharedSink>; 8],
}

impl Default for LevelLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelLoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            connector: None,
            local: None,
            pinned: Default::default(),
        }
    }

    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace how system-log sinks are opened
    pub fn system_log_connector<F>(mut self, connector: F) -> Self
    where
        F: Fn(Channel) -> SinkResult<SharedSink> + Send + Sync + 'static,
    {
        self.connector = Some(Box::new(connector));
        self
    }

    /// Replace how local-stream sinks are created
    pub fn local_sink_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(Channel) -> SharedSink + Send + Sync + 'static,
    {
        self.local = Some(Box::new(factory));
        self
    }

    /// Bind `sink` to `channel` unconditionally
    pub fn sink(mut self, channel: Channel, sink: SharedSink) -> Self {
        self.pinned[channel.index()] = Some(sink);
        self
    }

    pub fn build(self) -> LevelLogger {
        let LevelLoggerBuilder {
            config,
            connector,
            local,
            mut pinned,
        } = self;

        let mut fallbacks = Vec::new();
        let sinks = Channel::ALL.map(|channel| {
            if let Some(sink) = pinned[channel.index()].take() {
                return sink;
            }

            if config.system_log {
                let attempt = match &connector {
                    Some(connect) => connect(channel),
                    None => SyslogSink::connect(channel, &config.syslog)
                        .map(|sink| Arc::new(sink) as SharedSink),
                };
                match attempt {
                    Ok(sink) => return sink,
                    Err(err) => {
                        if config.report_fallbacks {
                            eprintln!(
                                "sevlog: {}; falling back to {}",
                                err,
                                channel.default_stream()
                            );
                        }
                        fallbacks.push(err);
                    }
                }
            }

            match &local {
                Some(factory) => factory(channel),
                None => Arc::new(StreamSink::for_channel(channel)) as SharedSink,
            }
        });

        LevelLogger { sinks, fallbacks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Stream;
    use crate::sink::{MemorySink, NoOpSink, SharedBuffer};
    use std::thread;

    /// Logger whose channels write tag-prefixed lines into two buffers
    /// standing in for stdout and stderr
    fn captured() -> (LevelLogger, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let (o, e) = (out.clone(), err.clone());
        let logger = LevelLogger::builder()
            .local_sink_factory(move |channel| {
                let target = match channel.default_stream() {
                    Stream::Stdout => o.clone(),
                    Stream::Stderr => e.clone(),
                };
                Arc::new(StreamSink::with_writer(channel.tag(), target))
            })
            .build();
        (logger, out, err)
    }

    fn failing_connector(channel: Channel) -> SinkResult<SharedSink> {
        Err(SinkError::syslog_unavailable(channel, "connection refused"))
    }

    #[test]
    fn test_every_channel_routes_to_its_stream() {
        let (logger, out, err) = captured();

        for channel in Channel::ALL {
            let line = line!() + 1;
            logger.log(channel, &[&"hello", &channel]);

            let expected = format!("{}: src:logger.rs:{}: hello {}\n", channel.tag(), line, channel);
            let (hit, miss) = match channel.default_stream() {
                Stream::Stdout => (&out, &err),
                Stream::Stderr => (&err, &out),
            };
            assert!(hit.contents().ends_with(&expected), "{}", hit.contents());
            assert!(!miss.contents().contains(&expected));
        }

        assert_eq!(out.contents().lines().count(), 4);
        assert_eq!(err.contents().lines().count(), 4);
    }

    #[test]
    fn test_named_methods_pick_their_channel() {
        let sink = MemorySink::new();
        let shared: SharedSink = Arc::new(sink.clone());
        let mut builder = LevelLogger::builder();
        for channel in Channel::ALL {
            builder = builder.sink(channel, Arc::clone(&shared));
        }
        let logger = builder.build();

        logger.emerg(&[&1]);
        logger.alert(&[&2]);
        logger.crit(&[&3]);
        logger.error(&[&4]);
        logger.warning(&[&5]);
        logger.notice(&[&6]);
        logger.info(&[&7]);
        logger.debug(&[&8]);
        logger.emerg_fmt(format_args!("{}", 1));
        logger.alert_fmt(format_args!("{}", 2));
        logger.crit_fmt(format_args!("{}", 3));
        logger.error_fmt(format_args!("{}", 4));
        logger.warning_fmt(format_args!("{}", 5));
        logger.notice_fmt(format_args!("{}", 6));
        logger.info_fmt(format_args!("{}", 7));
        logger.debug_fmt(format_args!("{}", 8));

        let channels: Vec<Channel> = sink.entries().into_iter().map(|(c, _)| c).collect();
        let mut expected = Channel::ALL.to_vec();
        expected.extend(Channel::ALL);
        assert_eq!(channels, expected);
    }

    #[test]
    fn test_formatted_and_plain_share_prefix() {
        let sink = MemorySink::new();
        let logger = LevelLogger::builder()
            .sink(Channel::Notice, Arc::new(sink.clone()))
            .build();

        let line = line!() + 1;
        logger.notice(&[&"user", &"bob", &"logged in"]);
        logger.notice_fmt(format_args!("user {} logged in", "bob"));

        let lines = sink.lines();
        assert_eq!(lines[0], format!("src:logger.rs:{}: user bob logged in\n", line));
        assert_eq!(lines[1], format!("src:logger.rs:{}: user bob logged in\n", line + 1));
    }

    #[test]
    fn test_single_trailing_newline() {
        let sink = MemorySink::new();
        let logger = LevelLogger::builder()
            .sink(Channel::Info, Arc::new(sink.clone()))
            .build();

        logger.info_fmt(format_args!("already terminated\n"));
        logger.info(&[]);

        let lines = sink.lines();
        assert!(lines[0].ends_with(": already terminated\n"));
        assert!(!lines[0].ends_with("\n\n"));
        assert!(lines[1].ends_with(": \n"));
    }

    #[test]
    fn test_guard_logs_panic_and_continues() {
        let (logger, out, err) = captured();

        let line = line!() + 1;
        let result = logger.guard(|| -> u32 { panic!("worker exploded") });
        let after = "still running";

        assert_eq!(result, None);
        assert_eq!(after, "still running");
        let logged = err.contents();
        assert!(
            logged.starts_with(&format!("CRT: src:logger.rs:{}: worker exploded", line)),
            "{}",
            logged
        );
        assert!(out.contents().is_empty());
    }

    #[test]
    fn test_guard_without_panic_is_silent() {
        let (logger, out, err) = captured();

        assert_eq!(logger.guard(|| 5 * 5), Some(25));
        assert!(out.contents().is_empty());
        assert!(err.contents().is_empty());
    }

    #[test]
    fn test_system_log_binds_all_channels() {
        let logger = LevelLogger::builder()
            .config(LoggerConfig::new().with_system_log(true))
            .system_log_connector(|_| Ok(Arc::new(MemorySink::new()) as SharedSink))
            .build();

        assert_eq!(logger.kinds(), [SinkKind::Memory; 8]);
        assert!(logger.fallbacks().is_empty());
    }

    #[test]
    fn test_system_log_failure_falls_back() {
        let logger = LevelLogger::builder()
            .config(
                LoggerConfig::new()
                    .with_system_log(true)
                    .with_report_fallbacks(false),
            )
            .system_log_connector(failing_connector)
            .build();

        assert_eq!(logger.kinds(), [SinkKind::Stream; 8]);
        let failed: Vec<_> = logger.fallbacks().iter().filter_map(|e| e.channel()).collect();
        assert_eq!(failed, Channel::ALL.to_vec());
    }

    #[test]
    fn test_partial_fallback_keeps_default_tags() {
        let (out, err) = (SharedBuffer::default(), SharedBuffer::default());
        let (o, e) = (out.clone(), err.clone());
        let logger = LevelLogger::builder()
            .config(
                LoggerConfig::new()
                    .with_system_log(true)
                    .with_report_fallbacks(false),
            )
            .system_log_connector(|channel| match channel {
                Channel::Error | Channel::Info => failing_connector(channel),
                _ => Ok(Arc::new(NoOpSink::new()) as SharedSink),
            })
            .local_sink_factory(move |channel| {
                let target = match channel.default_stream() {
                    Stream::Stdout => o.clone(),
                    Stream::Stderr => e.clone(),
                };
                Arc::new(StreamSink::with_writer(channel.tag(), target))
            })
            .build();

        assert_eq!(logger.fallbacks().len(), 2);
        assert_eq!(logger.sink(Channel::Error).kind(), SinkKind::Stream);
        assert_eq!(logger.sink(Channel::Alert).kind(), SinkKind::NoOp);

        logger.error(&[&"e"]);
        logger.info(&[&"i"]);
        logger.alert(&[&"dropped"]);
        assert!(err.contents().starts_with("ERR: "));
        assert!(out.contents().starts_with("INF: "));
        assert_eq!(out.contents().lines().count(), 1);
    }

    #[test]
    fn test_local_streams_without_toggle() {
        let logger = LevelLogger::builder()
            .system_log_connector(|_| panic!("must not connect"))
            .build();
        assert_eq!(logger.kinds(), [SinkKind::Stream; 8]);
        assert!(logger.fallbacks().is_empty());
    }

    #[test]
    fn test_pinned_sink_wins() {
        let logger = LevelLogger::builder()
            .config(LoggerConfig::new().with_system_log(true))
            .system_log_connector(|_| Ok(Arc::new(MemorySink::new()) as SharedSink))
            .sink(Channel::Debug, Arc::new(NoOpSink::new()))
            .build();
        assert_eq!(logger.debug_sink().kind(), SinkKind::NoOp);
        assert_eq!(logger.info_sink().kind(), SinkKind::Memory);
    }

    #[test]
    fn test_accessors_and_writer() {
        let sink = MemorySink::new();
        let logger = LevelLogger::builder()
            .sink(Channel::Alert, Arc::new(sink.clone()))
            .build();

        assert_eq!(logger.alert_sink().kind(), SinkKind::Memory);
        for (channel, accessor) in [
            (Channel::Emergency, logger.emerg_sink()),
            (Channel::Critical, logger.crit_sink()),
            (Channel::Error, logger.error_sink()),
            (Channel::Warning, logger.warning_sink()),
            (Channel::Notice, logger.notice_sink()),
            (Channel::Info, logger.info_sink()),
            (Channel::Debug, logger.debug_sink()),
        ] {
            assert!(Arc::ptr_eq(accessor, logger.sink(channel)));
        }

        use std::io::Write;
        let mut writer = logger.writer(Channel::Alert);
        writeln!(writer, "from a library").unwrap();
        assert_eq!(sink.lines(), vec!["from a library\n"]);
    }

    #[test]
    fn test_concurrent_lines_stay_whole() {
        let buffer = SharedBuffer::default();
        let logger = Arc::new(
            LevelLogger::builder()
                .sink(
                    Channel::Info,
                    Arc::new(StreamSink::with_writer("INF", buffer.clone())),
                )
                .build(),
        );

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..200 {
                        logger.info_fmt(format_args!("thread-{} message-{} end", t, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = buffer.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 8 * 200);
        for line in lines {
            assert!(line.starts_with("INF: src:logger.rs:"), "{}", line);
            assert!(line.ends_with(" end"), "{}", line);
            assert_eq!(line.matches("INF: ").count(), 1, "{}", line);
        }
    }

    #[test]
    fn test_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LevelLogger>();
    }
}
