//! Main logger implementation

use super::{
    encoder::Style,
    encoder_config::{CallerFormat, EncoderConfig, LevelFormat},
    error::Result,
    fields::Fields,
    log_config::LogConfig,
    log_entry::{Caller, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::Sink,
    tee::{Core, Tee},
    timestamp::TimestampFormat,
};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

/// A logger handle over a tee of cores
///
/// The live tee is swapped atomically by [`Logger::rebuild`]; concurrent log
/// calls see either the old or the new set of cores, never a partial one.
pub struct Logger {
    tee: RwLock<Arc<Tee>>,
    /// Cores accumulated by `add_core`, applied on the next `rebuild`
    cores: Mutex<Vec<Arc<Core>>>,
    caller: bool,
    name: Option<String>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Console logger on stdout at `Debug`, without caller annotation
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    fn from_cores(cores: Vec<Arc<Core>>, caller: bool, name: Option<String>) -> Self {
        Self::with_tee(Tee::new(cores.clone()), cores, caller, name)
    }

    fn with_tee(tee: Tee, cores: Vec<Arc<Core>>, caller: bool, name: Option<String>) -> Self {
        Self {
            tee: RwLock::new(Arc::new(tee)),
            cores: Mutex::new(cores),
            caller,
            name,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Append a core; it receives entries after the next [`rebuild`](Self::rebuild)
    pub fn add_core(&self, core: Core) {
        self.cores.lock().push(Arc::new(core));
    }

    /// Sync the live tee and replace it with one built from the current cores
    pub fn rebuild(&self) {
        let cores = self.cores.lock();

        let previous = Arc::clone(&*self.tee.read());
        if let Err(e) = previous.sync() {
            self.metrics.record_sync_failure();
            eprintln!("[LOGGER ERROR] Failed to sync before rebuild: {}", e);
        }

        *self.tee.write() = Arc::new(Tee::new(cores.clone()));
    }

    /// Add a core and rebuild in one step
    pub fn attach(&self, core: Core) {
        self.add_core(core);
        self.rebuild();
    }

    /// Number of accumulated cores, including ones not yet rebuilt in
    pub fn cores_len(&self) -> usize {
        self.cores.lock().len()
    }

    /// Number of cores currently receiving entries
    pub fn active_cores_len(&self) -> usize {
        self.tee.read().len()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn caller_enabled(&self) -> bool {
        self.caller
    }

    /// A logger sharing this logger's cores whose entries carry `name`
    ///
    /// Nested names are joined with a dot. The child writes to the cores that
    /// are live now; cores still waiting for a rebuild join the child on its
    /// own next [`rebuild`](Self::rebuild).
    pub fn named(&self, name: impl AsRef<str>) -> Logger {
        let name = match &self.name {
            Some(parent) => format!("{}.{}", parent, name.as_ref()),
            None => name.as_ref().to_string(),
        };
        let live = Tee::new(self.tee.read().cores().to_vec());
        Logger::with_tee(live, self.cores.lock().clone(), self.caller, Some(name))
    }

    /// True if any live core accepts `level`
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.tee.read().enabled(level)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Flush every live core
    pub fn sync(&self) -> Result<()> {
        let tee = Arc::clone(&*self.tee.read());
        tee.sync().inspect_err(|_| {
            self.metrics.record_sync_failure();
        })
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &dyn fmt::Display,
        fields: Fields,
        location: &Location<'_>,
    ) {
        let tee = Arc::clone(&*self.tee.read());
        if !tee.enabled(level) {
            return;
        }

        let mut entry = LogEntry::new(level, message.to_string()).with_fields(fields);
        if self.caller {
            entry = entry.with_caller(Caller::from_location(location));
        }
        if let Some(ref name) = self.name {
            entry = entry.with_name(name.clone());
        }

        tee.write(&entry, &self.metrics);
    }

    fn terminate(&self, level: LogLevel, message: String) -> ! {
        if let Err(e) = self.sync() {
            eprintln!("[LOGGER ERROR] Failed to sync before {}: {}", level, e);
        }
        match level {
            LogLevel::Fatal => std::process::exit(1),
            _ => panic!("{}", message),
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        self.log_with(level, message, Fields::new());
    }

    /// Log with keyed fields
    #[track_caller]
    pub fn log_with(&self, level: LogLevel, message: impl fmt::Display, fields: Fields) {
        let location = Location::caller();
        match level {
            LogLevel::Panic | LogLevel::Fatal => {
                let message = message.to_string();
                self.emit(level, &message, fields, location);
                self.terminate(level, message)
            }
            _ => self.emit(level, &message, fields, location),
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    /// Log at `Panic`, sync, then panic with the message
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        self.log(LogLevel::Panic, message);
        unreachable!("panic level always unwinds")
    }

    /// Log at `Fatal`, sync, then exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.log(LogLevel::Fatal, message);
        unreachable!("fatal level always exits")
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.panic(args)
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(args)
    }

    #[track_caller]
    pub fn debugw(&self, message: impl fmt::Display, fields: Fields) {
        self.log_with(LogLevel::Debug, message, fields);
    }

    #[track_caller]
    pub fn infow(&self, message: impl fmt::Display, fields: Fields) {
        self.log_with(LogLevel::Info, message, fields);
    }

    #[track_caller]
    pub fn warnw(&self, message: impl fmt::Display, fields: Fields) {
        self.log_with(LogLevel::Warn, message, fields);
    }

    #[track_caller]
    pub fn errorw(&self, message: impl fmt::Display, fields: Fields) {
        self.log_with(LogLevel::Error, message, fields);
    }

    #[track_caller]
    pub fn panicw(&self, message: impl fmt::Display, fields: Fields) -> ! {
        self.log_with(LogLevel::Panic, message, fields);
        unreachable!("panic level always unwinds")
    }

    #[track_caller]
    pub fn fatalw(&self, message: impl fmt::Display, fields: Fields) -> ! {
        self.log_with(LogLevel::Fatal, message, fields);
        unreachable!("fatal level always exits")
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("caller", &self.caller)
            .field("cores", &self.cores_len())
            .field("active_cores", &self.active_cores_len())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.tee.get_mut().sync() {
            eprintln!("[LOGGER ERROR] Failed to sync during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped entries (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// The style, level, output and encoder options describe the primary core;
/// cores passed to [`core`](Self::core) are teed alongside it.
///
/// # Example
/// ```
/// use looog::prelude::*;
/// use looog::sinks::SharedBuffer;
///
/// let logger = Logger::builder()
///     .style(Style::Json)
///     .level(LogLevel::Info)
///     .caller(true, CallerFormat::Short)
///     .output(SharedBuffer::new())
///     .core(LogConfig::new().level(LogLevel::Error).output(SharedBuffer::new()).build())
///     .build();
/// assert_eq!(logger.cores_len(), 2);
/// ```
pub struct LoggerBuilder {
    config: LogConfig,
    caller: bool,
    name: Option<String>,
    extra_cores: Vec<Core>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LogConfig::new(),
            caller: false,
            name: None,
            extra_cores: Vec::new(),
        }
    }

    /// Set the style; strings other than `json` select the console style
    #[must_use = "builder methods return a new value"]
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.config = self.config.style(style);
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config = self.config.level(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.config = self.config.output(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.config = self.config.output_boxed(sink);
        self
    }

    /// Append to the file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn output_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = self.config.output_file(path)?;
        Ok(self)
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimestampFormat) -> Self {
        self.config = self.config.time_format(format);
        self
    }

    /// Set a strftime time layout
    ///
    /// # Errors
    ///
    /// Returns an error if chrono cannot format `layout`.
    pub fn time_layout(self, layout: &str) -> Result<Self> {
        Ok(self.time_format(TimestampFormat::layout(layout)?))
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_format(mut self, format: LevelFormat) -> Self {
        self.config = self.config.level_format(format);
        self
    }

    /// Enable or disable caller annotation and choose how it is rendered
    #[must_use = "builder methods return a new value"]
    pub fn caller(mut self, enable: bool, format: CallerFormat) -> Self {
        self.caller = enable;
        self.config = self.config.caller_format(format);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace every encoder setting of the primary core
    #[must_use = "builder methods return a new value"]
    pub fn encoder_config(mut self, config: EncoderConfig) -> Self {
        self.config = self.config.encoder_config(config);
        self
    }

    /// Tee an additional core
    #[must_use = "builder methods return a new value"]
    pub fn core(mut self, core: Core) -> Self {
        self.extra_cores.push(core);
        self
    }

    pub fn build(self) -> Logger {
        let mut cores = Vec::with_capacity(1 + self.extra_cores.len());
        cores.push(Arc::new(self.config.build()));
        cores.extend(self.extra_cores.into_iter().map(Arc::new));

        Logger::from_cores(cores, self.caller, self.name)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::SharedBuffer;

    fn capture(level: LogLevel) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .level(level)
            .level_format(LevelFormat::Capital)
            .output(buffer.clone())
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_level_filtering() {
        let (logger, buffer) = capture(LogLevel::Warn);

        logger.debug("hidden");
        logger.info("hidden");
        logger.warn("shown");
        logger.error("shown too");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WARN\tshown"));
        assert!(lines[1].contains("ERROR\tshown too"));
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_filtered_message_is_not_formatted() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct Counted<'a>(&'a AtomicUsize);

        impl fmt::Display for Counted<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fetch_add(1, Ordering::SeqCst);
                f.write_str("counted")
            }
        }

        let formatted = AtomicUsize::new(0);
        let (logger, buffer) = capture(LogLevel::Warn);

        logger.debug(Counted(&formatted));
        logger.infow(Counted(&formatted), Fields::new().with("k", 1));
        assert_eq!(formatted.load(Ordering::SeqCst), 0);

        logger.warn(Counted(&formatted));
        assert_eq!(formatted.load(Ordering::SeqCst), 1);
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_formatted_and_keyed_variants() {
        let (logger, buffer) = capture(LogLevel::Debug);

        logger.infof(format_args!("listening on port {}", 8080));
        logger.warnw("slow request", Fields::new().with("ms", 1200));

        let lines = buffer.lines();
        assert!(lines[0].ends_with("listening on port 8080"));
        assert!(lines[1].ends_with("slow request\t{\"ms\":1200}"));
    }

    #[test]
    fn test_caller_annotation() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .level_format(LevelFormat::Capital)
            .caller(true, CallerFormat::Short)
            .output(buffer.clone())
            .build();

        logger.info("where am I");
        let line = line!() - 1;

        assert!(
            buffer.contents().contains(&format!("core/logger.rs:{}", line)),
            "caller missing: {}",
            buffer.contents()
        );
    }

    #[test]
    fn test_caller_disabled_by_default() {
        let (logger, buffer) = capture(LogLevel::Debug);
        logger.info("no caller");
        assert!(!buffer.contents().contains("logger.rs"));
    }

    #[test]
    fn test_add_core_takes_effect_after_rebuild() {
        let (logger, _primary) = capture(LogLevel::Debug);
        let extra = SharedBuffer::new();

        logger.add_core(LogConfig::new().output(extra.clone()).build());
        assert_eq!(logger.cores_len(), 2);
        assert_eq!(logger.active_cores_len(), 1);

        logger.info("before rebuild");
        assert!(extra.is_empty());

        logger.rebuild();
        assert_eq!(logger.active_cores_len(), 2);

        logger.info("after rebuild");
        assert_eq!(extra.lines().len(), 1);
        assert!(extra.contents().contains("after rebuild"));
    }

    #[test]
    fn test_named_child_waits_for_rebuild() {
        let (logger, primary) = capture(LogLevel::Debug);
        let pending = SharedBuffer::new();

        logger.add_core(LogConfig::new().output(pending.clone()).build());
        let child = logger.named("child");
        assert_eq!(child.active_cores_len(), 1);
        assert_eq!(child.cores_len(), 2);

        child.info("only primary");
        assert_eq!(primary.lines().len(), 1);
        assert!(pending.is_empty());

        child.rebuild();
        child.info("both");
        assert_eq!(pending.lines().len(), 1);
        assert_eq!(logger.active_cores_len(), 1);
    }

    #[test]
    fn test_attach() {
        let (logger, primary) = capture(LogLevel::Debug);
        let extra = SharedBuffer::new();

        logger.attach(LogConfig::new().style(Style::Json).output(extra.clone()).build());
        logger.info("both");

        assert_eq!(primary.lines().len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&extra.lines()[0]).unwrap();
        assert_eq!(parsed["msg"], "both");
    }

    #[test]
    fn test_named_logger() {
        let (logger, buffer) = capture(LogLevel::Debug);
        let http = logger.named("http");
        let router = http.named("router");

        http.info("from http");
        router.info("from router");

        let lines = buffer.lines();
        assert!(lines[0].contains("INFO\thttp\tfrom http"));
        assert!(lines[1].contains("INFO\thttp.router\tfrom router"));
        assert_eq!(router.name(), Some("http.router"));
    }

    #[test]
    fn test_panic_logs_then_panics() {
        let (logger, buffer) = capture(LogLevel::Debug);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("invariant violated");
        }));

        let payload = result.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("invariant violated")
        );
        assert!(buffer.contents().contains("PANIC\tinvariant violated"));
    }

    #[test]
    fn test_panic_even_when_level_filtered() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .level(LogLevel::Fatal)
            .output(buffer.clone())
            .build();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panicf(format_args!("code {}", 7));
        }));

        assert!(result.is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_builder_output_file_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Logger::builder()
            .output_file(dir.path().join("missing/app.log"))
            .is_err());
    }

    #[test]
    fn test_builder_time_layout() {
        assert!(Logger::builder().time_layout("%H:%M:%S").is_ok());
        assert!(Logger::builder().time_layout("%").is_err());
    }

    #[test]
    fn test_concurrent_logging_and_rebuild() {
        let (logger, buffer) = capture(LogLevel::Debug);
        let logger = Arc::new(logger);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.info(format!("thread {} message {}", t, i));
                    }
                })
            })
            .collect();

        for _ in 0..5 {
            logger.attach(LogConfig::new().output(SharedBuffer::new()).build());
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(buffer.lines().len(), 200);
        assert_eq!(logger.cores_len(), 6);
    }
}
