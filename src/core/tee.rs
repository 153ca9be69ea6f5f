//! Cores and the tee that fans entries out to them

use super::{
    encoder::Encoder, error::Result, log_entry::LogEntry, log_level::LogLevel,
    metrics::LoggerMetrics, sink::Sink,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// One (encoder, sink, minimum level) triple
pub struct Core {
    encoder: Box<dyn Encoder>,
    sink: Mutex<Box<dyn Sink>>,
    level: LogLevel,
}

impl Core {
    pub fn new<S: Sink + 'static>(encoder: Box<dyn Encoder>, sink: S, level: LogLevel) -> Self {
        Self::from_boxed(encoder, Box::new(sink), level)
    }

    pub fn from_boxed(encoder: Box<dyn Encoder>, sink: Box<dyn Sink>, level: LogLevel) -> Self {
        Self {
            encoder,
            sink: Mutex::new(sink),
            level,
        }
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.enabled_at(self.level)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn encoder_name(&self) -> &str {
        self.encoder.name()
    }

    pub fn sink_name(&self) -> String {
        self.sink.lock().name().to_string()
    }

    /// Encode and write `entry`, ignoring the level filter
    pub fn write(&self, entry: &LogEntry) -> Result<()> {
        let bytes = self.encoder.encode(entry)?;
        self.sink.lock().write(&bytes)
    }

    pub fn sync(&self) -> Result<()> {
        self.sink.lock().sync()
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("encoder", &self.encoder.name())
            .field("sink", &self.sink_name())
            .field("level", &self.level)
            .finish()
    }
}

/// Fan-out of each entry to every core enabled for its level
#[derive(Debug, Clone, Default)]
pub struct Tee {
    cores: Vec<Arc<Core>>,
}

impl Tee {
    pub fn new(cores: Vec<Arc<Core>>) -> Self {
        Self { cores }
    }

    pub fn cores(&self) -> &[Arc<Core>] {
        &self.cores
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    /// True if at least one core accepts `level`
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.cores.iter().any(|core| core.enabled(level))
    }

    /// Write `entry` to every enabled core
    ///
    /// Each core is isolated: an error or panic in one is reported on stderr
    /// and the remaining cores still receive the entry. Returns `true` if any
    /// core failed.
    pub fn write(&self, entry: &LogEntry, metrics: &LoggerMetrics) -> bool {
        let mut has_error = false;
        let mut delivered = false;

        for (idx, core) in self.cores.iter().enumerate() {
            if !core.enabled(entry.level) {
                continue;
            }

            let result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| core.write(entry)));

            match result {
                Ok(Ok(())) => delivered = true,
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Core #{} ({}) failed: {}",
                        idx,
                        core.encoder_name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Core #{} panicked: {}. \
                         Other cores continue to function.",
                        idx,
                        panic_message(&*panic_info)
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else if delivered {
            metrics.record_logged();
        }

        has_error
    }

    /// Sync every core, returning the first error after trying all of them
    pub fn sync(&self) -> Result<()> {
        let mut first_error = None;

        for core in &self.cores {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| core.sync()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Core panicked during sync: {}",
                        panic_message(&*panic_info)
                    );
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EncoderConfig, LevelFormat, LoggerError, Style};
    use crate::sinks::SharedBuffer;

    struct FailingSink;

    impl Sink for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> Result<()> {
            Err(LoggerError::writer("disk on fire"))
        }

        fn sync(&mut self) -> Result<()> {
            Err(LoggerError::writer("cannot sync"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn write(&mut self, _buf: &[u8]) -> Result<()> {
            panic!("sink exploded");
        }

        fn sync(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn plain() -> EncoderConfig {
        EncoderConfig::default().with_level_format(LevelFormat::Capital)
    }

    fn buffer_core(buffer: &SharedBuffer, level: LogLevel) -> Arc<Core> {
        Arc::new(Core::new(
            Style::Console.encoder(plain()),
            buffer.clone(),
            level,
        ))
    }

    #[test]
    fn test_core_level_filter() {
        let buffer = SharedBuffer::new();
        let core = buffer_core(&buffer, LogLevel::Warn);
        assert!(!core.enabled(LogLevel::Info));
        assert!(core.enabled(LogLevel::Warn));
        assert!(core.enabled(LogLevel::Fatal));
        assert_eq!(core.sink_name(), "buffer");
        assert_eq!(core.encoder_name(), "console");
    }

    #[test]
    fn test_tee_routes_by_level() {
        let all = SharedBuffer::new();
        let errors = SharedBuffer::new();
        let tee = Tee::new(vec![
            buffer_core(&all, LogLevel::Debug),
            buffer_core(&errors, LogLevel::Error),
        ]);
        let metrics = LoggerMetrics::new();

        tee.write(&LogEntry::new(LogLevel::Info, "routine"), &metrics);
        tee.write(&LogEntry::new(LogLevel::Error, "broken"), &metrics);

        assert_eq!(all.lines().len(), 2);
        assert_eq!(errors.lines().len(), 1);
        assert!(errors.contents().contains("broken"));
        assert_eq!(metrics.total_logged(), 2);
        assert!(tee.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_failing_core_does_not_block_others() {
        let buffer = SharedBuffer::new();
        let tee = Tee::new(vec![
            Arc::new(Core::new(Style::Json.encoder(plain()), FailingSink, LogLevel::Debug)),
            Arc::new(Core::new(Style::Json.encoder(plain()), PanickingSink, LogLevel::Debug)),
            buffer_core(&buffer, LogLevel::Debug),
        ]);
        let metrics = LoggerMetrics::new();

        let failed = tee.write(&LogEntry::new(LogLevel::Info, "still delivered"), &metrics);

        assert!(failed);
        assert!(buffer.contents().contains("still delivered"));
        assert_eq!(metrics.dropped_count(), 1);
    }

    #[test]
    fn test_sync_reports_first_error() {
        let buffer = SharedBuffer::new();
        let tee = Tee::new(vec![
            buffer_core(&buffer, LogLevel::Debug),
            Arc::new(Core::new(Style::Json.encoder(plain()), FailingSink, LogLevel::Debug)),
        ]);

        let err = tee.sync().unwrap_err();
        assert!(err.to_string().contains("cannot sync"));
    }

    #[test]
    fn test_empty_tee() {
        let tee = Tee::default();
        assert!(tee.is_empty());
        assert!(!tee.enabled(LogLevel::Fatal));
        assert!(tee.sync().is_ok());
    }
}
