//! Logging macros with `format!`-style arguments and keyed fields
//!
//! ```
//! use looog::prelude::*;
//! use looog::{fields, info, warn};
//!
//! let logger = Logger::builder().output(SharedBuffer::new()).build();
//!
//! info!(logger, "Server started");
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Keyed fields follow a semicolon
//! warn!(logger, "slow request"; "path" => "/api", "ms" => 1250);
//!
//! let extra = fields!("user" => "alice", "attempt" => 3);
//! assert_eq!(extra.len(), 2);
//! ```

/// Build [`Fields`](crate::Fields) from `key => value` pairs, keeping their order
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Fields::new()$(.with($key, $value))+
    };
}

/// Log at an explicit level.
///
/// ```
/// # use looog::prelude::*;
/// # let logger = Logger::builder().output(SharedBuffer::new()).build();
/// use looog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, "retrying"; "attempt" => 2);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.log_with($level, $msg, $crate::fields!($($key => $value),+))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use looog::prelude::*;
/// # let logger = Logger::builder().output(SharedBuffer::new()).build();
/// use looog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.debugw($msg, $crate::fields!($($key => $value),+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

/// Log an info-level message.
///
/// ```
/// # use looog::prelude::*;
/// # let logger = Logger::builder().output(SharedBuffer::new()).build();
/// use looog::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.infow($msg, $crate::fields!($($key => $value),+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// ```
/// # use looog::prelude::*;
/// # let logger = Logger::builder().output(SharedBuffer::new()).build();
/// use looog::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.warnw($msg, $crate::fields!($($key => $value),+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

/// Log an error-level message.
///
/// ```
/// # use looog::prelude::*;
/// # let logger = Logger::builder().output(SharedBuffer::new()).build();
/// use looog::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.errorw($msg, $crate::fields!($($key => $value),+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

/// Log a fatal-level message, sync and exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.fatalw($msg, $crate::fields!($($key => $value),+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldValue, LevelFormat, LogLevel, Logger};
    use crate::sinks::SharedBuffer;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn capture() -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .output(buffer.clone())
            .level_format(LevelFormat::Capital)
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_fields_macro_keeps_order() {
        let fields = fields!("b" => 1, "a" => "x", "c" => true);
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(fields.get("a"), Some(&FieldValue::String("x".to_string())));
        assert!(fields!().is_empty());
    }

    #[test]
    fn test_log_macro() {
        let (logger, buffer) = capture();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Warn, "Formatted: {}", 42);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO\tTest message"));
        assert!(lines[1].ends_with("WARN\tFormatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, buffer) = capture();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("DEBUG\tCount: 5"));
        assert!(lines[1].contains("INFO\tItems: 100"));
        assert!(lines[2].contains("WARN\tRetry 1 of 3"));
        assert!(lines[3].contains("ERROR\tCode: 500"));
    }

    #[test]
    fn test_keyed_macros() {
        let (logger, buffer) = capture();
        info!(logger, "request"; "path" => "/health", "status" => 200);
        log!(logger, LogLevel::Error, "failed"; "retry" => false,);

        let lines = buffer.lines();
        assert!(lines[0].ends_with(r#"request	{"path":"/health","status":200}"#));
        assert!(lines[1].ends_with(r#"failed	{"retry":false}"#));
    }

    #[test]
    fn test_macro_filtered_by_level() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .output(buffer.clone())
            .level(LogLevel::Error)
            .build();
        info!(logger, "dropped {}", 1);
        warn!(logger, "dropped"; "k" => 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_panic_level_through_log_macro() {
        let (logger, buffer) = capture();
        let result = catch_unwind(AssertUnwindSafe(|| {
            log!(logger, LogLevel::Panic, "boom {}", 7);
        }));
        assert!(result.is_err());
        assert!(buffer.contents().contains("PANIC\tboom 7"));
    }
}
