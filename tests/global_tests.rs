//! Package-level panic functions
//!
//! Kept in its own binary: it replaces the process-wide default logger.

use looog::prelude::*;
use std::panic::{self, AssertUnwindSafe};

fn payload(result: std::thread::Result<()>) -> String {
    let err = result.expect_err("call should have panicked");
    match err.downcast::<String>() {
        Ok(message) => *message,
        Err(_) => panic!("panic payload is not a String"),
    }
}

#[test]
fn test_global_panic_functions_log_then_unwind() {
    let buffer = SharedBuffer::new();
    looog::set_default(
        Logger::builder()
            .level_format(LevelFormat::Capital)
            .caller(false, CallerFormat::Short)
            .output(buffer.clone())
            .build(),
    );

    let first = payload(panic::catch_unwind(AssertUnwindSafe(|| {
        looog::panicw("lost quorum", fields!("peers" => 2));
    })));
    assert_eq!(first, "lost quorum");

    let second = payload(panic::catch_unwind(AssertUnwindSafe(|| {
        looog::panicf(format_args!("shard {} corrupt", 7));
    })));
    assert_eq!(second, "shard 7 corrupt");

    let third = payload(panic::catch_unwind(AssertUnwindSafe(|| {
        looog::panic("unreachable state");
    })));
    assert_eq!(third, "unreachable state");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(r#"PANIC	lost quorum	{"peers":2}"#));
    assert!(lines[1].ends_with("PANIC\tshard 7 corrupt"));
    assert!(lines[2].ends_with("PANIC\tunreachable state"));
}
