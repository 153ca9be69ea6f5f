//! Basic logger usage example
//!
//! Demonstrates the default logger, level filtering and the three call
//! flavours: plain, formatted and keyed.
//!
//! Run with: cargo run --example basic_usage

use looog::prelude::*;

fn main() -> Result<()> {
    println!("=== Looog - Basic Usage Example ===\n");

    // Package-level functions write through the default logger
    println!("1. Default logger:");
    looog::debug("This is a debug message");
    looog::info("This is an info message");
    looog::warnf(format_args!("Retry attempt {} of {}", 2, 3));
    looog::errorw("Request failed", fields!("status" => 503, "path" => "/api"));

    println!("\n2. Logger with a higher minimum level:");
    let logger = Logger::builder()
        .level(LogLevel::Warn)
        .caller(true, CallerFormat::Short)
        .build();
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");
    logger.error("Error message (visible)");

    println!("\n3. JSON style:");
    let json = Logger::builder()
        .style(Style::Json)
        .time_format(TimestampFormat::Rfc3339)
        .name("demo")
        .build();
    json.infow(
        "user login",
        fields!("user" => "alice", "elapsed" => std::time::Duration::from_millis(42)),
    );

    // Make the JSON logger the default
    looog::set_default(json);
    looog::println("now written as JSON");
    looog::sync()?;
    logger.sync()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
