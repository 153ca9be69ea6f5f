//! File logging example
//!
//! Demonstrates logging to the console and a JSON file at the same time,
//! with the file only receiving warnings and errors.
//!
//! Run with: cargo run --example file_logging

use looog::prelude::*;

fn main() -> Result<()> {
    println!("=== Looog - File Logging Example ===\n");

    let file_core = LogConfig::new()
        .style(Style::Json)
        .level(LogLevel::Warn)
        .time_format(TimestampFormat::UnixMillis)
        .output_file("application.log")?
        .build();

    let logger = Logger::builder()
        .level(LogLevel::Debug)
        .caller(true, CallerFormat::Short)
        .core(file_core)
        .build();

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.infof(format_args!("Processing item {}/5", i));
        if i == 3 {
            logger.warnw("Item took longer than expected", fields!("item" => i));
        }
    }

    logger.info("All operations completed");
    logger.sync()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the warnings and errors");

    Ok(())
}
