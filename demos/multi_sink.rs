//! Multi-sink example
//!
//! Builds a logger from a JSON configuration, then attaches extra cores at
//! runtime: one immediately, one that only starts receiving entries after
//! a rebuild.
//!
//! Run with: cargo run --example multi_sink

use looog::prelude::*;
use looog::sinks::{BufferedSink, OverflowPolicy};

fn main() -> Result<()> {
    println!("=== Looog - Multi-Sink Example ===\n");

    let config = LoggerConfig::from_json(
        r#"{
            "style": "console",
            "level": "debug",
            "output": "stdout",
            "level_format": "capital_color",
            "name": "worker"
        }"#,
    )?;
    let logger = config.build()?;
    logger.info("Configured from JSON");

    // Errors also go to stderr as JSON, right away
    logger.attach(
        LogConfig::new()
            .style(Style::Json)
            .level(LogLevel::Error)
            .output(StderrSink::new())
            .build(),
    );
    logger.error("Visible on stdout and stderr");

    // A buffered in-memory core joins on the next rebuild
    let captured = SharedBuffer::new();
    let buffered = BufferedSink::new(captured.clone(), 128)
        .with_overflow_policy(OverflowPolicy::DropNewest);
    logger.add_core(LogConfig::new().level_format(LevelFormat::Capital).output(buffered).build());

    logger.info("Not captured yet");
    logger.rebuild();
    logger.info("Captured after rebuild");
    logger.sync()?;

    println!("\nCaptured {} line(s):", captured.lines().len());
    for line in captured.lines() {
        println!("  {}", line);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
