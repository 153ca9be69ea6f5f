//! Process-wide default logger and package-level logging functions
//!
//! The default logger writes console-style lines to stdout at `Debug` level
//! with capitalised coloured levels and short caller locations. Replace it
//! with [`set_default`].

use crate::core::{CallerFormat, Fields, LevelFormat, LogLevel, Logger, Result, Style};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

static DEFAULT_LOGGER: OnceCell<RwLock<Arc<Logger>>> = OnceCell::new();

/// Build a fresh logger with the default settings
pub fn new_default_logger() -> Logger {
    Logger::builder()
        .style(Style::Console)
        .level(LogLevel::Debug)
        .level_format(LevelFormat::CapitalColor)
        .caller(true, CallerFormat::Short)
        .build()
}

fn slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(Arc::new(new_default_logger())))
}

/// The current default logger
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&*slot().read())
}

/// Replace the default logger, returning the previous one
///
/// The previous logger is synced so nothing written through it is lost.
pub fn set_default(logger: Logger) -> Arc<Logger> {
    let previous = std::mem::replace(&mut *slot().write(), Arc::new(logger));
    if let Err(e) = previous.sync() {
        eprintln!("[LOGGER ERROR] Failed to sync replaced default logger: {}", e);
    }
    previous
}

/// Flush the default logger
pub fn sync() -> Result<()> {
    default_logger().sync()
}

#[track_caller]
pub fn log(level: LogLevel, message: impl fmt::Display) {
    default_logger().log(level, message);
}

#[track_caller]
pub fn log_with(level: LogLevel, message: impl fmt::Display, fields: Fields) {
    default_logger().log_with(level, message, fields);
}

#[track_caller]
pub fn debug(message: impl fmt::Display) {
    default_logger().debug(message);
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    default_logger().debugf(args);
}

#[track_caller]
pub fn debugw(message: impl fmt::Display, fields: Fields) {
    default_logger().debugw(message, fields);
}

#[track_caller]
pub fn info(message: impl fmt::Display) {
    default_logger().info(message);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    default_logger().infof(args);
}

#[track_caller]
pub fn infow(message: impl fmt::Display, fields: Fields) {
    default_logger().infow(message, fields);
}

#[track_caller]
pub fn warn(message: impl fmt::Display) {
    default_logger().warn(message);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    default_logger().warnf(args);
}

#[track_caller]
pub fn warnw(message: impl fmt::Display, fields: Fields) {
    default_logger().warnw(message, fields);
}

#[track_caller]
pub fn error(message: impl fmt::Display) {
    default_logger().error(message);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    default_logger().errorf(args);
}

#[track_caller]
pub fn errorw(message: impl fmt::Display, fields: Fields) {
    default_logger().errorw(message, fields);
}

#[track_caller]
pub fn panic(message: impl fmt::Display) -> ! {
    default_logger().panic(message)
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    default_logger().panicf(args)
}

#[track_caller]
pub fn panicw(message: impl fmt::Display, fields: Fields) -> ! {
    default_logger().panicw(message, fields)
}

#[track_caller]
pub fn fatal(message: impl fmt::Display) -> ! {
    default_logger().fatal(message)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    default_logger().fatalf(args)
}

#[track_caller]
pub fn fatalw(message: impl fmt::Display, fields: Fields) -> ! {
    default_logger().fatalw(message, fields)
}

/// Alias for [`info`]
#[track_caller]
pub fn print(message: impl fmt::Display) {
    info(message);
}

/// Alias for [`info`]
#[track_caller]
pub fn println(message: impl fmt::Display) {
    info(message);
}

/// Alias for [`infof`]
#[track_caller]
pub fn printf(args: fmt::Arguments<'_>) {
    infof(args);
}
