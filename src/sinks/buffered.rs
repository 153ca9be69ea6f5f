//! Background-writer sink
//!
//! Wraps another sink and moves the actual I/O onto a worker thread fed by a
//! bounded channel. Log calls only pay for a channel send.

use crate::core::{LoggerError, Result, Sink};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default time to wait for the worker on sync and shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const BATCH_SIZE: usize = 50;

/// What a [`BufferedSink`] does when its queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Wait for the worker to make room
    #[default]
    Block,
    /// Wait up to the given time, then drop the line
    BlockWithTimeout(Duration),
    /// Drop the line immediately and count it
    DropNewest,
}

enum Command {
    Write(Vec<u8>),
    Sync(Sender<Result<()>>),
}

pub struct BufferedSink {
    sender: Option<Sender<Command>>,
    worker: Option<thread::JoinHandle<()>>,
    overflow_policy: OverflowPolicy,
    dropped: Arc<AtomicU64>,
    name: String,
}

impl BufferedSink {
    /// Start a worker owning `inner` with a queue of `capacity` lines
    pub fn new<S: Sink + 'static>(inner: S, capacity: usize) -> Self {
        let name = format!("buffered({})", inner.name());
        let (sender, receiver) = bounded(capacity.max(1));
        let worker = thread::Builder::new()
            .name("looog-sink".to_string())
            .spawn(move || Self::run(Box::new(inner), receiver))
            .map_err(|e| eprintln!("[LOGGER ERROR] Failed to start sink worker: {}", e))
            .ok();

        Self {
            sender: worker.as_ref().map(|_| sender),
            worker,
            overflow_policy: OverflowPolicy::default(),
            dropped: Arc::new(AtomicU64::new(0)),
            name,
        }
    }

    #[must_use]
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Lines dropped because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn run(mut inner: Box<dyn Sink>, receiver: Receiver<Command>) {
        let mut batch = Vec::with_capacity(BATCH_SIZE);

        // Channel closed once every sender is gone
        while let Ok(first) = receiver.recv() {
            batch.push(first);
            while batch.len() < BATCH_SIZE {
                match receiver.try_recv() {
                    Ok(command) => batch.push(command),
                    Err(_) => break,
                }
            }

            for command in batch.drain(..) {
                match command {
                    Command::Write(line) => {
                        if let Err(e) = inner.write(&line) {
                            eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", inner.name(), e);
                        }
                    }
                    Command::Sync(ack) => {
                        let _ = ack.send(inner.sync());
                    }
                }
            }

            if let Err(e) = inner.sync() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", inner.name(), e);
            }
        }
    }

    fn record_drop(&self) {
        let previous = self.dropped.fetch_add(1, Ordering::Relaxed);
        if previous == 0 || (previous + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Sink '{}' queue full, {} lines dropped.",
                self.name,
                previous + 1
            );
        }
    }

    fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Sink worker panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Sink worker '{}' did not finish within {:?}. \
                     Some lines may be lost.",
                    self.name, timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Sink for BufferedSink {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| LoggerError::sink_stopped(&self.name))?;

        let command = Command::Write(buf.to_vec());
        let sent = match self.overflow_policy {
            OverflowPolicy::Block => sender.send(command).map_err(|_| false),
            OverflowPolicy::BlockWithTimeout(timeout) => {
                match sender.send_timeout(command, timeout) {
                    Ok(()) => Ok(()),
                    Err(SendTimeoutError::Timeout(_)) => Err(true),
                    Err(SendTimeoutError::Disconnected(_)) => Err(false),
                }
            }
            OverflowPolicy::DropNewest => match sender.try_send(command) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(_)) => Err(true),
                Err(TrySendError::Disconnected(_)) => Err(false),
            },
        };

        match sent {
            Ok(()) => Ok(()),
            // Full queue: counted, not an error for the caller
            Err(true) => {
                self.record_drop();
                Ok(())
            }
            Err(false) => Err(LoggerError::sink_stopped(&self.name)),
        }
    }

    fn sync(&mut self) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| LoggerError::sink_stopped(&self.name))?;

        let (ack_tx, ack_rx) = bounded(1);
        sender
            .send(Command::Sync(ack_tx))
            .map_err(|_| LoggerError::sink_stopped(&self.name))?;

        match ack_rx.recv_timeout(DEFAULT_SHUTDOWN_TIMEOUT) {
            Ok(result) => result,
            Err(_) => Err(LoggerError::writer(format!(
                "Sink '{}' did not sync within {:?}",
                self.name, DEFAULT_SHUTDOWN_TIMEOUT
            ))),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for BufferedSink {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain pending lines first
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Sink '{}' shut down with {} dropped lines",
                self.name, dropped
            );
        }
    }
}
