//! Network sink for remote collectors
//!
//! Sends encoded log lines to a remote server over TCP.

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Network sink that sends logs to a remote TCP server
///
/// # Example
///
/// ```no_run
/// use looog::sinks::NetworkSink;
/// use looog::{LogConfig, Style};
///
/// let sink = NetworkSink::connect("127.0.0.1:5170").expect("collector reachable");
/// let core = LogConfig::new().style(Style::Json).output(sink).build();
/// ```
pub struct NetworkSink {
    stream: Option<TcpStream>,
    address: String,
    reconnect_on_error: bool,
    name: String,
}

impl NetworkSink {
    /// Connect to `addr`
    ///
    /// # Errors
    ///
    /// Returns error if connection fails
    pub fn connect(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let stream = Self::open_stream(&address)?;

        Ok(Self {
            stream: Some(stream),
            name: format!("network({})", address),
            address,
            reconnect_on_error: true,
        })
    }

    /// Enable or disable automatic reconnection on errors
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    fn open_stream(address: &str) -> Result<TcpStream> {
        let stream = TcpStream::connect(address)
            .map_err(|e| LoggerError::io_operation("connecting", address.to_string(), e))?;
        stream.set_write_timeout(Some(IO_TIMEOUT))?;
        stream.set_read_timeout(Some(IO_TIMEOUT))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    fn reconnect(&mut self) -> Result<()> {
        self.stream = Some(Self::open_stream(&self.address)?);
        Ok(())
    }
}

impl Sink for NetworkSink {
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        let result = match self.stream {
            Some(ref mut stream) => stream.write_all(buf),
            None if self.reconnect_on_error => {
                self.reconnect()?;
                return self.write(buf);
            }
            None => return Err(LoggerError::writer("Network stream not connected")),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                // Connection lost
                self.stream = None;

                if !self.reconnect_on_error {
                    return Err(e.into());
                }

                match self.reconnect() {
                    Ok(()) => {
                        if let Some(ref mut stream) = self.stream {
                            stream.write_all(buf)?;
                        }
                        Ok(())
                    }
                    Err(reconnect_err) => Err(LoggerError::writer(format!(
                        "Failed to send log and reconnect: {} (reconnect: {})",
                        e, reconnect_err
                    ))),
                }
            }
        }
    }

    fn sync(&mut self) -> Result<()> {
        if let Some(ref mut stream) = self.stream {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
