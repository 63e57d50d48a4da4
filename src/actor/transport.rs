//! Transport Actor: Dedicated thread for the service socket.
//!
//! This actor owns the TCP connection to the generation service. It reads
//! newline-delimited JSON frames and forwards `chatToken` payloads to the
//! session loop as [`TransportEvent::Token`], in arrival order, together
//! with connect/disconnect lifecycle events.
//!
//! Reads use a short timeout so the thread notices shutdown promptly.

use super::messages::{TransportEvent, WireFrame, CHAT_TOKEN_EVENT};
use crate::error::Result;
use crossbeam_channel::Sender;
use serde_json::Value;
use std::io::{self, BufRead, BufReader};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Configuration for the transport actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Service address, `host:port`.
    pub addr: String,
    /// How long a read blocks before re-checking shutdown.
    pub poll_timeout: Duration,
    /// Timeout for a single connect attempt.
    pub connect_timeout: Duration,
    /// Whether to reconnect after the connection drops.
    pub reconnect: bool,
    /// Wait between reconnect attempts.
    pub reconnect_delay: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3001".to_string(),
            poll_timeout: Duration::from_millis(50),
            connect_timeout: Duration::from_secs(5),
            reconnect: true,
            reconnect_delay: Duration::from_secs(1),
        }
    }
}

/// Why a read loop ended.
enum ReadOutcome {
    /// Peer closed or the socket failed.
    Closed(String),
    /// Nobody is listening for events anymore.
    ReceiverGone,
    /// Shutdown was requested.
    Shutdown,
}

/// Transport actor that streams tokens from the service socket.
pub struct TransportActor {
    /// Handle to the transport thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl TransportActor {
    /// Spawn the transport actor thread.
    ///
    /// # Arguments
    ///
    /// * `config` - Where to connect and how to retry.
    /// * `sender` - Channel to send transport events to the session loop.
    pub fn spawn(config: TransportConfig, sender: Sender<TransportEvent>) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("pacer-transport".to_string())
            .spawn(move || {
                Self::run_loop(&config, &sender, &shutdown_clone);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the transport thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the transport thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Connect, read, and reconnect until shutdown.
    fn run_loop(config: &TransportConfig, sender: &Sender<TransportEvent>, shutdown: &AtomicBool) {
        let mut reported_failure = false;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            match Self::connect(config) {
                Ok(stream) => {
                    reported_failure = false;
                    tracing::info!(addr = %config.addr, "connected");

                    if sender.send(TransportEvent::Connected).is_err() {
                        break;
                    }

                    let reason = match Self::read_frames(stream, sender, shutdown) {
                        ReadOutcome::Closed(reason) => reason,
                        ReadOutcome::ReceiverGone | ReadOutcome::Shutdown => break,
                    };

                    tracing::warn!(addr = %config.addr, %reason, "disconnected");
                    if sender.send(TransportEvent::Disconnected { reason }).is_err() {
                        break;
                    }
                }
                Err(e) if reported_failure => {
                    tracing::debug!(addr = %config.addr, error = %e, "reconnect failed");
                }
                Err(e) => {
                    reported_failure = true;
                    tracing::warn!(addr = %config.addr, error = %e, "connect failed");
                }
            }

            if !config.reconnect {
                break;
            }
            Self::sleep_unless_shutdown(config.reconnect_delay, config.poll_timeout, shutdown);
        }

        tracing::debug!(addr = %config.addr, "transport stopped");
    }

    /// Open the socket with a connect timeout and a read poll timeout.
    fn connect(config: &TransportConfig) -> io::Result<TcpStream> {
        let addrs: Vec<SocketAddr> = config.addr.to_socket_addrs()?.collect();
        let mut last_err =
            io::Error::new(io::ErrorKind::AddrNotAvailable, "address resolved to nothing");

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, config.connect_timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(config.poll_timeout))?;
                    stream.set_nodelay(true)?;
                    return Ok(stream);
                }
                Err(e) => last_err = e,
            }
        }

        Err(last_err)
    }

    /// Read frames until the connection ends.
    ///
    /// Bytes of a partially received frame are kept across read timeouts.
    fn read_frames(
        stream: TcpStream,
        sender: &Sender<TransportEvent>,
        shutdown: &AtomicBool,
    ) -> ReadOutcome {
        let mut reader = BufReader::new(stream);
        let mut line = Vec::with_capacity(256);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                return ReadOutcome::Shutdown;
            }

            match reader.read_until(b'\n', &mut line) {
                Ok(0) => {
                    // EOF; flush an unterminated trailing frame first
                    if !line.is_empty() && !Self::forward(&line, sender) {
                        return ReadOutcome::ReceiverGone;
                    }
                    return ReadOutcome::Closed("connection closed by peer".to_string());
                }
                Ok(_) => {
                    if line.ends_with(b"\n") {
                        let delivered = Self::forward(&line, sender);
                        line.clear();
                        if !delivered {
                            return ReadOutcome::ReceiverGone;
                        }
                    }
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock
                            | io::ErrorKind::TimedOut
                            | io::ErrorKind::Interrupted
                    ) => {}
                Err(e) => return ReadOutcome::Closed(e.to_string()),
            }
        }
    }

    /// Decode one frame and send it on. Returns `false` if the receiver is gone.
    fn forward(line: &[u8], sender: &Sender<TransportEvent>) -> bool {
        match decode_frame(line) {
            Ok(Some(event)) => sender.send(event).is_ok(),
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed frame");
                true
            }
        }
    }

    /// Sleep for `delay` in `step` slices, returning early on shutdown.
    fn sleep_unless_shutdown(delay: Duration, step: Duration, shutdown: &AtomicBool) {
        let deadline = Instant::now() + delay;
        loop {
            if shutdown.load(Ordering::Relaxed) {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep((deadline - now).min(step));
        }
    }
}

impl Drop for TransportActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Decode one newline-delimited frame.
///
/// Returns `Ok(None)` for blank lines and for events other than
/// `chatToken`. A `chatToken` whose payload is not a string is passed
/// through as its JSON text.
pub fn decode_frame(bytes: &[u8]) -> Result<Option<TransportEvent>> {
    let bytes = bytes.trim_ascii();
    if bytes.is_empty() {
        return Ok(None);
    }

    let frame: WireFrame = serde_json::from_slice(bytes)?;
    if frame.event != CHAT_TOKEN_EVENT {
        tracing::debug!(event = %frame.event, "ignoring event");
        return Ok(None);
    }

    let token = match frame.data {
        Value::String(token) => token,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(Some(TransportEvent::Token(token)))
}
