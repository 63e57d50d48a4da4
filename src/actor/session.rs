//! Stream Session: one streaming session's buffer, ticker and transport.
//!
//! The session is the entry point for applications. It owns exactly one
//! [`TokenBuffer`] and applies every mutation to it on the thread that
//! calls [`StreamSession::poll`]. The ticker and transport threads only
//! send messages, so ingestion and release never overlap.
//!
//! Dropping or disposing the session stops its ticker, so a finished
//! session never keeps draining into a discarded display.

use super::messages::{SessionEvent, TransportEvent};
use super::ticker::{Tick, TickerActor, DEFAULT_TICK_INTERVAL};
use super::transport::{TransportActor, TransportConfig};
use crate::error::Result;
use crate::pacing::TokenBuffer;
use crossbeam_channel::{never, select, unbounded, Receiver, RecvError};
use std::time::Duration;

/// Configuration for a stream session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Time between releases.
    pub tick_interval: Duration,
    /// Initial run gate state.
    pub start_running: bool,
    /// Socket settings.
    pub transport: TransportConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            start_running: false,
            transport: TransportConfig::default(),
        }
    }
}

/// What `select!` produced, acted on once the borrows are released.
enum Ready {
    Event(std::result::Result<TransportEvent, RecvError>),
    Tick(std::result::Result<Tick, RecvError>),
    Idle,
}

/// A paced streaming session.
pub struct StreamSession {
    /// The token buffer fed by this session.
    buffer: TokenBuffer,
    /// Transport events; swapped for `never()` once the sender is gone.
    event_rx: Receiver<TransportEvent>,
    /// Tick events from the ticker.
    tick_rx: Receiver<Tick>,
    /// Ticker actor handle.
    ticker: Option<TickerActor>,
    /// Transport actor handle, absent for externally fed sessions.
    transport: Option<TransportActor>,
    /// Whether the transport reported a live connection.
    connected: bool,
    /// Whether transport events can still arrive.
    transport_open: bool,
}

impl StreamSession {
    /// Start a session connected to the configured service.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticker or transport thread cannot be spawned.
    pub fn connect(config: &SessionConfig) -> Result<Self> {
        let (event_tx, event_rx) = unbounded();
        let transport = TransportActor::spawn(config.transport.clone(), event_tx)?;

        let mut session = Self::from_receiver(event_rx, config.tick_interval)?;
        session.transport = Some(transport);
        session.buffer.set_run_gate(config.start_running);

        tracing::info!(
            addr = %config.transport.addr,
            tick_ms = config.tick_interval.as_millis(),
            "session started"
        );
        Ok(session)
    }

    /// Start a session fed by any source of transport events.
    ///
    /// The run gate starts closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticker thread cannot be spawned.
    pub fn from_receiver(event_rx: Receiver<TransportEvent>, tick_interval: Duration) -> Result<Self> {
        let ticker = TickerActor::spawn(tick_interval)?;
        let tick_rx = ticker.receiver().clone();

        Ok(Self {
            buffer: TokenBuffer::new(),
            event_rx,
            tick_rx,
            ticker: Some(ticker),
            transport: None,
            connected: false,
            transport_open: true,
        })
    }

    /// Wait up to `timeout` for the next transport event or tick and apply it.
    ///
    /// Returns `None` on timeout and for ticks that released nothing.
    pub fn poll(&mut self, timeout: Duration) -> Option<SessionEvent> {
        let ready = select! {
            recv(self.event_rx) -> msg => Ready::Event(msg),
            recv(self.tick_rx) -> tick => Ready::Tick(tick),
            default(timeout) => Ready::Idle,
        };

        match ready {
            Ready::Event(Ok(event)) => Some(self.apply(event)),
            Ready::Event(Err(RecvError)) => {
                tracing::debug!("transport channel closed");
                self.event_rx = never();
                self.transport_open = false;
                self.connected = false;
                Some(SessionEvent::TransportClosed)
            }
            Ready::Tick(Ok(_)) => self.tick().map(SessionEvent::Released),
            Ready::Tick(Err(RecvError)) | Ready::Idle => None,
        }
    }

    /// Apply one transport event to the session.
    fn apply(&mut self, event: TransportEvent) -> SessionEvent {
        match event {
            TransportEvent::Connected => {
                self.connected = true;
                SessionEvent::Connected
            }
            TransportEvent::Disconnected { reason } => {
                self.connected = false;
                tracing::debug!(pending = self.buffer.pending_len(), "draining after disconnect");
                SessionEvent::Disconnected { reason }
            }
            TransportEvent::Token(token) => {
                self.ingest(token);
                SessionEvent::Ingested(self.buffer.pending_len())
            }
        }
    }

    /// Queue a token directly, bypassing the transport.
    pub fn ingest(&mut self, token: impl Into<String>) {
        let token = token.into();
        tracing::trace!(len = token.len(), "token ingested");
        self.buffer.ingest(token);
    }

    /// Run one release step by hand.
    pub fn tick(&mut self) -> Option<String> {
        self.buffer.tick()
    }

    /// Open or close the run gate.
    pub fn set_run_gate(&mut self, enabled: bool) {
        if enabled != self.buffer.run_gate() {
            tracing::debug!(enabled, pending = self.buffer.pending_len(), "run gate changed");
        }
        self.buffer.set_run_gate(enabled);
    }

    /// Current run gate state.
    pub const fn run_gate(&self) -> bool {
        self.buffer.run_gate()
    }

    /// Everything released so far.
    pub fn display(&self) -> &str {
        self.buffer.display()
    }

    /// Number of tokens waiting for release.
    pub fn pending_len(&self) -> usize {
        self.buffer.pending_len()
    }

    /// Read access to the underlying buffer.
    pub const fn buffer(&self) -> &TokenBuffer {
        &self.buffer
    }

    /// Whether the transport currently reports a live connection.
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether transport events can still arrive.
    pub const fn is_transport_open(&self) -> bool {
        self.transport_open
    }

    /// Whether the pending queue is empty.
    pub fn is_drained(&self) -> bool {
        self.buffer.is_drained()
    }

    /// Release cadence of this session's ticker.
    pub fn tick_interval(&self) -> Duration {
        self.ticker
            .as_ref()
            .map_or(DEFAULT_TICK_INTERVAL, TickerActor::interval)
    }

    /// Drop pending and displayed text to start over in place.
    pub fn reset(&mut self) {
        tracing::debug!(released = self.buffer.released_count(), "session reset");
        self.buffer.clear();
    }

    /// Stop the ticker and transport and wait for their threads.
    pub fn dispose(mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
        }
        if let Some(transport) = self.transport.take() {
            transport.join();
        }
        tracing::info!(released = self.buffer.released_count(), "session disposed");
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        if let Some(ticker) = &self.ticker {
            ticker.shutdown();
        }
        if let Some(transport) = &self.transport {
            transport.shutdown();
        }
    }
}
