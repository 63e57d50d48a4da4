//! Token buffer: FIFO of streamed tokens released at a fixed pace.
//!
//! Tokens arrive in bursts from the transport. The buffer holds them in
//! arrival order and releases exactly one per [`TokenBuffer::tick`] into an
//! append-only display string, but only while the run gate is open.
//!
//! The buffer owns no timer. Whoever drives `tick()` decides the cadence
//! (see [`crate::actor::TickerActor`]), which keeps this type trivially
//! testable by calling `tick()` by hand.

use std::collections::VecDeque;

/// Pending tokens plus the text released from them so far.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    /// Tokens waiting for release, head = oldest.
    pending: VecDeque<String>,
    /// Concatenation of every released token, in release order.
    display: String,
    /// Whether ticks may release tokens.
    run_gate: bool,
    /// Number of tokens released since creation or the last clear.
    released: usize,
}

impl TokenBuffer {
    /// Create an empty buffer with the run gate closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with the given initial gate state.
    pub fn with_run_gate(enabled: bool) -> Self {
        Self {
            run_gate: enabled,
            ..Self::default()
        }
    }

    /// Append a token to the tail of the pending queue.
    ///
    /// Any string is accepted, including the empty string. The display is
    /// untouched until a later tick releases it.
    pub fn ingest(&mut self, token: impl Into<String>) {
        self.pending.push_back(token.into());
    }

    /// Open or close the run gate.
    ///
    /// Opening the gate does not flush the queue; release stays one token
    /// per tick.
    #[inline]
    pub const fn set_run_gate(&mut self, enabled: bool) {
        self.run_gate = enabled;
    }

    /// Current run gate state.
    #[inline]
    pub const fn run_gate(&self) -> bool {
        self.run_gate
    }

    /// Release at most one token.
    ///
    /// With the gate open and the queue non-empty, the head token is moved
    /// onto the end of the display and a copy is returned. Otherwise this
    /// is a no-op and returns `None`.
    pub fn tick(&mut self) -> Option<String> {
        if !self.run_gate {
            return None;
        }

        let token = self.pending.pop_front()?;
        self.display.push_str(&token);
        self.released += 1;
        Some(token)
    }

    /// Everything released so far.
    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Number of tokens waiting for release.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of tokens released so far.
    #[inline]
    pub const fn released_count(&self) -> usize {
        self.released
    }

    /// Whether the pending queue is empty.
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all pending and released text. The run gate is kept.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.display.clear();
        self.released = 0;
    }
}
