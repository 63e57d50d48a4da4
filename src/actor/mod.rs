//! Actor Model: Message-passing concurrency for the streaming session.
//!
//! This module implements a simple actor system using crossbeam channels:
//! - **Transport Actor**: Reads the service socket, forwards tokens
//! - **Ticker Actor**: Emits release ticks on a fixed cadence
//! - **Stream Session**: Owns the token buffer, applies both in order
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐  TransportEvent  ┌────────────────┐
//! │Transport Thread│ ───────────────▶ │                │
//! └────────────────┘                  │ Stream Session │ ──▶ display()
//! ┌────────────────┐       Tick       │ (TokenBuffer)  │
//! │ Ticker Thread  │ ───────────────▶ │                │
//! └────────────────┘                  └────────────────┘
//! ```

mod messages;
mod session;
mod ticker;
mod transport;

pub use messages::{SessionEvent, TransportEvent, WireFrame, CHAT_TOKEN_EVENT};
pub use session::{SessionConfig, StreamSession};
pub use ticker::{Tick, TickerActor, DEFAULT_TICK_INTERVAL};
pub use transport::{decode_frame, TransportActor, TransportConfig};
