//! # Pacer
//!
//! Paced token-streaming display core for chat kiosks.
//!
//! A generation service streams text tokens over a socket in irregular
//! bursts. Pacer queues them and reveals one token per fixed tick (210 ms by
//! default), so the viewer sees a steady, readable stream. A run gate lets
//! the front-end hold output back entirely (while a loading indicator is
//! shown) and release it later without losing or reordering anything.
//!
//! ## Core Concepts
//!
//! - **Token buffer**: FIFO queue plus append-only display string
//! - **Run gate**: external switch that pauses release, never ingestion
//! - **Actor model**: transport and ticker threads feed one session loop
//! - **Typewriter**: grapheme-at-a-time reveal for scripted messages
//!
//! ## Example
//!
//! ```rust,ignore
//! use pacer::{SessionConfig, SessionEvent, StreamSession};
//! use std::time::Duration;
//!
//! let mut session = StreamSession::connect(&SessionConfig::default())?;
//! session.set_run_gate(true);
//!
//! while let Some(event) = session.poll(Duration::from_millis(50)) {
//!     if let SessionEvent::Released(_) = event {
//!         println!("{}", session.display());
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod api;
pub mod config;
pub mod error;
pub mod pacing;
pub mod terminal;

// Re-exports for convenience
pub use actor::{
    SessionConfig, SessionEvent, StreamSession, TickerActor, TransportActor, TransportConfig,
    TransportEvent, DEFAULT_TICK_INTERVAL,
};
pub use api::{ApiClient, ScriptKind};
pub use config::KioskConfig;
pub use error::{Error, Result};
pub use pacing::{TokenBuffer, Typewriter, TypewriterConfig, TypewriterState};
pub use terminal::{ConsoleDisplay, KeyInput};
