//! Pacing: turning bursty text into a steady reveal.
//!
//! Two independent step machines live here, neither owning a timer:
//!
//! 1. [`TokenBuffer`]: queues streamed tokens and releases one per tick
//!    while its run gate is open.
//! 2. [`Typewriter`]: reveals a fixed text one grapheme per step, erasing
//!    the previous text first.
//!
//! # Example
//!
//! ```rust
//! use pacer::pacing::TokenBuffer;
//!
//! let mut buffer = TokenBuffer::new();
//! buffer.ingest("Hello");
//! buffer.ingest(" world");
//! buffer.tick(); // gate closed: nothing
//! buffer.set_run_gate(true);
//! buffer.tick();
//! buffer.tick();
//! assert_eq!(buffer.display(), "Hello world");
//! ```

mod buffer;
mod typewriter;

pub use buffer::TokenBuffer;
pub use typewriter::{
    Typewriter, TypewriterConfig, TypewriterState, DEFAULT_BACKSPACING_DELAY,
    DEFAULT_NEWLINE_DELAY, DEFAULT_TYPING_DELAY,
};
