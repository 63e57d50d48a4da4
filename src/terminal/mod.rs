//! Terminal output: the reference display consumer.
//!
//! [`ConsoleDisplay`] shows a session's growing display string on a plain
//! terminal. [`OutputBuffer`] batches its escape sequences so each update
//! is a single write. [`KeyInput`] watches for the quit keys.

mod console;
mod input;
mod output;

pub use console::ConsoleDisplay;
pub use input::{is_quit_event, KeyInput};
pub use output::OutputBuffer;
