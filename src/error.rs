//! Error type for the fallible edges of the crate.
//!
//! The token buffer and typewriter never fail. Everything that touches the
//! outside world (threads, sockets, HTTP, config files) returns [`Result`].

use std::io;
use thiserror::Error;

/// Errors produced by transport, API, terminal and config code.
#[derive(Debug, Error)]
pub enum Error {
    /// Socket, thread spawn or terminal I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A wire frame could not be decoded.
    #[error("malformed frame: {0}")]
    Decode(#[from] serde_json::Error),

    /// The HTTP request to the script service failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The script service answered with an `error` field.
    #[error("service error: {0}")]
    Api(String),

    /// The configuration file could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
