//! Kiosk configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid.
//!
//! ```toml
//! api_host = "http://localhost:3001"
//! stream_addr = "127.0.0.1:3001"
//! tick_interval_ms = 210
//!
//! [typewriter]
//! typing_delay_ms = 28
//! ```

use crate::actor::{SessionConfig, TransportConfig, DEFAULT_TICK_INTERVAL};
use crate::error::Result;
use crate::pacing::{
    TypewriterConfig, DEFAULT_BACKSPACING_DELAY, DEFAULT_NEWLINE_DELAY, DEFAULT_TYPING_DELAY,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default base URL of the script service.
pub const DEFAULT_API_HOST: &str = "http://localhost:3001";

/// Top-level kiosk settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KioskConfig {
    /// Base URL for `/generateScript` and `/speakText`.
    pub api_host: String,
    /// Token socket address, `host:port`.
    pub stream_addr: String,
    /// Time between token releases.
    pub tick_interval_ms: u64,
    /// Open the run gate as soon as the session starts.
    pub start_running: bool,
    /// Reconnect after the socket drops.
    pub reconnect: bool,
    /// Wait between reconnect attempts.
    pub reconnect_delay_ms: u64,
    /// Socket read poll timeout.
    pub poll_timeout_ms: u64,
    /// Typewriter delays.
    pub typewriter: TypewriterSettings,
}

/// Typewriter delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypewriterSettings {
    /// Delay after each typed grapheme.
    pub typing_delay_ms: u64,
    /// Delay after each erased grapheme.
    pub backspacing_delay_ms: u64,
    /// Pause after a line break.
    pub newline_delay_ms: u64,
}

#[allow(clippy::cast_possible_truncation)]
const fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

impl Default for KioskConfig {
    fn default() -> Self {
        let transport = TransportConfig::default();
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            stream_addr: transport.addr,
            tick_interval_ms: millis(DEFAULT_TICK_INTERVAL),
            start_running: false,
            reconnect: transport.reconnect,
            reconnect_delay_ms: millis(transport.reconnect_delay),
            poll_timeout_ms: millis(transport.poll_timeout),
            typewriter: TypewriterSettings::default(),
        }
    }
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            typing_delay_ms: millis(DEFAULT_TYPING_DELAY),
            backspacing_delay_ms: millis(DEFAULT_BACKSPACING_DELAY),
            newline_delay_ms: millis(DEFAULT_NEWLINE_DELAY),
        }
    }
}

impl KioskConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    /// Session settings derived from this config.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            tick_interval: Duration::from_millis(self.tick_interval_ms.max(1)),
            start_running: self.start_running,
            transport: TransportConfig {
                addr: self.stream_addr.clone(),
                poll_timeout: Duration::from_millis(self.poll_timeout_ms.max(1)),
                reconnect: self.reconnect,
                reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
                ..TransportConfig::default()
            },
        }
    }

    /// Typewriter settings derived from this config.
    pub const fn typewriter(&self) -> TypewriterConfig {
        TypewriterConfig {
            typing_delay: Duration::from_millis(self.typewriter.typing_delay_ms),
            backspacing_delay: Duration::from_millis(self.typewriter.backspacing_delay_ms),
            newline_delay: Duration::from_millis(self.typewriter.newline_delay_ms),
        }
    }
}
