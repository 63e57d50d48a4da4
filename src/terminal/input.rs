//! Keyboard input: the kiosk's quit keys.
//!
//! While a [`KeyInput`] is alive the controlling terminal is in raw mode,
//! so Ctrl-C arrives as a key press instead of a signal and the display
//! loop can return normally. Raw mode is left again on drop.

use crate::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::tty::IsTty;
use std::io;
use std::time::Duration;

/// Non-blocking reader for quit keys on the controlling terminal.
pub struct KeyInput {
    /// Whether raw mode was entered (stdin is a terminal).
    raw: bool,
}

impl KeyInput {
    /// Enter raw mode if stdin is a terminal.
    ///
    /// Without a terminal no keys are read and [`KeyInput::quit_requested`]
    /// always returns `false`.
    pub fn enable() -> Result<Self> {
        let raw = io::stdin().is_tty();
        if raw {
            terminal::enable_raw_mode()?;
            tracing::debug!("raw mode enabled");
        }
        Ok(Self { raw })
    }

    /// Input that never reads the terminal.
    pub const fn detached() -> Self {
        Self { raw: false }
    }

    /// Whether keys are being read.
    pub const fn is_attached(&self) -> bool {
        self.raw
    }

    /// Drain pending terminal events; `true` if any of them is a quit key.
    pub fn quit_requested(&self) -> Result<bool> {
        if !self.raw {
            return Ok(false);
        }

        while event::poll(Duration::ZERO)? {
            if is_quit_event(&event::read()?) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Drop for KeyInput {
    fn drop(&mut self) {
        if self.raw {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// `q`, `Esc` and Ctrl-C presses quit.
pub fn is_quit_event(event: &Event) -> bool {
    match event {
        Event::Key(key) => is_quit_key(key),
        _ => false,
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_event(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_event(&press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_other_input_does_not_quit() {
        assert!(!is_quit_event(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_event(&press(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!is_quit_event(&press(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!is_quit_event(&Event::Resize(80, 24)));

        // Releases are ignored; the press already counted
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(!is_quit_event(&release));
    }

    #[test]
    fn test_detached_input_never_quits() {
        let keys = KeyInput::detached();
        assert!(!keys.is_attached());
        assert!(!keys.quit_requested().unwrap());
    }
}
