//! Console display: a plain terminal consumer for the paced display.
//!
//! The console only ever appends. Each [`ConsoleDisplay::render`] call
//! writes the part of the display string that is not on screen yet,
//! soft-wrapping by display columns. A status line (the "Generating…"
//! indicator) can sit below the text and is erased before text resumes.

use super::output::OutputBuffer;
use crate::error::Result;
use std::io::{self, Stdout, Write};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Fallback width when the terminal size is unknown.
const DEFAULT_WIDTH: u16 = 80;

/// Append-only terminal view of a growing display string.
pub struct ConsoleDisplay<W: Write = Stdout> {
    writer: W,
    output: OutputBuffer,
    /// Display text already written.
    shown: String,
    /// Column after the last written grapheme.
    column: u16,
    /// Wrap width in columns.
    width: u16,
    /// Whether a status line is currently drawn below the text.
    status_visible: bool,
}

impl ConsoleDisplay<Stdout> {
    /// Create a console on stdout sized to the terminal, with the cursor hidden.
    pub fn stdout() -> Result<Self> {
        let width = crossterm::terminal::size().map_or(DEFAULT_WIDTH, |(cols, _)| cols);
        Self::with_writer(io::stdout(), width)
    }
}

impl<W: Write> ConsoleDisplay<W> {
    /// Create a console writing to `writer`, wrapping at `width` columns.
    ///
    /// The cursor is hidden immediately and shown again on drop.
    pub fn with_writer(writer: W, width: u16) -> Result<Self> {
        let mut console = Self {
            writer,
            output: OutputBuffer::new(),
            shown: String::new(),
            column: 0,
            width: width.max(1),
            status_visible: false,
        };

        console.output.cursor_hide();
        console.flush()?;
        Ok(console)
    }

    /// Get the underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Wrap width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Change the wrap width (e.g. after a terminal resize).
    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    /// Text written so far.
    pub fn shown(&self) -> &str {
        &self.shown
    }

    /// Bring the screen up to date with `display`.
    ///
    /// Only the unseen suffix is written. If `display` no longer extends
    /// what was shown (a new session began), a fresh block is started.
    pub fn render(&mut self, display: &str) -> Result<()> {
        if !display.starts_with(self.shown.as_str()) {
            self.erase_status();
            if !self.shown.is_empty() {
                self.output.newline();
                self.output.newline();
            }
            self.shown.clear();
            self.column = 0;
        }

        if display.len() == self.shown.len() {
            return self.flush();
        }

        self.erase_status();
        let suffix = &display[self.shown.len()..];
        for grapheme in suffix.graphemes(true) {
            self.write_grapheme(grapheme);
        }
        self.shown.push_str(suffix);

        self.flush()
    }

    /// Draw (or replace) the status line below the text.
    pub fn show_status(&mut self, text: &str) -> Result<()> {
        if self.status_visible {
            self.output.clear_line();
        } else {
            self.output.newline();
            self.status_visible = true;
        }

        self.output.set_italic();
        self.output.write_str(text);
        self.output.reset_attrs();
        self.flush()
    }

    /// Remove the status line, if any.
    pub fn clear_status(&mut self) -> Result<()> {
        self.erase_status();
        self.flush()
    }

    /// Queue the escape sequences that remove the status line.
    fn erase_status(&mut self) {
        if self.status_visible {
            self.output.clear_line();
            self.output.cursor_up();
            self.output.cursor_column(self.column);
            self.status_visible = false;
        }
    }

    /// Queue one grapheme, wrapping before it if it would not fit.
    #[allow(clippy::cast_possible_truncation)]
    fn write_grapheme(&mut self, grapheme: &str) {
        if grapheme == "\n" || grapheme == "\r\n" {
            self.output.newline();
            self.column = 0;
            return;
        }

        let width = UnicodeWidthStr::width(grapheme).min(usize::from(u16::MAX)) as u16;
        if self.column > 0 && self.column.saturating_add(width) > self.width {
            self.output.newline();
            self.column = 0;
        }

        self.output.write_str(grapheme);
        self.column = self.column.saturating_add(width);
    }

    /// Flush queued output in one write.
    fn flush(&mut self) -> Result<()> {
        if !self.output.is_empty() {
            self.output.flush_to(&mut self.writer)?;
            self.output.clear();
        }
        Ok(())
    }
}

impl<W: Write> Drop for ConsoleDisplay<W> {
    fn drop(&mut self) {
        self.erase_status();
        self.output.reset_attrs();
        self.output.cursor_show();
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(console: &ConsoleDisplay<Vec<u8>>) -> String {
        String::from_utf8_lossy(console.writer()).into_owned()
    }

    #[test]
    fn test_console_hides_cursor_on_start() {
        let console = ConsoleDisplay::with_writer(Vec::new(), 80).unwrap();
        assert_eq!(text(&console), "\x1b[?25l");
    }

    #[test]
    fn test_console_writes_only_new_suffix() {
        let mut console = ConsoleDisplay::with_writer(Vec::new(), 80).unwrap();
        console.render("Hello").unwrap();
        console.render("Hello").unwrap();
        console.render("Hello world").unwrap();

        assert_eq!(text(&console), "\x1b[?25lHello world");
        assert_eq!(console.shown(), "Hello world");
    }

    #[test]
    fn test_console_soft_wraps_by_columns() {
        let mut console = ConsoleDisplay::with_writer(Vec::new(), 4).unwrap();
        console.render("abcdef").unwrap();
        assert!(text(&console).ends_with("abcd\r\nef"));

        // Wide characters take two columns
        let mut console = ConsoleDisplay::with_writer(Vec::new(), 4).unwrap();
        console.render("日本語").unwrap();
        assert!(text(&console).ends_with("日本\r\n語"));
    }

    #[test]
    fn test_console_hard_newlines() {
        let mut console = ConsoleDisplay::with_writer(Vec::new(), 80).unwrap();
        console.render("a\nb").unwrap();
        assert!(text(&console).ends_with("a\r\nb"));
    }

    #[test]
    fn test_console_new_session_starts_new_block() {
        let mut console = ConsoleDisplay::with_writer(Vec::new(), 80).unwrap();
        console.render("first").unwrap();
        console.render("second").unwrap();

        assert!(text(&console).ends_with("first\r\n\r\nsecond"));
        assert_eq!(console.shown(), "second");
    }

    #[test]
    fn test_console_status_is_erased_before_text() {
        let mut console = ConsoleDisplay::with_writer(Vec::new(), 80).unwrap();
        console.render("ab").unwrap();
        console.show_status("Generating…").unwrap();
        console.show_status("Still generating…").unwrap();
        console.render("abc").unwrap();

        let out = text(&console);
        assert!(out.contains("\r\n\x1b[3mGenerating…\x1b[0m"));
        assert!(out.contains("\r\x1b[2K\x1b[3mStill generating…\x1b[0m"));
        assert!(out.ends_with("\r\x1b[2K\x1b[1A\x1b[3Gc"));
    }
}
