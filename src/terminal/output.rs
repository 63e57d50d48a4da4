//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output for one display update is accumulated here, then flushed in
/// a single `write()` syscall so a half-drawn line is never visible.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a few lines of text (1KB).
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Start a new line at column 0.
    #[inline]
    pub fn newline(&mut self) {
        self.data.extend_from_slice(b"\r\n");
    }

    /// Erase the current line and return to column 0.
    #[inline]
    pub fn clear_line(&mut self) {
        self.data.extend_from_slice(b"\r\x1b[2K");
    }

    /// Move the cursor up one line.
    #[inline]
    pub fn cursor_up(&mut self) {
        self.data.extend_from_slice(b"\x1b[1A");
    }

    /// Move the cursor to column `x` (0-indexed) on the current line.
    #[inline]
    pub fn cursor_column(&mut self, x: u16) {
        // CSI col G
        let _ = write!(self.data, "\x1b[{}G", x + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Switch to italic text.
    #[inline]
    pub fn set_italic(&mut self) {
        self.data.extend_from_slice(b"\x1b[3m");
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_buffer_sequences() {
        let mut out = OutputBuffer::new();
        out.cursor_hide();
        out.write_str("hi");
        out.cursor_column(4);
        assert_eq!(out.as_bytes(), b"\x1b[?25lhi\x1b[5G");

        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink.len(), out.len());

        out.clear();
        assert!(out.is_empty());
    }
}
