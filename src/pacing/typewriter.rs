//! Typewriter: grapheme-at-a-time reveal of a fixed text.
//!
//! Changing the text first backspaces whatever is on screen, one grapheme
//! per step, then types the new text one grapheme per step. The typewriter
//! owns no timer; [`Typewriter::step`] returns how long the driver should
//! wait before calling it again.

use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Delay between typed graphemes.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(28);

/// Delay between backspaced graphemes.
pub const DEFAULT_BACKSPACING_DELAY: Duration = Duration::from_millis(20);

/// Pause after typing a line break.
pub const DEFAULT_NEWLINE_DELAY: Duration = Duration::from_millis(750);

/// What the typewriter is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypewriterState {
    /// Idle, the full text is on screen.
    #[default]
    Resting,
    /// Revealing the target text.
    Typing,
    /// Erasing the previous text.
    Backspacing,
}

/// Step delays for the typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    /// Delay after each typed grapheme.
    pub typing_delay: Duration,
    /// Delay after each erased grapheme.
    pub backspacing_delay: Duration,
    /// Delay after a typed line break.
    pub newline_delay: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            typing_delay: DEFAULT_TYPING_DELAY,
            backspacing_delay: DEFAULT_BACKSPACING_DELAY,
            newline_delay: DEFAULT_NEWLINE_DELAY,
        }
    }
}

/// Step-driven typewriter effect.
#[derive(Debug, Clone, Default)]
pub struct Typewriter {
    config: TypewriterConfig,
    /// Text being typed.
    target: String,
    /// Byte offset into `target` of the next grapheme to type.
    typed: usize,
    /// What is on screen right now.
    display: String,
    state: TypewriterState,
    last_was_newline: bool,
}

impl Typewriter {
    /// Create an idle typewriter with default delays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle typewriter with custom delays.
    pub fn with_config(config: TypewriterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start transitioning to `text`.
    ///
    /// The current display is erased first, then `text` is typed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.target = text.into();
        self.typed = 0;
        self.last_was_newline = false;
        self.state = TypewriterState::Backspacing;
    }

    /// Advance by one grapheme.
    ///
    /// Returns the delay before the next step, or `None` once resting.
    pub fn step(&mut self) -> Option<Duration> {
        loop {
            match self.state {
                TypewriterState::Resting => return None,
                TypewriterState::Backspacing => {
                    let last = self.display.grapheme_indices(true).next_back().map(|(i, _)| i);
                    if let Some(offset) = last {
                        self.display.truncate(offset);
                        return Some(self.config.backspacing_delay);
                    }
                    self.state = TypewriterState::Typing;
                }
                TypewriterState::Typing => {
                    let Some(grapheme) = self.target[self.typed..].graphemes(true).next() else {
                        self.state = TypewriterState::Resting;
                        return None;
                    };

                    self.display.push_str(grapheme);
                    self.typed += grapheme.len();
                    self.last_was_newline = grapheme.ends_with('\n');

                    return Some(if self.last_was_newline {
                        self.config.newline_delay
                    } else {
                        self.config.typing_delay
                    });
                }
            }
        }
    }

    /// Jump straight to the end of the current transition.
    pub fn skip(&mut self) {
        self.display.clone_from(&self.target);
        self.typed = self.target.len();
        self.last_was_newline = false;
        self.state = TypewriterState::Resting;
    }

    /// Text currently on screen.
    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The text being typed (or already typed).
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> TypewriterState {
        self.state
    }

    /// Whether the typing sound should be playing.
    ///
    /// True while erasing, and while typing except right after a line break.
    pub const fn plays_typing_sound(&self) -> bool {
        match self.state {
            TypewriterState::Resting => false,
            TypewriterState::Backspacing => true,
            TypewriterState::Typing => !self.last_was_newline,
        }
    }

    /// Whether a cursor block should be drawn after the text.
    pub fn shows_cursor(&self) -> bool {
        self.state != TypewriterState::Resting || self.display.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(typewriter: &mut Typewriter) -> Vec<String> {
        let mut frames = Vec::new();
        while typewriter.step().is_some() {
            frames.push(typewriter.display().to_string());
        }
        frames
    }

    #[test]
    fn test_typewriter_starts_resting() {
        let mut typewriter = Typewriter::new();
        assert_eq!(typewriter.state(), TypewriterState::Resting);
        assert_eq!(typewriter.step(), None);
        assert!(typewriter.shows_cursor());
        assert!(!typewriter.plays_typing_sound());
    }

    #[test]
    fn test_typewriter_types_one_grapheme_per_step() {
        let mut typewriter = Typewriter::new();
        typewriter.set_text("Hey");

        let frames = run(&mut typewriter);
        assert_eq!(frames, vec!["H", "He", "Hey"]);
        assert_eq!(typewriter.state(), TypewriterState::Resting);
        assert!(!typewriter.shows_cursor());
    }

    #[test]
    fn test_typewriter_backspaces_before_typing() {
        let mut typewriter = Typewriter::new();
        typewriter.set_text("ab");
        run(&mut typewriter);

        typewriter.set_text("c");
        assert_eq!(typewriter.step(), Some(DEFAULT_BACKSPACING_DELAY));
        assert_eq!(typewriter.display(), "a");
        assert_eq!(typewriter.state(), TypewriterState::Backspacing);
        assert!(typewriter.plays_typing_sound());

        assert_eq!(typewriter.step(), Some(DEFAULT_BACKSPACING_DELAY));
        assert_eq!(typewriter.display(), "");

        // Erasing done, typing starts on the same step
        assert_eq!(typewriter.step(), Some(DEFAULT_TYPING_DELAY));
        assert_eq!(typewriter.display(), "c");
        assert_eq!(typewriter.state(), TypewriterState::Typing);

        assert_eq!(typewriter.step(), None);
        assert_eq!(typewriter.state(), TypewriterState::Resting);
    }

    #[test]
    fn test_typewriter_pauses_after_newline() {
        let mut typewriter = Typewriter::new();
        typewriter.set_text("a\nb");

        assert_eq!(typewriter.step(), Some(DEFAULT_TYPING_DELAY));
        assert_eq!(typewriter.step(), Some(DEFAULT_NEWLINE_DELAY));
        assert!(!typewriter.plays_typing_sound());
        assert_eq!(typewriter.step(), Some(DEFAULT_TYPING_DELAY));
        assert!(typewriter.plays_typing_sound());
    }

    #[test]
    fn test_typewriter_keeps_graphemes_whole() {
        let mut typewriter = Typewriter::new();
        typewriter.set_text("e\u{301}👍🏽");

        let frames = run(&mut typewriter);
        assert_eq!(frames, vec!["e\u{301}", "e\u{301}👍🏽"]);

        typewriter.set_text("");
        let frames = run(&mut typewriter);
        assert_eq!(frames, vec!["e\u{301}", ""]);
    }

    #[test]
    fn test_typewriter_skip() {
        let mut typewriter = Typewriter::new();
        typewriter.set_text("Hello");
        typewriter.step();
        typewriter.skip();

        assert_eq!(typewriter.display(), "Hello");
        assert_eq!(typewriter.state(), TypewriterState::Resting);
        assert_eq!(typewriter.step(), None);
    }

    #[test]
    fn test_typewriter_custom_delays() {
        let mut typewriter = Typewriter::with_config(TypewriterConfig {
            typing_delay: Duration::from_millis(5),
            ..TypewriterConfig::default()
        });
        typewriter.set_text("x");
        assert_eq!(typewriter.step(), Some(Duration::from_millis(5)));
    }
}
