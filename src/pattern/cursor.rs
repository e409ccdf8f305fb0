//! Code-point cursor over a pattern string.
//!
//! All offsets are **character** (not byte) indices into the pattern.

use super::parser::{PatternError, PatternErrorKind};

pub(super) struct Cursor {
    chars: Vec<char>,
    offset: usize,
}

impl Cursor {
    pub fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            offset: 0,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    /// The character after [`Cursor::peek`].
    pub fn peek2(&self) -> Option<char> {
        self.chars.get(self.offset + 1).copied()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += 1;
        Some(c)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// An error positioned at the current offset.
    pub fn error(&self, kind: PatternErrorKind) -> PatternError {
        PatternError::new(self.offset, kind)
    }
}
