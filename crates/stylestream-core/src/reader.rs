// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Positional character reader.
//!
//! [`TextReader`] owns the normalized input (all `\r\n` and `\r` line
//! endings collapse to `\n` before any reading) and tracks a
//! `(cursor, line, col)` triple. It exposes character-level consumption
//! (`read`, `read_count`, `read_while`, `read_to`) and the two atomic
//! pattern faces the tokenizer is built on: [`TextReader::read_literal`]
//! and [`TextReader::read_pattern`]. Atomicity on failure is essential —
//! the tokenizer tries descriptors in priority order, and a failed attempt
//! must leave the reader untouched.

use ecow::EcoString;
use regex::Regex;

use crate::error::ReaderError;
use crate::position::{Position, Span};

/// A line/column-aware reader over normalized stylesheet text.
///
/// # Examples
///
/// ```
/// use stylestream_core::TextReader;
///
/// let mut reader = TextReader::new("a {\n}");
/// assert_eq!(reader.read(), Some('a'));
/// assert_eq!((reader.line(), reader.col()), (1, 2));
/// assert_eq!(reader.read_count(3), " {\n");
/// assert_eq!((reader.line(), reader.col()), (2, 1));
/// ```
pub struct TextReader {
    /// The normalized input.
    input: String,
    /// Byte offset of the next character to read.
    cursor: usize,
    /// 1-based line of the next character.
    line: u32,
    /// 1-based column of the next character.
    col: u32,
}

impl std::fmt::Debug for TextReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextReader")
            .field("position", &Position::new(self.line, self.col))
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl TextReader {
    /// Creates a reader over `text`, normalizing line endings first.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let input = if text.contains('\r') {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text.to_owned()
        };
        Self {
            input,
            cursor: 0,
            line: 1,
            col: 1,
        }
    }

    /// Returns the 1-based line of the next character to be read.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the 1-based column of the next character to be read.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Returns the position of the next character to be read.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// Returns the byte offset of the next character to be read.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "stylesheets over 4GB are not supported"
    )]
    pub const fn offset(&self) -> u32 {
        self.cursor as u32
    }

    /// Returns `true` when the whole input has been consumed.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.cursor >= self.input.len()
    }

    /// Returns the unread tail of the input.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.cursor..]
    }

    /// Peeks at the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Reads the next character, advancing cursor, line, and column.
    ///
    /// Returns `None` at end of input; reading never fails.
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Reads up to `count` characters (fewer at end of input).
    pub fn read_count(&mut self, count: usize) -> EcoString {
        let mut text = EcoString::new();
        for _ in 0..count {
            match self.read() {
                Some(c) => text.push(c),
                None => break,
            }
        }
        text
    }

    /// Reads characters while `predicate` holds, leaving the first
    /// non-matching character unread.
    pub fn read_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> EcoString {
        let mut text = EcoString::new();
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.read();
            text.push(c);
        }
        text
    }

    /// Reads characters until the consumed text ends with `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::UnexpectedEof`] if the pattern never appears;
    /// the reader is then positioned at end of input.
    pub fn read_to(&mut self, pattern: &str) -> Result<EcoString, ReaderError> {
        let mut text = EcoString::new();
        while !text.as_str().ends_with(pattern) {
            match self.read() {
                Some(c) => text.push(c),
                None => {
                    return Err(ReaderError::UnexpectedEof {
                        pattern: pattern.into(),
                        position: self.position(),
                        span: Span::new(self.offset(), self.offset()),
                    });
                }
            }
        }
        Ok(text)
    }

    /// Consumes `text` if the remaining input starts with it.
    ///
    /// Returns `None` without touching the reader otherwise.
    pub fn read_literal(&mut self, text: &str) -> Option<EcoString> {
        if self.remaining().starts_with(text) {
            Some(self.consume(text.len()))
        } else {
            None
        }
    }

    /// Consumes the prefix matched by `pattern` (which must be anchored
    /// with `^`) against the remaining input.
    ///
    /// Returns `None` without touching the reader when the pattern does not
    /// match at the cursor. A zero-length match is treated as no match so
    /// the tokenizer can never stall.
    pub fn read_pattern(&mut self, pattern: &Regex) -> Option<EcoString> {
        let found = pattern.find(self.remaining())?;
        debug_assert_eq!(found.start(), 0, "token patterns must be anchored");
        if found.is_empty() {
            return None;
        }
        Some(self.consume(found.end()))
    }

    /// Consumes exactly `len` bytes, updating line/column accounting.
    fn consume(&mut self, len: usize) -> EcoString {
        let text = EcoString::from(&self.input[self.cursor..self.cursor + len]);
        self.cursor += len;
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        text
    }
}
