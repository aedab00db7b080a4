// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the CSS parser.
//!
//! There are exactly two kinds of failure: a [`SyntaxError`] for any grammar
//! violation, and a [`ReaderError`] for a pattern scan that ran off the end
//! of the input. Both carry 1-based source positions; a `ReaderError`
//! converts into a `SyntaxError` so callers only ever observe one error
//! type. Errors integrate with [`miette`] for source-labelled reporting.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::{EcoString, eco_format};
use miette::Diagnostic;
use thiserror::Error;

use crate::position::{Position, Span};
use crate::token::Token;

/// A grammar violation, citing the position of the offending token.
///
/// In non-strict mode these are caught at rule and declaration boundaries
/// and surfaced as [`Event::Error`](crate::Event::Error); in strict mode
/// they propagate out of the parse entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message} at line {line}, col {col}")]
#[diagnostic()]
pub struct SyntaxError {
    /// Human-readable description of the violation.
    pub message: EcoString,
    /// 1-based line of the offending token.
    pub line: u32,
    /// 1-based column of the offending token.
    pub col: u32,
    /// Byte span of the offending token in the normalized input.
    #[label("here")]
    pub span: Span,
}

impl SyntaxError {
    /// Creates a new syntax error at the given position.
    #[must_use]
    pub fn new(message: impl Into<EcoString>, position: Position, span: Span) -> Self {
        Self {
            message: message.into(),
            line: position.line,
            col: position.col,
            span,
        }
    }

    /// Creates an "unexpected token" error citing the token's own position.
    #[must_use]
    pub fn unexpected_token(token: &Token) -> Self {
        Self::new(
            eco_format!("Unexpected token '{}'", token.value),
            token.start,
            token.span,
        )
    }

    /// Creates an "expected X but found Y" error citing `found`'s position.
    #[must_use]
    pub fn expected(description: &str, found: &Token) -> Self {
        Self::new(
            eco_format!("Expected {description} but found '{}'", found.value),
            found.start,
            found.span,
        )
    }

    /// Returns the position the error cites.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }
}

/// A failure in the character reader.
///
/// The only way the reader itself can fail is
/// [`TextReader::read_to`](crate::TextReader::read_to) running out of
/// input before its pattern appears; everything else either succeeds or
/// reports "no match" without consuming.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    /// The input ended before the requested pattern was found.
    #[error("unexpected end of input while scanning for \"{pattern}\"")]
    UnexpectedEof {
        /// The pattern that never appeared.
        pattern: EcoString,
        /// The reader position at end of input.
        position: Position,
        /// Zero-width span at the end of the input.
        span: Span,
    },
}

impl From<ReaderError> for SyntaxError {
    fn from(err: ReaderError) -> Self {
        match err {
            ReaderError::UnexpectedEof {
                pattern,
                position,
                span,
            } => Self::new(
                eco_format!("Unexpected end of input while scanning for \"{pattern}\""),
                position,
                span,
            ),
        }
    }
}
