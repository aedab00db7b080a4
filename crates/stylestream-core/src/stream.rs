// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Generic table-driven token stream.
//!
//! [`TokenStream`] layers tokenization over a [`TextReader`] and a static
//! [`TokenTable`], and adds the machinery a predictive parser needs:
//! bounded bidirectional lookahead ([`TokenStream::la`] /
//! [`TokenStream::lt`]), transparent push-back ([`TokenStream::unget`]),
//! speculative matching ([`TokenStream::match_token`] /
//! [`TokenStream::must_match`]), and panic-mode resynchronization
//! ([`TokenStream::advance`]).
//!
//! # Lookahead buffer
//!
//! Tokens are kept in a ring buffer of at most [`MAX_LOOKAHEAD`] entries.
//! `lt_index` is the insertion slot for the next token; `lt_index ==
//! buffer length` means no unconsumed lookahead is buffered (normal
//! forward progress), while a smaller value means already-buffered tokens
//! are being re-served after `unget`. Any failed `match_token` leaves the
//! observable state — next `get` result, positions, current token —
//! identical to the pre-call state.

use std::collections::VecDeque;

use crate::error::SyntaxError;
use crate::reader::TextReader;
use crate::table::{TokenTable, css_table};
use crate::token::{Token, TokenKind};

/// Maximum lookahead depth, and the capacity of the token ring buffer.
pub const MAX_LOOKAHEAD: usize = 15;

/// A tokenizer with bounded lookahead/lookback over a character reader.
///
/// # Examples
///
/// ```
/// use stylestream_core::{TokenKind, TokenStream};
///
/// let mut stream = TokenStream::css("a { }");
/// assert_eq!(stream.get(), TokenKind::Ident);
/// assert_eq!(stream.token().value, "a");
///
/// stream.unget();
/// assert_eq!(stream.get(), TokenKind::Ident);
/// assert_eq!(stream.token().value, "a");
/// ```
#[derive(Debug)]
pub struct TokenStream {
    reader: TextReader,
    table: &'static TokenTable,
    /// Ring buffer of recently produced tokens.
    lt: VecDeque<Token>,
    /// Insertion slot for the next token; see the module docs.
    lt_index: usize,
}

impl TokenStream {
    /// Creates a stream over `reader` using `table`.
    #[must_use]
    pub fn new(reader: TextReader, table: &'static TokenTable) -> Self {
        Self {
            reader,
            table,
            lt: VecDeque::with_capacity(MAX_LOOKAHEAD + 1),
            lt_index: 0,
        }
    }

    /// Creates a stream over raw text using the CSS token table.
    #[must_use]
    pub fn css(input: &str) -> Self {
        Self::new(TextReader::new(input), css_table())
    }

    /// Consumes and returns the kind of the next token.
    ///
    /// Hidden tokens (comments) are skipped; at end of input this returns
    /// [`TokenKind::Eof`] indefinitely. Unrecognized characters produce
    /// [`TokenKind::Unknown`] tokens rather than failing, so the grammar
    /// can report a precise error later.
    pub fn get(&mut self) -> TokenKind {
        // Re-serve buffered lookahead after unget.
        if self.lt_index < self.lt.len() {
            let kind = self.lt[self.lt_index].kind;
            self.lt_index += 1;
            return kind;
        }

        let token = self.next_token();
        let kind = token.kind;
        self.lt.push_back(token);
        if self.lt.len() > MAX_LOOKAHEAD {
            self.lt.pop_front();
        }
        self.lt_index = self.lt.len();
        kind
    }

    /// Tokenizes the next non-hidden token from the reader.
    fn next_token(&mut self) -> Token {
        loop {
            let start = self.reader.position();
            let start_offset = self.reader.offset();

            let mut matched = None;
            for descriptor in self.table.descriptors() {
                if let Some(value) = descriptor.matcher.try_match(&mut self.reader) {
                    matched = Some((descriptor.kind, descriptor.hide, value));
                    break;
                }
            }

            let (kind, hide, value) = match matched {
                Some(m) => m,
                None => {
                    // No descriptor claimed the character: emit it as-is.
                    let c = self
                        .reader
                        .read()
                        .expect("EOF descriptor matches at end of input");
                    (TokenKind::Unknown, false, c.into())
                }
            };

            if hide {
                continue;
            }

            // The EOF sentinel text never becomes token text.
            let value = if kind == TokenKind::Eof {
                ecow::EcoString::new()
            } else {
                value
            };

            return Token::new(
                kind,
                value,
                start,
                self.reader.position(),
                crate::position::Span::new(start_offset, self.reader.offset()),
            );
        }
    }

    /// Returns the most recently consumed token.
    ///
    /// # Panics
    ///
    /// Panics if no token has been consumed (before the first `get`, or
    /// after ungetting everything back).
    #[must_use]
    pub fn token(&self) -> &Token {
        assert!(self.lt_index > 0, "no current token: nothing has been consumed");
        &self.lt[self.lt_index - 1]
    }

    /// Pushes the current token back so the next `get` re-serves it.
    ///
    /// # Panics
    ///
    /// Panics when there is nothing to unget (nothing consumed, or the
    /// ring buffer has already dropped the token).
    pub fn unget(&mut self) {
        assert!(self.lt_index > 0, "cannot unget: no buffered token");
        self.lt_index -= 1;
    }

    /// Returns the kind of the next token without consuming it.
    #[must_use]
    pub fn peek(&mut self) -> TokenKind {
        self.la(1)
    }

    /// Returns the token kind `k` away from the current position.
    ///
    /// `k == 0` is the current token, positive `k` looks ahead (tokenizing
    /// as needed, then restoring position), negative `k` inspects
    /// already-buffered history.
    ///
    /// # Panics
    ///
    /// Panics on lookahead beyond [`MAX_LOOKAHEAD`], or lookback past what
    /// the ring buffer still holds.
    pub fn la(&mut self, k: isize) -> TokenKind {
        self.lt(k).kind
    }

    /// Returns the token `k` away from the current position; see
    /// [`TokenStream::la`].
    ///
    /// # Panics
    ///
    /// As [`TokenStream::la`].
    pub fn lt(&mut self, k: isize) -> &Token {
        if k > 0 {
            let k = usize::try_from(k).expect("positive");
            assert!(k <= MAX_LOOKAHEAD, "too much lookahead: LA({k})");
            for _ in 0..k {
                self.get();
            }
            for _ in 0..k {
                self.unget();
            }
            &self.lt[self.lt_index + k - 1]
        } else {
            // k == 0 is the current token, k == -1 the same token, -2 the
            // one before it, and so on: inspect lt[lt_index + k].
            let index = if k == 0 {
                assert!(self.lt_index > 0, "no current token: nothing has been consumed");
                self.lt_index - 1
            } else {
                let index = self.lt_index as isize + k;
                assert!(
                    index >= 0 && (index as usize) < self.lt.len(),
                    "too much lookbehind: LA({k})"
                );
                index as usize
            };
            &self.lt[index]
        }
    }

    /// Consumes the next token if its kind is in `kinds`.
    ///
    /// On a miss the token is pushed back and the observable stream state
    /// is unchanged.
    pub fn match_token(&mut self, kinds: &[TokenKind]) -> bool {
        let kind = self.get();
        if kinds.contains(&kind) {
            true
        } else {
            self.unget();
            false
        }
    }

    /// Like [`TokenStream::match_token`], but a miss is a [`SyntaxError`]
    /// citing the position of the next token.
    ///
    /// # Errors
    ///
    /// Returns the error on a mismatch; the stream is left as if by a
    /// failed `match_token`.
    pub fn must_match(&mut self, kinds: &[TokenKind]) -> Result<Token, SyntaxError> {
        if self.match_token(kinds) {
            Ok(self.token().clone())
        } else {
            let mut expected = String::new();
            for (i, kind) in kinds.iter().enumerate() {
                if i > 0 {
                    expected.push_str(" or ");
                }
                expected.push_str(kind.name());
            }
            let found = self.lt(1).clone();
            Err(SyntaxError::expected(&expected, &found))
        }
    }

    /// Panic-mode resynchronization: consumes tokens until one of `kinds`
    /// (or EOF) is consumed, returning that kind.
    pub fn advance(&mut self, kinds: &[TokenKind]) -> TokenKind {
        loop {
            let kind = self.get();
            if kind == TokenKind::Eof || kinds.contains(&kind) {
                return kind;
            }
        }
    }

    /// Returns the grammar-facing name of a token kind.
    #[must_use]
    pub fn token_name(kind: TokenKind) -> &'static str {
        kind.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut stream = TokenStream::css(input);
        let mut kinds = Vec::new();
        loop {
            let kind = stream.get();
            if kind == TokenKind::Eof {
                return kinds;
            }
            kinds.push(kind);
        }
    }

    #[test]
    fn tokenizes_a_simple_rule() {
        assert_eq!(
            kinds("a { color: red; }"),
            vec![
                TokenKind::Ident,
                TokenKind::S,
                TokenKind::LBrace,
                TokenKind::S,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::S,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::S,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn comments_never_surface() {
        assert_eq!(
            kinds("a/* hidden */b"),
            vec![TokenKind::Ident, TokenKind::Ident]
        );
    }

    #[test]
    fn whitespace_is_not_hidden() {
        assert_eq!(kinds(" "), vec![TokenKind::S]);
    }

    #[test]
    fn unrecognized_character_becomes_unknown_token() {
        let mut stream = TokenStream::css("&");
        assert_eq!(stream.get(), TokenKind::Unknown);
        assert_eq!(stream.token().value, "&");
        assert_eq!(stream.get(), TokenKind::Eof);
    }

    #[test]
    fn token_positions_are_one_based() {
        let mut stream = TokenStream::css("ab\ncd");
        stream.get();
        assert_eq!(stream.token().start, Position::new(1, 1));
        assert_eq!(stream.token().end, Position::new(1, 3));
        stream.get(); // newline
        stream.get();
        assert_eq!(stream.token().start, Position::new(2, 1));
    }

    #[test]
    fn unget_reserves_the_same_token() {
        let mut stream = TokenStream::css("a b");
        stream.get();
        let first = stream.token().clone();
        stream.unget();
        assert_eq!(stream.get(), first.kind);
        assert_eq!(*stream.token(), first);
    }

    #[test]
    fn la_is_read_only() {
        let mut stream = TokenStream::css("a { }");
        assert_eq!(stream.la(1), TokenKind::Ident);
        assert_eq!(stream.la(1), TokenKind::Ident);
        assert_eq!(stream.la(3), TokenKind::LBrace);
        assert_eq!(stream.la(1), TokenKind::Ident);
        assert_eq!(stream.get(), TokenKind::Ident);
    }

    #[test]
    fn la_zero_and_negative_inspect_history() {
        let mut stream = TokenStream::css("a b");
        stream.get(); // a
        stream.get(); // S
        stream.get(); // b
        assert_eq!(stream.la(0), TokenKind::Ident);
        assert_eq!(stream.la(-1), TokenKind::Ident);
        assert_eq!(stream.la(-2), TokenKind::S);
        assert_eq!(stream.la(-3), TokenKind::Ident);
    }

    #[test]
    fn eof_repeats_forever() {
        let mut stream = TokenStream::css("");
        assert_eq!(stream.get(), TokenKind::Eof);
        assert_eq!(stream.get(), TokenKind::Eof);
        assert_eq!(stream.token().value, "");
    }

    #[test]
    fn match_token_consumes_on_hit() {
        let mut stream = TokenStream::css("a b");
        assert!(stream.match_token(&[TokenKind::Ident]));
        assert_eq!(stream.token().value, "a");
    }

    #[test]
    fn failed_match_leaves_state_unchanged() {
        let mut stream = TokenStream::css("a b");
        stream.get();
        let before = stream.token().clone();
        assert!(!stream.match_token(&[TokenKind::LBrace, TokenKind::Comma]));
        assert_eq!(*stream.token(), before);
        assert_eq!(stream.peek(), TokenKind::S);
    }

    #[test]
    fn must_match_error_cites_the_next_token() {
        let mut stream = TokenStream::css("a ;");
        stream.get();
        stream.get();
        let err = stream.must_match(&[TokenKind::LBrace]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected LBRACE but found ';' at line 1, col 3"
        );
    }

    #[test]
    fn advance_stops_at_sync_set_or_eof() {
        let mut stream = TokenStream::css("a b ; c }");
        assert_eq!(
            stream.advance(&[TokenKind::Semicolon, TokenKind::RBrace]),
            TokenKind::Semicolon
        );
        assert_eq!(
            stream.advance(&[TokenKind::Semicolon, TokenKind::RBrace]),
            TokenKind::RBrace
        );
        assert_eq!(stream.advance(&[TokenKind::Semicolon]), TokenKind::Eof);
    }

    #[test]
    fn buffer_drops_oldest_beyond_capacity() {
        let input = "a ".repeat(20);
        let mut stream = TokenStream::css(&input);
        for _ in 0..20 {
            stream.get();
        }
        // 15 tokens retained; ungetting further is a contract violation.
        for _ in 0..MAX_LOOKAHEAD {
            stream.unget();
        }
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| stream.unget()));
        assert!(result.is_err());
    }

    #[test]
    #[should_panic(expected = "too much lookahead")]
    fn lookahead_beyond_buffer_panics() {
        let mut stream = TokenStream::css("a");
        stream.la(16);
    }

    #[test]
    fn concatenated_values_reconstruct_the_input() {
        let input = "a, .b #c { margin: 0 1px; /* x */ }";
        let mut stream = TokenStream::css(input);
        let mut text = String::new();
        loop {
            if stream.get() == TokenKind::Eof {
                break;
            }
            text.push_str(&stream.token().value);
        }
        assert_eq!(text, input.replace("/* x */", ""));
    }
}
