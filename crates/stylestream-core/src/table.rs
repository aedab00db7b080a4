// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The static CSS token table.
//!
//! Tokenization is table-driven: a [`TokenTable`] is an ordered list of
//! [`TokenDescriptor`]s, and the token stream tries each descriptor's
//! [`Matcher`] against the reader until one consumes input. Ordering
//! encodes priority — longer and more specific tokens come before their
//! prefixes (`*=` before `*`, `-->` before `-`, `@top-left-corner` before
//! `@top-left`, `url(` before `FUNCTION` before `IDENT`, the dimension
//! families before `DIMENSION` before `NUMBER`, `:not(` before `:`).
//!
//! All regular expressions are composed from the CSS 2.1 lexical macros
//! (`ident`, `nmchar`, `num`, `string`, …) and compiled exactly once, at
//! first use of [`css_table`]. Every pattern is anchored with `^` so that
//! matching against the reader's remaining input is equivalent to anchored
//! matching at the cursor.

use ecow::EcoString;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::reader::TextReader;
use crate::token::TokenKind;

/// How a descriptor recognizes its token at the reader's cursor.
#[derive(Debug)]
pub enum Matcher {
    /// An exact literal prefix.
    Literal(&'static str),
    /// An anchored, precompiled pattern.
    Pattern(Regex),
    /// A custom match function; returns the matched text or `None`
    /// without consuming.
    Custom(fn(&mut TextReader) -> Option<EcoString>),
}

impl Matcher {
    /// Attempts this matcher at the reader's cursor.
    ///
    /// On success the reader has advanced past exactly the returned text;
    /// on failure the reader is untouched.
    pub fn try_match(&self, reader: &mut TextReader) -> Option<EcoString> {
        match self {
            Self::Literal(text) => reader.read_literal(text),
            Self::Pattern(pattern) => reader.read_pattern(pattern),
            Self::Custom(f) => f(reader),
        }
    }
}

/// One entry in the token table.
#[derive(Debug)]
pub struct TokenDescriptor {
    /// The kind produced on a successful match.
    pub kind: TokenKind,
    /// The recognizer.
    pub matcher: Matcher,
    /// Whether tokens of this kind are elided from the grammar's view
    /// (CSS comments are the only hidden kind).
    pub hide: bool,
}

impl TokenDescriptor {
    fn literal(kind: TokenKind, text: &'static str) -> Self {
        Self {
            kind,
            matcher: Matcher::Literal(text),
            hide: false,
        }
    }

    fn pattern(kind: TokenKind, source: &str) -> Self {
        Self {
            kind,
            matcher: Matcher::Pattern(compile(source)),
            hide: false,
        }
    }

    fn hidden_pattern(kind: TokenKind, source: &str) -> Self {
        Self {
            kind,
            matcher: Matcher::Pattern(compile(source)),
            hide: true,
        }
    }
}

/// An ordered token table.
#[derive(Debug)]
pub struct TokenTable {
    descriptors: Vec<TokenDescriptor>,
}

impl TokenTable {
    /// Returns the descriptors in priority order. Entry 0 is always EOF.
    #[must_use]
    pub fn descriptors(&self) -> &[TokenDescriptor] {
        &self.descriptors
    }

    /// Builds the CSS token table.
    ///
    /// Prefer [`css_table`], which builds it once and caches it.
    #[must_use]
    pub fn css() -> Self {
        let nonascii = r"[^\x00-\x7f]";
        let unicode = r"\\[0-9a-f]{1,6}(?:\r\n|[ \t\r\n\f])?";
        let escape = format!(r"(?:{unicode}|\\[^\r\n\f0-9a-f])");
        let nmstart = format!(r"(?:[_a-z]|{nonascii}|{escape})");
        let nmchar = format!(r"(?:[_a-z0-9-]|{nonascii}|{escape})");
        let ident = format!(r"-?{nmstart}{nmchar}*");
        let name = format!(r"{nmchar}+");
        let num = r"(?:[0-9]*\.[0-9]+|[0-9]+)";
        let nl = r"(?:\n|\r\n|\r|\f)";
        let string1 = format!(r#""(?:[^\n\r\f\\"]|\\{nl}|{escape})*""#);
        let string2 = format!(r"'(?:[^\n\r\f\\']|\\{nl}|{escape})*'");
        let string = format!(r"(?:{string1}|{string2})");
        let w = r"[ \t\r\n\f]*";
        let urlchar = format!(r"(?:[!#$%&*-~]|{nonascii}|{escape})");

        let descriptors = vec![
            // Descriptor 0 is reserved for EOF; its matcher reports a
            // single-space sentinel at end of input and nothing otherwise.
            TokenDescriptor {
                kind: TokenKind::Eof,
                matcher: Matcher::Custom(match_eof),
                hide: false,
            },
            TokenDescriptor::pattern(TokenKind::S, r"[ \t\r\n\f]+"),
            TokenDescriptor::hidden_pattern(
                TokenKind::Comment,
                r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/",
            ),
            TokenDescriptor::literal(TokenKind::Cdo, "<!--"),
            TokenDescriptor::literal(TokenKind::Cdc, "-->"),
            TokenDescriptor::literal(TokenKind::Includes, "~="),
            TokenDescriptor::literal(TokenKind::Dashmatch, "|="),
            TokenDescriptor::literal(TokenKind::PrefixMatch, "^="),
            TokenDescriptor::literal(TokenKind::SuffixMatch, "$="),
            TokenDescriptor::literal(TokenKind::SubstringMatch, "*="),
            TokenDescriptor::pattern(
                TokenKind::Uri,
                &format!(r"url\({w}{string}{w}\)|url\({w}{urlchar}*{w}\)"),
            ),
            TokenDescriptor::pattern(
                TokenKind::IeFunction,
                &format!(r"progid:{ident}(?:\.{ident})*\("),
            ),
            TokenDescriptor::pattern(TokenKind::Function, &format!(r"{ident}\(")),
            TokenDescriptor::pattern(
                TokenKind::UnicodeRange,
                r"u\+[0-9a-f?]{1,6}(?:-[0-9a-f?]{1,6})?",
            ),
            TokenDescriptor::pattern(TokenKind::Ident, &ident),
            TokenDescriptor::pattern(TokenKind::String, &string),
            TokenDescriptor::pattern(TokenKind::Hash, &format!("#{name}")),
            TokenDescriptor::pattern(TokenKind::ImportantSym, &format!("!{w}important")),
            TokenDescriptor::literal(TokenKind::CharsetSym, "@charset "),
            TokenDescriptor::pattern(TokenKind::NamespaceSym, "@namespace"),
            TokenDescriptor::pattern(TokenKind::ImportSym, "@import"),
            TokenDescriptor::pattern(TokenKind::MediaSym, "@media"),
            TokenDescriptor::pattern(TokenKind::PageSym, "@page"),
            TokenDescriptor::pattern(TokenKind::FontFaceSym, "@font-face"),
            // Corner boxes first: they share prefixes with the side boxes.
            TokenDescriptor::pattern(TokenKind::TopLeftCornerSym, "@top-left-corner"),
            TokenDescriptor::pattern(TokenKind::TopLeftSym, "@top-left"),
            TokenDescriptor::pattern(TokenKind::TopCenterSym, "@top-center"),
            TokenDescriptor::pattern(TokenKind::TopRightCornerSym, "@top-right-corner"),
            TokenDescriptor::pattern(TokenKind::TopRightSym, "@top-right"),
            TokenDescriptor::pattern(TokenKind::BottomLeftCornerSym, "@bottom-left-corner"),
            TokenDescriptor::pattern(TokenKind::BottomLeftSym, "@bottom-left"),
            TokenDescriptor::pattern(TokenKind::BottomCenterSym, "@bottom-center"),
            TokenDescriptor::pattern(TokenKind::BottomRightCornerSym, "@bottom-right-corner"),
            TokenDescriptor::pattern(TokenKind::BottomRightSym, "@bottom-right"),
            TokenDescriptor::pattern(TokenKind::LeftTopSym, "@left-top"),
            TokenDescriptor::pattern(TokenKind::LeftMiddleSym, "@left-middle"),
            TokenDescriptor::pattern(TokenKind::LeftBottomSym, "@left-bottom"),
            TokenDescriptor::pattern(TokenKind::RightTopSym, "@right-top"),
            TokenDescriptor::pattern(TokenKind::RightMiddleSym, "@right-middle"),
            TokenDescriptor::pattern(TokenKind::RightBottomSym, "@right-bottom"),
            TokenDescriptor::pattern(TokenKind::Resolution, &format!("{num}(?:dpi|dpcm)")),
            TokenDescriptor::pattern(TokenKind::Freq, &format!("{num}(?:hz|khz)")),
            TokenDescriptor::pattern(TokenKind::Time, &format!("{num}(?:ms|s)")),
            TokenDescriptor::pattern(TokenKind::Angle, &format!("{num}(?:deg|rad|grad)")),
            TokenDescriptor::pattern(TokenKind::Ems, &format!("{num}em")),
            TokenDescriptor::pattern(TokenKind::Exs, &format!("{num}ex")),
            TokenDescriptor::pattern(TokenKind::Length, &format!("{num}(?:px|cm|mm|in|pt|pc)")),
            TokenDescriptor::pattern(TokenKind::Percentage, &format!("{num}%")),
            TokenDescriptor::pattern(TokenKind::Dimension, &format!("{num}{ident}")),
            TokenDescriptor::pattern(TokenKind::Number, num),
            TokenDescriptor::pattern(TokenKind::Not, r":not\("),
            TokenDescriptor::literal(TokenKind::Comma, ","),
            TokenDescriptor::literal(TokenKind::Colon, ":"),
            TokenDescriptor::literal(TokenKind::Semicolon, ";"),
            TokenDescriptor::literal(TokenKind::Dot, "."),
            TokenDescriptor::literal(TokenKind::Star, "*"),
            TokenDescriptor::literal(TokenKind::Plus, "+"),
            TokenDescriptor::literal(TokenKind::Minus, "-"),
            TokenDescriptor::literal(TokenKind::Slash, "/"),
            TokenDescriptor::literal(TokenKind::Equals, "="),
            TokenDescriptor::literal(TokenKind::Pipe, "|"),
            TokenDescriptor::literal(TokenKind::Greater, ">"),
            TokenDescriptor::literal(TokenKind::Tilde, "~"),
            TokenDescriptor::literal(TokenKind::LBrace, "{"),
            TokenDescriptor::literal(TokenKind::RBrace, "}"),
            TokenDescriptor::literal(TokenKind::LBracket, "["),
            TokenDescriptor::literal(TokenKind::RBracket, "]"),
            TokenDescriptor::literal(TokenKind::LParen, "("),
            TokenDescriptor::literal(TokenKind::RParen, ")"),
        ];

        Self { descriptors }
    }
}

/// Compiles a case-insensitive pattern anchored at the cursor.
fn compile(source: &str) -> Regex {
    Regex::new(&format!("(?i)^(?:{source})")).expect("token table pattern must compile")
}

/// EOF reports a single-space sentinel at end of input; the resulting
/// token carries an empty value.
fn match_eof(reader: &mut TextReader) -> Option<EcoString> {
    if reader.eof() {
        Some(EcoString::from(" "))
    } else {
        None
    }
}

static CSS_TABLE: Lazy<TokenTable> = Lazy::new(TokenTable::css);

/// Returns the shared CSS token table, building it on first use.
#[must_use]
pub fn css_table() -> &'static TokenTable {
    &CSS_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs the table match loop once against `input`.
    fn first_match(input: &str) -> Option<(TokenKind, EcoString)> {
        let mut reader = TextReader::new(input);
        for descriptor in css_table().descriptors() {
            if let Some(value) = descriptor.matcher.try_match(&mut reader) {
                return Some((descriptor.kind, value));
            }
        }
        None
    }

    #[track_caller]
    fn assert_token(input: &str, kind: TokenKind, value: &str) {
        let (found, text) = first_match(input).expect("no descriptor matched");
        assert_eq!(found, kind, "wrong kind for {input:?}");
        assert_eq!(text, value, "wrong text for {input:?}");
    }

    #[test]
    fn eof_is_descriptor_zero() {
        let table = css_table();
        assert_eq!(table.descriptors()[0].kind, TokenKind::Eof);
        assert_token("", TokenKind::Eof, " ");
    }

    #[test]
    fn specific_tokens_win_over_prefixes() {
        assert_token("*= b", TokenKind::SubstringMatch, "*=");
        assert_token("* b", TokenKind::Star, "*");
        assert_token("--> x", TokenKind::Cdc, "-->");
        assert_token("-x", TokenKind::Ident, "-x");
        assert_token("- x", TokenKind::Minus, "-");
        assert_token("|=", TokenKind::Dashmatch, "|=");
        assert_token("|", TokenKind::Pipe, "|");
        assert_token("~=", TokenKind::Includes, "~=");
        assert_token("~ a", TokenKind::Tilde, "~");
    }

    #[test]
    fn margin_corner_boxes_win_over_side_boxes() {
        assert_token("@top-left-corner", TokenKind::TopLeftCornerSym, "@top-left-corner");
        assert_token("@top-left {", TokenKind::TopLeftSym, "@top-left");
        assert_token("@bottom-right-corner", TokenKind::BottomRightCornerSym, "@bottom-right-corner");
        assert_token("@right-middle", TokenKind::RightMiddleSym, "@right-middle");
    }

    #[test]
    fn at_rule_symbols() {
        assert_token("@import url(a.css);", TokenKind::ImportSym, "@import");
        assert_token("@charset \"utf-8\";", TokenKind::CharsetSym, "@charset ");
        assert_token("@MEDIA print", TokenKind::MediaSym, "@MEDIA");
        assert_token("@font-face {", TokenKind::FontFaceSym, "@font-face");
        assert_token("@namespace svg", TokenKind::NamespaceSym, "@namespace");
    }

    #[test]
    fn uri_wins_over_function_and_ident() {
        assert_token("url(foo.png)", TokenKind::Uri, "url(foo.png)");
        assert_token("url( \"a b\" )", TokenKind::Uri, "url( \"a b\" )");
        assert_token("url(a b)", TokenKind::Function, "url(");
        assert_token("rgba(1,2,3)", TokenKind::Function, "rgba(");
        assert_token("red", TokenKind::Ident, "red");
    }

    #[test]
    fn ie_function_head() {
        assert_token(
            "progid:DXImageTransform.Microsoft.gradient(x=1)",
            TokenKind::IeFunction,
            "progid:DXImageTransform.Microsoft.gradient(",
        );
        assert_token("progid", TokenKind::Ident, "progid");
    }

    #[test]
    fn dimension_families() {
        assert_token("12px", TokenKind::Length, "12px");
        assert_token(".5em", TokenKind::Ems, ".5em");
        assert_token("2ex", TokenKind::Exs, "2ex");
        assert_token("90deg", TokenKind::Angle, "90deg");
        assert_token("200ms", TokenKind::Time, "200ms");
        assert_token("4s", TokenKind::Time, "4s");
        assert_token("44khz", TokenKind::Freq, "44khz");
        assert_token("300dpi", TokenKind::Resolution, "300dpi");
        assert_token("50%", TokenKind::Percentage, "50%");
        assert_token("3vw", TokenKind::Dimension, "3vw");
        assert_token("42", TokenKind::Number, "42");
        assert_token(".5", TokenKind::Number, ".5");
    }

    #[test]
    fn unicode_range_wins_over_ident() {
        assert_token("u+a5", TokenKind::UnicodeRange, "u+a5");
        assert_token("U+0-7F", TokenKind::UnicodeRange, "U+0-7F");
        assert_token("U+59?", TokenKind::UnicodeRange, "U+59?");
        assert_token("u ", TokenKind::Ident, "u");
    }

    #[test]
    fn strings_and_hashes() {
        assert_token("\"hi\"", TokenKind::String, "\"hi\"");
        assert_token("'hi'", TokenKind::String, "'hi'");
        assert_token("#abc", TokenKind::Hash, "#abc");
        assert_token("#nav-bar", TokenKind::Hash, "#nav-bar");
    }

    #[test]
    fn important_allows_interior_whitespace() {
        assert_token("!important", TokenKind::ImportantSym, "!important");
        assert_token("! important", TokenKind::ImportantSym, "! important");
        assert_token("!IMPORTANT", TokenKind::ImportantSym, "!IMPORTANT");
    }

    #[test]
    fn not_wins_over_colon() {
        assert_token(":not(a)", TokenKind::Not, ":not(");
        assert_token(":hover", TokenKind::Colon, ":");
    }

    #[test]
    fn comments_are_hidden() {
        let table = css_table();
        let comment = table
            .descriptors()
            .iter()
            .find(|d| d.kind == TokenKind::Comment)
            .unwrap();
        assert!(comment.hide);
        assert_token("/* x */ a", TokenKind::Comment, "/* x */");
    }

    #[test]
    fn escaped_identifiers() {
        // The space terminates the escape and the ident keeps going.
        assert_token(r"\26 b", TokenKind::Ident, r"\26 b");
        assert_token(r"fo\6Fd", TokenKind::Ident, r"fo\6Fd");
    }

    #[test]
    fn unrecognized_characters_match_nothing() {
        assert_eq!(first_match("%"), None);
        assert_eq!(first_match("&"), None);
    }
}
