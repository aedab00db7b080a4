// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for CSS lexical analysis.
//!
//! [`TokenKind`] enumerates every token the CSS tokenizer can produce:
//! the CSS 2.1 core set, the CSS3 selector match operators, the at-rule
//! symbols (including the sixteen paged-media margin boxes), the numeric
//! dimension families, and the two out-of-band kinds [`TokenKind::Eof`]
//! and [`TokenKind::Unknown`] (an unrecognized character, surfaced so the
//! grammar can report a precise error instead of the tokenizer failing).
//!
//! A [`Token`] pairs a kind with its matched text and its start/end
//! positions. Position information is carried through every token; errors
//! always cite the offending token, never the reader's current state.

use ecow::EcoString;

use crate::position::{Position, Span};

/// The kind of a CSS token.
///
/// Variants correspond one-to-one with descriptors in the token table; the
/// table's ordering (not this enum's) encodes match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Descriptor 0 in the token table.
    Eof,
    /// A single character no descriptor recognized.
    Unknown,
    /// A run of whitespace. Significant to the grammar (descendant
    /// combinators, value separation), so never hidden.
    S,
    /// A CSS comment. Hidden: never surfaces to the grammar.
    Comment,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    /// `~=`
    Includes,
    /// `|=`
    Dashmatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
    /// A quoted string, quotes included.
    String,
    /// An identifier.
    Ident,
    /// `#` followed by a name: an id selector or a hex color candidate.
    Hash,
    /// `@import`
    ImportSym,
    /// `@page`
    PageSym,
    /// `@media`
    MediaSym,
    /// `@font-face`
    FontFaceSym,
    /// `@charset ` (trailing space included, case-sensitive).
    CharsetSym,
    /// `@namespace`
    NamespaceSym,
    /// `!important`, optional whitespace after the `!`.
    ImportantSym,
    /// `@top-left-corner`
    TopLeftCornerSym,
    /// `@top-left`
    TopLeftSym,
    /// `@top-center`
    TopCenterSym,
    /// `@top-right-corner`
    TopRightCornerSym,
    /// `@top-right`
    TopRightSym,
    /// `@bottom-left-corner`
    BottomLeftCornerSym,
    /// `@bottom-left`
    BottomLeftSym,
    /// `@bottom-center`
    BottomCenterSym,
    /// `@bottom-right-corner`
    BottomRightCornerSym,
    /// `@bottom-right`
    BottomRightSym,
    /// `@left-top`
    LeftTopSym,
    /// `@left-middle`
    LeftMiddleSym,
    /// `@left-bottom`
    LeftBottomSym,
    /// `@right-top`
    RightTopSym,
    /// `@right-middle`
    RightMiddleSym,
    /// `@right-bottom`
    RightBottomSym,
    /// `U+A5`, `U+0-7F`, `U+59?` and friends.
    UnicodeRange,
    /// A number with a resolution unit: `dpi`, `dpcm`.
    Resolution,
    /// A number with a frequency unit: `hz`, `khz`.
    Freq,
    /// A number with a time unit: `ms`, `s`.
    Time,
    /// A number with an angle unit: `deg`, `rad`, `grad`.
    Angle,
    /// A number with the `em` unit.
    Ems,
    /// A number with the `ex` unit.
    Exs,
    /// A number with an absolute length unit: `px`, `cm`, `mm`, `in`,
    /// `pt`, `pc`.
    Length,
    /// A number followed by `%`.
    Percentage,
    /// A number with an unrecognized unit.
    Dimension,
    /// A bare number.
    Number,
    /// `url(...)`, including the wrapper.
    Uri,
    /// An identifier immediately followed by `(`.
    Function,
    /// An IE filter function head: `progid:DXImageTransform...(`.
    IeFunction,
    /// `:not(`
    Not,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `/`
    Slash,
    /// `=`
    Equals,
    /// `|`
    Pipe,
    /// `>`
    Greater,
    /// `~`
    Tilde,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl TokenKind {
    /// Returns the grammar-facing name of this token kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Unknown => "UNKNOWN",
            Self::S => "S",
            Self::Comment => "COMMENT",
            Self::Cdo => "CDO",
            Self::Cdc => "CDC",
            Self::Includes => "INCLUDES",
            Self::Dashmatch => "DASHMATCH",
            Self::PrefixMatch => "PREFIXMATCH",
            Self::SuffixMatch => "SUFFIXMATCH",
            Self::SubstringMatch => "SUBSTRINGMATCH",
            Self::String => "STRING",
            Self::Ident => "IDENT",
            Self::Hash => "HASH",
            Self::ImportSym => "IMPORT_SYM",
            Self::PageSym => "PAGE_SYM",
            Self::MediaSym => "MEDIA_SYM",
            Self::FontFaceSym => "FONT_FACE_SYM",
            Self::CharsetSym => "CHARSET_SYM",
            Self::NamespaceSym => "NAMESPACE_SYM",
            Self::ImportantSym => "IMPORTANT_SYM",
            Self::TopLeftCornerSym => "TOPLEFTCORNER_SYM",
            Self::TopLeftSym => "TOPLEFT_SYM",
            Self::TopCenterSym => "TOPCENTER_SYM",
            Self::TopRightCornerSym => "TOPRIGHTCORNER_SYM",
            Self::TopRightSym => "TOPRIGHT_SYM",
            Self::BottomLeftCornerSym => "BOTTOMLEFTCORNER_SYM",
            Self::BottomLeftSym => "BOTTOMLEFT_SYM",
            Self::BottomCenterSym => "BOTTOMCENTER_SYM",
            Self::BottomRightCornerSym => "BOTTOMRIGHTCORNER_SYM",
            Self::BottomRightSym => "BOTTOMRIGHT_SYM",
            Self::LeftTopSym => "LEFTTOP_SYM",
            Self::LeftMiddleSym => "LEFTMIDDLE_SYM",
            Self::LeftBottomSym => "LEFTBOTTOM_SYM",
            Self::RightTopSym => "RIGHTTOP_SYM",
            Self::RightMiddleSym => "RIGHTMIDDLE_SYM",
            Self::RightBottomSym => "RIGHTBOTTOM_SYM",
            Self::UnicodeRange => "UNICODE_RANGE",
            Self::Resolution => "RESOLUTION",
            Self::Freq => "FREQ",
            Self::Time => "TIME",
            Self::Angle => "ANGLE",
            Self::Ems => "EMS",
            Self::Exs => "EXS",
            Self::Length => "LENGTH",
            Self::Percentage => "PERCENTAGE",
            Self::Dimension => "DIMENSION",
            Self::Number => "NUMBER",
            Self::Uri => "URI",
            Self::Function => "FUNCTION",
            Self::IeFunction => "IE_FUNCTION",
            Self::Not => "NOT",
            Self::Comma => "COMMA",
            Self::Colon => "COLON",
            Self::Semicolon => "SEMICOLON",
            Self::Dot => "DOT",
            Self::Star => "STAR",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Slash => "SLASH",
            Self::Equals => "EQUALS",
            Self::Pipe => "PIPE",
            Self::Greater => "GREATER",
            Self::Tilde => "TILDE",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
        }
    }

    /// Looks a token kind up by its grammar-facing name.
    ///
    /// This is the by-name index over the token table; `Unknown` is not
    /// indexed (it never appears in the table).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: &[TokenKind] = &[
            TokenKind::Eof,
            TokenKind::S,
            TokenKind::Comment,
            TokenKind::Cdo,
            TokenKind::Cdc,
            TokenKind::Includes,
            TokenKind::Dashmatch,
            TokenKind::PrefixMatch,
            TokenKind::SuffixMatch,
            TokenKind::SubstringMatch,
            TokenKind::String,
            TokenKind::Ident,
            TokenKind::Hash,
            TokenKind::ImportSym,
            TokenKind::PageSym,
            TokenKind::MediaSym,
            TokenKind::FontFaceSym,
            TokenKind::CharsetSym,
            TokenKind::NamespaceSym,
            TokenKind::ImportantSym,
            TokenKind::TopLeftCornerSym,
            TokenKind::TopLeftSym,
            TokenKind::TopCenterSym,
            TokenKind::TopRightCornerSym,
            TokenKind::TopRightSym,
            TokenKind::BottomLeftCornerSym,
            TokenKind::BottomLeftSym,
            TokenKind::BottomCenterSym,
            TokenKind::BottomRightCornerSym,
            TokenKind::BottomRightSym,
            TokenKind::LeftTopSym,
            TokenKind::LeftMiddleSym,
            TokenKind::LeftBottomSym,
            TokenKind::RightTopSym,
            TokenKind::RightMiddleSym,
            TokenKind::RightBottomSym,
            TokenKind::UnicodeRange,
            TokenKind::Resolution,
            TokenKind::Freq,
            TokenKind::Time,
            TokenKind::Angle,
            TokenKind::Ems,
            TokenKind::Exs,
            TokenKind::Length,
            TokenKind::Percentage,
            TokenKind::Dimension,
            TokenKind::Number,
            TokenKind::Uri,
            TokenKind::Function,
            TokenKind::IeFunction,
            TokenKind::Not,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Dot,
            TokenKind::Star,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::Pipe,
            TokenKind::Greater,
            TokenKind::Tilde,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::LParen,
            TokenKind::RParen,
        ];
        ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Returns `true` if this is the end-of-input marker.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns `true` if this is one of the sixteen paged-media margin-box
    /// symbols.
    #[must_use]
    pub const fn is_margin_sym(self) -> bool {
        matches!(
            self,
            Self::TopLeftCornerSym
                | Self::TopLeftSym
                | Self::TopCenterSym
                | Self::TopRightCornerSym
                | Self::TopRightSym
                | Self::BottomLeftCornerSym
                | Self::BottomLeftSym
                | Self::BottomCenterSym
                | Self::BottomRightCornerSym
                | Self::BottomRightSym
                | Self::LeftTopSym
                | Self::LeftMiddleSym
                | Self::LeftBottomSym
                | Self::RightTopSym
                | Self::RightMiddleSym
                | Self::RightBottomSym
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token: kind, matched text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The matched text. For [`TokenKind::Unknown`], the single character
    /// read; for [`TokenKind::Eof`], empty.
    pub value: EcoString,
    /// Position of the first character of the token.
    pub start: Position,
    /// Position just past the last character of the token.
    pub end: Position,
    /// Byte span of the token in the normalized input.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        value: impl Into<EcoString>,
        start: Position,
        end: Position,
        span: Span,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
            span,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", self.kind.name(), self.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trips_through_from_name() {
        for kind in [
            TokenKind::Eof,
            TokenKind::S,
            TokenKind::Ident,
            TokenKind::CharsetSym,
            TokenKind::TopLeftCornerSym,
            TokenKind::SubstringMatch,
            TokenKind::RParen,
        ] {
            assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn unknown_is_not_indexed_by_name() {
        assert_eq!(TokenKind::from_name("UNKNOWN"), None);
        assert_eq!(TokenKind::from_name("NO_SUCH_TOKEN"), None);
    }

    #[test]
    fn margin_sym_predicate() {
        assert!(TokenKind::TopLeftSym.is_margin_sym());
        assert!(TokenKind::RightBottomSym.is_margin_sym());
        assert!(!TokenKind::PageSym.is_margin_sym());
    }

    #[test]
    fn token_display() {
        let token = Token::new(
            TokenKind::Ident,
            "color",
            Position::new(1, 5),
            Position::new(1, 10),
            Span::new(4, 9),
        );
        assert_eq!(token.to_string(), "IDENT(\"color\")");
    }
}
