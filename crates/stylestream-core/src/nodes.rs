// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Value objects carried by parse events.
//!
//! These are deliberately simple: text plus source position, with just
//! enough structure (selector parts, media features, value part kinds)
//! for consumers to avoid re-lexing. The parser builds them; it never
//! reads them back.

use ecow::EcoString;

use crate::position::Position;
use crate::token::{Token, TokenKind};

/// A minimal syntactic unit: a run of text and where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxUnit {
    /// The text of the unit.
    pub text: EcoString,
    /// Position of the unit's first character.
    pub position: Position,
}

impl SyntaxUnit {
    /// Creates a new unit.
    #[must_use]
    pub fn new(text: impl Into<EcoString>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// Creates a unit from a token's text and start position.
    #[must_use]
    pub fn from_token(token: &Token) -> Self {
        Self::new(token.value.clone(), token.start)
    }
}

impl std::fmt::Display for SyntaxUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// One CSS3 media query: `only screen and (max-width: 600px)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQuery {
    /// The `only`/`not` modifier, lower-cased, if present.
    pub modifier: Option<EcoString>,
    /// The media type (`screen`, `print`, …), if present.
    pub media_type: Option<SyntaxUnit>,
    /// The parenthesized feature expressions.
    pub features: Vec<MediaFeature>,
    /// Position of the query's first token.
    pub position: Position,
}

impl MediaQuery {
    /// Creates a new media query.
    #[must_use]
    pub fn new(
        modifier: Option<EcoString>,
        media_type: Option<SyntaxUnit>,
        features: Vec<MediaFeature>,
        position: Position,
    ) -> Self {
        Self {
            modifier,
            media_type,
            features,
            position,
        }
    }
}

impl std::fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut need_and = false;
        if let Some(modifier) = &self.modifier {
            write!(f, "{modifier} ")?;
        }
        if let Some(media_type) = &self.media_type {
            write!(f, "{media_type}")?;
            need_and = true;
        }
        for feature in &self.features {
            if need_and {
                f.write_str(" and ")?;
            }
            write!(f, "{feature}")?;
            need_and = true;
        }
        Ok(())
    }
}

/// One media feature expression: `(max-width: 600px)` or `(color)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFeature {
    /// The feature name.
    pub name: SyntaxUnit,
    /// The feature value, if one followed a colon.
    pub value: Option<SyntaxUnit>,
}

impl MediaFeature {
    /// Creates a new media feature.
    #[must_use]
    pub fn new(name: SyntaxUnit, value: Option<SyntaxUnit>) -> Self {
        Self { name, value }
    }
}

impl std::fmt::Display for MediaFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "({}:{})", self.name, value),
            None => write!(f, "({})", self.name),
        }
    }
}

/// The four selector connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorKind {
    /// Significant whitespace.
    Descendant,
    /// `>`
    Child,
    /// `+`
    AdjacentSibling,
    /// `~`
    Sibling,
}

/// A selector connector with its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combinator {
    /// The literal text (a whitespace run for descendant combinators).
    pub text: EcoString,
    /// The combinator kind, derived from the text.
    pub kind: CombinatorKind,
    /// Position of the combinator.
    pub position: Position,
}

impl Combinator {
    /// Creates a combinator, classifying it from its text.
    #[must_use]
    pub fn new(text: impl Into<EcoString>, position: Position) -> Self {
        let text = text.into();
        let kind = match text.as_str() {
            ">" => CombinatorKind::Child,
            "+" => CombinatorKind::AdjacentSibling,
            "~" => CombinatorKind::Sibling,
            _ => CombinatorKind::Descendant,
        };
        Self {
            text,
            kind,
            position,
        }
    }
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// What a [`SelectorSubPart`] contributes to a simple selector sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorSubPartKind {
    /// A type selector or (possibly namespace-prefixed) universal selector.
    ElementName,
    /// `#id`
    Id,
    /// `.class`
    Class,
    /// `[attr=value]`
    Attribute,
    /// `:pseudo`, `::pseudo`, `:fn(...)`
    Pseudo,
    /// `:not(...)`
    Not,
}

/// One piece of a simple selector sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSubPart {
    /// The literal text, including any leading `#`, `.`, `:`, or brackets.
    pub text: EcoString,
    /// What this piece is.
    pub kind: SelectorSubPartKind,
    /// Position of the piece's first character.
    pub position: Position,
    /// For [`SelectorSubPartKind::Not`], the negated argument.
    pub args: Vec<SelectorSubPart>,
}

impl SelectorSubPart {
    /// Creates a new sub-part.
    #[must_use]
    pub fn new(
        text: impl Into<EcoString>,
        kind: SelectorSubPartKind,
        position: Position,
    ) -> Self {
        Self {
            text: text.into(),
            kind,
            position,
            args: Vec::new(),
        }
    }
}

impl std::fmt::Display for SelectorSubPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A simple selector sequence: an optional element name plus modifiers,
/// with no interior whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPart {
    /// The type or universal selector, if the sequence has one.
    pub element_name: Option<SelectorSubPart>,
    /// The id/class/attribute/pseudo/negation modifiers, in order.
    pub modifiers: Vec<SelectorSubPart>,
    /// The full text of the sequence.
    pub text: EcoString,
    /// Position of the sequence's first character.
    pub position: Position,
}

impl std::fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A selector is an alternating run of sequences and combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorComponent {
    /// A simple selector sequence.
    Part(SelectorPart),
    /// A combinator between sequences.
    Combinator(Combinator),
}

impl SelectorComponent {
    /// Returns the position of this component.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Part(part) => part.position,
            Self::Combinator(combinator) => combinator.position,
        }
    }
}

impl std::fmt::Display for SelectorComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Part(part) => part.fmt(f),
            Self::Combinator(combinator) => combinator.fmt(f),
        }
    }
}

/// One full selector (no commas).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// The sequences and combinators, in document order.
    pub parts: Vec<SelectorComponent>,
    /// The reconstructed selector text.
    pub text: EcoString,
    /// Position of the selector's first character.
    pub position: Position,
}

impl Selector {
    /// Creates a selector from its components.
    ///
    /// # Panics
    ///
    /// Panics if `parts` is empty; the grammar never produces an empty
    /// selector.
    #[must_use]
    pub fn new(parts: Vec<SelectorComponent>) -> Self {
        let position = parts
            .first()
            .expect("a selector has at least one sequence")
            .position();
        let mut text = EcoString::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&part.to_string());
        }
        Self {
            parts,
            text,
            position,
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A declaration's property name, with its vendor-hack marker if one was
/// recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyName {
    /// The property name with any hack character stripped.
    pub text: EcoString,
    /// `'*'` or `'_'` when the corresponding hack option recognized one.
    pub hack: Option<char>,
    /// Position of the name (or of the hack character preceding it).
    pub position: Position,
}

impl std::fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(hack) = self.hack {
            write!(f, "{hack}")?;
        }
        f.write_str(&self.text)
    }
}

/// The value category of a [`PropertyValuePart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePartKind {
    /// A bare number.
    Number,
    /// A percentage.
    Percentage,
    /// An absolute length.
    Length,
    /// An `em` measure.
    Ems,
    /// An `ex` measure.
    Exs,
    /// An angle.
    Angle,
    /// A time.
    Time,
    /// A frequency.
    Frequency,
    /// A resolution.
    Resolution,
    /// A number with an unrecognized unit.
    Dimension,
    /// A quoted string.
    String,
    /// An identifier.
    Identifier,
    /// A `url(...)` reference.
    Uri,
    /// A unicode range.
    UnicodeRange,
    /// A hex color.
    Color,
    /// A function call (including IE filters).
    Function,
    /// A `/`, `,`, or in-function arithmetic operator.
    Operator,
}

impl ValuePartKind {
    /// Classifies a value term from the token that produced it.
    ///
    /// Returns `None` for token kinds that cannot begin a term.
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Number => Some(Self::Number),
            TokenKind::Percentage => Some(Self::Percentage),
            TokenKind::Length => Some(Self::Length),
            TokenKind::Ems => Some(Self::Ems),
            TokenKind::Exs => Some(Self::Exs),
            TokenKind::Angle => Some(Self::Angle),
            TokenKind::Time => Some(Self::Time),
            TokenKind::Freq => Some(Self::Frequency),
            TokenKind::Resolution => Some(Self::Resolution),
            TokenKind::Dimension => Some(Self::Dimension),
            TokenKind::String => Some(Self::String),
            TokenKind::Ident => Some(Self::Identifier),
            TokenKind::Uri => Some(Self::Uri),
            TokenKind::UnicodeRange => Some(Self::UnicodeRange),
            _ => None,
        }
    }
}

/// One term or operator in a property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValuePart {
    /// The text, including any unary sign.
    pub text: EcoString,
    /// The value category.
    pub kind: ValuePartKind,
    /// Position of the part's first character.
    pub position: Position,
}

impl PropertyValuePart {
    /// Creates a new value part.
    #[must_use]
    pub fn new(text: impl Into<EcoString>, kind: ValuePartKind, position: Position) -> Self {
        Self {
            text: text.into(),
            kind,
            position,
        }
    }
}

impl std::fmt::Display for PropertyValuePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A declaration value: a flat list of terms and operators in document
/// order. Consecutive terms with no operator between them were separated
/// only by whitespace in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    /// The terms and operators.
    pub parts: Vec<PropertyValuePart>,
    /// The reconstructed value text.
    pub text: EcoString,
    /// Position of the first part.
    pub position: Position,
}

impl PropertyValue {
    /// Creates a value from its parts.
    ///
    /// # Panics
    ///
    /// Panics if `parts` is empty; the grammar rejects empty values.
    #[must_use]
    pub fn new(parts: Vec<PropertyValuePart>) -> Self {
        let position = parts.first().expect("a value has at least one part").position;
        let mut text = EcoString::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&part.text);
        }
        Self {
            parts,
            text,
            position,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// The sixteen paged-media margin boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)] // variants name the margin boxes directly
pub enum MarginBox {
    TopLeftCorner,
    TopLeft,
    TopCenter,
    TopRight,
    TopRightCorner,
    BottomLeftCorner,
    BottomLeft,
    BottomCenter,
    BottomRight,
    BottomRightCorner,
    LeftTop,
    LeftMiddle,
    LeftBottom,
    RightTop,
    RightMiddle,
    RightBottom,
}

impl MarginBox {
    /// Maps a margin-box symbol token to its box.
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::TopLeftCornerSym => Some(Self::TopLeftCorner),
            TokenKind::TopLeftSym => Some(Self::TopLeft),
            TokenKind::TopCenterSym => Some(Self::TopCenter),
            TokenKind::TopRightSym => Some(Self::TopRight),
            TokenKind::TopRightCornerSym => Some(Self::TopRightCorner),
            TokenKind::BottomLeftCornerSym => Some(Self::BottomLeftCorner),
            TokenKind::BottomLeftSym => Some(Self::BottomLeft),
            TokenKind::BottomCenterSym => Some(Self::BottomCenter),
            TokenKind::BottomRightSym => Some(Self::BottomRight),
            TokenKind::BottomRightCornerSym => Some(Self::BottomRightCorner),
            TokenKind::LeftTopSym => Some(Self::LeftTop),
            TokenKind::LeftMiddleSym => Some(Self::LeftMiddle),
            TokenKind::LeftBottomSym => Some(Self::LeftBottom),
            TokenKind::RightTopSym => Some(Self::RightTop),
            TokenKind::RightMiddleSym => Some(Self::RightMiddle),
            TokenKind::RightBottomSym => Some(Self::RightBottom),
            _ => None,
        }
    }

    /// Returns the at-rule spelling of this box.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeftCorner => "@top-left-corner",
            Self::TopLeft => "@top-left",
            Self::TopCenter => "@top-center",
            Self::TopRight => "@top-right",
            Self::TopRightCorner => "@top-right-corner",
            Self::BottomLeftCorner => "@bottom-left-corner",
            Self::BottomLeft => "@bottom-left",
            Self::BottomCenter => "@bottom-center",
            Self::BottomRight => "@bottom-right",
            Self::BottomRightCorner => "@bottom-right-corner",
            Self::LeftTop => "@left-top",
            Self::LeftMiddle => "@left-middle",
            Self::LeftBottom => "@left-bottom",
            Self::RightTop => "@right-top",
            Self::RightMiddle => "@right-middle",
            Self::RightBottom => "@right-bottom",
        }
    }
}

impl std::fmt::Display for MarginBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
