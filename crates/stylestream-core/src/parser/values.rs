// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration and value productions.
//!
//! A declaration block is the second error-recovery boundary: a failed
//! declaration is reported, then the stream resynchronizes on `;` (and
//! the block keeps reading declarations) or `}` (and the block ends).
//!
//! Values are flat: `expr` produces a single list interleaving terms and
//! operators in document order, with implicit (whitespace) separation
//! encoded as adjacent terms. Inside functions the operator set widens to
//! `+ * -`, and with the `ie_filters` option the IE `name=value` argument
//! style and `progid:` filter heads become legal terms.

use ecow::{EcoString, eco_format};

use crate::error::SyntaxError;
use crate::events::Event;
use crate::nodes::{PropertyName, PropertyValue, PropertyValuePart, ValuePartKind};
use crate::token::TokenKind;

use super::ParseRun;

/// Token kinds that can be a value term on their own.
const TERM_TOKENS: [TokenKind; 14] = [
    TokenKind::Number,
    TokenKind::Percentage,
    TokenKind::Length,
    TokenKind::Angle,
    TokenKind::Time,
    TokenKind::Freq,
    TokenKind::String,
    TokenKind::Ident,
    TokenKind::Uri,
    TokenKind::UnicodeRange,
    TokenKind::Ems,
    TokenKind::Exs,
    TokenKind::Resolution,
    TokenKind::Dimension,
];

impl ParseRun<'_, '_> {
    // ========================================================================
    // Declaration blocks
    // ========================================================================

    /// Reads a `{ declaration (';' declaration?)* }` block (the opening
    /// brace only when `check_start`), interleaving margin boxes when
    /// `read_margins`.
    ///
    /// In non-strict mode a failed declaration is reported and the block
    /// resynchronizes on `;` or `}`.
    pub(super) fn read_declarations(
        &mut self,
        check_start: bool,
        read_margins: bool,
    ) -> Result<(), SyntaxError> {
        self.read_whitespace();
        if check_start {
            self.stream.must_match(&[TokenKind::LBrace])?;
        }
        self.read_whitespace();

        match self.declaration_block(read_margins) {
            Ok(()) => Ok(()),
            Err(error) => {
                if self.options.strict {
                    return Err(error);
                }
                self.fire_error(error);
                match self
                    .stream
                    .advance(&[TokenKind::Semicolon, TokenKind::RBrace])
                {
                    // The bad declaration ended; keep reading the block.
                    TokenKind::Semicolon => self.read_declarations(false, read_margins),
                    TokenKind::RBrace => {
                        self.read_whitespace();
                        Ok(())
                    }
                    // EOF: the block ends with the input.
                    _ => Ok(()),
                }
            }
        }
    }

    fn declaration_block(&mut self, read_margins: bool) -> Result<(), SyntaxError> {
        loop {
            if self.stream.match_token(&[TokenKind::Semicolon])
                || (read_margins && self.margin()?)
            {
                // An empty declaration or a margin box; nothing else to do.
            } else if self.declaration()? {
                if !self.stream.match_token(&[TokenKind::Semicolon]) {
                    break;
                }
            } else {
                break;
            }
            self.read_whitespace();
        }
        self.stream.must_match(&[TokenKind::RBrace])?;
        self.read_whitespace();
        Ok(())
    }

    /// `property ':' expr prio?`; `false` when no property begins here.
    fn declaration(&mut self) -> Result<bool, SyntaxError> {
        let Some(property) = self.property() else {
            return Ok(false);
        };
        self.stream.must_match(&[TokenKind::Colon])?;
        self.read_whitespace();

        let Some(value) = self.expr(false)? else {
            // A declaration's value must be non-empty.
            let token = self.stream.lt(1).clone();
            return Err(SyntaxError::expected("a property value", &token));
        };
        let important = self.prio();

        let position = property.position;
        self.fire(Event::Property {
            property,
            value,
            important,
            position,
        });
        self.read_whitespace();
        Ok(true)
    }

    /// A property name, applying the star/underscore hack transforms.
    fn property(&mut self) -> Option<PropertyName> {
        let mut hack = None;
        let mut hack_position = None;
        if self.options.star_hack && self.stream.match_token(&[TokenKind::Star]) {
            let token = self.stream.token();
            hack = Some('*');
            hack_position = Some(token.start);
        }

        if !self.stream.match_token(&[TokenKind::Ident]) {
            return None;
        }
        let token = self.stream.token().clone();
        let mut text = token.value.clone();
        if self.options.underscore_hack && text.starts_with('_') {
            hack = Some('_');
            text = EcoString::from(&text[1..]);
        }

        let position = hack_position.unwrap_or(token.start);
        self.read_whitespace();
        Some(PropertyName {
            text,
            hack,
            position,
        })
    }

    /// The optional `!important` suffix.
    fn prio(&mut self) -> bool {
        let important = self.stream.match_token(&[TokenKind::ImportantSym]);
        self.read_whitespace();
        important
    }

    // ========================================================================
    // Value expressions
    // ========================================================================

    /// `term (operator term)*`, flattened into one part list. Implicit
    /// (whitespace) operators leave consecutive terms adjacent.
    pub(super) fn expr(&mut self, in_function: bool) -> Result<Option<PropertyValue>, SyntaxError> {
        let mut parts: Vec<PropertyValuePart> = Vec::new();
        if let Some(first) = self.term()? {
            parts.push(first);
            loop {
                if let Some(operator) = self.operator(in_function) {
                    parts.push(operator);
                }
                match self.term()? {
                    Some(term) => parts.push(term),
                    None => break,
                }
            }
        }
        Ok(if parts.is_empty() {
            None
        } else {
            Some(PropertyValue::new(parts))
        })
    }

    /// `/` or `,`; inside functions also `+`, `*`, `-`.
    fn operator(&mut self, in_function: bool) -> Option<PropertyValuePart> {
        let matched = self
            .stream
            .match_token(&[TokenKind::Slash, TokenKind::Comma])
            || (in_function
                && self
                    .stream
                    .match_token(&[TokenKind::Plus, TokenKind::Star, TokenKind::Minus]));
        if !matched {
            return None;
        }
        let token = self.stream.token().clone();
        let part = PropertyValuePart::new(token.value, ValuePartKind::Operator, token.start);
        self.read_whitespace();
        Some(part)
    }

    /// One value term: an optionally signed measure, string, identifier,
    /// URI, unicode range, hex color, or function call.
    ///
    /// Functions recurse through `expr`, so the stack is grown on demand
    /// for deeply nested input.
    fn term(&mut self) -> Result<Option<PropertyValuePart>, SyntaxError> {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || self.term_inner())
    }

    fn term_inner(&mut self) -> Result<Option<PropertyValuePart>, SyntaxError> {
        let unary = if self.stream.match_token(&[TokenKind::Plus, TokenKind::Minus]) {
            Some(self.stream.token().clone())
        } else {
            None
        };

        let position = match &unary {
            Some(token) => token.start,
            None => self.stream.lt(1).start,
        };

        let (text, kind) = if self.options.ie_filters
            && self.stream.peek() == TokenKind::IeFunction
        {
            (self.ie_function()?, ValuePartKind::Function)
        } else if self.stream.match_token(&TERM_TOKENS) {
            let token = self.stream.token().clone();
            let kind = ValuePartKind::from_token(token.kind).expect("term token classifies");
            self.read_whitespace();
            (token.value, kind)
        } else if let Some(color) = self.hexcolor()? {
            (color, ValuePartKind::Color)
        } else if let Some(function) = self.function_value()? {
            (function, ValuePartKind::Function)
        } else {
            // No term here. A consumed unary sign stays consumed; the
            // caller reports the position of whatever follows it.
            return Ok(None);
        };

        let mut full = EcoString::new();
        if let Some(unary) = &unary {
            full.push_str(&unary.value);
        }
        full.push_str(&text);
        Ok(Some(PropertyValuePart::new(full, kind, position)))
    }

    /// A `HASH` token constrained to the two hex color shapes.
    fn hexcolor(&mut self) -> Result<Option<EcoString>, SyntaxError> {
        if !self.stream.match_token(&[TokenKind::Hash]) {
            return Ok(None);
        }
        let token = self.stream.token().clone();
        if !is_hex_color(&token.value) {
            return Err(SyntaxError::new(
                eco_format!("Expected a hex color but found '{}'", token.value),
                token.start,
                token.span,
            ));
        }
        self.read_whitespace();
        Ok(Some(token.value))
    }

    /// `FUNCTION expr ')'`, with the IE `name=value` argument tail when
    /// `ie_filters` is enabled.
    fn function_value(&mut self) -> Result<Option<EcoString>, SyntaxError> {
        if !self.stream.match_token(&[TokenKind::Function]) {
            return Ok(None);
        }
        let mut text = self.stream.token().value.clone();
        self.read_whitespace();
        if let Some(arguments) = self.expr(true)? {
            text.push_str(&arguments.text);
        }
        if self.options.ie_filters && self.stream.peek() == TokenKind::Equals {
            self.ie_arguments(&mut text)?;
        }
        self.stream.must_match(&[TokenKind::RParen])?;
        text.push(')');
        self.read_whitespace();
        Ok(Some(text))
    }

    /// `IE_FUNCTION ( IDENT '=' term (',' IDENT '=' term)* )`.
    fn ie_function(&mut self) -> Result<EcoString, SyntaxError> {
        let token = self.stream.must_match(&[TokenKind::IeFunction])?;
        let mut text = token.value.clone();
        self.ie_arguments(&mut text)?;
        self.stream.must_match(&[TokenKind::RParen])?;
        text.push(')');
        self.read_whitespace();
        Ok(text)
    }

    /// The loose `name=value` argument list of IE filters, appended to
    /// `text` verbatim. Stops before the closing paren.
    fn ie_arguments(&mut self, text: &mut EcoString) -> Result<(), SyntaxError> {
        loop {
            let whitespace = self.read_whitespace();
            text.push_str(&whitespace);
            if self.stream.match_token(&[TokenKind::Ident]) {
                text.push_str(&self.stream.token().value);
            }
            if self.stream.match_token(&[TokenKind::Equals]) {
                text.push_str(&self.stream.token().value);
            }
            // The argument value: anything up to a separator or the
            // closing paren.
            loop {
                match self.stream.peek() {
                    TokenKind::Comma | TokenKind::S | TokenKind::RParen | TokenKind::Eof => break,
                    _ => {
                        self.stream.get();
                        text.push_str(&self.stream.token().value);
                    }
                }
            }
            if self
                .stream
                .match_token(&[TokenKind::Comma, TokenKind::S])
            {
                text.push_str(&self.stream.token().value);
            } else {
                break;
            }
        }
        Ok(())
    }
}

/// `#rgb` or `#rrggbb`, case-insensitive.
fn is_hex_color(text: &str) -> bool {
    let Some(digits) = text.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
