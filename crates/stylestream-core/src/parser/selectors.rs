// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Selector productions: CSS3 selector groups, combinators, simple
//! selector sequences, attribute selectors, pseudos, and negation.
//!
//! The one delicate spot is the namespace prefix. `svg|rect` reads the
//! prefix optimistically (one or two tokens); when no element name
//! follows, the tokens are pushed back with `unget` so the universal
//! production can retry them. The grammar never consults reader
//! positions directly — the lookahead buffer is the only rollback
//! mechanism.

use ecow::EcoString;

use crate::error::SyntaxError;
use crate::nodes::{
    Combinator, Selector, SelectorComponent, SelectorPart, SelectorSubPart, SelectorSubPartKind,
};
use crate::position::Position;
use crate::token::TokenKind;

use super::ParseRun;

/// A tentatively consumed namespace prefix: `svg|`, `*|`, or a bare `|`.
struct NamespacePrefix {
    text: EcoString,
    /// How many tokens to push back if the prefix turns out not to
    /// belong to anything.
    tokens: usize,
    position: Position,
}

impl ParseRun<'_, '_> {
    // ========================================================================
    // Selector groups
    // ========================================================================

    /// `selector (',' selector)*`; `None` when no selector begins here.
    pub(super) fn selectors_group(&mut self) -> Result<Option<Vec<Selector>>, SyntaxError> {
        let mut selectors = Vec::new();
        if let Some(selector) = self.selector()? {
            selectors.push(selector);
            while self.stream.match_token(&[TokenKind::Comma]) {
                self.read_whitespace();
                match self.selector()? {
                    Some(selector) => selectors.push(selector),
                    None => {
                        let token = self.stream.lt(1).clone();
                        return Err(SyntaxError::unexpected_token(&token));
                    }
                }
            }
        }
        Ok(if selectors.is_empty() {
            None
        } else {
            Some(selectors)
        })
    }

    /// `simple_selector_sequence (combinator simple_selector_sequence)*`.
    ///
    /// Whitespace policy: after a sequence, optional whitespace is read;
    /// an explicit combinator wins, otherwise the whitespace itself is the
    /// (descendant) combinator — but only if another sequence follows.
    pub(super) fn selector(&mut self) -> Result<Option<Selector>, SyntaxError> {
        let Some(first) = self.simple_selector_sequence()? else {
            return Ok(None);
        };
        let mut components = vec![SelectorComponent::Part(first)];

        loop {
            if let Some(combinator) = self.combinator() {
                components.push(SelectorComponent::Combinator(combinator));
                match self.simple_selector_sequence()? {
                    Some(part) => components.push(SelectorComponent::Part(part)),
                    None => {
                        let token = self.stream.lt(1).clone();
                        return Err(SyntaxError::unexpected_token(&token));
                    }
                }
            } else if self.stream.match_token(&[TokenKind::S]) {
                let ws_token = self.stream.token().clone();
                let whitespace = Combinator::new(ws_token.value.clone(), ws_token.start);
                let explicit = self.combinator();
                match self.simple_selector_sequence()? {
                    Some(part) => {
                        match explicit {
                            Some(combinator) => {
                                components.push(SelectorComponent::Combinator(combinator));
                            }
                            None => components.push(SelectorComponent::Combinator(whitespace)),
                        }
                        components.push(SelectorComponent::Part(part));
                    }
                    None => {
                        if explicit.is_some() {
                            let token = self.stream.lt(1).clone();
                            return Err(SyntaxError::unexpected_token(&token));
                        }
                        // Trailing whitespace: the selector is complete.
                        break;
                    }
                }
            } else {
                break;
            }
        }

        Ok(Some(Selector::new(components)))
    }

    /// An explicit `+`, `>`, or `~`, with trailing whitespace consumed.
    fn combinator(&mut self) -> Option<Combinator> {
        if self
            .stream
            .match_token(&[TokenKind::Plus, TokenKind::Greater, TokenKind::Tilde])
        {
            let token = self.stream.token().clone();
            let combinator = Combinator::new(token.value, token.start);
            self.read_whitespace();
            Some(combinator)
        } else {
            None
        }
    }

    // ========================================================================
    // Simple selector sequences
    // ========================================================================

    /// An optional type/universal selector followed by modifiers, with no
    /// interior whitespace; or a bare run of modifiers.
    fn simple_selector_sequence(&mut self) -> Result<Option<SelectorPart>, SyntaxError> {
        let position = self.stream.lt(1).start;
        let mut text = EcoString::new();

        let element_name = match self.type_selector()? {
            Some(element) => Some(element),
            None => self.universal()?,
        };
        if let Some(element) = &element_name {
            text.push_str(&element.text);
        }

        let mut modifiers = Vec::new();
        loop {
            // Whitespace terminates the sequence.
            if self.stream.peek() == TokenKind::S {
                break;
            }
            match self.selector_modifier()? {
                Some(modifier) => {
                    text.push_str(&modifier.text);
                    modifiers.push(modifier);
                }
                None => break,
            }
        }

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(SelectorPart {
                element_name,
                modifiers,
                text,
                position,
            }))
        }
    }

    /// The next id/class/attribute/pseudo/negation modifier, if any.
    fn selector_modifier(&mut self) -> Result<Option<SelectorSubPart>, SyntaxError> {
        if self.stream.match_token(&[TokenKind::Hash]) {
            let token = self.stream.token().clone();
            return Ok(Some(SelectorSubPart::new(
                token.value,
                SelectorSubPartKind::Id,
                token.start,
            )));
        }
        if let Some(class) = self.class_selector()? {
            return Ok(Some(class));
        }
        if let Some(attribute) = self.attrib()? {
            return Ok(Some(attribute));
        }
        if let Some(pseudo) = self.pseudo()? {
            return Ok(Some(pseudo));
        }
        if let Some(negation) = self.negation()? {
            return Ok(Some(negation));
        }
        Ok(None)
    }

    /// `IDENT`, with any namespace prefix folded into the text.
    fn type_selector(&mut self) -> Result<Option<SelectorSubPart>, SyntaxError> {
        let prefix = self.namespace_prefix();
        match self.element_name() {
            Some(mut element) => {
                if let Some(prefix) = prefix {
                    let mut text = prefix.text;
                    text.push_str(&element.text);
                    element.text = text;
                    element.position = prefix.position;
                }
                Ok(Some(element))
            }
            None => {
                // The prefix belonged to nothing: push its tokens back.
                if let Some(prefix) = prefix {
                    for _ in 0..prefix.tokens {
                        self.stream.unget();
                    }
                }
                Ok(None)
            }
        }
    }

    /// A bare element name.
    fn element_name(&mut self) -> Option<SelectorSubPart> {
        if self.stream.match_token(&[TokenKind::Ident]) {
            let token = self.stream.token().clone();
            Some(SelectorSubPart::new(
                token.value,
                SelectorSubPartKind::ElementName,
                token.start,
            ))
        } else {
            None
        }
    }

    /// `[IDENT|'*']? '|'` — only attempted when a pipe is one or two
    /// tokens ahead.
    fn namespace_prefix(&mut self) -> Option<NamespacePrefix> {
        if self.stream.la(1) != TokenKind::Pipe && self.stream.la(2) != TokenKind::Pipe {
            return None;
        }
        let mut text = EcoString::new();
        let mut tokens = 0;
        let mut position = None;
        if self.stream.match_token(&[TokenKind::Ident, TokenKind::Star]) {
            let token = self.stream.token();
            text.push_str(&token.value);
            position = Some(token.start);
            tokens += 1;
        }
        if self.stream.match_token(&[TokenKind::Pipe]) {
            if position.is_none() {
                position = Some(self.stream.token().start);
            }
            text.push('|');
            tokens += 1;
        }
        if text.is_empty() {
            None
        } else {
            Some(NamespacePrefix {
                text,
                tokens,
                position: position.expect("prefix has at least one token"),
            })
        }
    }

    /// `'*'`, with any namespace prefix folded in.
    fn universal(&mut self) -> Result<Option<SelectorSubPart>, SyntaxError> {
        let prefix = self.namespace_prefix();
        let star = if self.stream.match_token(&[TokenKind::Star]) {
            Some(self.stream.token().clone())
        } else {
            None
        };
        match (prefix, star) {
            (Some(prefix), star) => {
                let mut text = prefix.text;
                if star.is_some() {
                    text.push('*');
                }
                Ok(Some(SelectorSubPart::new(
                    text,
                    SelectorSubPartKind::ElementName,
                    prefix.position,
                )))
            }
            (None, Some(star)) => Ok(Some(SelectorSubPart::new(
                star.value.clone(),
                SelectorSubPartKind::ElementName,
                star.start,
            ))),
            (None, None) => Ok(None),
        }
    }

    /// `'.' IDENT`.
    fn class_selector(&mut self) -> Result<Option<SelectorSubPart>, SyntaxError> {
        if self.stream.match_token(&[TokenKind::Dot]) {
            let dot = self.stream.token().clone();
            let name = self.stream.must_match(&[TokenKind::Ident])?;
            let mut text = EcoString::from(".");
            text.push_str(&name.value);
            Ok(Some(SelectorSubPart::new(
                text,
                SelectorSubPartKind::Class,
                dot.start,
            )))
        } else {
            Ok(None)
        }
    }

    /// `'[' prefix? IDENT (op [IDENT|STRING])? ']'`.
    fn attrib(&mut self) -> Result<Option<SelectorSubPart>, SyntaxError> {
        if !self.stream.match_token(&[TokenKind::LBracket]) {
            return Ok(None);
        }
        let open = self.stream.token().clone();
        let mut text = open.value.clone();
        text.push_str(&self.read_whitespace());
        if let Some(prefix) = self.namespace_prefix() {
            text.push_str(&prefix.text);
        }
        let name = self.stream.must_match(&[TokenKind::Ident])?;
        text.push_str(&name.value);
        text.push_str(&self.read_whitespace());

        if self.stream.match_token(&[
            TokenKind::PrefixMatch,
            TokenKind::SuffixMatch,
            TokenKind::SubstringMatch,
            TokenKind::Equals,
            TokenKind::Includes,
            TokenKind::Dashmatch,
        ]) {
            text.push_str(&self.stream.token().value);
            text.push_str(&self.read_whitespace());
            let value = self
                .stream
                .must_match(&[TokenKind::Ident, TokenKind::String])?;
            text.push_str(&value.value);
            text.push_str(&self.read_whitespace());
        }

        self.stream.must_match(&[TokenKind::RBracket])?;
        text.push(']');
        Ok(Some(SelectorSubPart::new(
            text,
            SelectorSubPartKind::Attribute,
            open.start,
        )))
    }

    /// `':' '::'? [IDENT | functional pseudo]`. The exact colon sequence
    /// is preserved in the emitted text.
    fn pseudo(&mut self) -> Result<Option<SelectorSubPart>, SyntaxError> {
        if !self.stream.match_token(&[TokenKind::Colon]) {
            return Ok(None);
        }
        let position = self.stream.token().start;
        let mut text = EcoString::from(":");
        if self.stream.match_token(&[TokenKind::Colon]) {
            text.push(':');
        }

        if self.stream.match_token(&[TokenKind::Ident]) {
            text.push_str(&self.stream.token().value);
        } else if self.stream.peek() == TokenKind::Function {
            text.push_str(&self.functional_pseudo()?);
        } else {
            let token = self.stream.lt(1).clone();
            return Err(SyntaxError::expected("FUNCTION or IDENT after colon", &token));
        }

        Ok(Some(SelectorSubPart::new(
            text,
            SelectorSubPartKind::Pseudo,
            position,
        )))
    }

    /// `FUNCTION expression ')'` inside a pseudo.
    fn functional_pseudo(&mut self) -> Result<EcoString, SyntaxError> {
        let function = self.stream.must_match(&[TokenKind::Function])?;
        let mut text = function.value.clone();
        text.push_str(&self.read_whitespace());
        if let Some(expression) = self.pseudo_expression() {
            text.push_str(&expression);
        }
        self.stream.must_match(&[TokenKind::RParen])?;
        text.push(')');
        Ok(text)
    }

    /// The loose token run allowed inside functional pseudos and media
    /// feature values: signs, numbers, dimensions, strings, identifiers.
    pub(super) fn pseudo_expression(&mut self) -> Option<EcoString> {
        let mut text = EcoString::new();
        while self.stream.match_token(&[
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Dimension,
            TokenKind::Number,
            TokenKind::String,
            TokenKind::Ident,
            TokenKind::Length,
            TokenKind::Freq,
            TokenKind::Angle,
            TokenKind::Time,
            TokenKind::Resolution,
            TokenKind::Slash,
        ]) {
            text.push_str(&self.stream.token().value);
            text.push_str(&self.read_whitespace());
        }
        if text.is_empty() { None } else { Some(text) }
    }

    /// `':not(' negation_arg ')'`.
    fn negation(&mut self) -> Result<Option<SelectorSubPart>, SyntaxError> {
        if !self.stream.match_token(&[TokenKind::Not]) {
            return Ok(None);
        }
        let open = self.stream.token().clone();
        let mut text = open.value.clone();
        text.push_str(&self.read_whitespace());
        let argument = self.negation_arg()?;
        text.push_str(&argument.text);
        text.push_str(&self.read_whitespace());
        self.stream.must_match(&[TokenKind::RParen])?;
        text.push(')');

        let mut part = SelectorSubPart::new(text, SelectorSubPartKind::Not, open.start);
        part.args.push(argument);
        Ok(Some(part))
    }

    /// A single negated simple selector: type, universal, id, class,
    /// attribute, or pseudo.
    fn negation_arg(&mut self) -> Result<SelectorSubPart, SyntaxError> {
        if let Some(element) = self.type_selector()? {
            return Ok(element);
        }
        if let Some(universal) = self.universal()? {
            return Ok(universal);
        }
        if self.stream.match_token(&[TokenKind::Hash]) {
            let token = self.stream.token().clone();
            return Ok(SelectorSubPart::new(
                token.value,
                SelectorSubPartKind::Id,
                token.start,
            ));
        }
        if let Some(class) = self.class_selector()? {
            return Ok(class);
        }
        if let Some(attribute) = self.attrib()? {
            return Ok(attribute);
        }
        if let Some(pseudo) = self.pseudo()? {
            return Ok(pseudo);
        }
        let token = self.stream.lt(1).clone();
        Err(SyntaxError::unexpected_token(&token))
    }
}
