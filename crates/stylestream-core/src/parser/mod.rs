// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent CSS grammar engine.
//!
//! One method per grammar production, over a [`TokenStream`] with bounded
//! lookahead. The engine holds no document state: it emits [`Event`]s in
//! document order and forgets what it saw. Error handling follows the
//! panic-mode recovery design:
//!
//! - a failed selector group skips to the rule's closing `}`;
//! - a failed declaration skips to `;` (and keeps reading declarations)
//!   or `}` (and ends the block);
//! - everything else is fatal in strict mode, or surfaces as an
//!   [`Event::Error`] at the top level otherwise.
//!
//! # Usage
//!
//! ```
//! use stylestream_core::{Event, Parser, ParserOptions};
//!
//! let mut names = Vec::new();
//! {
//!     let mut parser = Parser::new(ParserOptions::default());
//!     parser.add_listener(|event| names.push(event.name()));
//!     parser.parse_stylesheet("a { color: red; }").unwrap();
//! }
//! assert_eq!(
//!     names,
//!     ["startstylesheet", "startrule", "property", "endrule", "endstylesheet"],
//! );
//! ```

use ecow::EcoString;

use crate::error::SyntaxError;
use crate::events::{Event, EventDispatcher, ListenerId};
use crate::nodes::{MarginBox, MediaFeature, MediaQuery, PropertyValue, Selector, SyntaxUnit};
use crate::position::Position;
use crate::stream::TokenStream;
use crate::token::TokenKind;

// Additional impl blocks for ParseRun
mod selectors;
mod values;

/// Configuration for the grammar engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Accept `*property: value` and report the `*` as a hack marker.
    pub star_hack: bool,
    /// Accept `_property: value`, strip the underscore, and report it as
    /// a hack marker.
    pub underscore_hack: bool,
    /// Accept IE `progid:` filter functions (and `name=value` arguments
    /// inside functions) as legal terms.
    pub ie_filters: bool,
    /// Propagate syntax errors instead of recovering at rule and
    /// declaration boundaries.
    pub strict: bool,
}

/// The streaming CSS parser.
///
/// The parser owns its options and an embedded event dispatcher. Each
/// entry point allocates a fresh token stream over its input; the engine
/// is synchronous and not reusable concurrently.
pub struct Parser<'l> {
    options: ParserOptions,
    events: EventDispatcher<'l>,
}

impl<'l> Parser<'l> {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            events: EventDispatcher::new(),
        }
    }

    /// Registers an event listener; returns a handle for removal.
    pub fn add_listener(&mut self, listener: impl FnMut(&Event) + 'l) -> ListenerId {
        self.events.add_listener(listener)
    }

    /// Removes a previously registered listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }

    fn run(&mut self, input: &str) -> ParseRun<'_, 'l> {
        ParseRun {
            stream: TokenStream::css(input),
            options: self.options,
            events: &mut self.events,
        }
    }

    /// Parses a full stylesheet, firing events along the way.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`SyntaxError`]: any error in strict mode,
    /// or an error outside the recovery boundaries otherwise.
    pub fn parse_stylesheet(&mut self, input: &str) -> Result<(), SyntaxError> {
        self.run(input).stylesheet()
    }

    /// Alias for [`Parser::parse_stylesheet`].
    ///
    /// # Errors
    ///
    /// As [`Parser::parse_stylesheet`].
    pub fn parse(&mut self, input: &str) -> Result<(), SyntaxError> {
        self.parse_stylesheet(input)
    }

    /// Parses a single media query and verifies the input ends there.
    ///
    /// Returns `None` for empty input.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] for a malformed query or trailing input.
    pub fn parse_media_query(&mut self, input: &str) -> Result<Option<MediaQuery>, SyntaxError> {
        let mut run = self.run(input);
        let query = run.media_query()?;
        run.verify_end()?;
        Ok(query)
    }

    /// Parses a single declaration value (with optional surrounding
    /// whitespace) and verifies the input ends there.
    ///
    /// Returns `None` for empty input.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] for a malformed value or trailing input.
    pub fn parse_property_value(
        &mut self,
        input: &str,
    ) -> Result<Option<PropertyValue>, SyntaxError> {
        let mut run = self.run(input);
        run.read_whitespace();
        let value = run.expr(false)?;
        run.read_whitespace();
        run.verify_end()?;
        Ok(value)
    }

    /// Parses a single ruleset, firing its events, and verifies the input
    /// ends there. Returns whether a ruleset was present.
    ///
    /// # Errors
    ///
    /// As [`Parser::parse_stylesheet`], plus trailing-input errors.
    pub fn parse_rule(&mut self, input: &str) -> Result<bool, SyntaxError> {
        let mut run = self.run(input);
        run.read_whitespace();
        let found = run.ruleset()?;
        run.read_whitespace();
        run.verify_end()?;
        Ok(found)
    }

    /// Parses a single selector (no commas) and verifies the input ends
    /// there. Returns `None` for empty input.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] for a malformed selector or trailing
    /// input.
    pub fn parse_selector(&mut self, input: &str) -> Result<Option<Selector>, SyntaxError> {
        let mut run = self.run(input);
        run.read_whitespace();
        let selector = run.selector()?;
        run.read_whitespace();
        run.verify_end()?;
        Ok(selector)
    }

    /// Parses the contents of an HTML `style` attribute: a bare
    /// declaration list with no surrounding braces.
    ///
    /// # Errors
    ///
    /// As [`Parser::parse_stylesheet`].
    pub fn parse_style_attribute(&mut self, input: &str) -> Result<(), SyntaxError> {
        // The appended brace gives declaration recovery a sync point.
        let input = format!("{input}}}");
        let mut run = self.run(&input);
        run.read_declarations(false, false)
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .finish()
    }
}

/// One parse in flight: a token stream plus the parser's configuration.
pub(super) struct ParseRun<'a, 'l> {
    pub(super) stream: TokenStream,
    pub(super) options: ParserOptions,
    pub(super) events: &'a mut EventDispatcher<'l>,
}

impl ParseRun<'_, '_> {
    // ========================================================================
    // Shared plumbing
    // ========================================================================

    fn fire(&mut self, event: Event) {
        self.events.fire(&event);
    }

    fn fire_error(&mut self, error: SyntaxError) {
        self.fire(Event::Error { error });
    }

    /// Consumes consecutive whitespace tokens, returning their text.
    pub(super) fn read_whitespace(&mut self) -> EcoString {
        let mut text = EcoString::new();
        while self.stream.match_token(&[TokenKind::S]) {
            text.push_str(&self.stream.token().value);
        }
        text
    }

    /// Consumes whitespace and the HTML-comment wrappers legacy
    /// stylesheets carry between top-level constructs.
    fn skip_cdo_cdc(&mut self) {
        while self
            .stream
            .match_token(&[TokenKind::S, TokenKind::Cdo, TokenKind::Cdc])
        {}
    }

    /// Fails unless the next token is EOF.
    pub(super) fn verify_end(&mut self) -> Result<(), SyntaxError> {
        if self.stream.la(1) == TokenKind::Eof {
            Ok(())
        } else {
            let token = self.stream.lt(1).clone();
            Err(SyntaxError::unexpected_token(&token))
        }
    }

    // ========================================================================
    // Stylesheet
    // ========================================================================

    /// The stylesheet entry production.
    pub(super) fn stylesheet(&mut self) -> Result<(), SyntaxError> {
        self.fire(Event::StartStylesheet);

        // A malformed @charset at the head is fatal regardless of mode.
        self.charset(true)?;
        self.skip_cdo_cdc();

        while self.stream.peek() == TokenKind::ImportSym {
            self.import_rule(true)?;
            self.skip_cdo_cdc();
        }
        while self.stream.peek() == TokenKind::NamespaceSym {
            self.namespace_rule(true)?;
            self.skip_cdo_cdc();
        }

        loop {
            let next = self.stream.peek();
            if next == TokenKind::Eof {
                break;
            }
            match self.stylesheet_item(next) {
                Ok(()) => {}
                Err(error) if !self.options.strict => self.fire_error(error),
                Err(error) => return Err(error),
            }
        }

        self.fire(Event::EndStylesheet);
        Ok(())
    }

    /// One top-level construct, dispatched on the lookahead token.
    fn stylesheet_item(&mut self, next: TokenKind) -> Result<(), SyntaxError> {
        match next {
            TokenKind::MediaSym => self.media(),
            TokenKind::PageSym => self.page(),
            TokenKind::FontFaceSym => self.font_face(),
            TokenKind::S => {
                self.read_whitespace();
                Ok(())
            }
            // HTML-comment wrappers are legal between any two statements.
            TokenKind::Cdo | TokenKind::Cdc => {
                self.stream.get();
                Ok(())
            }
            _ => {
                if self.ruleset()? {
                    return Ok(());
                }
                // Not a ruleset: diagnose what it actually was.
                match next {
                    TokenKind::CharsetSym => {
                        let token = self.stream.lt(1).clone();
                        self.charset(false)?;
                        Err(SyntaxError::new(
                            "@charset not allowed here",
                            token.start,
                            token.span,
                        ))
                    }
                    TokenKind::ImportSym => {
                        let token = self.stream.lt(1).clone();
                        self.import_rule(false)?;
                        Err(SyntaxError::new(
                            "@import not allowed here",
                            token.start,
                            token.span,
                        ))
                    }
                    TokenKind::NamespaceSym => {
                        let token = self.stream.lt(1).clone();
                        self.namespace_rule(false)?;
                        Err(SyntaxError::new(
                            "@namespace not allowed here",
                            token.start,
                            token.span,
                        ))
                    }
                    _ => {
                        self.stream.get();
                        let token = self.stream.token().clone();
                        Err(SyntaxError::unexpected_token(&token))
                    }
                }
            }
        }
    }

    // ========================================================================
    // At-rules
    // ========================================================================

    /// `@charset "utf-8";` — only recognized when the symbol is next.
    fn charset(&mut self, emit: bool) -> Result<(), SyntaxError> {
        if self.stream.match_token(&[TokenKind::CharsetSym]) {
            let position = self.stream.token().start;
            self.read_whitespace();
            let token = self.stream.must_match(&[TokenKind::String])?;
            let charset = strip_quotes(&token.value);
            self.read_whitespace();
            self.stream.must_match(&[TokenKind::Semicolon])?;
            if emit {
                self.fire(Event::Charset { charset, position });
            }
        }
        Ok(())
    }

    /// `@import [STRING|URI] media_query_list? ';'`
    fn import_rule(&mut self, emit: bool) -> Result<(), SyntaxError> {
        let token = self.stream.must_match(&[TokenKind::ImportSym])?;
        let position = token.start;
        self.read_whitespace();
        let target = self
            .stream
            .must_match(&[TokenKind::String, TokenKind::Uri])?;
        let uri = strip_uri(&target.value);
        self.read_whitespace();
        let media = self.media_query_list()?;
        self.stream.must_match(&[TokenKind::Semicolon])?;
        self.read_whitespace();
        if emit {
            self.fire(Event::Import {
                uri,
                media,
                position,
            });
        }
        Ok(())
    }

    /// `@namespace IDENT? [STRING|URI] ';'`
    fn namespace_rule(&mut self, emit: bool) -> Result<(), SyntaxError> {
        let token = self.stream.must_match(&[TokenKind::NamespaceSym])?;
        let position = token.start;
        self.read_whitespace();
        let mut prefix = None;
        if self.stream.match_token(&[TokenKind::Ident]) {
            prefix = Some(self.stream.token().value.clone());
            self.read_whitespace();
        }
        let target = self
            .stream
            .must_match(&[TokenKind::String, TokenKind::Uri])?;
        let uri = strip_uri(&target.value);
        self.read_whitespace();
        self.stream.must_match(&[TokenKind::Semicolon])?;
        self.read_whitespace();
        if emit {
            self.fire(Event::Namespace {
                prefix,
                uri,
                position,
            });
        }
        Ok(())
    }

    /// `@media media_query_list '{' [@page | ruleset]* '}'`
    fn media(&mut self) -> Result<(), SyntaxError> {
        let token = self.stream.must_match(&[TokenKind::MediaSym])?;
        let position = token.start;
        self.read_whitespace();
        let media = self.media_query_list()?;
        self.stream.must_match(&[TokenKind::LBrace])?;
        self.read_whitespace();

        self.fire(Event::StartMedia {
            media: media.clone(),
            position,
        });
        loop {
            if self.stream.peek() == TokenKind::PageSym {
                self.page()?;
            } else if !self.ruleset()? {
                break;
            }
        }
        self.stream.must_match(&[TokenKind::RBrace])?;
        self.read_whitespace();
        self.fire(Event::EndMedia { media });
        Ok(())
    }

    /// `media_query (',' media_query)*` — possibly empty.
    fn media_query_list(&mut self) -> Result<Vec<MediaQuery>, SyntaxError> {
        let mut queries = Vec::new();
        self.read_whitespace();
        if matches!(self.stream.peek(), TokenKind::Ident | TokenKind::LParen) {
            if let Some(query) = self.media_query()? {
                queries.push(query);
            }
        }
        while self.stream.match_token(&[TokenKind::Comma]) {
            self.read_whitespace();
            match self.media_query()? {
                Some(query) => queries.push(query),
                None => {
                    let token = self.stream.lt(1).clone();
                    return Err(SyntaxError::unexpected_token(&token));
                }
            }
        }
        Ok(queries)
    }

    /// `[only|not]? media_type [AND expression]* | expression [AND expression]*`
    pub(super) fn media_query(&mut self) -> Result<Option<MediaQuery>, SyntaxError> {
        let mut modifier = None;
        let mut first = None;

        if self.stream.match_token(&[TokenKind::Ident]) {
            let token = self.stream.token().clone();
            let ident = token.value.to_ascii_lowercase();
            if ident == "only" || ident == "not" {
                modifier = Some(EcoString::from(ident));
                first = Some(token);
            } else {
                // Not a modifier: it was the media type itself.
                self.stream.unget();
            }
        }
        self.read_whitespace();

        let mut media_type = None;
        let mut features = Vec::new();
        match self.stream.peek() {
            TokenKind::Ident => {
                media_type = Some(self.media_feature()?);
                if first.is_none() {
                    first = Some(self.stream.token().clone());
                }
            }
            TokenKind::LParen => {
                if first.is_none() {
                    first = Some(self.stream.lt(1).clone());
                }
                features.push(self.media_expression()?);
            }
            _ => {}
        }

        if media_type.is_none() && features.is_empty() {
            return Ok(None);
        }

        self.read_whitespace();
        while self.stream.match_token(&[TokenKind::Ident]) {
            if !self.stream.token().value.eq_ignore_ascii_case("and") {
                let token = self.stream.token().clone();
                return Err(SyntaxError::unexpected_token(&token));
            }
            self.read_whitespace();
            features.push(self.media_expression()?);
        }

        let first = first.expect("a media query starts with IDENT or LPAREN");
        Ok(Some(MediaQuery::new(
            modifier,
            media_type,
            features,
            first.start,
        )))
    }

    /// A media type or feature name: a bare identifier.
    fn media_feature(&mut self) -> Result<SyntaxUnit, SyntaxError> {
        let token = self.stream.must_match(&[TokenKind::Ident])?;
        Ok(SyntaxUnit::from_token(&token))
    }

    /// `'(' media_feature [':' expression]? ')'`
    fn media_expression(&mut self) -> Result<MediaFeature, SyntaxError> {
        self.stream.must_match(&[TokenKind::LParen])?;
        self.read_whitespace();
        let name = self.media_feature()?;
        self.read_whitespace();

        let mut value = None;
        if self.stream.peek() == TokenKind::Colon {
            self.stream.get();
            self.read_whitespace();
            let start = self.stream.lt(1).start;
            if let Some(text) = self.pseudo_expression() {
                value = Some(SyntaxUnit::new(text, start));
            }
        }

        self.stream.must_match(&[TokenKind::RParen])?;
        self.read_whitespace();
        Ok(MediaFeature::new(name, value))
    }

    /// `@page IDENT? pseudo_page? '{' decls-or-margins '}'`
    fn page(&mut self) -> Result<(), SyntaxError> {
        let token = self.stream.must_match(&[TokenKind::PageSym])?;
        let position = token.start;
        self.read_whitespace();

        let mut id = None;
        if self.stream.match_token(&[TokenKind::Ident]) {
            let token = self.stream.token().clone();
            // `auto` is reserved and rejected as a page name.
            if token.value.eq_ignore_ascii_case("auto") {
                return Err(SyntaxError::unexpected_token(&token));
            }
            id = Some(SyntaxUnit::from_token(&token));
        }

        let mut pseudo = None;
        if self.stream.peek() == TokenKind::Colon {
            pseudo = Some(self.pseudo_page()?);
        }
        self.read_whitespace();

        self.fire(Event::StartPage {
            id: id.clone(),
            pseudo: pseudo.clone(),
            position,
        });
        self.read_declarations(true, true)?;
        self.fire(Event::EndPage { id, pseudo });
        Ok(())
    }

    /// `':' IDENT` after a page name.
    fn pseudo_page(&mut self) -> Result<SyntaxUnit, SyntaxError> {
        self.stream.must_match(&[TokenKind::Colon])?;
        let token = self.stream.must_match(&[TokenKind::Ident])?;
        Ok(SyntaxUnit::from_token(&token))
    }

    /// One margin-box block inside `@page`, if a margin symbol is next.
    pub(super) fn margin(&mut self) -> Result<bool, SyntaxError> {
        let Some((margin, position)) = self.margin_sym() else {
            return Ok(false);
        };
        self.fire(Event::StartPageMargin { margin, position });
        self.read_declarations(true, false)?;
        self.fire(Event::EndPageMargin { margin });
        Ok(true)
    }

    /// Consumes one of the sixteen margin-box symbols.
    fn margin_sym(&mut self) -> Option<(MarginBox, Position)> {
        const SYMS: [TokenKind; 16] = [
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
        ];
        if self.stream.match_token(&SYMS) {
            let token = self.stream.token();
            let margin = MarginBox::from_token(token.kind).expect("matched a margin symbol");
            Some((margin, token.start))
        } else {
            None
        }
    }

    /// `@font-face '{' declarations '}'`
    fn font_face(&mut self) -> Result<(), SyntaxError> {
        let token = self.stream.must_match(&[TokenKind::FontFaceSym])?;
        let position = token.start;
        self.read_whitespace();

        self.fire(Event::StartFontFace { position });
        self.read_declarations(true, false)?;
        self.fire(Event::EndFontFace);
        Ok(())
    }

    // ========================================================================
    // Rulesets
    // ========================================================================

    /// `selectors_group '{' declarations '}'`.
    ///
    /// Returns `false` when no selector begins here (the construct is
    /// something else). A selector-group failure in non-strict mode is
    /// reported and recovered by skipping to the rule's closing brace.
    pub(super) fn ruleset(&mut self) -> Result<bool, SyntaxError> {
        let selectors = match self.selectors_group() {
            Ok(selectors) => selectors,
            Err(error) => {
                if self.options.strict {
                    return Err(error);
                }
                self.fire_error(error);
                self.stream.advance(&[TokenKind::RBrace]);
                // The rule was handled, however badly; the stylesheet
                // loop resumes at the next top-level construct.
                return Ok(true);
            }
        };

        let Some(selectors) = selectors else {
            return Ok(false);
        };

        let position = selectors[0].position;
        self.fire(Event::StartRule {
            selectors: selectors.clone(),
            position,
        });
        self.read_declarations(true, false)?;
        self.fire(Event::EndRule { selectors });
        Ok(true)
    }
}

/// Strips one layer of matching quotes.
fn strip_quotes(text: &str) -> EcoString {
    let stripped = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
    EcoString::from(stripped.unwrap_or(text))
}

/// Strips a `url(…)` wrapper and quotes to yield the bare URI.
fn strip_uri(text: &str) -> EcoString {
    let trimmed = text.trim();
    let inner = trimmed
        .get(..4)
        .filter(|head| head.eq_ignore_ascii_case("url("))
        .and_then(|_| trimmed.get(4..trimmed.len().saturating_sub(1)))
        .filter(|_| trimmed.ends_with(')'))
        .map_or(trimmed, str::trim);
    strip_quotes(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_quotes_handles_both_quote_styles() {
        assert_eq!(strip_quotes("\"utf-8\""), "utf-8");
        assert_eq!(strip_quotes("'utf-8'"), "utf-8");
        assert_eq!(strip_quotes("utf-8"), "utf-8");
        assert_eq!(strip_quotes("\"mismatched'"), "\"mismatched'");
    }

    #[test]
    fn strip_uri_unwraps_url_and_quotes() {
        assert_eq!(strip_uri("url(print.css)"), "print.css");
        assert_eq!(strip_uri("url( \"print.css\" )"), "print.css");
        assert_eq!(strip_uri("URL('print.css')"), "print.css");
        assert_eq!(strip_uri("\"print.css\""), "print.css");
        assert_eq!(strip_uri("print.css"), "print.css");
    }

    #[test]
    fn parse_media_query_returns_structure() {
        let mut parser = Parser::default();
        let query = parser
            .parse_media_query("only screen and (max-width: 600px)")
            .unwrap()
            .unwrap();
        assert_eq!(query.modifier.as_deref(), Some("only"));
        assert_eq!(query.media_type.as_ref().unwrap().text, "screen");
        assert_eq!(query.features.len(), 1);
        assert_eq!(query.features[0].name.text, "max-width");
        assert_eq!(query.features[0].value.as_ref().unwrap().text, "600px");
    }

    #[test]
    fn parse_media_query_feature_only() {
        let mut parser = Parser::default();
        let query = parser.parse_media_query("(color)").unwrap().unwrap();
        assert!(query.media_type.is_none());
        assert_eq!(query.features[0].name.text, "color");
        assert!(query.features[0].value.is_none());
    }

    #[test]
    fn parse_media_query_empty_input_is_none() {
        let mut parser = Parser::default();
        assert_eq!(parser.parse_media_query("").unwrap(), None);
    }

    #[test]
    fn parse_media_query_rejects_trailing_input() {
        let mut parser = Parser::default();
        let err = parser.parse_media_query("screen print").unwrap_err();
        assert!(err.to_string().contains("print"));
    }

    #[test]
    fn parse_media_query_rejects_non_and_connector() {
        let mut parser = Parser::default();
        assert!(parser.parse_media_query("screen or (color)").is_err());
    }

    #[test]
    fn parse_property_value_round_trips() {
        let mut parser = Parser::default();
        let value = parser.parse_property_value(" 1px  solid red ").unwrap().unwrap();
        assert_eq!(value.text, "1px solid red");
        let again = parser.parse_property_value(&value.text).unwrap().unwrap();
        assert_eq!(again.text, value.text);
    }

    #[test]
    fn parse_selector_handles_combinators() {
        let mut parser = Parser::default();
        let selector = parser.parse_selector("ul > li a").unwrap().unwrap();
        assert_eq!(selector.parts.len(), 5);
        assert_eq!(selector.text, "ul > li   a");
    }

    #[test]
    fn parse_selector_rejects_commas() {
        let mut parser = Parser::default();
        assert!(parser.parse_selector("a, b").is_err());
    }

    #[test]
    fn misplaced_charset_is_fatal_in_strict_mode() {
        let mut parser = Parser::new(ParserOptions {
            strict: true,
            ..ParserOptions::default()
        });
        let err = parser
            .parse_stylesheet("a { } @charset \"utf-8\";")
            .unwrap_err();
        assert!(err.to_string().contains("@charset not allowed here"));
    }

    #[test]
    fn malformed_charset_is_fatal_even_when_lenient() {
        let mut parser = Parser::default();
        assert!(parser.parse_stylesheet("@charset utf8;").is_err());
    }
}
