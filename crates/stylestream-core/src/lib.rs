// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Streaming, event-driven CSS parser.
//!
//! This crate parses CSS 2.1 extended with CSS3 selectors, CSS3 media
//! queries, paged-media margin boxes, `@font-face`, and the IE vendor
//! hacks (`*` star hack, `_` underscore hack, `progid:` filters). It
//! never builds a document tree: the grammar engine emits an ordered
//! stream of [`Event`]s that consumers (linters, beautifiers, CSS-in-X
//! compilers) interpret as they see fit.
//!
//! Data flows leaves-first through three layers:
//!
//! ```text
//! input text ─▶ TextReader ─▶ TokenStream ─▶ Parser ─▶ event listeners
//! ```
//!
//! - [`TextReader`] — a line/column-aware character source with atomic
//!   literal and pattern consumption.
//! - [`TokenStream`] — a table-driven tokenizer with bounded
//!   bidirectional lookahead and transparent push-back.
//! - [`Parser`] — a hand-written recursive-descent grammar engine with
//!   panic-mode error recovery at rule and declaration boundaries.
//!
//! # Example
//!
//! ```
//! use stylestream_core::{Event, Parser, ParserOptions};
//!
//! let mut properties = Vec::new();
//! {
//!     let mut parser = Parser::new(ParserOptions::default());
//!     parser.add_listener(|event| {
//!         if let Event::Property { property, value, .. } = event {
//!             properties.push(format!("{property}: {value}"));
//!         }
//!     });
//!     parser
//!         .parse_stylesheet("a { color: red; margin: 0 2px; }")
//!         .unwrap();
//! }
//! assert_eq!(properties, ["color: red", "margin: 0 2px"]);
//! ```

pub mod error;
pub mod events;
pub mod nodes;
pub mod parser;
pub mod position;
pub mod reader;
pub mod stream;
pub mod table;
pub mod token;


pub use error::{ReaderError, SyntaxError};
pub use events::{Event, EventDispatcher, ListenerId};
pub use nodes::{
    Combinator, CombinatorKind, MarginBox, MediaFeature, MediaQuery, PropertyName, PropertyValue,
    PropertyValuePart, Selector, SelectorComponent, SelectorPart, SelectorSubPart,
    SelectorSubPartKind, SyntaxUnit, ValuePartKind,
};
pub use parser::{Parser, ParserOptions};
pub use position::{Position, Span};
pub use reader::TextReader;
pub use stream::{MAX_LOOKAHEAD, TokenStream};
pub use table::{Matcher, TokenDescriptor, TokenTable, css_table};
pub use token::{Token, TokenKind};
