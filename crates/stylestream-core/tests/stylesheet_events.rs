// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event stream tests for the CSS parser.
//!
//! Each test parses a small stylesheet and checks the exact sequence of
//! emitted events, the way a linter or beautifier would consume them.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use stylestream_core::{Event, Parser, ParserOptions, SyntaxError};

/// Parses `input` and collects every event plus the overall result.
fn collect(input: &str, options: ParserOptions) -> (Vec<Event>, Result<(), SyntaxError>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut parser = Parser::new(options);
    parser.add_listener(move |event| sink.borrow_mut().push(event.clone()));
    let result = parser.parse_stylesheet(input);
    drop(parser);
    let events = Rc::try_unwrap(events).expect("parser dropped").into_inner();
    (events, result)
}

fn names(events: &[Event]) -> Vec<&'static str> {
    events.iter().map(Event::name).collect()
}

#[test]
fn simple_rule_event_sequence() {
    let (events, result) = collect("a { color: red; }", ParserOptions::default());
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "startrule",
            "property",
            "endrule",
            "endstylesheet",
        ]
    );

    let Event::StartRule { selectors, .. } = &events[1] else {
        panic!("expected startrule");
    };
    assert_eq!(selectors.len(), 1);
    assert_eq!(selectors[0].text, "a");

    let Event::Property {
        property,
        value,
        important,
        ..
    } = &events[2]
    else {
        panic!("expected property");
    };
    assert_eq!(property.text, "color");
    assert_eq!(property.hack, None);
    assert_eq!(value.text, "red");
    assert!(!important);
}

#[test]
fn charset_then_rule() {
    let (events, result) = collect("@charset \"utf-8\"; p { }", ParserOptions::default());
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "charset",
            "startrule",
            "endrule",
            "endstylesheet",
        ]
    );
    let Event::Charset { charset, .. } = &events[1] else {
        panic!("expected charset");
    };
    assert_eq!(charset, "utf-8");
}

#[test]
fn media_block_wraps_nested_rules() {
    let (events, result) = collect(
        "@media screen and (max-width: 600px) { .x { a: 1 } }",
        ParserOptions::default(),
    );
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "startmedia",
            "startrule",
            "property",
            "endrule",
            "endmedia",
            "endstylesheet",
        ]
    );

    let Event::StartMedia { media, .. } = &events[1] else {
        panic!("expected startmedia");
    };
    assert_eq!(media.len(), 1);
    let query = &media[0];
    assert_eq!(query.modifier, None);
    assert_eq!(query.media_type.as_ref().unwrap().text, "screen");
    assert_eq!(query.features.len(), 1);
    assert_eq!(query.features[0].name.text, "max-width");
    assert_eq!(query.features[0].value.as_ref().unwrap().text, "600px");

    // The end event carries the same media list.
    let Event::EndMedia { media: end_media } = &events[5] else {
        panic!("expected endmedia");
    };
    assert_eq!(end_media, media);
}

#[test]
fn vendor_hacks_mark_the_property() {
    let options = ParserOptions {
        star_hack: true,
        underscore_hack: true,
        ..ParserOptions::default()
    };
    let (events, result) = collect("*.foo { _color: red; *color: blue }", options);
    result.unwrap();

    let properties: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::Property { property, .. } => Some(property.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].text, "color");
    assert_eq!(properties[0].hack, Some('_'));
    assert_eq!(properties[1].text, "color");
    assert_eq!(properties[1].hack, Some('*'));
}

#[test]
fn recovered_declaration_error_keeps_parsing() {
    let (events, result) = collect("a { color: ; } b { x: 1 }", ParserOptions::default());
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "startrule",
            "error",
            "endrule",
            "startrule",
            "property",
            "endrule",
            "endstylesheet",
        ]
    );

    let Event::Error { error } = &events[2] else {
        panic!("expected error");
    };
    assert_eq!(error.line, 1);
    assert_eq!(error.col, 12);

    let Event::StartRule { selectors, .. } = &events[4] else {
        panic!("expected second rule");
    };
    assert_eq!(selectors[0].text, "b");
}

#[test]
fn four_digit_hash_selects_but_does_not_color() {
    // As a selector, #abcd is a perfectly good id.
    let (events, result) = collect("#abcd { }", ParserOptions::default());
    result.unwrap();
    assert_eq!(
        names(&events),
        vec!["startstylesheet", "startrule", "endrule", "endstylesheet"]
    );
    let Event::StartRule { selectors, .. } = &events[1] else {
        panic!("expected startrule");
    };
    assert_eq!(selectors[0].text, "#abcd");

    // As a value, it is neither 3 nor 6 hex digits.
    let (events, result) = collect("p { color: #abcd }", ParserOptions::default());
    result.unwrap();
    assert!(names(&events).contains(&"error"));
}

#[test]
fn strict_mode_propagates_declaration_errors() {
    let (events, result) = collect(
        "a { color: ; } b { x: 1 }",
        ParserOptions {
            strict: true,
            ..ParserOptions::default()
        },
    );
    let err = result.unwrap_err();
    assert_eq!(err.line, 1);
    assert!(!names(&events).contains(&"error"));
}

#[test]
fn empty_input_yields_only_the_stylesheet_pair() {
    let (events, result) = collect("", ParserOptions::default());
    result.unwrap();
    assert_eq!(names(&events), vec!["startstylesheet", "endstylesheet"]);
}

#[test]
fn comment_only_input_yields_only_the_stylesheet_pair() {
    let (events, result) = collect("/* nothing to see */", ParserOptions::default());
    result.unwrap();
    assert_eq!(names(&events), vec!["startstylesheet", "endstylesheet"]);
}

#[test]
fn imports_and_namespaces_fire_with_payloads() {
    let (events, result) = collect(
        "@import url(\"print.css\") print;\n\
         @import 'screen.css';\n\
         @namespace svg url(http://www.w3.org/2000/svg);\n\
         a { x: 1 }",
        ParserOptions::default(),
    );
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "import",
            "import",
            "namespace",
            "startrule",
            "property",
            "endrule",
            "endstylesheet",
        ]
    );

    let Event::Import { uri, media, .. } = &events[1] else {
        panic!("expected import");
    };
    assert_eq!(uri, "print.css");
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].media_type.as_ref().unwrap().text, "print");

    let Event::Import { uri, media, .. } = &events[2] else {
        panic!("expected import");
    };
    assert_eq!(uri, "screen.css");
    assert!(media.is_empty());

    let Event::Namespace { prefix, uri, .. } = &events[3] else {
        panic!("expected namespace");
    };
    assert_eq!(prefix.as_deref(), Some("svg"));
    assert_eq!(uri, "http://www.w3.org/2000/svg");
}

#[test]
fn cdo_cdc_wrappers_are_skipped() {
    let (events, result) = collect("<!-- a { x: 1 } -->", ParserOptions::default());
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "startrule",
            "property",
            "endrule",
            "endstylesheet",
        ]
    );
}

#[test]
fn page_with_margins_and_pseudo() {
    let (events, result) = collect(
        "@page intro:first { margin: 1in; @top-center { content: \"draft\" } }",
        ParserOptions::default(),
    );
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "startpage",
            "property",
            "startpagemargin",
            "property",
            "endpagemargin",
            "endpage",
            "endstylesheet",
        ]
    );

    let Event::StartPage { id, pseudo, .. } = &events[1] else {
        panic!("expected startpage");
    };
    assert_eq!(id.as_ref().unwrap().text, "intro");
    assert_eq!(pseudo.as_ref().unwrap().text, "first");

    let Event::StartPageMargin { margin, .. } = &events[3] else {
        panic!("expected startpagemargin");
    };
    assert_eq!(margin.to_string(), "@top-center");
}

#[test]
fn page_named_auto_is_rejected() {
    let (_, result) = collect(
        "@page AUTO { }",
        ParserOptions {
            strict: true,
            ..ParserOptions::default()
        },
    );
    assert!(result.is_err());
}

#[test]
fn font_face_block() {
    let (events, result) = collect(
        "@font-face { font-family: \"Vera\"; src: url(vera.woff) }",
        ParserOptions::default(),
    );
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "startfontface",
            "property",
            "property",
            "endfontface",
            "endstylesheet",
        ]
    );
}

#[test]
fn page_rules_allowed_inside_media() {
    let (events, result) = collect(
        "@media print { @page { margin: 2cm } a { x: 1 } }",
        ParserOptions::default(),
    );
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "startmedia",
            "startpage",
            "property",
            "endpage",
            "startrule",
            "property",
            "endrule",
            "endmedia",
            "endstylesheet",
        ]
    );
}

#[test]
fn important_flag_is_reported() {
    let (events, result) = collect(
        "a { margin: 0 ! important; padding: 0 }",
        ParserOptions::default(),
    );
    result.unwrap();
    let flags: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::Property { important, .. } => Some(*important),
            _ => None,
        })
        .collect();
    assert_eq!(flags, vec![true, false]);
}

#[test]
fn selector_failure_skips_to_closing_brace() {
    // The doubled combinator fails selector parsing; the whole rule is
    // discarded and parsing resumes after its closing brace.
    let (events, result) = collect("a >> b { x: 1 } c { y: 2 }", ParserOptions::default());
    result.unwrap();
    assert_eq!(
        names(&events),
        vec![
            "startstylesheet",
            "error",
            "startrule",
            "property",
            "endrule",
            "endstylesheet",
        ]
    );
    let Event::StartRule { selectors, .. } = &events[2] else {
        panic!("expected the recovered rule");
    };
    assert_eq!(selectors[0].text, "c");
}

#[test]
fn start_and_end_events_balance() {
    let input = "@charset \"utf-8\";\n\
        @import url(a.css);\n\
        @media screen { p { a: 1 } @page { b: 2 } }\n\
        @page :left { @bottom-right-corner { c: 3 } }\n\
        @font-face { d: 4 }\n\
        e, f > g { h: 5 }\n";
    let (events, result) = collect(input, ParserOptions::default());
    result.unwrap();

    let counts = |name: &str| names(&events).iter().filter(|n| **n == name).count();
    for (start, end) in [
        ("startstylesheet", "endstylesheet"),
        ("startmedia", "endmedia"),
        ("startpage", "endpage"),
        ("startpagemargin", "endpagemargin"),
        ("startfontface", "endfontface"),
        ("startrule", "endrule"),
    ] {
        assert_eq!(counts(start), counts(end), "unbalanced {start}/{end}");
    }
    assert_eq!(counts("startrule"), 2);
    assert_eq!(counts("startpage"), 2);
    assert_eq!(counts("error"), 0);
}

#[test]
fn errors_cite_positions_inside_the_input() {
    let input = "a { b: }\nc { d: 1 }\ne { f: #abcd }";
    let (events, result) = collect(input, ParserOptions::default());
    result.unwrap();
    let line_count = input.lines().count() as u32;
    for event in &events {
        if let Event::Error { error } = event {
            assert!(error.line >= 1 && error.line <= line_count);
            assert!(error.col >= 1);
        }
    }
}

#[test]
fn style_attribute_declarations() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut parser = Parser::new(ParserOptions::default());
    parser.add_listener(move |event: &Event| sink.borrow_mut().push(event.clone()));
    parser
        .parse_style_attribute("color: red; margin: 0")
        .unwrap();
    drop(parser);
    let events = Rc::try_unwrap(events).unwrap().into_inner();
    assert_eq!(names(&events), vec!["property", "property"]);
}

#[test]
fn mid_declaration_eof_is_fatal_in_strict_mode() {
    let (_, result) = collect(
        "a { color: ",
        ParserOptions {
            strict: true,
            ..ParserOptions::default()
        },
    );
    assert!(result.is_err());
}

#[test]
fn listeners_can_be_removed() {
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let mut parser = Parser::new(ParserOptions::default());
    let id = parser.add_listener(move |_: &Event| *counter.borrow_mut() += 1);
    parser.parse_stylesheet("a { }").unwrap();
    let after_first = *count.borrow();
    assert!(parser.remove_listener(id));
    parser.parse_stylesheet("b { }").unwrap();
    assert_eq!(*count.borrow(), after_first);
}
