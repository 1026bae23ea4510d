/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Markdown text through comrak and the serializer to DITA events.
 */

use comrak::{Arena, Options, parse_document};
use comrak_to_dita::{configure_options, convert_document, parse_markdown};
use dita_markdown::{
    Attribute, Event, InputSource, SerializeError, SerializerConfig, acquire, check_balanced,
    to_events,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn events(markdown: &str, config: SerializerConfig) -> Vec<Event> {
    to_events(&parse_markdown(markdown, Some("doc.md")), config).unwrap()
}

fn end() -> Event {
    Event::EndElement
}

#[test]
fn test_front_matter_to_prolog() {
    let markdown = "---\nauthor: Ada\nkeyword: rust\nzeta: 1\n---\n\n# Intro\n";
    assert_eq!(
        events(markdown, SerializerConfig::default()),
        vec![
            Event::start("topic", "- topic/topic ", &[Attribute::new("id", "intro")]),
            Event::start("title", "- topic/title ", &[Attribute::new("outputclass", "h1")]),
            Event::characters("Intro"),
            end(),
            Event::start("prolog", "- topic/prolog ", &[]),
            Event::start("author", "- topic/author ", &[]),
            Event::characters("Ada"),
            end(),
            Event::start("metadata", "- topic/metadata ", &[]),
            Event::start("keywords", "- topic/keywords ", &[]),
            Event::start("keyword", "- topic/keyword ", &[]),
            Event::characters("rust"),
            end(),
            end(),
            end(),
            Event::start(
                "data",
                "- topic/data ",
                &[Attribute::new("name", "zeta"), Attribute::new("value", "1")]
            ),
            end(),
            end(),
            end(),
            Event::EndDocument,
        ]
    );
}

/// Element names in start order, for checking topic structure.
fn outline(events: &[Event]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::StartElement { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_headings_become_title_and_sections() {
    let markdown = "---\nauthor: Ada\n---\n\n# Install\n\nIntro text.\n\n## Linux\n\nRun make.\n";
    let events = events(markdown, SerializerConfig::default());
    assert_eq!(
        outline(&events),
        vec!["topic", "title", "prolog", "author", "body", "p", "section", "title", "p"]
    );
    assert_eq!(
        &events[events.len() - 11..],
        &[
            Event::start("section", "- topic/section ", &[]),
            Event::start("title", "- topic/title ", &[Attribute::new("outputclass", "h2")]),
            Event::characters("Linux"),
            end(),
            Event::start("p", "- topic/p ", &[]),
            Event::characters("Run make."),
            end(),
            end(),
            end(),
            end(),
            Event::EndDocument,
        ][..]
    );
}

#[test]
fn test_heading_in_list_item_stays_in_body() {
    let events = events("# Top\n\n- ## Inner\n", SerializerConfig::default());
    assert_eq!(outline(&events), vec!["topic", "title", "body", "ul", "li", "p"]);
    assert!(events.contains(&Event::start(
        "p",
        "- topic/p ",
        &[Attribute::new("outputclass", "h2")]
    )));
}

#[test]
fn test_structured_author_becomes_data() {
    let events = events("---\nauthor:\n  name: x\n---\n", SerializerConfig::default());
    assert!(!events.iter().any(|e| matches!(
        e,
        Event::StartElement { name, .. } if name == "author"
    )));
    assert!(events.contains(&Event::start(
        "data",
        "- topic/data ",
        &[
            Attribute::new("name", "author"),
            Attribute::new("value", "{name: x}")
        ]
    )));
}

#[test]
fn test_id_key_depends_on_flag() {
    let markdown = "---\nid: intro-topic\n---\n\n# Heading\n";
    let id_data = Event::start(
        "data",
        "- topic/data ",
        &[
            Attribute::new("name", "id"),
            Attribute::new("value", "intro-topic"),
        ],
    );

    let off = events(markdown, SerializerConfig::default());
    assert!(off.contains(&id_data));
    assert_eq!(
        off[0],
        Event::start("topic", "- topic/topic ", &[Attribute::new("id", "heading")])
    );

    let on = events(markdown, SerializerConfig::default().with_identifier_from_metadata(true));
    assert!(!on.contains(&id_data));
    assert_eq!(
        on[0],
        Event::start(
            "topic",
            "- topic/topic ",
            &[Attribute::new("id", "intro-topic")]
        )
    );
}

#[test]
fn test_footnotes_fail_with_unmapped_node() {
    let arena = Arena::new();
    let mut options = Options::default();
    configure_options(&mut options);
    options.extension.footnotes = true;
    let root = parse_document(&arena, "Text[^1]\n\n[^1]: note\n", &options);
    let doc = convert_document(root, Some("notes.md"));

    match to_events(&doc, SerializerConfig::default()) {
        Err(SerializeError::UnmappedNode(ctx)) => {
            assert_eq!(ctx.document, "notes.md");
            assert_eq!(ctx.node, "footnote_reference");
            assert_eq!(ctx.position.map(|p| p.line), Some(1));
            assert_eq!(ctx.path, "topic/body/p");
        }
        other => panic!("Expected UnmappedNode, got {:?}", other),
    }
}

#[test]
fn test_bom_does_not_change_events() {
    let with_bom: &[u8] = b"\xEF\xBB\xBF---\nauthor: Ada\n---\n\n# Title\n\nBody *text*.\n";
    let without_bom: &[u8] = b"---\nauthor: Ada\n---\n\n# Title\n\nBody *text*.\n";

    let a = acquire(InputSource::from_reader(with_bom)).unwrap();
    let b = acquire(InputSource::from_reader(without_bom)).unwrap();
    assert_eq!(
        events(&a.text, SerializerConfig::default()),
        events(&b.text, SerializerConfig::default())
    );
}

#[test]
fn test_relative_and_absolute_links() {
    let events = events(
        "[local](other.md) [site](https://example.com/)\n",
        SerializerConfig::default(),
    );
    assert!(events.contains(&Event::start(
        "xref",
        "- topic/xref ",
        &[
            Attribute::new("href", "other.md"),
            Attribute::new("format", "markdown")
        ]
    )));
    assert!(events.contains(&Event::start(
        "xref",
        "- topic/xref ",
        &[
            Attribute::new("href", "https://example.com/"),
            Attribute::new("scope", "external"),
            Attribute::new("format", "html")
        ]
    )));
}

proptest! {
    #[test]
    fn prop_supported_markdown_is_balanced(
        lines in prop::collection::vec(
            prop::sample::select(vec![
                "# Heading", "## Sub *heading*", "plain text", "**bold** and _em_",
                "- item", "1. first", "> quote", "`code`", "```rust", "```", "---",
                "| a | b |", "|---|---|", "[link](x.md)", "![img](a.png)", "<div>", "",
                "line  ", "~~gone~~", "x^2^", "~sub~",
            ]),
            0..24,
        )
    ) {
        let markdown = lines.join("\n");
        let events = to_events(&parse_markdown(&markdown, None), SerializerConfig::default()).unwrap();
        prop_assert!(check_balanced(&events).is_ok());
        prop_assert_eq!(events.last(), Some(&Event::EndDocument));
        let names = outline(&events);
        prop_assert_eq!(names.get(..2), Some(&["topic", "title"][..]));
    }
}
