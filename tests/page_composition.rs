//! End-to-end composition of page dumps into documents.

use notion2html::api::parser::parse_page_dump;
use notion2html::output::DocumentShell;
use notion2html::pages::presentation_config;
use notion2html::{
    compose_deck, compose_recipe, group_blocks, nodes_to_html, partition, render_blocks, Block,
    BlockKind, ContentOrigin, Document, GroupedBlock, ListKind, NotionToHtml, PageKind,
    PartitionConfig, PipelineConfig, RenderContext, RenderOverrides, RenderedNode, Section,
    Theme, Transition,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> notion2html::Page {
    let json = std::fs::read_to_string(fixture(name)).unwrap();
    parse_page_dump(&json).unwrap()
}

#[test]
fn sections_split_on_level_one_headings() {
    let intro = Block::heading(1, "h-intro", "Intro");
    let hello = Block::paragraph("p-hello", "hello");
    let details = Block::heading(1, "h-details", "Details");
    let note = Block::callout("c-note", "note1");
    let world = Block::paragraph("p-world", "world");

    let sections = partition(
        vec![
            intro.clone(),
            hello.clone(),
            details.clone(),
            note.clone(),
            world.clone(),
        ],
        &PartitionConfig::default(),
    );

    assert_eq!(
        sections,
        vec![
            Section {
                title: Some("Intro".into()),
                content: vec![intro, hello],
                ..Section::default()
            },
            Section {
                title: Some("Details".into()),
                content: vec![details, world],
                notes: vec![note],
                ..Section::default()
            },
        ]
    );
}

#[test]
fn list_items_are_grouped_by_kind() {
    let blocks = vec![
        Block::bulleted_item("a", "a"),
        Block::bulleted_item("b", "b"),
        Block::paragraph("x", "x"),
        Block::numbered_item("1", "1"),
    ];

    assert_eq!(
        group_blocks(&blocks),
        vec![
            GroupedBlock::List {
                kind: ListKind::Bulleted,
                items: vec![&blocks[0], &blocks[1]],
            },
            GroupedBlock::Single(&blocks[2]),
            GroupedBlock::List {
                kind: ListKind::Numbered,
                items: vec![&blocks[3]],
            },
        ]
    );
    assert_eq!(
        nodes_to_html(&render_blocks(&blocks, None, &RenderOverrides::none())),
        concat!(
            r#"<ul data-block-id="list-a"><li data-block-id="a">a</li><li data-block-id="b">b</li></ul>"#,
            r#"<p data-block-id="x">x</p>"#,
            r#"<ol data-block-id="list-1"><li data-block-id="1">1</li></ol>"#,
        )
    );
}

#[test]
fn recipe_dump_composes_into_parts() {
    let page = load("negroni.json");
    assert_eq!(page.title, "Negroni");

    let recipe = compose_recipe(&page, &RenderOverrides::none()).unwrap();

    assert_eq!(recipe.tags, vec!["stirred", "bitter"]);
    assert_eq!(
        nodes_to_html(&recipe.introduction),
        r#"<p data-block-id="intro">Equal parts, <strong>always</strong></p>"#
    );
    assert_eq!(
        nodes_to_html(&recipe.ingredients),
        concat!(
            r#"<ul data-block-id="list-gin">"#,
            r#"<li data-block-id="gin">30ml gin</li>"#,
            r#"<li data-block-id="campari">30ml Campari</li>"#,
            r#"<li data-block-id="vermouth">30ml sweet vermouth</li>"#,
            "</ul>"
        )
    );

    // The unsupported block renders nothing; the nested callout became a tip.
    assert_eq!(recipe.method.len(), 2);
    let method = nodes_to_html(&recipe.method);
    assert!(method.contains(r#"<details data-block-id="garnish-toggle">"#));
    assert!(!method.contains("Express the oils"));
    assert_eq!(recipe.tips.len(), 1);
    assert!(nodes_to_html(&recipe.tips).contains("Express the oils first."));
}

#[test]
fn deck_dump_honours_properties_and_hidden_headings() {
    let page = load("deck.json");

    let deck = compose_deck(
        &page,
        &presentation_config(&["--".to_string()], false),
        &RenderOverrides::none(),
    );

    assert_eq!(deck.title, "Ownership in Rust");
    assert_eq!(deck.properties.theme, Theme::Dracula);
    // Unknown transition names fall back to the default.
    assert_eq!(deck.properties.transition, Transition::Slide);
    assert!(deck.properties.slide_number);

    assert_eq!(deck.slides.len(), 2);
    assert_eq!(
        nodes_to_html(&deck.slides[0].body),
        r#"<h1 data-block-id="s1" id="intro">Intro</h1><p data-block-id="p1">hello</p>"#
    );

    let details = &deck.slides[1];
    assert_eq!(details.notes.len(), 1);
    let sub = &details.sub_slides[0];
    assert!(sub.body.is_empty(), "hidden heading must not render");
    assert_eq!(sub.references.len(), 1);
}

#[test]
fn overrides_replace_handlers_and_classes() {
    let overrides = RenderOverrides::none()
        .with_handler_fn(BlockKind::Paragraph, |node, ctx| {
            let block = node.block()?;
            Some(
                RenderedNode::element("div")
                    .class(ctx.classes().get("paragraph"))
                    .child(RenderedNode::text(block.plain_text().to_uppercase())),
            )
        })
        .with_class("paragraph", "lede");
    let blocks = vec![Block::paragraph("p", "quiet"), Block::quote("q", "as is")];

    let ambient = RenderContext::resolve(None, &overrides);
    let nested = render_blocks(&blocks, Some(&ambient), &RenderOverrides::none());

    assert_eq!(
        nodes_to_html(&nested),
        r#"<div data-block-id="p" class="lede">QUIET</div><blockquote data-block-id="q">as is</blockquote>"#
    );
}

#[tokio::test]
async fn pipeline_writes_a_complete_document() {
    let output = std::env::temp_dir()
        .join(format!("notion2html-{}", uuid::Uuid::new_v4()))
        .join("deck.html");
    let config = PipelineConfig {
        origin: ContentOrigin::JsonDump(fixture("deck.json")),
        kind: PageKind::Presentation,
        output_file: Some(output.clone()),
        depth: 10,
        hidden_headings: Vec::new(),
        prefix_hidden: false,
        verbose: false,
    };

    let report = NotionToHtml::new(&config).run().await.unwrap();

    assert!(report.is_success());
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<title>Ownership in Rust</title>"));
    assert!(html.contains("theme/dracula.css"));
    assert!(html.contains(r#"<aside class="notes">"#));
    assert!(!html.contains(r#"data-block-id="toc""#));
    std::fs::remove_dir_all(output.parent().unwrap()).unwrap();
}

#[test]
fn shell_renders_every_document_kind() {
    let shell = DocumentShell::new().unwrap();
    let recipe = compose_recipe(&load("negroni.json"), &RenderOverrides::none()).unwrap();

    let html = shell.render(&Document::Recipe(recipe)).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<li>stirred</li>"));
    assert!(html.contains(r#"<section class="recipe-ingredients"><h2>Ingredients</h2>"#));
}
