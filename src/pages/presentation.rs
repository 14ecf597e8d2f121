//! Slide decks: one slide per section, sub-sections stacked below it.

use super::render_scope;
use crate::model::{Page, PresentationProperties};
use crate::render::{nodes_to_html, RenderContext, RenderOverrides, RenderedNode};
use crate::transform::{partition, HiddenHeadingMatch, PartitionConfig, Section, SubSection};

#[derive(Debug, Clone, Default)]
pub struct Slide {
    pub title: Option<String>,
    pub body: Vec<RenderedNode>,
    pub notes: Vec<RenderedNode>,
    pub references: Vec<RenderedNode>,
    pub sub_slides: Vec<Slide>,
}

impl Slide {
    fn has_own_content(&self) -> bool {
        !(self.body.is_empty() && self.notes.is_empty() && self.references.is_empty())
    }

    /// A `<section>`; with sub-slides, an outer `<section>` stacking this
    /// slide's own content and each sub-slide vertically.
    pub fn to_node(&self) -> RenderedNode {
        if self.sub_slides.is_empty() {
            return self.leaf_node();
        }
        let own = self.has_own_content().then(|| self.leaf_node());
        RenderedNode::element("section")
            .children_from(own)
            .children_from(self.sub_slides.iter().map(Slide::leaf_node))
    }

    fn leaf_node(&self) -> RenderedNode {
        let mut section = RenderedNode::element("section").children_from(self.body.iter().cloned());
        if !self.references.is_empty() {
            section = section.child(
                RenderedNode::element("div")
                    .class(Some("references"))
                    .children_from(self.references.iter().cloned()),
            );
        }
        if !self.notes.is_empty() {
            section = section.child(
                RenderedNode::element("aside")
                    .class(Some("notes"))
                    .children_from(self.notes.iter().cloned()),
            );
        }
        section
    }
}

#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub properties: PresentationProperties,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn to_html(&self) -> String {
        let slides: Vec<RenderedNode> = self.slides.iter().map(Slide::to_node).collect();
        nodes_to_html(&slides)
    }
}

/// Partition settings for slides. `hidden_headings` replaces the default
/// hidden token list when non-empty.
pub fn presentation_config(hidden_headings: &[String], prefix: bool) -> PartitionConfig {
    let config = PartitionConfig::default();
    if hidden_headings.is_empty() && !prefix {
        return config;
    }
    let tokens = if hidden_headings.is_empty() {
        config.hidden_heading_tokens.clone()
    } else {
        hidden_headings.to_vec()
    };
    let matching = if prefix {
        HiddenHeadingMatch::Prefix
    } else {
        HiddenHeadingMatch::Exact
    };
    config.with_hidden_headings(tokens, matching)
}

/// Partitions the page and renders every section as a slide.
pub fn compose_deck(page: &Page, config: &PartitionConfig, overrides: &RenderOverrides) -> Deck {
    let ctx = RenderContext::resolve(None, overrides);
    let slides: Vec<Slide> = partition(page.blocks.clone(), config)
        .iter()
        .map(|section| section_slide(section, &ctx))
        .collect();
    log::debug!("composed deck '{}' with {} slides", page.title, slides.len());

    Deck {
        title: page.title.clone(),
        properties: PresentationProperties::from_page(page),
        slides,
    }
}

fn section_slide(section: &Section, ctx: &RenderContext) -> Slide {
    Slide {
        title: section.title.clone(),
        body: render_scope(&section.content, ctx),
        notes: render_scope(&section.notes, ctx),
        references: render_scope(&section.references, ctx),
        sub_slides: section
            .sub_sections
            .iter()
            .map(|sub| sub_section_slide(sub, ctx))
            .collect(),
    }
}

fn sub_section_slide(sub: &SubSection, ctx: &RenderContext) -> Slide {
    Slide {
        title: sub.title.clone(),
        body: render_scope(&sub.content, ctx),
        notes: render_scope(&sub.notes, ctx),
        references: render_scope(&sub.references, ctx),
        sub_slides: Vec::new(),
    }
}
