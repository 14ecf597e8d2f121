//! Rich text spans to markup.
//!
//! Each span gets at most one emphasis element, chosen by fixed precedence:
//! bold, code, italic, strikethrough, underline. Annotations do not stack,
//! so a bold italic span renders as `<strong>` only. The link, if any, wraps
//! the result; links to other schemes than http, https and mailto (or a
//! site path) are dropped and the span renders unlinked.

use super::context::RenderContext;
use super::node::RenderedNode;
use crate::types::{is_safe_href, Annotations, RichTextItem, RichTextType};

/// The single emphasis a span renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Bold,
    Code,
    Italic,
    Strikethrough,
    Underline,
    Plain,
}

impl Emphasis {
    /// First matching annotation wins.
    pub fn of(annotations: &Annotations) -> Emphasis {
        if annotations.bold {
            Emphasis::Bold
        } else if annotations.code {
            Emphasis::Code
        } else if annotations.italic {
            Emphasis::Italic
        } else if annotations.strikethrough {
            Emphasis::Strikethrough
        } else if annotations.underline {
            Emphasis::Underline
        } else {
            Emphasis::Plain
        }
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Emphasis::Bold => Some("strong"),
            Emphasis::Code => Some("code"),
            Emphasis::Italic => Some("em"),
            Emphasis::Strikethrough => Some("s"),
            Emphasis::Underline => Some("u"),
            Emphasis::Plain => None,
        }
    }
}

pub fn render_rich_text(items: &[RichTextItem], ctx: &RenderContext) -> Vec<RenderedNode> {
    items.iter().map(|item| render_span(item, ctx)).collect()
}

pub fn render_span(item: &RichTextItem, ctx: &RenderContext) -> RenderedNode {
    let styled = match &item.text_type {
        RichTextType::Equation { expression } => RenderedNode::element("span")
            .class(Some("equation"))
            .child(RenderedNode::text(expression.as_str())),
        _ => emphasize(item),
    };

    match item.link_target() {
        Some(url) if !is_safe_href(url) => {
            log::warn!("dropping link with unsupported target '{}'", url);
            styled
        }
        Some(url) => RenderedNode::element("a")
            .attr("href", url)
            .class(ctx.classes().get("link"))
            .child(styled),
        None => styled,
    }
}

fn emphasize(item: &RichTextItem) -> RenderedNode {
    let text = RenderedNode::text(item.plain_text.as_str());
    match Emphasis::of(&item.annotations).tag() {
        Some(tag) => RenderedNode::element(tag).child(text),
        None => match item.annotations.color.css_class() {
            Some(class) => RenderedNode::element("span")
                .class(Some(&class))
                .child(text),
            None => text,
        },
    }
}
