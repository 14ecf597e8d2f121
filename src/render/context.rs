//! The render context shared by one top-level render call.
//!
//! A call without an ambient context establishes one from the defaults plus
//! the caller's overrides. A nested call inherits the ambient context and
//! merges its own overrides on top. The context is passed explicitly to
//! every handler; there is no global state.

use super::node::RenderedNode;
use super::registry::{ClassMap, HandlerRegistry, RenderOverrides};
use super::rich_text::render_rich_text;
use crate::constants::BLOCK_MAX_RENDER_DEPTH;
use crate::model::{Block, BlockKind};
use crate::transform::{group_blocks, GroupedBlock};
use crate::types::RichTextItem;

#[derive(Debug, Clone)]
pub struct RenderContext {
    registry: HandlerRegistry,
    classes: ClassMap,
    depth: usize,
}

impl RenderContext {
    pub fn new(registry: HandlerRegistry, classes: ClassMap) -> Self {
        Self {
            registry,
            classes,
            depth: 0,
        }
    }

    /// Establishes a context if `ambient` is `None`, otherwise inherits it
    /// with `overrides` merged over it.
    pub fn resolve(ambient: Option<&RenderContext>, overrides: &RenderOverrides) -> RenderContext {
        match ambient {
            None => {
                let registry = HandlerRegistry::defaults().merged_with(&overrides.handlers);
                log::debug!("establishing render context with {} handlers", registry.len());
                RenderContext::new(registry, overrides.classes.clone())
            }
            Some(parent) => RenderContext {
                registry: parent.registry.merged_with(&overrides.handlers),
                classes: parent.classes.merged_with(&overrides.classes),
                depth: parent.depth,
            },
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }

    /// Container nesting level of the blocks currently being rendered.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn class_for(&self, kind: BlockKind) -> Option<&str> {
        self.classes.get(kind.as_str())
    }

    /// Dispatches a grouped sequence. Kinds without a handler are dropped
    /// before any handler runs.
    pub fn render_nodes(&self, nodes: &[GroupedBlock<'_>]) -> Vec<RenderedNode> {
        let supported: Vec<&GroupedBlock<'_>> = nodes
            .iter()
            .filter(|node| self.registry.contains(node.kind()))
            .collect();
        if supported.len() < nodes.len() {
            log::debug!(
                "skipping {} node(s) without a handler at depth {}",
                nodes.len() - supported.len(),
                self.depth
            );
        }
        supported
            .into_iter()
            .filter_map(|node| self.render_node(node))
            .collect()
    }

    /// Runs the handler bound to one node's kind and keys the result.
    pub fn render_node(&self, node: &GroupedBlock<'_>) -> Option<RenderedNode> {
        let handler = self.registry.get(node.kind())?;
        let rendered = handler.render(node, self)?;
        Some(match node.key() {
            Some(key) => rendered.keyed(&key),
            None => rendered,
        })
    }

    /// Groups and renders the children of a container block one level
    /// deeper. This is the only place rendering recurses.
    pub fn render_children(&self, children: &[Block]) -> Vec<RenderedNode> {
        if children.is_empty() {
            return Vec::new();
        }
        if self.depth >= BLOCK_MAX_RENDER_DEPTH {
            log::warn!(
                "render depth limit {} reached; dropping {} nested block(s)",
                BLOCK_MAX_RENDER_DEPTH,
                children.len()
            );
            return Vec::new();
        }
        let nested = RenderContext {
            depth: self.depth + 1,
            ..self.clone()
        };
        nested.render_nodes(&group_blocks(children))
    }

    pub fn render_rich_text(&self, items: &[RichTextItem]) -> Vec<RenderedNode> {
        render_rich_text(items, self)
    }
}

/// Top-level entry point: resolve the context, group, dispatch.
pub fn render_blocks(
    blocks: &[Block],
    ambient: Option<&RenderContext>,
    overrides: &RenderOverrides,
) -> Vec<RenderedNode> {
    let ctx = RenderContext::resolve(ambient, overrides);
    ctx.render_nodes(&group_blocks(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::node::nodes_to_html;

    #[test]
    fn unregistered_kinds_are_skipped() {
        let blocks = vec![
            Block::paragraph("a", "one"),
            Block::unsupported("u", "ai_block"),
            Block::paragraph("b", "two"),
            Block::embed("e", "https://embed.example"),
        ];
        let rendered = render_blocks(&blocks, None, &RenderOverrides::none());
        let keys: Vec<_> = rendered.iter().filter_map(RenderedNode::key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn overrides_replace_default_handlers() {
        let overrides = RenderOverrides::none().with_handler_fn(BlockKind::Paragraph, |node, ctx| {
            let block = node.block()?;
            Some(RenderedNode::element("span").children_from(ctx.render_rich_text(
                block.rich_text().unwrap_or_default(),
            )))
        });
        let html = nodes_to_html(&render_blocks(
            &[Block::paragraph("p", "hi")],
            None,
            &overrides,
        ));
        assert_eq!(html, "<span data-block-id=\"p\">hi</span>");
    }

    #[test]
    fn nested_render_inherits_and_merges() {
        let root = RenderContext::resolve(
            None,
            &RenderOverrides::none().with_class("paragraph", "root"),
        );
        let nested = RenderContext::resolve(
            Some(&root),
            &RenderOverrides::none()
                .with_class("quote", "nested")
                .with_handler_fn(BlockKind::Divider, |_, _| None),
        );

        assert_eq!(nested.class_for(BlockKind::Paragraph), Some("root"));
        assert_eq!(nested.class_for(BlockKind::Quote), Some("nested"));
        assert!(nested.registry().contains(BlockKind::Toggle));
        assert!(root.class_for(BlockKind::Quote).is_none());
    }

    #[test]
    fn container_children_see_the_same_context() {
        let ctx = RenderContext::resolve(
            None,
            &RenderOverrides::none().with_class("paragraph", "body"),
        );
        let toggle = Block::toggle("t", "more", vec![Block::paragraph("inner", "x")]);
        let html = nodes_to_html(&ctx.render_nodes(&group_blocks(&[toggle])));
        assert!(html.contains("<p data-block-id=\"inner\" class=\"body\">x</p>"));
    }

    #[test]
    fn depth_limit_stops_recursion() {
        let mut block = Block::paragraph("leaf", "leaf");
        for level in 0..(BLOCK_MAX_RENDER_DEPTH + 5) {
            block = Block::toggle(&format!("t{}", level), "t", vec![block]);
        }
        let html = nodes_to_html(&render_blocks(&[block], None, &RenderOverrides::none()));
        let outermost = format!("data-block-id=\"t{}\"", BLOCK_MAX_RENDER_DEPTH + 4);
        assert!(html.contains(&outermost));
        assert!(!html.contains("data-block-id=\"leaf\""));
    }
}
