//! Block-type to handler bindings and the class lookup table.
//!
//! Both maps are persistent (`im`), so deriving an overridden registry for a
//! nested render shares structure with its parent instead of copying it.

use super::context::RenderContext;
use super::node::RenderedNode;
use crate::model::BlockKind;
use crate::transform::GroupedBlock;
use std::fmt;
use std::sync::Arc;

/// Renders one grouped node. `None` means "render nothing".
pub trait BlockHandler: Send + Sync {
    fn render(&self, node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode>;
}

impl<F> BlockHandler for F
where
    F: Fn(&GroupedBlock<'_>, &RenderContext) -> Option<RenderedNode> + Send + Sync,
{
    fn render(&self, node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
        self(node, ctx)
    }
}

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: im::HashMap<BlockKind, Arc<dyn BlockHandler>>,
}

impl HandlerRegistry {
    /// A registry with no bindings, typically used as a partial override.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bindings for the common block types.
    pub fn defaults() -> Self {
        super::handlers::default_registry()
    }

    pub fn with<H>(&self, kind: BlockKind, handler: H) -> Self
    where
        H: BlockHandler + 'static,
    {
        Self {
            handlers: self.handlers.update(kind, Arc::new(handler)),
        }
    }

    /// Like [`with`](Self::with), for closures whose signature has to be
    /// inferred at the call site.
    pub fn with_fn<F>(&self, kind: BlockKind, handler: F) -> Self
    where
        F: Fn(&GroupedBlock<'_>, &RenderContext) -> Option<RenderedNode> + Send + Sync + 'static,
    {
        self.with(kind, handler)
    }

    /// Removes a binding; blocks of that kind are skipped afterwards.
    pub fn without(&self, kind: BlockKind) -> Self {
        Self {
            handlers: self.handlers.without(&kind),
        }
    }

    /// Bindings of `self` overlaid with those of `other`; `other` wins.
    pub fn merged_with(&self, other: &HandlerRegistry) -> Self {
        Self {
            handlers: other.handlers.clone().union(self.handlers.clone()),
        }
    }

    pub fn get(&self, kind: BlockKind) -> Option<&Arc<dyn BlockHandler>> {
        self.handlers.get(&kind)
    }

    pub fn contains(&self, kind: BlockKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered kinds in a stable order.
    pub fn kinds(&self) -> Vec<BlockKind> {
        let mut kinds: Vec<BlockKind> = self.handlers.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Lookup table from a class slot (a block tag such as `paragraph`, or
/// `link`) to the CSS class added to the element rendered for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassMap {
    classes: im::HashMap<String, String>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(&self, slot: &str, class: &str) -> Self {
        Self {
            classes: self.classes.update(slot.to_string(), class.to_string()),
        }
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.classes.get(slot).map(String::as_str)
    }

    /// Entries of `self` overlaid with those of `other`; `other` wins.
    pub fn merged_with(&self, other: &ClassMap) -> Self {
        Self {
            classes: other.classes.clone().union(self.classes.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Partial handler and class maps supplied by a caller.
#[derive(Debug, Clone, Default)]
pub struct RenderOverrides {
    pub handlers: HandlerRegistry,
    pub classes: ClassMap,
}

impl RenderOverrides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_handler<H>(mut self, kind: BlockKind, handler: H) -> Self
    where
        H: BlockHandler + 'static,
    {
        self.handlers = self.handlers.with(kind, handler);
        self
    }

    pub fn with_handler_fn<F>(self, kind: BlockKind, handler: F) -> Self
    where
        F: Fn(&GroupedBlock<'_>, &RenderContext) -> Option<RenderedNode> + Send + Sync + 'static,
    {
        self.with_handler(kind, handler)
    }

    pub fn with_class(mut self, slot: &str, class: &str) -> Self {
        self.classes = self.classes.with(slot, class);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(tag: &'static str) -> impl Fn(&GroupedBlock<'_>, &RenderContext) -> Option<RenderedNode> + Send + Sync {
        move |_, _| Some(RenderedNode::element(tag))
    }

    #[test]
    fn merged_registry_prefers_the_override() {
        let base = HandlerRegistry::empty()
            .with(BlockKind::Paragraph, marker("p"))
            .with(BlockKind::Quote, marker("blockquote"));
        let overrides = HandlerRegistry::empty().with(BlockKind::Paragraph, marker("div"));

        let merged = base.merged_with(&overrides);
        let ctx = RenderContext::new(merged.clone(), ClassMap::new());
        let block = crate::model::Block::paragraph("p", "x");
        let node = GroupedBlock::Single(&block);

        let rendered = merged
            .get(BlockKind::Paragraph)
            .and_then(|handler| handler.render(&node, &ctx));
        assert_eq!(rendered.as_ref().and_then(RenderedNode::tag), Some("div"));
        assert!(merged.contains(BlockKind::Quote));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn without_removes_only_the_named_kind() {
        let registry = HandlerRegistry::defaults().without(BlockKind::Image);
        assert!(!registry.contains(BlockKind::Image));
        assert!(registry.contains(BlockKind::Paragraph));
        assert!(HandlerRegistry::defaults().contains(BlockKind::Image));
    }

    #[test]
    fn class_map_override_wins() {
        let base = ClassMap::new().with("paragraph", "text").with("quote", "q");
        let merged = base.merged_with(&ClassMap::new().with("paragraph", "lead"));
        assert_eq!(merged.get("paragraph"), Some("lead"));
        assert_eq!(merged.get("quote"), Some("q"));
        assert_eq!(merged.get("code"), None);
    }
}
