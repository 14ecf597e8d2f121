//! Dispatch rendering of grouped block trees into markup.
//!
//! Every node is looked up by its [`BlockKind`](crate::model::BlockKind) in
//! the active [`HandlerRegistry`]. Kinds without a binding are skipped, and a
//! handler returning `None` renders nothing. Container handlers recurse only
//! through [`RenderContext::render_children`].

pub mod anchors;
mod context;
pub mod handlers;
mod node;
mod registry;
pub mod rich_text;

pub use context::{render_blocks, RenderContext};
pub use anchors::{assign_heading_anchors, heading_anchor, slugify};
pub use node::{nodes_to_html, RenderedNode};
pub use registry::{BlockHandler, ClassMap, HandlerRegistry, RenderOverrides};
pub use rich_text::{render_rich_text, Emphasis};
