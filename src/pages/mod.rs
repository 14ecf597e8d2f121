//! Page kinds built from the transform and render stages.
//!
//! Each composer takes an already prepared [`Page`](crate::model::Page) and
//! a set of [`RenderOverrides`](crate::render::RenderOverrides), and resolves
//! one render context for the whole page.

mod article;
mod presentation;
mod recipe;

pub use article::{compose_article, Article, ArticleKind, TocEntry};
pub use presentation::{compose_deck, presentation_config, Deck, Slide};
pub use recipe::{compose_recipe, Recipe, RecipeSection};

use crate::model::Block;
use crate::render::{RenderContext, RenderedNode};
use crate::transform::group_blocks;

/// A composed page ready for the document shell.
#[derive(Debug, Clone)]
pub enum Document {
    Article(Article),
    Deck(Deck),
    Recipe(Recipe),
}

impl Document {
    pub fn title(&self) -> &str {
        match self {
            Document::Article(article) => &article.title,
            Document::Deck(deck) => &deck.title,
            Document::Recipe(recipe) => &recipe.title,
        }
    }

    /// Markup of the page body, without the surrounding document.
    pub fn body_html(&self) -> String {
        match self {
            Document::Article(article) => article.to_html(),
            Document::Deck(deck) => deck.to_html(),
            Document::Recipe(recipe) => recipe.to_html(),
        }
    }
}

/// Groups and dispatches one scope of sibling blocks.
fn render_scope(blocks: &[Block], ctx: &RenderContext) -> Vec<RenderedNode> {
    ctx.render_nodes(&group_blocks(blocks))
}
