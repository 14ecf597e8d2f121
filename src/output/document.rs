// src/output/document.rs
//! Wraps composed page bodies in a complete HTML document.

use crate::error::AppError;
use crate::pages::{Article, Deck, Document, Recipe};
use handlebars::Handlebars;
use serde_json::{json, Value};

const ARTICLE: &str = "article";
const PRESENTATION: &str = "presentation";
const RECIPE: &str = "recipe";

/// Handlebars registry holding the built-in page templates.
pub struct DocumentShell {
    handlebars: Handlebars<'static>,
}

impl DocumentShell {
    pub fn new() -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        for (name, source) in [
            (ARTICLE, include_str!("../../templates/article.hbs")),
            (PRESENTATION, include_str!("../../templates/presentation.hbs")),
            (RECIPE, include_str!("../../templates/recipe.hbs")),
        ] {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| AppError::TemplateRenderError {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(Self { handlebars })
    }

    /// Renders the full HTML page for `document`.
    pub fn render(&self, document: &Document) -> Result<String, AppError> {
        let (template, data) = match document {
            Document::Article(article) => (ARTICLE, article_data(article)),
            Document::Deck(deck) => (PRESENTATION, deck_data(deck)),
            Document::Recipe(recipe) => (RECIPE, recipe_data(recipe)),
        };
        let html = self
            .handlebars
            .render(template, &data)
            .map_err(|e| AppError::TemplateRenderError {
                name: template.to_string(),
                message: e.to_string(),
            })?;
        log::debug!("rendered {} template: {} bytes", template, html.len());
        Ok(html)
    }
}

fn article_data(article: &Article) -> Value {
    json!({
        "title": article.title,
        "kind": article.kind,
        "date": article.date.map(|date| date.format("%Y-%m-%d").to_string()),
        "tags": article.tags,
        "toc": article.table_of_contents,
        "body": article.to_html(),
    })
}

fn deck_data(deck: &Deck) -> Value {
    json!({
        "title": deck.title,
        "properties": deck.properties,
        "body": deck.to_html(),
    })
}

fn recipe_data(recipe: &Recipe) -> Value {
    json!({
        "title": recipe.title,
        "tags": recipe.tags,
        "body": recipe.to_html(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Page, PresentationProperties, PropertyValue};
    use crate::pages::{compose_article, compose_deck, ArticleKind};
    use crate::render::RenderOverrides;
    use crate::transform::PartitionConfig;
    use crate::types::PageId;

    #[test]
    fn article_shell_escapes_title_and_keeps_body_markup() {
        let page = Page::new(PageId::from_raw("p"), "Lifetimes & you")
            .with_blocks(vec![Block::heading(1, "h", "Elision")]);
        let article = compose_article(&page, ArticleKind::Blog, &RenderOverrides::none());

        let html = DocumentShell::new()
            .unwrap()
            .render(&Document::Article(article))
            .unwrap();

        assert!(html.contains("<title>Lifetimes &amp; you</title>"));
        assert!(html.contains(r##"<a href="#elision">Elision</a>"##));
        assert!(html.contains(r#"<h1 data-block-id="h" id="elision">Elision</h1>"#));
        assert!(html.contains(r#"<body class="blog">"#));
    }

    #[test]
    fn presentation_shell_carries_deck_settings() {
        let page = Page::new(PageId::from_raw("d"), "Deck")
            .with_property(
                PresentationProperties::TRANSITION,
                PropertyValue::Select(Some("zoom".into())),
            )
            .with_property(PresentationProperties::SLIDE_NUMBER, PropertyValue::Checkbox(true))
            .with_blocks(vec![Block::heading(1, "s", "Only slide")]);
        let deck = compose_deck(&page, &PartitionConfig::default(), &RenderOverrides::none());

        let html = DocumentShell::new().unwrap().render(&Document::Deck(deck)).unwrap();

        assert!(html.contains("theme/black.css"));
        assert!(html.contains(r#"transition: "zoom""#));
        assert!(html.contains("slideNumber: true"));
        assert!(html.contains(r#"<div class="slides">"#));
    }
}
