// src/pipeline.rs
//! Pipeline capability traits and the orchestrator that wires them.
//!
//! Fetch resolves the whole page before anything else runs; compose is
//! synchronous; delivery is the only stage that writes.

use crate::analytics::{log_measurement, measure_blocks};
use crate::api::{fetch_page_tree, parser::parse_page_dump, NotionHttpClient};
use crate::config::{ContentOrigin, PageKind, PipelineConfig};
use crate::error::AppError;
use crate::model::Page;
use crate::output::{deliver_all, DocumentShell, OutputPlan, OutputReport};
use crate::pages::{
    compose_article, compose_deck, compose_recipe, presentation_config, ArticleKind, Document,
};
use crate::render::RenderOverrides;
use crate::transform::{prepare_blocks, CodeHighlighter, PlainHighlighter};
use std::path::Path;

/// Retrieves a fully resolved page.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn fetch(&self) -> Result<Page, AppError>;
}

/// Turns a page into a composed document.
pub trait PageComposer {
    fn compose(&self, page: &Page) -> Result<Document, AppError>;
}

/// Delivers a finished HTML document to its destination.
pub trait DocumentDelivery {
    fn deliver(&self, html: String) -> Result<OutputReport, AppError>;
}

/// Reads a page dump written by an earlier export.
pub fn load_page_dump(path: &Path) -> Result<Page, AppError> {
    let json = std::fs::read_to_string(path)?;
    parse_page_dump(&json).map_err(|e| match e {
        AppError::MalformedResponse(message) => {
            AppError::MalformedResponse(format!("{}: {}", path.display(), message))
        }
        other => other,
    })
}

/// Fetch, prepare, compose, wrap and deliver, driven by one configuration.
pub struct NotionToHtml<'a> {
    config: &'a PipelineConfig,
    overrides: RenderOverrides,
    highlighter: Box<dyn CodeHighlighter>,
}

impl<'a> NotionToHtml<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            overrides: RenderOverrides::none(),
            highlighter: Box::new(PlainHighlighter),
        }
    }

    pub fn with_overrides(mut self, overrides: RenderOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_highlighter(mut self, highlighter: Box<dyn CodeHighlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Runs every stage and returns the delivery report.
    pub async fn run(&self) -> Result<OutputReport, AppError> {
        let page = self.fetch().await?;
        let document = self.compose(&page)?;
        let html = DocumentShell::new()?.render(&document)?;
        self.deliver(html)
    }

    /// Attaches highlighted markup to every code block.
    fn prepare(&self, page: &Page) -> Page {
        let blocks = prepare_blocks(&page.blocks, self.highlighter.as_ref());
        page.clone().with_blocks(blocks)
    }
}

#[async_trait::async_trait]
impl ContentSource for NotionToHtml<'_> {
    async fn fetch(&self) -> Result<Page, AppError> {
        let page = match &self.config.origin {
            ContentOrigin::JsonDump(path) => {
                log::info!("Reading page dump {}", path.display());
                load_page_dump(path)?
            }
            ContentOrigin::Notion { id, api_key } => {
                log::info!("Retrieving page {}", id.as_str());
                let client = NotionHttpClient::new(api_key)?;
                fetch_page_tree(&client, id, self.config.depth).await?
            }
        };
        log_measurement(&page.title, &measure_blocks(&page.blocks));
        Ok(page)
    }
}

impl PageComposer for NotionToHtml<'_> {
    fn compose(&self, page: &Page) -> Result<Document, AppError> {
        let page = self.prepare(page);
        let document = match self.config.kind {
            PageKind::Article => {
                Document::Article(compose_article(&page, ArticleKind::Blog, &self.overrides))
            }
            PageKind::Til => {
                Document::Article(compose_article(&page, ArticleKind::Til, &self.overrides))
            }
            PageKind::Presentation => {
                let partition =
                    presentation_config(&self.config.hidden_headings, self.config.prefix_hidden);
                Document::Deck(compose_deck(&page, &partition, &self.overrides))
            }
            PageKind::Recipe => Document::Recipe(compose_recipe(&page, &self.overrides)?),
        };
        log::info!("Composed {:?} '{}'", self.config.kind, document.title());
        Ok(document)
    }
}

impl DocumentDelivery for NotionToHtml<'_> {
    fn deliver(&self, html: String) -> Result<OutputReport, AppError> {
        deliver_all(OutputPlan::for_destination(self.config.output_file.clone(), html))
    }
}
