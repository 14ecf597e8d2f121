//! Blog posts and TIL entries.

use crate::model::{Block, Page};
use crate::render::{
    assign_heading_anchors, heading_anchor, nodes_to_html, render_blocks, RenderOverrides,
    RenderedNode,
};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    Blog,
    Til,
}

/// A heading linked from the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub kind: ArticleKind,
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
    /// Empty for TIL entries.
    pub table_of_contents: Vec<TocEntry>,
    pub body: Vec<RenderedNode>,
}

impl Article {
    pub const DATE: &'static str = "Date";
    pub const TAGS: &'static str = "Tags";

    pub fn to_html(&self) -> String {
        nodes_to_html(&self.body)
    }
}

/// Renders a page as an article. Blog posts get a table of contents built
/// from their top-level headings; entries link to the same page-unique
/// anchors the headings render with.
pub fn compose_article(page: &Page, kind: ArticleKind, overrides: &RenderOverrides) -> Article {
    let blocks = assign_heading_anchors(&page.blocks);
    let body = render_blocks(&blocks, None, overrides);
    let table_of_contents = match kind {
        ArticleKind::Blog => table_of_contents(&blocks),
        ArticleKind::Til => Vec::new(),
    };
    log::debug!(
        "composed {:?} '{}': {} top-level nodes, {} toc entries",
        kind,
        page.title,
        body.len(),
        table_of_contents.len()
    );

    Article {
        title: page.title.clone(),
        kind,
        date: page.date(Article::DATE),
        tags: page.tags(Article::TAGS).into_iter().map(str::to_string).collect(),
        table_of_contents,
        body,
    }
}

fn table_of_contents(blocks: &[Block]) -> Vec<TocEntry> {
    blocks
        .iter()
        .filter_map(|block| {
            Some(TocEntry {
                level: block.heading_level()?,
                title: block.plain_text(),
                slug: heading_anchor(block)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyValue;
    use crate::types::PageId;

    fn page() -> Page {
        Page::new(PageId::from_raw("p"), "Borrowing")
            .with_property(
                Article::DATE,
                PropertyValue::Date(NaiveDate::from_ymd_opt(2024, 3, 9)),
            )
            .with_property(
                Article::TAGS,
                PropertyValue::MultiSelect(vec!["rust".into(), "notes".into()]),
            )
            .with_blocks(vec![
                Block::heading(1, "h1", "Shared references"),
                Block::paragraph("p1", "Many readers."),
                Block::toggle("t", "Aside", vec![Block::heading(2, "nested", "Not listed")]),
                Block::heading(2, "h2", "Mutable references"),
                Block::bulleted_item("b1", "one writer"),
            ])
    }

    #[test]
    fn blog_lists_top_level_headings() {
        let article = compose_article(&page(), ArticleKind::Blog, &RenderOverrides::none());

        assert_eq!(
            article.table_of_contents,
            vec![
                TocEntry {
                    level: 1,
                    title: "Shared references".into(),
                    slug: "shared-references".into()
                },
                TocEntry {
                    level: 2,
                    title: "Mutable references".into(),
                    slug: "mutable-references".into()
                },
            ]
        );
        assert_eq!(article.date, NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(article.tags, vec!["rust", "notes"]);
    }

    #[test]
    fn til_has_no_table_of_contents() {
        let article = compose_article(&page(), ArticleKind::Til, &RenderOverrides::none());
        assert!(article.table_of_contents.is_empty());
        assert_eq!(article.body.len(), 5);
    }

    #[test]
    fn toc_slugs_match_heading_ids() {
        let article = compose_article(&page(), ArticleKind::Blog, &RenderOverrides::none());
        let html = article.to_html();
        for entry in &article.table_of_contents {
            assert!(html.contains(&format!("id=\"{}\"", entry.slug)));
        }
    }

    #[test]
    fn repeated_and_non_ascii_headings_get_distinct_anchors() {
        let page = Page::new(PageId::from_raw("p"), "Eksempler").with_blocks(vec![
            Block::heading(2, "a", "Eksempel"),
            Block::heading(2, "b", "Eksempel"),
            Block::heading(2, "c", "Æøå"),
            Block::heading(2, "d", "!!"),
        ]);
        let article = compose_article(&page, ArticleKind::Blog, &RenderOverrides::none());

        let slugs: Vec<&str> = article
            .table_of_contents
            .iter()
            .map(|entry| entry.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["eksempel", "eksempel-2", "æøå", "d"]);

        let html = article.to_html();
        for slug in slugs {
            assert_eq!(html.matches(&format!(" id=\"{}\"", slug)).count(), 1);
        }
    }
}
