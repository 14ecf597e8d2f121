//! Cocktail recipes: a page with "Ingredients" and "Method" sections.
//!
//! Callouts anywhere in the page become tips. Sections other than the two
//! required ones are kept, in page order, as extras.

use super::render_scope;
use crate::error::AppError;
use crate::model::{Block, Page};
use crate::render::{nodes_to_html, RenderContext, RenderOverrides, RenderedNode};
use crate::transform::{partition, PartitionConfig, Section};

#[derive(Debug, Clone)]
pub struct RecipeSection {
    pub title: String,
    pub body: Vec<RenderedNode>,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub title: String,
    pub tags: Vec<String>,
    pub introduction: Vec<RenderedNode>,
    pub ingredients: Vec<RenderedNode>,
    pub method: Vec<RenderedNode>,
    pub tips: Vec<RenderedNode>,
    pub extras: Vec<RecipeSection>,
}

impl Recipe {
    pub const INGREDIENTS: &'static str = "Ingredients";
    pub const METHOD: &'static str = "Method";
    pub const TAGS: &'static str = "Tags";

    pub fn to_html(&self) -> String {
        let mut nodes = Vec::new();
        if !self.introduction.is_empty() {
            nodes.push(wrapper("recipe-introduction", None, &self.introduction));
        }
        nodes.push(wrapper("recipe-ingredients", Some(Self::INGREDIENTS), &self.ingredients));
        nodes.push(wrapper("recipe-method", Some(Self::METHOD), &self.method));
        for extra in &self.extras {
            nodes.push(wrapper("recipe-extra", Some(&extra.title), &extra.body));
        }
        if !self.tips.is_empty() {
            nodes.push(wrapper("recipe-tips", Some("Tips"), &self.tips));
        }
        nodes_to_html(&nodes)
    }
}

fn wrapper(class: &str, heading: Option<&str>, body: &[RenderedNode]) -> RenderedNode {
    let heading = heading.map(|text| RenderedNode::element("h2").child(RenderedNode::text(text)));
    RenderedNode::element("section")
        .class(Some(class))
        .children_from(heading)
        .children_from(body.iter().cloned())
}

/// Splits a recipe page into its parts. Fails when either required section
/// is missing.
pub fn compose_recipe(page: &Page, overrides: &RenderOverrides) -> Result<Recipe, AppError> {
    let config = PartitionConfig::default().with_reference_markers(Vec::new());
    let sections = partition(page.blocks.clone(), &config);

    let ingredients = required_section(page, &sections, Recipe::INGREDIENTS)?;
    let method = required_section(page, &sections, Recipe::METHOD)?;

    let ctx = RenderContext::resolve(None, overrides);
    let tips: Vec<Block> = sections.iter().flat_map(all_notes).cloned().collect();
    let introduction = sections
        .iter()
        .find(|section| section.title.is_none())
        .map(|section| render_scope(&section.content, &ctx))
        .unwrap_or_default();
    let extras = sections
        .iter()
        .filter(|section| {
            section.title.is_some()
                && !section.is_titled(Recipe::INGREDIENTS)
                && !section.is_titled(Recipe::METHOD)
        })
        .map(|section| RecipeSection {
            title: section.title.clone().unwrap_or_default(),
            body: render_scope(&section_body(section), &ctx),
        })
        .collect();

    Ok(Recipe {
        title: page.title.clone(),
        tags: page.tags(Recipe::TAGS).into_iter().map(str::to_string).collect(),
        introduction,
        ingredients: render_scope(&section_body(ingredients), &ctx),
        method: render_scope(&section_body(method), &ctx),
        tips: render_scope(&tips, &ctx),
        extras,
    })
}

fn required_section<'a>(
    page: &Page,
    sections: &'a [Section],
    title: &str,
) -> Result<&'a Section, AppError> {
    sections
        .iter()
        .find(|section| section.is_titled(title))
        .ok_or_else(|| AppError::MissingSection {
            page: page.title.clone(),
            section: title.to_string(),
        })
}

fn all_notes(section: &Section) -> impl Iterator<Item = &Block> {
    section
        .notes
        .iter()
        .chain(section.sub_sections.iter().flat_map(|sub| sub.notes.iter()))
}

/// Section content minus the heading that opened it, followed by the
/// content of its sub-sections. The page template prints its own section
/// headings.
fn section_body(section: &Section) -> Vec<Block> {
    let content = match section.content.split_first() {
        Some((first, rest))
            if first.kind().is_heading()
                && section.title.as_deref() == Some(first.plain_text().as_str()) =>
        {
            rest
        }
        _ => &section.content[..],
    };
    content
        .iter()
        .chain(section.sub_sections.iter().flat_map(|sub| sub.content.iter()))
        .cloned()
        .collect()
}
