//! Heading anchor ids.
//!
//! Anchors are slugs of the heading text. A heading whose text has no
//! letters or digits uses its block id instead, and repeated slugs on one
//! page get a numeric suffix (`intro`, `intro-2`, ...).

use crate::model::Block;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^\p{L}\p{N}]+").unwrap();
}

/// Lowercase letters and digits of `text` (any script), words joined by `-`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// The anchor a heading renders with. `None` for other blocks.
///
/// Uses the assigned anchor when there is one, otherwise the slug of the
/// text, falling back to the block id.
pub fn heading_anchor(block: &Block) -> Option<String> {
    let heading = match block {
        Block::Heading1(h) | Block::Heading2(h) | Block::Heading3(h) => h,
        _ => return None,
    };
    Some(
        heading
            .anchor
            .clone()
            .unwrap_or_else(|| base_anchor(block)),
    )
}

fn base_anchor(block: &Block) -> String {
    let slug = slugify(&block.plain_text());
    if slug.is_empty() {
        block.id().as_str().to_string()
    } else {
        slug
    }
}

/// Returns a copy of `blocks` where every heading, at any depth, carries an
/// anchor that is unique within the tree. Headings are numbered in document
/// order, parents before their children.
pub fn assign_heading_anchors(blocks: &[Block]) -> Vec<Block> {
    let mut used = HashSet::new();
    assign_all(blocks, &mut used)
}

fn assign_all(blocks: &[Block], used: &mut HashSet<String>) -> Vec<Block> {
    blocks.iter().map(|block| assign(block, used)).collect()
}

fn assign(block: &Block, used: &mut HashSet<String>) -> Block {
    let mut assigned = block.clone();
    if let Block::Heading1(h) | Block::Heading2(h) | Block::Heading3(h) = &mut assigned {
        let base = base_anchor(block);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while used.contains(&candidate) {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        used.insert(candidate.clone());
        h.anchor = Some(candidate);
    }

    if block.children().is_empty() {
        assigned
    } else {
        assigned.with_children(assign_all(block.children(), used))
    }
}
