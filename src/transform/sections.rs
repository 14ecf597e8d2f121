//! Section partitioning along heading boundaries.
//!
//! A flat block sequence is split into sections on the level-1 marker and
//! each section's tail into sub-sections on the level-2 marker. Note and
//! reference blocks are then pulled out of every scope into side buckets,
//! and headings whose text matches a hidden token are dropped.
//!
//! Boundaries come only from the top-level siblings being partitioned.
//! Note and reference harvesting, in contrast, descends into container
//! children and lifts what it finds into the enclosing scope.

use crate::model::{Block, BlockKind};
use serde::{Deserialize, Serialize};

/// How the two marker levels are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerLevels {
    /// The first heading in the input is level 1, the next heading level is level 2.
    Auto,
    Fixed {
        level1: BlockKind,
        level2: Option<BlockKind>,
    },
}

/// How hidden heading tokens are compared with a heading's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HiddenHeadingMatch {
    #[default]
    Exact,
    Prefix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionConfig {
    pub markers: MarkerLevels,
    pub note_marker: BlockKind,
    pub reference_markers: Vec<BlockKind>,
    pub hidden_heading_tokens: Vec<String>,
    pub hidden_match: HiddenHeadingMatch,
    /// Decorative blocks removed before partitioning.
    pub skipped: Vec<BlockKind>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            markers: MarkerLevels::Auto,
            note_marker: BlockKind::Callout,
            reference_markers: vec![
                BlockKind::Bookmark,
                BlockKind::Image,
                BlockKind::Video,
                BlockKind::Embed,
            ],
            hidden_heading_tokens: vec!["-".to_string()],
            hidden_match: HiddenHeadingMatch::Exact,
            skipped: vec![
                BlockKind::Divider,
                BlockKind::TableOfContents,
                BlockKind::Breadcrumb,
            ],
        }
    }
}

impl PartitionConfig {
    pub fn with_markers(mut self, markers: MarkerLevels) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_hidden_headings(mut self, tokens: Vec<String>, matching: HiddenHeadingMatch) -> Self {
        self.hidden_heading_tokens = tokens;
        self.hidden_match = matching;
        self
    }

    pub fn with_reference_markers(mut self, kinds: Vec<BlockKind>) -> Self {
        self.reference_markers = kinds;
        self
    }

    fn is_reference(&self, kind: BlockKind) -> bool {
        self.reference_markers.contains(&kind)
    }

    fn is_hidden(&self, heading_text: &str) -> bool {
        let text = heading_text.trim();
        self.hidden_heading_tokens.iter().any(|token| match self.hidden_match {
            HiddenHeadingMatch::Exact => text == token,
            HiddenHeadingMatch::Prefix => text.starts_with(token.as_str()),
        })
    }
}

/// One top-level group of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Text of the marker heading that opened the section, even when hidden.
    pub title: Option<String>,
    pub content: Vec<Block>,
    pub notes: Vec<Block>,
    pub references: Vec<Block>,
    pub sub_sections: Vec<SubSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubSection {
    pub title: Option<String>,
    pub content: Vec<Block>,
    pub notes: Vec<Block>,
    pub references: Vec<Block>,
}

impl Section {
    /// Top-level blocks held by this section and its sub-sections.
    pub fn block_count(&self) -> usize {
        self.content.len()
            + self.notes.len()
            + self.references.len()
            + self
                .sub_sections
                .iter()
                .map(SubSection::block_count)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }

    /// Case-insensitive title comparison.
    pub fn is_titled(&self, title: &str) -> bool {
        self.title
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(title))
    }
}

impl SubSection {
    pub fn block_count(&self) -> usize {
        self.content.len() + self.notes.len() + self.references.len()
    }
}

/// Picks the marker levels for `blocks` (already stripped of skipped kinds).
pub fn resolve_markers(blocks: &[Block], markers: MarkerLevels) -> (BlockKind, Option<BlockKind>) {
    match markers {
        MarkerLevels::Fixed { level1, level2 } => (level1, level2),
        MarkerLevels::Auto => {
            let first_level = blocks.iter().find_map(Block::heading_level).unwrap_or(1);
            let level1 = BlockKind::heading(first_level).unwrap_or(BlockKind::Heading1);
            (level1, BlockKind::heading(first_level + 1))
        }
    }
}

/// Splits `blocks` into sections. Never fails; empty input gives no sections.
pub fn partition(blocks: Vec<Block>, config: &PartitionConfig) -> Vec<Section> {
    let input_len = blocks.len();
    let blocks: Vec<Block> = blocks
        .into_iter()
        .filter(|block| !config.skipped.contains(&block.kind()))
        .collect();
    let (level1, level2) = resolve_markers(&blocks, config.markers);
    log::debug!(
        "partitioning {} blocks ({} after skipping) on {} / {}",
        input_len,
        blocks.len(),
        level1,
        level2.map(|kind| kind.as_str()).unwrap_or("none")
    );

    split_on(blocks, level1)
        .into_iter()
        .map(|group| build_section(group, level1, level2, config))
        .collect()
}

/// Starts a new group at every marker; blocks before the first marker form
/// a leading group of their own.
fn split_on(blocks: Vec<Block>, marker: BlockKind) -> Vec<Vec<Block>> {
    let mut groups: Vec<Vec<Block>> = Vec::new();
    for block in blocks {
        match groups.last_mut() {
            Some(current) if block.kind() != marker => current.push(block),
            _ => groups.push(vec![block]),
        }
    }
    groups
}

fn title_of(group: &[Block], marker: BlockKind) -> Option<String> {
    group
        .first()
        .filter(|block| block.kind() == marker)
        .map(Block::plain_text)
}

fn build_section(
    mut group: Vec<Block>,
    level1: BlockKind,
    level2: Option<BlockKind>,
    config: &PartitionConfig,
) -> Section {
    let title = title_of(&group, level1);

    let tail = match level2 {
        Some(marker) => {
            let split_at = group
                .iter()
                .position(|block| block.kind() == marker)
                .unwrap_or(group.len());
            group.split_off(split_at)
        }
        None => Vec::new(),
    };

    let scope = extract(group, config);
    let sub_sections = match level2 {
        Some(marker) => split_on(tail, marker)
            .into_iter()
            .map(|sub_group| {
                let title = title_of(&sub_group, marker);
                let scope = extract(sub_group, config);
                SubSection {
                    title,
                    content: scope.content,
                    notes: scope.notes,
                    references: scope.references,
                }
            })
            .collect(),
        None => Vec::new(),
    };

    Section {
        title,
        content: scope.content,
        notes: scope.notes,
        references: scope.references,
        sub_sections,
    }
}

#[derive(Default)]
struct Scope {
    content: Vec<Block>,
    notes: Vec<Block>,
    references: Vec<Block>,
}

/// Moves notes and references out of one scope, then drops hidden headings.
fn extract(blocks: Vec<Block>, config: &PartitionConfig) -> Scope {
    let mut scope = Scope::default();
    for block in blocks {
        if let Some(kept) = classify(block, config, &mut scope.notes, &mut scope.references) {
            let hidden = kept.kind().is_heading() && config.is_hidden(&kept.plain_text());
            if hidden {
                log::debug!("suppressing hidden heading {}", kept.id());
            } else {
                scope.content.push(kept);
            }
        }
    }
    scope
}

/// Routes a block to a side bucket, or returns it (with its descendants'
/// notes and references harvested) when it stays in content.
fn classify(
    block: Block,
    config: &PartitionConfig,
    notes: &mut Vec<Block>,
    references: &mut Vec<Block>,
) -> Option<Block> {
    let kind = block.kind();
    if kind == config.note_marker {
        notes.push(block);
        return None;
    }
    if config.is_reference(kind) {
        references.push(block);
        return None;
    }
    if block.children().is_empty() {
        return Some(block);
    }

    let children: Vec<Block> = block
        .children()
        .iter()
        .cloned()
        .filter_map(|child| classify(child, config, notes, references))
        .collect();
    if children.len() == block.children().len() {
        Some(block)
    } else {
        Some(block.with_children(children))
    }
}
