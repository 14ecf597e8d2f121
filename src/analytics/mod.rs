//! Content measurement for block trees, used by verbose logging.

use crate::model::{Block, BlockKind};
use std::collections::BTreeMap;

/// Quick statistics for user-facing progress messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSummary {
    pub total_blocks: usize,
    pub deepest_nesting: usize,
}

/// Detailed breakdown of a block tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMeasurement {
    pub total_blocks: usize,
    pub deepest_nesting: usize,
    pub by_kind: BTreeMap<BlockKind, usize>,
    /// Blocks reporting children that were never loaded.
    pub unloaded_containers: usize,
}

impl ContentMeasurement {
    pub fn count_of(&self, kind: BlockKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn summary(&self) -> ContentSummary {
        ContentSummary {
            total_blocks: self.total_blocks,
            deepest_nesting: self.deepest_nesting,
        }
    }
}

/// Counts every block, at any depth.
pub fn count_blocks(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| 1 + count_blocks(block.children()))
        .sum()
}

/// Nesting depth of the tree; top-level blocks are depth 1.
pub fn blocks_max_depth(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| 1 + blocks_max_depth(block.children()))
        .max()
        .unwrap_or(0)
}

pub fn measure_blocks(blocks: &[Block]) -> ContentMeasurement {
    let mut measurement = ContentMeasurement::default();
    walk_blocks(&mut measurement, blocks, 1);
    measurement
}

fn walk_blocks(measurement: &mut ContentMeasurement, blocks: &[Block], depth: usize) {
    for block in blocks {
        measurement.total_blocks += 1;
        measurement.deepest_nesting = measurement.deepest_nesting.max(depth);
        *measurement.by_kind.entry(block.kind()).or_insert(0) += 1;
        if block.has_children() && block.children().is_empty() {
            measurement.unloaded_containers += 1;
        }
        walk_blocks(measurement, block.children(), depth + 1);
    }
}

/// Logs the measurement at debug level, one line per kind.
pub fn log_measurement(title: &str, measurement: &ContentMeasurement) {
    log::debug!(
        "'{}': {} blocks, nesting depth {}",
        title,
        measurement.total_blocks,
        measurement.deepest_nesting
    );
    for (kind, count) in &measurement.by_kind {
        log::debug!("  {:<20} {}", kind.as_str(), count);
    }
    if measurement.unloaded_containers > 0 {
        log::warn!(
            "{} blocks have children that were not loaded; raise --depth to include them",
            measurement.unloaded_containers
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        assert_eq!(measure_blocks(&[]), ContentMeasurement::default());
        assert_eq!(blocks_max_depth(&[]), 0);
    }

    #[test]
    fn test_nested_counts() {
        let blocks = vec![
            Block::paragraph("p", "top"),
            Block::toggle(
                "t",
                "outer",
                vec![Block::toggle("t2", "inner", vec![Block::paragraph("leaf", "x")])],
            ),
            Block::toggle("lazy", "unloaded", vec![]).awaiting_children(),
        ];

        let measurement = measure_blocks(&blocks);
        assert_eq!(measurement.total_blocks, 5);
        assert_eq!(count_blocks(&blocks), 5);
        assert_eq!(measurement.deepest_nesting, 3);
        assert_eq!(blocks_max_depth(&blocks), 3);
        assert_eq!(measurement.count_of(BlockKind::Toggle), 3);
        assert_eq!(measurement.count_of(BlockKind::Paragraph), 2);
        assert_eq!(measurement.count_of(BlockKind::Code), 0);
        assert_eq!(measurement.unloaded_containers, 1);
    }
}
