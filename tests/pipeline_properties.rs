//! Property-based tests for the grouping, partitioning and dispatch stages.

use notion2html::{
    group_blocks, group_nodes, partition, render_blocks, Block, BlockKind, GroupedBlock,
    PartitionConfig, RenderOverrides, Section,
};
use notion2html::transform::resolve_markers;
use notion2html::MarkerLevels;
use proptest::prelude::*;

/// Shapes the generator picks from; ids are assigned by position.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Paragraph,
    Bulleted,
    Numbered,
    Heading(u8),
    HiddenHeading(u8),
    Callout,
    Bookmark,
    Divider,
    ToggleWithNote,
}

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        3 => Just(Shape::Paragraph),
        3 => Just(Shape::Bulleted),
        2 => Just(Shape::Numbered),
        2 => (1u8..=3).prop_map(Shape::Heading),
        1 => (1u8..=3).prop_map(Shape::HiddenHeading),
        1 => Just(Shape::Callout),
        1 => Just(Shape::Bookmark),
        1 => Just(Shape::Divider),
        1 => Just(Shape::ToggleWithNote),
    ]
}

fn build(shapes: &[Shape]) -> Vec<Block> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let id = format!("b{}", i);
            match *shape {
                Shape::Paragraph => Block::paragraph(&id, "text"),
                Shape::Bulleted => Block::bulleted_item(&id, "item"),
                Shape::Numbered => Block::numbered_item(&id, "step"),
                Shape::Heading(level) => Block::heading(level, &id, &format!("Heading {}", i)),
                Shape::HiddenHeading(level) => Block::heading(level, &id, "-"),
                Shape::Callout => Block::callout(&id, "note"),
                Shape::Bookmark => Block::bookmark(&id, "https://example.com"),
                Shape::Divider => Block::divider(&id),
                Shape::ToggleWithNote => Block::toggle(
                    &id,
                    "more",
                    vec![
                        Block::paragraph(&format!("{}-p", id), "inside"),
                        Block::callout(&format!("{}-n", id), "nested note"),
                    ],
                ),
            }
        })
        .collect()
}

fn block_lists() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec(shape(), 0..40).prop_map(|shapes| build(&shapes))
}

/// Every id in the tree, pre-order.
fn all_ids(blocks: &[Block], out: &mut Vec<String>) {
    for block in blocks {
        out.push(block.id().as_str().to_string());
        all_ids(block.children(), out);
    }
}

fn section_ids(sections: &[Section]) -> Vec<String> {
    let mut ids = Vec::new();
    for section in sections {
        all_ids(&section.notes, &mut ids);
        all_ids(&section.references, &mut ids);
        all_ids(&section.content, &mut ids);
        for sub in &section.sub_sections {
            all_ids(&sub.notes, &mut ids);
            all_ids(&sub.references, &mut ids);
            all_ids(&sub.content, &mut ids);
        }
    }
    ids
}

proptest! {
    #[test]
    fn grouping_preserves_leaf_count(blocks in block_lists()) {
        let grouped = group_blocks(&blocks);
        let leaves: usize = grouped.iter().map(GroupedBlock::leaf_count).sum();
        prop_assert_eq!(leaves, blocks.len());
    }

    #[test]
    fn regrouping_is_a_no_op(blocks in block_lists()) {
        let grouped = group_blocks(&blocks);
        prop_assert_eq!(group_nodes(grouped.clone()), grouped.clone());

        // No two adjacent lists of the same kind survive grouping.
        for pair in grouped.windows(2) {
            if let (GroupedBlock::List { kind: a, .. }, GroupedBlock::List { kind: b, .. }) = (&pair[0], &pair[1]) {
                prop_assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn partition_is_a_stable_total_partition(blocks in block_lists()) {
        let config = PartitionConfig::default();
        let kept: Vec<Block> = blocks
            .iter()
            .filter(|block| !config.skipped.contains(&block.kind()))
            .filter(|block| !(block.kind().is_heading() && block.plain_text() == "-"))
            .cloned()
            .collect();
        let mut expected = Vec::new();
        all_ids(&kept, &mut expected);
        expected.sort();

        let mut actual = section_ids(&partition(blocks, &config));
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn notes_never_remain_in_content(blocks in block_lists()) {
        for section in partition(blocks, &PartitionConfig::default()) {
            let mut content_ids = Vec::new();
            all_ids(&section.content, &mut content_ids);
            prop_assert!(content_ids.iter().all(|id| !id.ends_with("-n")));
            prop_assert!(section.notes.iter().all(|b| b.kind() == BlockKind::Callout));
        }
    }

    #[test]
    fn dispatch_skips_exactly_the_unregistered_block(
        count in 0usize..20,
        position in 0usize..20,
    ) {
        let mut blocks: Vec<Block> = (0..count)
            .map(|i| Block::paragraph(&format!("p{}", i), "known"))
            .collect();
        blocks.insert(position.min(count), Block::unsupported("x", "ai_block"));

        let rendered = render_blocks(&blocks, None, &RenderOverrides::none());
        prop_assert_eq!(rendered.len(), count);
        prop_assert!(rendered.iter().all(|node| node.key() != Some("x")));
    }
}

#[test]
fn markers_follow_the_first_heading() {
    let h2_first = vec![
        Block::paragraph("p", "lead"),
        Block::heading(2, "a", "A"),
        Block::heading(1, "b", "B"),
    ];
    assert_eq!(
        resolve_markers(&h2_first, MarkerLevels::Auto),
        (BlockKind::Heading2, Some(BlockKind::Heading3))
    );

    let h1_first = vec![Block::heading(1, "a", "A"), Block::heading(2, "b", "B")];
    assert_eq!(
        resolve_markers(&h1_first, MarkerLevels::Auto),
        (BlockKind::Heading1, Some(BlockKind::Heading2))
    );

    let h3_first = vec![Block::heading(3, "a", "A")];
    assert_eq!(
        resolve_markers(&h3_first, MarkerLevels::Auto),
        (BlockKind::Heading3, None)
    );
}
