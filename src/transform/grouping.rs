//! Sibling grouping: runs of list items become one list node.

use crate::model::{Block, BlockKind};
use std::borrow::Cow;

/// The two list flavours Notion models as independent item blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    /// The list kind a block belongs to, if it is a list item.
    pub fn of(block: &Block) -> Option<ListKind> {
        match block {
            Block::BulletedListItem(_) => Some(ListKind::Bulleted),
            Block::NumberedListItem(_) => Some(ListKind::Numbered),
            _ => None,
        }
    }

    /// Tag of the synthesized list node.
    pub fn block_kind(&self) -> BlockKind {
        match self {
            ListKind::Bulleted => BlockKind::BulletedList,
            ListKind::Numbered => BlockKind::NumberedList,
        }
    }

    /// Tag of the items the list wraps.
    pub fn item_kind(&self) -> BlockKind {
        match self {
            ListKind::Bulleted => BlockKind::BulletedListItem,
            ListKind::Numbered => BlockKind::NumberedListItem,
        }
    }
}

/// Output element of the grouper.
///
/// `List` is a pseudo-block: it only exists for the duration of a render pass
/// and borrows its items from the source tree.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupedBlock<'a> {
    Single(&'a Block),
    List {
        kind: ListKind,
        items: Vec<&'a Block>,
    },
}

impl<'a> GroupedBlock<'a> {
    pub fn kind(&self) -> BlockKind {
        match self {
            GroupedBlock::Single(block) => block.kind(),
            GroupedBlock::List { kind, .. } => kind.block_kind(),
        }
    }

    /// The wrapped block for singles.
    pub fn block(&self) -> Option<&'a Block> {
        match self {
            GroupedBlock::Single(block) => Some(*block),
            GroupedBlock::List { .. } => None,
        }
    }

    /// Number of source blocks this element stands for.
    pub fn leaf_count(&self) -> usize {
        match self {
            GroupedBlock::Single(_) => 1,
            GroupedBlock::List { items, .. } => items.len(),
        }
    }

    /// Stable identity: the block id, or `list-<first item id>` for lists so
    /// a list never shares its key with its own first item.
    pub fn key(&self) -> Option<Cow<'a, str>> {
        match self {
            GroupedBlock::Single(block) => Some(Cow::Borrowed(block.id().as_str())),
            GroupedBlock::List { items, .. } => items
                .first()
                .map(|item| Cow::Owned(format!("list-{}", item.id().as_str()))),
        }
    }
}

/// Groups one level of siblings. Children are left untouched; container
/// handlers group their own children when they render them.
pub fn group_blocks(blocks: &[Block]) -> Vec<GroupedBlock<'_>> {
    group_nodes(blocks.iter().map(GroupedBlock::Single).collect())
}

/// Runs the grouping over an already grouped sequence.
///
/// Existing lists pass through and close any open run, so feeding the output
/// of [`group_blocks`] back in returns it unchanged.
pub fn group_nodes(nodes: Vec<GroupedBlock<'_>>) -> Vec<GroupedBlock<'_>> {
    let input_len = nodes.len();
    let mut grouped = Vec::with_capacity(input_len);
    let mut open: Option<(ListKind, Vec<&Block>)> = None;

    for node in nodes {
        let block = match node {
            GroupedBlock::Single(block) => block,
            list @ GroupedBlock::List { .. } => {
                close_run(&mut open, &mut grouped);
                grouped.push(list);
                continue;
            }
        };

        match ListKind::of(block) {
            Some(kind) => {
                if let Some((open_kind, items)) = open.as_mut() {
                    if *open_kind == kind {
                        items.push(block);
                        continue;
                    }
                }
                close_run(&mut open, &mut grouped);
                open = Some((kind, vec![block]));
            }
            None => {
                close_run(&mut open, &mut grouped);
                grouped.push(GroupedBlock::Single(block));
            }
        }
    }
    close_run(&mut open, &mut grouped);

    log::trace!("grouped {} siblings into {} nodes", input_len, grouped.len());
    grouped
}

fn close_run<'a>(open: &mut Option<(ListKind, Vec<&'a Block>)>, out: &mut Vec<GroupedBlock<'a>>) {
    if let Some((kind, items)) = open.take() {
        out.push(GroupedBlock::List { kind, items });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(node: &GroupedBlock) -> Vec<String> {
        match node {
            GroupedBlock::Single(block) => vec![block.id().as_str().to_string()],
            GroupedBlock::List { items, .. } => {
                items.iter().map(|b| b.id().as_str().to_string()).collect()
            }
        }
    }

    #[test]
    fn groups_runs_by_list_kind() {
        let blocks = vec![
            Block::bulleted_item("a", "a"),
            Block::bulleted_item("b", "b"),
            Block::paragraph("x", "x"),
            Block::numbered_item("1", "1"),
        ];

        let grouped = group_blocks(&blocks);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].kind(), BlockKind::BulletedList);
        assert_eq!(ids(&grouped[0]), vec!["a", "b"]);
        assert_eq!(grouped[1], GroupedBlock::Single(&blocks[2]));
        assert_eq!(grouped[2].kind(), BlockKind::NumberedList);
        assert_eq!(ids(&grouped[2]), vec!["1"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(group_blocks(&[]).is_empty());
    }

    #[test]
    fn single_item_stays_wrapped() {
        let blocks = vec![Block::bulleted_item("only", "only")];
        let grouped = group_blocks(&blocks);
        assert_eq!(
            grouped,
            vec![GroupedBlock::List {
                kind: ListKind::Bulleted,
                items: vec![&blocks[0]],
            }]
        );
    }

    #[test]
    fn adjacent_different_kinds_never_merge() {
        let blocks = vec![
            Block::bulleted_item("a", "a"),
            Block::numbered_item("1", "1"),
            Block::bulleted_item("b", "b"),
        ];
        let kinds: Vec<_> = group_blocks(&blocks).iter().map(GroupedBlock::kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::BulletedList,
                BlockKind::NumberedList,
                BlockKind::BulletedList
            ]
        );
    }

    #[test]
    fn regrouping_is_a_no_op() {
        let blocks = vec![
            Block::numbered_item("1", "1"),
            Block::numbered_item("2", "2"),
            Block::divider("d"),
            Block::bulleted_item("a", "a"),
        ];
        let once = group_blocks(&blocks);
        let twice = group_nodes(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn children_are_not_grouped_into_parent_runs() {
        let nested = Block::toggle("t", "t", vec![Block::bulleted_item("inner", "inner")]);
        let blocks = vec![Block::bulleted_item("a", "a"), nested];
        let grouped = group_blocks(&blocks);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[1].kind(), BlockKind::Toggle);
        assert_eq!(grouped.iter().map(GroupedBlock::leaf_count).sum::<usize>(), 2);
    }

    #[test]
    fn list_key_is_derived_from_first_item() {
        let blocks = vec![Block::bulleted_item("a", "a"), Block::bulleted_item("b", "b")];
        let grouped = group_blocks(&blocks);
        assert_eq!(grouped[0].key().as_deref(), Some("list-a"));
        assert_ne!(grouped[0].key(), GroupedBlock::Single(&blocks[0]).key());
    }
}
