//! Pure tree transforms applied between fetching and rendering.

pub mod grouping;
pub mod prepare;
pub mod sections;

pub use grouping::{group_blocks, group_nodes, GroupedBlock, ListKind};
pub use prepare::{prepare_blocks, CodeHighlighter, PlainHighlighter};
pub use sections::{
    partition, resolve_markers, HiddenHeadingMatch, MarkerLevels, PartitionConfig, Section,
    SubSection,
};
