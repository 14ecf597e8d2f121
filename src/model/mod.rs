mod block;
mod builders;
pub mod blocks;
pub mod common;
mod page;
pub mod presentation;

pub use block::{Block, BlockKind};
pub use blocks::*;
pub use common::*;
pub use page::{Page, PropertyValue};
pub use presentation::{PresentationProperties, Theme, Transition};
