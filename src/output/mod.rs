// src/output/mod.rs
//! Turns composed pages into HTML documents and delivers them.
//!
//! Planning is pure; [`deliver`] is where the I/O happens.

mod document;
mod types;
mod writer;

pub use document::DocumentShell;
pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::{deliver, deliver_all};
