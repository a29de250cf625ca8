//! Reference element tree: a slotmap arena of styled elements.
//!
//! Hosts with their own widget tree implement
//! [`StyledElement`](crate::css::matcher::StyledElement) directly; this tree
//! is a ready-made implementation for tools and tests.

pub mod element;
pub mod tree;

pub use element::{ElementData, ElementId, ElementRef};
pub use tree::{ElementTree, TreeError};
