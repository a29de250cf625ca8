//! # gilt-style
//!
//! A CSS-like style engine for trees of UI elements.
//!
//! Stylesheets are parsed into indexed rules, matched right to left against
//! an element's type, identifier, pseudo state and ancestry, and cascaded
//! into a resolved per-property table. Resolved tables are cached by the
//! identity of the rules that produced them, so every element matching the
//! same rule combination shares one table.
//!
//! ## Core Systems
//!
//! - **[`css`]**: values, properties, selectors, parser, matcher and cache
//! - **[`engine`]**: [`StyleEngine`], the front door tying them together
//! - **[`dom`]**: slotmap-backed reference element tree
//!
//! ```
//! use gilt_style::css::properties::PropertyType;
//! use gilt_style::dom::{ElementData, ElementTree};
//! use gilt_style::StyleEngine;
//!
//! let mut tree = ElementTree::new();
//! let window = tree.insert(ElementData::new("Window").with_id("root"));
//! let button = tree.insert_child(window, ElementData::new("Button")).unwrap();
//!
//! let mut engine = StyleEngine::from_css("#root Button { width: 80px; }");
//! let style = engine.resolve(&tree.element(button).unwrap());
//! assert_eq!(style.length(PropertyType::Width), Some(80));
//! ```

// Core systems
pub mod css;
pub mod dom;

// Front door
pub mod engine;

pub use css::matcher::StyledElement;
pub use css::model::SheetId;
pub use css::parser::ParseError;
pub use css::pseudo::PseudoState;
pub use css::render_rule::RenderRule;
pub use engine::{EngineConfig, StyleEngine};
