//! Style engine core: values, selectors, parser, matcher, cascade cache.
//!
//! Dependency order, leaves first: [`value`] and [`properties`], then the
//! selector [`model`], the [`parser`], the [`stylesheet`] index, the
//! [`matcher`], and finally [`render_rule`] and its [`cache`].

pub mod value;
pub mod properties;
pub mod pseudo;
pub mod model;
pub mod specificity;
pub mod tokenizer;
pub mod parser;
pub mod stylesheet;
pub mod matcher;
pub mod render_rule;
pub mod cache;
