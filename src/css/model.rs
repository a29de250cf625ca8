//! Stylesheet AST: Declaration, BasicSelector, Selector, StyleRule.
//!
//! ```text
//! StyleRule      Button:hover, Panel > #ok:checked { color: red; margin: 1px 2px; }
//! Selector       Button:hover | Panel > #ok:checked
//! BasicSelector  Button:hover | Panel | #ok:checked
//! Declaration    color: red; | margin: 1px 2px;
//! ```

use slotmap::new_key_type;

use crate::css::properties::PropertyType;
use crate::css::pseudo::PseudoState;
use crate::css::specificity::Specificity;
use crate::css::value::CssValue;

new_key_type! {
    /// Handle of a [`StyleRule`] inside its owning stylesheet.
    pub struct RuleId;

    /// Handle of an element-scoped stylesheet held by the engine.
    pub struct SheetId;
}

/// One property with its ordered values, e.g. `margin: 1px 2px`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: PropertyType,
    pub values: Vec<CssValue>,
}

impl Declaration {
    pub fn new(property: PropertyType, values: Vec<CssValue>) -> Self {
        Self { property, values }
    }

    /// The first value, which is the whole value for single-valued properties.
    pub fn first(&self) -> Option<&CssValue> {
        self.values.first()
    }
}

/// How the basic selector to the right relates to this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relation {
    /// Rightmost basic selector: nothing follows.
    #[default]
    None,
    /// Whitespace combinator: this selector matches some ancestor of the next one's element.
    MatchNextIfAncestor,
    /// `>` combinator: this selector matches the immediate parent of the next one's element.
    MatchNextIfParent,
}

/// One link of a selector chain: `Name#id:pseudo:pseudo`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicSelector {
    /// Element type name; empty matches any type.
    pub element_name: String,
    /// Identifier; empty matches any identifier.
    pub id: String,
    /// Every flag here must be present in the element's state.
    pub pseudo: PseudoState,
    /// Number of pseudo terms written, duplicates included.
    pub pseudo_count: u16,
    pub relation_to_next: Relation,
}

impl BasicSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element name (builder).
    pub fn with_element(mut self, name: impl Into<String>) -> Self {
        self.element_name = name.into();
        self
    }

    /// Set the identifier (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Require a pseudo flag (builder).
    pub fn with_pseudo(mut self, pseudo: PseudoState) -> Self {
        self.add_pseudo(pseudo);
        self
    }

    /// Set the relation to the next basic selector (builder).
    pub fn related(mut self, relation: Relation) -> Self {
        self.relation_to_next = relation;
        self
    }

    pub fn add_pseudo(&mut self, pseudo: PseudoState) {
        self.pseudo |= pseudo;
        self.pseudo_count = self.pseudo_count.saturating_add(1);
    }

    /// Neither an element name nor an id constrains this selector.
    pub fn is_unqualified(&self) -> bool {
        self.element_name.is_empty() && self.id.is_empty()
    }
}

/// A chain of basic selectors in source order (leftmost first).
///
/// The last basic selector matches the subject element; the others match its
/// ancestors according to their [`Relation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    basic_selectors: Vec<BasicSelector>,
    specificity: Specificity,
}

impl Selector {
    /// Build a selector, computing its specificity once.
    ///
    /// The rightmost relation is forced to [`Relation::None`].
    pub fn new(mut basic_selectors: Vec<BasicSelector>) -> Self {
        if let Some(last) = basic_selectors.last_mut() {
            last.relation_to_next = Relation::None;
        }
        let specificity = Specificity::from_basic_selectors(&basic_selectors);
        Self {
            basic_selectors,
            specificity,
        }
    }

    pub fn basic_selectors(&self) -> &[BasicSelector] {
        &self.basic_selectors
    }

    /// The basic selector matched against the subject element.
    pub fn subject(&self) -> Option<&BasicSelector> {
        self.basic_selectors.last()
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Pseudo flags required of the subject element.
    pub fn pseudo(&self) -> PseudoState {
        self.subject().map(|s| s.pseudo).unwrap_or_default()
    }

    /// Union of the pseudo flags named anywhere in the chain.
    pub fn pseudo_mask(&self) -> PseudoState {
        self.basic_selectors
            .iter()
            .fold(PseudoState::empty(), |acc, s| acc | s.pseudo)
    }
}

/// Comma-separated selectors sharing one declaration block.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
    /// Source position; strictly increasing within a stylesheet.
    pub order: u32,
}
