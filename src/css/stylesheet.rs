//! Stylesheet storage: a rule arena plus lookup indices.
//!
//! The [`StyleSheet`] owns every parsed [`StyleRule`] in a slotmap arena and
//! hands out [`RuleId`] handles. Rules are indexed by the rightmost basic
//! selector of each of their selectors so the matcher only tests plausible
//! candidates:
//!
//! - a non-empty id indexes the rule under that id,
//! - a non-empty element name indexes it under that name (`Button#ok` lands
//!   in both indices),
//! - a subject with neither lands in the universal bucket.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::css::model::{Declaration, RuleId, Selector, StyleRule};
use crate::css::parser::{parse_css, ParseError};
use crate::css::pseudo::PseudoState;

/// Parsed rules and their indices.
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: SlotMap<RuleId, StyleRule>,
    by_element: HashMap<String, Vec<RuleId>>,
    by_id: HashMap<String, Vec<RuleId>>,
    universal: Vec<RuleId>,
    pseudo_mask: PseudoState,
    next_order: u32,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `css` into a fresh stylesheet, returning it with the diagnostics.
    pub fn parse(css: &str) -> (Self, Vec<ParseError>) {
        let mut sheet = Self::new();
        let errors = parse_css(css, &mut sheet);
        (sheet, errors)
    }

    /// Append a rule, assigning it the next source order and indexing it.
    ///
    /// Rules without selectors are dropped and `None` is returned.
    pub fn add_rule(
        &mut self,
        selectors: Vec<Selector>,
        declarations: Vec<Declaration>,
    ) -> Option<RuleId> {
        if selectors.is_empty() {
            return None;
        }

        let order = self.next_order;
        self.next_order += 1;

        for selector in &selectors {
            self.pseudo_mask |= selector.pseudo_mask();
        }

        let id = self.rules.insert(StyleRule {
            selectors,
            declarations,
            order,
        });

        // Collect the buckets first: the rule is borrowed from the arena.
        let mut element_keys = Vec::new();
        let mut id_keys = Vec::new();
        let mut universal = false;
        for selector in &self.rules[id].selectors {
            let Some(subject) = selector.subject() else {
                continue;
            };
            if !subject.id.is_empty() {
                id_keys.push(subject.id.clone());
            }
            if !subject.element_name.is_empty() {
                element_keys.push(subject.element_name.clone());
            }
            if subject.id.is_empty() && subject.element_name.is_empty() {
                universal = true;
            }
        }

        for key in element_keys {
            push_unique(self.by_element.entry(key).or_default(), id);
        }
        for key in id_keys {
            push_unique(self.by_id.entry(key).or_default(), id);
        }
        if universal {
            self.universal.push(id);
        }

        Some(id)
    }

    /// Get a rule by handle.
    pub fn rule(&self, id: RuleId) -> Option<&StyleRule> {
        self.rules.get(id)
    }

    /// Iterate rules in source order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &StyleRule)> {
        self.rules.iter()
    }

    /// Rules whose selectors have this element name on their subject.
    pub fn rules_for_element(&self, name: &str) -> &[RuleId] {
        self.by_element.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules whose selectors have this identifier on their subject.
    pub fn rules_for_id(&self, id: &str) -> &[RuleId] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules that must be tested against every element.
    pub fn universal_rules(&self) -> &[RuleId] {
        &self.universal
    }

    /// Union of every pseudo flag referenced by any selector.
    pub fn pseudo_mask(&self) -> PseudoState {
        self.pseudo_mask
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the stylesheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn push_unique(bucket: &mut Vec<RuleId>, id: RuleId) {
    if bucket.last() != Some(&id) {
        bucket.push(id);
    }
}
