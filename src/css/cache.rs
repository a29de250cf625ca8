//! Render-rule cache keyed by matched-rule identity.
//!
//! Resolution cost is paid once per distinct combination of matched rules.
//! Every element that matches the same rules, in the same cascade order,
//! shares one [`RenderRule`] through an `Rc`.

use std::collections::HashMap;
use std::rc::Rc;

use crate::css::matcher::MatchedStyleRule;
use crate::css::model::{RuleId, SheetId};
use crate::css::render_rule::RenderRule;

/// Identity of a matched-rule combination: `(sheet, rule)` handles in
/// cascade order.
///
/// Compares handles, never rule contents. Rule handles are only unique within
/// their sheet, so the sheet is part of each entry. The empty key stands for
/// "no rule matched".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RenderRuleCacheKey(Vec<(Option<SheetId>, RuleId)>);

impl RenderRuleCacheKey {
    /// Build a key from matches in cascade order, dropping repeated rules.
    pub fn from_matches(matched: &[MatchedStyleRule<'_>]) -> Self {
        let mut entries = Vec::with_capacity(matched.len());
        for m in matched {
            let entry = (m.sheet, m.rule_id);
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        Self(entries)
    }

    pub fn entries(&self) -> &[(Option<SheetId>, RuleId)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolved tables by matched-rule identity.
///
/// Tables are immutable once inserted; the only way to drop one is
/// [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct RenderRuleCache {
    entries: HashMap<RenderRuleCacheKey, Rc<RenderRule>>,
}

impl RenderRuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the table for `matched`, resolving and inserting it on a miss.
    pub fn get_or_resolve(&mut self, matched: &[MatchedStyleRule<'_>]) -> Rc<RenderRule> {
        let key = RenderRuleCacheKey::from_matches(matched);
        if let Some(rule) = self.entries.get(&key) {
            log::trace!(target: "gilt_style::cache", "hit for {} rules", key.0.len());
            return Rc::clone(rule);
        }

        let rule = Rc::new(RenderRule::from_matches(matched));
        log::debug!(
            target: "gilt_style::cache",
            "miss for {} rules, resolved {} properties ({} entries)",
            key.0.len(),
            rule.len(),
            self.entries.len() + 1
        );
        self.entries.insert(key, Rc::clone(&rule));
        rule
    }

    pub fn get(&self, key: &RenderRuleCacheKey) -> Option<&Rc<RenderRule>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &RenderRuleCacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Tables already handed out stay valid.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
