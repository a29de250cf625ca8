//! Selector matching against a host element tree.
//!
//! The matcher only sees elements through [`StyledElement`]: a type name, an
//! identifier, the current pseudo state and a parent link. Selectors are
//! matched right to left, starting from the subject element and walking up.

use std::collections::HashSet;

use crate::css::model::{BasicSelector, Relation, RuleId, Selector, SheetId, StyleRule};
use crate::css::pseudo::PseudoState;
use crate::css::specificity::Specificity;
use crate::css::stylesheet::StyleSheet;

/// Read-only view of an element, as needed for selector matching.
///
/// Implementors are usually cheap handles (a tree reference plus a key), so
/// `parent` returns a new handle by value.
pub trait StyledElement: Sized {
    /// Element type name, compared against selector element names.
    fn type_name(&self) -> &str;

    /// Identifier, compared against `#id` selectors. Empty when unset.
    fn identifier(&self) -> &str;

    /// Current pseudo state.
    fn pseudo_state(&self) -> PseudoState;

    fn parent(&self) -> Option<Self>;

    /// Stylesheet attached to this element. Its rules apply to the element
    /// and its descendants and cascade above the global sheet.
    fn style_sheet(&self) -> Option<SheetId> {
        None
    }

    /// `false` keeps every rule away from this element. Descendants are
    /// unaffected, and the element still takes part in their ancestor
    /// matching.
    fn uses_style_sheets(&self) -> bool {
        true
    }
}

/// One rule that matched an element, with the selector that matched it.
#[derive(Debug, Clone, Copy)]
pub struct MatchedStyleRule<'a> {
    /// Scoped sheet the rule came from; `None` for the global sheet.
    pub sheet: Option<SheetId>,
    pub rule_id: RuleId,
    pub rule: &'a StyleRule,
    pub selector: &'a Selector,
}

impl MatchedStyleRule<'_> {
    pub fn specificity(&self) -> Specificity {
        self.selector.specificity()
    }

    /// Cascade position within one sheet: ascending specificity, then
    /// source order.
    pub fn cascade_key(&self) -> (Specificity, u32) {
        (self.specificity(), self.rule.order)
    }
}

/// Check a single basic selector against one element.
///
/// Empty name and id match anything; every required pseudo flag must be set.
pub fn matches_basic<E: StyledElement>(selector: &BasicSelector, element: &E) -> bool {
    (selector.element_name.is_empty() || selector.element_name == element.type_name())
        && (selector.id.is_empty() || selector.id == element.identifier())
        && element.pseudo_state().contains(selector.pseudo)
}

/// Check whether a full selector matches `element`.
pub fn matches_selector<E: StyledElement>(selector: &Selector, element: &E) -> bool {
    let Some((subject, rest)) = selector.basic_selectors().split_last() else {
        return false;
    };
    matches_basic(subject, element) && matches_leftward(rest, element)
}

/// Match the remaining chain (leftmost first) against the ancestry of
/// `element`, which already matched the selector to the right.
fn matches_leftward<E: StyledElement>(rest: &[BasicSelector], element: &E) -> bool {
    let Some((next, remaining)) = rest.split_last() else {
        return true;
    };

    match next.relation_to_next {
        Relation::MatchNextIfParent => element.parent().is_some_and(|parent| {
            matches_basic(next, &parent) && matches_leftward(remaining, &parent)
        }),
        // Only the rightmost selector has no relation; treat a stray one as
        // the ancestor combinator.
        Relation::MatchNextIfAncestor | Relation::None => {
            let mut current = element.parent();
            while let Some(ancestor) = current {
                if matches_basic(next, &ancestor) && matches_leftward(remaining, &ancestor) {
                    return true;
                }
                current = ancestor.parent();
            }
            false
        }
    }
}

/// Find every rule in `sheet` that matches `element`, in cascade order.
///
/// Candidates come from the element-name, id and universal buckets. A rule
/// with several matching selectors is reported once, with the most specific
/// of them.
pub fn match_rules<'s, E: StyledElement>(
    sheet: &'s StyleSheet,
    element: &E,
) -> Vec<MatchedStyleRule<'s>> {
    let mut candidates: Vec<RuleId> = Vec::new();
    candidates.extend_from_slice(sheet.rules_for_element(element.type_name()));
    if !element.identifier().is_empty() {
        candidates.extend_from_slice(sheet.rules_for_id(element.identifier()));
    }
    candidates.extend_from_slice(sheet.universal_rules());

    let mut seen = HashSet::with_capacity(candidates.len());
    candidates.retain(|id| seen.insert(*id));

    let mut matched: Vec<MatchedStyleRule<'s>> = candidates
        .into_iter()
        .filter_map(|rule_id| {
            let rule = sheet.rule(rule_id)?;
            rule.selectors
                .iter()
                .filter(|selector| matches_selector(selector, element))
                .max_by_key(|selector| selector.specificity())
                .map(|selector| MatchedStyleRule {
                    sheet: None,
                    rule_id,
                    rule,
                    selector,
                })
        })
        .collect();

    matched.sort_by_key(|m| m.cascade_key());
    log::trace!(
        target: "gilt_style::matcher",
        "{}#{}: {} matched rules",
        element.type_name(),
        element.identifier(),
        matched.len()
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Test tree ────────────────────────────────────────────────────

    struct Node {
        name: &'static str,
        id: &'static str,
        state: PseudoState,
        parent: Option<usize>,
    }

    #[derive(Clone, Copy)]
    struct El<'a> {
        nodes: &'a [Node],
        index: usize,
    }

    impl StyledElement for El<'_> {
        fn type_name(&self) -> &str {
            self.nodes[self.index].name
        }

        fn identifier(&self) -> &str {
            self.nodes[self.index].id
        }

        fn pseudo_state(&self) -> PseudoState {
            self.nodes[self.index].state
        }

        fn parent(&self) -> Option<Self> {
            self.nodes[self.index].parent.map(|index| El {
                nodes: self.nodes,
                index,
            })
        }
    }

    fn node(
        name: &'static str,
        id: &'static str,
        state: PseudoState,
        parent: Option<usize>,
    ) -> Node {
        Node {
            name,
            id,
            state,
            parent,
        }
    }

    /// Window#root > Panel > Button#ok, plus Window#root > Label.
    fn tree() -> Vec<Node> {
        vec![
            node("Window", "root", PseudoState::empty(), None),
            node("Panel", "", PseudoState::FOCUS, Some(0)),
            node("Button", "ok", PseudoState::ENABLED, Some(1)),
            node("Label", "", PseudoState::empty(), Some(0)),
        ]
    }

    fn el(nodes: &[Node], index: usize) -> El<'_> {
        El { nodes, index }
    }

    fn selector(css: &str) -> Selector {
        let (sheet, errors) = StyleSheet::parse(&format!("{css} {{}}"));
        assert!(errors.is_empty(), "{errors:?}");
        let (_, rule) = sheet.rules().next().expect("one rule");
        rule.selectors[0].clone()
    }

    // ── matches_basic ────────────────────────────────────────────────

    #[test]
    fn basic_name_and_id() {
        let nodes = tree();
        let button = el(&nodes, 2);
        assert!(matches_basic(&BasicSelector::new(), &button));
        assert!(matches_basic(&BasicSelector::new().with_element("Button"), &button));
        assert!(matches_basic(&BasicSelector::new().with_id("ok"), &button));
        assert!(!matches_basic(&BasicSelector::new().with_element("Label"), &button));
        assert!(!matches_basic(&BasicSelector::new().with_id("cancel"), &button));
    }

    #[test]
    fn basic_requires_every_pseudo_flag() {
        let nodes = vec![node("Button", "", PseudoState::HOVER | PseudoState::ENABLED, None)];
        let button = el(&nodes, 0);
        let hover = BasicSelector::new().with_pseudo(PseudoState::HOVER);
        let hover_checked = hover.clone().with_pseudo(PseudoState::CHECKED);
        assert!(matches_basic(&hover, &button));
        assert!(!matches_basic(&hover_checked, &button));
    }

    // ── matches_selector ─────────────────────────────────────────────

    #[test]
    fn ancestor_combinator_skips_levels() {
        let nodes = tree();
        assert!(matches_selector(&selector("#root Button"), &el(&nodes, 2)));
        assert!(matches_selector(&selector("Window Panel Button"), &el(&nodes, 2)));
    }

    #[test]
    fn parent_combinator_requires_immediate_parent() {
        let nodes = tree();
        let button = el(&nodes, 2);
        assert!(!matches_selector(&selector("#root > Button"), &button));
        assert!(matches_selector(&selector("#root > Panel > Button"), &button));
        assert!(matches_selector(&selector("Panel > Button"), &button));
    }

    #[test]
    fn ancestors_use_their_own_pseudo_state() {
        let nodes = tree();
        let button = el(&nodes, 2);
        assert!(matches_selector(&selector("Panel:focus Button"), &button));
        assert!(!matches_selector(&selector("Panel:hover Button"), &button));
    }

    #[test]
    fn missing_parent_fails() {
        let nodes = tree();
        assert!(!matches_selector(&selector("Panel > Window"), &el(&nodes, 0)));
        assert!(!matches_selector(&selector("Panel Window"), &el(&nodes, 0)));
    }

    #[test]
    fn ancestor_search_retries_higher_up() {
        // Panel > X > Panel > Button: `Panel > X Button` needs the outer Panel.
        let nodes = vec![
            node("Panel", "", PseudoState::empty(), None),
            node("X", "", PseudoState::empty(), Some(0)),
            node("Panel", "", PseudoState::empty(), Some(1)),
            node("Button", "", PseudoState::empty(), Some(2)),
        ];
        assert!(matches_selector(&selector("Panel > X Button"), &el(&nodes, 3)));
    }

    #[test]
    fn empty_selector_never_matches() {
        let nodes = tree();
        assert!(!matches_selector(&Selector::new(Vec::new()), &el(&nodes, 0)));
    }

    // ── match_rules ──────────────────────────────────────────────────

    fn matched_orders(css: &str, index: usize) -> Vec<u32> {
        let (sheet, errors) = StyleSheet::parse(css);
        assert!(errors.is_empty(), "{errors:?}");
        let nodes = tree();
        match_rules(&sheet, &el(&nodes, index))
            .iter()
            .map(|m| m.rule.order)
            .collect()
    }

    #[test]
    fn cascade_order_is_specificity_then_source() {
        let css = "
            #ok { color: red; }
            Button { color: blue; }
            * { color: green; }
            Button:enabled { color: white; }
            Button { color: black; }
        ";
        // (0,0,0) * < (0,0,1) Button, Button < (0,1,1) :enabled < (1,0,0) #ok
        assert_eq!(matched_orders(css, 2), vec![2, 1, 4, 3, 0]);
    }

    #[test]
    fn rule_reported_once_with_best_selector() {
        let (sheet, _) = StyleSheet::parse("Button, #ok, Panel Button { color: red; }");
        let nodes = tree();
        let matched = match_rules(&sheet, &el(&nodes, 2));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].specificity().id_count, 1);
    }

    #[test]
    fn non_matching_rules_are_excluded() {
        let css = "Label { color: red; } Button:hover { color: blue; } Button { color: green; }";
        assert_eq!(matched_orders(css, 2), vec![2]);
        assert_eq!(matched_orders(css, 3), vec![0]);
    }

    #[test]
    fn empty_stylesheet_matches_nothing() {
        let nodes = tree();
        assert!(match_rules(&StyleSheet::new(), &el(&nodes, 2)).is_empty());
    }
}
