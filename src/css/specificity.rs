//! Selector specificity calculation and comparison.
//!
//! Specificity ranks competing rules during the cascade. The tuple is
//!
//! ```text
//! (id_count, pseudo_count, type_count)
//! ```
//!
//! Fields are ordered so that the derived `Ord` (lexicographic) gives the
//! cascade result: more ids beat fewer ids, then more pseudo terms, then more
//! element names. Source order is not part of the tuple; the matcher breaks
//! ties with the rule's `order`.

use std::fmt;

use crate::css::model::BasicSelector;

/// Selector specificity, ordered from highest to lowest priority field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity {
    /// Number of non-empty identifiers (`#id`).
    pub id_count: u16,
    /// Number of pseudo terms (`:hover`), duplicates included.
    pub pseudo_count: u16,
    /// Number of non-empty element names (`Button`).
    pub type_count: u16,
}

impl Specificity {
    pub const ZERO: Self = Self {
        id_count: 0,
        pseudo_count: 0,
        type_count: 0,
    };

    /// Sum the contributions of every basic selector in a chain.
    pub fn from_basic_selectors(chain: &[BasicSelector]) -> Self {
        chain.iter().fold(Self::ZERO, |acc, sel| Self {
            id_count: acc.id_count + u16::from(!sel.id.is_empty()),
            pseudo_count: acc.pseudo_count.saturating_add(sel.pseudo_count),
            type_count: acc.type_count + u16::from(!sel.element_name.is_empty()),
        })
    }

    /// Packed weight: `0x100` per id, `0x10` per pseudo term, `1` per element name.
    ///
    /// Agrees with the tuple order while each count stays below 16.
    pub fn weight(&self) -> u32 {
        u32::from(self.id_count) * 0x100
            + u32::from(self.pseudo_count) * 0x10
            + u32::from(self.type_count)
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{})",
            self.id_count, self.pseudo_count, self.type_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::model::Relation;
    use crate::css::pseudo::PseudoState;

    fn spec(chain: &[BasicSelector]) -> Specificity {
        Specificity::from_basic_selectors(chain)
    }

    #[test]
    fn zero_for_universal() {
        assert_eq!(spec(&[BasicSelector::new()]), Specificity::ZERO);
        assert_eq!(spec(&[]), Specificity::ZERO);
    }

    #[test]
    fn type_only() {
        let s = spec(&[BasicSelector::new().with_element("Button")]);
        assert_eq!(s.type_count, 1);
        assert_eq!(s.pseudo_count, 0);
        assert_eq!(s.id_count, 0);
        assert_eq!(s.weight(), 1);
    }

    #[test]
    fn compound() {
        // Button#ok:hover:checked
        let s = spec(&[BasicSelector::new()
            .with_element("Button")
            .with_id("ok")
            .with_pseudo(PseudoState::HOVER)
            .with_pseudo(PseudoState::CHECKED)]);
        assert_eq!(s, Specificity { id_count: 1, pseudo_count: 2, type_count: 1 });
        assert_eq!(s.weight(), 0x121);
        assert_eq!(s.to_string(), "(1,2,1)");
    }

    #[test]
    fn id_beats_pseudo_and_type() {
        let with_id = spec(&[BasicSelector::new().with_element("Button").with_id("ok")]);
        let without_id = spec(&[BasicSelector::new()
            .with_element("Button")
            .with_pseudo(PseudoState::HOVER)
            .with_pseudo(PseudoState::FOCUS)]);
        assert!(with_id > without_id);
    }

    #[test]
    fn id_beats_no_id_at_equal_counts() {
        let with_id = spec(&[BasicSelector::new()
            .with_element("Button")
            .with_id("ok")
            .with_pseudo(PseudoState::HOVER)]);
        let without_id = spec(&[BasicSelector::new()
            .with_element("Button")
            .with_pseudo(PseudoState::HOVER)]);
        assert!(with_id > without_id);
    }

    #[test]
    fn pseudo_beats_type() {
        let pseudo = spec(&[BasicSelector::new().with_pseudo(PseudoState::HOVER)]);
        let types = spec(&[
            BasicSelector::new()
                .with_element("Panel")
                .related(Relation::MatchNextIfAncestor),
            BasicSelector::new().with_element("Button"),
        ]);
        assert!(pseudo > types);
    }

    #[test]
    fn chain_sums_every_link() {
        // #root > Panel Button:hover
        let s = spec(&[
            BasicSelector::new()
                .with_id("root")
                .related(Relation::MatchNextIfParent),
            BasicSelector::new()
                .with_element("Panel")
                .related(Relation::MatchNextIfAncestor),
            BasicSelector::new()
                .with_element("Button")
                .with_pseudo(PseudoState::HOVER),
        ]);
        assert_eq!(s, Specificity { id_count: 1, pseudo_count: 1, type_count: 2 });
    }
}
