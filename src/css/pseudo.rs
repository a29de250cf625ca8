//! Pseudo-classes and pseudo-elements as a flag set.

use bitflags::bitflags;

bitflags! {
    /// Transient element conditions a selector can require.
    ///
    /// An element reports its current state as one `PseudoState`; a basic
    /// selector matches only if every flag it names is present.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
    pub struct PseudoState: u32 {
        const ENABLED       = 1 << 0;
        const DISABLED      = 1 << 1;
        const HOVER         = 1 << 2;
        const PRESSED       = 1 << 3;
        const FOCUS         = 1 << 4;
        const CHECKED       = 1 << 5;
        const UNCHECKED     = 1 << 6;
        const INDETERMINATE = 1 << 7;
        const SELECTED      = 1 << 8;
        const DEFAULT       = 1 << 9;
        const READ_ONLY     = 1 << 10;
        const EDITABLE      = 1 << 11;
        const ACTIVE        = 1 << 12;
        const FIRST         = 1 << 13;
        const LAST          = 1 << 14;

        // Pseudo-elements.
        const BEFORE        = 1 << 24;
        const AFTER         = 1 << 25;
    }
}

/// Stylesheet spellings of every flag.
const PSEUDO_NAMES: &[(&str, PseudoState)] = &[
    ("enabled", PseudoState::ENABLED),
    ("disabled", PseudoState::DISABLED),
    ("hover", PseudoState::HOVER),
    ("pressed", PseudoState::PRESSED),
    ("focus", PseudoState::FOCUS),
    ("checked", PseudoState::CHECKED),
    ("unchecked", PseudoState::UNCHECKED),
    ("indeterminate", PseudoState::INDETERMINATE),
    ("selected", PseudoState::SELECTED),
    ("default", PseudoState::DEFAULT),
    ("read-only", PseudoState::READ_ONLY),
    ("editable", PseudoState::EDITABLE),
    ("active", PseudoState::ACTIVE),
    ("first", PseudoState::FIRST),
    ("last", PseudoState::LAST),
    ("before", PseudoState::BEFORE),
    ("after", PseudoState::AFTER),
];

impl PseudoState {
    /// Mask of the pseudo-element flags.
    pub const ELEMENTS: PseudoState = PseudoState::BEFORE.union(PseudoState::AFTER);

    /// Look up a pseudo name (without the leading colon), ignoring ASCII case.
    pub fn from_pseudo_name(name: &str) -> Option<Self> {
        PSEUDO_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, flag)| flag)
    }

    /// Canonical spelling of a single flag; `None` for empty or combined sets.
    pub fn pseudo_name(self) -> Option<&'static str> {
        PSEUDO_NAMES
            .iter()
            .find(|&&(_, flag)| flag == self)
            .map(|&(n, _)| n)
    }

    /// Whether any pseudo-element flag is set.
    pub fn has_pseudo_element(self) -> bool {
        self.intersects(Self::ELEMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_round_trips() {
        for &(name, flag) in PSEUDO_NAMES {
            assert_eq!(PseudoState::from_pseudo_name(name), Some(flag));
            assert_eq!(flag.pseudo_name(), Some(name));
        }
    }

    #[test]
    fn every_flag_has_a_name() {
        for (_, flag) in PseudoState::all().iter_names() {
            assert!(flag.pseudo_name().is_some(), "{flag:?}");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(PseudoState::from_pseudo_name("HOVER"), Some(PseudoState::HOVER));
        assert_eq!(PseudoState::from_pseudo_name("Read-Only"), Some(PseudoState::READ_ONLY));
        assert_eq!(PseudoState::from_pseudo_name("visited"), None);
    }

    #[test]
    fn combined_set_has_no_single_name() {
        let both = PseudoState::HOVER | PseudoState::CHECKED;
        assert_eq!(both.pseudo_name(), None);
        assert_eq!(PseudoState::empty().pseudo_name(), None);
    }

    #[test]
    fn contains_requires_every_flag() {
        let state = PseudoState::HOVER | PseudoState::FOCUS;
        assert!(state.contains(PseudoState::HOVER));
        assert!(state.contains(PseudoState::HOVER | PseudoState::FOCUS));
        assert!(!state.contains(PseudoState::HOVER | PseudoState::CHECKED));
        assert!(state.contains(PseudoState::empty()));
    }

    #[test]
    fn pseudo_elements() {
        assert!(PseudoState::AFTER.has_pseudo_element());
        assert!(!PseudoState::HOVER.has_pseudo_element());
    }
}
