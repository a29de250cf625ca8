//! Element types: ElementId, ElementData, ElementRef.

use slotmap::new_key_type;

use crate::css::matcher::StyledElement;
use crate::css::model::SheetId;
use crate::css::pseudo::PseudoState;

use super::tree::ElementTree;

new_key_type! {
    /// Handle of an element in an [`ElementTree`]. Copy, lightweight (u64).
    pub struct ElementId;
}

/// What the style engine sees of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Element type name (e.g. "Button", "Panel").
    pub type_name: String,
    /// Identifier for `#id` selectors; empty when unset.
    pub id: String,
    pub pseudo_state: PseudoState,
    /// Element-scoped stylesheet registered with the engine.
    pub style_sheet: Option<SheetId>,
    /// Keep every stylesheet rule away from this element.
    pub no_style_sheet: bool,
}

impl ElementData {
    /// A new element of the given type, enabled, with no identifier.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: String::new(),
            pseudo_state: PseudoState::ENABLED,
            style_sheet: None,
            no_style_sheet: false,
        }
    }

    /// Set the identifier (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace the pseudo state (builder).
    pub fn with_state(mut self, state: PseudoState) -> Self {
        self.pseudo_state = state;
        self
    }

    /// Attach an element-scoped stylesheet (builder).
    pub fn with_style_sheet(mut self, sheet: SheetId) -> Self {
        self.style_sheet = Some(sheet);
        self
    }

    /// Opt out of stylesheet styling (builder).
    pub fn with_no_style_sheet(mut self) -> Self {
        self.no_style_sheet = true;
        self
    }

    /// Replace the pseudo state, returning whether it changed.
    pub fn set_pseudo_state(&mut self, state: PseudoState) -> bool {
        let changed = self.pseudo_state != state;
        self.pseudo_state = state;
        changed
    }

    /// Set or clear some pseudo flags, returning whether the state changed.
    pub fn toggle_pseudo(&mut self, flags: PseudoState, on: bool) -> bool {
        let mut state = self.pseudo_state;
        state.set(flags, on);
        self.set_pseudo_state(state)
    }
}

/// A borrowed element handle: tree plus key.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a ElementTree,
    id: ElementId,
    data: &'a ElementData,
}

impl<'a> ElementRef<'a> {
    pub(super) fn new(tree: &'a ElementTree, id: ElementId, data: &'a ElementData) -> Self {
        Self { tree, id, data }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn data(&self) -> &'a ElementData {
        self.data
    }
}

impl StyledElement for ElementRef<'_> {
    fn type_name(&self) -> &str {
        &self.data.type_name
    }

    fn identifier(&self) -> &str {
        &self.data.id
    }

    fn pseudo_state(&self) -> PseudoState {
        self.data.pseudo_state
    }

    fn parent(&self) -> Option<Self> {
        self.tree.parent(self.id).and_then(|parent| self.tree.element(parent))
    }

    fn style_sheet(&self) -> Option<SheetId> {
        self.data.style_sheet
    }

    fn uses_style_sheets(&self) -> bool {
        !self.data.no_style_sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = ElementData::new("Button");
        assert_eq!(data.type_name, "Button");
        assert!(data.id.is_empty());
        assert_eq!(data.pseudo_state, PseudoState::ENABLED);
        assert_eq!(data.style_sheet, None);
        assert!(!data.no_style_sheet);
    }

    #[test]
    fn builders() {
        let data = ElementData::new("Label")
            .with_id("title")
            .with_state(PseudoState::DISABLED);
        assert_eq!(data.id, "title");
        assert_eq!(data.pseudo_state, PseudoState::DISABLED);
    }

    #[test]
    fn set_pseudo_state_reports_change() {
        let mut data = ElementData::new("Button");
        assert!(data.set_pseudo_state(PseudoState::ENABLED | PseudoState::HOVER));
        assert!(!data.set_pseudo_state(PseudoState::ENABLED | PseudoState::HOVER));
    }

    #[test]
    fn toggle_pseudo() {
        let mut data = ElementData::new("Button");
        assert!(data.toggle_pseudo(PseudoState::HOVER, true));
        assert!(data.pseudo_state.contains(PseudoState::HOVER));
        assert!(!data.toggle_pseudo(PseudoState::HOVER, true));
        assert!(data.toggle_pseudo(PseudoState::HOVER, false));
        assert_eq!(data.pseudo_state, PseudoState::ENABLED);
    }

    #[test]
    fn element_ref_walks_parents() {
        let mut tree = ElementTree::new();
        let root = tree.insert(ElementData::new("Window").with_id("root"));
        let button = tree.insert_child(root, ElementData::new("Button")).unwrap();

        let element = tree.element(button).unwrap();
        assert_eq!(element.type_name(), "Button");
        assert_eq!(element.identifier(), "");

        let parent = element.parent().unwrap();
        assert_eq!(parent.id(), root);
        assert_eq!(parent.identifier(), "root");
        assert!(parent.parent().is_none());
    }

    #[test]
    fn element_ref_reports_style_sheet_settings() {
        let sheet = SheetId::default();
        let mut tree = ElementTree::new();
        let styled = tree.insert(ElementData::new("Panel").with_style_sheet(sheet));
        let plain = tree.insert(ElementData::new("Panel").with_no_style_sheet());

        let styled = tree.element(styled).unwrap();
        assert_eq!(styled.style_sheet(), Some(sheet));
        assert!(styled.uses_style_sheets());

        let plain = tree.element(plain).unwrap();
        assert_eq!(plain.style_sheet(), None);
        assert!(!plain.uses_style_sheets());
    }

    #[test]
    fn element_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<ElementId>();
        assert_copy::<ElementRef<'_>>();
    }
}
