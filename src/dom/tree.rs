//! Tree operations: insert, remove, reparent, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use crate::css::pseudo::PseudoState;

use super::element::{ElementData, ElementId, ElementRef};

/// Structural edit that the tree refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("element {0:?} does not exist")]
    MissingElement(ElementId),
    #[error("moving {node:?} under {new_parent:?} would create a cycle")]
    Cycle {
        node: ElementId,
        new_parent: ElementId,
    },
}

/// Element tree backed by a slotmap arena.
///
/// Parent and child links live in secondary maps, so removal is
/// O(subtree size) and lookup is O(1).
#[derive(Debug, Default)]
pub struct ElementTree {
    elements: SlotMap<ElementId, ElementData>,
    children: SecondaryMap<ElementId, Vec<ElementId>>,
    parent: SecondaryMap<ElementId, ElementId>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parentless element.
    pub fn insert(&mut self, data: ElementData) -> ElementId {
        let id = self.elements.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Insert an element as the last child of `parent`.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn insert_child(&mut self, parent: ElementId, data: ElementData) -> Option<ElementId> {
        if !self.elements.contains_key(parent) {
            return None;
        }
        let id = self.insert(data);
        self.parent.insert(id, parent);
        self.children.get_mut(parent)?.push(id);
        Some(id)
    }

    /// Remove an element and its whole subtree, returning the element's data.
    pub fn remove(&mut self, id: ElementId) -> Option<ElementData> {
        if !self.elements.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut queue = VecDeque::from([id]);
        let mut removed = None;
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parent.remove(current);
            let data = self.elements.remove(current);
            if current == id {
                removed = data;
            }
        }
        removed
    }

    /// Move `node` (with its subtree) to the end of `new_parent`'s children.
    pub fn reparent(&mut self, node: ElementId, new_parent: ElementId) -> Result<(), TreeError> {
        for id in [node, new_parent] {
            if !self.elements.contains_key(id) {
                return Err(TreeError::MissingElement(id));
            }
        }
        if node == new_parent || self.ancestors(new_parent).contains(&node) {
            return Err(TreeError::Cycle { node, new_parent });
        }

        self.detach(node);
        self.parent.insert(node, new_parent);
        if let Some(siblings) = self.children.get_mut(new_parent) {
            siblings.push(node);
        }
        Ok(())
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(old_parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != id);
            }
        }
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent.get(id).copied()
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ancestors of `id`, nearest first. Does not include `id`.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.elements.get_mut(id)
    }

    /// A matchable handle to an element.
    pub fn element(&self, id: ElementId) -> Option<ElementRef<'_>> {
        self.elements
            .get(id)
            .map(|data| ElementRef::new(self, id, data))
    }

    /// Replace an element's pseudo state, returning whether it changed.
    /// A missing element reports no change.
    pub fn set_pseudo_state(&mut self, id: ElementId, state: PseudoState) -> bool {
        self.elements
            .get_mut(id)
            .is_some_and(|data| data.set_pseudo_state(state))
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.elements.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }
}
