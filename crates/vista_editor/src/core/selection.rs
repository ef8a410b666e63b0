//! Entity selection.
//!
//! Clicks replace the selection; Shift adds, Ctrl removes and Ctrl+Shift
//! toggles. The primary entity is the one the gizmo attaches to.

use super::EntityId;

/// How a click combines with the current selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Replace,
    Add,
    Remove,
    Toggle,
}

impl SelectionMode {
    pub fn from_modifiers(shift: bool, ctrl: bool) -> Self {
        match (shift, ctrl) {
            (true, true) => Self::Toggle,
            (true, false) => Self::Add,
            (false, true) => Self::Remove,
            (false, false) => Self::Replace,
        }
    }
}

/// Selected entities in selection order, plus the primary one
#[derive(Clone, Debug, Default)]
pub struct SelectionManager {
    selected: Vec<EntityId>,
    primary: Option<EntityId>,
    dirty: bool,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entity that receives the gizmo
    pub fn primary(&self) -> Option<EntityId> {
        self.primary
    }

    pub fn selected(&self) -> &[EntityId] {
        &self.selected
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected.contains(&id)
    }

    /// Report and clear the changed flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn select(&mut self, id: EntityId, mode: SelectionMode) {
        let before = (self.selected.clone(), self.primary);
        match mode {
            SelectionMode::Replace => {
                self.selected.clear();
                self.selected.push(id);
                self.primary = Some(id);
            }
            SelectionMode::Add => {
                if !self.selected.contains(&id) {
                    self.selected.push(id);
                }
                self.primary = Some(id);
            }
            SelectionMode::Remove => self.drop_entity(id),
            SelectionMode::Toggle => {
                if self.selected.contains(&id) {
                    self.drop_entity(id);
                } else {
                    self.selected.push(id);
                    self.primary = Some(id);
                }
            }
        }
        if before != (self.selected.clone(), self.primary) {
            self.dirty = true;
        }
    }

    /// Replace the selection with a single entity
    pub fn set(&mut self, id: EntityId) {
        self.select(id, SelectionMode::Replace);
    }

    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.primary = None;
            self.dirty = true;
        }
    }

    /// Forget an entity that left the scene
    pub fn remove_entity(&mut self, id: EntityId) {
        if self.selected.contains(&id) {
            self.drop_entity(id);
            self.dirty = true;
        }
    }

    fn drop_entity(&mut self, id: EntityId) {
        self.selected.retain(|&e| e != id);
        if self.primary == Some(id) {
            self.primary = self.selected.last().copied();
        }
    }
}
