//! Selection tool for picking entities.

use super::{PickResult, Tool, ToolId, ToolResult};
use crate::core::{SelectionManager, SelectionMode};
use crate::input::Modifiers;

pub const SELECTION_TOOL_ID: ToolId = ToolId("select");

/// Click to select; Shift/Ctrl combine with the current selection.
#[derive(Debug, Default)]
pub struct SelectionTool;

impl SelectionTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for SelectionTool {
    fn id(&self) -> ToolId {
        SELECTION_TOOL_ID
    }

    fn name(&self) -> &str {
        "Select"
    }

    fn shortcut(&self) -> Option<char> {
        Some('Q')
    }

    fn on_click(
        &mut self,
        hit: Option<&PickResult>,
        modifiers: Modifiers,
        selection: &mut SelectionManager,
    ) -> ToolResult {
        let mode = SelectionMode::from_modifiers(modifiers.shift, modifiers.ctrl);
        match hit {
            Some(hit) => {
                selection.select(hit.entity, mode);
                ToolResult::Completed
            }
            // Clicking empty space only clears a plain selection
            None if mode == SelectionMode::Replace => {
                selection.clear();
                ToolResult::Completed
            }
            None => ToolResult::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;
    use vista_math::Vec3;

    fn hit(id: u32) -> PickResult {
        PickResult {
            entity: EntityId(id),
            distance: 1.0,
            point: Vec3::ZERO,
        }
    }

    #[test]
    fn test_click_replaces_selection() {
        let mut tool = SelectionTool::new();
        let mut selection = SelectionManager::new();
        tool.on_click(Some(&hit(1)), Modifiers::default(), &mut selection);
        tool.on_click(Some(&hit(2)), Modifiers::default(), &mut selection);
        assert_eq!(selection.selected(), &[EntityId(2)]);
    }

    #[test]
    fn test_shift_click_adds() {
        let mut tool = SelectionTool::new();
        let mut selection = SelectionManager::new();
        let shift = Modifiers { shift: true, ..Default::default() };
        tool.on_click(Some(&hit(1)), Modifiers::default(), &mut selection);
        tool.on_click(Some(&hit(2)), shift, &mut selection);
        assert_eq!(selection.count(), 2);
        assert_eq!(selection.primary(), Some(EntityId(2)));

        // Shift-click on nothing keeps the selection
        assert_eq!(tool.on_click(None, shift, &mut selection), ToolResult::None);
        assert_eq!(selection.count(), 2);
    }

    #[test]
    fn test_click_empty_space_clears() {
        let mut tool = SelectionTool::new();
        let mut selection = SelectionManager::new();
        tool.on_click(Some(&hit(1)), Modifiers::default(), &mut selection);
        tool.on_click(None, Modifiers::default(), &mut selection);
        assert!(selection.is_empty());
    }
}
