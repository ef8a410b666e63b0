//! Tool trait and registry.

use std::collections::HashMap;

use crate::core::{BrushPreferences, SelectionManager};
use crate::input::Modifiers;

use super::PickResult;

/// Unique identifier for a tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ToolId(pub &'static str);

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of tool operations.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolResult {
    /// No action taken
    None,
    /// Tool completed an action
    Completed,
    /// Tool wants to switch to another tool
    SwitchTo(ToolId),
}

/// Terrain edit applied at the cursor
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BrushAction {
    Sculpt { lowering: bool },
    Paint { layer: usize },
}

/// One brush application
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushStroke {
    pub action: BrushAction,
    /// World units
    pub radius: f32,
    pub strength: f32,
}

/// A tool for viewport interaction.
pub trait Tool: Send + Sync {
    fn id(&self) -> ToolId;

    fn name(&self) -> &str;

    /// Keyboard shortcut (upper case letter).
    fn shortcut(&self) -> Option<char> {
        None
    }

    fn on_activate(&mut self) {}

    fn on_deactivate(&mut self) {}

    /// Pointer went down on the viewport without touching the gizmo.
    /// `hit` is the nearest entity under the cursor.
    fn on_click(
        &mut self,
        _hit: Option<&PickResult>,
        _modifiers: Modifiers,
        _selection: &mut SelectionManager,
    ) -> ToolResult {
        ToolResult::None
    }

    /// Brush to apply each tick while the pointer is held over terrain
    fn terrain_stroke(&self, _modifiers: Modifiers, _brush: &BrushPreferences) -> Option<BrushStroke> {
        None
    }
}

/// Registry for managing tools.
pub struct ToolRegistry {
    tools: HashMap<ToolId, Box<dyn Tool>>,
    active_tool: Option<ToolId>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("active_tool", &self.active_tool)
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            active_tool: None,
        }
    }

    /// Register a tool. The first registered tool becomes active.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let id = tool.id();
        if self.active_tool.is_none() {
            self.active_tool = Some(id);
        }
        self.tools.insert(id, tool);
    }

    pub fn active(&self) -> Option<&dyn Tool> {
        self.active_tool.and_then(|id| self.tools.get(&id).map(|t| t.as_ref()))
    }

    pub fn active_mut(&mut self) -> Option<&mut Box<dyn Tool>> {
        let id = self.active_tool?;
        self.tools.get_mut(&id)
    }

    pub fn active_id(&self) -> Option<ToolId> {
        self.active_tool
    }

    /// Switch to a registered tool. Unknown ids are ignored.
    pub fn switch_to(&mut self, id: ToolId) -> bool {
        if !self.tools.contains_key(&id) {
            log::warn!("Unknown tool '{}'", id);
            return false;
        }
        if self.active_tool == Some(id) {
            return true;
        }

        if let Some(current_id) = self.active_tool {
            if let Some(tool) = self.tools.get_mut(&current_id) {
                tool.on_deactivate();
            }
        }

        self.active_tool = Some(id);
        if let Some(tool) = self.tools.get_mut(&id) {
            tool.on_activate();
        }
        log::info!("Switched to tool '{}'", id);
        true
    }

    pub fn get(&self, id: ToolId) -> Option<&dyn Tool> {
        self.tools.get(&id).map(|t| t.as_ref())
    }

    pub fn tool_ids(&self) -> impl Iterator<Item = ToolId> + '_ {
        self.tools.keys().copied()
    }

    /// Every registered shortcut key
    pub fn shortcuts(&self) -> Vec<char> {
        self.tools.values().filter_map(|t| t.shortcut()).collect()
    }

    pub fn find_by_shortcut(&self, key: char) -> Option<ToolId> {
        let key = key.to_ascii_uppercase();
        self.tools
            .iter()
            .find(|(_, tool)| tool.shortcut() == Some(key))
            .map(|(id, _)| *id)
    }
}
