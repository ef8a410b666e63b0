//! Editor tools for user interaction.
//!
//! The active tool decides what a viewport click or drag does when the
//! gizmo is not involved: select entities, sculpt or paint terrain.

mod paint_tool;
pub mod picker;
mod sculpt_tool;
mod selection_tool;
mod tool;

pub use paint_tool::{PaintTool, PAINT_TOOL_ID};
pub use picker::{pick, pick_terrain, PickResult};
pub use sculpt_tool::{SculptTool, SCULPT_TOOL_ID};
pub use selection_tool::{SelectionTool, SELECTION_TOOL_ID};
pub use tool::{BrushAction, BrushStroke, Tool, ToolId, ToolRegistry, ToolResult};
