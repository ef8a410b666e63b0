//! Terrain paint tool.

use super::{BrushAction, BrushStroke, Tool, ToolId};
use crate::core::BrushPreferences;
use crate::input::Modifiers;

pub const PAINT_TOOL_ID: ToolId = ToolId("paint");

/// Blends the splat weights under the cursor toward the layer chosen in
/// the brush preferences.
#[derive(Debug, Default)]
pub struct PaintTool;

impl PaintTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for PaintTool {
    fn id(&self) -> ToolId {
        PAINT_TOOL_ID
    }

    fn name(&self) -> &str {
        "Paint"
    }

    fn shortcut(&self) -> Option<char> {
        Some('P')
    }

    fn terrain_stroke(&self, _modifiers: Modifiers, brush: &BrushPreferences) -> Option<BrushStroke> {
        Some(BrushStroke {
            action: BrushAction::Paint { layer: brush.paint_layer },
            radius: brush.radius,
            strength: brush.strength,
        })
    }
}
