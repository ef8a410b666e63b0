//! Terrain sculpt tool.

use super::{BrushAction, BrushStroke, Tool, ToolId};
use crate::core::BrushPreferences;
use crate::input::Modifiers;

pub const SCULPT_TOOL_ID: ToolId = ToolId("sculpt");

/// Raises terrain under the cursor; holding Shift lowers it.
#[derive(Debug, Default)]
pub struct SculptTool;

impl SculptTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for SculptTool {
    fn id(&self) -> ToolId {
        SCULPT_TOOL_ID
    }

    fn name(&self) -> &str {
        "Sculpt"
    }

    fn shortcut(&self) -> Option<char> {
        Some('B')
    }

    fn terrain_stroke(&self, modifiers: Modifiers, brush: &BrushPreferences) -> Option<BrushStroke> {
        Some(BrushStroke {
            action: BrushAction::Sculpt { lowering: modifiers.shift },
            radius: brush.radius,
            strength: brush.strength,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_lowers() {
        let tool = SculptTool::new();
        let brush = BrushPreferences::default();
        let raise = tool.terrain_stroke(Modifiers::default(), &brush).unwrap();
        assert_eq!(raise.action, BrushAction::Sculpt { lowering: false });
        assert_eq!(raise.radius, brush.radius);

        let shift = Modifiers { shift: true, ..Default::default() };
        let lower = tool.terrain_stroke(shift, &brush).unwrap();
        assert_eq!(lower.action, BrushAction::Sculpt { lowering: true });
    }
}
