//! Per-tick editor pipeline.
//!
//! `EditorContext` owns everything the manipulation core mutates and is
//! passed explicitly; there is no global editor state. Each `tick` runs a
//! fixed sequence:
//!
//! ```text
//! shortcuts → ray → gizmo scale → gizmo drag/hover → pick on click
//!           → terrain stroke → FrameOutput
//! ```
//!
//! The gizmo always sees a click before the picker does, so pressing on a
//! handle never changes the selection.

use vista_math::{Mat4, Ray, Vec3};
use vista_terrain::TerrainDirty;

use super::{EditorPreferences, EntityId, Scene, SelectionManager};
use crate::input::{InputFrame, InputSource, Key};
use crate::tools::{
    pick, pick_terrain, BrushAction, PaintTool, PickResult, SculptTool, SelectionTool, ToolRegistry,
    ToolResult,
};
use crate::viewport::gizmos::{GizmoMode, GizmoPart};
use crate::viewport::{CameraState, GizmoState};

/// Keys handled by the context itself
const CONTEXT_KEYS: [Key; 7] = [
    Key::Shift,
    Key::Ctrl,
    Key::Alt,
    Key::Escape,
    Key::Delete,
    Key::Char('W'),
    Key::Char('E'),
];

/// Terrain modified by this tick's brush stroke
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainEdit {
    pub entity: EntityId,
    /// World-space brush centre
    pub point: Vec3,
    /// Vertices touched
    pub modified: usize,
}

/// What changed during one tick, for the renderer and UI
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub frame: u64,
    /// Cursor ray used for every test this tick
    pub ray: Ray,
    /// Primary selection after the tick
    pub selection: Option<EntityId>,
    pub selection_changed: bool,
    /// Result of this tick's click pick, if a click was picked
    pub picked: Option<PickResult>,
    pub hovered_part: GizmoPart,
    pub active_part: GizmoPart,
    /// Snapped swept angle of a ring drag, in degrees
    pub gizmo_readout: Option<f32>,
    pub gizmo_colors: [[f32; 4]; 3],
    /// Handle matrices when a gizmo is shown
    pub gizmo_matrices: Option<[Mat4; 3]>,
    pub terrain_edit: Option<TerrainEdit>,
    /// New world matrices (column-major) of moved entities
    pub changed_models: Vec<(EntityId, [f32; 16])>,
    /// Terrains whose render buffers need re-upload
    pub terrain_dirty: Vec<(EntityId, TerrainDirty)>,
}

/// Editor state for the manipulation core
#[derive(Debug)]
pub struct EditorContext {
    pub scene: Scene,
    pub selection: SelectionManager,
    pub tools: ToolRegistry,
    pub gizmo: GizmoState,
    pub preferences: EditorPreferences,
    previous: InputFrame,
    stroke_active: bool,
    drag_target: Option<EntityId>,
    frame: u64,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorPreferences::default())
    }
}

impl EditorContext {
    /// Context with an empty scene and the standard tools registered
    pub fn new(preferences: EditorPreferences) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(Box::new(SelectionTool::new()));
        tools.register(Box::new(SculptTool::new()));
        tools.register(Box::new(PaintTool::new()));

        Self {
            scene: Scene::new(),
            selection: SelectionManager::new(),
            tools,
            gizmo: GizmoState::from_preferences(&preferences.gizmo),
            preferences,
            previous: InputFrame::default(),
            stroke_active: false,
            drag_target: None,
            frame: 0,
        }
    }

    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }

    /// Ticks run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether a terrain brush stroke is in progress
    pub fn is_stroking(&self) -> bool {
        self.stroke_active
    }

    /// Entity the gizmo is attached to and its world position
    pub fn gizmo_target(&self) -> Option<(EntityId, Vec3)> {
        let id = self.selection.primary()?;
        let entity = self.scene.get(id)?;
        if !entity.is_interactive() {
            return None;
        }
        Some((id, self.scene.world_matrix(id)?.translation()))
    }

    fn watched_keys(&self) -> Vec<Key> {
        let mut keys = CONTEXT_KEYS.to_vec();
        keys.extend(self.tools.shortcuts().into_iter().map(Key::Char));
        keys
    }

    /// Run one input sample through the pipeline
    pub fn tick<I: InputSource + ?Sized>(&mut self, input: &I, camera: &CameraState) -> FrameOutput {
        self.frame += 1;
        let current = InputFrame::sample(input, &self.watched_keys());
        let pressed = current.left_pressed(&self.previous);
        let mut changed = Vec::new();

        self.handle_shortcuts(&current, &mut changed);

        let ray = camera.screen_ray(current.pointer);

        let target = self.gizmo_target();
        if let Some((_, center)) = target {
            self.gizmo.update_scale(camera.position(), center);
        }

        // Gizmo first: a press on a handle is not a pick
        let mut gizmo_consumed = false;
        if self.gizmo.is_dragging() {
            gizmo_consumed = true;
            if current.left {
                self.apply_drag(&ray, &mut changed);
            } else {
                self.finish_drag();
            }
        } else if let Some((id, center)) = target {
            let part = self.gizmo.check_hit(center, &ray);
            if pressed && part != GizmoPart::None {
                if let Some(transform) = self.scene.get(id).map(|e| e.transform) {
                    if self.gizmo.begin_drag(&transform, center, &ray) {
                        self.drag_target = Some(id);
                        gizmo_consumed = true;
                    }
                }
            }
        } else {
            self.gizmo.clear_hover();
        }

        let mut picked = None;
        if pressed && !gizmo_consumed {
            picked = pick(&ray, &self.scene);
            let result = match self.tools.active_mut() {
                Some(tool) => tool.on_click(picked.as_ref(), current.modifiers, &mut self.selection),
                None => ToolResult::None,
            };
            if let ToolResult::SwitchTo(id) = result {
                self.tools.switch_to(id);
            }
            self.stroke_active = self
                .tools
                .active()
                .and_then(|tool| tool.terrain_stroke(current.modifiers, &self.preferences.brush))
                .is_some();
        }
        if current.left_released(&self.previous) && self.stroke_active {
            log::debug!("Terrain stroke ended");
        }
        if !current.left {
            self.stroke_active = false;
        }

        let terrain_edit = if self.stroke_active && !self.gizmo.is_dragging() {
            self.apply_stroke(&ray, &current)
        } else {
            None
        };

        self.previous = current;
        self.build_output(ray, picked, terrain_edit, changed)
    }

    fn handle_shortcuts(&mut self, current: &InputFrame, changed: &mut Vec<EntityId>) {
        let previous = self.previous.clone();
        let pressed = |key: Key| current.key_pressed(&previous, key);

        for key in self.tools.shortcuts() {
            if pressed(Key::Char(key)) {
                if let Some(id) = self.tools.find_by_shortcut(key) {
                    self.stroke_active = false;
                    self.tools.switch_to(id);
                }
            }
        }

        if pressed(Key::Char('W')) {
            self.gizmo.set_mode(GizmoMode::Move);
        }
        if pressed(Key::Char('E')) {
            self.gizmo.set_mode(GizmoMode::Rotate);
        }

        if pressed(Key::Escape) {
            if self.gizmo.is_dragging() {
                self.cancel_drag(changed);
            } else {
                self.selection.clear();
            }
        }

        if pressed(Key::Delete) && !self.gizmo.is_dragging() {
            for id in self.selection.selected().to_vec() {
                if self.scene.remove(id).is_some() {
                    log::info!("Deleted {}", id);
                }
                self.selection.remove_entity(id);
            }
        }
    }

    fn apply_drag(&mut self, ray: &Ray, changed: &mut Vec<EntityId>) {
        let Some(id) = self.drag_target else {
            self.finish_drag();
            return;
        };
        let Some(mut transform) = self.scene.get(id).map(|e| e.transform) else {
            self.finish_drag();
            return;
        };
        if self.gizmo.update_drag(&mut transform, ray).is_some()
            && self.scene.set_transform(id, transform).is_ok()
        {
            changed.extend(self.scene.subtree(id));
        }
    }

    fn finish_drag(&mut self) {
        self.gizmo.end_drag();
        self.drag_target = None;
    }

    /// Abort the drag and put the entity back where it started
    fn cancel_drag(&mut self, changed: &mut Vec<EntityId>) {
        let drag = self.gizmo.end_drag();
        if let (Some(drag), Some(id)) = (drag, self.drag_target.take()) {
            if self.scene.set_transform(id, drag.origin).is_ok() {
                changed.extend(self.scene.subtree(id));
            }
            log::debug!("Gizmo drag cancelled on {}", id);
        }
    }

    fn apply_stroke(&mut self, ray: &Ray, current: &InputFrame) -> Option<TerrainEdit> {
        let stroke = self
            .tools
            .active()?
            .terrain_stroke(current.modifiers, &self.preferences.brush)?;
        let hit = pick_terrain(ray, &self.scene)?;
        let terrain = self.scene.terrain_mut(hit.entity).ok()?;

        let modified = match stroke.action {
            BrushAction::Sculpt { lowering } => {
                terrain.sculpt(hit.point.x, hit.point.z, stroke.radius, stroke.strength, lowering)
            }
            BrushAction::Paint { layer } => {
                match terrain.paint(hit.point.x, hit.point.z, stroke.radius, stroke.strength, layer) {
                    Ok(count) => count,
                    Err(err) => {
                        log::warn!("Paint stroke rejected: {}", err);
                        0
                    }
                }
            }
        };

        Some(TerrainEdit {
            entity: hit.entity,
            point: hit.point,
            modified,
        })
    }

    fn build_output(
        &mut self,
        ray: Ray,
        picked: Option<PickResult>,
        terrain_edit: Option<TerrainEdit>,
        mut changed: Vec<EntityId>,
    ) -> FrameOutput {
        changed.sort();
        changed.dedup();
        let changed_models = changed
            .into_iter()
            .filter_map(|id| self.scene.world_matrix(id).map(|m| (id, m.to_cols_array())))
            .collect();

        let mut terrain_dirty = Vec::new();
        for id in self.scene.terrain_ids() {
            if let Ok(terrain) = self.scene.terrain_mut(id) {
                let dirty = terrain.take_dirty();
                if dirty.any() {
                    terrain_dirty.push((id, dirty));
                }
            }
        }

        let gizmo_matrices = self
            .gizmo_target()
            .map(|(_, center)| self.gizmo.handle_matrices(center));

        let output = FrameOutput {
            frame: self.frame,
            ray,
            selection: self.selection.primary(),
            selection_changed: self.selection.take_dirty(),
            picked,
            hovered_part: self.gizmo.hovered_part(),
            active_part: self.gizmo.active_part(),
            gizmo_readout: self.gizmo.angle_readout(),
            gizmo_colors: self.gizmo.handle_colors(),
            gizmo_matrices,
            terrain_edit,
            changed_models,
            terrain_dirty,
        };
        log::trace!(
            "Tick {}: selection={:?} hover={:?} active={:?}",
            output.frame,
            output.selection,
            output.hovered_part,
            output.active_part
        );
        output
    }
}
