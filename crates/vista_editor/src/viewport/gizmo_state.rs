//! Gizmo state management.
//!
//! Tracks the current mode, the Idle / Hover / Dragging phase and the
//! display scale. At most one part is hovered or dragged at a time.

use vista_math::{radians, Mat4, Ray, Transform, Vec3};

use crate::core::GizmoPreferences;
use crate::viewport::gizmos::{
    colors, Axis, DragState, Gizmo, GizmoMode, GizmoPart, RotateGizmo, TransformDelta, TranslateGizmo,
};

/// Snap settings for gizmo operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapSettings {
    /// Rotation increment (degrees); rotation always snaps
    pub rotate: f32,
    /// Translation increment (units), off when `None`
    pub translate: Option<f32>,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            rotate: 15.0,
            translate: None,
        }
    }
}

/// Interaction phase
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GizmoPhase {
    #[default]
    Idle,
    Hover(GizmoPart),
    Dragging(DragState),
}

/// State for gizmo system.
#[derive(Clone, Debug)]
pub struct GizmoState {
    mode: GizmoMode,
    phase: GizmoPhase,
    pub snap: SnapSettings,
    /// Gizmo size per unit of camera distance
    screen_scale: f32,
    scale: f32,
    readout: Option<f32>,
    translate_gizmo: TranslateGizmo,
    rotate_gizmo: RotateGizmo,
}

impl Default for GizmoState {
    fn default() -> Self {
        Self::new()
    }
}

impl GizmoState {
    pub fn new() -> Self {
        Self::from_preferences(&GizmoPreferences::default())
    }

    pub fn from_preferences(prefs: &GizmoPreferences) -> Self {
        Self {
            mode: GizmoMode::Move,
            phase: GizmoPhase::Idle,
            snap: SnapSettings {
                rotate: prefs.rotate_snap_degrees,
                translate: prefs.translate_snap,
            },
            screen_scale: prefs.screen_scale,
            scale: 1.0,
            readout: None,
            translate_gizmo: TranslateGizmo::new(),
            rotate_gizmo: RotateGizmo::new(),
        }
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    /// Switch between move and rotate. Ignored while dragging.
    pub fn set_mode(&mut self, mode: GizmoMode) -> bool {
        if self.is_dragging() {
            return false;
        }
        if self.mode != mode {
            log::debug!("Gizmo mode {:?}", mode);
        }
        self.mode = mode;
        self.phase = GizmoPhase::Idle;
        true
    }

    pub fn phase(&self) -> &GizmoPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GizmoPhase::Dragging(_))
    }

    pub fn hovered_part(&self) -> GizmoPart {
        match self.phase {
            GizmoPhase::Hover(part) => part,
            _ => GizmoPart::None,
        }
    }

    pub fn active_part(&self) -> GizmoPart {
        match self.phase {
            GizmoPhase::Dragging(drag) => drag.part,
            _ => GizmoPart::None,
        }
    }

    /// Display scale in world units
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Swept angle (degrees, snapped) of the current ring drag
    pub fn angle_readout(&self) -> Option<f32> {
        self.readout
    }

    fn current_gizmo(&self) -> &dyn Gizmo {
        match self.mode {
            GizmoMode::Move => &self.translate_gizmo,
            GizmoMode::Rotate => &self.rotate_gizmo,
        }
    }

    /// Keep a constant on-screen size: scale grows with camera distance.
    pub fn update_scale(&mut self, camera_pos: Vec3, target: Vec3) {
        self.scale = camera_pos.distance(target) * self.screen_scale;
    }

    /// Hover test against the gizmo at `center`. While dragging the
    /// active part is returned and the phase is left alone.
    pub fn check_hit(&mut self, center: Vec3, ray: &Ray) -> GizmoPart {
        if let GizmoPhase::Dragging(drag) = self.phase {
            return drag.part;
        }
        let part = self.current_gizmo().hit_test(center, ray, self.scale);
        self.phase = match part {
            GizmoPart::None => GizmoPhase::Idle,
            part => GizmoPhase::Hover(part),
        };
        part
    }

    /// Drop any hover highlight (no target to manipulate)
    pub fn clear_hover(&mut self) {
        if let GizmoPhase::Hover(_) = self.phase {
            self.phase = GizmoPhase::Idle;
        }
    }

    /// Start dragging the hovered part. Returns false when nothing is
    /// hovered or the ray gives no reference.
    pub fn begin_drag(&mut self, transform: &Transform, center: Vec3, ray: &Ray) -> bool {
        let GizmoPhase::Hover(part) = self.phase else {
            return false;
        };
        match self.current_gizmo().begin_drag(part, transform, center, ray) {
            Some(drag) => {
                log::debug!("Gizmo drag started on {:?}", part);
                self.phase = GizmoPhase::Dragging(drag);
                self.readout = part.is_ring().then_some(0.0);
                true
            }
            None => false,
        }
    }

    /// Apply the drag for the current ray to `transform`.
    ///
    /// Only the dragged component changes, always relative to the values
    /// captured at drag start. Degenerate rays leave `transform` as is.
    pub fn update_drag(&mut self, transform: &mut Transform, ray: &Ray) -> Option<TransformDelta> {
        let GizmoPhase::Dragging(drag) = self.phase else {
            return None;
        };
        let snap = match self.mode {
            GizmoMode::Move => self.snap.translate,
            GizmoMode::Rotate => Some(self.snap.rotate),
        };
        let delta = self.current_gizmo().update_drag(&drag, ray, snap)?;

        let updated = delta.apply(&drag.origin);
        match drag.part {
            GizmoPart::Axis(axis) => transform.position[axis.index()] = updated.position[axis.index()],
            GizmoPart::Ring(axis) => {
                transform.rotation[axis.index()] = updated.rotation[axis.index()];
                self.readout = Some(-delta.rotation[axis.index()]);
            }
            GizmoPart::None => {}
        }
        Some(delta)
    }

    /// Finish the drag and return to Idle
    pub fn end_drag(&mut self) -> Option<DragState> {
        let GizmoPhase::Dragging(drag) = self.phase else {
            return None;
        };
        log::debug!("Gizmo drag ended on {:?}", drag.part);
        self.phase = GizmoPhase::Idle;
        self.readout = None;
        Some(drag)
    }

    /// Handle colors in X, Y, Z order, highlighting the hovered or
    /// dragged part
    pub fn handle_colors(&self) -> [[f32; 4]; 3] {
        let lit = match self.phase {
            GizmoPhase::Hover(part) => part.axis(),
            GizmoPhase::Dragging(drag) => drag.part.axis(),
            GizmoPhase::Idle => None,
        };
        Axis::ALL.map(|axis| {
            if lit == Some(axis) {
                colors::HIGHLIGHT
            } else {
                colors::axis(axis)
            }
        })
    }

    /// World matrices for the three handles. Handle meshes point along +X
    /// (arrows) or circle the X axis (rings).
    pub fn handle_matrices(&self, center: Vec3) -> [Mat4; 3] {
        let base = Mat4::from_translation(center) * Mat4::from_scale(Vec3::splat(self.scale));
        [
            base,
            base * Mat4::from_rotation_z(radians(90.0)),
            base * Mat4::from_rotation_y(radians(-90.0)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
    }

    #[test]
    fn test_scale_follows_camera_distance() {
        let mut gizmo = GizmoState::new();
        gizmo.update_scale(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
        assert!((gizmo.scale() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_hover_then_idle() {
        let mut gizmo = GizmoState::new();
        assert_eq!(gizmo.check_hit(Vec3::ZERO, &down_at(0.8, 0.0)), GizmoPart::Axis(Axis::X));
        assert_eq!(gizmo.phase(), &GizmoPhase::Hover(GizmoPart::Axis(Axis::X)));
        assert_eq!(gizmo.handle_colors()[0], colors::HIGHLIGHT);
        assert_eq!(gizmo.handle_colors()[1], colors::Y_AXIS);

        assert_eq!(gizmo.check_hit(Vec3::ZERO, &down_at(5.0, 5.0)), GizmoPart::None);
        assert_eq!(gizmo.phase(), &GizmoPhase::Idle);
        assert_eq!(gizmo.handle_colors()[0], colors::X_AXIS);
    }

    #[test]
    fn test_begin_drag_requires_hover() {
        let mut gizmo = GizmoState::new();
        assert!(!gizmo.begin_drag(&Transform::IDENTITY, Vec3::ZERO, &down_at(0.8, 0.0)));
        gizmo.check_hit(Vec3::ZERO, &down_at(0.8, 0.0));
        assert!(gizmo.begin_drag(&Transform::IDENTITY, Vec3::ZERO, &down_at(0.8, 0.0)));
        assert!(gizmo.is_dragging());
        assert_eq!(gizmo.active_part(), GizmoPart::Axis(Axis::X));
    }

    #[test]
    fn test_drag_updates_only_dragged_axis() {
        let mut gizmo = GizmoState::new();
        let mut transform = Transform::from_position(Vec3::new(0.0, 1.0, 2.0));
        let center = transform.position;
        let start = Ray::new(Vec3::new(0.5, 11.0, 2.0), Vec3::NEG_Y);
        gizmo.check_hit(center, &start);
        assert!(gizmo.begin_drag(&transform, center, &start));

        let ray = Ray::new(Vec3::new(3.0, 11.0, 9.0), Vec3::NEG_Y);
        gizmo.update_drag(&mut transform, &ray).unwrap();
        assert!((transform.position.x - 2.5).abs() < 1e-4);
        assert_eq!(transform.position.y, 1.0);
        assert_eq!(transform.position.z, 2.0);
        assert_eq!(transform.rotation, Vec3::ZERO);

        // Hover is frozen while dragging
        assert_eq!(gizmo.check_hit(center, &down_at(50.0, 50.0)), GizmoPart::Axis(Axis::X));
        assert!(gizmo.end_drag().is_some());
        assert_eq!(gizmo.phase(), &GizmoPhase::Idle);
        assert!(gizmo.end_drag().is_none());
    }

    #[test]
    fn test_rotate_drag_readout() {
        let mut gizmo = GizmoState::new();
        assert!(gizmo.set_mode(GizmoMode::Rotate));
        let mut transform = Transform::IDENTITY;
        let start = down_at(0.0, 1.5);
        assert_eq!(gizmo.check_hit(Vec3::ZERO, &start), GizmoPart::Ring(Axis::Y));
        assert!(gizmo.begin_drag(&transform, Vec3::ZERO, &start));
        assert_eq!(gizmo.angle_readout(), Some(0.0));

        let a = 50.0f32.to_radians();
        gizmo.update_drag(&mut transform, &down_at(1.5 * a.sin(), 1.5 * a.cos()));
        assert!((transform.rotation.y + 45.0).abs() < 1e-3);
        assert!((gizmo.angle_readout().unwrap() - 45.0).abs() < 1e-3);

        gizmo.end_drag();
        assert_eq!(gizmo.angle_readout(), None);
    }

    #[test]
    fn test_mode_locked_while_dragging() {
        let mut gizmo = GizmoState::new();
        gizmo.check_hit(Vec3::ZERO, &down_at(0.8, 0.0));
        gizmo.begin_drag(&Transform::IDENTITY, Vec3::ZERO, &down_at(0.8, 0.0));
        assert!(!gizmo.set_mode(GizmoMode::Rotate));
        assert_eq!(gizmo.mode(), GizmoMode::Move);
    }

    #[test]
    fn test_translate_snap_from_preferences() {
        let prefs = GizmoPreferences {
            translate_snap: Some(1.0),
            ..GizmoPreferences::default()
        };
        let mut gizmo = GizmoState::from_preferences(&prefs);
        let mut transform = Transform::IDENTITY;
        gizmo.check_hit(Vec3::ZERO, &down_at(0.5, 0.0));
        gizmo.begin_drag(&transform, Vec3::ZERO, &down_at(0.5, 0.0));
        gizmo.update_drag(&mut transform, &down_at(1.8, 0.0));
        assert_eq!(transform.position.x, 1.0);
    }

    #[test]
    fn test_handle_matrices_orient_handles() {
        let mut gizmo = GizmoState::new();
        gizmo.update_scale(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let [x, y, z] = gizmo.handle_matrices(Vec3::new(1.0, 0.0, 0.0));
        let tip = |m: Mat4| m.transform_point(Vec3::X);
        assert!((tip(x) - Vec3::new(2.5, 0.0, 0.0)).length() < 1e-4);
        assert!((tip(y) - Vec3::new(1.0, 1.5, 0.0)).length() < 1e-4);
        assert!((tip(z) - Vec3::new(1.0, 0.0, 1.5)).length() < 1e-4);
    }
}
