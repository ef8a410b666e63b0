//! Vista Editor headless replay
//!
//! Runs a recorded input trace through the manipulation core and prints the
//! resulting scene state as JSON.
//!
//! ```text
//! vista_editor [--prefs <preferences.toml>] <trace.json>
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vista_editor::core::PreferencesError;
use vista_editor::{
    CameraState, EditorContext, EditorPreferences, EntityId, InputSnapshot, MeshType, Scene, Terrain,
    Transform, Vec3,
};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
enum ReplayError {
    #[error("{0}")]
    Usage(String),

    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid trace: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preferences: {0}")]
    Preferences(#[from] PreferencesError),

    #[error("terrain: {0}")]
    Terrain(#[from] vista_terrain::TerrainError),
}

// ============================================================================
// Trace format
// ============================================================================

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
struct TraceCamera {
    eye: [f32; 3],
    target: [f32; 3],
    fov_degrees: f32,
    viewport: [f32; 2],
}

impl Default for TraceCamera {
    fn default() -> Self {
        Self {
            eye: [0.0, 20.0, 20.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 60.0,
            viewport: [1280.0, 720.0],
        }
    }
}

impl TraceCamera {
    fn to_camera(self) -> CameraState {
        CameraState::look_at(
            Vec3::from(self.eye),
            Vec3::from(self.target),
            self.fov_degrees,
            self.viewport,
        )
    }
}

#[derive(Debug, Deserialize)]
struct TraceFrame {
    #[serde(flatten)]
    input: InputSnapshot,
    /// Camera for this and all following frames
    #[serde(default)]
    camera: Option<TraceCamera>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Trace {
    camera: TraceCamera,
    frames: Vec<TraceFrame>,
}

// ============================================================================
// Summary
// ============================================================================

#[derive(Debug, Serialize)]
struct EntitySummary {
    id: EntityId,
    name: String,
    kind: &'static str,
    parent: Option<EntityId>,
    position: [f32; 3],
    rotation: [f32; 3],
    scale: [f32; 3],
}

#[derive(Debug, Serialize)]
struct ReplaySummary {
    frames: u64,
    selection: Vec<EntityId>,
    terrain_strokes: usize,
    entities: Vec<EntitySummary>,
}

fn summarize(ctx: &EditorContext, terrain_strokes: usize) -> ReplaySummary {
    let entities = ctx
        .scene
        .iter()
        .map(|entity| EntitySummary {
            id: entity.id,
            name: entity.name.clone(),
            kind: match &entity.kind {
                vista_editor::EntityKind::Mesh(mesh) => mesh.name(),
                vista_editor::EntityKind::Terrain(_) => "Terrain",
            },
            parent: entity.parent,
            position: entity.transform.position.into(),
            rotation: entity.transform.rotation.into(),
            scale: entity.transform.scale.into(),
        })
        .collect();

    ReplaySummary {
        frames: ctx.frame(),
        selection: ctx.selection.selected().to_vec(),
        terrain_strokes,
        entities,
    }
}

// ============================================================================
// Replay
// ============================================================================

struct Args {
    prefs: Option<PathBuf>,
    trace: PathBuf,
}

fn parse_args() -> Result<Args, ReplayError> {
    let usage = || ReplayError::Usage("usage: vista_editor [--prefs <preferences.toml>] <trace.json>".into());
    let mut prefs = None;
    let mut trace = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--prefs" => prefs = Some(PathBuf::from(args.next().ok_or_else(usage)?)),
            "-h" | "--help" => return Err(usage()),
            _ if trace.is_none() => trace = Some(PathBuf::from(arg)),
            _ => return Err(usage()),
        }
    }

    Ok(Args {
        prefs,
        trace: trace.ok_or_else(usage)?,
    })
}

/// Terrain in the middle with a few boxes on it
fn demo_scene(prefs: &EditorPreferences) -> Result<Scene, ReplayError> {
    let mut scene = Scene::new();
    let terrain = Terrain::new(prefs.terrain.clone())?;
    scene.spawn_terrain("Terrain", terrain, Transform::IDENTITY);

    let ground = prefs.terrain.initial_height;
    let boxes = [
        ("Cube", MeshType::Cube, Vec3::new(0.0, ground + 0.5, 0.0)),
        ("Crate", MeshType::Cube, Vec3::new(4.0, ground + 0.5, -3.0)),
        ("Pillar", MeshType::Cylinder, Vec3::new(-5.0, ground + 1.0, 2.0)),
    ];
    for (name, mesh, position) in boxes {
        let mut transform = Transform::from_position(position);
        if mesh == MeshType::Cylinder {
            transform = transform.with_scale(Vec3::new(1.0, 2.0, 1.0));
        }
        scene.spawn_mesh(name, mesh, transform);
    }
    Ok(scene)
}

fn load_preferences(path: Option<&Path>) -> Result<EditorPreferences, ReplayError> {
    match path {
        Some(path) => Ok(EditorPreferences::load(path)?),
        None => Ok(EditorPreferences::load_or_default()),
    }
}

fn run() -> Result<ReplaySummary, ReplayError> {
    let args = parse_args()?;
    let prefs = load_preferences(args.prefs.as_deref())?;
    let trace: Trace = serde_json::from_str(&std::fs::read_to_string(&args.trace)?)?;
    log::info!("Replaying {} frames from {}", trace.frames.len(), args.trace.display());

    let scene = demo_scene(&prefs)?;
    let mut ctx = EditorContext::new(prefs).with_scene(scene);
    let mut camera = trace.camera.to_camera();
    let mut terrain_strokes = 0;

    for frame in &trace.frames {
        if let Some(trace_camera) = frame.camera {
            camera = trace_camera.to_camera();
        }
        let output = ctx.tick(&frame.input, &camera);

        if output.selection_changed {
            log::info!("Frame {}: selection {:?}", output.frame, output.selection);
        }
        if let Some(angle) = output.gizmo_readout {
            log::debug!("Frame {}: rotated {:.0} degrees", output.frame, angle);
        }
        if let Some(edit) = output.terrain_edit {
            if edit.modified > 0 {
                terrain_strokes += 1;
            }
        }
        for (id, _) in &output.changed_models {
            log::debug!("Frame {}: {} moved", output.frame, id);
        }
    }

    Ok(summarize(&ctx, terrain_strokes))
}

fn main() {
    env_logger::init();

    match run().and_then(|summary| Ok(serde_json::to_string_pretty(&summary)?)) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("{} {}: {}", vista_editor::NAME, vista_editor::VERSION, err);
            std::process::exit(1);
        }
    }
}
