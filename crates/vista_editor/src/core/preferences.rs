//! Editor preferences and settings.
//!
//! Persisted as TOML. Missing keys fall back to defaults, so older files
//! keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vista_terrain::TerrainConfig;

use super::PreferencesError;

/// Transform gizmo settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoPreferences {
    /// Gizmo size per unit of camera distance
    pub screen_scale: f32,
    /// Rotation snap increment in degrees
    pub rotate_snap_degrees: f32,
    /// Optional translation snap increment
    pub translate_snap: Option<f32>,
}

impl Default for GizmoPreferences {
    fn default() -> Self {
        Self {
            screen_scale: 0.15,
            rotate_snap_degrees: 15.0,
            translate_snap: None,
        }
    }
}

/// Terrain brush settings shared by the sculpt and paint tools
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushPreferences {
    /// Brush radius in world units
    pub radius: f32,
    pub strength: f32,
    /// Splat channel the paint tool blends toward
    pub paint_layer: usize,
}

impl Default for BrushPreferences {
    fn default() -> Self {
        Self {
            radius: 2.0,
            strength: 1.0,
            paint_layer: 0,
        }
    }
}

/// Editor preferences and settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    pub gizmo: GizmoPreferences,
    pub brush: BrushPreferences,
    /// Configuration for newly created terrains
    pub terrain: TerrainConfig,
}

impl EditorPreferences {
    /// Load preferences from a file.
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        let content = std::fs::read_to_string(path)?;
        let prefs = Self::from_toml_str(&content)?;
        log::info!("Loaded preferences from {:?}", path);
        Ok(prefs)
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|err| {
            log::warn!("Ignoring preferences at {:?}: {}", path, err);
            Self::default()
        })
    }

    /// Save preferences to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        log::info!("Saved preferences to {:?}", path);
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, PreferencesError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, PreferencesError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default preferences path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("vista_editor");
            p.push("preferences.toml");
            p
        })
    }
}
