//! Terrain storage, height queries and render buffers

use vista_math::{Mat4, Transform, Vec3, AABB};

use crate::config::TerrainConfig;
use crate::error::{Result, TerrainError};
use crate::layers::{LayerBinding, TerrainLayers};

/// Height reported for queries outside the grid. Callers treat it as
/// "no ground".
pub const NO_GROUND_HEIGHT: f32 = -100.0;

/// Number of splat channels per vertex
pub const SPLAT_CHANNELS: usize = 3;

/// Which renderer buffers changed since the last `take_dirty`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainDirty {
    /// Position/normal buffers need re-upload
    pub heights: bool,
    /// Splat weight buffer needs re-upload
    pub splat: bool,
}

impl TerrainDirty {
    pub fn any(&self) -> bool {
        self.heights || self.splat
    }
}

/// Inclusive range of grid vertices touched by an edit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GridRect {
    pub min_x: usize,
    pub max_x: usize,
    pub min_z: usize,
    pub max_z: usize,
}

/// Heightmap + splatmap terrain over an `(N+1)×(N+1)` vertex grid.
///
/// Vertex `(i, j)` sits at local position
/// `((i - N/2)·cell, height, (j - N/2)·cell)`; the model matrix places the
/// whole grid in the world.
#[derive(Debug, Clone)]
pub struct Terrain {
    pub(crate) config: TerrainConfig,
    pub(crate) heights: Vec<f32>,
    pub(crate) splat: Vec<f32>,
    pub(crate) model: Mat4,
    pub(crate) inverse_model: Mat4,
    pub(crate) layers: TerrainLayers,
    pub(crate) positions: Vec<[f32; 3]>,
    pub(crate) normals: Vec<[f32; 3]>,
    pub(crate) height_range: (f32, f32),
    pub(crate) dirty: TerrainDirty,
}

impl Terrain {
    /// Create a flat terrain from a configuration
    pub fn new(config: TerrainConfig) -> Result<Self> {
        config.validate()?;
        let count = config.vertex_count();
        let heights = vec![config.initial_height; count];
        Self::assemble(config, heights, None)
    }

    /// Shorthand for a flat grid at `height`
    pub fn flat(grid_size: usize, cell_size: f32, height: f32) -> Result<Self> {
        Self::new(
            TerrainConfig::default()
                .with_grid(grid_size, cell_size)
                .with_initial_height(height),
        )
    }

    /// Create from an existing heightmap (row-major, `x + z*(N+1)`)
    pub fn from_heights(config: TerrainConfig, heights: Vec<f32>) -> Result<Self> {
        config.validate()?;
        let expected = config.vertex_count();
        if heights.len() != expected {
            return Err(TerrainError::BufferSizeMismatch { expected, found: heights.len() });
        }
        Self::assemble(config, heights, None)
    }

    pub(crate) fn assemble(
        config: TerrainConfig,
        heights: Vec<f32>,
        splat: Option<Vec<f32>>,
    ) -> Result<Self> {
        let count = config.vertex_count();
        let splat = match splat {
            Some(splat) => {
                if splat.len() != count * SPLAT_CHANNELS {
                    return Err(TerrainError::BufferSizeMismatch {
                        expected: count * SPLAT_CHANNELS,
                        found: splat.len(),
                    });
                }
                splat.into_iter().map(|w| w.clamp(0.0, 1.0)).collect()
            }
            // Everything starts fully on the base layer
            None => (0..count).flat_map(|_| [1.0, 0.0, 0.0]).collect(),
        };

        let mut terrain = Self {
            config,
            heights,
            splat,
            model: Mat4::IDENTITY,
            inverse_model: Mat4::IDENTITY,
            layers: TerrainLayers::new(),
            positions: vec![[0.0; 3]; count],
            normals: vec![[0.0, 1.0, 0.0]; count],
            height_range: (0.0, 0.0),
            dirty: TerrainDirty { heights: true, splat: true },
        };
        terrain.rebuild_geometry(None);

        log::debug!(
            "Created terrain {}x{} (cell {})",
            terrain.config.grid_size,
            terrain.config.grid_size,
            terrain.config.cell_size
        );
        Ok(terrain)
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    #[inline]
    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    /// Raw heightmap, row-major `x + z*(N+1)`
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Raw splatmap, three weights per vertex
    pub fn splat_weights(&self) -> &[f32] {
        &self.splat
    }

    /// Splat weights of one vertex
    pub fn splat_at(&self, x: usize, z: usize) -> Option<[f32; 3]> {
        let idx = self.index(x, z)? * SPLAT_CHANNELS;
        Some([self.splat[idx], self.splat[idx + 1], self.splat[idx + 2]])
    }

    /// Stored height of one vertex
    pub fn height_sample(&self, x: usize, z: usize) -> Option<f32> {
        self.index(x, z).map(|idx| self.heights[idx])
    }

    /// Overwrite one vertex height
    pub fn set_height(&mut self, x: usize, z: usize, height: f32) -> bool {
        let Some(idx) = self.index(x, z) else {
            return false;
        };
        let (lo, hi) = self.height_range;
        let previous = std::mem::replace(&mut self.heights[idx], height);
        self.rebuild_geometry(Some(GridRect { min_x: x, max_x: x, min_z: z, max_z: z }));
        if (previous <= lo && height > lo) || (previous >= hi && height < hi) {
            self.rescan_height_range();
        }
        true
    }

    #[inline]
    pub(crate) fn index(&self, x: usize, z: usize) -> Option<usize> {
        let row = self.config.row_len();
        (x < row && z < row).then(|| x + z * row)
    }

    pub fn layers(&self) -> &TerrainLayers {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut TerrainLayers {
        &mut self.layers
    }

    /// Bind a texture to one of the layer slots
    pub fn bind_layer(&mut self, slot: usize, binding: LayerBinding) -> Result<Option<LayerBinding>> {
        log::debug!("Binding terrain layer {} to '{}'", slot, binding.texture);
        self.layers.bind(slot, binding)
    }

    pub fn unbind_layer(&mut self, slot: usize) -> Result<Option<LayerBinding>> {
        self.layers.unbind(slot)
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model
    }

    /// Place the terrain in the world. Singular matrices are ignored.
    pub fn set_model_matrix(&mut self, model: Mat4) {
        match model.try_inverse() {
            Some(inverse) => {
                self.model = model;
                self.inverse_model = inverse;
            }
            None => log::warn!("Ignoring singular terrain model matrix"),
        }
    }

    /// Place the terrain from a transform
    pub fn set_transform(&mut self, transform: &Transform) {
        self.set_model_matrix(transform.to_matrix());
    }

    /// Builder form of `set_transform`
    pub fn with_transform(mut self, transform: &Transform) -> Self {
        self.set_transform(transform);
        self
    }

    // ------------------------------------------------------------------
    // Coordinate conversion
    // ------------------------------------------------------------------

    /// Local XZ to continuous grid coordinates
    #[inline]
    pub fn local_to_grid(&self, x: f32, z: f32) -> (f32, f32) {
        let half = self.config.grid_size as f32 * 0.5;
        (x / self.config.cell_size + half, z / self.config.cell_size + half)
    }

    /// Grid vertex to local XZ
    #[inline]
    pub fn grid_to_local(&self, i: usize, j: usize) -> (f32, f32) {
        let half = self.config.grid_size as f32 * 0.5;
        (
            (i as f32 - half) * self.config.cell_size,
            (j as f32 - half) * self.config.cell_size,
        )
    }

    /// World XZ to continuous grid coordinates
    pub fn world_to_grid(&self, world_x: f32, world_z: f32) -> (f32, f32) {
        let local = self.inverse_model.transform_point(Vec3::new(world_x, 0.0, world_z));
        self.local_to_grid(local.x, local.z)
    }

    /// World position of a grid vertex, including its current height
    pub fn vertex_world_position(&self, i: usize, j: usize) -> Option<Vec3> {
        let h = self.height_sample(i, j)?;
        let (x, z) = self.grid_to_local(i, j);
        Some(self.model.transform_point(Vec3::new(x, h, z)))
    }

    // ------------------------------------------------------------------
    // Height queries
    // ------------------------------------------------------------------

    /// Bilinear height at a world position, `None` outside the grid
    pub fn sample_height(&self, world_x: f32, world_z: f32) -> Option<f32> {
        let local = self.inverse_model.transform_point(Vec3::new(world_x, 0.0, world_z));
        let h = self.local_height(local.x, local.z)?;
        Some(self.model.transform_point(Vec3::new(local.x, h, local.z)).y)
    }

    /// Bilinear height at a world position, `NO_GROUND_HEIGHT` outside
    pub fn height_at(&self, world_x: f32, world_z: f32) -> f32 {
        self.sample_height(world_x, world_z).unwrap_or(NO_GROUND_HEIGHT)
    }

    /// Bilinear interpolation in local space
    pub(crate) fn local_height(&self, x: f32, z: f32) -> Option<f32> {
        let n = self.config.grid_size;
        let (gx, gz) = self.local_to_grid(x, z);
        let extent = n as f32;
        if !(0.0..=extent).contains(&gx) || !(0.0..=extent).contains(&gz) {
            return None;
        }

        let i0 = (gx.floor() as usize).min(n - 1);
        let j0 = (gz.floor() as usize).min(n - 1);
        let fx = gx - i0 as f32;
        let fz = gz - j0 as f32;

        let row = self.config.row_len();
        let h00 = self.heights[i0 + j0 * row];
        let h10 = self.heights[i0 + 1 + j0 * row];
        let h01 = self.heights[i0 + (j0 + 1) * row];
        let h11 = self.heights[i0 + 1 + (j0 + 1) * row];

        // Weighted form keeps corner samples exact
        let h0 = h00 * (1.0 - fx) + h10 * fx;
        let h1 = h01 * (1.0 - fx) + h11 * fx;
        Some(h0 * (1.0 - fz) + h1 * fz)
    }

    /// Height of the nearest vertex in local space (ray-march lookup)
    pub(crate) fn nearest_local_height(&self, x: f32, z: f32) -> Option<f32> {
        let (gx, gz) = self.local_to_grid(x, z);
        let extent = self.config.grid_size as f32;
        if !(0.0..=extent).contains(&gx) || !(0.0..=extent).contains(&gz) {
            return None;
        }
        let row = self.config.row_len();
        let i = (gx.round() as usize).min(row - 1);
        let j = (gz.round() as usize).min(row - 1);
        Some(self.heights[i + j * row])
    }

    /// Lowest and highest stored height
    pub fn min_max_height(&self) -> (f32, f32) {
        self.height_range
    }

    /// Local-space bounds of the heightfield
    pub fn local_bounds(&self) -> AABB {
        let half = self.config.extent() * 0.5;
        let (lo, hi) = self.height_range;
        AABB::new(Vec3::new(-half, lo, -half), Vec3::new(half, hi, half))
    }

    /// World-space bounds of the heightfield
    pub fn world_bounds(&self) -> AABB {
        self.local_bounds().transformed(&self.model)
    }

    // ------------------------------------------------------------------
    // Render buffers
    // ------------------------------------------------------------------

    /// Local vertex positions (Y = height)
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Local vertex normals
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn splat_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.splat)
    }

    /// Report and clear pending buffer changes
    pub fn take_dirty(&mut self) -> TerrainDirty {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.any()
    }

    /// Regenerate positions and normals for `rect` (or the whole grid).
    ///
    /// The cached height range is widened with the heights in `rect`; a
    /// full rebuild rescans it. Callers that move a previous extreme
    /// inward must call `rescan_height_range`.
    pub(crate) fn rebuild_geometry(&mut self, rect: Option<GridRect>) {
        let n = self.config.grid_size;
        let row = self.config.row_len();
        let full = rect.is_none();
        let rect = rect.unwrap_or(GridRect { min_x: 0, max_x: n, min_z: 0, max_z: n });

        for j in rect.min_z..=rect.max_z {
            for i in rect.min_x..=rect.max_x {
                let (x, z) = self.grid_to_local(i, j);
                self.positions[i + j * row] = [x, self.heights[i + j * row], z];
            }
        }

        // Normals depend on neighbours, so grow the region by one
        let min_x = rect.min_x.saturating_sub(1);
        let min_z = rect.min_z.saturating_sub(1);
        let max_x = (rect.max_x + 1).min(n);
        let max_z = (rect.max_z + 1).min(n);
        let cell = self.config.cell_size;
        for j in min_z..=max_z {
            for i in min_x..=max_x {
                let left = self.heights[i.saturating_sub(1) + j * row];
                let right = self.heights[(i + 1).min(n) + j * row];
                let down = self.heights[i + j.saturating_sub(1) * row];
                let up = self.heights[i + (j + 1).min(n) * row];
                let normal = Vec3::new(left - right, 2.0 * cell, down - up).normalize();
                self.normals[i + j * row] = normal.to_array();
            }
        }

        if full {
            self.rescan_height_range();
        } else {
            let (mut lo, mut hi) = self.height_range;
            for j in rect.min_z..=rect.max_z {
                for i in rect.min_x..=rect.max_x {
                    let h = self.heights[i + j * row];
                    lo = lo.min(h);
                    hi = hi.max(h);
                }
            }
            self.height_range = (lo, hi);
        }
        self.dirty.heights = true;
    }

    /// Recompute the height range from every sample
    pub(crate) fn rescan_height_range(&mut self) {
        self.height_range = self
            .heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(grid: usize) -> Terrain {
        let config = TerrainConfig::default().with_grid(grid, 1.0);
        let row = grid + 1;
        let heights = (0..row * row).map(|idx| ((idx % row) + 2 * (idx / row)) as f32).collect();
        Terrain::from_heights(config, heights).unwrap()
    }

    #[test]
    fn test_flat_terrain_buffers() {
        let terrain = Terrain::flat(4, 1.0, 2.0).unwrap();
        assert_eq!(terrain.heights().len(), 25);
        assert_eq!(terrain.splat_weights().len(), 75);
        assert_eq!(terrain.positions()[0], [-2.0, 2.0, -2.0]);
        assert_eq!(terrain.positions()[24], [2.0, 2.0, 2.0]);
        assert_eq!(terrain.normals()[12], [0.0, 1.0, 0.0]);
        assert_eq!(terrain.splat_at(1, 1), Some([1.0, 0.0, 0.0]));
        assert_eq!(terrain.position_bytes().len(), 25 * 12);
    }

    #[test]
    fn test_from_heights_size_checked() {
        let config = TerrainConfig::default().with_grid(4, 1.0);
        assert_eq!(
            Terrain::from_heights(config, vec![0.0; 10]).unwrap_err(),
            TerrainError::BufferSizeMismatch { expected: 25, found: 10 }
        );
    }

    #[test]
    fn test_height_at_corners_exact() {
        let terrain = ramp(4);
        for j in 0..=4 {
            for i in 0..=4 {
                let (x, z) = terrain.grid_to_local(i, j);
                assert_eq!(terrain.height_at(x, z), terrain.height_sample(i, j).unwrap());
            }
        }
    }

    #[test]
    fn test_height_at_interpolates() {
        let terrain = ramp(4);
        // Halfway between (1,1)=3 and (2,1)=4
        let (x, z) = terrain.grid_to_local(1, 1);
        assert_relative_eq!(terrain.height_at(x + 0.5, z), 3.5, epsilon = 1e-6);
        // Cell centre of (1,1)-(2,2): mean of 3, 4, 5, 6
        assert_relative_eq!(terrain.height_at(x + 0.5, z + 0.5), 4.5, epsilon = 1e-6);
    }

    #[test]
    fn test_height_outside_grid_is_sentinel() {
        let terrain = Terrain::flat(4, 1.0, 1.0).unwrap();
        assert_eq!(terrain.height_at(10.0, 0.0), NO_GROUND_HEIGHT);
        assert_eq!(terrain.height_at(0.0, -2.01), NO_GROUND_HEIGHT);
        assert!(terrain.sample_height(2.0, 2.0).is_some());
    }

    #[test]
    fn test_height_follows_model_translation() {
        let terrain = Terrain::flat(4, 1.0, 1.0)
            .unwrap()
            .with_transform(&Transform::from_position(Vec3::new(100.0, 5.0, 0.0)));
        assert_relative_eq!(terrain.height_at(100.0, 0.0), 6.0, epsilon = 1e-5);
        assert_eq!(terrain.height_at(0.0, 0.0), NO_GROUND_HEIGHT);
    }

    #[test]
    fn test_set_height_updates_buffers_and_range() {
        let mut terrain = Terrain::flat(4, 1.0, 0.0).unwrap();
        terrain.take_dirty();
        assert!(terrain.set_height(2, 2, 3.0));
        assert_eq!(terrain.positions()[12][1], 3.0);
        assert_eq!(terrain.min_max_height(), (0.0, 3.0));
        assert!(terrain.take_dirty().heights);
        assert!(!terrain.set_height(9, 0, 1.0));

        // Pulling the only peak back down shrinks the range
        assert!(terrain.set_height(2, 2, 1.0));
        assert_eq!(terrain.min_max_height(), (0.0, 1.0));
        assert!(terrain.set_height(0, 0, -2.0));
        assert_eq!(terrain.min_max_height(), (-2.0, 1.0));
    }

    #[test]
    fn test_bind_layer_slots() {
        let mut terrain = Terrain::flat(2, 1.0, 0.0).unwrap();
        assert_eq!(terrain.bind_layer(0, LayerBinding::new("grass")).unwrap(), None);
        assert!(terrain.bind_layer(8, LayerBinding::new("rock")).is_err());
        assert!(terrain.unbind_layer(0).unwrap().is_some());
    }

    #[test]
    fn test_singular_model_is_ignored() {
        let mut terrain = Terrain::flat(2, 1.0, 0.0).unwrap();
        terrain.set_model_matrix(Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)));
        assert_eq!(*terrain.model_matrix(), Mat4::IDENTITY);
    }
}
