//! Sculpt and paint brushes
//!
//! Both brushes share one footprint: every grid vertex whose grid-space
//! distance `d` to the hit point is below `r`, weighted by
//! `cos(d / r · π/2)`. The weight is 1 at the centre and 0 at the rim.

use std::f32::consts::FRAC_PI_2;

use crate::error::{Result, TerrainError};
use crate::terrain::{GridRect, Terrain, SPLAT_CHANNELS};

/// One vertex touched by a brush
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushSample {
    pub x: usize,
    pub z: usize,
    /// Cosine falloff weight in `(0, 1]`
    pub weight: f32,
}

/// Vertices covered by a brush stamp, in row order
#[derive(Clone, Debug, Default)]
pub struct BrushFootprint {
    samples: Vec<BrushSample>,
}

impl BrushFootprint {
    /// Footprint of a stamp at grid coordinates `(gx, gz)` with grid-space
    /// radius `r`. Vertices outside `0..=grid_size` are skipped.
    pub fn new(gx: f32, gz: f32, r: f32, grid_size: usize) -> Self {
        let mut samples = Vec::new();
        if !(r > 0.0) || !gx.is_finite() || !gz.is_finite() {
            return Self { samples };
        }

        // Clip to the grid before casting; huge values would saturate
        let last = grid_size as f32;
        if gx + r < 0.0 || gz + r < 0.0 || gx - r > last || gz - r > last {
            return Self { samples };
        }
        let x0 = (gx - r).floor().max(0.0) as usize;
        let x1 = (gx + r).ceil().min(last) as usize;
        let z0 = (gz - r).floor().max(0.0) as usize;
        let z1 = (gz + r).ceil().min(last) as usize;

        for z in z0..=z1 {
            for x in x0..=x1 {
                let dx = x as f32 - gx;
                let dz = z as f32 - gz;
                let d = (dx * dx + dz * dz).sqrt();
                if d < r {
                    samples.push(BrushSample {
                        x: x as usize,
                        z: z as usize,
                        weight: (d / r * FRAC_PI_2).cos(),
                    });
                }
            }
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[BrushSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Bounding rectangle of the touched vertices
    pub(crate) fn rect(&self) -> Option<GridRect> {
        let first = self.samples.first()?;
        let init = GridRect { min_x: first.x, max_x: first.x, min_z: first.z, max_z: first.z };
        Some(self.samples.iter().fold(init, |r, s| GridRect {
            min_x: r.min_x.min(s.x),
            max_x: r.max_x.max(s.x),
            min_z: r.min_z.min(s.z),
            max_z: r.max_z.max(s.z),
        }))
    }
}

impl Terrain {
    /// Footprint of a brush centred at a world position. `radius` is in
    /// world units.
    pub fn brush_footprint(&self, world_x: f32, world_z: f32, radius: f32) -> BrushFootprint {
        let (gx, gz) = self.world_to_grid(world_x, world_z);
        BrushFootprint::new(gx, gz, radius / self.config.cell_size, self.config.grid_size)
    }

    /// Raise (or lower) the heightfield around a world position.
    ///
    /// Returns the number of vertices modified.
    pub fn sculpt(
        &mut self,
        world_x: f32,
        world_z: f32,
        radius: f32,
        strength: f32,
        lowering: bool,
    ) -> usize {
        let footprint = self.brush_footprint(world_x, world_z, radius);
        let Some(rect) = footprint.rect() else {
            return 0;
        };

        let sign = if lowering { -1.0 } else { 1.0 };
        let rate = self.config.sculpt_rate;
        let row = self.config.row_len();

        // Raising can only lift the minimum, lowering can only drop the maximum
        let step = sign * strength * rate;
        let (lo, hi) = self.height_range;
        let moved_extreme = footprint.samples().iter().any(|sample| {
            let h = self.heights[sample.x + sample.z * row];
            (step > 0.0 && h <= lo) || (step < 0.0 && h >= hi)
        });
        for sample in footprint.samples() {
            self.heights[sample.x + sample.z * row] += sign * strength * sample.weight * rate;
        }

        self.rebuild_geometry(Some(rect));
        if moved_extreme {
            self.rescan_height_range();
        }
        log::trace!(
            "Sculpted {} vertices at ({:.2}, {:.2}), lowering={}",
            footprint.len(),
            world_x,
            world_z,
            lowering
        );
        footprint.len()
    }

    /// Blend the splat weights around a world position toward `layer`.
    ///
    /// Returns the number of vertices modified.
    pub fn paint(
        &mut self,
        world_x: f32,
        world_z: f32,
        radius: f32,
        strength: f32,
        layer: usize,
    ) -> Result<usize> {
        if layer >= SPLAT_CHANNELS {
            return Err(TerrainError::InvalidLayer(layer));
        }

        let footprint = self.brush_footprint(world_x, world_z, radius);
        if footprint.is_empty() {
            return Ok(0);
        }

        let rate = self.config.paint_rate;
        let row = self.config.row_len();
        for sample in footprint.samples() {
            let influence = (strength * sample.weight * rate).clamp(0.0, 1.0);
            let base = (sample.x + sample.z * row) * SPLAT_CHANNELS;
            for channel in 0..SPLAT_CHANNELS {
                let target = if channel == layer { 1.0 } else { 0.0 };
                let value = &mut self.splat[base + channel];
                *value = (*value + (target - *value) * influence).clamp(0.0, 1.0);
            }
        }

        self.dirty.splat = true;
        log::trace!("Painted layer {} on {} vertices", layer, footprint.len());
        Ok(footprint.len())
    }
}
