//! Ray-heightfield intersection by fixed-step marching

use vista_math::{ray_aabb, Ray, Vec3};

use crate::terrain::Terrain;

impl Terrain {
    /// First point where a world-space ray dips below the heightfield.
    ///
    /// The ray is moved into terrain-local space, clipped to the terrain
    /// bounds and marched from the entry point in steps of
    /// `cell_size · march_step_factor`. Each step compares against the
    /// nearest stored vertex height, so hits are accurate to about one
    /// step.
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<Vec3> {
        let local = Ray::new(origin, direction).transform(&self.inverse_model);
        if !local.is_valid() || !local.origin.is_finite() {
            return None;
        }

        let step = self.config.march_step();
        let bounds = self.local_bounds().expand(step);
        let entry = if bounds.contains_point(local.origin) {
            0.0
        } else {
            ray_aabb(&local, &bounds)?
        };

        let max_t = entry + self.config.march_distance();
        let cutoff = self.config.below_ground_cutoff;
        let mut t = entry;
        while t <= max_t {
            let p = local.at(t);
            if p.y < cutoff {
                return None;
            }
            if let Some(h) = self.nearest_local_height(p.x, p.z) {
                if p.y <= h {
                    return Some(self.model.transform_point(p));
                }
            }
            t += step;
        }
        None
    }

    /// `raycast` taking a `Ray`
    pub fn raycast_ray(&self, ray: &Ray) -> Option<Vec3> {
        self.raycast(ray.origin, ray.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerrainConfig;
    use vista_math::Transform;

    #[test]
    fn test_straight_down_hits_flat_terrain() {
        let terrain = Terrain::flat(8, 1.0, 2.0).unwrap();
        let hit = terrain.raycast(Vec3::new(0.5, 10.0, 0.5), Vec3::NEG_Y).unwrap();
        assert!((hit.y - 2.0).abs() <= terrain.config().march_step());
        assert!((hit.x - 0.5).abs() < 1e-5 && (hit.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_hit_height_matches_height_query() {
        let mut terrain = Terrain::flat(16, 1.0, 0.0).unwrap();
        terrain.sculpt(1.0, -2.0, 5.0, 10.0, false);
        let dir = Vec3::new(0.3, -1.0, 0.2);
        let hit = terrain.raycast(Vec3::new(-2.0, 20.0, -5.0), dir).unwrap();
        let ground = terrain.height_at(hit.x, hit.z);
        let tolerance = terrain.config().march_step() * dir.normalize().y.abs() + 0.5;
        assert!((hit.y - ground).abs() <= tolerance);
    }

    #[test]
    fn test_distant_camera_still_hits() {
        let terrain = Terrain::flat(8, 1.0, 0.0).unwrap();
        // Far further away than the march length
        let origin = Vec3::new(0.0, 200.0, 200.0);
        let hit = terrain.raycast(origin, Vec3::ZERO - origin).unwrap();
        assert!(hit.length() < 0.5);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let terrain = Terrain::flat(8, 1.0, 0.0).unwrap();
        assert!(terrain.raycast(Vec3::new(0.0, 5.0, 0.0), Vec3::Y).is_none());
        assert!(terrain.raycast(Vec3::new(50.0, 5.0, 0.0), Vec3::NEG_Y).is_none());
    }

    #[test]
    fn test_degenerate_direction_misses() {
        let terrain = Terrain::flat(8, 1.0, 0.0).unwrap();
        assert!(terrain.raycast(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO).is_none());
    }

    #[test]
    fn test_origin_below_surface_hits_immediately() {
        let terrain = Terrain::flat(8, 1.0, 3.0).unwrap();
        let origin = Vec3::new(1.0, 2.9, 1.0);
        let hit = terrain.raycast(origin, Vec3::X).unwrap();
        assert!((hit - origin).length() < 1e-5);
    }

    #[test]
    fn test_raycast_respects_model_transform() {
        let config = TerrainConfig::default().with_grid(8, 1.0);
        let terrain = Terrain::new(config)
            .unwrap()
            .with_transform(&Transform::from_position(Vec3::new(100.0, 4.0, -50.0)));
        let hit = terrain.raycast(Vec3::new(101.0, 30.0, -49.0), Vec3::NEG_Y).unwrap();
        assert!((hit.y - 4.0).abs() <= 0.25);
        assert!(terrain.raycast(Vec3::new(1.0, 30.0, 1.0), Vec3::NEG_Y).is_none());
    }
}
