//! Scene picking.
//!
//! One pass over the scene in insertion order. Terrains are ray-marched,
//! everything else is treated as a box of its own scale around its world
//! position. The nearest hit wins; on equal distances the entity visited
//! first is kept.

use vista_math::{Ray, Vec3};

use crate::core::{EntityId, Scene, SceneEntity};
use crate::viewport::hit_box;

/// Nearest entity under a ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickResult {
    pub entity: EntityId,
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
}

/// Nearest visible, unlocked entity hit by `ray`
pub fn pick(ray: &Ray, scene: &Scene) -> Option<PickResult> {
    let result = nearest(ray, scene, |_| true);
    match &result {
        Some(hit) => log::debug!("Picked {} at distance {:.3}", hit.entity, hit.distance),
        None => log::trace!("Pick missed"),
    }
    result
}

/// Like `pick`, but only considers terrains
pub fn pick_terrain(ray: &Ray, scene: &Scene) -> Option<PickResult> {
    nearest(ray, scene, SceneEntity::is_terrain)
}

fn nearest(ray: &Ray, scene: &Scene, filter: impl Fn(&SceneEntity) -> bool) -> Option<PickResult> {
    if !ray.is_valid() {
        return None;
    }

    let mut best: Option<PickResult> = None;
    for entity in scene.iter().filter(|e| e.is_interactive() && filter(*e)) {
        let Some(hit) = hit_entity(ray, scene, entity) else {
            continue;
        };
        if best.map_or(true, |b| hit.distance < b.distance) {
            best = Some(hit);
        }
    }
    best
}

fn hit_entity(ray: &Ray, scene: &Scene, entity: &SceneEntity) -> Option<PickResult> {
    let (distance, point) = match entity.terrain() {
        Some(terrain) => {
            let point = terrain.raycast_ray(ray)?;
            (point.distance(ray.origin), point)
        }
        None => {
            let center = scene.world_matrix(entity.id)?.translation();
            let distance = hit_box(ray, center, entity.transform.scale)?;
            (distance, ray.at(distance))
        }
    };
    Some(PickResult {
        entity: entity.id,
        distance,
        point,
    })
}
