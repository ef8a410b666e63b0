//! Scene entities and their parent hierarchy.
//!
//! Entities keep insertion order, which is also the order the picker
//! visits them in. Terrain entities carry their own heightfield; its model
//! matrix is kept in sync with the entity's world matrix.

use vista_math::{Mat4, Transform};
use vista_terrain::Terrain;

use super::{EntityId, SceneError, SceneResult};

/// Mesh type for editor primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshType {
    Cube,
    Sphere,
    Cylinder,
    Plane,
}

impl MeshType {
    pub fn name(&self) -> &'static str {
        match self {
            MeshType::Cube => "Cube",
            MeshType::Sphere => "Sphere",
            MeshType::Cylinder => "Cylinder",
            MeshType::Plane => "Plane",
        }
    }
}

/// What an entity is, as far as picking cares
#[derive(Clone, Debug)]
pub enum EntityKind {
    Mesh(MeshType),
    Terrain(Box<Terrain>),
}

/// A scene entity with all its properties.
#[derive(Clone, Debug)]
pub struct SceneEntity {
    pub id: EntityId,
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    pub kind: EntityKind,
    pub parent: Option<EntityId>,
    pub visible: bool,
    /// Locked entities cannot be picked or edited
    pub locked: bool,
}

impl SceneEntity {
    pub fn terrain(&self) -> Option<&Terrain> {
        match &self.kind {
            EntityKind::Terrain(terrain) => Some(&**terrain),
            EntityKind::Mesh(_) => None,
        }
    }

    pub fn is_terrain(&self) -> bool {
        matches!(self.kind, EntityKind::Terrain(_))
    }

    /// Whether picking and gizmos may touch this entity
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.locked
    }
}

/// Flat list of entities with parent links
#[derive(Clone, Debug, Default)]
pub struct Scene {
    entities: Vec<SceneEntity>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root entity and return its id
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform, kind: EntityKind) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        let name = name.into();
        log::debug!("Spawned {} '{}'", id, name);
        self.entities.push(SceneEntity {
            id,
            name,
            transform,
            kind,
            parent: None,
            visible: true,
            locked: false,
        });
        self.sync_terrain(id);
        id
    }

    pub fn spawn_mesh(&mut self, name: impl Into<String>, mesh: MeshType, transform: Transform) -> EntityId {
        self.spawn(name, transform, EntityKind::Mesh(mesh))
    }

    pub fn spawn_terrain(&mut self, name: impl Into<String>, terrain: Terrain, transform: Transform) -> EntityId {
        self.spawn(name, transform, EntityKind::Terrain(Box::new(terrain)))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|e| e.id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Mutable access. Call `sync_terrains` after changing a transform
    /// directly, or use `set_transform`.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Remove an entity. Its children move up to its parent.
    pub fn remove(&mut self, id: EntityId) -> Option<SceneEntity> {
        let index = self.index_of(id)?;
        let removed = self.entities.remove(index);
        for entity in &mut self.entities {
            if entity.parent == Some(id) {
                entity.parent = removed.parent;
            }
        }
        self.sync_terrains();
        log::debug!("Removed {} '{}'", id, removed.name);
        Some(removed)
    }

    /// Replace an entity's local transform and refresh dependent terrains
    pub fn set_transform(&mut self, id: EntityId, transform: Transform) -> SceneResult<()> {
        let entity = self.get_mut(id).ok_or(SceneError::EntityNotFound(id))?;
        entity.transform = transform;
        for affected in self.subtree(id) {
            self.sync_terrain(affected);
        }
        Ok(())
    }

    /// Attach `child` under `parent`, or detach it with `None`.
    ///
    /// Fails with `CycleDetected` when `parent` is `child` or one of its
    /// descendants; the hierarchy is left untouched in that case.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> SceneResult<()> {
        if !self.contains(child) {
            return Err(SceneError::EntityNotFound(child));
        }
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(SceneError::EntityNotFound(parent));
            }
            if self.is_ancestor_or_self(child, parent) {
                log::warn!("Rejected reparent of {} under {}: cycle", child, parent);
                return Err(SceneError::CycleDetected { child, parent });
            }
        }

        if let Some(entity) = self.get_mut(child) {
            entity.parent = parent;
        }
        for affected in self.subtree(child) {
            self.sync_terrain(affected);
        }
        log::info!("Reparented {} under {:?}", child, parent);
        Ok(())
    }

    /// Whether `ancestor` is `id` or appears on its parent chain
    fn is_ancestor_or_self(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut current = Some(id);
        let mut steps = 0;
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.entities.len() {
                break;
            }
            current = self.get(cur).and_then(|e| e.parent);
        }
        false
    }

    /// Direct children in insertion order
    pub fn children(&self, id: EntityId) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.parent == Some(id))
            .map(|e| e.id)
            .collect()
    }

    /// `id` followed by all of its descendants
    pub fn subtree(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = vec![id];
        let mut cursor = 0;
        while cursor < out.len() {
            for child in self.children(out[cursor]) {
                if !out.contains(&child) {
                    out.push(child);
                }
            }
            cursor += 1;
        }
        out
    }

    /// World matrix from the parent chain, root first
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            // Hand-edited parent links may loop
            if chain.len() > self.entities.len() {
                break;
            }
            let entity = self.get(cur)?;
            chain.push(entity.transform.to_matrix());
            current = entity.parent;
        }
        Some(chain.iter().rev().fold(Mat4::IDENTITY, |acc, local| acc * *local))
    }

    /// World matrices of every entity as 16 column-major floats
    pub fn model_matrices(&self) -> Vec<(EntityId, [f32; 16])> {
        self.entities
            .iter()
            .filter_map(|e| self.world_matrix(e.id).map(|m| (e.id, m.to_cols_array())))
            .collect()
    }

    pub fn terrain(&self, id: EntityId) -> SceneResult<&Terrain> {
        self.get(id)
            .ok_or(SceneError::EntityNotFound(id))?
            .terrain()
            .ok_or(SceneError::NotATerrain(id))
    }

    pub fn terrain_mut(&mut self, id: EntityId) -> SceneResult<&mut Terrain> {
        match self.get_mut(id).map(|e| &mut e.kind) {
            Some(EntityKind::Terrain(terrain)) => Ok(&mut **terrain),
            Some(EntityKind::Mesh(_)) => Err(SceneError::NotATerrain(id)),
            None => Err(SceneError::EntityNotFound(id)),
        }
    }

    /// Terrain entity ids in insertion order
    pub fn terrain_ids(&self) -> Vec<EntityId> {
        self.entities.iter().filter(|e| e.is_terrain()).map(|e| e.id).collect()
    }

    /// Push every terrain's world matrix into its heightfield
    pub fn sync_terrains(&mut self) {
        for id in self.terrain_ids() {
            self.sync_terrain(id);
        }
    }

    fn sync_terrain(&mut self, id: EntityId) {
        let Some(world) = self.world_matrix(id) else {
            return;
        };
        if let Ok(terrain) = self.terrain_mut(id) {
            terrain.set_model_matrix(world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_math::Vec3;

    fn cube_at(scene: &mut Scene, name: &str, x: f32) -> EntityId {
        scene.spawn_mesh(name, MeshType::Cube, Transform::from_position(Vec3::new(x, 0.0, 0.0)))
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut scene = Scene::new();
        let a = cube_at(&mut scene, "a", 0.0);
        let b = cube_at(&mut scene, "b", 1.0);
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(b).map(|e| e.name.as_str()), Some("b"));
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let root = cube_at(&mut scene, "root", 10.0);
        let child = cube_at(&mut scene, "child", 5.0);
        let grandchild = cube_at(&mut scene, "grandchild", 1.0);
        scene.set_parent(child, Some(root)).unwrap();
        scene.set_parent(grandchild, Some(child)).unwrap();

        let world = scene.world_matrix(grandchild).unwrap();
        assert!((world.translation() - Vec3::new(16.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut scene = Scene::new();
        let a = cube_at(&mut scene, "a", 0.0);
        let b = cube_at(&mut scene, "b", 0.0);
        let c = cube_at(&mut scene, "c", 0.0);
        scene.set_parent(b, Some(a)).unwrap();
        scene.set_parent(c, Some(b)).unwrap();

        assert_eq!(
            scene.set_parent(a, Some(c)),
            Err(SceneError::CycleDetected { child: a, parent: c })
        );
        assert_eq!(
            scene.set_parent(a, Some(a)),
            Err(SceneError::CycleDetected { child: a, parent: a })
        );
        assert_eq!(scene.get(a).unwrap().parent, None);
    }

    #[test]
    fn test_set_parent_unknown_entity() {
        let mut scene = Scene::new();
        let a = cube_at(&mut scene, "a", 0.0);
        assert_eq!(
            scene.set_parent(a, Some(EntityId(99))),
            Err(SceneError::EntityNotFound(EntityId(99)))
        );
    }

    #[test]
    fn test_remove_reroots_children() {
        let mut scene = Scene::new();
        let a = cube_at(&mut scene, "a", 0.0);
        let b = cube_at(&mut scene, "b", 0.0);
        let c = cube_at(&mut scene, "c", 0.0);
        scene.set_parent(b, Some(a)).unwrap();
        scene.set_parent(c, Some(b)).unwrap();

        scene.remove(b).unwrap();
        assert_eq!(scene.get(c).unwrap().parent, Some(a));
        assert!(scene.remove(b).is_none());
    }

    #[test]
    fn test_terrain_follows_parent_transform() {
        let mut scene = Scene::new();
        let anchor = cube_at(&mut scene, "anchor", 0.0);
        let terrain = Terrain::flat(4, 1.0, 0.0).unwrap();
        let ground = scene.spawn_terrain("ground", terrain, Transform::IDENTITY);
        scene.set_parent(ground, Some(anchor)).unwrap();

        scene
            .set_transform(anchor, Transform::from_position(Vec3::new(0.0, 3.0, 0.0)))
            .unwrap();
        let height = scene.terrain(ground).unwrap().height_at(0.0, 0.0);
        assert!((height - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_terrain_mut_on_mesh_fails() {
        let mut scene = Scene::new();
        let a = cube_at(&mut scene, "a", 0.0);
        assert!(matches!(scene.terrain_mut(a), Err(SceneError::NotATerrain(_))));
        assert!(matches!(scene.terrain_mut(EntityId(42)), Err(SceneError::EntityNotFound(_))));
    }

    #[test]
    fn test_model_matrices_cover_all_entities() {
        let mut scene = Scene::new();
        cube_at(&mut scene, "a", 1.0);
        cube_at(&mut scene, "b", 2.0);
        let matrices = scene.model_matrices();
        assert_eq!(matrices.len(), 2);
        assert_eq!(matrices[1].1[12], 2.0);
    }
}
