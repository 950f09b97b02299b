use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix, Vector3, Zero};
use log::{debug, trace};

use crate::{
    error::{Result, SceneError},
    gfx::{
        camera::CameraView,
        picking::{transform_point, BoundingVolume},
    },
};

use super::{
    object::{Entity, EntityId, EntityKind},
    transform::Transform,
};

/// Main scene containing the entity registry and the active camera
///
/// Entities are owned by the scene; parent links are ids, so a child never
/// keeps its parent alive. World transforms are derived on demand by walking
/// the parent chain, which keeps them consistent with every local mutation
/// made so far.
#[derive(Debug, Default)]
pub struct Scene {
    entities: HashMap<EntityId, Entity>,
    names: HashMap<String, EntityId>,
    active_camera: Option<EntityId>,
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a root entity and registers its name
    ///
    /// Fails with [`SceneError::DuplicateName`] if the name is taken; the
    /// scene is left untouched in that case.
    pub fn create_entity(
        &mut self,
        name: &str,
        kind: EntityKind,
        transform: Transform,
    ) -> Result<EntityId> {
        if self.names.contains_key(name) {
            return Err(SceneError::DuplicateName(name.to_string()));
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;

        debug!("Created {} '{}' as {}", kind.label(), name, id);
        self.names.insert(name.to_string(), id);
        self.entities
            .insert(id, Entity::new(id, name.to_string(), kind, transform));
        Ok(id)
    }

    /// Looks an entity up by name, `None` if there is no such entity
    pub fn get_entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.names.get(name).and_then(|id| self.entities.get(id))
    }

    pub fn get_entity_by_name_mut(&mut self, name: &str) -> Option<&mut Entity> {
        let id = *self.names.get(name)?;
        self.entities.get_mut(&id)
    }

    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// All entities, in no particular order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entity ids in creation order
    pub fn ids_in_creation_order(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Gives an entity a new unique name
    pub fn rename_entity(&mut self, id: EntityId, new_name: &str) -> Result<()> {
        let old_name = self
            .entities
            .get(&id)
            .map(|entity| entity.name().to_string())
            .ok_or(SceneError::UnknownEntity(id))?;

        if old_name == new_name {
            return Ok(());
        }
        if self.names.contains_key(new_name) {
            return Err(SceneError::DuplicateName(new_name.to_string()));
        }

        self.names.remove(&old_name);
        self.names.insert(new_name.to_string(), id);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_name(new_name.to_string());
        }
        debug!("Renamed {} from '{}' to '{}'", id, old_name, new_name);
        Ok(())
    }

    /// Re-parents `id` under `parent`, or makes it a root with `None`
    ///
    /// The local transform is kept as is, so the entity's world placement
    /// follows its new parent.
    pub fn set_parent(&mut self, id: EntityId, parent: Option<EntityId>) -> Result<()> {
        if !self.contains(id) {
            return Err(SceneError::UnknownEntity(id));
        }

        if let Some(parent_id) = parent {
            if !self.contains(parent_id) {
                return Err(SceneError::UnknownEntity(parent_id));
            }
            if self.is_ancestor_or_self(id, parent_id) {
                return Err(SceneError::CyclicParent {
                    child: id,
                    parent: parent_id,
                });
            }
        }

        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_parent_id(parent);
        }
        trace!("Parent of {} set to {:?}", id, parent);
        Ok(())
    }

    /// True if `ancestor` is `node` itself or sits somewhere above it
    fn is_ancestor_or_self(&self, ancestor: EntityId, node: EntityId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.entities.get(&id).and_then(Entity::parent);
        }
        false
    }

    /// Direct children of `id`
    pub fn children(&self, id: EntityId) -> Vec<EntityId> {
        let mut children: Vec<EntityId> = self
            .entities
            .values()
            .filter(|entity| entity.parent() == Some(id))
            .map(Entity::id)
            .collect();
        children.sort();
        children
    }

    /// Removes an entity; its children become roots
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(SceneError::UnknownEntity(id))?;

        self.names.remove(entity.name());
        for child in self.entities.values_mut() {
            if child.parent() == Some(id) {
                child.set_parent_id(None);
            }
        }
        if self.active_camera == Some(id) {
            self.active_camera = None;
        }

        debug!("Removed {} '{}'", id, entity.name());
        Ok(entity)
    }

    /// World matrix of `id`, composed through every ancestor up to the root
    pub fn world_transform(&self, id: EntityId) -> Option<Matrix4<f32>> {
        let mut entity = self.entities.get(&id)?;
        let mut world = entity.transform.matrix();
        while let Some(parent_id) = entity.parent() {
            entity = self.entities.get(&parent_id)?;
            world = entity.transform.matrix() * world;
        }
        Some(world)
    }

    /// World matrix of the parent, identity for roots
    fn parent_world_transform(&self, id: EntityId) -> Option<Matrix4<f32>> {
        match self.entities.get(&id)?.parent() {
            Some(parent_id) => self.world_transform(parent_id),
            None => Some(Matrix4::identity()),
        }
    }

    /// World-space origin of `id`
    pub fn world_position(&self, id: EntityId) -> Option<Vector3<f32>> {
        self.world_transform(id)
            .map(|world| transform_point(&world, Vector3::zero()))
    }

    /// Moves `id` so its origin lands on `position` in world space
    ///
    /// The point is converted into the parent's space; a parent whose world
    /// matrix cannot be inverted (zero scale) leaves the entity unchanged.
    pub fn set_world_position(&mut self, id: EntityId, position: Vector3<f32>) -> Result<()> {
        let parent_world = self
            .parent_world_transform(id)
            .ok_or(SceneError::UnknownEntity(id))?;

        let Some(to_parent) = parent_world.invert() else {
            debug!("Parent of {} has a degenerate transform, move skipped", id);
            return Ok(());
        };

        let local = transform_point(&to_parent, position);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.transform.position = local;
        }
        Ok(())
    }

    /// Bounding volume of `id` in world space
    pub fn world_bounds(&self, id: EntityId) -> Option<BoundingVolume> {
        let entity = self.entities.get(&id)?;
        let world = self.world_transform(id)?;
        Some(entity.bounding_volume.transform(&world))
    }

    pub fn active_camera(&self) -> Option<EntityId> {
        self.active_camera
    }

    /// Makes `id` the camera used for picking
    pub fn set_active_camera(&mut self, id: EntityId) -> Result<()> {
        let entity = self
            .entities
            .get(&id)
            .ok_or(SceneError::UnknownEntity(id))?;
        if entity.as_camera().is_none() {
            return Err(SceneError::NotACamera(entity.name().to_string()));
        }

        self.active_camera = Some(id);
        debug!("Active camera is now '{}'", entity.name());
        Ok(())
    }

    /// View of the active camera
    ///
    /// `None` before a camera is set up, and while the camera sits on its
    /// own target so no view direction exists.
    pub fn camera_view(&self, aspect: f32) -> Option<CameraView> {
        let id = self.active_camera?;
        let lens = self.entities.get(&id)?.as_camera()?;
        let eye = self.world_position(id)?;
        let view = CameraView::new(eye, lens, aspect);
        if view.is_degenerate() {
            trace!("Camera {} has no view direction", id);
            return None;
        }
        Some(view)
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics::default();
        for entity in self.entities.values() {
            match entity.kind {
                EntityKind::Mesh(_) => stats.mesh_count += 1,
                EntityKind::Light(_) => stats.light_count += 1,
                EntityKind::Camera(_) => stats.camera_count += 1,
            }
            if entity.pickable {
                stats.pickable_count += 1;
            }
        }
        stats
    }
}

/// Scene statistics for debugging
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub mesh_count: usize,
    pub light_count: usize,
    pub camera_count: usize,
    pub pickable_count: usize,
}
