use std::fmt;

use crate::gfx::{
    camera::CameraLens, geometry::MeshShape, material::Material, picking::BoundingVolume,
};

use super::transform::Transform;

/// Identifier of an entity within one scene
///
/// Ids are handed out in creation order and never reused, so comparing two
/// ids tells which entity was created first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u64);

impl EntityId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
    Hemispheric,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub intensity: f32,
    pub color: [f32; 3],
}

impl Light {
    pub fn point(intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            intensity,
            color: [1.0, 1.0, 1.0],
        }
    }

    pub fn directional(intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            ..Self::point(intensity)
        }
    }

    pub fn hemispheric(intensity: f32) -> Self {
        Self {
            kind: LightKind::Hemispheric,
            ..Self::point(intensity)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub shape: MeshShape,
    pub material: Material,
}

/// What an entity is; a closed set dispatched with `match`
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Mesh(Mesh),
    Light(Light),
    Camera(CameraLens),
}

impl EntityKind {
    /// Unit cube with the default material
    pub fn mesh() -> Self {
        Self::mesh_with(MeshShape::default(), Material::default())
    }

    pub fn mesh_with(shape: MeshShape, material: Material) -> Self {
        Self::Mesh(Mesh { shape, material })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mesh(_) => "mesh",
            Self::Light(_) => "light",
            Self::Camera(_) => "camera",
        }
    }

    /// Meshes take their shape's bounds; lights and cameras get a small
    /// sphere so proximity rules can still reference them.
    fn default_bounding_volume(&self) -> BoundingVolume {
        match self {
            Self::Mesh(mesh) => mesh.shape.bounding_volume(),
            Self::Light(_) | Self::Camera(_) => BoundingVolume::sphere(0.1),
        }
    }
}

/// A named node in the scene graph
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    name: String,
    parent: Option<EntityId>,
    pub kind: EntityKind,
    pub transform: Transform,
    /// Local-space volume used for picking and proximity tests
    pub bounding_volume: BoundingVolume,
    pub pickable: bool,
    /// Whether a successful pick starts a drag session
    pub draggable: bool,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: String, kind: EntityKind, transform: Transform) -> Self {
        let is_mesh = matches!(kind, EntityKind::Mesh(_));
        Self {
            id,
            name,
            parent: None,
            bounding_volume: kind.default_bounding_volume(),
            kind,
            transform,
            pickable: is_mesh,
            draggable: is_mesh,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_parent_id(&mut self, parent: Option<EntityId>) {
        self.parent = parent;
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            EntityKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            EntityKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            EntityKind::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_light_mut(&mut self) -> Option<&mut Light> {
        match &mut self.kind {
            EntityKind::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_camera(&self) -> Option<&CameraLens> {
        match &self.kind {
            EntityKind::Camera(lens) => Some(lens),
            _ => None,
        }
    }
}
