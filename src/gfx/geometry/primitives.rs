//! # Primitive Shapes
//!
//! Shape descriptions for mesh entities and the bounding volumes derived from
//! them. Vertex generation belongs to the render engine; the scene only needs
//! the extents.

use cgmath::Vector3;

use crate::gfx::picking::{BoundingVolume, AABB};

/// Shape of a mesh entity, centered on its local origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// Box with full edge lengths
    Box { width: f32, height: f32, depth: f32 },
    /// UV sphere
    Sphere { diameter: f32 },
    /// Cylinder standing on the Y axis
    Cylinder { height: f32, diameter: f32 },
    /// Flat plane in XZ, zero thickness
    Ground { width: f32, depth: f32 },
    /// Imported geometry, described by its local bounds
    Custom(AABB),
}

impl Default for MeshShape {
    fn default() -> Self {
        Self::cube(1.0)
    }
}

impl MeshShape {
    /// Cube with edge length `size`
    pub fn cube(size: f32) -> Self {
        Self::Box {
            width: size,
            height: size,
            depth: size,
        }
    }

    /// Bounds of an imported mesh from its vertex positions
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        Self::Custom(AABB::from_vertices(vertices))
    }

    /// Tightest local bounding volume for pick and proximity tests
    pub fn bounding_volume(&self) -> BoundingVolume {
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => BoundingVolume::cuboid(Vector3::new(width, height, depth) * 0.5),
            Self::Sphere { diameter } => BoundingVolume::sphere(diameter * 0.5),
            Self::Cylinder { height, diameter } => {
                let radius = diameter * 0.5;
                BoundingVolume::cuboid(Vector3::new(radius, height * 0.5, radius))
            }
            Self::Ground { width, depth } => {
                BoundingVolume::cuboid(Vector3::new(width * 0.5, 0.0, depth * 0.5))
            }
            Self::Custom(aabb) => BoundingVolume::Box(aabb),
        }
    }
}
