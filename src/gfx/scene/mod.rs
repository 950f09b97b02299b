//! # Scene Management Module
//!
//! This module provides the scene graph: named entities (meshes, lights,
//! cameras) with local transforms, parent/child links and an O(1)
//! lookup-by-name index.
//!
//! ## Key Components
//!
//! - [`Scene`] - The registry that owns entities and the active camera
//! - [`Entity`] - A named node with a transform, bounding volume and kind
//! - [`EntityKind`] - Closed set of node kinds (mesh, light, camera)
//! - [`Transform`] - Local position, rotation and scale
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use scenegrab::gfx::scene::{EntityKind, Scene, Transform};
//!
//! let mut scene = Scene::new();
//! let cylinder = scene
//!     .create_entity("cylinder", EntityKind::mesh(), Transform::from_position(Vector3::new(0.0, 0.75, 0.0)))
//!     .unwrap();
//! assert_eq!(scene.get_entity_by_name("cylinder").unwrap().id(), cylinder);
//! ```
//!
//! ## Hierarchy
//!
//! Children are owned by the scene, not by their parent. Removing a parent
//! turns its children into roots, and re-parenting that would create a
//! cycle is rejected.

pub mod object;
pub mod scene;
pub mod transform;

// Re-export main types
pub use object::{Entity, EntityId, EntityKind, Light, LightKind, Mesh};
pub use scene::{Scene, SceneStatistics};
pub use transform::Transform;
