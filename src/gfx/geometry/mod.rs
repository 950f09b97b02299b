//! # Mesh Geometry
//!
//! This module describes the shapes mesh entities take in the scene.
//!
//! ## Supported Primitives
//!
//! - **Box**: Cuboid with configurable edge lengths
//! - **Sphere**: Sphere with configurable diameter
//! - **Cylinder**: Y-up cylinder with configurable height and diameter
//! - **Ground**: Flat XZ plane
//! - **Custom**: Imported geometry, reduced to its bounds
//!
//! ## Usage
//!
//! ```rust
//! use scenegrab::gfx::geometry::MeshShape;
//!
//! let cylinder = MeshShape::Cylinder { height: 1.5, diameter: 1.0 };
//! let bounds = cylinder.bounding_volume();
//! ```

pub mod primitives;

pub use primitives::*;
