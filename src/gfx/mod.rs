//! # Graphics Module
//!
//! Scene-side graphics state: everything the interaction layer reads or
//! changes, with none of the GPU work.
//!
//! ## Architecture Overview
//!
//! - **Scene Graph** ([`scene`]) - Named entities, hierarchy and world transforms
//! - **Camera System** ([`camera`]) - Lens parameters and orbit placement
//! - **Picking** ([`picking`]) - Rays, bounding volumes and nearest-hit selection
//! - **Geometry** ([`geometry`]) - Primitive shapes and their bounds
//! - **Render Engine Boundary** ([`render_engine`]) - Screen/world conversions
//!   supplied by the host
//!
//! ## Usage
//!
//! ```no_run
//! use scenegrab::gfx::{scene::{EntityKind, Scene, Transform}, render_engine::ViewportEngine};
//!
//! let mut scene = Scene::new();
//! let id = scene.create_entity("crate", EntityKind::mesh(), Transform::default())?;
//! let engine = ViewportEngine::new(800.0, 600.0);
//! # let _ = (id, engine);
//! # Ok::<(), scenegrab::SceneError>(())
//! ```

pub mod camera;
pub mod geometry;
pub mod material;
pub mod picking;
pub mod render_engine;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use render_engine::{RenderEngine, ScreenPoint, ViewportEngine};
