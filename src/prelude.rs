//! # Scenegrab Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use scenegrab::prelude::*;
//!
//! let mut controller = scenegrab::showcase::build(Default::default())?;
//! controller.on_pointer_down(1, 400.0, 300.0);
//! let report = controller.tick();
//! # let _ = report;
//! # Ok::<(), anyhow::Error>(())
//! ```

// Errors
pub use crate::error::{EffectError, SceneError};

// Scene graph
pub use crate::gfx::camera::{Camera, CameraLens, CameraView, OrbitCamera};
pub use crate::gfx::geometry::MeshShape;
pub use crate::gfx::material::Material;
pub use crate::gfx::picking::{BoundingSphere, BoundingVolume, ObjectPicker, PickResult, Ray, AABB};
pub use crate::gfx::render_engine::{RenderEngine, ScreenPoint, ViewportEngine};
pub use crate::gfx::scene::{Entity, EntityId, EntityKind, Light, LightKind, Scene, Transform};

// Interaction
pub use crate::interaction::{
    effect_fn, Condition, DragState, Effect, EffectContext, EntityRef, InteractionConfig,
    InteractionController, PointerEvent, PointerId, RandomColor, ReactionRule, SetColor,
    SetLightIntensity, TickReport,
};

// Logging
pub use crate::logging::{init_logging, LoggingConfig};

// Common external dependencies
pub use cgmath::{Deg, InnerSpace, Vector3, Zero};
