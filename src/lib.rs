// src/lib.rs
//! Scenegrab
//!
//! A retained-mode scene graph with ray picking, per-pointer drag sessions
//! and declarative reaction rules. Rendering is left to the host through the
//! [`RenderEngine`](gfx::render_engine::RenderEngine) trait.

pub mod error;
pub mod gfx;
pub mod interaction;
pub mod logging;
pub mod prelude;
pub mod showcase;

// Re-export main types for convenience
pub use error::{EffectError, SceneError};
pub use gfx::scene::{EntityId, Scene};
pub use interaction::InteractionController;
