//! # Pick-and-Drag Interaction
//!
//! Pointer events go in, scene mutations come out. The
//! [`InteractionController`] owns the scene and the injected
//! [`RenderEngine`](crate::gfx::render_engine::RenderEngine); each call to
//! [`InteractionController::tick`] drains the queued pointer events in
//! arrival order and then evaluates every registered [`ReactionRule`].
//!
//! ## Drag model
//!
//! A pointer-down that picks a draggable entity opens a [`DragSession`] for
//! that pointer. The entity is moved on a plane parallel to the screen at the
//! depth of its origin, keeping the grabbed point under the cursor:
//!
//! ```text
//! depth       = view depth of the entity origin at pointer-down
//! grab_offset = unproject(down, depth) - origin
//! origin'     = unproject(move, depth) - grab_offset
//! ```
//!
//! Up and cancel both end the session; neither moves the entity back.

pub mod config;
pub mod controller;
pub mod drag;
pub mod effects;
pub mod events;
pub mod reaction;

pub use config::InteractionConfig;
pub use controller::{DragEnd, DragEndReason, InteractionController, PointerPick, TickReport};
pub use drag::{DragSession, DragState, DragTracker};
pub use effects::{effect_fn, EntityRef, FnEffect, RandomColor, SetColor, SetLightIntensity};
pub use events::{PointerEvent, PointerId};
pub use reaction::{Condition, Effect, EffectContext, Firing, ReactionRule, RuleId};
