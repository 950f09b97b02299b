//! Error types for the scene graph and the interaction controller.

use thiserror::Error;

use crate::gfx::scene::EntityId;

/// Structural errors raised by [`Scene`](crate::gfx::scene::Scene) operations.
///
/// Every variant is returned before any mutation happens, so a failed call
/// leaves the scene exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// An entity with this name already exists
    #[error("an entity named '{0}' already exists in the scene")]
    DuplicateName(String),

    /// Re-parenting would make the entity its own ancestor
    #[error("cannot parent {child} under {parent}: it would create a cycle")]
    CyclicParent { child: EntityId, parent: EntityId },

    /// The id does not refer to a live entity
    #[error("entity {0} is not part of this scene")]
    UnknownEntity(EntityId),

    /// The active camera must be a camera entity
    #[error("entity '{0}' is not a camera")]
    NotACamera(String),
}

/// A reaction effect failed while being applied.
///
/// Effect failures are collected per rule in the tick report; they never
/// touch drag sessions or the entity index.
#[derive(Error, Debug)]
#[error("effect of reaction rule '{rule}' failed: {source}")]
pub struct EffectError {
    pub rule: String,
    #[source]
    pub source: anyhow::Error,
}

/// Result type alias for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
