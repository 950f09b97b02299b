//! # Reaction Rules
//!
//! A reaction rule binds a spatial condition between two named entities to
//! an [`Effect`]. Rules are registered once during scene setup and evaluated
//! by the controller at the end of every tick, after all drags for that tick
//! have been applied.
//!
//! ## Firing modes
//!
//! - **One-shot** rules run their effect the first time the condition holds
//!   and never again, however many ticks the condition stays true
//! - **Repeatable** rules run their effect on every tick the condition holds
//!
//! Edge-triggered repeatable behavior is left to the effect itself.

use std::fmt;

use cgmath::InnerSpace;

use crate::gfx::scene::{Entity, EntityId, Scene};

/// Spatial test between a rule's trigger and target entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// World bounding volumes overlap
    Intersects,
    /// Bounding volume centers are at most this far apart
    WithinRadius(f32),
    /// The trigger entity was picked by a pointer-down during this tick
    Picked,
}

impl Condition {
    /// Evaluates the condition against current world-space bounds
    pub fn holds(
        &self,
        scene: &Scene,
        trigger: EntityId,
        target: EntityId,
        picked_this_tick: &[EntityId],
    ) -> bool {
        match *self {
            Self::Picked => picked_this_tick.contains(&trigger),
            Self::Intersects => match (scene.world_bounds(trigger), scene.world_bounds(target)) {
                (Some(a), Some(b)) => a.intersects(&b),
                _ => false,
            },
            Self::WithinRadius(radius) => {
                match (scene.world_bounds(trigger), scene.world_bounds(target)) {
                    (Some(a), Some(b)) => (a.center() - b.center()).magnitude() <= radius,
                    _ => false,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firing {
    OneShot { fired: bool },
    Repeatable,
}

/// Restricted view of the scene handed to effects
///
/// Effects can change what entities look like and where they are, but they
/// cannot create, rename or remove entities, so the name index stays intact
/// whatever an effect does.
pub struct EffectContext<'a> {
    scene: &'a mut Scene,
    trigger: EntityId,
    target: EntityId,
    frame: u64,
}

impl<'a> EffectContext<'a> {
    pub fn new(scene: &'a mut Scene, trigger: EntityId, target: EntityId, frame: u64) -> Self {
        Self {
            scene,
            trigger,
            target,
            frame,
        }
    }

    pub fn trigger(&self) -> EntityId {
        self.trigger
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.scene.entity(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.scene.entity_mut(id)
    }

    pub fn entity_by_name_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.scene.get_entity_by_name_mut(name)
    }

    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.scene.id_of(name)
    }
}

/// Side effect run when a rule's condition holds
pub trait Effect {
    fn apply(&mut self, ctx: &mut EffectContext<'_>) -> anyhow::Result<()>;

    /// Short description used in log lines
    fn describe(&self) -> String {
        "custom effect".to_string()
    }
}

/// Registered index of a rule inside its controller
pub type RuleId = usize;

/// Declarative binding from a spatial condition to an effect
pub struct ReactionRule {
    pub name: String,
    pub trigger: String,
    pub target: String,
    pub condition: Condition,
    firing: Firing,
    effect: Box<dyn Effect>,
}

impl ReactionRule {
    /// Rule whose effect runs at most once
    pub fn one_shot(
        name: &str,
        trigger: &str,
        target: &str,
        condition: Condition,
        effect: impl Effect + 'static,
    ) -> Self {
        Self::new(name, trigger, target, condition, Firing::OneShot { fired: false }, effect)
    }

    /// Rule whose effect runs on every tick its condition holds
    pub fn repeatable(
        name: &str,
        trigger: &str,
        target: &str,
        condition: Condition,
        effect: impl Effect + 'static,
    ) -> Self {
        Self::new(name, trigger, target, condition, Firing::Repeatable, effect)
    }

    fn new(
        name: &str,
        trigger: &str,
        target: &str,
        condition: Condition,
        firing: Firing,
        effect: impl Effect + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            trigger: trigger.to_string(),
            target: target.to_string(),
            condition,
            firing,
            effect: Box::new(effect),
        }
    }

    pub fn firing(&self) -> Firing {
        self.firing
    }

    pub fn is_one_shot(&self) -> bool {
        matches!(self.firing, Firing::OneShot { .. })
    }

    pub fn has_fired(&self) -> bool {
        matches!(self.firing, Firing::OneShot { fired: true })
    }

    /// Re-arms a one-shot rule
    pub fn reset(&mut self) {
        if let Firing::OneShot { fired } = &mut self.firing {
            *fired = false;
        }
    }

    /// Runs the effect unless this is a one-shot rule that already fired
    ///
    /// Returns `None` when the rule was skipped. A one-shot rule counts as
    /// fired once its effect has been attempted, even if the effect failed.
    pub(crate) fn fire(&mut self, ctx: &mut EffectContext<'_>) -> Option<anyhow::Result<()>> {
        if self.has_fired() {
            return None;
        }
        let result = self.effect.apply(ctx);
        if let Firing::OneShot { fired } = &mut self.firing {
            *fired = true;
        }
        Some(result)
    }

    pub fn describe_effect(&self) -> String {
        self.effect.describe()
    }
}

impl fmt::Debug for ReactionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionRule")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .field("target", &self.target)
            .field("condition", &self.condition)
            .field("firing", &self.firing)
            .field("effect", &self.effect.describe())
            .finish()
    }
}
