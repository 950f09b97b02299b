//! Built-in effects for reaction rules
//!
//! Every effect addresses the entity it changes through an [`EntityRef`], so
//! the same effect works against the rule's own trigger or target as well as
//! any other named entity.

use anyhow::{anyhow, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::reaction::{Effect, EffectContext};
use crate::gfx::scene::{EntityId, Light, Mesh};

/// Which entity an effect acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    Trigger,
    Target,
    Named(String),
}

impl EntityRef {
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }

    pub fn resolve(&self, ctx: &EffectContext<'_>) -> anyhow::Result<EntityId> {
        match self {
            Self::Trigger => Ok(ctx.trigger()),
            Self::Target => Ok(ctx.target()),
            Self::Named(name) => ctx
                .id_of(name)
                .ok_or_else(|| anyhow!("no entity named '{}'", name)),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Trigger => "trigger".to_string(),
            Self::Target => "target".to_string(),
            Self::Named(name) => format!("'{}'", name),
        }
    }
}

fn light_mut<'c>(ctx: &'c mut EffectContext<'_>, entity: &EntityRef) -> anyhow::Result<&'c mut Light> {
    let id = entity.resolve(ctx)?;
    ctx.entity_mut(id)
        .and_then(|e| e.as_light_mut())
        .with_context(|| format!("{} is not a light", entity.label()))
}

fn mesh_mut<'c>(ctx: &'c mut EffectContext<'_>, entity: &EntityRef) -> anyhow::Result<&'c mut Mesh> {
    let id = entity.resolve(ctx)?;
    ctx.entity_mut(id)
        .and_then(|e| e.as_mesh_mut())
        .with_context(|| format!("{} is not a mesh", entity.label()))
}

/// Sets a light's intensity
#[derive(Debug, Clone)]
pub struct SetLightIntensity {
    pub light: EntityRef,
    pub intensity: f32,
}

impl SetLightIntensity {
    pub fn new(light: EntityRef, intensity: f32) -> Self {
        Self {
            light,
            intensity: intensity.max(0.0),
        }
    }

    /// Switches the light off
    pub fn off(light: EntityRef) -> Self {
        Self::new(light, 0.0)
    }
}

impl Effect for SetLightIntensity {
    fn apply(&mut self, ctx: &mut EffectContext<'_>) -> anyhow::Result<()> {
        light_mut(ctx, &self.light)?.intensity = self.intensity;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("set intensity of {} to {}", self.light.label(), self.intensity)
    }
}

/// Sets a mesh's base color, keeping its alpha
#[derive(Debug, Clone)]
pub struct SetColor {
    pub mesh: EntityRef,
    pub color: [f32; 3],
}

impl SetColor {
    pub fn new(mesh: EntityRef, color: [f32; 3]) -> Self {
        Self { mesh, color }
    }
}

impl Effect for SetColor {
    fn apply(&mut self, ctx: &mut EffectContext<'_>) -> anyhow::Result<()> {
        let [r, g, b] = self.color;
        mesh_mut(ctx, &self.mesh)?.material.set_color(r, g, b);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("set color of {} to {:?}", self.mesh.label(), self.color)
    }
}

/// Gives a mesh a new random base color each time it runs
#[derive(Debug, Clone)]
pub struct RandomColor {
    pub mesh: EntityRef,
    rng: StdRng,
}

impl RandomColor {
    pub fn new(mesh: EntityRef) -> Self {
        Self {
            mesh,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic color sequence, for tests and replays
    pub fn with_seed(mesh: EntityRef, seed: u64) -> Self {
        Self {
            mesh,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Effect for RandomColor {
    fn apply(&mut self, ctx: &mut EffectContext<'_>) -> anyhow::Result<()> {
        let (r, g, b) = (self.rng.random::<f32>(), self.rng.random::<f32>(), self.rng.random::<f32>());
        mesh_mut(ctx, &self.mesh)?.material.set_color(r, g, b);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("randomize color of {}", self.mesh.label())
    }
}

/// Effect backed by a closure
pub struct FnEffect<F> {
    f: F,
}

impl<F> Effect for FnEffect<F>
where
    F: FnMut(&mut EffectContext<'_>) -> anyhow::Result<()>,
{
    fn apply(&mut self, ctx: &mut EffectContext<'_>) -> anyhow::Result<()> {
        (self.f)(ctx)
    }
}

/// Wraps a closure as an [`Effect`]
pub fn effect_fn<F>(f: F) -> FnEffect<F>
where
    F: FnMut(&mut EffectContext<'_>) -> anyhow::Result<()>,
{
    FnEffect { f }
}
