//! # Showcase Scene
//!
//! A small interactive scene assembled only from the public API: a skybox,
//! a ground plane, two lights, an orbiting camera, a draggable cylinder, a
//! button and an imported dragon mesh.
//!
//! Two reaction rules are wired up:
//!
//! - dropping the cylinder onto the button switches the point light off,
//!   once
//! - tapping the ground gives the dragon a new random color, every time

use anyhow::Context;
use cgmath::Vector3;
use log::info;

use crate::{
    gfx::{
        camera::OrbitCamera,
        geometry::MeshShape,
        material::Material,
        picking::AABB,
        render_engine::ViewportEngine,
        scene::{EntityKind, Light, Scene, Transform},
    },
    interaction::{
        Condition, EntityRef, InteractionConfig, InteractionController, RandomColor,
        ReactionRule, SetLightIntensity,
    },
};

/// Entity and rule names used by the showcase
pub mod names {
    pub const SKYBOX: &str = "skybox";
    pub const GROUND: &str = "ground";
    pub const HEMI_LIGHT: &str = "hemi-light";
    pub const POINT_LIGHT: &str = "point-light";
    pub const CAMERA: &str = "camera";
    pub const CYLINDER: &str = "cylinder";
    pub const BUTTON: &str = "button";
    pub const DRAGON: &str = "dragon";

    pub const BUTTON_PRESS: &str = "button-press";
    pub const TAP_GROUND: &str = "tap-ground";
}

/// Point light intensity before the button is pressed
pub const POINT_LIGHT_INTENSITY: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct ShowcaseOptions {
    pub width: f32,
    pub height: f32,
    /// Seed for the dragon's colors; `None` draws from the OS
    pub color_seed: Option<u64>,
    pub interaction: InteractionConfig,
}

impl Default for ShowcaseOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            color_seed: None,
            interaction: InteractionConfig::default(),
        }
    }
}

impl ShowcaseOptions {
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }
}

/// Camera placement: straight down the +Z axis at the button's height
pub fn showcase_camera() -> OrbitCamera {
    OrbitCamera::new(10.0, 0.0, std::f32::consts::PI, Vector3::new(0.0, 1.0, 0.0))
}

/// Builds the scene graph without any rules
pub fn build_scene() -> anyhow::Result<Scene> {
    let mut scene = Scene::new();

    let skybox = scene.create_entity(
        names::SKYBOX,
        EntityKind::mesh_with(
            MeshShape::Sphere { diameter: 1000.0 },
            Material::new("skybox", [0.45, 0.6, 0.85, 1.0]),
        ),
        Transform::default(),
    )?;
    if let Some(entity) = scene.entity_mut(skybox) {
        entity.pickable = false;
        entity.draggable = false;
    }

    let ground = scene.create_entity(
        names::GROUND,
        EntityKind::mesh_with(
            MeshShape::Ground {
                width: 20.0,
                depth: 20.0,
            },
            Material::new("ground", [0.35, 0.55, 0.3, 1.0]),
        ),
        Transform::default(),
    )?;
    if let Some(entity) = scene.entity_mut(ground) {
        entity.draggable = false;
    }

    scene.create_entity(
        names::HEMI_LIGHT,
        EntityKind::Light(Light::hemispheric(0.7)),
        Transform::from_position(Vector3::new(0.0, 1.0, 0.0)),
    )?;
    scene.create_entity(
        names::POINT_LIGHT,
        EntityKind::Light(Light::point(POINT_LIGHT_INTENSITY)),
        Transform::from_position(Vector3::new(0.0, 4.0, -2.0)),
    )?;

    let orbit = showcase_camera();
    let camera = scene.create_entity(names::CAMERA, EntityKind::Camera(orbit.lens()), orbit.transform())?;
    scene
        .set_active_camera(camera)
        .context("showcase camera rejected")?;

    scene.create_entity(
        names::CYLINDER,
        EntityKind::mesh_with(
            MeshShape::Cylinder {
                height: 1.5,
                diameter: 1.0,
            },
            Material::default().with_color(0.8, 0.3, 0.2),
        ),
        Transform::from_position(Vector3::new(0.0, 0.75, 0.0)),
    )?;

    // Flat panel facing the camera
    let button = scene.create_entity(
        names::BUTTON,
        EntityKind::mesh_with(
            MeshShape::Box {
                width: 1.0,
                height: 0.5,
                depth: 0.0,
            },
            Material::default().with_color(0.9, 0.1, 0.1),
        ),
        Transform::from_position(Vector3::new(2.0, 1.0, 0.0)),
    )?;
    if let Some(entity) = scene.entity_mut(button) {
        entity.draggable = false;
    }

    scene.create_entity(
        names::DRAGON,
        EntityKind::mesh_with(
            MeshShape::Custom(AABB::new(
                Vector3::new(-1.0, 0.0, -0.6),
                Vector3::new(1.0, 1.2, 0.6),
            )),
            Material::default().with_color(0.6, 0.6, 0.6),
        ),
        Transform::from_position(Vector3::new(-3.0, 0.0, 3.0)).with_uniform_scale(0.8),
    )?;

    info!("Showcase scene built with {} entities", scene.len());
    Ok(scene)
}

/// Registers the showcase's reaction rules on `controller`
pub fn register_rules<E>(controller: &mut InteractionController<E>, color_seed: Option<u64>)
where
    E: crate::gfx::render_engine::RenderEngine,
{
    controller.register_reaction_rule(ReactionRule::one_shot(
        names::BUTTON_PRESS,
        names::CYLINDER,
        names::BUTTON,
        Condition::Intersects,
        SetLightIntensity::off(EntityRef::named(names::POINT_LIGHT)),
    ));

    let recolor = match color_seed {
        Some(seed) => RandomColor::with_seed(EntityRef::Target, seed),
        None => RandomColor::new(EntityRef::Target),
    };
    controller.register_reaction_rule(ReactionRule::repeatable(
        names::TAP_GROUND,
        names::GROUND,
        names::DRAGON,
        Condition::Picked,
        recolor,
    ));
}

/// Scene, reference engine and rules, ready for input
pub fn build(options: ShowcaseOptions) -> anyhow::Result<InteractionController<ViewportEngine>> {
    let scene = build_scene()?;
    let engine = ViewportEngine::new(options.width, options.height);
    let mut controller = InteractionController::with_config(scene, engine, options.interaction);
    register_rules(&mut controller, options.color_seed);
    Ok(controller)
}
