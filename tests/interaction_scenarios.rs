use scenegrab::prelude::*;
use scenegrab::showcase::{self, names, ShowcaseOptions, POINT_LIGHT_INTENSITY};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

fn scene_with_camera() -> Scene {
    let mut scene = Scene::new();
    let camera = scene
        .create_entity(
            "camera",
            EntityKind::Camera(CameraLens::looking_at(Vector3::new(0.0, 1.0, 0.0))),
            Transform::from_position(Vector3::new(0.0, 1.0, -10.0)),
        )
        .unwrap();
    scene.set_active_camera(camera).unwrap();
    scene
}

fn button_scene() -> InteractionController<ViewportEngine> {
    let mut scene = scene_with_camera();
    scene
        .create_entity(
            "cylinder",
            EntityKind::mesh_with(
                MeshShape::Cylinder {
                    height: 1.5,
                    diameter: 1.0,
                },
                Material::default(),
            ),
            Transform::from_position(Vector3::new(0.0, 0.75, 0.0)),
        )
        .unwrap();
    scene
        .create_entity(
            "button",
            EntityKind::mesh_with(
                MeshShape::Box {
                    width: 1.0,
                    height: 0.5,
                    depth: 0.0,
                },
                Material::default(),
            ),
            Transform::from_position(Vector3::new(2.0, 1.0, 0.0)),
        )
        .unwrap();
    scene
        .create_entity(
            "light",
            EntityKind::Light(Light::point(0.9)),
            Transform::from_position(Vector3::new(0.0, 4.0, 0.0)),
        )
        .unwrap();

    let mut controller = InteractionController::new(scene, ViewportEngine::new(WIDTH, HEIGHT));
    controller.register_reaction_rule(ReactionRule::one_shot(
        "press",
        "cylinder",
        "button",
        Condition::Intersects,
        SetLightIntensity::off(EntityRef::named("light")),
    ));
    controller
}

fn screen_of(controller: &InteractionController<ViewportEngine>, name: &str) -> ScreenPoint {
    let id = controller.scene().id_of(name).unwrap();
    controller.screen_position_of(id).unwrap()
}

fn intensity(controller: &InteractionController<ViewportEngine>, name: &str) -> f32 {
    controller
        .scene()
        .get_entity_by_name(name)
        .and_then(|e| e.as_light())
        .unwrap()
        .intensity
}

#[test]
fn dragging_cylinder_onto_button_turns_light_off_once() {
    let mut controller = button_scene();
    assert_eq!(intensity(&controller, "light"), 0.9);

    let from = screen_of(&controller, "cylinder");
    let to = screen_of(&controller, "button");
    controller.on_pointer_down(1, from.x, from.y);
    controller.on_pointer_move(1, to.x, to.y);
    controller.on_pointer_up(1);

    let report = controller.tick();
    assert_eq!(report.drags_started.len(), 1);
    assert!(report.has_fired("press"));
    assert!(report.failures.is_empty());
    assert_eq!(intensity(&controller, "light"), 0.0);

    let report = controller.tick();
    assert!(report.fired.is_empty());
    assert_eq!(intensity(&controller, "light"), 0.0);
    assert!(controller.rules()[0].has_fired());
}

#[test]
fn stepped_drag_lands_under_the_pointer() {
    let mut controller = button_scene();
    let from = screen_of(&controller, "cylinder");
    let to = ScreenPoint::new(610.0, 170.0);
    let steps = 12;

    controller.on_pointer_down(7, from.x, from.y);
    controller.tick();
    for step in 1..=steps {
        let p = from.lerp(to, step as f32 / steps as f32);
        controller.on_pointer_move(7, p.x, p.y);
        controller.tick();
    }
    controller.on_pointer_up(7);
    let report = controller.tick();
    assert_eq!(report.drags_ended.len(), 1);

    let landed = screen_of(&controller, "cylinder");
    assert!(landed.distance(to) < 0.01, "landed at {:?}", landed);
}

#[test]
fn moves_without_a_session_change_nothing() {
    let mut controller = button_scene();
    let before = controller
        .scene()
        .world_position(controller.scene().id_of("cylinder").unwrap())
        .unwrap();

    controller.on_pointer_move(3, 10.0, 10.0);
    controller.on_pointer_up(3);
    controller.tick();

    let after = controller
        .scene()
        .world_position(controller.scene().id_of("cylinder").unwrap())
        .unwrap();
    assert_eq!(before, after);
}

#[test]
fn two_pointers_are_applied_before_rules_run() {
    let mut scene = scene_with_camera();
    let left = scene
        .create_entity(
            "left",
            EntityKind::mesh(),
            Transform::from_position(Vector3::new(3.0, 1.0, 0.0)),
        )
        .unwrap();
    let right = scene
        .create_entity(
            "right",
            EntityKind::mesh(),
            Transform::from_position(Vector3::new(-3.0, 1.0, 0.0)),
        )
        .unwrap();
    scene
        .create_entity("lamp", EntityKind::Light(Light::point(1.0)), Transform::default())
        .unwrap();

    let mut controller = InteractionController::new(scene, ViewportEngine::new(WIDTH, HEIGHT));
    controller.register_reaction_rule(ReactionRule::one_shot(
        "meet",
        "left",
        "right",
        Condition::WithinRadius(0.5),
        SetLightIntensity::off(EntityRef::named("lamp")),
    ));

    let a = controller.screen_position_of(left).unwrap();
    let b = controller.screen_position_of(right).unwrap();
    let center = ScreenPoint::new(WIDTH / 2.0, HEIGHT / 2.0);
    controller.on_pointer_down(1, a.x, a.y);
    controller.on_pointer_down(2, b.x, b.y);
    controller.on_pointer_move(1, center.x, center.y);
    controller.on_pointer_move(2, center.x, center.y);

    let report = controller.tick();
    assert_eq!(report.drags_started.len(), 2);
    assert!(report.has_fired("meet"));
    assert_eq!(intensity(&controller, "lamp"), 0.0);
}

#[test]
fn equal_distance_pick_goes_to_the_older_entity() {
    let mut scene = scene_with_camera();
    let first = scene
        .create_entity("first", EntityKind::mesh(), Transform::default())
        .unwrap();
    let second = scene
        .create_entity("second", EntityKind::mesh(), Transform::default())
        .unwrap();
    let mut controller = InteractionController::new(scene, ViewportEngine::new(WIDTH, HEIGHT));
    let at = controller.screen_position_of(first).unwrap();

    assert_eq!(controller.pick_at(at.x, at.y).map(|hit| hit.entity), Some(first));

    controller.scene_mut().remove_entity(first).unwrap();
    assert_eq!(controller.pick_at(at.x, at.y).map(|hit| hit.entity), Some(second));
}

#[test]
fn nearer_entity_wins_the_pick() {
    let mut scene = scene_with_camera();
    let far = scene
        .create_entity(
            "far",
            EntityKind::mesh(),
            Transform::from_position(Vector3::new(0.0, 1.0, 2.0)),
        )
        .unwrap();
    let near = scene
        .create_entity(
            "near",
            EntityKind::mesh(),
            Transform::from_position(Vector3::new(0.0, 1.0, -2.0)),
        )
        .unwrap();
    let mut controller = InteractionController::new(scene, ViewportEngine::new(WIDTH, HEIGHT));

    let hit = controller.pick_at(WIDTH / 2.0, HEIGHT / 2.0).unwrap();
    assert_eq!(hit.entity, near);
    assert_ne!(hit.entity, far);
    assert!((hit.distance - 7.5).abs() < 1e-4);
}

#[test]
fn showcase_button_press() {
    let mut controller = showcase::build(ShowcaseOptions::default().with_color_seed(3)).unwrap();
    assert_eq!(intensity(&controller, names::POINT_LIGHT), POINT_LIGHT_INTENSITY);

    let from = screen_of(&controller, names::CYLINDER);
    let to = screen_of(&controller, names::BUTTON);
    controller.on_pointer_down(1, from.x, from.y);
    for step in 1..=5 {
        let p = from.lerp(to, step as f32 / 5.0);
        controller.on_pointer_move(1, p.x, p.y);
    }
    controller.on_pointer_up(1);

    let report = controller.tick();
    assert!(report.has_fired(names::BUTTON_PRESS));
    assert_eq!(intensity(&controller, names::POINT_LIGHT), 0.0);
    assert_eq!(intensity(&controller, names::HEMI_LIGHT), 0.7);

    assert!(controller.tick().fired.is_empty());
}

#[test]
fn top_down_camera_drags_across_the_ground_plane() {
    let mut scene = Scene::new();
    let camera = scene
        .create_entity(
            "camera",
            EntityKind::Camera(CameraLens::default()),
            Transform::from_position(Vector3::new(0.0, 10.0, 0.0)),
        )
        .unwrap();
    scene.set_active_camera(camera).unwrap();
    let puck = scene
        .create_entity("puck", EntityKind::mesh(), Transform::default())
        .unwrap();
    let mut controller = InteractionController::new(scene, ViewportEngine::new(WIDTH, HEIGHT));

    let from = controller.screen_position_of(puck).unwrap();
    let to = ScreenPoint::new(520.0, 240.0);
    controller.on_pointer_down(1, from.x, from.y);
    controller.on_pointer_move(1, to.x, to.y);
    let report = controller.tick();
    assert_eq!(report.drags_started.len(), 1);

    let position = controller.scene().world_position(puck).unwrap();
    assert!(position.x.is_finite() && position.y.is_finite() && position.z.is_finite());
    assert!(position.y.abs() < 1e-4);
    let landed = controller.screen_position_of(puck).unwrap();
    assert!(landed.distance(to) < 0.01, "landed at {:?}", landed);
}
