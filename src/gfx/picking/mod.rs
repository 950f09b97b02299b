//! # Object Picking System
//!
//! This module provides 3D entity picking using pointer ray-casting, plus the
//! bounding volumes the rest of the crate uses for proximity tests.
//!
//! ## How it works
//!
//! 1. **Pointer to Ray**: The [`RenderEngine`] turns a screen point into a world-space ray
//! 2. **Ray-Volume Intersection**: The ray is tested against every pickable entity's
//!    world-space bounding volume (a linear scan, scenes are small)
//! 3. **Selection**: The nearest hit wins; equal distances resolve to the
//!    earliest-created entity so results are deterministic
//!
//! ## Usage
//!
//! ```no_run
//! use scenegrab::gfx::picking::ObjectPicker;
//! # use scenegrab::gfx::{render_engine::{ScreenPoint, ViewportEngine}, scene::Scene};
//! # let scene = Scene::new();
//! # let engine = ViewportEngine::new(800.0, 600.0);
//! # let camera = scene.camera_view(1.0).unwrap();
//!
//! let mut picker = ObjectPicker::new();
//! if let Some(hit) = picker.pick_object(ScreenPoint::new(400.0, 300.0), &camera, &scene, &engine) {
//!     println!("Selected entity: {:?}", hit.entity);
//! }
//! ```
//!
//! [`RenderEngine`]: crate::gfx::render_engine::RenderEngine

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4, Zero};

use crate::gfx::{
    camera::CameraView,
    render_engine::{RenderEngine, ScreenPoint},
    scene::{EntityId, Scene},
};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    /// False when the origin or direction holds NaN or infinity, which a
    /// degenerate camera basis produces
    pub fn is_finite(&self) -> bool {
        is_finite_vec(self.origin) && is_finite_vec(self.direction)
    }

    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Box centered on the local origin with the given half extents
    pub fn from_half_extents(half_extents: Vector3<f32>) -> Self {
        Self::new(-half_extents, half_extents)
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vector3<f32> {
        (self.max - self.min) * 0.5
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    ///
    /// Axes the ray runs parallel to are handled explicitly so flat boxes
    /// (zero thickness on one axis) stay pickable.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if !ray.is_finite() {
            return None;
        }

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];

            if direction.abs() < f32::EPSILON {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv_dir = 1.0 / direction;
            let mut t0 = (self.min[axis] - origin) * inv_dir;
            let mut t1 = (self.max[axis] - origin) * inv_dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        let distance = if t_near >= 0.0 { t_near } else { t_far };
        (t_far >= 0.0 && distance.is_finite()).then_some(distance)
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed_corners: Vec<[f32; 3]> = corners
            .iter()
            .map(|corner| {
                let p = transform_point(matrix, *corner);
                [p.x, p.y, p.z]
            })
            .collect();

        Self::from_vertices(&transformed_corners)
    }

    /// Overlap test, touching faces count as overlapping
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }
}

/// Bounding sphere for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3<f32>,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vector3<f32>, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Ray-sphere intersection, returns the nearest non-negative distance
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if !ray.is_finite() {
            return None;
        }

        let to_origin = ray.origin - self.center;
        let b = to_origin.dot(ray.direction);
        let c = to_origin.magnitude2() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let t_near = -b - root;
        let t_far = -b + root;
        let distance = if t_near >= 0.0 { t_near } else { t_far };
        (t_far >= 0.0 && distance.is_finite()).then_some(distance)
    }

    /// Moves the center through `matrix` and scales the radius by the
    /// largest axis scale so the sphere still encloses the shape.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let scale = matrix
            .x
            .truncate()
            .magnitude()
            .max(matrix.y.truncate().magnitude())
            .max(matrix.z.truncate().magnitude());
        Self::new(transform_point(matrix, self.center), self.radius * scale)
    }
}

/// Shape used for pick and proximity tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Box(AABB),
    Sphere(BoundingSphere),
}

impl BoundingVolume {
    /// Box centered on the local origin
    pub fn cuboid(half_extents: Vector3<f32>) -> Self {
        Self::Box(AABB::from_half_extents(half_extents))
    }

    /// Sphere centered on the local origin
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere(BoundingSphere::new(Vector3::zero(), radius))
    }

    pub fn center(&self) -> Vector3<f32> {
        match self {
            Self::Box(aabb) => aabb.center(),
            Self::Sphere(sphere) => sphere.center,
        }
    }

    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        match self {
            Self::Box(aabb) => aabb.intersect_ray(ray),
            Self::Sphere(sphere) => sphere.intersect_ray(ray),
        }
    }

    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        match self {
            Self::Box(aabb) => Self::Box(aabb.transform(matrix)),
            Self::Sphere(sphere) => Self::Sphere(sphere.transform(matrix)),
        }
    }

    /// Overlap test between two volumes expressed in the same space
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        match (self, other) {
            (Self::Box(a), Self::Box(b)) => a.intersects(b),
            (Self::Sphere(a), Self::Sphere(b)) => {
                let reach = a.radius + b.radius;
                (a.center - b.center).magnitude2() <= reach * reach
            }
            (Self::Box(aabb), Self::Sphere(sphere)) | (Self::Sphere(sphere), Self::Box(aabb)) => {
                let closest = aabb.closest_point(sphere.center);
                (closest - sphere.center).magnitude2() <= sphere.radius * sphere.radius
            }
        }
    }
}

/// Applies `matrix` to a point, dividing through by w
pub fn transform_point(matrix: &Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    let homogeneous = matrix * Vector4::new(point.x, point.y, point.z, 1.0);
    Vector3::new(homogeneous.x, homogeneous.y, homogeneous.z) / homogeneous.w
}

pub(crate) fn is_finite_vec(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Result of an object picking operation
#[derive(Debug, Clone)]
pub struct PickResult {
    /// The picked entity
    pub entity: EntityId,
    /// Distance from camera to intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Object picker for 3D pointer selection
pub struct ObjectPicker {
    /// Scratch buffer reused between picks
    hits: Vec<PickResult>,
}

impl ObjectPicker {
    /// Create a new object picker
    pub fn new() -> Self {
        Self { hits: Vec::new() }
    }

    /// Pick an entity from the scene using screen coordinates
    pub fn pick_object<E: RenderEngine + ?Sized>(
        &mut self,
        screen_pos: ScreenPoint,
        camera: &CameraView,
        scene: &Scene,
        engine: &E,
    ) -> Option<PickResult> {
        let ray = engine.ray_from_camera(screen_pos, camera);
        self.pick_ray(&ray, scene, engine)
    }

    /// Nearest pickable entity along `ray`
    pub fn pick_ray<E: RenderEngine + ?Sized>(
        &mut self,
        ray: &Ray,
        scene: &Scene,
        engine: &E,
    ) -> Option<PickResult> {
        self.collect_hits(ray, scene, engine);
        self.hits.first().cloned()
    }

    /// Every pickable entity hit by `ray`, nearest first
    pub fn pick_all<E: RenderEngine + ?Sized>(
        &mut self,
        ray: &Ray,
        scene: &Scene,
        engine: &E,
    ) -> Vec<PickResult> {
        self.collect_hits(ray, scene, engine);
        self.hits.clone()
    }

    fn collect_hits<E: RenderEngine + ?Sized>(&mut self, ray: &Ray, scene: &Scene, engine: &E) {
        self.hits.clear();
        if !ray.is_finite() {
            return;
        }

        for entity in scene.entities().filter(|entity| entity.pickable) {
            let Some(world_volume) = scene.world_bounds(entity.id()) else {
                continue;
            };

            let hit = engine
                .intersect_ray_with_volume(ray, &world_volume)
                .filter(|distance| distance.is_finite());
            if let Some(distance) = hit {
                self.hits.push(PickResult {
                    entity: entity.id(),
                    distance,
                    intersection_point: ray.point_at(distance),
                });
            }
        }

        // Entity ids follow creation order, so equal distances go to the older entity
        self.hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.entity.cmp(&b.entity))
        });
    }
}

impl Default for ObjectPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        render_engine::ViewportEngine,
        scene::{EntityKind, Transform},
    };

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        let distance = aabb.intersect_ray(&ray).unwrap();
        assert!((distance - 4.0).abs() < 1e-5);

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());

        // Box behind the ray
        let ray_away = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(aabb.intersect_ray(&ray_away).is_none());
    }

    #[test]
    fn test_flat_box_is_hit_head_on() {
        // Zero thickness on z, like a wall-mounted button
        let aabb = AABB::from_half_extents(Vector3::new(0.5, 0.25, 0.0));
        let ray = Ray::new(Vector3::new(0.1, 0.1, -3.0), Vector3::new(0.0, 0.0, 1.0));
        let distance = aabb.intersect_ray(&ray).unwrap();
        assert!((distance - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_non_finite_ray_hits_nothing() {
        let ray = Ray {
            origin: Vector3::new(0.0, 0.0, -5.0),
            direction: Vector3::new(f32::NAN, f32::NAN, f32::NAN),
        };
        let aabb = AABB::from_half_extents(Vector3::new(1.0, 1.0, 1.0));
        let sphere = BoundingSphere::new(Vector3::zero(), 1.0);
        assert!(aabb.intersect_ray(&ray).is_none());
        assert!(sphere.intersect_ray(&ray).is_none());

        let mut scene = Scene::new();
        scene
            .create_entity("box", EntityKind::mesh(), Transform::default())
            .unwrap();
        let engine = ViewportEngine::new(100.0, 100.0);
        assert!(ObjectPicker::new().pick_ray(&ray, &scene, &engine).is_none());
    }

    #[test]
    fn test_ray_sphere_intersection() {
        let sphere = BoundingSphere::new(Vector3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));
        let distance = sphere.intersect_ray(&ray).unwrap();
        assert!((distance - 4.0).abs() < 1e-5);

        let miss = Ray::new(Vector3::new(3.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect_ray(&miss).is_none());
    }

    #[test]
    fn test_volume_overlap() {
        let a = BoundingVolume::cuboid(Vector3::new(1.0, 1.0, 1.0));
        let b = BoundingVolume::Box(AABB::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 1.0, 1.0),
        ));
        let far = BoundingVolume::Sphere(BoundingSphere::new(Vector3::new(5.0, 0.0, 0.0), 1.0));
        let near = BoundingVolume::Sphere(BoundingSphere::new(Vector3::new(1.5, 0.0, 0.0), 0.6));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&far));
        assert!(a.intersects(&near));
        assert!(near.intersects(&a));
        assert!(!far.intersects(&near));
    }

    #[test]
    fn test_sphere_transform_scales_radius() {
        let sphere = BoundingSphere::new(Vector3::zero(), 1.0);
        let matrix = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_nonuniform_scale(1.0, 3.0, 2.0);
        let moved = sphere.transform(&matrix);
        assert_eq!(moved.center, Vector3::new(1.0, 2.0, 3.0));
        assert!((moved.radius - 3.0).abs() < 1e-5);
    }

    fn pick_scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .create_entity("near", EntityKind::mesh(), Transform::from_position(Vector3::new(0.0, 0.0, 2.0)))
            .unwrap();
        scene
            .create_entity("far", EntityKind::mesh(), Transform::from_position(Vector3::new(0.0, 0.0, 5.0)))
            .unwrap();
        for name in ["near", "far"] {
            scene.get_entity_by_name_mut(name).unwrap().bounding_volume =
                BoundingVolume::cuboid(Vector3::new(1.0, 1.0, 1.0));
        }
        scene
    }

    #[test]
    fn test_nearest_hit_wins() {
        let scene = pick_scene();
        let engine = ViewportEngine::new(100.0, 100.0);
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

        let mut picker = ObjectPicker::new();
        let hit = picker.pick_ray(&ray, &scene, &engine).unwrap();
        assert_eq!(hit.entity, scene.id_of("near").unwrap());
        assert!((hit.distance - 6.0).abs() < 1e-5);

        let all = picker.pick_all(&ray, &scene, &engine);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].entity, scene.id_of("far").unwrap());
    }

    #[test]
    fn test_equal_distance_prefers_first_created() {
        let mut scene = Scene::new();
        for name in ["first", "second"] {
            scene
                .create_entity(name, EntityKind::mesh(), Transform::default())
                .unwrap();
        }
        let engine = ViewportEngine::new(100.0, 100.0);
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

        let hit = ObjectPicker::new().pick_ray(&ray, &scene, &engine).unwrap();
        assert_eq!(hit.entity, scene.id_of("first").unwrap());
    }

    #[test]
    fn test_unpickable_entities_are_skipped() {
        let mut scene = pick_scene();
        scene.get_entity_by_name_mut("near").unwrap().pickable = false;
        let engine = ViewportEngine::new(100.0, 100.0);
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

        let hit = ObjectPicker::new().pick_ray(&ray, &scene, &engine).unwrap();
        assert_eq!(hit.entity, scene.id_of("far").unwrap());
    }

    #[test]
    fn test_empty_scene_picks_nothing() {
        let scene = Scene::new();
        let engine = ViewportEngine::new(100.0, 100.0);
        let ray = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));
        assert!(ObjectPicker::new().pick_ray(&ray, &scene, &engine).is_none());
    }
}
