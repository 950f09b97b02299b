//! # Render Engine Boundary
//!
//! The interaction core never rasterizes anything itself. Everything that
//! depends on how the host renders (screen/world conversions, exact hit
//! tests, frame numbering) goes through the [`RenderEngine`] trait, which is
//! injected into the controller.
//!
//! [`ViewportEngine`] is a self-contained implementation over a perspective
//! camera and a pixel viewport. It backs the tests and headless use.

use cgmath::{InnerSpace, Vector3, Vector4};

use crate::gfx::{
    camera::{Camera, CameraView},
    picking::{BoundingVolume, Ray},
};

/// Pointer position in screen pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: ScreenPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Point `t` of the way from `self` to `other`
    pub fn lerp(&self, other: ScreenPoint, t: f32) -> ScreenPoint {
        ScreenPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Services the interaction core needs from the host renderer
pub trait RenderEngine {
    /// World-space ray from the camera eye through a screen point
    fn ray_from_camera(&self, screen: ScreenPoint, camera: &CameraView) -> Ray;

    /// World point under `screen` at `depth` units in front of the eye,
    /// measured along the camera's view axis
    fn unproject_screen_point(
        &self,
        screen: ScreenPoint,
        camera: &CameraView,
        depth: f32,
    ) -> Vector3<f32>;

    /// Screen position of a world point, `None` when it is behind the eye
    fn project_world_point(&self, point: Vector3<f32>, camera: &CameraView)
        -> Option<ScreenPoint>;

    /// Distance along `ray` to `volume`; engines with exact geometry may
    /// refine this
    fn intersect_ray_with_volume(&self, ray: &Ray, volume: &BoundingVolume) -> Option<f32> {
        volume.intersect_ray(ray)
    }

    /// Width over height of the output surface
    fn aspect_ratio(&self) -> f32;

    /// Current frame number, only used to tag log lines
    fn now(&self) -> u64;

    /// Moves on to the next frame
    fn advance_frame(&mut self);
}

/// Perspective render surface of a fixed pixel size
#[derive(Debug, Clone)]
pub struct ViewportEngine {
    width: f32,
    height: f32,
    frame: u64,
}

impl ViewportEngine {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            frame: 0,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Convert screen coordinates to normalized device coordinates (-1 to 1)
    fn to_ndc(&self, screen: ScreenPoint) -> (f32, f32) {
        let ndc_x = (2.0 * screen.x) / self.width - 1.0;
        let ndc_y = 1.0 - (2.0 * screen.y) / self.height; // Flip Y axis
        (ndc_x, ndc_y)
    }
}

fn from_homogeneous(v: Vector4<f32>) -> Vector3<f32> {
    Vector3::new(v.x / v.w, v.y / v.w, v.z / v.w)
}

impl RenderEngine for ViewportEngine {
    fn ray_from_camera(&self, screen: ScreenPoint, camera: &CameraView) -> Ray {
        let (ndc_x, ndc_y) = self.to_ndc(screen);

        // Same basis look_at_rh builds, so this inverts the projection exactly
        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);
        let tan_half_fovy = (camera.fovy.0 * 0.5).tan();

        let direction = forward
            + right * (ndc_x * tan_half_fovy * camera.aspect)
            + up * (ndc_y * tan_half_fovy);
        Ray::new(camera.eye, direction)
    }

    fn unproject_screen_point(
        &self,
        screen: ScreenPoint,
        camera: &CameraView,
        depth: f32,
    ) -> Vector3<f32> {
        let ray = self.ray_from_camera(screen, camera);
        // Stretch the ray so its component along the view axis equals `depth`
        let along_axis = ray.direction.dot(camera.forward());
        if along_axis.abs() < f32::EPSILON {
            return ray.point_at(depth);
        }
        ray.point_at(depth / along_axis)
    }

    fn project_world_point(
        &self,
        point: Vector3<f32>,
        camera: &CameraView,
    ) -> Option<ScreenPoint> {
        let clip = camera.build_view_projection_matrix() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }

        let ndc = from_homogeneous(clip);
        Some(ScreenPoint::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        ))
    }

    fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    fn now(&self) -> u64 {
        self.frame
    }

    fn advance_frame(&mut self) {
        self.frame += 1;
    }
}
