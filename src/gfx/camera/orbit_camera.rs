use cgmath::{Rad, Vector3, Zero};

use super::camera_utils::CameraLens;
use crate::gfx::scene::Transform;

/// Places a camera entity on a sphere around a target point
///
/// Setup code describes the camera the way an arc-rotate camera is usually
/// configured (pitch, yaw, distance) and turns it into the entity's transform
/// and lens with [`OrbitCamera::transform`] and [`OrbitCamera::lens`].
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculted in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
        };
        camera.update();
        camera
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    /// Updates the camera after changing `distance` or `pitch`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    /// Transform placing a camera entity at the eye
    pub fn transform(&self) -> Transform {
        Transform::from_position(self.eye)
    }

    pub fn lens(&self) -> CameraLens {
        CameraLens {
            target: self.target,
            up: self.up,
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(100.0),
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}
