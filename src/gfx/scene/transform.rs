//! Local transform component for scene entities.
//!
//! A [`Transform`] holds position, rotation and scale relative to the
//! entity's parent. World-space matrices are composed by the [`Scene`] by
//! walking the parent chain, so a transform never stores its parent itself.
//!
//! [`Scene`]: super::Scene

use cgmath::{Deg, Euler, Matrix4, Quaternion, Rad, Rotation3, Vector3};

/// Position, rotation and scale in the parent's space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity transform moved to `position`
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self::default().with_position(position)
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotation from Euler angles in degrees, applied X then Y then Z
    pub fn with_rotation_euler(mut self, x: Deg<f32>, y: Deg<f32>, z: Deg<f32>) -> Self {
        self.rotation = Quaternion::from(Euler {
            x: Rad::from(x),
            y: Rad::from(y),
            z: Rad::from(z),
        });
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vector3::new(scale, scale, scale))
    }

    /// Apply translation on top of the current position
    pub fn translate(&mut self, translation: Vector3<f32>) {
        self.position += translation;
    }

    /// Apply rotation around Y axis
    pub fn rotate_y(&mut self, angle: Deg<f32>) {
        self.rotation = self.rotation * Quaternion::from_angle_y(angle);
    }

    /// Local matrix, composed T * R * S
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from(self.rotation);
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::picking::transform_point;
    use cgmath::{SquareMatrix, Zero};

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Transform::default().matrix(), Matrix4::identity());
    }

    #[test]
    fn test_trs_order() {
        // Scale first, then rotate 90 degrees about Y, then translate
        let t = Transform::from_position(Vector3::new(10.0, 0.0, 0.0))
            .with_rotation_euler(Deg(0.0), Deg(90.0), Deg(0.0))
            .with_uniform_scale(2.0);

        let p = transform_point(&t.matrix(), Vector3::new(1.0, 0.0, 0.0));
        assert!(
            approx_eq_vec3(p, Vector3::new(10.0, 0.0, -2.0)),
            "Expected (10, 0, -2), got {:?}",
            p
        );
    }

    #[test]
    fn test_translate_accumulates() {
        let mut t = Transform::new();
        t.translate(Vector3::new(1.0, 0.0, 0.0));
        t.translate(Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(t.position, Vector3::new(1.0, 2.0, 0.0));
        assert!(approx_eq_vec3(
            transform_point(&t.matrix(), Vector3::zero()),
            Vector3::new(1.0, 2.0, 0.0)
        ));
    }
}
