use cgmath::{perspective, InnerSpace, Matrix4, Point3, Rad, Vector3};

/// Lens parameters carried by camera entities
///
/// The eye is the entity's world position; `target` is a world-space point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLens {
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            target: Vector3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl CameraLens {
    pub fn looking_at(target: Vector3<f32>) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }
}

pub trait Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Snapshot of the active camera handed to the render engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraView {
    pub fn new(eye: Vector3<f32>, lens: &CameraLens, aspect: f32) -> Self {
        Self {
            eye,
            target: lens.target,
            up: stable_up(lens.target - eye, lens.up),
            aspect,
            fovy: lens.fovy,
            znear: lens.znear,
            zfar: lens.zfar,
        }
    }

    /// True when no view basis exists: the eye sits on the target, or the
    /// inputs are not finite
    pub fn is_degenerate(&self) -> bool {
        let finite = [self.eye, self.target, self.up]
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite());
        !finite || (self.target - self.eye).magnitude2() <= f32::EPSILON
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::new(self.eye.x, self.eye.y, self.eye.z);
        let target = Point3::new(self.target.x, self.target.y, self.target.z);
        Matrix4::look_at_rh(eye, target, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.eye).normalize()
    }

    /// Distance of `point` in front of the eye, measured along the view axis
    pub fn view_depth(&self, point: Vector3<f32>) -> f32 {
        (point - self.eye).dot(self.forward())
    }
}

impl Camera for CameraView {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

/// `up` itself unless it is (nearly) parallel to the view direction; then
/// the world axis least aligned with the view direction.
fn stable_up(view_dir: Vector3<f32>, up: Vector3<f32>) -> Vector3<f32> {
    let alignment = view_dir.normalize().cross(up.normalize()).magnitude2();
    if alignment > 1e-6 {
        return up;
    }

    let dir = view_dir.normalize();
    [Vector3::unit_z(), Vector3::unit_x(), Vector3::unit_y()]
        .into_iter()
        .min_by(|a, b| dir.dot(*a).abs().total_cmp(&dir.dot(*b).abs()))
        .unwrap_or(Vector3::unit_z())
}
