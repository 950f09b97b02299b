pub mod camera_utils;
pub mod orbit_camera;

// Re-export main types
pub use camera_utils::{Camera, CameraLens, CameraView};
pub use orbit_camera::{OrbitCamera, OrbitCameraBounds};
