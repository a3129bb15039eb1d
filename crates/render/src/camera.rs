use ferris_sim::CameraState;
use glam::{Mat4, Vec3};

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            aspect: 1.0,
            near: 1.0,
            far: 20.0,
        }
    }
}

/// Look-at camera orbiting the vertical axis through the origin.
/// Camera motion lives in the simulation state; this only derives matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub state: CameraState,
    pub projection: ProjectionConfig,
}

impl OrbitCamera {
    pub const TARGET: Vec3 = Vec3::ZERO;
    pub const UP: Vec3 = Vec3::Y;

    pub fn new(state: CameraState, projection: ProjectionConfig) -> Self {
        Self { state, projection }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.state.eye())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Self::TARGET, Self::UP)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let p = &self.projection;
        Mat4::perspective_rh(p.fov_degrees.to_radians(), p.aspect, p.near, p.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
