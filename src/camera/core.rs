use glam::{Mat4, Vec2, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera placed according to `options` with the given viewport aspect.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(options.position),
            target: Vec3::from_array(options.target),
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// View matrix looking from `eye` at `target`.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Normalized direction from eye toward target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Project a world point to viewport pixels.
    ///
    /// `x`/`y` are pixels from the top-left corner; `z` is the NDC depth
    /// (0 at the near plane, 1 at the far plane).
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3, viewport: Vec2) -> Vec3 {
        let ndc = self.build_matrix().project_point3(point);
        Vec3::new(
            (ndc.x + 1.0) / 2.0 * viewport.x,
            -(ndc.y - 1.0) / 2.0 * viewport.y,
            ndc.z,
        )
    }

    /// Inverse of [`world_to_screen`](Self::world_to_screen).
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2, depth: f32, viewport: Vec2) -> Vec3 {
        let ndc = Vec3::new(
            screen.x / viewport.x * 2.0 - 1.0,
            1.0 - screen.y / viewport.y * 2.0,
            depth,
        );
        self.build_matrix().inverse().project_point3(ndc)
    }
}
