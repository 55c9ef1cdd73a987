//! Pinhole camera.

use prism_math::{Mat4, Vec3, Vec4};

/// Camera with an orthonormal basis and a vertical field of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub origin: Vec3,
    /// Vertical field of view in degrees
    pub fov_angle: f32,

    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,

    // Accumulated rotation in degrees
    total_pitch: f32,
    total_yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 90.0)
    }
}

impl Camera {
    /// Create a camera at `origin` looking down +Z.
    pub fn new(origin: Vec3, fov_angle: f32) -> Self {
        Self {
            origin,
            fov_angle,
            forward: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            total_pitch: 0.0,
            total_yaw: 0.0,
        }
    }

    /// Half-height of the image plane at distance 1.
    #[inline]
    pub fn fov_scale(&self) -> f32 {
        (self.fov_angle.to_radians() / 2.0).tan()
    }

    /// Camera-to-world matrix: columns are right, up, forward and origin.
    ///
    /// Right and up are derived from `forward` and world +Y, so the matrix is
    /// orthonormal even if the stored basis drifted. `forward` must not be
    /// parallel to +Y.
    pub fn camera_to_world(&self) -> Mat4 {
        let (right, up) = self.derived_basis();

        Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            self.forward.extend(0.0),
            Vec4::from((self.origin, 1.0)),
        )
    }

    fn derived_basis(&self) -> (Vec3, Vec3) {
        let right = Vec3::Y.cross(self.forward).normalize();
        let up = self.forward.cross(right).normalize();
        (right, up)
    }

    /// Set absolute pitch and yaw in degrees and rebuild the basis.
    pub fn set_rotation(&mut self, pitch: f32, yaw: f32) {
        self.total_pitch = pitch;
        self.total_yaw = yaw;

        let rotation =
            Mat4::from_rotation_x(pitch.to_radians()) * Mat4::from_rotation_y(yaw.to_radians());
        self.forward = rotation.transform_vector3(Vec3::Z).normalize();
        (self.right, self.up) = self.derived_basis();
    }

    /// Add to the current pitch and yaw, in degrees.
    pub fn rotate(&mut self, delta_pitch: f32, delta_yaw: f32) {
        self.set_rotation(self.total_pitch + delta_pitch, self.total_yaw + delta_yaw);
    }

    pub fn pitch(&self) -> f32 {
        self.total_pitch
    }

    pub fn yaw(&self) -> f32 {
        self.total_yaw
    }

    /// Move the origin in the camera's own frame: x along right, y along up,
    /// z along forward.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.origin += self.right * offset.x + self.up * offset.y + self.forward * offset.z;
    }
}
