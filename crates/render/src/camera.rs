use glam::{Mat4, Vec3};
use umbra_common::PerspectiveSettings;

/// Fly camera posed by position, yaw and pitch.
///
/// Supplies the inverse view-projection and view direction the shadow
/// cascades are derived from each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub perspective: PerspectiveSettings,
    pub aspect: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 15.0),
            yaw: -90.0_f32.to_radians(),
            pitch: -30.0_f32.to_radians(),
            perspective: PerspectiveSettings::default(),
            aspect: 16.0 / 9.0,
        }
    }
}

impl FlyCamera {
    /// Camera at the origin looking down -Z.
    pub fn looking_down_neg_z(perspective: PerspectiveSettings, aspect: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            perspective,
            aspect,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Normalized view direction; same as [`FlyCamera::forward`].
    pub fn view_dir(&self) -> Vec3 {
        self.forward()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.perspective.projection(self.aspect)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn inverse_view_projection(&self) -> Mat4 {
        self.view_projection().inverse()
    }
}
