use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Camera frustum shape.
///
/// Valid settings satisfy `0 < near_plane < far_plane`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveSettings {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for PerspectiveSettings {
    fn default() -> Self {
        Self {
            fov: 45.0_f32.to_radians(),
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

impl PerspectiveSettings {
    /// Distance covered between the near and far planes.
    pub fn clip_range(&self) -> f32 {
        self.far_plane - self.near_plane
    }

    /// Right-handed perspective projection with a `[0, 1]` depth range.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near_plane, self.far_plane)
    }
}

/// Box bounds of an orthographic projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthoSettings {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoSettings {
    /// Symmetric cube-shaped bounds of half-size `half_extent` starting at depth 0.
    pub fn cube(half_extent: f32) -> Self {
        Self {
            left: -half_extent,
            right: half_extent,
            bottom: -half_extent,
            top: half_extent,
            near: 0.0,
            far: 2.0 * half_extent,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn depth(&self) -> f32 {
        self.far - self.near
    }

    /// Right-handed orthographic projection with a `[0, 1]` depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}
