use glam::{Mat4, Vec3};

/// Canonical clip-space corners.
///
/// Indices 0..4 are the near face (z = 0), 4..8 the far face (z = 1).
/// Corner `i` and `i + 4` share the same XY.
pub const CLIP_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Transform a clip-space point by `inverse_view_projection` and divide by w.
pub fn project_clip_corner(inverse_view_projection: Mat4, clip: Vec3) -> Vec3 {
    let p = inverse_view_projection * clip.extend(1.0);
    p.truncate() / p.w
}

/// The 8 world-space corners of a frustum or frustum slice, in
/// [`CLIP_CORNERS`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCorners {
    pub points: [Vec3; 8],
}

impl FrustumCorners {
    /// Corners of the full camera frustum.
    pub fn from_inverse_view_projection(inverse_view_projection: Mat4) -> Self {
        Self {
            points: CLIP_CORNERS.map(|c| project_clip_corner(inverse_view_projection, c)),
        }
    }

    /// Sub-frustum between normalized depths `near_t` and `far_t`, measured
    /// along each near-to-far edge.
    pub fn slice(&self, near_t: f32, far_t: f32) -> Self {
        let mut points = [Vec3::ZERO; 8];
        for i in 0..4 {
            let near = self.points[i];
            let edge = self.points[i + 4] - near;
            points[i] = near + edge * near_t;
            points[i + 4] = near + edge * far_t;
        }
        Self { points }
    }

    pub fn center(&self) -> Vec3 {
        self.points.iter().copied().sum::<Vec3>() / 8.0
    }

    pub fn near_face(&self) -> &[Vec3] {
        &self.points[..4]
    }

    pub fn far_face(&self) -> &[Vec3] {
        &self.points[4..]
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().copied()
    }
}
