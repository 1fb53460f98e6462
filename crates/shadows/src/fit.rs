//! Light-space bounding volumes for one cascade.
//!
//! Two strategies share the output type [`LightFit`]:
//! - legacy: each cascade gets an independent bounding sphere around its
//!   slice, quantized to reduce shimmering from radius jitter;
//! - stable: each cascade gets a tight per-axis box, and every light camera
//!   sits on one plane through a shared reference point so all cascades
//!   agree on where light-space depth starts.
//!
//! The stable fit runs in two explicit passes: [`measure_cascade`] per
//! cascade, a [`reference_point`] reduction over the measurements, then
//! [`fit_stable`] per cascade.

use glam::{Mat4, Vec3};
use umbra_common::OrthoSettings;

use crate::frustum::FrustumCorners;

pub const WORLD_UP: Vec3 = Vec3::Y;

/// Depth at which the stable fit's orthographic volume starts.
pub const NEAR_PLANE_OFFSET: f32 = 0.0;

/// Legacy radii are rounded up to a multiple of `1 / RADIUS_QUANTUM`.
const RADIUS_QUANTUM: f32 = 16.0;

/// Squared length below which a cross product counts as degenerate.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Pick the light camera's up vector.
///
/// With `cross_product_up` the up vector is `cross(view_dir, light_dir)`,
/// otherwise world up. When the chosen vector is parallel to the light it
/// falls back to world up, then to +Z.
pub fn light_up_vector(light_dir: Vec3, view_dir: Vec3, cross_product_up: bool) -> Vec3 {
    if cross_product_up {
        let up = view_dir.cross(light_dir);
        if up.length_squared() > PARALLEL_EPSILON {
            return up.normalize();
        }
        tracing::debug!(?light_dir, ?view_dir, "view and light parallel, using world up");
    }
    if light_dir.cross(WORLD_UP).length_squared() > PARALLEL_EPSILON {
        WORLD_UP
    } else {
        tracing::debug!(?light_dir, "light parallel to world up, using +Z");
        Vec3::Z
    }
}

/// Mirror clip-space Y so the shadow pass rasterizes with Y pointing down.
///
/// Negates the whole Y row, scale and translation, so an off-center volume
/// is mirrored about clip-space zero and stays inside [-1, 1].
pub fn flip_y(projection: Mat4) -> Mat4 {
    let mut flipped = projection;
    flipped.x_axis.y = -flipped.x_axis.y;
    flipped.y_axis.y = -flipped.y_axis.y;
    flipped.z_axis.y = -flipped.z_axis.y;
    flipped.w_axis.y = -flipped.w_axis.y;
    flipped
}

/// A light camera for one cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightFit {
    pub view: Mat4,
    pub ortho: OrthoSettings,
}

impl LightFit {
    /// Orthographic projection with the Y flip applied.
    pub fn projection(&self) -> Mat4 {
        flip_y(self.ortho.projection())
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view
    }
}

/// Result of the legacy bounding-sphere fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyFit {
    pub fit: LightFit,
    pub center: Vec3,
    /// Quantized sphere radius.
    pub radius: f32,
}

pub fn fit_legacy(
    corners: &FrustumCorners,
    light_dir: Vec3,
    up: Vec3,
    z_offset: f32,
) -> LegacyFit {
    let center = corners.center();
    let radius = corners
        .iter()
        .map(|c| c.distance(center))
        .fold(0.0_f32, f32::max);
    let radius = (radius * RADIUS_QUANTUM).ceil() / RADIUS_QUANTUM;

    let eye = center - light_dir * (radius + z_offset);
    let view = Mat4::look_to_rh(eye, light_dir, up);

    let mut ortho = OrthoSettings::cube(radius);
    ortho.far += z_offset;

    LegacyFit {
        fit: LightFit { view, ortho },
        center,
        radius,
    }
}

/// First-pass measurement of one cascade for the stable fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeExtents {
    pub center: Vec3,
    /// Per-axis minimum of the corners in a light view one unit behind `center`.
    pub min: Vec3,
    pub max: Vec3,
    /// How far the corner closest to the light lies from the anchor, measured
    /// toward the light.
    pub reach_toward_light: f32,
}

/// Measure a cascade in a temporary light view placed one unit behind its
/// center. `anchor` is the center of the first cascade.
pub fn measure_cascade(
    corners: &FrustumCorners,
    light_dir: Vec3,
    up: Vec3,
    anchor: Vec3,
) -> CascadeExtents {
    let center = corners.center();
    let view = Mat4::look_at_rh(center - light_dir, center, up);
    let light_space = corners.points.map(|c| view.transform_point3(c));

    let (min, max) = light_space
        .iter()
        .skip(1)
        .fold((light_space[0], light_space[0]), |(lo, hi), p| {
            (lo.min(*p), hi.max(*p))
        });

    // Largest light-space z is the corner nearest the light.
    let closest = (1..light_space.len()).fold(0, |best, i| {
        if light_space[i].z > light_space[best].z {
            i
        } else {
            best
        }
    });

    CascadeExtents {
        center,
        min,
        max,
        reach_toward_light: (anchor - corners.points[closest]).dot(light_dir),
    }
}

/// Shared point that lies at or beyond every cascade's nearest-to-light
/// corner along the light direction.
pub fn reference_point(anchor: Vec3, extents: &[CascadeExtents], light_dir: Vec3) -> Vec3 {
    let max_dist = extents
        .iter()
        .map(|e| e.reach_toward_light)
        .reduce(f32::max)
        .unwrap_or(0.0);
    anchor - light_dir * max_dist
}

/// Second pass: place the cascade's light camera on the plane through
/// `reference` and fit the box measured in the first pass.
pub fn fit_stable(
    extents: &CascadeExtents,
    reference: Vec3,
    light_dir: Vec3,
    up: Vec3,
) -> LightFit {
    let dist = (extents.center - reference).dot(light_dir);
    let eye = extents.center - light_dir * dist;
    let view = Mat4::look_to_rh(eye, light_dir, up);

    // Extents were measured from one unit behind the center; shift by `dist`.
    let ortho = OrthoSettings {
        left: extents.min.x,
        right: extents.max.x,
        bottom: extents.min.y,
        top: extents.max.y,
        near: NEAR_PLANE_OFFSET,
        far: extents.min.z.abs() - 1.0 + dist + NEAR_PLANE_OFFSET,
    };

    LightFit { view, ortho }
}
