//! Practical split scheme: a blend of logarithmic and uniform distributions
//! along the camera's near-far range.

use crate::error::ShadowConfigError;
use crate::settings::{validate_blend, validate_planes};

/// Normalized far edge of each cascade along the near-far range.
///
/// Returns `count` strictly increasing values in `(0, 1]`; the last one is
/// exactly `1.0`. A `count` of zero yields an empty vector. A near-far range
/// too narrow for `f32` to separate the splits is rejected.
pub fn cascade_splits(
    near: f32,
    far: f32,
    count: usize,
    blend: f32,
) -> Result<Vec<f32>, ShadowConfigError> {
    validate_planes(near, far)?;
    validate_blend(blend)?;

    let range = far - near;
    let ratio = far / near;

    let splits: Vec<f32> = (0..count)
        .map(|i| {
            if i + 1 == count {
                // Both schemes reach `far` at p = 1; skip powf rounding.
                return 1.0;
            }
            let p = (i + 1) as f32 / count as f32;
            let log_split = near * ratio.powf(p);
            let uniform_split = near + range * p;
            let d = blend * log_split + (1.0 - blend) * uniform_split;
            (d - near) / range
        })
        .collect();

    let first_positive = splits.first().is_none_or(|&s| s > 0.0);
    let increasing = splits.windows(2).all(|pair| pair[0] < pair[1]);
    if !first_positive || !increasing {
        return Err(ShadowConfigError::DepthRangeTooNarrow { near, far, count });
    }

    Ok(splits)
}

/// `(near, far)` normalized bounds of each cascade: the first cascade starts
/// at 0, every later one at its predecessor's split.
pub fn split_ranges(splits: &[f32]) -> impl Iterator<Item = (f32, f32)> + '_ {
    std::iter::once(0.0)
        .chain(splits.iter().copied())
        .zip(splits.iter().copied())
}

/// Convert a normalized split into camera-space depth (negative in front of
/// the camera).
pub fn split_view_depth(near: f32, clip_range: f32, split: f32) -> f32 {
    -(near + split * clip_range)
}
