//! Cascaded shadow maps: split scheme, frustum slicing and light-space fitting.
//!
//! # Invariants
//! - Pure, synchronous and stateless: outputs derive only from the current
//!   camera and light configuration and are recomputed every frame.
//! - Cascades are contiguous: cascade `i + 1` starts exactly where `i` ends.
//! - Cascade counts never exceed [`MAX_CASCADES`].
//!
//! Data flow: [`cascade_splits`] -> [`FrustumCorners::slice`] -> one of the
//! fitting strategies in [`fit`] -> [`ShadowCascades`].

mod cascade;
mod error;
pub mod fit;
mod frustum;
mod settings;
mod split;

pub use cascade::{calculate_shadow_cascades, Cascade, ShadowCascades};
pub use error::ShadowConfigError;
pub use fit::{LightFit, WORLD_UP};
pub use frustum::{project_clip_corner, FrustumCorners, CLIP_CORNERS};
pub use settings::{CascadeStrategy, ShadowMappingSettings, MAX_CASCADES};
pub use split::{cascade_splits, split_ranges, split_view_depth};

pub fn crate_info() -> &'static str {
    "umbra-shadows v0.1.0"
}
