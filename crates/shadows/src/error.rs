use crate::settings::MAX_CASCADES;

/// Configuration rejected before any cascade math runs.
///
/// All of these are caller errors. The cascade computation itself has no
/// runtime failure path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShadowConfigError {
    #[error("near plane must be positive, got {near}")]
    NonPositiveNear { near: f32 },
    #[error("near plane ({near}) must be closer than far plane ({far})")]
    NearNotBeforeFar { near: f32, far: f32 },
    #[error("at most {} cascades are supported, got {count}", MAX_CASCADES)]
    TooManyCascades { count: usize },
    #[error("cascade split blend factor must lie in [0, 1], got {blend}")]
    BlendFactorOutOfRange { blend: f32 },
    #[error("light direction cannot be normalized: {direction:?}")]
    DegenerateLightDirection { direction: [f32; 3] },
    #[error("light camera z offset must not be negative, got {offset}")]
    NegativeLightCameraOffset { offset: f32 },
    #[error("near ({near}) and far ({far}) are too close to split into {count} cascades")]
    DepthRangeTooNarrow { near: f32, far: f32, count: usize },
    #[error("non-finite value in {field}")]
    NonFiniteInput { field: &'static str },
}
