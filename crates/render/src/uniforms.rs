use bytemuck::{Pod, Zeroable};
use umbra_shadows::{ShadowCascades, MAX_CASCADES};

/// Per-frame shadow data read by the main pass.
///
/// Slots past `cascade_count` are zeroed.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShadowUniforms {
    pub view_projections: [[[f32; 4]; 4]; MAX_CASCADES],
    pub split_depths: [f32; MAX_CASCADES],
    pub cascade_count: u32,
    pub _padding: [u32; 3],
}

impl ShadowUniforms {
    pub fn from_cascades(cascades: &ShadowCascades) -> Self {
        let mut uniforms = Self::zeroed();
        for (i, cascade) in cascades.iter().take(MAX_CASCADES).enumerate() {
            uniforms.view_projections[i] = cascade.view_projection.to_cols_array_2d();
            uniforms.split_depths[i] = cascade.split_depth;
        }
        uniforms.cascade_count = cascades.len().min(MAX_CASCADES) as u32;
        uniforms
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn active_split_depths(&self) -> &[f32] {
        let count = (self.cascade_count as usize).min(MAX_CASCADES);
        &self.split_depths[..count]
    }
}

/// Push constants for one draw of the shadow depth pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CascadePushConstants {
    pub view_projection: [[f32; 4]; 4],
    pub cascade_index: u32,
    pub _padding: [u32; 3],
}

impl CascadePushConstants {
    /// One entry per cascade, in cascade order.
    pub fn for_cascades(cascades: &ShadowCascades) -> Vec<Self> {
        cascades
            .iter()
            .enumerate()
            .map(|(i, c)| Self {
                view_projection: c.view_projection.to_cols_array_2d(),
                cascade_index: i as u32,
                _padding: [0; 3],
            })
            .collect()
    }
}

/// Cascade a fragment samples, given its camera-space depth (negative in
/// front of the camera) and the ordered split depths.
///
/// Mirrors the main pass shader: the index is the number of non-final split
/// planes the fragment lies beyond. Fragments past the last split use the
/// last cascade.
pub fn select_cascade(view_space_depth: f32, split_depths: &[f32]) -> usize {
    let inner = split_depths.len().saturating_sub(1);
    split_depths[..inner]
        .iter()
        .filter(|&&split| view_space_depth < split)
        .count()
}
