//! Rendering Adapter: the consumers of the shadow cascades.
//!
//! # Invariants
//! - Renderers never mutate camera or light state.
//! - Cascades for a frame are computed before its shadow pass and main pass
//!   read them; both passes see the same [`ShadowFrame`].
//!
//! Owns the render settings (YAML/JSON), the fly camera that supplies the
//! inverse view-projection, and the GPU-facing packing of cascade data.

mod camera;
mod renderer;
mod settings;
mod uniforms;

pub use camera::FlyCamera;
pub use renderer::{DebugTextRenderer, Renderer, ShadowFrame};
pub use settings::{RenderSettings, SettingsError};
pub use uniforms::{select_cascade, CascadePushConstants, ShadowUniforms};

pub fn crate_info() -> &'static str {
    "umbra-render v0.1.0"
}
