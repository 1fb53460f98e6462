use umbra_shadows::{calculate_shadow_cascades, ShadowCascades, ShadowConfigError};

use crate::camera::FlyCamera;
use crate::settings::RenderSettings;
use crate::uniforms::{CascadePushConstants, ShadowUniforms};

/// Shadow data for one frame, computed before the shadow pass is recorded.
#[derive(Debug, Clone)]
pub struct ShadowFrame {
    pub camera: FlyCamera,
    pub settings: RenderSettings,
    pub cascades: ShadowCascades,
    pub uniforms: ShadowUniforms,
}

impl ShadowFrame {
    /// Derive this frame's cascades from the camera and render settings.
    ///
    /// The camera's own perspective is authoritative; `settings.perspective`
    /// is replaced by it so the record stays self-consistent.
    pub fn prepare(camera: &FlyCamera, settings: &RenderSettings) -> Result<Self, ShadowConfigError> {
        let _span = tracing::debug_span!("prepare_shadow_frame").entered();

        let cascades = calculate_shadow_cascades(
            &camera.perspective,
            camera.inverse_view_projection(),
            &settings.shadows,
            camera.view_dir(),
        )?;
        let uniforms = ShadowUniforms::from_cascades(&cascades);

        tracing::debug!(
            cascades = cascades.len(),
            strategy = ?settings.shadows.strategy(),
            "shadow frame prepared"
        );

        Ok(Self {
            camera: *camera,
            settings: RenderSettings {
                perspective: camera.perspective,
                shadows: settings.shadows,
            },
            cascades,
            uniforms,
        })
    }

    pub fn push_constants(&self) -> Vec<CascadePushConstants> {
        CascadePushConstants::for_cascades(&self.cascades)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a prepared frame and produces output. It never
/// recomputes or mutates the cascades.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one prepared frame.
    fn render(&self, frame: &ShadowFrame) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable dump of a frame's cascades. Useful for CLI
/// output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Include full view-projection matrices in the output.
    pub show_matrices: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matrices() -> Self {
        Self {
            show_matrices: true,
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &ShadowFrame) -> String {
        let mut out = String::new();
        let cam = &frame.camera;
        let p = cam.position;
        let d = cam.view_dir();
        let shadows = &frame.settings.shadows;

        out.push_str(&format!(
            "=== Shadow Frame (strategy={:?}, cascades={}) ===\n",
            shadows.strategy(),
            frame.cascades.len()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) dir=({:.2}, {:.2}, {:.2}) fov={:.0} near={} far={}\n",
            p.x,
            p.y,
            p.z,
            d.x,
            d.y,
            d.z,
            cam.perspective.fov.to_degrees(),
            cam.perspective.near_plane,
            cam.perspective.far_plane
        ));
        let l = shadows.light_direction;
        out.push_str(&format!(
            "Light: dir=({:.3}, {:.3}, {:.3}) blend={:.2}\n",
            l.x, l.y, l.z, shadows.cascade_splits_blend_factor
        ));

        for (i, cascade) in frame.cascades.iter().enumerate() {
            out.push_str(&format!(
                "  [{}] split={:.3} det={:.3e}\n",
                i,
                cascade.split_depth,
                cascade.view_projection.determinant()
            ));
            if self.show_matrices {
                for row in 0..4 {
                    let r = cascade.view_projection.row(row);
                    out.push_str(&format!(
                        "      [{:>10.5} {:>10.5} {:>10.5} {:>10.5}]\n",
                        r.x, r.y, r.z, r.w
                    ));
                }
            }
        }

        out
    }
}
