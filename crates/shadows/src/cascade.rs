use glam::{Mat4, Vec3};
use umbra_common::PerspectiveSettings;

use crate::error::ShadowConfigError;
use crate::fit::{fit_legacy, fit_stable, light_up_vector, measure_cascade, reference_point};
use crate::frustum::FrustumCorners;
use crate::settings::{CascadeStrategy, ShadowMappingSettings};
use crate::split::{cascade_splits, split_ranges, split_view_depth};

/// One cascade ready for the shadow and main passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cascade {
    /// Light-space view-projection used to render and sample this cascade.
    pub view_projection: Mat4,
    /// Camera-space depth of the cascade's far split plane (negative).
    pub split_depth: f32,
}

/// All cascades of one frame, ordered from nearest to farthest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowCascades {
    cascades: Vec<Cascade>,
}

impl ShadowCascades {
    pub fn len(&self) -> usize {
        self.cascades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cascades.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cascade> {
        self.cascades.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cascade> {
        self.cascades.iter()
    }

    pub fn as_slice(&self) -> &[Cascade] {
        &self.cascades
    }

    pub fn view_projections(&self) -> Vec<Mat4> {
        self.cascades.iter().map(|c| c.view_projection).collect()
    }

    pub fn split_depths(&self) -> Vec<f32> {
        self.cascades.iter().map(|c| c.split_depth).collect()
    }
}

impl<'a> IntoIterator for &'a ShadowCascades {
    type Item = &'a Cascade;
    type IntoIter = std::slice::Iter<'a, Cascade>;

    fn into_iter(self) -> Self::IntoIter {
        self.cascades.iter()
    }
}

/// Compute every cascade's light view-projection and split depth for the
/// current camera and light.
///
/// `inverse_view_projection` is the inverse of the camera's `projection * view`
/// and `view_dir` its forward direction. Zero cascades yields an empty result.
pub fn calculate_shadow_cascades(
    perspective: &PerspectiveSettings,
    inverse_view_projection: Mat4,
    settings: &ShadowMappingSettings,
    view_dir: Vec3,
) -> Result<ShadowCascades, ShadowConfigError> {
    let _span = tracing::trace_span!("shadow_cascades", count = settings.number_cascades).entered();

    if settings.number_cascades == 0 {
        return Ok(ShadowCascades::default());
    }
    settings.validate(perspective)?;
    if !inverse_view_projection.is_finite() {
        return Err(ShadowConfigError::NonFiniteInput {
            field: "inverse_view_projection",
        });
    }

    let near = perspective.near_plane;
    let clip_range = perspective.clip_range();
    let light_dir = settings.normalized_light_direction()?;

    let splits = cascade_splits(
        near,
        perspective.far_plane,
        settings.number_cascades,
        settings.cascade_splits_blend_factor,
    )?;
    let frustum = FrustumCorners::from_inverse_view_projection(inverse_view_projection);
    let slices: Vec<FrustumCorners> = split_ranges(&splits)
        .map(|(near_t, far_t)| frustum.slice(near_t, far_t))
        .collect();

    let view_projections: Vec<Mat4> = match settings.strategy() {
        CascadeStrategy::Legacy => {
            let up = light_up_vector(light_dir, view_dir, false);
            slices
                .iter()
                .map(|corners| {
                    fit_legacy(corners, light_dir, up, settings.light_camera_z_offset)
                        .fit
                        .view_projection()
                })
                .collect()
        }
        CascadeStrategy::Stable => {
            let up = light_up_vector(light_dir, view_dir, settings.cross_product_up);
            let anchor = slices[0].center();
            let extents: Vec<_> = slices
                .iter()
                .map(|corners| measure_cascade(corners, light_dir, up, anchor))
                .collect();
            let reference = reference_point(anchor, &extents, light_dir);
            extents
                .iter()
                .map(|e| fit_stable(e, reference, light_dir, up).view_projection())
                .collect()
        }
    };

    let cascades: Vec<Cascade> = view_projections
        .into_iter()
        .zip(&splits)
        .enumerate()
        .map(|(index, (view_projection, &split))| {
            let split_depth = split_view_depth(near, clip_range, split);
            tracing::trace!(index, split, split_depth, "cascade computed");
            Cascade {
                view_projection,
                split_depth,
            }
        })
        .collect();

    Ok(ShadowCascades { cascades })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MAX_CASCADES;

    fn scenario_perspective() -> PerspectiveSettings {
        PerspectiveSettings {
            fov: 45.0_f32.to_radians(),
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }

    fn scenario_settings(stable: bool) -> ShadowMappingSettings {
        ShadowMappingSettings {
            light_direction: Vec3::new(-0.452, -1.0, -0.095),
            number_cascades: 4,
            cascade_splits_blend_factor: 0.5,
            new_cascade_calculation: stable,
            cross_product_up: false,
            light_camera_z_offset: 0.0,
        }
    }

    /// Identity view: camera at the origin looking down -Z.
    fn identity_camera(perspective: &PerspectiveSettings) -> Mat4 {
        (perspective.projection(16.0 / 9.0) * Mat4::IDENTITY).inverse()
    }

    fn check_scenario(settings: &ShadowMappingSettings) {
        let perspective = scenario_perspective();
        let cascades = calculate_shadow_cascades(
            &perspective,
            identity_camera(&perspective),
            settings,
            Vec3::NEG_Z,
        )
        .unwrap();

        assert_eq!(cascades.len(), 4);
        for (i, c) in cascades.iter().enumerate() {
            let det = c.view_projection.determinant();
            assert!(det.is_finite() && det != 0.0, "cascade {i} singular");
            assert!(c.view_projection.is_finite());
        }
        let depths = cascades.split_depths();
        assert!(depths[0] < 0.0);
        for pair in depths.windows(2) {
            assert!(pair[1] < pair[0], "split depths not decreasing: {depths:?}");
        }
        assert!((depths[3] + 1000.0).abs() < 1e-2);
    }

    #[test]
    fn legacy_end_to_end() {
        check_scenario(&scenario_settings(false));
    }

    #[test]
    fn stable_end_to_end() {
        check_scenario(&scenario_settings(true));
    }

    #[test]
    fn stable_with_cross_product_up_end_to_end() {
        let settings = ShadowMappingSettings {
            cross_product_up: true,
            ..scenario_settings(true)
        };
        check_scenario(&settings);
    }

    #[test]
    fn cross_product_up_survives_parallel_view() {
        let perspective = scenario_perspective();
        let settings = ShadowMappingSettings {
            cross_product_up: true,
            light_direction: Vec3::NEG_Z,
            ..scenario_settings(true)
        };
        let cascades = calculate_shadow_cascades(
            &perspective,
            identity_camera(&perspective),
            &settings,
            Vec3::NEG_Z,
        )
        .unwrap();
        assert!(cascades.iter().all(|c| c.view_projection.is_finite()));
    }

    #[test]
    fn split_depths_match_split_calculator() {
        let perspective = scenario_perspective();
        let settings = scenario_settings(false);
        let cascades = calculate_shadow_cascades(
            &perspective,
            identity_camera(&perspective),
            &settings,
            Vec3::NEG_Z,
        )
        .unwrap();
        let splits = cascade_splits(0.1, 1000.0, 4, 0.5).unwrap();
        for (c, s) in cascades.iter().zip(splits) {
            assert_eq!(c.split_depth, -(0.1 + s * perspective.clip_range()));
        }
    }

    #[test]
    fn cascades_cover_their_slice() {
        let perspective = scenario_perspective();
        let inverse = identity_camera(&perspective);
        let settings = scenario_settings(true);
        let cascades =
            calculate_shadow_cascades(&perspective, inverse, &settings, Vec3::NEG_Z).unwrap();

        // A point on the camera axis just inside each cascade projects into
        // that cascade's shadow map.
        let mut near_depth = perspective.near_plane;
        for c in &cascades {
            let far_depth = -c.split_depth;
            let mid = Vec3::new(0.0, 0.0, -(near_depth + far_depth) * 0.5);
            let p = c.view_projection.project_point3(mid);
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0, "{p:?}");
            assert!((0.0..=1.0).contains(&p.z), "{p:?}");
            near_depth = far_depth;
        }
    }

    #[test]
    fn zero_cascades_is_noop() {
        let perspective = scenario_perspective();
        let settings = ShadowMappingSettings {
            number_cascades: 0,
            ..scenario_settings(false)
        };
        let cascades = calculate_shadow_cascades(
            &perspective,
            identity_camera(&perspective),
            &settings,
            Vec3::NEG_Z,
        )
        .unwrap();
        assert!(cascades.is_empty());
    }

    #[test]
    fn invalid_configuration_fails_fast() {
        let perspective = scenario_perspective();
        let inverse = identity_camera(&perspective);

        let too_many = ShadowMappingSettings {
            number_cascades: MAX_CASCADES + 1,
            ..scenario_settings(false)
        };
        assert!(matches!(
            calculate_shadow_cascades(&perspective, inverse, &too_many, Vec3::NEG_Z),
            Err(ShadowConfigError::TooManyCascades { .. })
        ));

        let dark = ShadowMappingSettings {
            light_direction: Vec3::ZERO,
            ..scenario_settings(true)
        };
        assert!(matches!(
            calculate_shadow_cascades(&perspective, inverse, &dark, Vec3::NEG_Z),
            Err(ShadowConfigError::DegenerateLightDirection { .. })
        ));

        let bad_near = PerspectiveSettings {
            near_plane: -1.0,
            ..perspective
        };
        assert!(matches!(
            calculate_shadow_cascades(&bad_near, inverse, &scenario_settings(false), Vec3::NEG_Z),
            Err(ShadowConfigError::NonPositiveNear { .. })
        ));

        let pulled_forward = ShadowMappingSettings {
            light_camera_z_offset: -1000.0,
            ..scenario_settings(false)
        };
        assert!(matches!(
            calculate_shadow_cascades(&perspective, inverse, &pulled_forward, Vec3::NEG_Z),
            Err(ShadowConfigError::NegativeLightCameraOffset { .. })
        ));
    }

    #[test]
    fn inverse_matrices_round_trip() {
        let perspective = scenario_perspective();
        let cascades = calculate_shadow_cascades(
            &perspective,
            identity_camera(&perspective),
            &scenario_settings(true),
            Vec3::NEG_Z,
        )
        .unwrap();
        for vp in cascades.view_projections() {
            let product = vp * vp.inverse();
            assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-2));
        }
    }
}
