use glam::Vec3;
use serde::{Deserialize, Serialize};
use umbra_common::PerspectiveSettings;

use crate::error::ShadowConfigError;

/// Upper bound on cascades; sizes every per-cascade GPU array.
pub const MAX_CASCADES: usize = 4;

/// How each cascade's light-space volume is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CascadeStrategy {
    /// Independent bounding sphere per cascade, centered on the slice.
    Legacy,
    /// Tight per-axis box per cascade, all light cameras anchored to one
    /// shared reference plane along the light direction.
    Stable,
}

/// Directional light shadow configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowMappingSettings {
    /// Direction the light travels. Normalized before use.
    pub light_direction: Vec3,
    /// Zero disables shadows.
    pub number_cascades: usize,
    /// 0 = uniform splits, 1 = logarithmic splits.
    pub cascade_splits_blend_factor: f32,
    /// Selects [`CascadeStrategy::Stable`] instead of [`CascadeStrategy::Legacy`].
    pub new_cascade_calculation: bool,
    /// Stable strategy only: derive the light camera's up vector from
    /// `cross(view_dir, light_dir)` instead of world up.
    pub cross_product_up: bool,
    /// Legacy strategy only: extra distance the light camera is pulled back
    /// toward the light, extending the depth range by the same amount.
    /// Must not be negative.
    pub light_camera_z_offset: f32,
}

impl Default for ShadowMappingSettings {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(-0.452, -1.0, -0.095),
            number_cascades: MAX_CASCADES,
            cascade_splits_blend_factor: 0.5,
            new_cascade_calculation: false,
            cross_product_up: false,
            light_camera_z_offset: 0.0,
        }
    }
}

impl ShadowMappingSettings {
    pub fn strategy(&self) -> CascadeStrategy {
        if self.new_cascade_calculation {
            CascadeStrategy::Stable
        } else {
            CascadeStrategy::Legacy
        }
    }

    /// Unit light direction, or an error when the vector is zero or non-finite.
    pub fn normalized_light_direction(&self) -> Result<Vec3, ShadowConfigError> {
        self.light_direction
            .try_normalize()
            .ok_or(ShadowConfigError::DegenerateLightDirection {
                direction: self.light_direction.to_array(),
            })
    }

    /// Check these settings against the camera they will be used with.
    pub fn validate(&self, perspective: &PerspectiveSettings) -> Result<(), ShadowConfigError> {
        validate_perspective(perspective)?;
        if self.number_cascades > MAX_CASCADES {
            return Err(ShadowConfigError::TooManyCascades {
                count: self.number_cascades,
            });
        }
        validate_blend(self.cascade_splits_blend_factor)?;
        if !self.light_camera_z_offset.is_finite() {
            return Err(ShadowConfigError::NonFiniteInput {
                field: "light_camera_z_offset",
            });
        }
        if self.light_camera_z_offset < 0.0 {
            return Err(ShadowConfigError::NegativeLightCameraOffset {
                offset: self.light_camera_z_offset,
            });
        }
        self.normalized_light_direction()?;
        Ok(())
    }
}

pub(crate) fn validate_perspective(
    perspective: &PerspectiveSettings,
) -> Result<(), ShadowConfigError> {
    validate_planes(perspective.near_plane, perspective.far_plane)
}

pub(crate) fn validate_planes(near: f32, far: f32) -> Result<(), ShadowConfigError> {
    if !near.is_finite() {
        return Err(ShadowConfigError::NonFiniteInput { field: "near_plane" });
    }
    if !far.is_finite() {
        return Err(ShadowConfigError::NonFiniteInput { field: "far_plane" });
    }
    if near <= 0.0 {
        return Err(ShadowConfigError::NonPositiveNear { near });
    }
    if near >= far {
        return Err(ShadowConfigError::NearNotBeforeFar { near, far });
    }
    Ok(())
}

pub(crate) fn validate_blend(blend: f32) -> Result<(), ShadowConfigError> {
    if !(0.0..=1.0).contains(&blend) {
        return Err(ShadowConfigError::BlendFactorOutOfRange { blend });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = ShadowMappingSettings::default();
        assert_eq!(settings.number_cascades, 4);
        assert_eq!(settings.strategy(), CascadeStrategy::Legacy);
        assert!(settings.validate(&PerspectiveSettings::default()).is_ok());
    }

    #[test]
    fn flag_selects_stable_strategy() {
        let settings = ShadowMappingSettings {
            new_cascade_calculation: true,
            ..Default::default()
        };
        assert_eq!(settings.strategy(), CascadeStrategy::Stable);
    }

    #[test]
    fn light_direction_is_normalized() {
        let settings = ShadowMappingSettings {
            light_direction: Vec3::new(0.0, -4.0, 0.0),
            ..Default::default()
        };
        let dir = settings.normalized_light_direction().unwrap();
        assert!(dir.abs_diff_eq(Vec3::NEG_Y, 1e-6));
    }

    #[test]
    fn zero_light_direction_is_rejected() {
        let settings = ShadowMappingSettings {
            light_direction: Vec3::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(&PerspectiveSettings::default()),
            Err(ShadowConfigError::DegenerateLightDirection { .. })
        ));
    }

    #[test]
    fn too_many_cascades_is_rejected() {
        let settings = ShadowMappingSettings {
            number_cascades: MAX_CASCADES + 1,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(&PerspectiveSettings::default()),
            Err(ShadowConfigError::TooManyCascades { count: 5 })
        );
    }

    #[test]
    fn bad_planes_are_rejected() {
        let settings = ShadowMappingSettings::default();
        let zero_near = PerspectiveSettings {
            near_plane: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(&zero_near),
            Err(ShadowConfigError::NonPositiveNear { .. })
        ));

        let inverted = PerspectiveSettings {
            near_plane: 10.0,
            far_plane: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(&inverted),
            Err(ShadowConfigError::NearNotBeforeFar { .. })
        ));
    }

    #[test]
    fn blend_outside_unit_range_is_rejected() {
        let settings = ShadowMappingSettings {
            cascade_splits_blend_factor: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(&PerspectiveSettings::default()),
            Err(ShadowConfigError::BlendFactorOutOfRange { .. })
        ));
    }

    #[test]
    fn negative_z_offset_is_rejected() {
        let settings = ShadowMappingSettings {
            light_camera_z_offset: -1000.0,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(&PerspectiveSettings::default()),
            Err(ShadowConfigError::NegativeLightCameraOffset { offset: -1000.0 })
        );

        let nan = ShadowMappingSettings {
            light_camera_z_offset: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(&PerspectiveSettings::default()),
            Err(ShadowConfigError::NonFiniteInput { .. })
        ));

        let positive = ShadowMappingSettings {
            light_camera_z_offset: 5.0,
            ..Default::default()
        };
        assert!(positive.validate(&PerspectiveSettings::default()).is_ok());
    }
}
