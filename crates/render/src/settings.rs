use std::path::Path;

use serde::{Deserialize, Serialize};
use umbra_common::PerspectiveSettings;
use umbra_shadows::{ShadowConfigError, ShadowMappingSettings};

/// Errors from loading render settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported settings file extension: {0:?}")]
    UnsupportedFormat(String),
    #[error("invalid shadow configuration: {0}")]
    Invalid(#[from] ShadowConfigError),
}

/// Render configuration owned by the render context.
///
/// Missing fields take their defaults, so a file may override only the
/// settings it cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub perspective: PerspectiveSettings,
    pub shadows: ShadowMappingSettings,
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.shadows.validate(&self.perspective)?;
        Ok(())
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;

        let settings = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(SettingsError::UnsupportedFormat(extension)),
        };
        tracing::info!(
            path = %path.display(),
            cascades = settings.shadows.number_cascades,
            strategy = ?settings.shadows.strategy(),
            "loaded render settings"
        );
        Ok(settings)
    }

    pub fn to_yaml_string(&self) -> Result<String, SettingsError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
