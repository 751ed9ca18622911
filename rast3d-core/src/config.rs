/// Renderer configuration, loadable from TOML
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::projection::{Camera, Viewport};

/// Resolution, camera and submission settings for a [`Renderer`](crate::Renderer)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub near: f64,
    pub far: f64,
    /// Vertical field of view in degrees
    pub fov: f64,
    /// Defaults to `width / height`
    pub aspect_ratio: Option<f64>,
    /// Push along +Z applied to every object before its own position
    pub forward_offset: f64,
    /// Submit each object's triangles far-to-near instead of in mesh order
    pub depth_sort: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            near: 0.1,
            far: 1000.0,
            fov: 90.0,
            aspect_ratio: None,
            forward_offset: 8.0,
            depth_sort: false,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
            .unwrap_or(self.width as f64 / self.height as f64)
    }

    pub fn camera(&self) -> Camera {
        Camera {
            near: self.near,
            far: self.far,
            fov: self.fov,
            aspect: self.aspect_ratio(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_toml(path)
    }
}

/// Read and deserialize a TOML file
pub fn load_toml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (1920, 1080));
        assert!((config.aspect_ratio() - 1920.0 / 1080.0).abs() < 1e-12);
        assert_eq!(config.forward_offset, 8.0);
        assert!(!config.depth_sort);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RenderConfig::from_toml_str("fov = 60.0\ndepth_sort = true\n").unwrap();
        assert_eq!(config.fov, 60.0);
        assert!(config.depth_sort);
        assert_eq!(config.near, 0.1);
        assert_eq!(config.width, 1920);
    }

    #[test]
    fn test_explicit_aspect_ratio() {
        let config =
            RenderConfig::from_toml_str("width = 800\nheight = 600\naspect_ratio = 1.0").unwrap();
        assert_eq!(config.aspect_ratio(), 1.0);
        assert_eq!(config.viewport(), Viewport::new(800, 600));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            RenderConfig::from_toml_str("width = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RenderConfig::load("/nonexistent/rast3d.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
