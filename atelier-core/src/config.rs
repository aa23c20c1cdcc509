//! Configuration shared by the texture synthesizer and the configurator.
//!
//! Every field has a default, so a partial JSON document only overrides
//! what it names.

use std::path::Path;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::camera::CameraPose;
use crate::math::{Degree, Radians};

/// Default edge length, in pixels, of synthesized surface textures.
pub const DEFAULT_TEXTURE_RESOLUTION: u32 = 1024;

/// Default number of synthesized textures kept alive by the cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Width and height of every synthesized texture.
    pub resolution: u32,
    /// Global seed mixed into every texture. `None` uses the built-in seed.
    pub seed: Option<u64>,
    /// Maximum number of cached textures, 0 disables caching.
    pub cache_capacity: usize,
    /// How many times the color map repeats across a part.
    pub map_repeat: f32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_TEXTURE_RESOLUTION,
            seed: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            map_repeat: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: Degree,
    pub aspect_ratio: f32,
    /// Extra distance, as a fraction of the model radius, added to a whole model fit.
    pub fit_padding: f32,
    /// Fraction of the largest part dimension kept in view when focusing a part.
    pub focus_closeness: f32,
    /// Progress added per frame by focus and fit animations.
    pub focus_step: f32,
    /// Progress added per frame by the reset animation.
    pub reset_step: f32,
    pub default_position: Vec3,
    pub default_target: Vec3,
    /// Auto-rotate speed in radians per second.
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: Degree::from(75.0),
            aspect_ratio: 16.0 / 9.0,
            fit_padding: 0.5,
            focus_closeness: 0.55,
            focus_step: 0.04,
            reset_step: 0.03,
            default_position: Vec3::new(5.0, 3.0, 5.0),
            default_target: Vec3::ZERO,
            auto_rotate_speed: 0.5,
        }
    }
}

impl CameraConfig {
    #[inline]
    pub fn fov_y(&self) -> Radians {
        self.fov_y_degrees.clamp(Degree::from(1.0), Degree::from(179.0)).into()
    }

    #[inline]
    pub fn default_pose(&self) -> CameraPose {
        CameraPose::new(self.default_position, self.default_target)
    }
}

/// Placement of the loaded model in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub scale: f32,
    pub offset: Vec3,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scale: 1.8,
            offset: Vec3::new(0.0, -0.3, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    pub texture: TextureConfig,
    pub camera: CameraConfig,
    pub model: ModelConfig,
    /// Focus the camera on a part when it is clicked.
    pub zoom_on_click: bool,
    pub auto_rotate: bool,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            texture: TextureConfig::default(),
            camera: CameraConfig::default(),
            model: ModelConfig::default(),
            zoom_on_click: true,
            auto_rotate: false,
        }
    }
}

impl ConfiguratorConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = crate::file::load_to_string(path)?;
        Self::from_json_str(&json)
    }
}
