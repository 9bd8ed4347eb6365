//! This crate provides the flat parameter set that drives every part of the scene.
//!
//! The configuration is owned by whatever UI sits on top of the scene. The scene only ever reads
//! a snapshot of it, either every frame (speeds, intensities, modes) or when it regenerates
//! geometry (counts, sizes, seeds). Nothing in here is ever written back to disk.
//!
//! Out-of-range values are never an error. [`SceneConfig::sanitised`] clamps every field to its
//! documented range and replaces non-finite floats with the default.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

mod modes;
mod sections;

pub use self::{
    modes::{ColourScheme, LightMode},
    sections::{
        DecorToggles, GiftsConfig, GroundConfig, LightingConfig, LoadingConfig, MoonConfig,
        SnowConfig, StarFieldConfig, StarsConfig, TreeConfig,
    },
};

/// An RGB colour as stored in the config.
pub type ConfigColour = [u8; 3];

/// An error that can occur when reading a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The RON text could not be parsed into a [`SceneConfig`].
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The config could not be rendered as RON.
    #[error("failed to serialize scene config: {0}")]
    Serialize(#[from] ron::Error),
}

/// The complete parameter set for the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// The seed for every random generator in the scene.
    ///
    /// `None` means the scene seeds itself from entropy, so geometry will differ between mounts.
    pub seed: Option<u64>,

    /// The garland lights.
    pub lighting: LightingConfig,

    /// The falling snow.
    pub snow: SnowConfig,

    /// Which decorations are enabled.
    pub decor: DecorToggles,

    /// The tree itself and its ornaments.
    pub tree: TreeConfig,

    /// The snowy ground.
    pub ground: GroundConfig,

    /// The presents under the tree.
    pub gifts: GiftsConfig,

    /// The individual twinkling stars in the sky.
    pub stars: StarsConfig,

    /// The distant star field.
    pub star_field: StarFieldConfig,

    /// The moon.
    pub moon: MoonConfig,

    /// The loading screen timing.
    pub loading: LoadingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            lighting: LightingConfig::default(),
            snow: SnowConfig::default(),
            decor: DecorToggles::default(),
            tree: TreeConfig::default(),
            ground: GroundConfig::default(),
            gifts: GiftsConfig::default(),
            stars: StarsConfig::default(),
            star_field: StarFieldConfig::default(),
            moon: MoonConfig::default(),
            loading: LoadingConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a config from RON text and sanitise it.
    ///
    /// Missing fields take their default values, so `"()"` is a valid config.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        Ok(config.sanitised())
    }

    /// Render this config as pretty RON with struct names.
    pub fn to_ron_pretty(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default().struct_names(true),
        )?)
    }

    /// Return a copy of this config with every field clamped to its valid range.
    #[must_use = ".sanitised() returns a new config and does not mutate in-place"]
    pub fn sanitised(&self) -> Self {
        Self {
            seed: self.seed,
            lighting: self.lighting.sanitised(),
            snow: self.snow.sanitised(),
            decor: self.decor,
            tree: self.tree.sanitised(),
            ground: self.ground.sanitised(),
            gifts: self.gifts.sanitised(),
            stars: self.stars.sanitised(),
            star_field: self.star_field.sanitised(),
            moon: self.moon.sanitised(),
            loading: self.loading.sanitised(),
        }
    }
}

/// Clamp a float field into `[min, max]`, falling back to `default` if it isn't finite.
pub(crate) fn clamp_f32(field: &'static str, value: f32, min: f32, max: f32, default: f32) -> f32 {
    if !value.is_finite() {
        warn!(field, ?value, default, "Replacing non-finite config value");
        return default;
    }

    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(field, value, clamped, "Clamping config value");
    }
    clamped
}

/// Clamp an integer field into `[min, max]`.
pub(crate) fn clamp_i32(field: &'static str, value: i32, min: i32, max: i32) -> i32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(field, value, clamped, "Clamping config value");
    }
    clamped
}
