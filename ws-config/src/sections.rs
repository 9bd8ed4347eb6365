//! This module contains the individual sections of the [`SceneConfig`](crate::SceneConfig).

use crate::{clamp_f32, clamp_i32, ColourScheme, ConfigColour, LightMode};
use serde::{Deserialize, Serialize};

/// The config for the garland lights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Whether the lights (and the garland wire) are shown at all.
    pub on: bool,

    /// The animation pattern.
    pub mode: LightMode,

    /// The multiplier on each bulb's local clock. In `[0.1, 3]`.
    pub speed: f32,

    /// The global brightness multiplier. In `[0.1, 2]`.
    pub intensity: f32,

    /// The palette for the bulbs.
    pub colour_scheme: ColourScheme,

    /// How many garland strands wind around the tree. In `[1, 8]`.
    pub spirals: i32,

    /// How many bulbs sit on each strand. In `[2, 40]`.
    pub lights_per_spiral: i32,

    /// The colour of the garland wire.
    pub wire_colour: ConfigColour,

    /// The radius of the garland wire. In `[0.001, 0.05]`.
    pub wire_thickness: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            on: true,
            mode: LightMode::Static,
            speed: 1.,
            intensity: 1.,
            colour_scheme: ColourScheme::Multicolour,
            spirals: 3,
            lights_per_spiral: 15,
            wire_colour: [0xFF, 0xFF, 0xFF],
            wire_thickness: 0.005,
        }
    }
}

impl LightingConfig {
    pub(crate) fn sanitised(&self) -> Self {
        let d = Self::default();
        Self {
            speed: clamp_f32("lighting.speed", self.speed, 0.1, 3., d.speed),
            intensity: clamp_f32("lighting.intensity", self.intensity, 0.1, 2., d.intensity),
            spirals: clamp_i32("lighting.spirals", self.spirals, 1, 8),
            lights_per_spiral: clamp_i32(
                "lighting.lights_per_spiral",
                self.lights_per_spiral,
                2,
                40,
            ),
            wire_thickness: clamp_f32(
                "lighting.wire_thickness",
                self.wire_thickness,
                0.001,
                0.05,
                d.wire_thickness,
            ),
            ..self.clone()
        }
    }
}

/// The config for the falling snow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowConfig {
    /// Whether it's snowing.
    pub enabled: bool,

    /// The number of snowflakes. In `[100, 3000]`.
    pub count: i32,

    /// The multiplier on every flake's velocity. In `[0.1, 3]`.
    pub speed: f32,

    /// The base size of a flake. In `[0.01, 0.1]`.
    pub size: f32,

    /// How strongly the wind pushes flakes sideways. In `[0, 0.5]`.
    pub wind_strength: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 1000,
            speed: 1.,
            size: 0.02,
            wind_strength: 0.1,
        }
    }
}

impl SnowConfig {
    pub(crate) fn sanitised(&self) -> Self {
        let d = Self::default();
        Self {
            enabled: self.enabled,
            count: clamp_i32("snow.count", self.count, 100, 3000),
            speed: clamp_f32("snow.speed", self.speed, 0.1, 3., d.speed),
            size: clamp_f32("snow.size", self.size, 0.01, 0.1, d.size),
            wind_strength: clamp_f32(
                "snow.wind_strength",
                self.wind_strength,
                0.,
                0.5,
                d.wind_strength,
            ),
        }
    }
}

/// Toggles for the decorations around the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorToggles {
    /// The presents under the tree.
    pub gifts: bool,

    /// The twinkling stars in the sky.
    pub stars: bool,

    /// The distant star field.
    pub star_field: bool,

    /// The snowy ground.
    pub ground: bool,

    /// The moon.
    pub moon_sky: bool,
}

impl Default for DecorToggles {
    fn default() -> Self {
        Self {
            gifts: true,
            stars: true,
            star_field: true,
            ground: true,
            moon_sky: true,
        }
    }
}

/// The config for the tree and its ornaments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// The height the garland climbs to. In `[1, 20]`.
    pub height: f32,

    /// The radius that the garland and ornaments are placed around. In `[0.2, 5]`.
    pub radius: f32,

    /// Whether to hang ornaments on the tree.
    pub ornaments: bool,

    /// Whether ornaments and gifts respond to clicks and hovering.
    pub interactive: bool,

    /// Whether the whole tree slowly spins.
    pub rotate: bool,

    /// Radians per second when [`rotate`](Self::rotate) is on. In `[0, 3]`.
    pub rotation_speed: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            height: 5.5,
            radius: 1.2,
            ornaments: true,
            interactive: true,
            rotate: false,
            rotation_speed: 0.5,
        }
    }
}

impl TreeConfig {
    pub(crate) fn sanitised(&self) -> Self {
        let d = Self::default();
        Self {
            height: clamp_f32("tree.height", self.height, 1., 20., d.height),
            radius: clamp_f32("tree.radius", self.radius, 0.2, 5., d.radius),
            rotation_speed: clamp_f32(
                "tree.rotation_speed",
                self.rotation_speed,
                0.,
                3.,
                d.rotation_speed,
            ),
            ..self.clone()
        }
    }
}

/// The config for the snowy ground.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// The width and depth of the ground. In `[1, 200]`.
    pub size: f32,

    /// The number of subdivisions along each side of the fresh snow plane. In `[1, 256]`.
    pub segments: i32,

    /// Whether to add the deformed layer of fresh snow on top.
    pub snow_accumulation: bool,

    /// The combined thickness of all the layers. In `[0.01, 5]`.
    pub total_thickness: f32,

    /// The share of the thickness taken by the earth layer. In `[0, 1]`.
    pub base_thickness_ratio: f32,

    /// The share of the thickness taken by the compacted snow. In `[0, 1]`.
    pub compact_snow_thickness_ratio: f32,

    /// The share of the thickness taken by the fresh snow. In `[0, 1]`.
    pub fresh_snow_thickness_ratio: f32,

    /// The colour of the earth layer.
    pub base_colour: ConfigColour,

    /// The colour of the compacted snow.
    pub compact_snow_colour: ConfigColour,

    /// The colour of the fresh snow.
    pub fresh_snow_colour: ConfigColour,

    /// The base frequency of the relief noise. In `[0, 10]`.
    pub noise_scale: f32,

    /// The height of the relief noise. In `[0, 5]`.
    pub noise_intensity: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: 20.,
            segments: 64,
            snow_accumulation: true,
            total_thickness: 0.4,
            base_thickness_ratio: 0.7,
            compact_snow_thickness_ratio: 0.2,
            fresh_snow_thickness_ratio: 0.1,
            base_colour: [0x3A, 0x3A, 0x3A],
            compact_snow_colour: [0xE8, 0xE8, 0xE8],
            fresh_snow_colour: [0xFF, 0xFF, 0xFF],
            noise_scale: 0.3,
            noise_intensity: 0.3,
        }
    }
}

impl GroundConfig {
    pub(crate) fn sanitised(&self) -> Self {
        let d = Self::default();
        Self {
            size: clamp_f32("ground.size", self.size, 1., 200., d.size),
            segments: clamp_i32("ground.segments", self.segments, 1, 256),
            total_thickness: clamp_f32(
                "ground.total_thickness",
                self.total_thickness,
                0.01,
                5.,
                d.total_thickness,
            ),
            base_thickness_ratio: clamp_f32(
                "ground.base_thickness_ratio",
                self.base_thickness_ratio,
                0.,
                1.,
                d.base_thickness_ratio,
            ),
            compact_snow_thickness_ratio: clamp_f32(
                "ground.compact_snow_thickness_ratio",
                self.compact_snow_thickness_ratio,
                0.,
                1.,
                d.compact_snow_thickness_ratio,
            ),
            fresh_snow_thickness_ratio: clamp_f32(
                "ground.fresh_snow_thickness_ratio",
                self.fresh_snow_thickness_ratio,
                0.,
                1.,
                d.fresh_snow_thickness_ratio,
            ),
            noise_scale: clamp_f32("ground.noise_scale", self.noise_scale, 0., 10., d.noise_scale),
            noise_intensity: clamp_f32(
                "ground.noise_intensity",
                self.noise_intensity,
                0.,
                5.,
                d.noise_intensity,
            ),
            ..self.clone()
        }
    }
}

/// The config for the presents under the tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftsConfig {
    /// The number of presents. In `[0, 50]`.
    pub count: i32,
}

impl Default for GiftsConfig {
    fn default() -> Self {
        Self { count: 5 }
    }
}

impl GiftsConfig {
    pub(crate) fn sanitised(&self) -> Self {
        Self {
            count: clamp_i32("gifts.count", self.count, 0, 50),
        }
    }
}

/// The config for the twinkling stars in the sky.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarsConfig {
    /// The number of stars. In `[0, 2000]`.
    pub count: i32,

    /// The radius of the sky dome they sit on. In `[1, 500]`.
    pub radius: f32,

    /// The multiplier on every star's own twinkle speed. In `[0, 10]`.
    pub twinkle_speed: f32,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: 200,
            radius: 30.,
            twinkle_speed: 1.,
        }
    }
}

impl StarsConfig {
    pub(crate) fn sanitised(&self) -> Self {
        let d = Self::default();
        Self {
            count: clamp_i32("stars.count", self.count, 0, 2000),
            radius: clamp_f32("stars.radius", self.radius, 1., 500., d.radius),
            twinkle_speed: clamp_f32(
                "stars.twinkle_speed",
                self.twinkle_speed,
                0.,
                10.,
                d.twinkle_speed,
            ),
        }
    }
}

/// The config for the distant star field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    /// The number of stars. In `[0, 20000]`.
    pub count: i32,

    /// The outer radius of the shell the stars sit in. In `[1, 5000]` and never less than
    /// [`min_distance`](Self::min_distance).
    pub spread_distance: f32,

    /// The inner radius of the shell the stars sit in. In `[0, 5000]`.
    pub min_distance: f32,

    /// The angular frequency of the opacity pulse. In `[0, 10]`.
    pub twinkle_speed: f32,

    /// Radians per second that the whole field turns. In `[0, 1]`.
    pub rotation_speed: f32,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            spread_distance: 200.,
            min_distance: 20.,
            twinkle_speed: 0.5,
            rotation_speed: 0.01,
        }
    }
}

impl StarFieldConfig {
    pub(crate) fn sanitised(&self) -> Self {
        let d = Self::default();
        let min_distance = clamp_f32(
            "star_field.min_distance",
            self.min_distance,
            0.,
            5000.,
            d.min_distance,
        );
        let spread_distance = clamp_f32(
            "star_field.spread_distance",
            self.spread_distance,
            1.,
            5000.,
            d.spread_distance,
        )
        .max(min_distance);

        Self {
            count: clamp_i32("star_field.count", self.count, 0, 20_000),
            spread_distance,
            min_distance,
            twinkle_speed: clamp_f32(
                "star_field.twinkle_speed",
                self.twinkle_speed,
                0.,
                10.,
                d.twinkle_speed,
            ),
            rotation_speed: clamp_f32(
                "star_field.rotation_speed",
                self.rotation_speed,
                0.,
                1.,
                d.rotation_speed,
            ),
        }
    }
}

/// The config for the moon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
    /// Where the moon hangs in the sky.
    pub position: [f32; 3],

    /// The radius of the moon. In `[0.1, 10]`.
    pub size: f32,

    /// The peak brightness of the glow. In `[0, 5]`.
    pub glow_intensity: f32,
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            position: [8., 8., -10.],
            size: 1.5,
            glow_intensity: 0.5,
        }
    }
}

impl MoonConfig {
    pub(crate) fn sanitised(&self) -> Self {
        let d = Self::default();
        let [x, y, z] = self.position;
        let [dx, dy, dz] = d.position;
        Self {
            position: [
                clamp_f32("moon.position.x", x, -1000., 1000., dx),
                clamp_f32("moon.position.y", y, -1000., 1000., dy),
                clamp_f32("moon.position.z", z, -1000., 1000., dz),
            ],
            size: clamp_f32("moon.size", self.size, 0.1, 10., d.size),
            glow_intensity: clamp_f32(
                "moon.glow_intensity",
                self.glow_intensity,
                0.,
                5.,
                d.glow_intensity,
            ),
        }
    }
}

/// The config for the loading screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// The minimum number of seconds that the loading screen stays up. In `[0, 30]`.
    pub min_display_secs: f32,

    /// The extra seconds between the scene being ready and the signal firing. In `[0, 10]`.
    pub transition_delay_secs: f32,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            min_display_secs: 2.,
            transition_delay_secs: 0.5,
        }
    }
}

impl LoadingConfig {
    pub(crate) fn sanitised(&self) -> Self {
        let d = Self::default();
        Self {
            min_display_secs: clamp_f32(
                "loading.min_display_secs",
                self.min_display_secs,
                0.,
                30.,
                d.min_display_secs,
            ),
            transition_delay_secs: clamp_f32(
                "loading.transition_delay_secs",
                self.transition_delay_secs,
                0.,
                10.,
                d.transition_delay_secs,
            ),
        }
    }
}

/// Convert a sanitised count into a length.
pub(crate) fn count_to_len(count: i32) -> usize {
    usize::try_from(count).unwrap_or(0)
}

impl SnowConfig {
    /// The number of flakes as a length.
    pub fn particle_count(&self) -> usize {
        count_to_len(self.count)
    }
}

impl StarFieldConfig {
    /// The number of stars as a length.
    pub fn particle_count(&self) -> usize {
        count_to_len(self.count)
    }
}

impl StarsConfig {
    /// The number of stars as a length.
    pub fn star_count(&self) -> usize {
        count_to_len(self.count)
    }
}

impl GiftsConfig {
    /// The number of gifts as a length.
    pub fn gift_count(&self) -> usize {
        count_to_len(self.count)
    }
}

impl LightingConfig {
    /// The number of strands as a length.
    pub fn spiral_count(&self) -> usize {
        count_to_len(self.spirals)
    }

    /// The number of bulbs per strand as a length.
    pub fn bulbs_per_spiral(&self) -> usize {
        count_to_len(self.lights_per_spiral)
    }
}

impl GroundConfig {
    /// The number of plane subdivisions as a length.
    pub fn segment_count(&self) -> usize {
        count_to_len(self.segments)
    }
}
