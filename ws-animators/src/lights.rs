//! This module contains the garland lights and their animation modes.

use glam::Vec3;
use tracing::{debug, instrument, trace};
use ws_animator_trait::{sanitise_delta, Animator, FrameTime};
use ws_config::{ColourScheme, LightMode, LightingConfig};
use ws_geometry::{colour::rgb, RGBArray, SpiralParams};

/// Bulbs only glow when their intensity is strictly above this.
pub const EMISSIVE_THRESHOLD: f32 = 0.5;

/// How strongly a lit bulb glows relative to its intensity.
const EMISSIVE_SCALE: f32 = 0.8;

/// The length of the chase pattern, in bulbs.
const CHASE_LENGTH: i64 = 50;

const MULTICOLOUR: [RGBArray; 8] = [
    rgb(0xFF0000),
    rgb(0x00FF00),
    rgb(0x0000FF),
    rgb(0xFFFF00),
    rgb(0xFF00FF),
    rgb(0x00FFFF),
    rgb(0xFFA500),
    rgb(0xFF1493),
];
const RED: [RGBArray; 3] = [rgb(0xFF0000), rgb(0xCC0000), rgb(0x990000)];
const BLUE: [RGBArray; 3] = [rgb(0x0000FF), rgb(0x0080FF), rgb(0x00BFFF)];
const WARM: [RGBArray; 4] = [rgb(0xFF4500), rgb(0xFF6347), rgb(0xFFA500), rgb(0xFFD700)];
const COOL: [RGBArray; 4] = [rgb(0x00CED1), rgb(0x1E90FF), rgb(0x9370DB), rgb(0x00BFFF)];

/// The bulb colours for a colour scheme.
pub fn palette(scheme: ColourScheme) -> &'static [RGBArray] {
    match scheme {
        ColourScheme::Multicolour => &MULTICOLOUR,
        ColourScheme::Red => &RED,
        ColourScheme::Blue => &BLUE,
        ColourScheme::Warm => &WARM,
        ColourScheme::Cool => &COOL,
    }
}

/// The brightness of a bulb before the global intensity is applied.
///
/// `local_time` is the bulb's own clock, `index` is its position along the whole chain, and `y`
/// is its height.
pub fn mode_intensity(mode: LightMode, local_time: f32, index: usize, y: f32) -> f32 {
    let t = local_time;
    let i = index as f32;

    match mode {
        LightMode::Static => 1.,
        LightMode::Twinkle => 0.3 + 0.7 * (0.5 + 0.5 * (5. * t + i).sin()),
        LightMode::Cascade => 0.5 + 0.5 * (0.5 * (t - 0.1 * i)).sin(),
        LightMode::Wave => 0.4 + 0.6 * (0.5 + 0.5 * (2. * t + 0.5 * y + 0.3 * i).sin()),
        LightMode::Chase => {
            let head = ((2. * t).floor() as i64).rem_euclid(CHASE_LENGTH);
            if (head - index as i64).abs() < 3 {
                1.
            } else {
                0.2
            }
        }
    }
}

/// What a bulb is emitting this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BulbEmission {
    /// The intensity of the bulb's point light.
    pub light_intensity: f32,

    /// How strongly the bulb's glass glows. Zero unless the bulb is bright enough.
    pub emissive_intensity: f32,
}

/// Turn a mode intensity into what the bulb emits.
///
/// The glass glow is a hard cutover at [`EMISSIVE_THRESHOLD`], not a fade.
pub fn emission(mode_intensity: f32, global_intensity: f32) -> BulbEmission {
    BulbEmission {
        light_intensity: mode_intensity * global_intensity,
        emissive_intensity: if mode_intensity > EMISSIVE_THRESHOLD {
            mode_intensity * EMISSIVE_SCALE
        } else {
            0.
        },
    }
}

/// One bulb on the garland.
#[derive(Clone, Debug, PartialEq)]
pub struct LightBulb {
    /// Where the bulb hangs.
    pub position: Vec3,

    /// The bulb's colour.
    pub colour: RGBArray,

    /// The bulb's position along the whole chain, counting every spiral.
    pub index: usize,

    /// The bulb's own clock, which runs at the configured speed.
    local_time: f32,

    /// What the bulb emitted on the last frame.
    emission: BulbEmission,
}

impl LightBulb {
    /// The bulb's own clock.
    pub fn local_time(&self) -> f32 {
        self.local_time
    }

    /// What the bulb emitted on the last frame.
    pub fn emission(&self) -> BulbEmission {
        self.emission
    }

    /// Advance the bulb's clock and work out what it emits.
    pub fn advance(&mut self, delta: f32, config: &LightingConfig) {
        self.local_time += sanitise_delta(delta) * config.speed;
        let intensity = mode_intensity(config.mode, self.local_time, self.index, self.position.y);
        self.emission = emission(intensity, config.intensity);
    }
}

/// Every bulb on every spiral.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeLights {
    /// The bulbs, spiral by spiral.
    bulbs: Vec<LightBulb>,

    /// The spirals the bulbs were placed on.
    params: SpiralParams,

    /// The scheme the bulbs are coloured with.
    scheme: ColourScheme,
}

impl TreeLights {
    /// Hang bulbs along every spiral.
    #[instrument]
    pub fn new(params: SpiralParams, scheme: ColourScheme) -> Self {
        let colours = palette(scheme);
        let bulbs: Vec<_> = (0..params.spirals)
            .flat_map(|spiral| {
                (0..params.lights_per_spiral).map(move |i| LightBulb {
                    position: params.point(spiral, i),
                    colour: colours[i % colours.len()],
                    index: spiral * params.lights_per_spiral + i,
                    local_time: 0.,
                    emission: BulbEmission::default(),
                })
            })
            .collect();

        debug!(count = bulbs.len(), "Hung tree lights");
        Self {
            bulbs,
            params,
            scheme,
        }
    }

    /// The bulbs.
    pub fn bulbs(&self) -> &[LightBulb] {
        &self.bulbs
    }

    /// The spirals the bulbs were placed on.
    pub fn params(&self) -> SpiralParams {
        self.params
    }

    /// The scheme the bulbs are coloured with.
    pub fn scheme(&self) -> ColourScheme {
        self.scheme
    }

    /// Recolour every bulb without touching its clock.
    pub fn set_scheme(&mut self, scheme: ColourScheme) {
        if scheme == self.scheme {
            return;
        }

        let colours = palette(scheme);
        for bulb in &mut self.bulbs {
            bulb.colour = colours[(bulb.index % self.params.lights_per_spiral) % colours.len()];
        }
        self.scheme = scheme;
    }
}

impl Animator for TreeLights {
    type Config = LightingConfig;

    fn tick(&mut self, time: FrameTime, config: &LightingConfig) {
        for bulb in &mut self.bulbs {
            bulb.advance(time.delta, config);
        }
        trace!(mode = %config.mode, "Animated tree lights");
    }
}
