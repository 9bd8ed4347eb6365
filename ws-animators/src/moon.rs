//! This module contains the moon and its glow.

use glam::Vec3;
use rand::Rng;
use tracing::{debug, instrument};
use ws_animator_trait::{Animator, FrameTime};
use ws_config::MoonConfig;
use ws_geometry::{
    colour::rgb,
    placement::{self, CraterPlacement},
    RGBArray,
};

/// The colour of the face of the moon.
pub const MOON_COLOUR: RGBArray = rgb(0xF0E68C);

/// The colour of the glow around the moon.
pub const GLOW_COLOUR: RGBArray = rgb(0xFFEAA7);

/// The colour of the craters.
pub const CRATER_COLOUR: RGBArray = rgb(0xD4AF37);

/// The glow sphere is this much bigger than the moon.
const GLOW_SCALE: f32 = 1.3;

/// How fast the moon spins, in radians per second.
const SPIN_SPEED: f32 = 0.05;

/// The brightness multiplier of the moon at time `elapsed`.
///
/// The glow material and the moonlight both follow this curve.
pub fn moon_pulse(elapsed: f32) -> f32 {
    0.9 + 0.1 * (elapsed * 0.5).sin()
}

/// The moon, its craters and the light it casts.
#[derive(Clone, Debug, PartialEq)]
pub struct Moon {
    /// The centre of the moon.
    pub position: Vec3,

    /// The radius of the moon.
    pub size: f32,

    /// The radius of the glow sphere.
    pub glow_radius: f32,

    /// The craters on the face.
    pub craters: Vec<CraterPlacement>,

    /// The current spin about the y axis.
    pub rotation_y: f32,

    /// The current emissive intensity of the glow sphere.
    pub glow_emissive: f32,

    /// The current intensity of the moonlight.
    pub light_intensity: f32,
}

impl Moon {
    /// Build the moon and scatter its craters.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(config: &MoonConfig, rng: &mut R) -> Self {
        let craters = placement::craters(rng, config.size);
        let brightness = config.glow_intensity * moon_pulse(0.);

        debug!(craters = craters.len(), "Generated moon");
        Self {
            position: Vec3::from_array(config.position),
            size: config.size,
            glow_radius: config.size * GLOW_SCALE,
            craters,
            rotation_y: 0.,
            glow_emissive: brightness,
            light_intensity: brightness,
        }
    }
}

impl Animator for Moon {
    type Config = MoonConfig;

    fn tick(&mut self, time: FrameTime, config: &MoonConfig) {
        self.rotation_y += SPIN_SPEED * time.delta;

        let brightness = config.glow_intensity * moon_pulse(time.elapsed);
        self.glow_emissive = brightness;
        self.light_intensity = brightness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generate_test() {
        let config = MoonConfig::default();
        let moon = Moon::generate(&config, &mut StdRng::seed_from_u64(12345));

        assert_eq!(moon.position, Vec3::new(8., 8., -10.));
        assert!(approx_eq!(f32, moon.glow_radius, 1.95, epsilon = 1e-6));
        assert_eq!(moon.craters.len(), placement::CRATER_COUNT);
    }

    #[test]
    fn pulse_range_test() {
        for i in 0..10_000 {
            let pulse = moon_pulse(i as f32 * 0.01);
            assert!((0.8..=1.).contains(&pulse), "{pulse}");
        }
        assert_eq!(moon_pulse(0.), 0.9);
    }

    #[test]
    fn glow_and_light_stay_in_lockstep_test() {
        let config = MoonConfig {
            glow_intensity: 1.,
            ..MoonConfig::default()
        };
        let mut moon = Moon::generate(&config, &mut StdRng::seed_from_u64(12345));

        let mut time = FrameTime::default();
        for _ in 0..2000 {
            time = time.advanced(1. / 60.);
            moon.tick(time, &config);

            assert!(approx_eq!(f32, moon.glow_emissive, moon.light_intensity, ulps = 1));
            assert!(approx_eq!(
                f32,
                moon.light_intensity,
                moon_pulse(time.elapsed),
                ulps = 2
            ));
        }

        assert!(approx_eq!(f32, moon.rotation_y, 0.05 * 2000. / 60., epsilon = 1e-3));
    }
}
