//! This module contains the [`Snow`] particle system.

use crate::ParticleSet;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, instrument, trace};
use ws_animator_trait::{sanitise_delta, Animator, FrameTime};
use ws_config::SnowConfig;
use ws_geometry::uniform;

/// Flakes that fall below this height are sent back to the top.
const FLOOR: f32 = -5.;

/// Flakes that drift further than this from the centre on x or z are pulled back in.
const HORIZONTAL_BOUND: f32 = 15.;

/// The parameters that the snow's buffers are generated from.
///
/// Changing any of these means the snow has to be generated again. Everything else in
/// [`SnowConfig`] is read fresh every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowKey {
    /// The number of flakes.
    pub count: usize,

    /// The base flake size.
    pub size: f32,

    /// The wind strength used to seed the sideways velocities.
    pub wind_strength: f32,
}

impl SnowKey {
    /// Read the key out of the config.
    pub fn from_config(config: &SnowConfig) -> Self {
        Self {
            count: config.particle_count(),
            size: config.size,
            wind_strength: config.wind_strength,
        }
    }
}

/// A box of snowflakes falling through the scene, recycled forever.
#[derive(Clone, Debug)]
pub struct Snow {
    /// The flakes.
    particles: ParticleSet,

    /// The RNG used to respawn flakes.
    rng: StdRng,

    /// What the flakes were generated from.
    key: SnowKey,
}

impl Snow {
    /// Scatter flakes through the volume above the scene.
    ///
    /// The snow takes its own RNG seeded from `rng`, which it uses to respawn flakes later.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(key: SnowKey, rng: &mut R) -> Self {
        let mut particles = ParticleSet::zeroed(key.count, true, false);

        for i in 0..key.count {
            let i3 = i * 3;

            particles.positions[i3] = uniform(rng, -10., 10.);
            particles.positions[i3 + 1] = uniform(rng, 5., 35.);
            particles.positions[i3 + 2] = uniform(rng, -10., 10.);

            particles.velocities[i3] = uniform(rng, -0.5, 0.5) * key.wind_strength;
            particles.velocities[i3 + 1] = uniform(rng, -1., -0.5);
            particles.velocities[i3 + 2] = uniform(rng, -0.5, 0.5) * key.wind_strength;

            particles.sizes[i] = uniform(rng, 0., 1.) * key.size + key.size * 0.5;
        }

        debug!(count = key.count, "Generated snow");
        Self {
            particles,
            rng: StdRng::seed_from_u64(rng.gen()),
            key,
        }
    }

    /// The flakes.
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// What the flakes were generated from.
    pub fn key(&self) -> SnowKey {
        self.key
    }

    /// Move every flake forward by `delta` seconds.
    ///
    /// `elapsed` drives the gusting wind. Flakes that fall through the floor respawn at the top
    /// with a fresh horizontal position, and flakes that blow out of bounds on one axis are
    /// moved back in on that axis only.
    pub fn step(&mut self, elapsed: f32, delta: f32, speed: f32, wind_strength: f32) {
        let delta = sanitise_delta(delta);
        let positions = &mut self.particles.positions;
        let velocities = &self.particles.velocities;
        let rng = &mut self.rng;

        for (i, (position, velocity)) in positions
            .chunks_exact_mut(3)
            .zip(velocities.chunks_exact(3))
            .enumerate()
        {
            position[0] += velocity[0] * speed * delta;
            position[1] += velocity[1] * speed * delta;
            position[2] += velocity[2] * speed * delta;

            let gust = (elapsed * 0.5 + i as f32 * 0.01).sin() * wind_strength * 0.5;
            position[0] += gust * delta;

            if position[1] < FLOOR || position[1].is_nan() {
                position[0] = uniform(rng, -10., 10.);
                position[1] = uniform(rng, 30., 40.);
                position[2] = uniform(rng, -10., 10.);
            }

            if position[0].abs() > HORIZONTAL_BOUND || position[0].is_nan() {
                position[0] = uniform(rng, -5., 5.);
            }
            if position[2].abs() > HORIZONTAL_BOUND || position[2].is_nan() {
                position[2] = uniform(rng, -5., 5.);
            }
        }

        trace!(count = self.particles.len(), delta, "Stepped snow");
    }
}

impl Animator for Snow {
    type Config = SnowConfig;

    fn tick(&mut self, time: FrameTime, config: &SnowConfig) {
        self.step(time.elapsed, time.delta, config.speed, config.wind_strength);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn key(count: usize, wind_strength: f32) -> SnowKey {
        SnowKey {
            count,
            size: 0.02,
            wind_strength,
        }
    }

    #[test]
    fn generate_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let snow = Snow::generate(key(1000, 0.1), &mut rng);
        let particles = snow.particles();
        assert_eq!(particles.len(), 1000);

        for p in particles.iter_positions() {
            assert!((-10. ..=10.).contains(&p.x));
            assert!((5. ..=35.).contains(&p.y));
            assert!((-10. ..=10.).contains(&p.z));
        }

        for v in particles.velocities().chunks_exact(3) {
            assert!(v[0].abs() <= 0.05 + 1e-6);
            assert!((-1. ..=-0.5).contains(&v[1]));
            assert!(v[2].abs() <= 0.05 + 1e-6);
        }

        for &size in particles.sizes() {
            assert!((0.01..=0.03 + 1e-6).contains(&size));
        }
    }

    #[test]
    fn empty_snow_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut snow = Snow::generate(key(0, 0.1), &mut rng);
        assert!(snow.particles().is_empty());
        snow.step(1., 0.016, 1., 0.1);
        assert!(snow.particles().is_empty());
    }

    #[test]
    fn flakes_fall_by_velocity_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut snow = Snow::generate(key(100, 0.), &mut rng);
        let before = snow.particles().clone();

        snow.step(0., 0.1, 2., 0.);

        for (i, (after, before)) in snow
            .particles()
            .iter_positions()
            .zip(before.iter_positions())
            .enumerate()
        {
            let vy = fall_velocity(&snow, i);
            assert!(approx_eq!(f32, after.x, before.x, ulps = 2));
            assert!(approx_eq!(f32, after.y, before.y + vy * 2. * 0.1, epsilon = 1e-5));
            assert!(approx_eq!(f32, after.z, before.z, ulps = 2));
        }
    }

    fn fall_velocity(snow: &Snow, i: usize) -> f32 {
        snow.particles().velocities()[i * 3 + 1]
    }

    #[test]
    fn flakes_respawn_at_the_top_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut snow = Snow::generate(key(3, 0.1), &mut rng);
        snow.particles.positions[1] = -4.99;
        snow.particles.positions[3] = 16.;
        snow.particles.positions[8] = -15.5;

        snow.step(0., 1., 1., 0.);

        let first = snow.particles().position(0).unwrap();
        assert!((30. ..=40.).contains(&first.y));
        assert!(first.x.abs() <= 10. && first.z.abs() <= 10.);

        // Only the axis that left the bounds is moved back in
        let second = snow.particles().position(1).unwrap();
        assert!(second.x.abs() <= 5.);
        let third = snow.particles().position(2).unwrap();
        assert!(third.z.abs() <= 5.);
    }

    #[test]
    fn flakes_stay_in_bounds_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut snow = Snow::generate(key(500, 0.5), &mut rng);
        let buffer = snow.particles().positions().as_ptr();

        let mut elapsed = 0.;
        for delta in [0.016, 0.5, 3., 100., 1e30, f32::MAX, -1., f32::NAN, 0.016] {
            elapsed += sanitise_delta(delta);
            snow.step(elapsed, delta, 3., 0.5);

            for p in snow.particles().iter_positions() {
                assert!((FLOOR..=40.).contains(&p.y), "{p}");
                assert!(p.x.abs() <= HORIZONTAL_BOUND, "{p}");
                assert!(p.z.abs() <= HORIZONTAL_BOUND, "{p}");
            }
        }

        // The buffer is never reallocated
        assert_eq!(snow.particles().positions().as_ptr(), buffer);
        assert_eq!(snow.particles().len(), 500);
    }
}
