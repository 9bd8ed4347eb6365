//! This module contains the [`StarField`] particle system.

use crate::ParticleSet;
use rand::Rng;
use std::f32::consts::TAU;
use tracing::{debug, instrument};
use ws_animator_trait::{Animator, FrameTime};
use ws_config::StarFieldConfig;
use ws_geometry::{colour::hsl_to_rgb, uniform};

/// The parameters that the star field's buffers are generated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarFieldKey {
    /// The number of stars.
    pub count: usize,

    /// The outer radius of the shell.
    pub spread_distance: f32,

    /// The inner radius of the shell.
    pub min_distance: f32,
}

impl StarFieldKey {
    /// Read the key out of the config.
    pub fn from_config(config: &StarFieldConfig) -> Self {
        Self {
            count: config.particle_count(),
            spread_distance: config.spread_distance,
            min_distance: config.min_distance,
        }
    }
}

/// The opacity of the star field at time `elapsed`.
///
/// The pulse is kept subtle, so this always stays within `[0.86, 0.9]`.
pub fn star_field_opacity(elapsed: f32, twinkle_speed: f32) -> f32 {
    let pulse = (elapsed * twinkle_speed).sin() * 0.1 + 0.9;
    0.7 + pulse * 0.2
}

/// Thousands of faint, coloured stars in a shell around the whole scene.
///
/// Individual stars never move. The whole field turns slowly and its opacity pulses, so a
/// frame costs the same no matter how many stars there are.
#[derive(Clone, Debug)]
pub struct StarField {
    /// The stars.
    particles: ParticleSet,

    /// The current rotation of the whole field about the y axis, in `[0, 2π)`.
    rotation_y: f32,

    /// The current opacity of every star.
    opacity: f32,

    /// What the stars were generated from.
    key: StarFieldKey,
}

impl StarField {
    /// Scatter stars uniformly over a spherical shell.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(key: StarFieldKey, rng: &mut R) -> Self {
        let mut particles = ParticleSet::zeroed(key.count, false, true);
        let mut colours = particles.colours.take().unwrap_or_default();

        for i in 0..key.count {
            let i3 = i * 3;

            let radius = uniform(rng, key.min_distance, key.spread_distance);
            let theta = uniform(rng, 0., TAU);
            // The inverse cosine spreads the stars evenly by area rather than bunching them at
            // the poles
            let phi = uniform(rng, -1., 1.).clamp(-1., 1.).acos();

            particles.positions[i3] = radius * phi.sin() * theta.cos();
            particles.positions[i3 + 1] = radius * phi.sin() * theta.sin();
            particles.positions[i3 + 2] = radius * phi.cos();

            let [r, g, b] = star_colour(rng);
            colours[i3] = r;
            colours[i3 + 1] = g;
            colours[i3 + 2] = b;

            particles.sizes[i] = uniform(rng, 0.05, 0.2);
        }

        particles.colours = Some(colours);

        debug!(count = key.count, "Generated star field");
        Self {
            particles,
            rotation_y: 0.,
            opacity: star_field_opacity(0., 0.),
            key,
        }
    }

    /// The stars.
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// What the stars were generated from.
    pub fn key(&self) -> StarFieldKey {
        self.key
    }

    /// The current rotation of the whole field about the y axis.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// The current opacity of every star.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Pick a star colour: mostly pale blue-white, sometimes yellow and rarely red-orange.
fn star_colour<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    let roll: f32 = rng.gen();

    if roll < 0.6 {
        let hue = 0.55 + uniform(rng, 0., 0.1);
        hsl_to_rgb(hue, 0.2, 0.7 + uniform(rng, 0., 0.3))
    } else if roll < 0.85 {
        let hue = 0.1 + uniform(rng, 0., 0.1);
        hsl_to_rgb(hue, 0.5, 0.6 + uniform(rng, 0., 0.3))
    } else {
        let hue = uniform(rng, 0., 0.1);
        hsl_to_rgb(hue, 0.8, 0.5 + uniform(rng, 0., 0.3))
    }
}

impl Animator for StarField {
    type Config = StarFieldConfig;

    fn tick(&mut self, time: FrameTime, config: &StarFieldConfig) {
        self.rotation_y = (self.rotation_y + time.delta * config.rotation_speed).rem_euclid(TAU);
        self.opacity = star_field_opacity(time.elapsed, config.twinkle_speed);
    }
}
