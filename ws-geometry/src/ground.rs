//! This module builds the layered snowy ground, including the noisy relief of the fresh snow.

use crate::{colour::to_float, uniform, GenerationError, Mesh, RGBFloat, Transform};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use tracing::{debug, instrument};
use ws_config::GroundConfig;

/// The number of octaves in [`relief_noise`].
const OCTAVES: usize = 3;

/// The phase added to both coordinates in each octave.
const OCTAVE_PHASES: [f32; OCTAVES] = [0., 1.5, 3.];

/// How far below the origin the whole ground is pushed.
const GROUND_DROP: f32 = 0.5;

/// A smooth, continuous height field made of three octaves of `sin(x) * cos(y)`.
///
/// Each octave doubles the frequency and halves the amplitude of the one before, starting from a
/// frequency of `scale` and an amplitude of 1.
pub fn relief_noise(x: f32, y: f32, scale: f32) -> f32 {
    let mut value = 0.;
    let mut amplitude = 1.;
    let mut frequency = scale;

    for phase in OCTAVE_PHASES {
        value += (x * frequency + phase).sin() * (y * frequency + phase).cos() * amplitude;
        amplitude *= 0.5;
        frequency *= 2.;
    }

    value
}

/// A small bump derived from the vertex position alone.
///
/// This is the only part of the relief that isn't continuous, so it's kept tiny relative to
/// `intensity`.
pub fn micro_bump(x: f32, y: f32, intensity: f32) -> f32 {
    let hash = (x * 73. + y * 97.) % 1.;
    (hash - 0.5) * intensity * 0.2
}

/// The offset into the noise field, so that each generation gets a different patch of relief.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseSeed {
    /// Added to every x coordinate before sampling the noise.
    pub x: f32,

    /// Added to every y coordinate before sampling the noise.
    pub y: f32,
}

impl NoiseSeed {
    /// No offset at all.
    pub const ZERO: Self = Self { x: 0., y: 0. };

    /// Draw a random offset in `[0, 1000)` on each axis.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: uniform(rng, 0., 1000.),
            y: uniform(rng, 0., 1000.),
        }
    }
}

/// The height of the fresh snow surface above its plane at local `(x, y)`.
pub fn surface_height(x: f32, y: f32, seed: NoiseSeed, scale: f32, intensity: f32) -> f32 {
    relief_noise(x + seed.x, y + seed.y, scale) * intensity + micro_bump(x, y, intensity)
}

/// Build a square plane in the xy plane and push every vertex along z by [`surface_height`].
///
/// The normals are recomputed afterwards so that the relief catches the light.
pub fn deformed_plane(
    size: f32,
    segments: usize,
    seed: NoiseSeed,
    scale: f32,
    intensity: f32,
) -> Result<Mesh, GenerationError> {
    let mut mesh = Mesh::plane(size, size, segments, segments);

    for position in &mut mesh.positions {
        position.z += surface_height(position.x, position.y, seed, scale, intensity);
    }

    mesh.compute_vertex_normals();
    mesh.validate("fresh snow")?;
    Ok(mesh)
}

/// One slab of the ground.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundLayer {
    /// The layer's geometry.
    pub mesh: Mesh,

    /// Where the layer sits.
    pub transform: Transform,

    /// The base colour of the layer.
    pub colour: RGBFloat,

    /// How see-through the layer is, from 0 (invisible) to 1 (opaque).
    pub opacity: f32,

    /// The surface roughness, from 0 (mirror) to 1 (chalk).
    pub roughness: f32,
}

/// The three layers of ground under the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    /// The earth at the bottom.
    pub base: GroundLayer,

    /// The compacted snow on top of the earth.
    pub compact_snow: GroundLayer,

    /// The deformed fresh snow on top of everything, if snow accumulation is enabled.
    pub fresh_snow: Option<GroundLayer>,
}

/// The heights of the centres of the base, compact snow and fresh snow layers.
pub fn layer_heights(config: &GroundConfig) -> [f32; 3] {
    let total = config.total_thickness;
    let base = total * config.base_thickness_ratio;
    let compact = total * config.compact_snow_thickness_ratio;
    let fresh = total * config.fresh_snow_thickness_ratio;

    let base_y = (-total / 2. + base / 2.) - GROUND_DROP;
    let compact_y = base_y + base / 2. + compact / 2.;
    let fresh_y = compact_y + compact / 2. + fresh / 2.;

    [base_y, compact_y, fresh_y]
}

impl Ground {
    /// Build every layer of the ground.
    ///
    /// A noise seed is only drawn from `rng` when the fresh snow layer is enabled.
    #[instrument(skip_all)]
    pub fn generate<R: Rng + ?Sized>(
        config: &GroundConfig,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let [base_y, compact_y, fresh_y] = layer_heights(config);
        let total = config.total_thickness;

        let slab = |ratio: f32, y: f32, colour, roughness| -> Result<_, GenerationError> {
            let mesh = Mesh::cuboid(Vec3::new(config.size, total * ratio, config.size));
            mesh.validate("ground slab")?;
            Ok(GroundLayer {
                mesh,
                transform: Transform::from_translation(Vec3::new(0., y, 0.)),
                colour: to_float(colour),
                opacity: 1.,
                roughness,
            })
        };

        let base = slab(config.base_thickness_ratio, base_y, config.base_colour, 0.95)?;
        let compact_snow = slab(
            config.compact_snow_thickness_ratio,
            compact_y,
            config.compact_snow_colour,
            0.9,
        )?;

        let fresh_snow = if config.snow_accumulation {
            let seed = NoiseSeed::random(rng);
            let mesh = deformed_plane(
                config.size,
                config.segment_count(),
                seed,
                config.noise_scale,
                config.noise_intensity,
            )?;

            Some(GroundLayer {
                mesh,
                transform: Transform::from_translation(Vec3::new(0., fresh_y, 0.))
                    .with_rotation(Vec3::new(-FRAC_PI_2, 0., 0.)),
                colour: to_float(config.fresh_snow_colour),
                opacity: 0.95,
                roughness: 0.95,
            })
        } else {
            None
        };

        debug!(fresh_snow = fresh_snow.is_some(), "Generated ground");
        Ok(Self {
            base,
            compact_snow,
            fresh_snow,
        })
    }

    /// Every layer, from the bottom up.
    pub fn layers(&self) -> impl Iterator<Item = &GroundLayer> {
        [&self.base, &self.compact_snow]
            .into_iter()
            .chain(self.fresh_snow.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn relief_noise_golden_values_test() {
        assert!(approx_eq!(f32, relief_noise(0., 0., 0.3), 0.000_353_064_74, epsilon = 1e-5));
        assert!(approx_eq!(f32, relief_noise(1., 2., 0.3), -0.284_594_15, epsilon = 1e-4));
        assert!(approx_eq!(f32, relief_noise(100., 250., 0.3), -1.299_897_8, epsilon = 1e-3));
    }

    #[test]
    fn surface_height_at_origin_test() {
        let height = surface_height(0., 0., NoiseSeed::ZERO, 0.3, 0.3);
        assert!(approx_eq!(f32, height, -0.029_894_08, epsilon = 1e-5));

        // With no intensity the surface is flat
        assert_eq!(surface_height(3., -7., NoiseSeed::ZERO, 0.3, 0.), 0.);
    }

    #[test]
    fn relief_noise_is_continuous_test() {
        // Neighbouring samples can't differ by more than the sum of the octave slopes allows
        let max_slope = 0.3 * (1. + 1. + 1.) * 2.;
        let step = 0.01;
        for i in 0..1000 {
            let x = i as f32 * step;
            let here = relief_noise(x, 0.5 * x, 0.3);
            let next = relief_noise(x + step, 0.5 * (x + step), 0.3);
            assert!((next - here).abs() <= max_slope * step * 1.5);
        }
    }

    #[test]
    fn deformed_plane_test() {
        let mesh = deformed_plane(20., 8, NoiseSeed::ZERO, 0.3, 0.3).unwrap();
        assert_eq!(mesh.vertex_count(), 81);
        assert_eq!(mesh.triangle_count(), 128);

        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            let expected = surface_height(position.x, position.y, NoiseSeed::ZERO, 0.3, 0.3);
            assert!(approx_eq!(f32, position.z, expected, epsilon = 1e-6));
            assert!(approx_eq!(f32, normal.length(), 1., epsilon = 1e-5));
            assert!(normal.z > 0.);
        }
    }

    #[test]
    fn layer_heights_test() {
        let [base, compact, fresh] = layer_heights(&GroundConfig::default());
        assert!(approx_eq!(f32, base, -0.56, epsilon = 1e-6));
        assert!(approx_eq!(f32, compact, -0.38, epsilon = 1e-6));
        assert!(approx_eq!(f32, fresh, -0.32, epsilon = 1e-6));
    }

    #[test]
    fn generate_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let ground = Ground::generate(&GroundConfig::default(), &mut rng).unwrap();
        assert_eq!(ground.layers().count(), 3);

        let fresh = ground.fresh_snow.as_ref().unwrap();
        assert_eq!(fresh.mesh.vertex_count(), 65 * 65);
        assert!(approx_eq!(f32, fresh.opacity, 0.95, ulps = 2));

        // The same seed gives the same relief
        let mut rng = StdRng::seed_from_u64(12345);
        assert_eq!(
            ground,
            Ground::generate(&GroundConfig::default(), &mut rng).unwrap()
        );

        let config = GroundConfig {
            snow_accumulation: false,
            ..GroundConfig::default()
        };
        let ground = Ground::generate(&config, &mut rng).unwrap();
        assert!(ground.fresh_snow.is_none());
        assert_eq!(ground.layers().count(), 2);
    }
}
