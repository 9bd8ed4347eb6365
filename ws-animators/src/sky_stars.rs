//! This module contains the individual twinkling stars in the sky.

use rand::Rng;
use tracing::{debug, instrument};
use ws_animator_trait::{Animator, FrameTime};
use ws_config::StarsConfig;
use ws_geometry::placement::{self, SkyStarPlacement};

/// The twinkle of one sky star at time `elapsed`, in `[0, 1]`.
///
/// `x` is the star's x coordinate, which spreads the phases out across the sky.
pub fn twinkle(elapsed: f32, star_speed: f32, global_speed: f32, x: f32) -> f32 {
    (elapsed * star_speed * global_speed * 2. + x * 10.).sin() * 0.5 + 0.5
}

/// One star in the sky.
#[derive(Clone, Debug, PartialEq)]
pub struct SkyStar {
    /// Where the star is and what it looks like.
    pub placement: SkyStarPlacement,

    /// The current emissive intensity.
    pub emissive_intensity: f32,

    /// The current opacity.
    pub opacity: f32,
}

/// Every star in the sky.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkyStars {
    stars: Vec<SkyStar>,
}

impl SkyStars {
    /// Scatter stars over the upper hemisphere.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(config: &StarsConfig, rng: &mut R) -> Self {
        let stars: Vec<_> = placement::sky_stars(rng, config.star_count(), config.radius)
            .into_iter()
            .map(|placement| SkyStar {
                placement,
                emissive_intensity: 0.5,
                opacity: 0.8,
            })
            .collect();

        debug!(count = stars.len(), "Generated sky stars");
        Self { stars }
    }

    /// The stars.
    pub fn stars(&self) -> &[SkyStar] {
        &self.stars
    }
}

impl Animator for SkyStars {
    type Config = StarsConfig;

    fn tick(&mut self, time: FrameTime, config: &StarsConfig) {
        for star in &mut self.stars {
            let t = twinkle(
                time.elapsed,
                star.placement.twinkle_speed,
                config.twinkle_speed,
                star.placement.position.x,
            );
            star.emissive_intensity = 0.3 + t * 0.7;
            star.opacity = 0.6 + t * 0.4;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn twinkle_range_test() {
        for i in 0..1000 {
            let t = twinkle(i as f32 * 0.05, 1.3, 2., i as f32 - 500.);
            assert!((0. ..=1.).contains(&t), "{t}");
        }
        assert_eq!(twinkle(0., 1., 1., 0.), 0.5);
    }

    #[test]
    fn tick_test() {
        let config = StarsConfig {
            count: 50,
            ..StarsConfig::default()
        };
        let mut stars = SkyStars::generate(&config, &mut StdRng::seed_from_u64(12345));
        assert_eq!(stars.stars().len(), 50);
        assert!(stars.stars().iter().all(|s| s.opacity == 0.8));

        stars.tick(FrameTime::new(3.7, 0.016), &config);
        for star in stars.stars() {
            assert!((0.3..=1.0 + 1e-6).contains(&star.emissive_intensity));
            assert!((0.6..=1.0 + 1e-6).contains(&star.opacity));
        }

        // A frozen twinkle speed leaves every star at its phase offset
        let frozen = StarsConfig {
            twinkle_speed: 0.,
            ..config
        };
        stars.tick(FrameTime::new(100., 0.016), &frozen);
        for star in stars.stars() {
            let t = twinkle(0., 1., 1., star.placement.position.x);
            assert_eq!(star.opacity, 0.6 + t * 0.4);
        }
    }
}
