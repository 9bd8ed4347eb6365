//! This module scatters the small decorations: ornaments, gifts, sky stars and moon craters.
//!
//! Every function here draws from the given RNG in a fixed order, so a seeded RNG always gives
//! the same layout.

use crate::{colour::rgb, uniform, RGBArray};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};
use tracing::{debug, instrument};

/// The number of ornaments on each ring, from the bottom up.
pub const ORNAMENTS_PER_LEVEL: [usize; 6] = [8, 7, 6, 5, 4, 3];

/// The colours an ornament can be.
pub const ORNAMENT_COLOURS: [RGBArray; 8] = [
    rgb(0xFF0000),
    rgb(0x00FF00),
    rgb(0x0000FF),
    rgb(0xFFFF00),
    rgb(0xFF00FF),
    rgb(0x00FFFF),
    rgb(0xFFA500),
    rgb(0xFF1493),
];

/// The colours a gift box can be.
pub const GIFT_BOX_COLOURS: [RGBArray; 8] = [
    rgb(0xFF0000),
    rgb(0x00FF00),
    rgb(0x0000FF),
    rgb(0xFFFF00),
    rgb(0xFF00FF),
    rgb(0x00FFFF),
    rgb(0xFFA500),
    rgb(0x9370DB),
];

/// The colours a gift ribbon can be.
pub const RIBBON_COLOURS: [RGBArray; 3] = [rgb(0xFFFFFF), rgb(0xFFD700), rgb(0xC0C0C0)];

/// The colours a sky star can be.
pub const SKY_STAR_COLOURS: [RGBArray; 5] = [
    rgb(0xFFFFFF),
    rgb(0xFFD700),
    rgb(0x87CEEB),
    rgb(0xFFA500),
    rgb(0xFF69B4),
];

/// The number of craters on the moon.
pub const CRATER_COUNT: usize = 5;

/// Pick a random element of a non-empty palette.
fn pick<R: Rng + ?Sized, const N: usize>(rng: &mut R, palette: &[RGBArray; N]) -> RGBArray {
    palette[rng.gen_range(0..N)]
}

/// A bauble hanging on the tree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrnamentPlacement {
    /// The centre of the bauble.
    pub position: Vec3,

    /// The bauble's colour.
    pub colour: RGBArray,

    /// The radius of the bauble.
    pub size: f32,
}

/// Hang ornaments in rings around a tree of the given radius.
///
/// Each ring is a little narrower and higher than the one below, and carries fewer ornaments.
#[instrument(skip(rng))]
pub fn ornaments<R: Rng + ?Sized>(rng: &mut R, tree_radius: f32) -> Vec<OrnamentPlacement> {
    let mut placements = Vec::with_capacity(ORNAMENTS_PER_LEVEL.iter().sum());

    for (level, &count) in ORNAMENTS_PER_LEVEL.iter().enumerate() {
        let y = 0.5 + level as f32 * 0.9;
        let radius = tree_radius * (1. - level as f32 * 0.15);

        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            let y_variation = uniform(rng, -0.15, 0.15);
            let (sin, cos) = angle.sin_cos();

            placements.push(OrnamentPlacement {
                position: Vec3::new(cos * radius, y + y_variation, sin * radius),
                colour: pick(rng, &ORNAMENT_COLOURS),
                size: uniform(rng, 0.12, 0.18),
            });
        }
    }

    debug!(count = placements.len(), "Placed ornaments");
    placements
}

/// A present under the tree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GiftPlacement {
    /// The centre of the box at rest.
    pub position: Vec3,

    /// The width, height and depth of the box.
    pub size: Vec3,

    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,

    /// The colour of the box.
    pub box_colour: RGBArray,

    /// The colour of the ribbon and bow.
    pub ribbon_colour: RGBArray,
}

impl GiftPlacement {
    /// Half the height of the box.
    pub fn half_height(&self) -> f32 {
        self.size.y / 2.
    }

    /// The height of the floor that this gift rests on.
    pub fn ground_level(&self) -> f32 {
        self.position.y - self.half_height()
    }
}

/// Spread `count` gifts in a loose ring just outside a tree of the given radius.
#[instrument(skip(rng))]
pub fn gifts<R: Rng + ?Sized>(rng: &mut R, count: usize, tree_radius: f32) -> Vec<GiftPlacement> {
    if count == 0 {
        return Vec::new();
    }

    let angle_step = TAU / count as f32;
    let base_radius = tree_radius + 0.8;

    let placements: Vec<_> = (0..count)
        .map(|i| {
            let angle = i as f32 * angle_step + uniform(rng, -0.25, 0.25);
            let radius = base_radius + uniform(rng, -0.25, 0.25);
            let y = 0.25 + uniform(rng, 0., 0.1);

            let side = uniform(rng, 0.3, 0.7);
            let size = Vec3::new(side, side * uniform(rng, 0.8, 1.2), side);
            let rotation = Vec3::new(0., uniform(rng, 0., TAU), uniform(rng, -0.1, 0.1));

            let (sin, cos) = angle.sin_cos();
            GiftPlacement {
                position: Vec3::new(cos * radius, y, sin * radius),
                size,
                rotation,
                box_colour: pick(rng, &GIFT_BOX_COLOURS),
                ribbon_colour: pick(rng, &RIBBON_COLOURS),
            }
        })
        .collect();

    debug!(count = placements.len(), "Placed gifts");
    placements
}

/// A twinkling star in the sky dome.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkyStarPlacement {
    /// Where the star sits.
    pub position: Vec3,

    /// The radius of the star.
    pub size: f32,

    /// The star's colour.
    pub colour: RGBArray,

    /// The star's own twinkle frequency, before the global multiplier.
    pub twinkle_speed: f32,
}

/// Scatter `count` stars over the upper hemisphere of a dome of the given radius.
#[instrument(skip(rng))]
pub fn sky_stars<R: Rng + ?Sized>(rng: &mut R, count: usize, radius: f32) -> Vec<SkyStarPlacement> {
    (0..count)
        .map(|_| {
            let theta = uniform(rng, 0., FRAC_PI_2);
            let phi = uniform(rng, 0., TAU);

            SkyStarPlacement {
                position: Vec3::new(
                    theta.sin() * phi.cos() * radius,
                    theta.cos() * radius,
                    theta.sin() * phi.sin() * radius,
                ),
                size: uniform(rng, 0.03, 0.07),
                colour: pick(rng, &SKY_STAR_COLOURS),
                twinkle_speed: uniform(rng, 0.5, 2.),
            }
        })
        .collect()
}

/// A crater on the face of the moon, relative to the moon's centre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CraterPlacement {
    /// The centre of the crater.
    pub position: Vec3,

    /// The radius of the crater.
    pub size: f32,
}

/// Place [`CRATER_COUNT`] craters around a moon of the given radius.
pub fn craters<R: Rng + ?Sized>(rng: &mut R, moon_size: f32) -> Vec<CraterPlacement> {
    (0..CRATER_COUNT)
        .map(|i| {
            let angle = i as f32 / CRATER_COUNT as f32 * TAU;
            let distance = moon_size * uniform(rng, 0.3, 0.7);
            let x = angle.cos() * distance;
            let z = angle.sin() * distance;

            CraterPlacement {
                position: Vec3::new(x, z * 0.3, z),
                size: uniform(rng, 0.1, 0.25),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn ornaments_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let ornaments = ornaments(&mut rng, 1.2);
        assert_eq!(ornaments.len(), 33);

        let mut start = 0;
        for (level, &count) in ORNAMENTS_PER_LEVEL.iter().enumerate() {
            let ring = &ornaments[start..start + count];
            let radius = 1.2 * (1. - level as f32 * 0.15);
            let y = 0.5 + level as f32 * 0.9;

            for ornament in ring {
                let p = ornament.position;
                assert!((p.x.hypot(p.z) - radius).abs() < 1e-5);
                assert!((p.y - y).abs() <= 0.15 + 1e-5);
                assert!((0.12..=0.18).contains(&ornament.size));
                assert!(ORNAMENT_COLOURS.contains(&ornament.colour));
            }

            start += count;
        }
    }

    #[test]
    fn gifts_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        assert!(gifts(&mut rng, 0, 1.2).is_empty());

        let gifts = gifts(&mut rng, 7, 1.2);
        assert_eq!(gifts.len(), 7);

        for gift in &gifts {
            let p = gift.position;
            let radius = p.x.hypot(p.z);
            assert!((1.75 - 1e-5..=2.25 + 1e-5).contains(&radius));
            assert!((0.25..=0.35).contains(&p.y));

            assert!((0.3..=0.7).contains(&gift.size.x));
            assert_eq!(gift.size.x, gift.size.z);
            assert!(gift.size.y >= gift.size.x * 0.8 - 1e-6);
            assert!(gift.size.y <= gift.size.x * 1.2 + 1e-6);
            assert_eq!(gift.rotation.x, 0.);

            assert!((gift.ground_level() + gift.half_height() - p.y).abs() < 1e-6);
            assert!(GIFT_BOX_COLOURS.contains(&gift.box_colour));
            assert!(RIBBON_COLOURS.contains(&gift.ribbon_colour));
        }
    }

    #[test]
    fn sky_stars_are_above_the_horizon_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let stars = sky_stars(&mut rng, 300, 30.);
        assert_eq!(stars.len(), 300);

        for star in &stars {
            assert!(star.position.y >= 0.);
            assert!((star.position.length() - 30.).abs() < 1e-3);
            assert!((0.5..=2.).contains(&star.twinkle_speed));
        }

        assert!(sky_stars(&mut rng, 0, 30.).is_empty());
    }

    #[test]
    fn craters_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let craters = craters(&mut rng, 1.5);
        assert_eq!(craters.len(), CRATER_COUNT);

        for crater in &craters {
            let p = crater.position;
            let distance = p.x.hypot(p.z);
            assert!((0.45 - 1e-5..=1.05 + 1e-5).contains(&distance));
            assert!((p.y - p.z * 0.3).abs() < 1e-6);
            assert!((0.1..=0.25).contains(&crater.size));
        }
    }

    #[test]
    fn same_seed_same_layout_test() {
        let a = gifts(&mut StdRng::seed_from_u64(7), 5, 1.2);
        let b = gifts(&mut StdRng::seed_from_u64(7), 5, 1.2);
        assert_eq!(a, b);
    }
}
