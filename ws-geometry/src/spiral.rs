//! This module computes the helical paths that the lights follow around the tree.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use ws_config::{LightingConfig, TreeConfig};

/// The shape of the light spirals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpiralParams {
    /// The height of the tree.
    pub tree_height: f32,

    /// The base radius of the tree.
    pub tree_radius: f32,

    /// How many spirals wrap around the tree.
    pub spirals: usize,

    /// How many bulbs sit on each spiral.
    pub lights_per_spiral: usize,

    /// The height at which every spiral starts.
    pub base_offset: f32,
}

impl SpiralParams {
    /// The height of the lowest bulb on every spiral.
    pub const DEFAULT_BASE_OFFSET: f32 = 0.3;

    /// Read the spiral parameters out of the config.
    pub fn from_config(tree: &TreeConfig, lighting: &LightingConfig) -> Self {
        Self {
            tree_height: tree.height,
            tree_radius: tree.radius,
            spirals: lighting.spiral_count(),
            lights_per_spiral: lighting.bulbs_per_spiral(),
            base_offset: Self::DEFAULT_BASE_OFFSET,
        }
    }

    /// The total number of bulbs across every spiral.
    pub fn total_lights(&self) -> usize {
        self.spirals * self.lights_per_spiral
    }

    /// The position of bulb `index` on spiral `spiral`.
    ///
    /// Each spiral makes two full turns on the way up and starts a fraction of a turn further
    /// round than the previous one. The radius grows from 70% of the tree radius at the bottom
    /// to the full radius at the top, which keeps the bulbs just outside the foliage.
    pub fn point(&self, spiral: usize, index: usize) -> Vec3 {
        let progress = index as f32 / self.lights_per_spiral.max(1) as f32;
        let y = self.base_offset + progress * (self.tree_height - self.base_offset);
        let angle = spiral as f32 / self.spirals.max(1) as f32 * TAU + progress * 2. * TAU;
        let radius = self.tree_radius * (0.7 + 0.3 * progress);

        let (sin, cos) = angle.sin_cos();
        Vec3::new(cos * radius, y, sin * radius)
    }

    /// Every bulb position on one spiral, from the bottom up.
    pub fn path(&self, spiral: usize) -> SpiralPath {
        SpiralPath {
            spiral_index: spiral,
            points: (0..self.lights_per_spiral)
                .map(|index| self.point(spiral, index))
                .collect(),
        }
    }

    /// Every spiral.
    pub fn paths(&self) -> Vec<SpiralPath> {
        (0..self.spirals).map(|spiral| self.path(spiral)).collect()
    }
}

/// The bulb positions on one spiral.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpiralPath {
    /// Which spiral this is.
    pub spiral_index: usize,

    /// The bulb positions, bottom first.
    pub points: Vec<Vec3>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn params() -> SpiralParams {
        SpiralParams {
            tree_height: 5.5,
            tree_radius: 1.2,
            spirals: 3,
            lights_per_spiral: 15,
            base_offset: SpiralParams::DEFAULT_BASE_OFFSET,
        }
    }

    #[test]
    fn first_bulb_test() {
        let p = params().point(0, 0);
        assert!(approx_eq!(f32, p.x, 0.84, epsilon = 1e-6));
        assert!(approx_eq!(f32, p.y, 0.3, epsilon = 1e-6));
        assert!(approx_eq!(f32, p.z, 0., epsilon = 1e-6));
    }

    #[test]
    fn spirals_are_evenly_offset_test() {
        let params = params();
        let p = params.point(1, 0);
        let angle = p.z.atan2(p.x);
        assert!(approx_eq!(f32, angle, TAU / 3., epsilon = 1e-5));
    }

    #[test]
    fn paths_climb_and_widen_test() {
        let params = params();
        let paths = params.paths();
        assert_eq!(paths.len(), 3);
        assert_eq!(params.total_lights(), 45);

        for path in &paths {
            assert_eq!(path.points.len(), 15);
            for pair in path.points.windows(2) {
                assert!(pair[1].y > pair[0].y);
                assert!(pair[1].x.hypot(pair[1].z) > pair[0].x.hypot(pair[0].z));
            }
            assert!(path.points.iter().all(|p| p.y < params.tree_height));
        }
    }

    #[test]
    fn paths_are_bit_identical_test() {
        let a = params().paths();
        let b = params().paths();
        for (a, b) in a.iter().zip(&b) {
            for (pa, pb) in a.points.iter().zip(&b.points) {
                assert_eq!(pa.to_array().map(f32::to_bits), pb.to_array().map(f32::to_bits));
            }
        }
    }
}
