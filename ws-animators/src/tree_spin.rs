//! This module contains the optional slow spin of the whole tree.

use std::f32::consts::TAU;
use ws_animator_trait::{Animator, FrameTime};
use ws_config::TreeConfig;

/// The rotation of the whole tree about the y axis.
///
/// The scene only registers this when the tree is set to rotate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TreeSpin {
    /// The current rotation, in `[0, 2π)`.
    pub rotation_y: f32,
}

impl Animator for TreeSpin {
    type Config = TreeConfig;

    fn tick(&mut self, time: FrameTime, config: &TreeConfig) {
        self.rotation_y = (self.rotation_y + time.delta * config.rotation_speed).rem_euclid(TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn spin_wraps_test() {
        let config = TreeConfig {
            rotate: true,
            rotation_speed: 2.,
            ..TreeConfig::default()
        };
        let mut spin = TreeSpin::default();

        spin.tick(FrameTime::new(0.5, 0.5), &config);
        assert!(approx_eq!(f32, spin.rotation_y, 1., ulps = 2));

        spin.tick(FrameTime::new(4., 3.5), &config);
        assert!((0. ..TAU).contains(&spin.rotation_y));
        assert!(approx_eq!(f32, spin.rotation_y, 8. - TAU, epsilon = 1e-5));
    }
}
