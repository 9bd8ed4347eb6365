//! This module contains [`ParticleSet`].

use glam::Vec3;

/// A fixed number of points stored as flat buffers, ready to hand to a renderer.
///
/// The buffers never change length after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleSet {
    /// Three floats per particle.
    pub(crate) positions: Vec<f32>,

    /// Three floats per particle. Empty for particles that never move.
    pub(crate) velocities: Vec<f32>,

    /// One float per particle.
    pub(crate) sizes: Vec<f32>,

    /// Three floats per particle, if the particles are individually coloured.
    pub(crate) colours: Option<Vec<f32>>,
}

impl ParticleSet {
    /// Allocate zeroed buffers for `count` particles.
    pub(crate) fn zeroed(count: usize, moving: bool, coloured: bool) -> Self {
        Self {
            positions: vec![0.; count * 3],
            velocities: if moving { vec![0.; count * 3] } else { Vec::new() },
            sizes: vec![0.; count],
            colours: coloured.then(|| vec![0.; count * 3]),
        }
    }

    /// The number of particles.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether there are no particles at all.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// The position buffer, three floats per particle.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// The velocity buffer, three floats per particle.
    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    /// The size buffer, one float per particle.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// The colour buffer, three floats per particle.
    pub fn colours(&self) -> Option<&[f32]> {
        self.colours.as_deref()
    }

    /// The position of particle `index`.
    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions
            .get(index * 3..index * 3 + 3)
            .map(Vec3::from_slice)
    }

    /// Iterate over every particle position.
    pub fn iter_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.chunks_exact(3).map(Vec3::from_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_test() {
        let set = ParticleSet::zeroed(4, true, false);
        assert_eq!(set.len(), 4);
        assert_eq!(set.positions().len(), 12);
        assert_eq!(set.velocities().len(), 12);
        assert!(set.colours().is_none());
        assert_eq!(set.position(3), Some(Vec3::ZERO));
        assert_eq!(set.position(4), None);

        let empty = ParticleSet::zeroed(0, false, true);
        assert!(empty.is_empty());
        assert_eq!(empty.colours(), Some(&[][..]));
        assert_eq!(empty.iter_positions().count(), 0);
    }
}
