//! This module builds the geometry of a wrapped present.

use crate::{placement::GiftPlacement, GenerationError, Mesh};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One box-shaped part of a present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GiftBoxPart {
    /// The part's geometry, centred on the origin.
    pub mesh: Mesh,

    /// Where the part sits relative to the centre of the present.
    pub offset: Vec3,
}

/// A wrapped present: a box, two crossing ribbon bands and a bow on top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GiftBoxGeometry {
    /// The box itself.
    pub body: GiftBoxPart,

    /// The ribbon band that runs around the sides.
    pub horizontal_ribbon: GiftBoxPart,

    /// The ribbon band that runs over the top and bottom.
    pub vertical_ribbon: GiftBoxPart,

    /// The bow, sitting just above the lid.
    pub bow: GiftBoxPart,
}

impl GiftBoxGeometry {
    /// Build a present with the given box dimensions.
    pub fn new(size: Vec3) -> Result<Self, GenerationError> {
        let part = |scale: Vec3, offset: Vec3| -> Result<GiftBoxPart, GenerationError> {
            let mesh = Mesh::cuboid(size * scale);
            mesh.validate("gift box")?;
            Ok(GiftBoxPart { mesh, offset })
        };

        Ok(Self {
            body: part(Vec3::ONE, Vec3::ZERO)?,
            horizontal_ribbon: part(Vec3::new(1.1, 0.15, 1.1), Vec3::ZERO)?,
            vertical_ribbon: part(Vec3::new(0.15, 1.1, 1.1), Vec3::ZERO)?,
            bow: part(
                Vec3::new(0.3, 0.2, 0.3),
                Vec3::new(0., size.y / 2. + 0.05, 0.),
            )?,
        })
    }

    /// Build the present for a placed gift.
    pub fn for_placement(placement: &GiftPlacement) -> Result<Self, GenerationError> {
        Self::new(placement.size)
    }

    /// Every part, box first.
    pub fn parts(&self) -> [&GiftBoxPart; 4] {
        [
            &self.body,
            &self.horizontal_ribbon,
            &self.vertical_ribbon,
            &self.bow,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn extent(mesh: &Mesh) -> Vec3 {
        let max = mesh
            .positions
            .iter()
            .fold(Vec3::splat(f32::NEG_INFINITY), |acc, &p| acc.max(p));
        max * 2.
    }

    #[test]
    fn ribbons_wrap_the_box_test() {
        let size = Vec3::new(0.5, 0.4, 0.5);
        let gift = GiftBoxGeometry::new(size).unwrap();

        assert!(extent(&gift.body.mesh).abs_diff_eq(size, 1e-6));
        assert!(extent(&gift.horizontal_ribbon.mesh).abs_diff_eq(Vec3::new(0.55, 0.06, 0.55), 1e-6));
        assert!(extent(&gift.vertical_ribbon.mesh).abs_diff_eq(Vec3::new(0.075, 0.44, 0.55), 1e-6));
        assert!(extent(&gift.bow.mesh).abs_diff_eq(Vec3::new(0.15, 0.08, 0.15), 1e-6));

        // The bow sits on the lid
        assert!(approx_eq!(f32, gift.bow.offset.y, 0.25, epsilon = 1e-6));
        assert!(gift.parts()[..3].iter().all(|part| part.offset == Vec3::ZERO));
    }
}
