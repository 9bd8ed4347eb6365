//! This module builds the tree itself: a trunk, a stack of cones and a star on top.

use crate::{colour::rgb, GenerationError, Mesh, RGBArray};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One slice of the tree's profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryLevel {
    /// The height of the slice.
    pub height: f32,

    /// The radius at the widest point of the slice.
    pub radius: f32,

    /// The height of the centre of the slice above the ground.
    pub vertical_offset: f32,

    /// The colour of the slice.
    pub colour: RGBArray,
}

/// The cones of foliage, from the bottom up.
pub const TREE_LEVELS: [GeometryLevel; 6] = [
    GeometryLevel {
        height: 2.,
        radius: 1.2,
        vertical_offset: 0.75,
        colour: rgb(0x228B22),
    },
    GeometryLevel {
        height: 1.6,
        radius: 1.,
        vertical_offset: 1.8,
        colour: rgb(0x2E8B57),
    },
    GeometryLevel {
        height: 1.3,
        radius: 0.8,
        vertical_offset: 2.9,
        colour: rgb(0x3CB371),
    },
    GeometryLevel {
        height: 1.,
        radius: 0.6,
        vertical_offset: 3.8,
        colour: rgb(0x228B22),
    },
    GeometryLevel {
        height: 0.8,
        radius: 0.5,
        vertical_offset: 4.5,
        colour: rgb(0x2E8B57),
    },
    GeometryLevel {
        height: 0.6,
        radius: 0.4,
        vertical_offset: 5.1,
        colour: rgb(0x3CB371),
    },
];

/// The trunk, which sits on the ground.
pub const TRUNK: GeometryLevel = GeometryLevel {
    height: 1.5,
    radius: 0.15,
    vertical_offset: 1.5 / 2.,
    colour: rgb(0x8B4513),
};

/// The gold marker on the very top.
pub const TIP: GeometryLevel = GeometryLevel {
    height: 0.3,
    radius: 0.15,
    vertical_offset: TREE_LEVELS[TREE_LEVELS.len() - 1].vertical_offset + 0.4,
    colour: rgb(0xFFD700),
};

/// How much the tip glows.
pub const TIP_EMISSIVE_INTENSITY: f32 = 0.5;

/// One renderable part of the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreePart {
    /// The profile this part was built from.
    pub level: GeometryLevel,

    /// The mesh, centred on the origin. Translate it by
    /// [`vertical_offset`](GeometryLevel::vertical_offset) to put it in place.
    pub mesh: Mesh,

    /// How strongly the part glows in its own colour.
    pub emissive_intensity: f32,
}

/// The complete tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeGeometry {
    /// The trunk cylinder.
    pub trunk: TreePart,

    /// The foliage cones, bottom first.
    pub levels: Vec<TreePart>,

    /// The star on top.
    pub tip: TreePart,
}

impl TreeGeometry {
    /// Build the tree from the fixed tables.
    #[instrument]
    pub fn generate() -> Result<Self, GenerationError> {
        let trunk = TreePart {
            level: TRUNK,
            mesh: Mesh::frustum(TRUNK.radius, TRUNK.radius, TRUNK.height, 8, false),
            emissive_intensity: 0.,
        };
        trunk.mesh.validate("tree trunk")?;

        let levels = TREE_LEVELS
            .iter()
            .map(|&level| {
                let mesh = Mesh::frustum(0., level.radius, level.height, 8, true);
                mesh.validate("tree level")?;
                Ok(TreePart {
                    level,
                    mesh,
                    emissive_intensity: 0.,
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        let tip = TreePart {
            level: TIP,
            mesh: Mesh::frustum(0., TIP.radius, TIP.height, 4, false),
            emissive_intensity: TIP_EMISSIVE_INTENSITY,
        };
        tip.mesh.validate("tree tip")?;

        debug!(levels = levels.len(), "Generated tree");
        Ok(Self { trunk, levels, tip })
    }

    /// Every part, from the trunk up to the tip.
    pub fn parts(&self) -> impl Iterator<Item = &TreePart> {
        std::iter::once(&self.trunk)
            .chain(&self.levels)
            .chain(std::iter::once(&self.tip))
    }

    /// The height of the top of the tip.
    pub fn total_height(&self) -> f32 {
        self.tip.level.vertical_offset + self.tip.level.height / 2.
    }
}
