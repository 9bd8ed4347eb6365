//! This crate provides the procedural geometry for the scene.
//!
//! Generators come in two flavours. Deterministic generators (the tree levels, the spiral paths
//! and the garland curve) are pure functions of their numeric inputs, so calling them twice gives
//! bit-identical output. Seeded generators (the ground relief, and the placement of ornaments,
//! gifts, sky stars and moon craters) take an explicit `&mut impl Rng`, so their output is
//! reproducible whenever the caller seeds the RNG the same way.
//!
//! The vertical axis is y everywhere in this crate.

use rand::Rng;

pub mod colour;
pub mod garland;
pub mod gift_box;
pub mod ground;
pub mod placement;
pub mod spiral;
pub mod transform;
pub mod tree;

mod error;
mod mesh;

pub use self::{
    colour::{RGBArray, RGBFloat},
    error::GenerationError,
    mesh::Mesh,
    spiral::{SpiralParams, SpiralPath},
    transform::Transform,
};

/// Draw a uniform sample from `[low, high)`.
///
/// Unlike [`Rng::gen_range`], this never panics on an empty or inverted range; it just returns
/// `low` when `high == low`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    low + rng.gen::<f32>() * (high - low)
}
