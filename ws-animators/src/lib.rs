//! This crate provides the per-object animators: the tree lights, the bouncing gifts, the
//! ornaments, the moon, the sky stars and the spinning tree.
//!
//! Every animator owns its own state and implements [`Animator`](ws_animator_trait::Animator).
//! Anything that needs randomness after generation (like a gift being kicked into the air)
//! carries its own RNG, seeded from the scene's RNG when it was generated.

mod gifts;
mod lights;
mod moon;
mod ornaments;
mod sky_stars;
mod tree_spin;

pub use self::{
    gifts::{Gift, GiftPhysics, GiftState, Gifts},
    lights::{emission, mode_intensity, palette, BulbEmission, LightBulb, TreeLights},
    moon::{moon_pulse, Moon},
    ornaments::{Ornament, Ornaments},
    sky_stars::{twinkle, SkyStar, SkyStars},
    tree_spin::TreeSpin,
};
