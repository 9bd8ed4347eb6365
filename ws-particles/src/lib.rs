//! This crate provides the particle systems: falling snow and the distant star field.
//!
//! Both keep their particles in flat `f32` buffers that are allocated once when the system is
//! generated and then mutated in place for as long as it lives.

mod particle_set;
mod snow;
mod star_field;

pub use self::{
    particle_set::ParticleSet,
    snow::{Snow, SnowKey},
    star_field::{star_field_opacity, StarField, StarFieldKey},
};
