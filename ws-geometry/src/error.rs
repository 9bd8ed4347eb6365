//! This module contains the error type for geometry generation.

use thiserror::Error;

/// An error produced when a generator can't build valid geometry.
///
/// Generation is one-shot, so these are never retried. The scene skips whatever failed and
/// carries on with everything else.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerationError {
    /// A vertex position or normal came out as NaN or infinite.
    #[error("vertex {index} of {what} is not finite")]
    NonFiniteVertex {
        /// What was being generated.
        what: &'static str,

        /// The index of the bad vertex.
        index: usize,
    },

    /// A triangle refers to a vertex that doesn't exist.
    #[error("index {index} in {what} is out of range for {vertices} vertices")]
    IndexOutOfRange {
        /// What was being generated.
        what: &'static str,

        /// The offending index.
        index: u32,

        /// The number of vertices in the mesh.
        vertices: usize,
    },

    /// The mesh has a different number of normals and positions, or a dangling triangle.
    #[error("{what} has mismatched buffers")]
    MismatchedBuffers {
        /// What was being generated.
        what: &'static str,
    },

    /// A curve was asked to pass through too few points.
    #[error("{what} needs at least {needed} points but got {got}")]
    DegeneratePath {
        /// What was being generated.
        what: &'static str,

        /// The minimum number of points.
        needed: usize,

        /// The number of points supplied.
        got: usize,
    },
}
