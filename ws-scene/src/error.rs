//! This module contains the error type for the scene.

use thiserror::Error;

/// An error that can occur when driving the scene.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SceneError {
    /// The renderer wasn't ready to draw anything, so the scene couldn't be mounted.
    #[error("the render context is not ready")]
    ContextNotReady,
}
