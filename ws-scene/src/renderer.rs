//! This module contains the [`Renderer`] trait that a host implements to draw the scene, and a
//! [`DebugRenderer`] that just logs.

use crate::sub_scene::{SubScene, SubSceneKind};
use tracing::{info, instrument};
use ws_animator_trait::FrameTime;

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct SceneFrame<'a> {
    /// The scene clock for this frame.
    pub time: FrameTime,

    /// Every registered sub-scene, in registration order.
    pub sub_scenes: &'a [SubScene],
}

impl SceneFrame<'_> {
    /// The kinds of every registered sub-scene, in registration order.
    pub fn kinds(&self) -> Vec<SubSceneKind> {
        self.sub_scenes.iter().map(SubScene::kind).collect()
    }
}

/// The trait implemented by anything that can draw the scene.
pub trait Renderer {
    /// Whether the render context is ready to draw.
    ///
    /// The scene won't mount until this returns true.
    fn context_ready(&self) -> bool {
        true
    }

    /// Draw one frame.
    fn render(&mut self, frame: &SceneFrame<'_>);
}

/// A simple debug renderer that just logs every frame with tracing at the info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugRenderer;

impl Renderer for DebugRenderer {
    #[instrument(skip_all)]
    fn render(&mut self, frame: &SceneFrame<'_>) {
        info!(elapsed = frame.time.elapsed, sub_scenes = ?frame.kinds());
    }
}
