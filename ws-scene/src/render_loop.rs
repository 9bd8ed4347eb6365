//! This module contains the [`RenderLoop`], which ties a scene to a renderer.

use crate::{loading::LoadingTracker, renderer::Renderer, scene::Scene};
use tracing::trace;
use ws_animator_trait::sanitise_delta;

/// Drives a [`Scene`] and a [`Renderer`] one frame at a time.
///
/// The loop has no clock of its own. The host calls [`frame`](Self::frame) once per displayed
/// frame with the time since the previous one.
pub struct RenderLoop<R: Renderer> {
    /// The scene being drawn.
    scene: Scene,

    /// What draws it.
    renderer: R,

    /// Decides when the loading screen can go.
    loading: LoadingTracker,

    /// The time since the loop started, which the loading tracker runs on.
    elapsed: f32,

    /// Called once when the scene has finished loading.
    on_ready: Option<Box<dyn FnOnce()>>,
}

impl<R: Renderer> RenderLoop<R> {
    /// Create a render loop for the given scene and renderer.
    pub fn new(scene: Scene, renderer: R) -> Self {
        let loading = LoadingTracker::new(&scene.config().loading);
        Self {
            scene,
            renderer,
            loading,
            elapsed: 0.,
            on_ready: None,
        }
    }

    /// Call `callback` once, when the loading tracker fires.
    #[must_use = ".on_ready() returns the render loop"]
    pub fn on_ready(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    /// The scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably, for config changes and clicks between frames.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Whether the loading tracker has fired.
    pub fn is_loaded(&self) -> bool {
        self.loading.is_ready()
    }

    /// Run one frame.
    ///
    /// The scene is mounted on the first frame where the render context is ready. Once mounted,
    /// every frame ticks the scene and hands it to the renderer.
    pub fn frame(&mut self, delta: f32) {
        let delta = sanitise_delta(delta);
        self.elapsed += delta;

        if !self.scene.is_mounted() {
            if let Err(error) = self.scene.mount(&self.renderer) {
                trace!(%error, "Waiting to mount");
            }
        }

        if self.scene.tick(delta) {
            self.renderer.render(&self.scene.frame());
        }

        if self
            .loading
            .observe(self.elapsed, self.renderer.context_ready())
        {
            if let Some(callback) = self.on_ready.take() {
                callback();
            }
        }
    }
}
