//! This crate composes every generator and animator into one [`Scene`].
//!
//! A scene is a list of sub-scenes in a fixed registration order. Disabling a feature removes its
//! sub-scene entirely rather than hiding it, so disabled features cost nothing per frame. The
//! scene never schedules itself: a host calls [`Scene::tick`] once per frame (usually through a
//! [`RenderLoop`]) and then draws the [`SceneFrame`] with its [`Renderer`].

/// Get an RNG for a scene without a fixed seed.
///
/// Tests and benchmarks get a fixed seed so that they're reproducible.
macro_rules! rng {
    () => {{
        use ::rand::{rngs::StdRng, SeedableRng};

        cfg_if::cfg_if! {
            if #[cfg(any(test, feature = "bench"))] {
                StdRng::seed_from_u64(12345)
            } else {
                StdRng::from_entropy()
            }
        }
    }};
}

pub(crate) use rng;

mod error;
mod loading;
mod memo;
mod render_loop;
mod renderer;
mod scene;
pub mod sub_scene;

pub use self::{
    error::SceneError,
    loading::LoadingTracker,
    memo::Memoised,
    render_loop::RenderLoop,
    renderer::{DebugRenderer, Renderer, SceneFrame},
    scene::Scene,
    sub_scene::{SubScene, SubSceneKind},
};
