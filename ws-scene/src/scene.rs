//! This module contains the [`Scene`] itself.

use crate::{
    error::SceneError,
    memo::Memoised,
    renderer::{Renderer, SceneFrame},
    sub_scene::{GiftsKey, SubScene, SubSceneKind},
};
use rand::{rngs::StdRng, SeedableRng};
use std::mem;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, trace, warn};
use ws_animator_trait::{clamp_frame_delta, FrameTime};
use ws_animators::Gifts;
use ws_config::SceneConfig;
use ws_geometry::GenerationError;

/// Build the RNG for one mount of the scene.
fn scene_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => crate::rng!(),
    }
}

/// The whole scene: every registered sub-scene, the clock, and the config they're built from.
///
/// A scene does nothing until it's mounted. Mounting generates every enabled sub-scene, and
/// unmounting throws all of them away, so a remount gets fresh random geometry unless the config
/// carries a seed.
#[derive(Debug)]
pub struct Scene {
    /// The current sanitised config.
    config: SceneConfig,

    /// The registered sub-scenes, in registration order.
    sub_scenes: Vec<SubScene>,

    /// The gifts, kept while they're disabled so they come back where they were.
    parked_gifts: Option<Memoised<GiftsKey, Gifts>>,

    /// The RNG for every seeded-random generator in this mount.
    rng: StdRng,

    /// The scene clock.
    time: FrameTime,

    /// Whether the scene is mounted.
    mounted: bool,
}

impl Scene {
    /// Create an unmounted scene.
    pub fn new(config: SceneConfig) -> Self {
        let config = config.sanitised();
        Self {
            rng: scene_rng(config.seed),
            config,
            sub_scenes: Vec::new(),
            parked_gifts: None,
            time: FrameTime::default(),
            mounted: false,
        }
    }

    /// The current config.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The registered sub-scenes, in registration order.
    pub fn sub_scenes(&self) -> &[SubScene] {
        &self.sub_scenes
    }

    /// The registered sub-scene of the given kind, if there is one.
    pub fn sub_scene(&self, kind: SubSceneKind) -> Option<&SubScene> {
        self.sub_scenes.iter().find(|sub_scene| sub_scene.kind() == kind)
    }

    /// Whether a sub-scene of the given kind is registered.
    pub fn is_registered(&self, kind: SubSceneKind) -> bool {
        self.sub_scene(kind).is_some()
    }

    /// The scene clock as of the last tick.
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Whether the scene is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Everything the renderer needs to draw the current frame.
    pub fn frame(&self) -> SceneFrame<'_> {
        SceneFrame {
            time: self.time,
            sub_scenes: &self.sub_scenes,
        }
    }

    /// Generate every enabled sub-scene and start the clock.
    ///
    /// Mounting an already mounted scene does nothing.
    #[instrument(skip_all)]
    pub fn mount(&mut self, renderer: &dyn Renderer) -> Result<(), SceneError> {
        if self.mounted {
            return Ok(());
        }

        if !renderer.context_ready() {
            return Err(SceneError::ContextNotReady);
        }

        self.rng = scene_rng(self.config.seed);
        self.time = FrameTime::default();
        self.mounted = true;
        self.reconcile();

        info!(sub_scenes = ?self.frame().kinds(), "Mounted scene");
        Ok(())
    }

    /// Throw away every sub-scene and stop the clock.
    pub fn unmount(&mut self) {
        self.sub_scenes.clear();
        self.parked_gifts = None;
        self.mounted = false;
        info!("Unmounted scene");
    }

    /// Replace the config.
    ///
    /// The new config is sanitised first. If the scene is mounted, sub-scenes are registered,
    /// deregistered or regenerated to match it. Disabled gifts are parked rather than dropped, so
    /// they come back where they were when they're enabled again.
    #[instrument(skip_all)]
    pub fn apply_config(&mut self, config: SceneConfig) {
        self.config = config.sanitised();

        if self.mounted {
            self.reconcile();
        }
    }

    /// Bring the registered sub-scenes in line with the current config.
    fn reconcile(&mut self) {
        self.reconcile_with(SubScene::generate::<StdRng>, SubScene::update::<StdRng>);
    }

    /// Bring the registered sub-scenes in line with the current config, using `generate` for new
    /// sub-scenes and `update` for existing ones.
    ///
    /// A sub-scene that fails to generate is skipped and one that fails to regenerate keeps its
    /// previous state. Neither stops the others from registering.
    fn reconcile_with<G, U>(&mut self, mut generate: G, mut update: U)
    where
        G: FnMut(SubSceneKind, &SceneConfig, &mut StdRng) -> Result<SubScene, GenerationError>,
        U: FnMut(&mut SubScene, &SceneConfig, &mut StdRng) -> Result<bool, GenerationError>,
    {
        let mut old = mem::take(&mut self.sub_scenes);

        for kind in SubSceneKind::iter() {
            let existing = old
                .iter()
                .position(|sub_scene| sub_scene.kind() == kind)
                .map(|index| old.swap_remove(index));

            if !kind.is_enabled(&self.config) {
                match existing {
                    Some(SubScene::Gifts(gifts)) => {
                        debug!("Parking gifts");
                        self.parked_gifts = Some(gifts);
                    }
                    Some(_) => debug!(%kind, "Deregistered sub-scene"),
                    None => {}
                }
                continue;
            }

            let existing = existing.or_else(|| match kind {
                SubSceneKind::Gifts => self.parked_gifts.take().map(SubScene::Gifts),
                _ => None,
            });

            let sub_scene = match existing {
                Some(mut sub_scene) => {
                    match update(&mut sub_scene, &self.config, &mut self.rng) {
                        Ok(true) => debug!(%kind, "Regenerated sub-scene"),
                        Ok(false) => {}
                        Err(error) => warn!(%kind, %error, "Failed to regenerate sub-scene"),
                    }
                    sub_scene
                }
                None => match generate(kind, &self.config, &mut self.rng) {
                    Ok(sub_scene) => sub_scene,
                    Err(error) => {
                        warn!(%kind, %error, "Failed to generate sub-scene, skipping it");
                        continue;
                    }
                },
            };

            self.sub_scenes.push(sub_scene);
        }
    }

    /// Advance the clock by `delta` seconds and run every registered sub-scene's per-frame work.
    ///
    /// A single step is capped at [`MAX_FRAME_DELTA`](ws_animator_trait::MAX_FRAME_DELTA). Returns
    /// false and does nothing if the scene isn't mounted.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.mounted {
            return false;
        }

        self.time = self.time.advanced(clamp_frame_delta(delta));
        for sub_scene in &mut self.sub_scenes {
            sub_scene.tick(self.time, &self.config);
        }

        trace!(elapsed = self.time.elapsed, "Ticked scene");
        true
    }

    /// Kick gift `index` into the air, if the tree is interactive.
    ///
    /// Returns whether a resting gift was kicked.
    pub fn click_gift(&mut self, index: usize) -> bool {
        if !self.config.tree.interactive {
            return false;
        }

        match self.sub_scene_mut(SubSceneKind::Gifts) {
            Some(SubScene::Gifts(gifts)) => gifts.value_mut().click(index),
            _ => false,
        }
    }

    /// Toggle ornament `index`, if the tree is interactive.
    ///
    /// Returns the index of the clicked ornament.
    pub fn click_ornament(&mut self, index: usize) -> Option<usize> {
        if !self.config.tree.interactive {
            return None;
        }

        match self.sub_scene_mut(SubSceneKind::Ornaments) {
            Some(SubScene::Ornaments(ornaments)) => ornaments.value_mut().click(index),
            _ => None,
        }
    }

    /// Set whether the pointer is over ornament `index`, if the tree is interactive.
    ///
    /// Returns whether the ornament exists.
    pub fn hover_ornament(&mut self, index: usize, hovered: bool) -> bool {
        if !self.config.tree.interactive {
            return false;
        }

        match self.sub_scene_mut(SubSceneKind::Ornaments) {
            Some(SubScene::Ornaments(ornaments)) => ornaments.value_mut().hover(index, hovered),
            _ => false,
        }
    }

    fn sub_scene_mut(&mut self, kind: SubSceneKind) -> Option<&mut SubScene> {
        if !self.mounted {
            return None;
        }

        self.sub_scenes
            .iter_mut()
            .find(|sub_scene| sub_scene.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DebugRenderer;
    use float_cmp::approx_eq;
    use ws_animator_trait::MAX_FRAME_DELTA;

    struct NotReady;

    impl Renderer for NotReady {
        fn context_ready(&self) -> bool {
            false
        }

        fn render(&mut self, _frame: &SceneFrame<'_>) {}
    }

    fn seeded_config() -> SceneConfig {
        SceneConfig {
            seed: Some(12345),
            ..SceneConfig::default()
        }
    }

    fn mounted_scene(config: SceneConfig) -> Scene {
        let mut scene = Scene::new(config);
        scene.mount(&DebugRenderer).unwrap();
        scene
    }

    fn failure() -> GenerationError {
        GenerationError::DegeneratePath {
            what: "test path",
            needed: 2,
            got: 0,
        }
    }

    fn ornament_spin(scene: &Scene) -> f32 {
        match scene.sub_scene(SubSceneKind::Ornaments) {
            Some(SubScene::Ornaments(ornaments)) => ornaments.value().ornaments()[0].rotation_y,
            other => panic!("Expected ornaments, got {other:?}"),
        }
    }

    fn snow_count(scene: &Scene) -> usize {
        match scene.sub_scene(SubSceneKind::Snow) {
            Some(SubScene::Snow(snow)) => snow.value().particles().len(),
            other => panic!("Expected snow, got {other:?}"),
        }
    }

    fn gift_heights(scene: &Scene) -> Vec<f32> {
        match scene.sub_scene(SubSceneKind::Gifts) {
            Some(SubScene::Gifts(gifts)) => gifts
                .value()
                .gifts()
                .iter()
                .map(|gift| gift.physics.position_y)
                .collect(),
            _ => vec![],
        }
    }

    #[test]
    fn mount_test() {
        let mut scene = Scene::new(seeded_config());
        assert!(scene.sub_scenes().is_empty());
        assert!(!scene.tick(0.016));

        assert_eq!(scene.mount(&NotReady), Err(SceneError::ContextNotReady));
        assert!(!scene.is_mounted());

        scene.mount(&DebugRenderer).unwrap();
        assert_eq!(
            scene.frame().kinds(),
            SubSceneKind::iter().collect::<Vec<_>>()
        );

        assert!(scene.tick(0.016));
        assert!(approx_eq!(f32, scene.time().elapsed, 0.016, ulps = 2));

        scene.unmount();
        assert!(scene.sub_scenes().is_empty());
        assert!(!scene.click_gift(0));
    }

    #[test]
    fn disabled_sub_scenes_are_deregistered_test() {
        let mut scene = mounted_scene(seeded_config());

        let mut config = scene.config().clone();
        config.snow.enabled = false;
        config.decor.star_field = false;
        scene.apply_config(config.clone());

        assert!(!scene.is_registered(SubSceneKind::Snow));
        assert!(!scene.is_registered(SubSceneKind::StarField));
        assert!(scene.is_registered(SubSceneKind::Tree));

        // Registration order is kept when they come back
        config.snow.enabled = true;
        config.decor.star_field = true;
        scene.apply_config(config);
        assert_eq!(
            scene.frame().kinds(),
            SubSceneKind::iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn config_is_sanitised_test() {
        let mut config = seeded_config();
        config.snow.count = 1_000_000;
        let scene = mounted_scene(config);

        assert_eq!(scene.config().snow.count, 3000);
        match scene.sub_scene(SubSceneKind::Snow) {
            Some(SubScene::Snow(snow)) => assert_eq!(snow.value().particles().len(), 3000),
            other => panic!("Expected snow, got {other:?}"),
        }
    }

    #[test]
    fn seeded_scenes_are_reproducible_test() {
        let a = mounted_scene(seeded_config());
        let b = mounted_scene(seeded_config());

        assert_eq!(gift_heights(&a), gift_heights(&b));
        match (
            a.sub_scene(SubSceneKind::Snow),
            b.sub_scene(SubSceneKind::Snow),
        ) {
            (Some(SubScene::Snow(a)), Some(SubScene::Snow(b))) => {
                assert_eq!(a.value().particles(), b.value().particles());
            }
            other => panic!("Expected snow, got {other:?}"),
        }
    }

    #[test]
    fn gifts_resume_in_place_test() {
        let mut scene = mounted_scene(seeded_config());
        assert!(scene.click_gift(1));
        assert!(!scene.click_gift(1));

        for _ in 0..10 {
            scene.tick(1. / 60.);
        }
        let heights = gift_heights(&scene);

        let mut config = scene.config().clone();
        config.decor.gifts = false;
        scene.apply_config(config.clone());
        assert!(!scene.is_registered(SubSceneKind::Gifts));
        assert!(!scene.click_gift(0));

        // Parked gifts don't move
        for _ in 0..10 {
            scene.tick(1. / 60.);
        }

        config.decor.gifts = true;
        scene.apply_config(config);
        assert_eq!(gift_heights(&scene), heights);
    }

    #[test]
    fn clicks_respect_interactive_test() {
        let mut scene = mounted_scene(seeded_config());
        assert_eq!(scene.click_ornament(3), Some(3));
        assert!(scene.hover_ornament(3, true));
        assert_eq!(scene.click_ornament(1000), None);

        let mut config = scene.config().clone();
        config.tree.interactive = false;
        scene.apply_config(config.clone());
        assert_eq!(scene.click_ornament(3), None);
        assert!(!scene.hover_ornament(3, true));
        assert!(!scene.click_gift(0));

        config.tree.interactive = true;
        scene.apply_config(config);
        assert!(scene.click_gift(0));
    }

    #[test]
    fn failed_generation_skips_only_that_sub_scene_test() {
        let mut scene = Scene::new(seeded_config());
        scene.mounted = true;
        scene.reconcile_with(
            |kind: SubSceneKind, config: &SceneConfig, rng: &mut StdRng| {
                if kind == SubSceneKind::Snow {
                    Err(failure())
                } else {
                    SubScene::generate(kind, config, rng)
                }
            },
            SubScene::update::<StdRng>,
        );

        let expected: Vec<_> = SubSceneKind::iter()
            .filter(|&kind| kind != SubSceneKind::Snow)
            .collect();
        assert_eq!(scene.frame().kinds(), expected);

        assert!(scene.tick(0.05));
        assert!(approx_eq!(f32, ornament_spin(&scene), 0.025, ulps = 2));

        // The failed sub-scene is retried on the next config change
        scene.apply_config(scene.config().clone());
        assert!(scene.is_registered(SubSceneKind::Snow));
    }

    #[test]
    fn failed_regeneration_keeps_the_old_sub_scene_test() {
        let mut scene = mounted_scene(seeded_config());
        let old_count = snow_count(&scene);

        let mut config = scene.config().clone();
        config.snow.count = 200;
        config.tree.rotate = true;
        scene.config = config.sanitised();
        scene.reconcile_with(
            SubScene::generate::<StdRng>,
            |sub_scene: &mut SubScene, config: &SceneConfig, rng: &mut StdRng| {
                if sub_scene.kind() == SubSceneKind::Snow {
                    Err(failure())
                } else {
                    sub_scene.update(config, rng)
                }
            },
        );

        assert_eq!(
            scene.frame().kinds(),
            SubSceneKind::iter().collect::<Vec<_>>()
        );
        assert_eq!(snow_count(&scene), old_count);
        match scene.sub_scene(SubSceneKind::Tree) {
            Some(SubScene::Tree(tree)) => assert!(tree.spin.is_some()),
            other => panic!("Expected the tree, got {other:?}"),
        }

        // The old key is kept, so the next reconcile tries again
        scene.reconcile();
        assert_eq!(snow_count(&scene), 200);
    }

    #[test]
    fn extreme_deltas_test() {
        let mut scene = mounted_scene(seeded_config());
        scene.click_gift(0);

        for delta in [0., -1., f32::NAN, f32::INFINITY, 1e6, 0.016] {
            assert!(scene.tick(delta));
            assert!(scene.time().elapsed.is_finite());
            assert!(scene.time().delta <= MAX_FRAME_DELTA);
        }
        assert!(gift_heights(&scene).iter().all(|height| height.is_finite()));
    }
}
