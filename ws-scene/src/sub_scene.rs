//! This module contains the sub-scenes that make up the whole scene, and the rules for when each
//! one is registered and regenerated.

use crate::memo::Memoised;
use rand::Rng;
use strum::{Display, EnumIter};
use tracing::{debug, instrument};
use ws_animator_trait::{Animator, FrameTime};
use ws_animators::{Gifts, Moon, Ornaments, SkyStars, TreeLights, TreeSpin};
use ws_config::{ConfigColour, GroundConfig, SceneConfig};
use ws_geometry::{
    garland::Garland, ground::Ground, tree::TreeGeometry, GenerationError, SpiralParams,
};
use ws_particles::{Snow, SnowKey, StarField, StarFieldKey};

/// Every kind of sub-scene, in registration order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SubSceneKind {
    /// The layered snowy ground.
    Ground,

    /// The tree itself, which is always registered.
    Tree,

    /// The baubles on the tree.
    Ornaments,

    /// The bulbs and the garland wire.
    Lights,

    /// The falling snow.
    Snow,

    /// The presents under the tree.
    Gifts,

    /// The individual twinkling stars.
    Stars,

    /// The distant star field.
    StarField,

    /// The moon and its glow.
    MoonSky,
}

impl SubSceneKind {
    /// Whether this sub-scene should be registered under the given config.
    pub fn is_enabled(self, config: &SceneConfig) -> bool {
        match self {
            Self::Ground => config.decor.ground,
            Self::Tree => true,
            Self::Ornaments => config.tree.ornaments,
            Self::Lights => config.lighting.on,
            Self::Snow => config.snow.enabled,
            Self::Gifts => config.decor.gifts,
            Self::Stars => config.decor.stars,
            Self::StarField => config.decor.star_field,
            Self::MoonSky => config.decor.moon_sky,
        }
    }
}

/// The tree itself and its optional spin.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeScene {
    /// The trunk, the levels and the tip.
    pub geometry: TreeGeometry,

    /// The spin of the whole tree, if it's set to rotate.
    pub spin: Option<TreeSpin>,
}

impl TreeScene {
    /// The current rotation of the whole tree about the y axis.
    pub fn rotation_y(&self) -> f32 {
        self.spin.map_or(0., |spin| spin.rotation_y)
    }
}

/// The bulbs and the wire that threads through them.
#[derive(Clone, Debug, PartialEq)]
pub struct StringLights {
    /// The bulbs.
    pub lights: TreeLights,

    /// The wire.
    pub garland: Garland,
}

/// The parameters the string lights are generated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightsKey {
    /// Where the bulbs go.
    pub params: SpiralParams,

    /// The radius of the wire.
    pub wire_thickness: f32,

    /// The colour of the wire.
    pub wire_colour: ConfigColour,
}

/// The parameters the gifts are generated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftsKey {
    /// The number of gifts.
    pub count: usize,

    /// The radius of the tree the gifts are placed around.
    pub tree_radius: f32,
}

/// The parameters the sky stars are generated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarsKey {
    /// The number of stars.
    pub count: usize,

    /// The radius of the sky hemisphere.
    pub radius: f32,
}

/// The parameters the moon is generated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoonKey {
    /// The centre of the moon.
    pub position: [f32; 3],

    /// The radius of the moon.
    pub size: f32,
}

/// One registered part of the scene.
///
/// Every generated part remembers what it was generated from, so that a config change only
/// regenerates what it has to.
#[derive(Clone, Debug)]
pub enum SubScene {
    /// The ground, keyed on its whole config section.
    Ground(Memoised<GroundConfig, Ground>),

    /// The tree, which is never regenerated.
    Tree(TreeScene),

    /// The ornaments, keyed on the tree radius.
    Ornaments(Memoised<f32, Ornaments>),

    /// The bulbs and garland.
    Lights(Memoised<LightsKey, StringLights>),

    /// The falling snow.
    Snow(Memoised<SnowKey, Snow>),

    /// The presents.
    Gifts(Memoised<GiftsKey, Gifts>),

    /// The sky stars.
    Stars(Memoised<StarsKey, SkyStars>),

    /// The star field.
    StarField(Memoised<StarFieldKey, StarField>),

    /// The moon.
    MoonSky(Memoised<MoonKey, Moon>),
}

fn lights_key(config: &SceneConfig) -> LightsKey {
    LightsKey {
        params: SpiralParams::from_config(&config.tree, &config.lighting),
        wire_thickness: config.lighting.wire_thickness,
        wire_colour: config.lighting.wire_colour,
    }
}

fn gifts_key(config: &SceneConfig) -> GiftsKey {
    GiftsKey {
        count: config.gifts.gift_count(),
        tree_radius: config.tree.radius,
    }
}

fn stars_key(config: &SceneConfig) -> StarsKey {
    StarsKey {
        count: config.stars.star_count(),
        radius: config.stars.radius,
    }
}

fn moon_key(config: &SceneConfig) -> MoonKey {
    MoonKey {
        position: config.moon.position,
        size: config.moon.size,
    }
}

fn generate_lights(key: &LightsKey, config: &SceneConfig) -> Result<StringLights, GenerationError> {
    let garland = Garland::generate(&key.params.paths(), key.wire_thickness, key.wire_colour)?;
    Ok(StringLights {
        lights: TreeLights::new(key.params, config.lighting.colour_scheme),
        garland,
    })
}

fn generate_tree(config: &SceneConfig) -> Result<TreeScene, GenerationError> {
    Ok(TreeScene {
        geometry: TreeGeometry::generate()?,
        spin: config.tree.rotate.then(TreeSpin::default),
    })
}

impl SubScene {
    /// Generate a fresh sub-scene of the given kind.
    #[instrument(skip(config, rng))]
    pub fn generate<R: Rng + ?Sized>(
        kind: SubSceneKind,
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let sub_scene = match kind {
            SubSceneKind::Ground => Self::Ground(Memoised::generate(config.ground.clone(), |c| {
                Ground::generate(c, rng)
            })?),
            SubSceneKind::Tree => Self::Tree(generate_tree(config)?),
            SubSceneKind::Ornaments => Self::Ornaments(Memoised::generate(config.tree.radius, |r| {
                Ok::<_, GenerationError>(Ornaments::generate(rng, *r))
            })?),
            SubSceneKind::Lights => Self::Lights(Memoised::generate(lights_key(config), |k| {
                generate_lights(k, config)
            })?),
            SubSceneKind::Snow => Self::Snow(Memoised::generate(
                SnowKey::from_config(&config.snow),
                |k| Ok::<_, GenerationError>(Snow::generate(*k, rng)),
            )?),
            SubSceneKind::Gifts => Self::Gifts(Memoised::generate(gifts_key(config), |k| {
                Gifts::generate(k.count, k.tree_radius, rng)
            })?),
            SubSceneKind::Stars => Self::Stars(Memoised::generate(stars_key(config), |_| {
                Ok::<_, GenerationError>(SkyStars::generate(&config.stars, rng))
            })?),
            SubSceneKind::StarField => Self::StarField(Memoised::generate(
                StarFieldKey::from_config(&config.star_field),
                |k| Ok::<_, GenerationError>(StarField::generate(*k, rng)),
            )?),
            SubSceneKind::MoonSky => Self::MoonSky(Memoised::generate(moon_key(config), |_| {
                Ok::<_, GenerationError>(Moon::generate(&config.moon, rng))
            })?),
        };

        debug!(%kind, "Generated sub-scene");
        Ok(sub_scene)
    }

    /// Which kind of sub-scene this is.
    pub fn kind(&self) -> SubSceneKind {
        match self {
            Self::Ground(_) => SubSceneKind::Ground,
            Self::Tree(_) => SubSceneKind::Tree,
            Self::Ornaments(_) => SubSceneKind::Ornaments,
            Self::Lights(_) => SubSceneKind::Lights,
            Self::Snow(_) => SubSceneKind::Snow,
            Self::Gifts(_) => SubSceneKind::Gifts,
            Self::Stars(_) => SubSceneKind::Stars,
            Self::StarField(_) => SubSceneKind::StarField,
            Self::MoonSky(_) => SubSceneKind::MoonSky,
        }
    }

    /// Bring this sub-scene in line with a new config.
    ///
    /// Anything whose generation parameters changed is regenerated from scratch. Everything else
    /// keeps its state. Returns whether anything was regenerated.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<bool, GenerationError> {
        match self {
            Self::Ground(memo) => memo.refresh(config.ground.clone(), |c| Ground::generate(c, rng)),
            Self::Tree(tree) => {
                tree.spin = match (config.tree.rotate, tree.spin) {
                    (true, spin) => Some(spin.unwrap_or_default()),
                    (false, _) => None,
                };
                Ok(false)
            }
            Self::Ornaments(memo) => memo.refresh(config.tree.radius, |r| {
                Ok(Ornaments::generate(rng, *r))
            }),
            Self::Lights(memo) => {
                let regenerated = memo.refresh(lights_key(config), |k| generate_lights(k, config))?;
                memo.value_mut()
                    .lights
                    .set_scheme(config.lighting.colour_scheme);
                Ok(regenerated)
            }
            Self::Snow(memo) => memo.refresh(SnowKey::from_config(&config.snow), |k| {
                Ok(Snow::generate(*k, rng))
            }),
            Self::Gifts(memo) => memo.refresh(gifts_key(config), |k| {
                Gifts::generate(k.count, k.tree_radius, rng)
            }),
            Self::Stars(memo) => memo.refresh(stars_key(config), |_| {
                Ok(SkyStars::generate(&config.stars, rng))
            }),
            Self::StarField(memo) => {
                memo.refresh(StarFieldKey::from_config(&config.star_field), |k| {
                    Ok(StarField::generate(*k, rng))
                })
            }
            Self::MoonSky(memo) => {
                memo.refresh(moon_key(config), |_| Ok(Moon::generate(&config.moon, rng)))
            }
        }
    }

    /// Run this sub-scene's per-frame work.
    pub fn tick(&mut self, time: FrameTime, config: &SceneConfig) {
        match self {
            Self::Ground(_) => {}
            Self::Tree(tree) => {
                if let Some(spin) = &mut tree.spin {
                    spin.tick(time, &config.tree);
                }
            }
            Self::Ornaments(memo) => memo.value_mut().tick(time, &()),
            Self::Lights(memo) => memo.value_mut().lights.tick(time, &config.lighting),
            Self::Snow(memo) => memo.value_mut().tick(time, &config.snow),
            Self::Gifts(memo) => memo.value_mut().tick(time, &()),
            Self::Stars(memo) => memo.value_mut().tick(time, &config.stars),
            Self::StarField(memo) => memo.value_mut().tick(time, &config.star_field),
            Self::MoonSky(memo) => memo.value_mut().tick(time, &config.moon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use strum::IntoEnumIterator;
    use ws_config::ColourScheme;

    #[test]
    fn every_kind_generates_test() {
        let config = SceneConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);

        for kind in SubSceneKind::iter() {
            let sub_scene = SubScene::generate(kind, &config, &mut rng).unwrap();
            assert_eq!(sub_scene.kind(), kind);
        }
    }

    #[test]
    fn enabled_test() {
        let mut config = SceneConfig::default();
        assert!(SubSceneKind::iter().all(|kind| kind.is_enabled(&config)));

        config.lighting.on = false;
        config.snow.enabled = false;
        config.decor.moon_sky = false;
        let enabled: Vec<_> = SubSceneKind::iter()
            .filter(|kind| kind.is_enabled(&config))
            .collect();
        assert_eq!(
            enabled,
            [
                SubSceneKind::Ground,
                SubSceneKind::Tree,
                SubSceneKind::Ornaments,
                SubSceneKind::Gifts,
                SubSceneKind::Stars,
                SubSceneKind::StarField,
            ]
        );
    }

    #[test]
    fn update_only_regenerates_on_key_change_test() {
        let mut config = SceneConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);
        let mut snow = SubScene::generate(SubSceneKind::Snow, &config, &mut rng).unwrap();

        config.snow.speed = 2.5;
        assert_eq!(snow.update(&config, &mut rng), Ok(false));

        config.snow.count = 200;
        assert_eq!(snow.update(&config, &mut rng), Ok(true));
        let SubScene::Snow(memo) = &snow else {
            panic!("Expected snow, got {:?}", snow.kind());
        };
        assert_eq!(memo.value().particles().len(), 200);
    }

    #[test]
    fn recolouring_lights_does_not_regenerate_test() {
        let mut config = SceneConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);
        let mut lights = SubScene::generate(SubSceneKind::Lights, &config, &mut rng).unwrap();

        config.lighting.colour_scheme = ColourScheme::Cool;
        assert_eq!(lights.update(&config, &mut rng), Ok(false));
        let SubScene::Lights(memo) = &lights else {
            panic!("Expected lights, got {:?}", lights.kind());
        };
        assert_eq!(memo.value().lights.scheme(), ColourScheme::Cool);

        config.lighting.spirals = 4;
        assert_eq!(lights.update(&config, &mut rng), Ok(true));
        let SubScene::Lights(memo) = &lights else {
            panic!("Expected lights, got {:?}", lights.kind());
        };
        assert_eq!(memo.value().lights.bulbs().len(), 4 * 15);
        assert_eq!(memo.value().garland.strands.len(), 4);
    }

    #[test]
    fn tree_spin_toggles_test() {
        let mut config = SceneConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);
        let mut tree = SubScene::generate(SubSceneKind::Tree, &config, &mut rng).unwrap();

        let SubScene::Tree(scene) = &tree else {
            panic!("Expected tree, got {:?}", tree.kind());
        };
        assert_eq!(scene.spin, None);

        config.tree.rotate = true;
        tree.update(&config, &mut rng).unwrap();
        tree.tick(FrameTime::new(1., 1.), &config);

        let SubScene::Tree(scene) = &tree else {
            panic!("Expected tree, got {:?}", tree.kind());
        };
        assert_eq!(scene.rotation_y(), config.tree.rotation_speed);
    }
}
