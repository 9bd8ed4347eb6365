use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;
use strum::IntoEnumIterator;
use ws_animator_trait::{Animator, FrameTime};
use ws_config::{SceneConfig, SnowConfig, StarFieldConfig};
use ws_particles::{Snow, SnowKey, StarField, StarFieldKey};
use ws_scene::{DebugRenderer, Renderer, Scene, SceneFrame, SubSceneKind};

/// A renderer that does nothing, but doesn't let the frame be optimised away.
struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &SceneFrame<'_>) {
        black_box(frame);
    }
}

fn snow(c: &mut Criterion) {
    for count in [100, 1000, 3000] {
        let config = SnowConfig {
            count,
            ..SnowConfig::default()
        };

        c.bench_function(&format!("snow step ({count} flakes)"), |b| {
            let mut snow = Snow::generate(
                SnowKey::from_config(&config),
                &mut StdRng::seed_from_u64(12345),
            );
            let mut time = FrameTime::default();

            b.iter(|| {
                time = time.advanced(1. / 60.);
                snow.tick(time, &config);
            });
        });
    }
}

fn star_field(c: &mut Criterion) {
    let config = StarFieldConfig::default();
    let key = StarFieldKey::from_config(&config);

    c.bench_function("star field generation", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(12345),
            |mut rng| StarField::generate(black_box(key), &mut rng),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("star field tick", |b| {
        let mut field = StarField::generate(key, &mut StdRng::seed_from_u64(12345));
        let mut time = FrameTime::default();

        b.iter(|| {
            time = time.advanced(1. / 60.);
            field.tick(time, &config);
        });
    });
}

fn scene(c: &mut Criterion) {
    c.bench_function("scene mount", |b| {
        b.iter_batched(
            || Scene::new(SceneConfig::default()),
            |mut scene| {
                scene.mount(&DebugRenderer).ok();
                scene
            },
            BatchSize::LargeInput,
        );
    });

    c.bench_function("scene tick (everything enabled)", |b| {
        let mut scene = Scene::new(SceneConfig::default());
        scene.mount(&DebugRenderer).ok();
        let mut renderer = NullRenderer;

        b.iter(|| {
            scene.tick(1. / 60.);
            renderer.render(&scene.frame());
        });
    });

    for kind in SubSceneKind::iter() {
        c.bench_function(&format!("scene tick (only {kind})"), |b| {
            let mut config = SceneConfig::default();
            config.lighting.on = kind == SubSceneKind::Lights;
            config.snow.enabled = kind == SubSceneKind::Snow;
            config.tree.ornaments = kind == SubSceneKind::Ornaments;
            config.decor.ground = kind == SubSceneKind::Ground;
            config.decor.gifts = kind == SubSceneKind::Gifts;
            config.decor.stars = kind == SubSceneKind::Stars;
            config.decor.star_field = kind == SubSceneKind::StarField;
            config.decor.moon_sky = kind == SubSceneKind::MoonSky;

            let mut scene = Scene::new(config);
            scene.mount(&DebugRenderer).ok();

            b.iter(|| scene.tick(1. / 60.));
        });
    }
}

criterion_group!(benches, snow, star_field, scene);
criterion_main!(benches);
