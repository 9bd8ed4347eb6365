//! This module provides the `run_scene` function to drive the scene at a fixed cadence.

use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, instrument, warn};
use tracing_unwrap::ResultExt;
use ws_config::SceneConfig;
use ws_scene::{DebugRenderer, RenderLoop, Scene};

/// The time between frames, for roughly 60 frames per second.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Run the scene with the [`DebugRenderer`] until Ctrl-C, or until `frame_limit` frames have been
/// drawn.
#[instrument(skip(config))]
pub fn run_scene(config: SceneConfig, frame_limit: Option<u64>) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()
        .unwrap_or_log();

    let mut render_loop = RenderLoop::new(Scene::new(config), DebugRenderer)
        .on_ready(|| info!("Scene finished loading"));

    info!("Beginning render loop");

    runtime.block_on(async move {
        let mut interval = tokio::time::interval(FRAME_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last_frame = Instant::now();
        let mut frames: u64 = 0;

        loop {
            tokio::select! {
                biased;

                // Check for Ctrl-C first so that we stop promptly even when frames are late
                result = tokio::signal::ctrl_c() => {
                    if let Err(error) = result {
                        warn!(%error, "Failed to listen for Ctrl-C");
                    }
                    info!("Stopping render loop");
                    break;
                }

                now = interval.tick() => {
                    let delta = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;

                    render_loop.frame(delta);
                    frames += 1;

                    if frame_limit.is_some_and(|limit| frames >= limit) {
                        info!(frames, "Reached frame limit");
                        break;
                    }
                }
            }
        }

        render_loop.scene_mut().unmount();
    });
}
