//! This binary crate runs Winter WonderScene headlessly, logging every frame with the debug
//! renderer.
//!
//! Set `SCENE_CONFIG` to the path of a RON scene config to use it instead of the defaults, and
//! `SCENE_FRAMES` to stop after that many frames.

mod logging;
mod run_scene;

use color_eyre::{eyre::WrapErr, Result};
use std::fs;
use tracing::info;
use tracing_unwrap::ResultExt;
use ws_config::SceneConfig;

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init_tracing();

    let config = load_config()?;
    let frame_limit = std::env::var("SCENE_FRAMES").ok().map(|frames| {
        frames
            .parse::<u64>()
            .expect_or_log("SCENE_FRAMES must be a positive integer")
    });

    run_scene::run_scene(config, frame_limit);
    Ok(())
}

/// Read the scene config from the file named by `SCENE_CONFIG`, or use the default.
fn load_config() -> Result<SceneConfig> {
    let Ok(path) = std::env::var("SCENE_CONFIG") else {
        info!("Using the default scene config");
        return Ok(SceneConfig::default());
    };

    let text =
        fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read scene config {path}"))?;
    let config = SceneConfig::from_ron(&text)
        .wrap_err_with(|| format!("Failed to parse scene config {path}"))?;

    info!(%path, "Loaded scene config");
    Ok(config)
}
