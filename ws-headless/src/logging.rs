//! This module handles logging.

use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};
use tracing_unwrap::ResultExt;

/// Initialise a subscriber for tracing to log to `stdout`.
///
/// The level defaults to INFO and can be overridden with `RUST_LOG`.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::registry().with(
        Layer::new()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            ),
    );

    tracing::subscriber::set_global_default(subscriber)
        .expect_or_log("Setting the global default for tracing should be okay");
}
