use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry};

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Installs the global subscriber: bunyan JSON lines on stdout, filtered by `RUST_LOG`.
///
/// `log` records (actix's `Logger` middleware) are forwarded into the same pipeline.
pub fn init() -> Result<(), TryInitError> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("INFO"));
    let formatting_layer = BunyanFormattingLayer::new(APP_NAME.into(), std::io::stdout);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .try_init()
}
