//! Logging and tracing initialization.
//!
//! Built from [`LoggingConfig`]: level filter (overridable via `RUST_LOG`),
//! JSON or human-readable formatting, and an optional log file sink.

use std::sync::Arc;

use tracing::Dispatch;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::ReelcutResult;

/// Initialize the global tracing subscriber from the given configuration.
///
/// Fails only when the configured log file cannot be created. A second
/// call is harmless; the first subscriber wins.
pub fn init_logging(config: &LoggingConfig) -> ReelcutResult<()> {
    let dispatch = build_dispatch(config)?;
    tracing::dispatcher::set_global_default(dispatch).ok();
    Ok(())
}

/// Initialize logging with defaults (stderr, human-readable, "info").
pub fn init_default_logging() {
    // Defaults carry no file sink, so building them cannot fail.
    let _ = init_logging(&LoggingConfig::default());
}

fn build_dispatch(config: &LoggingConfig) -> ReelcutResult<Dispatch> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let writer = match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            BoxMakeWriter::new(Arc::new(std::fs::File::create(path)?))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    let dispatch = if config.json {
        Dispatch::new(builder.json().finish())
    } else {
        Dispatch::new(builder.with_target(true).finish())
    };
    Ok(dispatch)
}
