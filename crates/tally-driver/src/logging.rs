//! Logging setup for the `tally` binary.
//!
//! Built on `tracing-subscriber`, with a per-stage filter so e.g. the parser
//! can be traced while the lexer stays quiet.

use std::io;

use clap::ValueEnum;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    Layer,
};

use crate::config::{LogConfig, DRIVER_TARGET, LEXER_TARGET, PARSER_TARGET};

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line, colored
    Pretty,
    /// One line per event
    Compact,
    /// JSON, one object per line
    Json,
}

/// Builds the per-target filter from `config`.
pub fn targets(config: &LogConfig) -> Targets {
    Targets::new()
        .with_default(config.global)
        .with_target(LEXER_TARGET, config.level_for(LEXER_TARGET))
        .with_target(PARSER_TARGET, config.level_for(PARSER_TARGET))
        .with_target(DRIVER_TARGET, config.level_for(DRIVER_TARGET))
}

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// results.
pub fn init(config: &LogConfig) -> Result<(), TryInitError> {
    let layer = format_layer(config.format).with_filter(targets(config));
    tracing_subscriber::registry().with(layer).try_init()
}

fn format_layer(format: LogFormat) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync> {
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .without_time()
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
    }
}
