//! Process entry: configuration and pipeline wiring for the `herald` binary.

pub mod config;

use herald_infra::{OutputSink, Pipeline};

pub use config::{AppConfig, ConfigError};

/// Build the user pipeline described by `config`, writing event lines to `sink`.
pub fn build_pipeline(config: &AppConfig, sink: impl OutputSink + 'static) -> Pipeline {
    Pipeline::builder(sink)
        .format(config.output_format)
        .policy(config.failure_policy)
        .build()
}
