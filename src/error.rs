use thiserror::Error;

use stopwatch_core::TrackerError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
