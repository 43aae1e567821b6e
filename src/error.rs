use thiserror::Error;

use crate::config::ConfigError;
use crate::sim::LevelError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("level error: {0}")]
    Level(#[from] LevelError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
