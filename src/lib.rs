//! Cell Golf - an axonometric one-button golf game
//!
//! Core modules:
//! - `sim`: Level generation, jump trajectories, projection and the game state machine
//! - `view`: Render snapshots and cell geometry for the host's drawing layer
//! - `config`: Construction-time options

pub mod config;
pub mod error;
pub mod sim;
pub mod view;

pub use config::{Config, ConfigError, JumpShift};
pub use error::GameError;
pub use sim::{Game, GameEvent, Phase};
pub use view::RenderSnapshot;
