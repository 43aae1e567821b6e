//! Game simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws or waits:
//! - Animations advance one frame per `on_tick`
//! - Randomness only through an injected `RandomSource`
//! - The host owns real timers and drawing

pub mod autopilot;
pub mod level;
pub mod projection;
pub mod rng;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use level::{Cell, CellKind, Direction, Level, LevelError};
pub use projection::{project, project_scaled};
pub use rng::{RandomSource, SequenceSource};
pub use scheduler::{Animation, Scheduler, TimerHandle};
pub use state::{ChargeAnimation, ChargeDirection, GameEvent, GameState, Phase};
pub use tick::{Game, shift_for};
pub use trajectory::{JumpAnimation, height};
