//! Game state and core simulation types
//!
//! Everything the host needs to draw a frame lives here; the controller in
//! `tick` is the only thing that mutates it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::level::{Cell, Level};
use super::trajectory::JumpAnimation;

/// Frames for power to sweep from 0 to 1
pub const CHARGE_FRAMES: u32 = 100;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the next action
    Idle,
    /// Power meter oscillating
    Charging,
    /// Ball in flight
    Jumping,
}

/// Which way the power meter is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChargeDirection {
    #[default]
    Ascending,
    Descending,
}

/// Power meter animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChargeAnimation {
    pub active: bool,
    pub progress_frame: u32,
    pub direction: ChargeDirection,
}

impl ChargeAnimation {
    /// Power for the current frame
    #[inline]
    pub fn power(&self) -> f32 {
        self.progress_frame as f32 / CHARGE_FRAMES as f32
    }

    /// Move one frame, turning around at both ends
    pub fn step(&mut self) {
        self.progress_frame = match self.direction {
            ChargeDirection::Ascending => (self.progress_frame + 1).min(CHARGE_FRAMES),
            ChargeDirection::Descending => self.progress_frame.saturating_sub(1),
        };
        if self.progress_frame == 0 || self.progress_frame == CHARGE_FRAMES {
            self.direction = match self.direction {
                ChargeDirection::Ascending => ChargeDirection::Descending,
                ChargeDirection::Descending => ChargeDirection::Ascending,
            };
        }
    }
}

/// Notifications for the host (sounds, HUD flashes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ChargeStarted,
    JumpStarted {
        column_shift: i32,
        row_shift: i32,
        is_correct: bool,
    },
    Landed {
        index: usize,
    },
    Missed {
        balls_remaining: u32,
    },
    LevelRestarted {
        level: u32,
    },
    LevelLoaded {
        level: u32,
        cells: usize,
    },
}

/// Complete per-session game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level: Level,
    pub current_cell_index: usize,
    pub balls_remaining: u32,
    /// Charge value (0..1)
    pub power: f32,
    pub charge: ChargeAnimation,
    /// Present only while the ball is in flight
    pub jump: Option<JumpAnimation>,
    /// Ball offset from its cell (cell units)
    pub ball_offset: Vec3,
}

impl GameState {
    pub fn new(level: Level, balls: u32) -> Self {
        Self {
            level,
            current_cell_index: 0,
            balls_remaining: balls,
            power: 0.0,
            charge: ChargeAnimation::default(),
            jump: None,
            ball_offset: Vec3::ZERO,
        }
    }

    #[inline]
    pub fn current_level(&self) -> u32 {
        self.level.number
    }

    pub fn phase(&self) -> Phase {
        if self.jump.is_some() {
            Phase::Jumping
        } else if self.charge.active {
            Phase::Charging
        } else {
            Phase::Idle
        }
    }

    pub fn current_cell(&self) -> Option<&Cell> {
        self.level.get(self.current_cell_index)
    }

    /// True when the ball rests on the finish cell
    pub fn on_finish(&self) -> bool {
        self.current_cell().is_some_and(|c| c.is_finish)
    }

    /// Put the ball back on the start cell with a full set of balls
    pub fn reset(&mut self, balls: u32) {
        self.current_cell_index = 0;
        self.balls_remaining = balls;
        self.power = 0.0;
        self.charge = ChargeAnimation::default();
        self.jump = None;
        self.ball_offset = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_sweeps_up_and_down() {
        let mut charge = ChargeAnimation::default();
        for _ in 0..CHARGE_FRAMES {
            charge.step();
        }
        assert_eq!(charge.progress_frame, CHARGE_FRAMES);
        assert_eq!(charge.power(), 1.0);
        assert_eq!(charge.direction, ChargeDirection::Descending);

        for _ in 0..CHARGE_FRAMES {
            charge.step();
        }
        assert_eq!(charge.progress_frame, 0);
        assert_eq!(charge.direction, ChargeDirection::Ascending);
    }

    #[test]
    fn test_phase_follows_animations() {
        let level = Level::generate(1, &mut crate::sim::rng::seeded(4)).unwrap();
        let mut state = GameState::new(level, 5);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.on_finish());
        state.current_cell_index = state.level.finish_index();
        assert!(state.on_finish());

        state.charge.active = true;
        assert_eq!(state.phase(), Phase::Charging);

        state.jump = Some(JumpAnimation::start(0, 0, Some(0)));
        assert_eq!(state.phase(), Phase::Jumping);

        state.reset(5);
        assert_eq!(state.phase(), Phase::Idle);
    }
}
