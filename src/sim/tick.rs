//! Game controller
//!
//! Owns the state, the scheduler and the random source. The host calls
//! `on_action` for every click/key press and `on_tick` (or `advance`) to pace
//! animations, then reads a snapshot to redraw.

use glam::Vec3;
use rand_pcg::Pcg32;

use super::level::{CellKind, Level};
use super::rng::{self, RandomSource};
use super::scheduler::{Animation, Scheduler, TimerHandle};
use super::state::{ChargeAnimation, GameEvent, GameState, Phase};
use super::trajectory::JumpAnimation;
use crate::config::{Config, JumpShift};
use crate::error::GameError;

/// Cells to move for a given power on a given cell kind
pub fn shift_for(power: f32, kind: CellKind, jump_shift: JumpShift) -> i32 {
    let multiplier = match kind {
        CellKind::Hazard => jump_shift.min,
        CellKind::Normal => jump_shift.max,
    };
    (power.clamp(0.0, 1.0) * multiplier as f32).round() as i32
}

/// One play session
#[derive(Debug)]
pub struct Game<R: RandomSource = Pcg32> {
    config: Config,
    state: GameState,
    scheduler: Scheduler,
    timer: Option<TimerHandle>,
    rng: R,
    events: Vec<GameEvent>,
}

impl Game<Pcg32> {
    /// Start a session on level 1 with a fresh random seed
    pub fn new(config: Config) -> Result<Self, GameError> {
        Self::with_seed(config, rng::random_seed())
    }

    /// Start a session with a reproducible level sequence
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, GameError> {
        log::info!("Game initialized with seed: {}", seed);
        Self::with_rng(config, rng::seeded(seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// Start a session on level 1 drawing levels from `rng`
    pub fn with_rng(config: Config, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let level = Level::generate(1, &mut rng)?;
        let cells = level.len();
        let state = GameState::new(level, config.balls_per_level);
        Ok(Self {
            scheduler: Scheduler::new(config.tick_period_ms),
            config,
            state,
            timer: None,
            rng,
            events: vec![GameEvent::LevelLoaded { level: 1, cells }],
        })
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.state.level
    }

    #[inline]
    pub fn current_level(&self) -> u32 {
        self.state.current_level()
    }

    #[inline]
    pub fn current_cell_index(&self) -> usize {
        self.state.current_cell_index
    }

    #[inline]
    pub fn balls_remaining(&self) -> u32 {
        self.state.balls_remaining
    }

    #[inline]
    pub fn power(&self) -> f32 {
        self.state.power
    }

    #[inline]
    pub fn ball_offset(&self) -> Vec3 {
        self.state.ball_offset
    }

    /// True while an animation wants ticks
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.timer.is_some()
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle a click or key press
    pub fn on_action(&mut self) -> Result<(), GameError> {
        match self.state.phase() {
            Phase::Jumping => {
                log::trace!("Action ignored while jumping");
            }
            _ if self.state.balls_remaining == 0 => self.restart_level(),
            _ if self.state.on_finish() => self.next_level()?,
            Phase::Charging => {
                self.stop_charge();
                self.release();
            }
            Phase::Idle => self.start_charge(),
        }
        Ok(())
    }

    /// Advance whichever animation is running by one frame
    pub fn on_tick(&mut self) {
        match self.state.phase() {
            Phase::Idle => {}
            Phase::Charging => {
                self.state.power = self.state.charge.power();
                self.state.charge.step();
            }
            Phase::Jumping => {
                // The last sampled frame stays on screen for one tick before landing
                let Some(jump) = self.state.jump.as_mut() else {
                    return;
                };
                if jump.is_finished() {
                    self.finish_jump();
                } else {
                    self.state.ball_offset = jump.step();
                }
            }
        }
    }

    /// Feed elapsed wall time; runs every tick that fell due
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        let due = self.scheduler.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due {
            if !self.is_animating() {
                break;
            }
            self.on_tick();
            ran += 1;
        }
        ran
    }

    /// Back to the start cell with a full set of balls
    pub fn restart_level(&mut self) {
        self.cancel_timer();
        self.state.reset(self.config.balls_per_level);
        let level = self.state.current_level();
        log::info!("Level {} restarted", level);
        self.events.push(GameEvent::LevelRestarted { level });
    }

    /// Generate and load the level after the current one
    pub fn next_level(&mut self) -> Result<(), GameError> {
        let next = self.state.current_level().saturating_add(1);
        self.load_level(next)
    }

    /// Generate and load level `number`
    pub fn load_level(&mut self, number: u32) -> Result<(), GameError> {
        let level = Level::generate(number, &mut self.rng)?;
        self.cancel_timer();
        let cells = level.len();
        self.state = GameState::new(level, self.config.balls_per_level);
        log::info!("Level {} loaded ({} cells)", number, cells);
        self.events.push(GameEvent::LevelLoaded {
            level: number,
            cells,
        });
        Ok(())
    }

    fn start_charge(&mut self) {
        self.state.power = 0.0;
        self.state.charge = ChargeAnimation {
            active: true,
            ..Default::default()
        };
        self.timer = Some(self.scheduler.start(Animation::Charge));
        self.events.push(GameEvent::ChargeStarted);
    }

    fn stop_charge(&mut self) {
        self.state.charge.active = false;
        self.cancel_timer();
    }

    /// Launch the ball with the current power
    fn release(&mut self) {
        let index = self.state.current_cell_index;
        let level = &self.state.level;
        // No next cell to aim at from the finish
        let (Some(cell), Some(heading)) = (level.get(index), level.heading(index)) else {
            return;
        };

        let shift = shift_for(self.state.power, cell.kind, self.config.jump_shift);
        let (dc, dr) = heading.delta();
        let (column_shift, row_shift) = (dc * shift, dr * shift);

        // A landing spot past the coordinate range cannot be on the path
        let target = cell
            .column
            .checked_add(column_shift)
            .zip(cell.row.checked_add(row_shift))
            .and_then(|position| {
                level.find_ahead(index, self.config.visible_cell_window, position)
            });

        log::debug!(
            "Jump from cell {} by ({}, {}) power={:.2} target={:?}",
            index,
            column_shift,
            row_shift,
            self.state.power,
            target
        );

        let jump = JumpAnimation::start(column_shift, row_shift, target);
        self.events.push(GameEvent::JumpStarted {
            column_shift,
            row_shift,
            is_correct: jump.is_correct,
        });
        self.state.jump = Some(jump);
        self.state.ball_offset = Vec3::ZERO;
        self.timer = Some(self.scheduler.start(Animation::Jump));
    }

    fn finish_jump(&mut self) {
        self.cancel_timer();
        let Some(jump) = self.state.jump.take() else {
            return;
        };

        match jump.target_index {
            Some(index) => {
                self.state.current_cell_index = index;
                self.events.push(GameEvent::Landed { index });
            }
            None => {
                self.state.balls_remaining = self.state.balls_remaining.saturating_sub(1);
                log::debug!("Missed, {} balls left", self.state.balls_remaining);
                self.events.push(GameEvent::Missed {
                    balls_remaining: self.state.balls_remaining,
                });
            }
        }

        self.state.power = 0.0;
        self.state.ball_offset = Vec3::ZERO;
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
    }
}
