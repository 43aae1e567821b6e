//! Demo mode: the game plays itself
//!
//! Charges, then releases on the first power value whose shift reaches the
//! next cell exactly. Restarts and level loads go through the same action the
//! player would press.

use super::level::Level;
use super::rng::RandomSource;
use super::state::{GameState, Phase};
use super::tick::{Game, shift_for};
use crate::config::Config;
use crate::error::GameError;

/// Cells between the ball and the next path cell
pub fn distance_to_next(level: &Level, index: usize) -> Option<i32> {
    let from = level.get(index)?;
    let to = level.get(index + 1)?;
    Some((to.column - from.column).abs().max((to.row - from.row).abs()))
}

/// True when releasing now lands on the next cell
pub fn wants_release(state: &GameState, config: &Config) -> bool {
    let index = state.current_cell_index;
    let (Some(cell), Some(distance)) = (
        state.level.get(index),
        distance_to_next(&state.level, index),
    ) else {
        return false;
    };
    // A zero-power tick at the start of the charge would waste the jump
    state.power > 0.0 && shift_for(state.power, cell.kind, config.jump_shift) == distance
}

/// Press the action button if the autopilot would; returns whether it did
pub fn act<R: RandomSource>(game: &mut Game<R>) -> Result<bool, GameError> {
    let press = match game.phase() {
        Phase::Idle => true,
        Phase::Charging => wants_release(game.state(), game.config()),
        Phase::Jumping => false,
    };
    if press {
        game.on_action()?;
    }
    Ok(press)
}
