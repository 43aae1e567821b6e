//! Procedural path generation
//!
//! A level is a chain of cells starting at the origin. Each step moves one to
//! three cells along a single axis, and the path turns at most every other
//! step. The path may cross itself; no attempt is made to prevent it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rng::RandomSource;

/// Cells per level number (level N has N * 10 cells)
pub const CELLS_PER_LEVEL: u32 = 10;

/// Chance (percent) that a cell is a hazard
pub const HAZARD_CHANCE: f32 = 20.0;
/// Chance (percent) of a one-cell step
pub const SHORT_STEP_CHANCE: f32 = 80.0;
/// Chance (percent) of a two-cell step once a one-cell step was rejected
pub const MEDIUM_STEP_CHANCE: f32 = 90.0;
/// Chance (percent) of turning on a given step
pub const TURN_CHANCE: f32 = 25.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level number must be at least 1, got {0}")]
    InvalidLevelNumber(u32),
    #[error("level {0} has too many cells to generate")]
    TooManyCells(u32),
    #[error("level {number} needs {expected} cells, got {actual}")]
    WrongCellCount {
        number: u32,
        expected: usize,
        actual: usize,
    },
    #[error("invalid path at cell {index}: {reason}")]
    InvalidPath { index: usize, reason: &'static str },
}

/// Cell surface type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Normal,
    /// Rough ground: the ball only travels a short distance from here
    Hazard,
}

/// Direction the path is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Unit (column, row) step for this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }
}

/// One tile of the path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub column: i32,
    pub row: i32,
    pub kind: CellKind,
    /// Only the last cell of a level
    pub is_finish: bool,
}

impl Cell {
    pub fn new(column: i32, row: i32, kind: CellKind, is_finish: bool) -> Self {
        Self {
            column,
            row,
            kind,
            is_finish,
        }
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.column, self.row)
    }
}

/// A generated level: an ordered path of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LevelData")]
pub struct Level {
    pub number: u32,
    cells: Vec<Cell>,
}

/// Unchecked wire form of a level
#[derive(Deserialize)]
struct LevelData {
    number: u32,
    cells: Vec<Cell>,
}

impl TryFrom<LevelData> for Level {
    type Error = LevelError;

    fn try_from(data: LevelData) -> Result<Self, Self::Error> {
        Level::from_cells(data.number, data.cells)
    }
}

fn cell_count(number: u32) -> Result<usize, LevelError> {
    if number == 0 {
        return Err(LevelError::InvalidLevelNumber(number));
    }
    number
        .checked_mul(CELLS_PER_LEVEL)
        .map(|count| count as usize)
        .ok_or(LevelError::TooManyCells(number))
}

impl Level {
    /// Generate the path for `number` using `rng`
    pub fn generate(number: u32, rng: &mut impl RandomSource) -> Result<Self, LevelError> {
        let count = cell_count(number)?;

        let mut cells = Vec::with_capacity(count);
        cells.push(Cell::new(0, 0, CellKind::Normal, count == 1));

        let mut direction = Direction::Right;
        let mut just_turned = false;
        let mut prev = cells[0];

        for index in 1..count {
            let kind = if rng.chance(HAZARD_CHANCE) {
                CellKind::Hazard
            } else {
                CellKind::Normal
            };

            let shift = if rng.chance(SHORT_STEP_CHANCE) {
                1
            } else if rng.chance(MEDIUM_STEP_CHANCE) {
                2
            } else {
                3
            };

            // The roll is always taken so the draw sequence stays fixed
            if rng.chance(TURN_CHANCE) && !just_turned {
                direction = if direction.is_vertical() {
                    Direction::Right
                } else if rng.chance(50.0) {
                    Direction::Up
                } else {
                    Direction::Down
                };
                just_turned = true;
            } else {
                just_turned = false;
            }

            let (dc, dr) = direction.delta();
            let cell = Cell::new(
                prev.column + dc * shift,
                prev.row + dr * shift,
                kind,
                index == count - 1,
            );
            cells.push(cell);
            prev = cell;
        }

        log::debug!("Generated level {} with {} cells", number, cells.len());

        Ok(Self { number, cells })
    }

    /// Build a level from explicit cells (first cell is the start)
    ///
    /// The path must hold the same invariants as a generated one: `number * 10`
    /// cells starting at the origin, single-axis steps of one to three cells,
    /// and a finish flag on the last cell only.
    pub fn from_cells(number: u32, cells: Vec<Cell>) -> Result<Self, LevelError> {
        let expected = cell_count(number)?;
        if cells.len() != expected {
            return Err(LevelError::WrongCellCount {
                number,
                expected,
                actual: cells.len(),
            });
        }
        if cells[0].position() != (0, 0) {
            return Err(LevelError::InvalidPath {
                index: 0,
                reason: "path must start at the origin",
            });
        }

        for (index, pair) in cells.windows(2).enumerate() {
            let dc = pair[1].column.abs_diff(pair[0].column);
            let dr = pair[1].row.abs_diff(pair[0].row);
            if (dc == 0) == (dr == 0) {
                return Err(LevelError::InvalidPath {
                    index: index + 1,
                    reason: "step must move along exactly one axis",
                });
            }
            if !(1..=3).contains(&dc.max(dr)) {
                return Err(LevelError::InvalidPath {
                    index: index + 1,
                    reason: "step must cover one to three cells",
                });
            }
        }

        let last = cells.len() - 1;
        if let Some(index) = (0..cells.len()).find(|&i| cells[i].is_finish != (i == last)) {
            return Err(LevelError::InvalidPath {
                index,
                reason: "only the last cell may be the finish",
            });
        }

        Ok(Self { number, cells })
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Index of the finish cell
    pub fn finish_index(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Direction of travel from `index` to the next cell, if any
    pub fn heading(&self, index: usize) -> Option<Direction> {
        let from = self.cells.get(index)?;
        let to = self.cells.get(index + 1)?;
        Some(if from.column == to.column {
            if from.row < to.row {
                Direction::Up
            } else {
                Direction::Down
            }
        } else if from.column < to.column {
            Direction::Right
        } else {
            Direction::Left
        })
    }

    /// First index in `from..=from + window` whose cell sits at `position`
    pub fn find_ahead(&self, from: usize, window: usize, position: (i32, i32)) -> Option<usize> {
        let end = from.saturating_add(window).saturating_add(1).min(self.cells.len());
        (from..end).find(|&i| self.cells[i].position() == position)
    }
}
