//! Ballistic jump model
//!
//! A jump is drawn as two unequal hops: a tall one that carries the ball to its
//! landing cell, then a short settling bounce. A miss never gets the settling
//! bounce; the animation simply ends while the ball overshoots.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Steepness of the exponential easing on each half hop
pub const STEEPNESS: f32 = 3.0;
/// Frames every jump takes regardless of distance
pub const BASE_JUMP_FRAMES: u32 = 30;
/// Extra frames per cell of distance
pub const FRAMES_PER_CELL: u32 = 10;
/// Height of the settling hop (cell units)
pub const SECOND_APEX_HEIGHT: f32 = 0.5;

#[inline]
fn ease(n: f32) -> f32 {
    1.0 - (-STEEPNESS * n).exp()
}

/// Height of the ball at `progress` (0..1) through a jump
///
/// `first_fraction` is the share of the jump spent in the tall hop. Height is
/// zero at both ends of each hop and peaks at each hop's midpoint. A fraction
/// of 1 (or more) disables the second hop.
pub fn height(progress: f32, first_fraction: f32, first_apex: f32, second_apex: f32) -> f32 {
    let x = progress.clamp(0.0, 1.0);
    let f = first_fraction;

    if x <= f / 2.0 {
        ease(x / (f / 2.0)) * first_apex
    } else if x <= f || f >= 1.0 {
        let n = x / (f / 2.0) - 1.0;
        ease(1.0 - n) * first_apex
    } else if x <= (f + 1.0) / 2.0 {
        let n = 2.0 * (x - f) / (1.0 - f);
        ease(n) * second_apex
    } else {
        let n = (2.0 * x - f - 1.0) / (1.0 - f);
        ease(1.0 - n) * second_apex
    }
}

/// State of a single jump animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpAnimation {
    /// Total frames; the jump completes once `current_frame` passes this
    pub frame_count: u32,
    pub current_frame: u32,
    pub column_shift: i32,
    pub row_shift: i32,
    /// Whether the shift lands exactly on a path cell
    pub is_correct: bool,
    /// Path index the ball lands on (correct jumps only)
    pub target_index: Option<usize>,
    pub first_apex_height: f32,
    pub second_apex_height: f32,
    pub correct_duration_fraction: f32,
}

impl JumpAnimation {
    /// Set up a jump by `(column_shift, row_shift)` cells
    pub fn start(column_shift: i32, row_shift: i32, target_index: Option<usize>) -> Self {
        let is_correct = target_index.is_some();
        let distance = column_shift.unsigned_abs().max(row_shift.unsigned_abs());
        let frame_count = distance
            .saturating_mul(FRAMES_PER_CELL)
            .saturating_add(BASE_JUMP_FRAMES);
        let d = distance as f32;

        // Longer jumps spend proportionally less of the animation settling.
        // Zero distance gives -inf on the right, so the frame term wins.
        let correct_duration_fraction = if is_correct {
            (1.0 - 10.0 / frame_count as f32).max(1.0 - 1.0 / (2.0 * d))
        } else {
            1.0
        };

        Self {
            frame_count,
            current_frame: 0,
            column_shift,
            row_shift,
            is_correct,
            target_index,
            first_apex_height: 1.0 + d * 2.0,
            second_apex_height: SECOND_APEX_HEIGHT,
            correct_duration_fraction,
        }
    }

    /// Jump length in cells along its axis
    pub fn distance(&self) -> u32 {
        self.column_shift
            .unsigned_abs()
            .max(self.row_shift.unsigned_abs())
    }

    /// Normalized progress of the current frame
    #[inline]
    pub fn progress(&self) -> f32 {
        self.current_frame as f32 / self.frame_count as f32
    }

    /// Ball offset from its start cell at the current frame (cell units)
    pub fn offset(&self) -> Vec3 {
        let p = self.progress();
        Vec3::new(
            self.column_shift as f32 * p,
            self.row_shift as f32 * p,
            height(
                p,
                self.correct_duration_fraction,
                self.first_apex_height,
                self.second_apex_height,
            ),
        )
    }

    /// Advance one frame, returning the offset sampled before advancing
    pub fn step(&mut self) -> Vec3 {
        let offset = self.offset();
        self.current_frame += 1;
        offset
    }

    /// True once every frame has been shown
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_frame > self.frame_count
    }
}
