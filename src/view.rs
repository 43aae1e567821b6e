//! Render-facing view of the game
//!
//! The core never draws. Hosts take a `RenderSnapshot` after every state
//! change and turn it into draw calls; the cell prism and ball geometry here
//! are already run through the shared projection.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::sim::projection::{project, project_scaled};
use crate::sim::{CellKind, Game, GameState, Phase, RandomSource};

/// Depth of a cell prism below its surface (cell units)
pub const CELL_DEPTH: f32 = 0.2;

/// A path cell inside the visible window, relative to the ball's cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleCell {
    pub index: usize,
    pub column: i32,
    pub row: i32,
    pub kind: CellKind,
    pub is_finish: bool,
    /// At or ahead of the ball (drawn in bright colors)
    pub active: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub current_level: u32,
    pub balls_remaining: u32,
    pub balls_per_level: u32,
    pub power: f32,
    pub phase: Phase,
    /// Ball offset from its cell (cell units)
    pub ball_offset: Vec3,
    /// Projected ball offset in pixels; the scene scrolls by its negation
    pub camera_offset: Vec2,
    /// Back-to-front draw order
    pub visible_cells: Vec<VisibleCell>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, config: &Config) -> Self {
        let current = state.current_cell_index;
        let cells = state.level.cells();
        let origin = state
            .current_cell()
            .map(|c| (c.column, c.row))
            .unwrap_or_default();

        let window = config.visible_cell_window;
        let start = current.saturating_sub(window);
        let end = current
            .saturating_add(window)
            .saturating_add(1)
            .min(cells.len());

        let mut visible_cells: Vec<VisibleCell> = (start..end)
            .map(|index| {
                let cell = &cells[index];
                VisibleCell {
                    index,
                    column: cell.column - origin.0,
                    row: cell.row - origin.1,
                    kind: cell.kind,
                    is_finish: cell.is_finish,
                    active: index >= current,
                }
            })
            .collect();

        // Far rows first, then left to right
        visible_cells.sort_by(|a, b| b.row.cmp(&a.row).then(a.column.cmp(&b.column)));

        Self {
            current_level: state.current_level(),
            balls_remaining: state.balls_remaining,
            balls_per_level: config.balls_per_level,
            power: state.power,
            phase: state.phase(),
            ball_offset: state.ball_offset,
            camera_offset: project_scaled(state.ball_offset, config.cell_size_px),
            visible_cells,
        }
    }

    /// HUD label, e.g. "Level: 03"
    pub fn level_label(&self) -> String {
        format!("Level: {:02}", self.current_level)
    }
}

impl<R: RandomSource> Game<R> {
    /// Current frame for the host to draw
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self.state(), self.config())
    }
}

/// Part of a cell prism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceKind {
    Side,
    Surface,
    /// Cross drawn on the finish cell
    Finish,
}

/// A polyline of a cell prism in world space (cell units)
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub kind: FaceKind,
    pub filled: bool,
    /// Use the bright palette
    pub lit: bool,
    pub points: Vec<Vec3>,
}

impl Face {
    /// Screen offsets (pixels, y up) of every point
    pub fn project(&self, cell_size: f32) -> Vec<Vec2> {
        self.points
            .iter()
            .map(|&p| project_scaled(p, cell_size))
            .collect()
    }
}

const H: f32 = 0.5;
const D: f32 = -CELL_DEPTH;

const SIDE_EAST: [Vec3; 5] = [
    Vec3::new(H, -H, D),
    Vec3::new(H, -H, 0.0),
    Vec3::new(H, H, 0.0),
    Vec3::new(H, H, D),
    Vec3::new(H, -H, D),
];
const SIDE_SOUTH: [Vec3; 5] = [
    Vec3::new(-H, -H, D),
    Vec3::new(-H, -H, 0.0),
    Vec3::new(H, -H, 0.0),
    Vec3::new(H, -H, D),
    Vec3::new(-H, -H, D),
];
const SURFACE: [Vec3; 5] = [
    Vec3::new(-H, -H, 0.0),
    Vec3::new(-H, H, 0.0),
    Vec3::new(H, H, 0.0),
    Vec3::new(H, -H, 0.0),
    Vec3::new(-H, -H, 0.0),
];
const FINISH_CROSS: [Vec3; 4] = [
    Vec3::new(-H, -H, 0.0),
    Vec3::new(H, H, 0.0),
    Vec3::new(H, -H, 0.0),
    Vec3::new(-H, H, 0.0),
];

/// Faces of a visible cell in draw order
pub fn cell_faces(cell: &VisibleCell) -> Vec<Face> {
    let center = Vec3::new(cell.column as f32, cell.row as f32, 0.0);
    let face = |kind: FaceKind, filled: bool, points: &[Vec3]| Face {
        kind,
        filled,
        lit: cell.active && kind != FaceKind::Side,
        points: points.iter().map(|&p| center + p).collect(),
    };

    let mut faces = vec![
        face(FaceKind::Side, true, &SIDE_EAST),
        face(FaceKind::Side, true, &SIDE_SOUTH),
        face(FaceKind::Surface, true, &SURFACE),
    ];
    if cell.is_finish {
        faces.push(face(FaceKind::Finish, false, &FINISH_CROSS));
    }
    faces
}

/// Ball placement on screen (the ball never moves; the scene does)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSprite {
    pub center: Vec2,
    pub radius: f32,
}

impl BallSprite {
    pub fn new(config: &Config) -> Self {
        let radius = (config.cell_size_px * config.ball_ratio).round();
        Self {
            center: project(Vec3::new(0.0, 0.0, radius / 2.0)),
            radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Cell, JumpAnimation, Level};

    fn state_with(cells: Vec<Cell>, current: usize) -> GameState {
        let number = (cells.len() / 10) as u32;
        let mut state = GameState::new(Level::from_cells(number, cells).unwrap(), 5);
        state.current_cell_index = current;
        state
    }

    fn row_path(len: i32) -> Vec<Cell> {
        (0..len)
            .map(|i| Cell::new(i, 0, CellKind::Normal, i == len - 1))
            .collect()
    }

    #[test]
    fn test_window_clips_both_sides() {
        let state = state_with(row_path(30), 10);
        let config = Config {
            visible_cell_window: 4,
            ..Default::default()
        };
        let snapshot = RenderSnapshot::capture(&state, &config);
        let mut indices: Vec<_> = snapshot.visible_cells.iter().map(|c| c.index).collect();
        indices.sort();
        assert_eq!(indices, (6..=14).collect::<Vec<_>>());
    }

    #[test]
    fn test_cells_are_relative_to_ball() {
        let state = state_with(row_path(10), 3);
        let snapshot = RenderSnapshot::capture(&state, &Config::default());
        let current = snapshot
            .visible_cells
            .iter()
            .find(|c| c.index == 3)
            .unwrap();
        assert_eq!((current.column, current.row), (0, 0));
        assert!(current.active);
        assert!(!snapshot.visible_cells.iter().find(|c| c.index == 2).unwrap().active);
    }

    #[test]
    fn test_painter_order() {
        let cells = vec![
            Cell::new(0, 0, CellKind::Normal, false),
            Cell::new(0, 2, CellKind::Normal, false),
            Cell::new(1, 2, CellKind::Hazard, false),
            Cell::new(-1, 2, CellKind::Normal, false),
            Cell::new(-1, -1, CellKind::Normal, false),
            Cell::new(-1, -2, CellKind::Normal, false),
            Cell::new(-1, -3, CellKind::Normal, false),
            Cell::new(-1, -4, CellKind::Normal, false),
            Cell::new(-1, -5, CellKind::Normal, false),
            Cell::new(-1, -6, CellKind::Normal, true),
        ];
        let snapshot = RenderSnapshot::capture(&state_with(cells, 0), &Config::default());
        let order: Vec<_> = snapshot.visible_cells.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![3, 1, 2, 0, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_camera_follows_jump() {
        let mut state = state_with(row_path(10), 0);
        let mut jump = JumpAnimation::start(2, 0, Some(2));
        for _ in 0..10 {
            state.ball_offset = jump.step();
        }
        state.jump = Some(jump);
        let config = Config::default();
        let snapshot = RenderSnapshot::capture(&state, &config);
        assert_eq!(snapshot.phase, Phase::Jumping);
        assert_eq!(
            snapshot.camera_offset,
            project_scaled(state.ball_offset, config.cell_size_px)
        );
        assert!(snapshot.camera_offset.x > 0.0);
    }

    #[test]
    fn test_level_label() {
        let snapshot = RenderSnapshot::capture(&state_with(row_path(10), 0), &Config::default());
        assert_eq!(snapshot.level_label(), "Level: 01");
    }

    #[test]
    fn test_finish_cell_has_cross() {
        let cell = VisibleCell {
            index: 9,
            column: 2,
            row: 1,
            kind: CellKind::Normal,
            is_finish: true,
            active: true,
        };
        let faces = cell_faces(&cell);
        assert_eq!(faces.len(), 4);
        assert_eq!(faces[3].kind, FaceKind::Finish);
        assert!(!faces[3].filled);
        assert!(!faces[0].lit);
        assert!(faces[2].lit);
        // Surface corners are centered on the cell
        assert!(faces[2].points.contains(&Vec3::new(1.5, 0.5, 0.0)));
        assert_eq!(faces[2].project(35.0).len(), 5);
    }

    #[test]
    fn test_plain_cell_faces() {
        let cell = VisibleCell {
            index: 0,
            column: 0,
            row: 0,
            kind: CellKind::Hazard,
            is_finish: false,
            active: false,
        };
        let faces = cell_faces(&cell);
        assert_eq!(faces.len(), 3);
        assert!(faces.iter().all(|f| !f.lit));
    }

    #[test]
    fn test_ball_sprite() {
        let sprite = BallSprite::new(&Config::default());
        assert_eq!(sprite.radius, 7.0);
        assert!(sprite.center.x.abs() < 1e-6);
        assert!((sprite.center.y - 3.5).abs() < 1e-6);
    }
}
