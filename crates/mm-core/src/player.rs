//! Player position and facing

use serde::{Deserialize, Serialize};

use crate::action::Direction;
use crate::maze::{Coord, MazeGrid};
use crate::vision::{self, ViewDepth, VisibilityCode};

/// Where the player stands and which way they look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Grid coordinates, always a path cell once placed in a maze
    pub pos: Coord,
    pub facing: Direction,
}

impl PlayerState {
    pub const fn new(pos: Coord, facing: Direction) -> Self {
        Self { pos, facing }
    }

    /// Place a player at `pos` looking down the first open corridor
    pub fn entering(grid: &MazeGrid, pos: Coord) -> Self {
        Self::new(pos, open_facing(grid, pos))
    }

    pub fn turn_left(&mut self) {
        self.facing = self.facing.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.facing = self.facing.turn_right();
    }

    pub fn turn_around(&mut self) {
        self.facing = self.facing.reverse();
    }

    /// Cell directly ahead, None at the grid edge
    pub fn forward_cell(&self, grid: &MazeGrid) -> Option<Coord> {
        grid.neighbor(self.pos, self.facing)
    }

    /// Step one cell forward. Returns false and stays put when a wall is ahead.
    pub fn move_forward(&mut self, grid: &MazeGrid) -> bool {
        match self.forward_cell(grid) {
            Some(next) if grid.is_path(next) => {
                self.pos = next;
                true
            }
            _ => false,
        }
    }

    /// Visibility code for the current position and facing
    pub fn view(&self, grid: &MazeGrid, depth: ViewDepth) -> VisibilityCode {
        vision::scan(grid, self.pos, self.facing, depth)
    }
}

/// First direction (up, right, down, left) with an open neighbour, Up if none
pub fn open_facing(grid: &MazeGrid, pos: Coord) -> Direction {
    Direction::ALL
        .into_iter()
        .find(|&dir| grid.neighbor(pos, dir).is_some_and(|n| grid.is_path(n)))
        .unwrap_or_default()
}
