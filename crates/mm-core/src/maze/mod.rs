//! Maze grid and generation
//!
//! The grid is stored in its expanded `2N+1` form: logical cells sit on odd
//! rows and columns, connectors between them on mixed-parity positions.

mod cell;
mod generator;
mod grid;

pub use cell::{Coord, Tile};
pub use generator::{GenerationStats, MazeGenerator, MazeLayout, generate};
pub use grid::MazeGrid;
