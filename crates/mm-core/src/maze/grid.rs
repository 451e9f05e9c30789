//! Expanded maze grid

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cell::{Coord, Tile};
use crate::action::Direction;
use crate::world::errors::MazeError;

/// Square grid of side `2N+1` holding a maze of N×N logical cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeGrid {
    /// Logical cells per side (N)
    size: usize,
    /// Row-major cells, `side * side` of them
    cells: Vec<Tile>,
}

impl MazeGrid {
    /// A grid of `size` logical cells per side with every cell a wall
    pub fn new(size: usize) -> Self {
        let side = size * 2 + 1;
        Self {
            size,
            cells: vec![Tile::Wall; side * side],
        }
    }

    /// Logical cells per side
    pub fn size(&self) -> usize {
        self.size
    }

    /// Grid cells per side, `2N+1`
    pub fn side(&self) -> usize {
        self.size * 2 + 1
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        at.row < self.side() && at.col < self.side()
    }

    pub fn get(&self, at: Coord) -> Option<Tile> {
        if self.in_bounds(at) {
            Some(self.cells[at.row * self.side() + at.col])
        } else {
            None
        }
    }

    /// Set a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, at: Coord, tile: Tile) {
        if self.in_bounds(at) {
            let side = self.side();
            self.cells[at.row * side + at.col] = tile;
        }
    }

    /// Anything outside the grid counts as wall
    pub fn is_wall(&self, at: Coord) -> bool {
        self.get(at).is_none_or(Tile::is_wall)
    }

    pub fn is_path(&self, at: Coord) -> bool {
        self.get(at).is_some_and(Tile::is_path)
    }

    /// Wall test on signed coordinates, negative ones are outside the grid
    pub fn is_wall_signed(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return true;
        }
        self.is_wall(Coord::new(row as usize, col as usize))
    }

    /// Orthogonal neighbour of `at`, None when it would leave the grid
    pub fn neighbor(&self, at: Coord, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        at.offset(dr, dc).filter(|n| self.in_bounds(*n))
    }

    /// Orthogonal neighbours that are walls, missing ones included
    pub fn wall_neighbors(&self, at: Coord) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&dir| self.neighbor(at, dir).is_none_or(|n| self.is_wall(n)))
            .count()
    }

    /// Number of cells in the given state
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// Logical-cell positions (odd row, odd col) in row-major order
    pub fn logical_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let side = self.side();
        (1..side)
            .step_by(2)
            .flat_map(move |row| (1..side).step_by(2).map(move |col| Coord::new(row, col)))
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.side())
    }

    /// True when every cell of the outer ring is a wall
    pub fn border_is_solid(&self) -> bool {
        let last = self.side() - 1;
        (0..=last).all(|i| {
            self.is_wall(Coord::new(0, i))
                && self.is_wall(Coord::new(last, i))
                && self.is_wall(Coord::new(i, 0))
                && self.is_wall(Coord::new(i, last))
        })
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|t| t.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for MazeGrid {
    type Err = MazeError;

    /// Parse the `#`/`.` text form; the grid must be square with an odd side of at least 3
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let side = lines.len();
        if side < 3 || side % 2 == 0 {
            return Err(MazeError::Malformed(format!(
                "expected an odd number of rows >= 3, got {side}"
            )));
        }

        let mut cells = Vec::with_capacity(side * side);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != side {
                return Err(MazeError::Malformed(format!(
                    "row {row} has {} cells, expected {side}",
                    line.chars().count()
                )));
            }
            for c in line.chars() {
                let tile = Tile::from_symbol(c).ok_or_else(|| {
                    MazeError::Malformed(format!("unknown symbol '{c}' in row {row}"))
                })?;
                cells.push(tile);
            }
        }

        Ok(Self {
            size: (side - 1) / 2,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "
        #####
        #...#
        #.#.#
        #...#
        #####
    ";

    #[test]
    fn test_new_grid_is_solid() {
        let grid = MazeGrid::new(3);
        assert_eq!(grid.side(), 7);
        assert_eq!(grid.count(Tile::Wall), 49);
        assert!(grid.border_is_solid());
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let grid: MazeGrid = SMALL.parse().unwrap();
        assert!(grid.is_wall(Coord::new(5, 1)));
        assert!(grid.is_wall_signed(-1, 2));
        assert!(!grid.is_wall_signed(1, 1));
        assert_eq!(grid.get(Coord::new(9, 9)), None);
    }

    #[test]
    fn test_wall_neighbors() {
        let grid: MazeGrid = SMALL.parse().unwrap();
        // corner cell of the ring corridor
        assert_eq!(grid.wall_neighbors(Coord::new(1, 1)), 2);
        // centre pillar is ringed by path
        assert_eq!(grid.wall_neighbors(Coord::new(2, 2)), 0);
        // border corner: two neighbours fall outside the grid
        assert_eq!(grid.wall_neighbors(Coord::new(0, 0)), 4);
    }

    #[test]
    fn test_text_roundtrip() {
        let grid: MazeGrid = SMALL.parse().unwrap();
        assert_eq!(grid.size(), 2);
        let reparsed: MazeGrid = grid.to_string().parse().unwrap();
        assert_eq!(grid, reparsed);
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!("###\n#.#".parse::<MazeGrid>().is_err());
        assert!("####\n#..#\n#..#\n####".parse::<MazeGrid>().is_err());
        assert!("###\n#x#\n###".parse::<MazeGrid>().is_err());
        assert!("###\n#.\n###".parse::<MazeGrid>().is_err());
    }

    #[test]
    fn test_logical_cells_order() {
        let grid = MazeGrid::new(2);
        let cells: Vec<_> = grid.logical_cells().collect();
        assert_eq!(
            cells,
            vec![
                Coord::new(1, 1),
                Coord::new(1, 3),
                Coord::new(3, 1),
                Coord::new(3, 3)
            ]
        );
    }
}
