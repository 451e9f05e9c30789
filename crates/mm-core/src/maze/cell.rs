//! Cell states and grid coordinates

use core::fmt;

use serde::{Deserialize, Serialize};

/// State of one grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Wall,
    Path,
}

impl Tile {
    pub const fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }

    pub const fn is_path(self) -> bool {
        matches!(self, Tile::Path)
    }

    /// Map symbol used by the text form of a grid
    pub const fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Path => '.',
        }
    }

    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '#' => Some(Tile::Wall),
            '.' | ' ' => Some(Tile::Path),
            _ => None,
        }
    }
}

/// Grid coordinate
///
/// Always `(row, col)`, grids are indexed `grid[row][col]`. Ordering is
/// row-major, which is also the dead-end scan order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Grid coordinate of logical maze cell `(row, col)`
    pub const fn from_logical(row: usize, col: usize) -> Self {
        Self::new(row * 2 + 1, col * 2 + 1)
    }

    /// Step by a signed delta, None if either component would go negative
    pub fn offset(self, drow: isize, dcol: isize) -> Option<Self> {
        Some(Self::new(
            self.row.checked_add_signed(drow)?,
            self.col.checked_add_signed(dcol)?,
        ))
    }

    /// True for odd/odd positions, the ones holding logical cells
    pub const fn is_logical(self) -> bool {
        self.row % 2 == 1 && self.col % 2 == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_mapping() {
        assert_eq!(Coord::from_logical(0, 0), Coord::new(1, 1));
        assert_eq!(Coord::from_logical(2, 1), Coord::new(5, 3));
        assert!(Coord::from_logical(3, 4).is_logical());
        assert!(!Coord::new(2, 3).is_logical());
    }

    #[test]
    fn test_offset_rejects_negative() {
        assert_eq!(Coord::new(0, 3).offset(-1, 0), None);
        assert_eq!(Coord::new(2, 3).offset(-1, 1), Some(Coord::new(1, 4)));
    }

    #[test]
    fn test_row_major_order() {
        let mut coords = vec![Coord::new(3, 1), Coord::new(1, 5), Coord::new(1, 3)];
        coords.sort();
        assert_eq!(
            coords,
            vec![Coord::new(1, 3), Coord::new(1, 5), Coord::new(3, 1)]
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Tile::from_symbol(Tile::Wall.symbol()), Some(Tile::Wall));
        assert_eq!(Tile::from_symbol(Tile::Path.symbol()), Some(Tile::Path));
        assert_eq!(Tile::from_symbol('x'), None);
    }
}
