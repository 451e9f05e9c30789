//! Player actions
//!
//! Facing directions and the commands the game loop accepts.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Facing direction on the grid
///
/// Declared clockwise so the rotation tables below index by discriminant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

const LEFT_OF: [Direction; 4] = [
    Direction::Left,  // Up
    Direction::Up,    // Right
    Direction::Right, // Down
    Direction::Down,  // Left
];

const RIGHT_OF: [Direction; 4] = [
    Direction::Right, // Up
    Direction::Down,  // Right
    Direction::Left,  // Down
    Direction::Up,    // Left
];

impl Direction {
    /// All facings in clockwise order starting at Up
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step as (drow, dcol)
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Direction for a unit (drow, dcol) step
    pub const fn from_delta(drow: isize, dcol: isize) -> Option<Self> {
        match (drow, dcol) {
            (-1, 0) => Some(Direction::Up),
            (0, 1) => Some(Direction::Right),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            _ => None,
        }
    }

    pub const fn turn_left(self) -> Self {
        LEFT_OF[self as usize]
    }

    pub const fn turn_right(self) -> Self {
        RIGHT_OF[self as usize]
    }

    pub const fn reverse(self) -> Self {
        self.turn_left().turn_left()
    }

    /// Compass name shown in the status line
    pub const fn compass(self) -> &'static str {
        match self {
            Direction::Up => "north",
            Direction::Right => "east",
            Direction::Down => "south",
            Direction::Left => "west",
        }
    }

    /// Arrow glyph used on the minimap
    pub const fn arrow(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Left => '<',
        }
    }
}

/// Commands accepted by the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step one cell in the facing direction
    Forward,
    TurnLeft,
    TurnRight,
    TurnAround,
    /// Pick a choice (0-based) of the pending question
    Answer(usize),
    /// Throw away the current maze and build a new one for the same level
    Regenerate,
    Quit,
}

impl Command {
    /// Look up a bindable command by its rc-file name (`BIND=key:name`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "forward" | "move" => Some(Command::Forward),
            "turn_left" | "left" => Some(Command::TurnLeft),
            "turn_right" | "right" => Some(Command::TurnRight),
            "turn_around" | "around" => Some(Command::TurnAround),
            "regenerate" | "new_maze" => Some(Command::Regenerate),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}
