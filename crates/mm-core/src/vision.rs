//! First-person visibility encoding
//!
//! The renderer does not ray-cast. Instead it looks at a fixed cone of cells
//! in front of the player and turns their wall state into a `VisibilityCode`,
//! which then selects the wall pieces to draw.
//!
//! Cone layout, one slot per cell, `F` = the player's cell:
//!
//! ```text
//!        11            (long view only)
//!     8   9  10        (long view only)
//!     5   6   7
//!     2   3   4
//!     0   F   1
//! ```
//!
//! The shape is the same for every facing; only the forward and left axes
//! change. Rows are scanned nearest first and scanning stops after a row whose
//! centre is a wall, so occluded slots keep their default wall bit.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, VariantNames};

use crate::action::Direction;
use crate::maze::{Coord, MazeGrid};
use crate::world::errors::VisionError;

/// How far ahead the cone reaches
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewDepth {
    /// 8 slots, two rows ahead
    Short,
    /// 12 slots, four rows ahead
    #[default]
    Long,
}

impl ViewDepth {
    /// Number of slots in a code of this depth
    pub const fn len(self) -> usize {
        match self {
            ViewDepth::Short => 8,
            ViewDepth::Long => 12,
        }
    }

    /// Deepest forward row the cone reaches
    pub const fn max_depth(self) -> usize {
        match self {
            ViewDepth::Short => 2,
            ViewDepth::Long => 4,
        }
    }

    /// Slots of this depth in code order
    pub fn slots(self) -> impl Iterator<Item = ViewSlot> {
        ViewSlot::iter().take(self.len())
    }

    fn from_len(len: usize) -> Option<Self> {
        match len {
            8 => Some(ViewDepth::Short),
            12 => Some(ViewDepth::Long),
            _ => None,
        }
    }
}

/// Lateral position within a cone row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Center,
    Right,
}

impl Side {
    /// Multiple of the facing's left vector
    const fn lateral(self) -> isize {
        match self {
            Side::Left => 1,
            Side::Center => 0,
            Side::Right => -1,
        }
    }
}

/// One cell of the cone; the discriminant is the bit index in the code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ViewSlot {
    ImmediateLeft,
    ImmediateRight,
    ForwardLeft,
    Forward,
    ForwardRight,
    Forward2Left,
    Forward2,
    Forward2Right,
    Forward3Left,
    Forward3,
    Forward3Right,
    Forward4,
}

impl ViewSlot {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rows ahead of the player, 0 for the player's own row
    pub const fn depth(self) -> usize {
        match self {
            ViewSlot::ImmediateLeft | ViewSlot::ImmediateRight => 0,
            ViewSlot::ForwardLeft | ViewSlot::Forward | ViewSlot::ForwardRight => 1,
            ViewSlot::Forward2Left | ViewSlot::Forward2 | ViewSlot::Forward2Right => 2,
            ViewSlot::Forward3Left | ViewSlot::Forward3 | ViewSlot::Forward3Right => 3,
            ViewSlot::Forward4 => 4,
        }
    }

    pub const fn side(self) -> Side {
        match self {
            ViewSlot::ImmediateLeft
            | ViewSlot::ForwardLeft
            | ViewSlot::Forward2Left
            | ViewSlot::Forward3Left => Side::Left,
            ViewSlot::ImmediateRight
            | ViewSlot::ForwardRight
            | ViewSlot::Forward2Right
            | ViewSlot::Forward3Right => Side::Right,
            _ => Side::Center,
        }
    }

    /// Slot at a given row and side, if the cone has one there
    pub fn at(depth: usize, side: Side) -> Option<Self> {
        ViewSlot::iter().find(|s| s.depth() == depth && s.side() == side)
    }

    /// Grid cell this slot covers for a player at `from` facing `facing`,
    /// as signed coordinates since the cone may hang over the grid edge
    pub fn cell(self, from: Coord, facing: Direction) -> (isize, isize) {
        let (fr, fc) = facing.delta();
        let (lr, lc) = facing.turn_left().delta();
        let depth = self.depth() as isize;
        let lateral = self.side().lateral();
        (
            from.row as isize + fr * depth + lr * lateral,
            from.col as isize + fc * depth + lc * lateral,
        )
    }
}

/// Wall bits of the cone, bit `i` belonging to the slot with index `i`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibilityCode {
    bits: u16,
    depth: ViewDepth,
}

impl VisibilityCode {
    /// Every slot a wall, the state before scanning
    pub const fn all_walls(depth: ViewDepth) -> Self {
        Self {
            bits: (1 << depth.len()) - 1,
            depth,
        }
    }

    /// Build from packed bits; bits past the depth's length are dropped
    pub const fn from_bits(bits: u16, depth: ViewDepth) -> Self {
        Self {
            bits: bits & ((1 << depth.len()) - 1),
            depth,
        }
    }

    /// Packed form, suitable as a table index
    pub const fn bits(self) -> u16 {
        self.bits
    }

    pub const fn depth(self) -> ViewDepth {
        self.depth
    }

    pub const fn len(self) -> usize {
        self.depth.len()
    }

    /// Wall bit by slot index; indices past the code read as wall
    pub const fn is_wall_at(self, index: usize) -> bool {
        index >= self.depth.len() || (self.bits >> index) & 1 == 1
    }

    pub const fn is_wall(self, slot: ViewSlot) -> bool {
        self.is_wall_at(slot.index())
    }

    /// Wall bit of a side slot, None where the cone has no such slot
    pub fn side(self, depth: usize, side: Side) -> Option<bool> {
        ViewSlot::at(depth, side)
            .filter(|s| s.index() < self.len())
            .map(|s| self.is_wall(s))
    }

    /// Wall bit of the centre slot `depth` rows ahead
    pub fn center(self, depth: usize) -> Option<bool> {
        self.side(depth, Side::Center)
    }

    fn set(&mut self, slot: ViewSlot, wall: bool) {
        if wall {
            self.bits |= 1 << slot.index();
        } else {
            self.bits &= !(1 << slot.index());
        }
    }
}

impl fmt::Display for VisibilityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            f.write_str(if self.is_wall_at(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for VisibilityCode {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VisionError::InvalidCode(s.to_string());
        let depth = ViewDepth::from_len(s.len()).ok_or_else(invalid)?;
        let mut bits = 0u16;
        for (i, c) in s.chars().enumerate() {
            match c {
                '1' => bits |= 1 << i,
                '0' => {}
                _ => return Err(invalid()),
            }
        }
        Ok(Self::from_bits(bits, depth))
    }
}

/// Scan the cone in front of `from` and encode it
pub fn scan(grid: &MazeGrid, from: Coord, facing: Direction, depth: ViewDepth) -> VisibilityCode {
    let mut code = VisibilityCode::all_walls(depth);
    let mut blocked_at: Option<usize> = None;

    for slot in depth.slots() {
        if blocked_at.is_some_and(|row| slot.depth() > row) {
            break;
        }
        let (row, col) = slot.cell(from, facing);
        let wall = grid.is_wall_signed(row, col);
        code.set(slot, wall);
        if wall && slot.side() == Side::Center {
            blocked_at = Some(slot.depth());
        }
    }

    code
}
