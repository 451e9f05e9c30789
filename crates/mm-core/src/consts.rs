//! Game-wide constants

/// Logical maze side (cells per row) of the first level
pub const DEFAULT_MAZE_SIZE: usize = 8;

/// Growth of the logical maze side per completed level
pub const DEFAULT_SIZE_STEP: usize = 2;

/// Largest logical maze side the level progression will produce
pub const MAX_MAZE_SIZE: usize = 24;

/// Lower bound of the braiding target, in percent of all wall cells
pub const BRAID_MIN_PERCENT: usize = 6;

/// Upper bound of the braiding target, in percent of all wall cells
pub const BRAID_MAX_PERCENT: usize = 12;

/// Braiding picks per interior cell before the pass gives up
pub const BRAID_ATTEMPTS_PER_CELL: usize = 64;

/// Levels in a default game (0 means endless)
pub const DEFAULT_LEVELS: u32 = 5;

/// Messages kept in the session log
pub const MAX_MESSAGES: usize = 50;
