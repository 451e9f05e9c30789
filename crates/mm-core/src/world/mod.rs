//! World state
//!
//! Options and the error types shared across the game.

pub mod errors;
pub mod options;

pub use errors::{GameError, MazeError, OptionsError, QuestionError, VisionError};
pub use options::GameOptions;
