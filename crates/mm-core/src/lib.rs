//! mm-core: Core game logic for MindMaze
//!
//! This crate contains maze generation, the first-person visibility encoder,
//! player movement and the quiz-driven level loop. It has no terminal
//! dependencies and is designed to be pure and testable.

pub mod action;
pub mod maze;
pub mod player;
pub mod quiz;
pub mod vision;
pub mod world;

mod consts;
mod gameloop;
mod rng;

pub use consts::*;
pub use gameloop::{GameLoop, GameLoopResult, GameState, Phase, Score};
pub use rng::{GameRng, RandomSource, ScriptedRng};
