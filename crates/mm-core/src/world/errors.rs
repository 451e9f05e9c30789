//! Error types
//!
//! The core never fails during play; these cover invalid input and the
//! file-backed collaborators (options file, question bank).

use thiserror::Error;

/// Invalid maze input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze size must be at least 1, got {0}")]
    InvalidSize(usize),

    #[error("malformed maze text: {0}")]
    Malformed(String),
}

/// Invalid visibility code text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VisionError {
    #[error("visibility code '{0}' must be 8 or 12 characters of 0/1")]
    InvalidCode(String),
}

/// Question bank loading and validation errors
#[derive(Error, Debug)]
pub enum QuestionError {
    #[error("could not read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse question file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question bank is empty")]
    Empty,

    #[error("question '{prompt}' needs at least two choices")]
    TooFewChoices { prompt: String },

    #[error("question '{prompt}' has answer {answer} but only {choices} choices")]
    AnswerOutOfRange {
        prompt: String,
        answer: usize,
        choices: usize,
    },
}

/// Options file errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

/// Any error raised while setting up a game
#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error(transparent)]
    Options(#[from] OptionsError),
}
