//! Error types.
//!
//! Failing to find a solution is not an error; see [`crate::report::SearchOutcome`].

use thiserror::Error;

/// Building or loading a [`crate::config::SearchConfig`] failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_expansions must be greater than zero")]
    ZeroExpansions,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A path did not hold up when replayed from the initial state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The move at index `step` produced an invalid state.
    #[error("move {step} leads to an invalid state")]
    InvalidState { step: usize },

    #[error("path of {moves} moves does not end at the goal")]
    GoalNotReached { moves: usize },
}

/// Puzzle parameters that cannot describe a playable instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("invalid puzzle size: {0}")]
    InvalidSize(String),

    #[error("initial and goal states are incompatible: {0}")]
    Mismatch(String),
}
