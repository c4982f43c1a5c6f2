//! Error types for the racetrack core
//!
//! Collisions, water and out-of-bounds moves are ordinary tracer outcomes and
//! never show up here.

use thiserror::Error;

/// Racetrack error type
#[derive(Error, Debug)]
pub enum RaceError {
    #[error("track has no START tile")]
    NoStartTile,

    #[error("no route to the finish after {generations} generations ({explored} states explored)")]
    PlanningFailure { generations: u32, explored: usize },

    #[error("driver ran past the end of the recorded solution ({len} entries)")]
    CursorOverrun { len: usize },

    #[error("track has {found} checkpoints, at most {max} are supported")]
    TooManyCheckpoints { found: usize, max: usize },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("unknown tile '{ch}' at line {line}, column {column}")]
    UnknownTile { ch: char, line: usize, column: usize },

    #[error("recorded move {step} cannot be applied to the replayed car")]
    ReplayMismatch { step: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RaceError>;
