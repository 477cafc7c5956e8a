use thiserror::Error;

use crate::types::{GhostMode, GhostName};

#[derive(Debug, Error, PartialEq)]
pub enum MazeError {
    /// Tile lookup outside the grid. Coordinates are wrapped or clamped before any
    /// lookup, so this is an invariant violation rather than a recoverable state.
    #[error("tile ({row}, {col}) is outside the maze")]
    OutOfBounds { row: i32, col: i32 },
    #[error("{ghost:?} has no target in mode {mode:?}")]
    UnsupportedMode { ghost: GhostName, mode: GhostMode },
    #[error("invalid maze layout: {0}")]
    InvalidLayout(String),
    #[error("no timer scheduled under key {0}")]
    UnknownTimer(u32),
}

pub type MazeResult<T> = Result<T, MazeError>;
