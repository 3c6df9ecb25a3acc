use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    /// Logical size must be at least 1.
    #[error("invalid maze size {0}: size must be at least 1")]
    InvalidSize(usize),

    #[error("malformed grid: {reason}")]
    MalformedGrid { reason: String },

    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
