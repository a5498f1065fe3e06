//! Error types for grid model generation

use thiserror::Error;

/// Main error type for grid and preprocessor operations
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Axis {0} has no coordinates")]
    EmptyAxis(char),

    #[error("Invalid range: min {min:?} exceeds max {max:?}")]
    InvalidRange { min: [usize; 3], max: [usize; 3] },

    #[error("Index ({i}, {j}, {k}) outside grid of size {dims:?}")]
    IndexOutOfBounds {
        i: usize,
        j: usize,
        k: usize,
        dims: [usize; 3],
    },

    #[error("Grid points not generated - call generate() first")]
    NotGenerated,

    #[error("Grid points already generated")]
    AlreadyGenerated,

    #[error("Range {0} is not degenerate in exactly one dimension")]
    NotAPlane(String),

    #[error("Range {0} is not degenerate in exactly two dimensions")]
    NotAnAxis(String),

    #[error("Surface '{0}' not found in entity dictionary")]
    SurfaceNotFound(String),

    #[error("Point {0} not found in model")]
    PointNotFound(usize),

    #[error("Line {0} not found in model")]
    LineNotFound(usize),

    #[error("Element {0} not found in model")]
    ElementNotFound(usize),

    #[error("Set '{0}' not found in model")]
    SetNotFound(String),

    #[error("Duplicate tag {0} already exists")]
    DuplicateTag(usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;
