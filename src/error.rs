use std::error;
use std::fmt::{self, Display};

use crate::MIN_DIMENSION;

/// Failures of maze generation. Not finding a path is not an error: the solvers report it as an
/// empty path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height below [MIN_DIMENSION]. Raised before any work is done.
    InvalidDimension { width: usize, height: usize },
    /// The entrance could not reach the exit after generation. A correct spanning tree never
    /// produces this, so it signals a defect rather than bad luck.
    ConnectivityFailure { width: usize, height: usize },
    /// Cells handed to [MazeGrid::from_cells](crate::MazeGrid::from_cells) do not form a
    /// `width` x `height` grid with shared walls.
    MalformedGrid { width: usize, height: usize },
}

impl Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimension { width, height } => write!(
                f,
                "Maze must be at least {}x{}, got {}x{}",
                MIN_DIMENSION, MIN_DIMENSION, width, height
            ),
            MazeError::ConnectivityFailure { width, height } => write!(
                f,
                "Generated {}x{} maze does not connect entrance (0,0) to exit ({},{})",
                width,
                height,
                width.saturating_sub(1),
                height.saturating_sub(1)
            ),
            MazeError::MalformedGrid { width, height } => write!(
                f,
                "Cells do not form a {}x{} grid with shared walls",
                width, height
            ),
        }
    }
}

impl error::Error for MazeError {}

pub type Result<T> = std::result::Result<T, MazeError>;
