//! # maze_pathfinding
//!
//! Generates perfect mazes (every cell reachable along exactly one route) on a rectangular grid
//! with randomized [Prim's algorithm](https://en.wikipedia.org/wiki/Prim%27s_algorithm) and finds
//! shortest walking paths through them with [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! using the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//! Movement is orthogonal with unit cost and only the cells' wall flags restrict it.
//!
//! ```
//! use maze_pathfinding::{find_path, generate_maze};
//!
//! let maze = generate_maze(10, 8).unwrap();
//! let path = find_path(&maze, maze.entrance(), maze.exit());
//! assert_eq!(path.first(), Some(&maze.entrance()));
//! assert_eq!(path.last(), Some(&maze.exit()));
//! ```
mod astar;
pub mod error;
pub mod generator;
pub mod maze_grid;
pub mod point;
pub mod solver;

pub use error::MazeError;
pub use generator::{MazeGenerator, RandomIndex};
pub use maze_grid::{Cell, MazeGrid, Walls};
pub use point::{Direction, Point};

use solver::{astar::AstarSolver, GridSolver};

/// Smallest allowed width and height of a generated maze.
pub const MIN_DIMENSION: usize = 2;

/// Generates a `width` x `height` perfect maze from the thread-local random number generator.
/// The entrance `(0, 0)` is open on its left side and the exit `(width - 1, height - 1)` on its
/// right side.
pub fn generate_maze(width: usize, height: usize) -> error::Result<MazeGrid> {
    MazeGenerator::new().generate(width, height)
}

/// Same as [generate_maze], but reproducible: equal seeds give equal mazes.
pub fn generate_maze_seeded(width: usize, height: usize, seed: u64) -> error::Result<MazeGrid> {
    MazeGenerator::from_seed(seed).generate(width, height)
}

/// Shortest path from `start` to `end`, both inclusive. The path is empty when `end` cannot be
/// reached or either point lies outside the grid, and holds the single shared point when
/// `start == end`.
pub fn find_path(grid: &MazeGrid, start: Point, end: Point) -> Vec<Point> {
    AstarSolver::new()
        .get_path_single_goal(grid, start, end)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrance_to_exit() {
        let maze = generate_maze_seeded(20, 20, 11).unwrap();
        let path = find_path(&maze, maze.entrance(), maze.exit());
        assert!(path.len() >= 39);
        assert!(maze.is_valid_path(&path));
        assert_eq!(path[0], Point::new(0, 0));
        assert_eq!(path[path.len() - 1], Point::new(19, 19));
    }

    #[test]
    fn start_equals_end() {
        let maze = generate_maze(3, 3).unwrap();
        let p = Point::new(1, 2);
        assert_eq!(find_path(&maze, p, p), vec![p]);
    }

    #[test]
    fn off_grid_gives_empty_path() {
        let maze = generate_maze(3, 3).unwrap();
        assert!(find_path(&maze, Point::new(0, 0), Point::new(5, 5)).is_empty());
    }
}
