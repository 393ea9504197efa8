//! Perfect maze generation with randomized
//! [Prim's algorithm](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Iterative_randomized_Prim's_algorithm_(without_stack,_without_sets)).
//!
//! Starting from a grid in which every wall is present, the maze grows outwards from one random
//! cell. A frontier holds the walls between the grown region and the rest of the grid; a random
//! frontier wall is knocked down whenever it leads to a cell that is not part of the region yet.
//! The open walls then form a spanning tree, so every cell is reachable from every other cell
//! along exactly one route.
use fxhash::FxHashSet;
use log::{debug, error, info, trace, warn};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::error::{MazeError, Result};
use crate::maze_grid::MazeGrid;
use crate::point::{Direction, Point};
use crate::MIN_DIMENSION;

/// Source of the random choices made during generation.
pub trait RandomIndex {
    /// A uniformly distributed index in `0..len`. Never called with `len == 0`.
    fn random_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomIndex for R {
    fn random_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// A wall between `cell` and its in-bounds `neighbor` on side `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallCandidate {
    pub cell: Point,
    pub direction: Direction,
    pub neighbor: Point,
}

/// Walls of `p` that separate it from another cell of the grid, in [Direction::ALL] order.
fn walls_of_cell(grid: &MazeGrid, p: Point) -> SmallVec<[WallCandidate; 4]> {
    Direction::ALL
        .into_iter()
        .map(|direction| WallCandidate {
            cell: p,
            direction,
            neighbor: p.neighbor(direction),
        })
        .filter(|w| grid.point_in_bounds(w.neighbor))
        .collect()
}

/// Rejects grids smaller than [MIN_DIMENSION] on either side.
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(MazeError::InvalidDimension { width, height });
    }
    Ok(())
}

/// Opens the left wall of the entrance and the right wall of the exit to the outside.
pub fn open_entrance_and_exit(grid: &mut MazeGrid) {
    let (entrance, exit) = (grid.entrance(), grid.exit());
    grid.set_wall(entrance, Direction::Left, false);
    grid.set_wall(exit, Direction::Right, false);
    debug!("Opened entrance {} and exit {}", entrance, exit);
}

/// Fails with [MazeError::ConnectivityFailure] unless the exit is reachable from the entrance.
pub fn check_connectivity(grid: &MazeGrid) -> Result<()> {
    if grid.verify_connectivity() {
        Ok(())
    } else {
        error!(
            "No route from entrance {} to exit {}:\n{}",
            grid.entrance(),
            grid.exit(),
            grid
        );
        Err(MazeError::ConnectivityFailure {
            width: grid.width(),
            height: grid.height(),
        })
    }
}

/// Generates perfect mazes. Each call to [generate](Self::generate) builds a fresh grid; the
/// random source is the only state kept between calls.
#[derive(Clone, Debug)]
pub struct MazeGenerator<R = StdRng> {
    source: R,
}

impl MazeGenerator<ThreadRng> {
    /// A generator drawing from the thread-local random number generator.
    pub fn new() -> MazeGenerator<ThreadRng> {
        MazeGenerator {
            source: rand::thread_rng(),
        }
    }
}

impl Default for MazeGenerator<ThreadRng> {
    fn default() -> MazeGenerator<ThreadRng> {
        MazeGenerator::new()
    }
}

impl MazeGenerator<StdRng> {
    /// A reproducible generator: equal seeds give equal sequences of mazes.
    pub fn from_seed(seed: u64) -> MazeGenerator<StdRng> {
        MazeGenerator {
            source: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RandomIndex> MazeGenerator<R> {
    pub fn with_source(source: R) -> MazeGenerator<R> {
        MazeGenerator { source }
    }

    /// Generates a `width` x `height` perfect maze with its entrance at `(0, 0)` (left side open)
    /// and its exit at `(width - 1, height - 1)` (right side open).
    pub fn generate(&mut self, width: usize, height: usize) -> Result<MazeGrid> {
        validate_dimensions(width, height)?;
        info!("Generating {}x{} maze", width, height);
        let mut grid = MazeGrid::solid(width, height);
        let carved = self.carve(&mut grid);
        open_entrance_and_exit(&mut grid);
        check_connectivity(&grid)?;
        info!("Generated {}x{} maze with {} passages", width, height, carved);
        Ok(grid)
    }

    /// Like [generate](Self::generate), but retries once after a
    /// [ConnectivityFailure](MazeError::ConnectivityFailure). Invalid dimensions are returned
    /// immediately.
    pub fn generate_with_retry(&mut self, width: usize, height: usize) -> Result<MazeGrid> {
        match self.generate(width, height) {
            Err(e @ MazeError::ConnectivityFailure { .. }) => {
                warn!("{}; retrying once", e);
                self.generate(width, height)
            }
            result => result,
        }
    }

    /// Grows a spanning tree over a solid grid and returns the number of walls removed.
    fn carve(&mut self, grid: &mut MazeGrid) -> usize {
        let total = grid.len();
        let start = Point::new(
            self.source.random_index(grid.width()) as i32,
            self.source.random_index(grid.height()) as i32,
        );
        debug!("Growing maze from {}", start);
        let mut visited: FxHashSet<Point> = FxHashSet::default();
        visited.insert(start);
        let mut frontier: Vec<WallCandidate> = walls_of_cell(grid, start).into_vec();
        let mut carved = 0;
        while !frontier.is_empty() && visited.len() < total {
            let wall = frontier.swap_remove(self.source.random_index(frontier.len()));
            if !visited.contains(&wall.cell) || visited.contains(&wall.neighbor) {
                continue;
            }
            grid.set_wall(wall.cell, wall.direction, false);
            visited.insert(wall.neighbor);
            carved += 1;
            trace!(
                "Removed wall {} <-> {} ({}/{} cells)",
                wall.cell,
                wall.neighbor,
                visited.len(),
                total
            );
            frontier.extend(
                walls_of_cell(grid, wall.neighbor)
                    .into_iter()
                    .filter(|w| !visited.contains(&w.neighbor)),
            );
        }
        carved
    }
}
