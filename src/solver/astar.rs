use smallvec::SmallVec;

use crate::{maze_grid::MazeGrid, point::Point, solver::GridSolver};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the Manhattan heuristic. Above 1.0 the search turns into weighted A*, which
    /// expands fewer nodes but may return a longer path.
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Point, i32); 4]>;

    fn successors(&self, grid: &MazeGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    /// Manhattan distance times the heuristic factor.
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        (self.cost(p1, p2) as f32 * self.heuristic_factor) as i32
    }
}
