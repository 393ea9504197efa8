use smallvec::SmallVec;

use crate::{maze_grid::MazeGrid, point::Point, solver::GridSolver};

/// Uninformed search. Slower than [AstarSolver](super::astar::AstarSolver) but makes no
/// assumption about the heuristic, which makes it a reference for path lengths.
#[derive(Clone, Debug)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Point, i32); 4]>;

    fn successors(&self, grid: &MazeGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
