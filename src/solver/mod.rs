use crate::{astar::astar, maze_grid::MazeGrid, point::Point};
use itertools::Itertools;
use log::{debug, info};

pub mod astar;
pub mod dijkstra;

/// A shortest-path strategy over the walls of a [MazeGrid]. Implementors decide which
/// neighbours to expand and how to estimate the remaining distance; the search itself is shared.
pub trait GridSolver {
    type Successors: IntoIterator<Item = (Point, i32)>;

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    fn successors(&self, grid: &MazeGrid, node: &Point) -> Self::Successors;

    /// Cost of moving between two points. Every orthogonal step costs 1.
    fn cost(&self, p1: &Point, p2: &Point) -> i32 {
        p1.manhattan_distance(p2)
    }

    /// Sum of step costs along `path`; 0 for a path of fewer than two points.
    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| self.cost(a, b))
            .sum()
    }

    /// Computes a shortest path from `start` to `goal`, both inclusive. Returns [None] if either
    /// point is off the grid or the goal cannot be reached.
    fn get_path_single_goal(
        &self,
        grid: &MazeGrid,
        start: Point,
        goal: Point,
    ) -> Option<Vec<Point>> {
        if !grid.point_in_bounds(start) || !grid.point_in_bounds(goal) {
            info!(
                "{} or {} lies outside the {}x{} grid",
                start,
                goal,
                grid.width(),
                grid.height()
            );
            return None;
        }
        debug!("Computing path from {} to {}", start, goal);
        astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        )
        .map(|(v, _c)| {
            info!("Found path of {} cells from {} to {}", v.len(), start, goal);
            v
        })
    }
}
