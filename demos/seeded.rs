use maze_pathfinding::{
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver},
    MazeGenerator, MazeError,
};

// Equal seeds give equal mazes. This example generates the same 8x8 maze twice, then solves it
// with both A* and Dijkstra and reports the path costs, which are always equal.

fn main() -> Result<(), MazeError> {
    env_logger::init();
    let seed = 2024;
    let maze = MazeGenerator::from_seed(seed).generate(8, 8)?;
    let again = MazeGenerator::from_seed(seed).generate(8, 8)?;
    println!("{}", maze);
    println!("Same maze for seed {}: {}", seed, maze == again);

    let astar = AstarSolver::new();
    let (start, end) = (maze.entrance(), maze.exit());
    let astar_path = astar.get_path_single_goal(&maze, start, end).unwrap_or_default();
    let dijkstra_path = DijkstraSolver
        .get_path_single_goal(&maze, start, end)
        .unwrap_or_default();
    println!("A* cost: {}", astar.get_path_cost(&astar_path));
    println!("Dijkstra cost: {}", DijkstraSolver.get_path_cost(&dijkstra_path));
    Ok(())
}
