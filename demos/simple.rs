use maze_pathfinding::{find_path, generate_maze};

// In this example a 10x6 maze is generated and walked from the entrance A in the top left
// corner to the exit B in the bottom right corner. The path is marked with `*`.
//
// Run with `RUST_LOG=debug` to see the generator and solver at work.

fn main() {
    env_logger::init();
    let maze = match generate_maze(10, 6) {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    let path = find_path(&maze, maze.entrance(), maze.exit());
    println!("{}", maze.render_path(&path));
    println!("Path ({} cells):", path.len());
    for p in path {
        println!("{}", p);
    }
}
