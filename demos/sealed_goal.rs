use maze_pathfinding::{find_path, Direction, MazeGrid, Point};

// In this example no path exists on a 3x3 grid with shape
// +---+---+---+
// | S         |
// +   +   +   +
// |           |
// +   +   +---+
// |       | G |
// +---+---+---+
// where G is walled in on every side. The empty path signals that the goal cannot be reached.

fn main() {
    let mut grid = MazeGrid::open(3, 3);
    let goal = Point::new(2, 2);
    for d in Direction::ALL {
        grid.set_wall(goal, d, true);
    }
    println!("{}", grid);
    let path = find_path(&grid, Point::new(0, 0), goal);
    if path.is_empty() {
        println!("No path to {}", goal);
    } else {
        println!("Unexpected path: {:?}", path);
    }
}
