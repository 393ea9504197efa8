use core::fmt;
use std::collections::VecDeque;

use fxhash::FxHashSet;
use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::point::{Direction, Point};

/// The four wall flags of a cell. `true` blocks movement across that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const SOLID: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };
    pub const OPEN: Walls = Walls {
        top: false,
        right: false,
        bottom: false,
        left: false,
    };

    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    fn set(&mut self, dir: Direction, blocked: bool) {
        match dir {
            Direction::Top => self.top = blocked,
            Direction::Right => self.right = blocked,
            Direction::Bottom => self.bottom = blocked,
            Direction::Left => self.left = blocked,
        }
    }
}

/// One grid unit: its coordinate and its walls. Carries no generation-time state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub walls: Walls,
}

impl Cell {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// [MazeGrid] is a fixed-size rectangle of [Cell]s stored row by row, so cell `(x, y)` is
/// `rows().nth(y)` at column `x`, or simply [cell](Self::cell). Walls are shared between
/// neighbours: every mutation goes through [set_wall](Self::set_wall), which updates both sides,
/// so a cell's flag towards a neighbour always equals the neighbour's flag back. Grids built from
/// outside data go through [from_cells](Self::from_cells), which checks the same.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMazeGrid"))]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Unchecked serialized form of a [MazeGrid].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawMazeGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMazeGrid> for MazeGrid {
    type Error = MazeError;

    fn try_from(raw: RawMazeGrid) -> Result<MazeGrid> {
        MazeGrid::from_cells(raw.width, raw.height, raw.cells)
    }
}

impl MazeGrid {
    /// Builds a grid from row-major `cells`. Fails with [MazeError::MalformedGrid] unless there
    /// are exactly `width * height` cells, each cell's coordinate matches its slot and every pair
    /// of neighbours agrees on the wall between them.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<MazeGrid> {
        let malformed = MazeError::MalformedGrid { width, height };
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(malformed);
        }
        let in_slot = cells.iter().enumerate().all(|(ix, c)| {
            c.x >= 0 && c.y >= 0 && c.x as usize == ix % width && c.y as usize == ix / width
        });
        if !in_slot {
            return Err(malformed);
        }
        let grid = MazeGrid {
            width,
            height,
            cells,
        };
        if !grid.shared_walls_consistent() {
            return Err(malformed);
        }
        Ok(grid)
    }

    fn filled(width: usize, height: usize, walls: Walls) -> MazeGrid {
        let cells = (0..height as i32)
            .cartesian_product(0..width as i32)
            .map(|(y, x)| Cell { x, y, walls })
            .collect();
        MazeGrid {
            width,
            height,
            cells,
        }
    }

    /// A grid in which every wall of every cell is present.
    pub fn solid(width: usize, height: usize) -> MazeGrid {
        MazeGrid::filled(width, height, Walls::SOLID)
    }

    /// A grid without internal walls. The outer border stays closed.
    pub fn open(width: usize, height: usize) -> MazeGrid {
        let mut grid = MazeGrid::filled(width, height, Walls::OPEN);
        for cell in grid.cells.iter_mut() {
            let (x, y) = (cell.x as usize, cell.y as usize);
            cell.walls.top = y == 0;
            cell.walls.left = x == 0;
            cell.walls.bottom = y + 1 == height;
            cell.walls.right = x + 1 == width;
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The entrance cell `(0, 0)`, opened to the outside on its left side.
    pub fn entrance(&self) -> Point {
        Point::new(0, 0)
    }
    /// The exit cell `(width - 1, height - 1)`, opened to the outside on its right side.
    pub fn exit(&self) -> Point {
        Point::new(self.width as i32 - 1, self.height as i32 - 1)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
    pub fn point_in_bounds(&self, p: Point) -> bool {
        self.in_bounds(p.x, p.y)
    }

    /// Row-major index of an in-bounds point.
    pub fn get_ix_point(&self, p: &Point) -> usize {
        debug_assert!(self.point_in_bounds(*p));
        p.y as usize * self.width + p.x as usize
    }

    pub fn cell(&self, p: Point) -> Option<&Cell> {
        if self.point_in_bounds(p) {
            Some(&self.cells[self.get_ix_point(&p)])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks panics on a zero size
        self.cells.chunks(self.width.max(1))
    }

    /// Whether the wall on side `dir` of `p` is present. Points outside the grid are solid.
    pub fn has_wall(&self, p: Point, dir: Direction) -> bool {
        self.cell(p).map_or(true, |c| c.walls.get(dir))
    }

    /// Sets the wall on side `dir` of `p` and the matching wall of the neighbour on that side,
    /// if there is one. Border walls only belong to a single cell. Points outside the grid are
    /// ignored.
    pub fn set_wall(&mut self, p: Point, dir: Direction, blocked: bool) {
        if !self.point_in_bounds(p) {
            return;
        }
        let ix = self.get_ix_point(&p);
        self.cells[ix].walls.set(dir, blocked);
        let neighbor = p.neighbor(dir);
        if self.point_in_bounds(neighbor) {
            let n_ix = self.get_ix_point(&neighbor);
            self.cells[n_ix].walls.set(dir.opposite(), blocked);
        }
    }

    /// Adjacency rule shared by the generator's verifier and the solvers: `pos` can be entered
    /// from `start` iff both are on the grid, they are orthogonal neighbours and the wall of
    /// `start` facing `pos` is open.
    pub fn can_move_to(&self, pos: Point, start: Point) -> bool {
        if !self.point_in_bounds(pos) || !self.point_in_bounds(start) {
            return false;
        }
        match start.dir_to(&pos) {
            Some(dir) => !self.has_wall(start, dir),
            None => false,
        }
    }

    /// Traversable neighbours of `point`, in [Direction::ALL] order.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 4]> {
        point
            .neumann_neighborhood()
            .into_iter()
            .filter(|p| self.can_move_to(*p, *point))
            .collect()
    }

    /// Traversable neighbours with their step cost, which is always 1.
    pub fn neighborhood_points_and_cost(&self, pos: &Point) -> SmallVec<[(Point, i32); 4]> {
        self.neighborhood_points(pos)
            .into_iter()
            .map(|p| (p, 1))
            .collect()
    }

    /// Open internal edges, each counted once. Entrance and exit openings lead off the grid and
    /// are not counted.
    pub fn open_edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.cells.iter().flat_map(move |cell| {
            let p = cell.position();
            [Direction::Right, Direction::Bottom]
                .into_iter()
                .map(move |d| (p, p.neighbor(d)))
                .filter(move |&(a, b)| self.can_move_to(b, a))
        })
    }

    pub fn open_edge_count(&self) -> usize {
        self.open_edges().count()
    }

    /// Checks that every pair of neighbours agrees on the wall between them.
    pub fn shared_walls_consistent(&self) -> bool {
        self.cells.iter().all(|cell| {
            let p = cell.position();
            [Direction::Right, Direction::Bottom].into_iter().all(|d| {
                let n = p.neighbor(d);
                !self.point_in_bounds(n) || self.has_wall(p, d) == self.has_wall(n, d.opposite())
            })
        })
    }

    /// Generates a [UnionFind] structure in which cells joined by open walls share a component.
    pub fn generate_components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.len());
        for (a, b) in self.open_edges() {
            components.union(self.get_ix_point(&a), self.get_ix_point(&b));
        }
        components
    }

    /// Number of connected regions of the grid.
    pub fn component_count(&self) -> usize {
        let components = self.generate_components();
        (0..self.len())
            .map(|ix| components.find(ix))
            .unique()
            .count()
    }

    /// A perfect maze is a spanning tree over the cells: connected and without cycles, which is
    /// the case exactly when `len() - 1` walls are open and none of them closes a cycle.
    pub fn is_perfect(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut components = UnionFind::new(self.len());
        let mut edges = 0;
        for (a, b) in self.open_edges() {
            if !components.union(self.get_ix_point(&a), self.get_ix_point(&b)) {
                return false;
            }
            edges += 1;
        }
        edges == self.len() - 1
    }

    /// Breadth-first search from `start` towards `goal` over traversable edges.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if !self.point_in_bounds(*start) || !self.point_in_bounds(*goal) {
            return false;
        }
        let mut visited = vec![false; self.len()];
        let mut queue = VecDeque::from([*start]);
        visited[self.get_ix_point(start)] = true;
        while let Some(current) = queue.pop_front() {
            if current == *goal {
                return true;
            }
            for n in self.neighborhood_points(&current) {
                let ix = self.get_ix_point(&n);
                if !visited[ix] {
                    visited[ix] = true;
                    queue.push_back(n);
                }
            }
        }
        false
    }

    /// Checks if start and goal are not connected.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Whether the exit can be reached from the entrance.
    pub fn verify_connectivity(&self) -> bool {
        !self.is_empty() && self.reachable(&self.entrance(), &self.exit())
    }

    /// Checks that every coordinate is on the grid and every step crosses an open wall between
    /// orthogonal neighbours. The empty path is trivially valid.
    pub fn is_valid_path(&self, path: &[Point]) -> bool {
        path.iter().all(|p| self.point_in_bounds(*p))
            && path
                .iter()
                .tuple_windows()
                .all(|(a, b)| self.can_move_to(*b, *a))
    }

    /// Draws the grid like [Display](fmt::Display) and marks the cells of `path` with `*`.
    pub fn render_path(&self, path: &[Point]) -> String {
        PathView {
            grid: self,
            on_path: path.iter().copied().collect(),
        }
        .to_string()
    }

    fn write_grid(&self, f: &mut fmt::Formatter, on_path: &FxHashSet<Point>) -> fmt::Result {
        for cell in self.rows().next().unwrap_or_default() {
            write!(f, "+{}", if cell.walls.top { "---" } else { "   " })?;
        }
        writeln!(f, "+")?;
        for row in self.rows() {
            for cell in row {
                let p = cell.position();
                let mark = if p == self.entrance() {
                    'A'
                } else if p == self.exit() {
                    'B'
                } else if on_path.contains(&p) {
                    '*'
                } else {
                    ' '
                };
                write!(f, "{} {} ", if cell.walls.left { '|' } else { ' ' }, mark)?;
            }
            let right = row.last().map_or(true, |c| c.walls.right);
            writeln!(f, "{}", if right { '|' } else { ' ' })?;
            for cell in row {
                write!(f, "+{}", if cell.walls.bottom { "---" } else { "   " })?;
            }
            writeln!(f, "+")?;
        }
        Ok(())
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_grid(f, &FxHashSet::default())
    }
}

/// A grid drawn together with the cells of a path.
struct PathView<'a> {
    grid: &'a MazeGrid,
    on_path: FxHashSet<Point>,
}

impl fmt::Display for PathView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.grid.write_grid(f, &self.on_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_grid_has_no_open_edges() {
        let grid = MazeGrid::solid(4, 3);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.open_edge_count(), 0);
        assert_eq!(grid.component_count(), 12);
        assert!(grid.shared_walls_consistent());
        assert!(!grid.verify_connectivity());
        assert!(grid.cells().iter().all(|c| c.walls == Walls::SOLID));
    }

    #[test]
    fn cells_are_stored_row_major() {
        let grid = MazeGrid::solid(3, 2);
        let rows: Vec<&[Cell]> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 3);
            for (x, cell) in row.iter().enumerate() {
                assert_eq!(cell.position(), Point::new(x as i32, y as i32));
            }
        }
        assert_eq!(grid.cell(Point::new(3, 0)), None);
        assert_eq!(grid.cell(Point::new(-1, 0)), None);
    }

    #[test]
    fn open_grid_keeps_border() {
        // 3x2 grid has 2*2 horizontal and 3*1 vertical internal edges
        let grid = MazeGrid::open(3, 2);
        assert_eq!(grid.open_edge_count(), 7);
        assert!(grid.shared_walls_consistent());
        assert!(grid.has_wall(Point::new(0, 0), Direction::Left));
        assert!(grid.has_wall(Point::new(0, 0), Direction::Top));
        assert!(grid.has_wall(Point::new(2, 1), Direction::Right));
        assert!(grid.has_wall(Point::new(2, 1), Direction::Bottom));
        assert!(!grid.has_wall(Point::new(1, 0), Direction::Bottom));
        // Contains the cycle (0,0)-(1,0)-(1,1)-(0,1)
        assert!(!grid.is_perfect());
        assert_eq!(grid.component_count(), 1);
    }

    #[test]
    fn set_wall_updates_both_sides() {
        let mut grid = MazeGrid::solid(2, 2);
        let p = Point::new(0, 0);
        grid.set_wall(p, Direction::Right, false);
        assert!(!grid.has_wall(p, Direction::Right));
        assert!(!grid.has_wall(Point::new(1, 0), Direction::Left));
        assert!(grid.shared_walls_consistent());
        assert!(grid.can_move_to(Point::new(1, 0), p));
        assert!(grid.can_move_to(p, Point::new(1, 0)));

        grid.set_wall(Point::new(1, 1), Direction::Top, false);
        assert!(!grid.has_wall(Point::new(1, 0), Direction::Bottom));
        assert!(grid.shared_walls_consistent());

        // Border walls only touch one cell
        grid.set_wall(p, Direction::Left, false);
        assert!(!grid.has_wall(p, Direction::Left));
        assert!(grid.shared_walls_consistent());
        assert_eq!(grid.open_edge_count(), 2);
    }

    #[test]
    fn border_openings_do_not_leave_grid() {
        let mut grid = MazeGrid::solid(2, 2);
        grid.set_wall(Point::new(0, 0), Direction::Left, false);
        let p = Point::new(0, 0);
        assert!(!grid.can_move_to(Point::new(-1, 0), p));
        assert!(grid.neighborhood_points(&p).is_empty());
    }

    #[test]
    fn no_diagonal_moves() {
        let grid = MazeGrid::open(2, 2);
        assert!(!grid.can_move_to(Point::new(1, 1), Point::new(0, 0)));
        assert!(!grid.can_move_to(Point::new(0, 0), Point::new(0, 0)));
        assert_eq!(grid.neighborhood_points(&Point::new(0, 0)).len(), 2);
    }

    #[test]
    fn inconsistent_walls_are_detected() {
        let mut grid = MazeGrid::solid(2, 2);
        grid.cells[0].walls.right = false;
        assert!(!grid.shared_walls_consistent());
    }

    #[test]
    fn perfect_grid() {
        // +---+---+
        // |       |
        // +---+   +
        // |       |
        // +---+---+
        let mut grid = MazeGrid::solid(2, 2);
        grid.set_wall(Point::new(0, 0), Direction::Right, false);
        grid.set_wall(Point::new(1, 0), Direction::Bottom, false);
        grid.set_wall(Point::new(1, 1), Direction::Left, false);
        assert_eq!(grid.open_edge_count(), 3);
        assert!(grid.is_perfect());
        assert!(grid.verify_connectivity());
        assert_eq!(grid.component_count(), 1);
    }

    #[test]
    fn connectivity_check_catches_split_grid() {
        // Left column and right column are disconnected
        let mut grid = MazeGrid::solid(2, 3);
        grid.set_wall(Point::new(0, 0), Direction::Bottom, false);
        grid.set_wall(Point::new(0, 1), Direction::Bottom, false);
        grid.set_wall(Point::new(1, 0), Direction::Bottom, false);
        grid.set_wall(Point::new(1, 1), Direction::Bottom, false);
        assert!(!grid.verify_connectivity());
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(0, 2)));
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(1, 0)));
        assert_eq!(grid.component_count(), 2);
        assert!(!grid.is_perfect());
    }

    #[test]
    fn reachable_out_of_bounds() {
        let grid = MazeGrid::open(3, 3);
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(3, 0)));
        assert!(!grid.reachable(&Point::new(-1, 0), &Point::new(0, 0)));
    }

    #[test]
    fn path_validation() {
        let grid = MazeGrid::open(2, 2);
        let good = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        let diagonal = [Point::new(0, 0), Point::new(1, 1)];
        let outside = [Point::new(1, 1), Point::new(2, 1)];
        assert!(grid.is_valid_path(&good));
        assert!(grid.is_valid_path(&[]));
        assert!(!grid.is_valid_path(&diagonal));
        assert!(!grid.is_valid_path(&outside));
    }

    #[test]
    fn display_marks_entrance_and_exit() {
        let mut grid = MazeGrid::solid(2, 2);
        grid.set_wall(Point::new(0, 0), Direction::Right, false);
        grid.set_wall(Point::new(1, 0), Direction::Bottom, false);
        grid.set_wall(Point::new(1, 1), Direction::Left, false);
        grid.set_wall(Point::new(0, 0), Direction::Left, false);
        grid.set_wall(Point::new(1, 1), Direction::Right, false);
        let expected = [
            "+---+---+",
            "  A     |",
            "+---+   +",
            "|     B  ",
            "+---+---+",
        ];
        let rendered = grid.to_string();
        assert_eq!(rendered.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn render_path_marks_inner_cells() {
        let grid = MazeGrid::open(3, 1);
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        let rendered = grid.render_path(&path);
        assert_eq!(rendered.lines().nth(1), Some("| A   *   B |"));
        assert_eq!(grid.render_path(&[]), grid.to_string());
    }

    #[test]
    fn from_cells_accepts_well_formed_cells() {
        let mut grid = MazeGrid::solid(3, 2);
        grid.set_wall(Point::new(0, 0), Direction::Right, false);
        grid.set_wall(Point::new(2, 0), Direction::Bottom, false);
        let rebuilt = MazeGrid::from_cells(3, 2, grid.cells().to_vec());
        assert_eq!(rebuilt, Ok(grid));
    }

    #[test]
    fn from_cells_rejects_malformed_cells() {
        let malformed = Err(MazeError::MalformedGrid {
            width: 3,
            height: 3,
        });
        assert_eq!(MazeGrid::from_cells(3, 3, Vec::new()), malformed);

        let cells = MazeGrid::solid(3, 3).cells().to_vec();
        assert_eq!(MazeGrid::from_cells(3, 3, cells[..8].to_vec()), malformed);

        let mut swapped = cells.clone();
        swapped.swap(0, 1);
        assert_eq!(MazeGrid::from_cells(3, 3, swapped), malformed);

        let mut one_sided = cells;
        one_sided[0].walls.right = false;
        assert_eq!(MazeGrid::from_cells(3, 3, one_sided), malformed);

        assert!(MazeGrid::from_cells(usize::MAX, 2, Vec::new()).is_err());
    }
}
