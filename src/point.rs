use core::fmt;
use core::ops::Add;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A grid coordinate. `x` grows to the right, `y` grows downwards, so row `y` of a
/// [MazeGrid](crate::MazeGrid) is drawn below row `y - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Sum of the absolute differences on both axes.
    pub fn manhattan_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The neighbour one step away in `dir`. May lie outside of any grid.
    pub fn neighbor(&self, dir: Direction) -> Point {
        *self + dir
    }

    /// The four orthogonal neighbours in [Direction::ALL] order.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Point; 4]> {
        Direction::ALL.iter().map(|&d| self.neighbor(d)).collect()
    }

    /// The direction leading from `self` to an orthogonally adjacent `other`, if they are adjacent.
    pub fn dir_to(&self, other: &Point) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor(d) == *other)
    }
}

impl Add<Direction> for Point {
    type Output = Point;
    fn add(self, dir: Direction) -> Point {
        let (dx, dy) = dir.delta();
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// One of the four sides of a cell. Only orthogonal movement exists, so these are also the
/// only directions in which a path can step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Clockwise, starting at the top. Neighbour expansion follows this order.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// The side of the neighbouring cell that shares a wall with this side.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }
}
