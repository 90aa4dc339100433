//! # Localisation module
//!
//! The mouse has no absolute position sensing, so localisation is dead reckoning on the maze
//! grid: the believed [`Pose`] is updated by the navigation controller after each confirmed
//! actuator call. This module provides the grid geometry that everything else is built on.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A cell of the maze, `(0, 0)` being the south-west corner.
///
/// Cells order lexicographically by `(x, y)`, which is the tie-break order used by the path
/// planner.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

/// Dimensions of the maze in cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

/// The believed position and facing of the mouse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub cell: Cell,
    pub heading: Heading,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The four cardinal directions, encoded `0..=3` clockwise from North.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: &Cell) -> usize {
        abs_diff(self.x, other.x) + abs_diff(self.y, other.y)
    }

    /// Heading which moves from this cell into `other`, or `None` if the cells aren't
    /// 4-neighbours.
    pub fn heading_to(&self, other: &Cell) -> Option<Heading> {
        Heading::ALL
            .iter()
            .copied()
            .find(|h| self.step(*h).as_ref() == Some(other))
    }

    /// The adjacent cell in the given heading, ignoring maze bounds other than the origin.
    fn step(&self, heading: Heading) -> Option<Cell> {
        let (dx, dy) = heading.offset();
        let x = offset_coord(self.x, dx)?;
        let y = offset_coord(self.y, dy)?;
        Some(Cell::new(x, y))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Cell {
    fn from(xy: (usize, usize)) -> Self {
        Cell::new(xy.0, xy.1)
    }
}

impl Heading {
    /// All headings in their fixed priority order.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Heading with the given encoding, taken modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// The heading after one clockwise (right) turn.
    pub fn cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The heading after one anticlockwise (left) turn.
    pub fn ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Number of clockwise quarter turns from `self` to `target`, in `0..=3`.
    pub fn cw_turns_to(self, target: Heading) -> usize {
        (target.index() + 4 - self.index()) % 4
    }

    /// Unit vector of the heading, with North being +y.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }
}

impl Default for Heading {
    fn default() -> Self {
        Heading::North
    }
}

impl Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Heading::North => "N",
            Heading::East => "E",
            Heading::South => "S",
            Heading::West => "W",
        };
        write!(f, "{}", s)
    }
}

impl GridSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Row-major index of the cell into a flat grid, or `None` if outside the maze.
    pub fn index(&self, cell: &Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.y * self.width + cell.x)
        } else {
            None
        }
    }

    /// The neighbour of `cell` in the given heading, if that neighbour is inside the maze.
    pub fn neighbour(&self, cell: &Cell, heading: Heading) -> Option<Cell> {
        cell.step(heading).filter(|n| self.contains(n))
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Pose {
    pub fn new(cell: Cell, heading: Heading) -> Self {
        Self { cell, heading }
    }
}

impl Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.cell, self.heading)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn abs_diff(a: usize, b: usize) -> usize {
    if a > b {
        a - b
    } else {
        b - a
    }
}

fn offset_coord(coord: usize, delta: isize) -> Option<usize> {
    if delta < 0 {
        coord.checked_sub(delta.unsigned_abs())
    } else {
        coord.checked_add(delta as usize)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
