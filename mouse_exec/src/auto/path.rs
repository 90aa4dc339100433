//! # Path
//!
//! This module defines the path used by the autonomy system.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::{
    loc::{Cell, Heading},
    map::WallMap,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A route through the maze, made of the cell it starts in and the cells visited after it.
///
/// Consecutive cells are always 4-neighbours. A path with no `cells` stays at `start`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Path {
    pub start: Cell,
    pub cells: Vec<Cell>,
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Cells {0} and {1} are not adjacent")]
    NonAdjacent(Cell, Cell),

    #[error("There is a known wall between {0} and {1}")]
    Blocked(Cell, Cell),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new empty path starting (and ending) at the given cell.
    pub fn new_empty(start: Cell) -> Self {
        Self {
            start,
            cells: Vec::new(),
        }
    }

    /// Build a path from the start and following cells, checking that each step is between
    /// adjacent cells.
    pub fn from_cells(start: Cell, cells: Vec<Cell>) -> Result<Self, PathError> {
        let path = Self { start, cells };

        for (from, to) in path.steps() {
            if from.heading_to(&to).is_none() {
                return Err(PathError::NonAdjacent(from, to));
            }
        }

        Ok(path)
    }

    /// Number of moves in the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The final cell of the path.
    pub fn target(&self) -> Cell {
        self.cells.last().copied().unwrap_or(self.start)
    }

    /// Iterate over each `(from, to)` pair of the path.
    pub fn steps(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        std::iter::once(&self.start)
            .chain(self.cells.iter())
            .zip(self.cells.iter())
            .map(|(a, b)| (*a, *b))
    }

    /// The heading of each move of the path.
    ///
    /// Steps between non-adjacent cells are skipped, which can't happen for a path built with
    /// [`Path::from_cells`].
    pub fn headings(&self) -> Vec<Heading> {
        self.steps().filter_map(|(a, b)| a.heading_to(&b)).collect()
    }

    /// Check that no step of the path crosses a wall known in the given map.
    pub fn check_open(&self, map: &WallMap) -> Result<(), PathError> {
        for (from, to) in self.steps() {
            let heading = from.heading_to(&to).ok_or(PathError::NonAdjacent(from, to))?;
            if map.has_wall(from, heading) {
                return Err(PathError::Blocked(from, to));
            }
        }

        Ok(())
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        for c in self.cells.iter() {
            write!(f, " -> {}", c)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::loc::GridSize;

    #[test]
    fn test_path_basics() {
        let path = Path::from_cells(
            Cell::new(0, 0),
            vec![Cell::new(0, 1), Cell::new(1, 1), Cell::new(1, 0)],
        )
        .unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.target(), Cell::new(1, 0));
        assert_eq!(
            path.headings(),
            vec![Heading::North, Heading::East, Heading::South]
        );
        assert_eq!(
            format!("{}", path),
            "(0, 0) -> (0, 1) -> (1, 1) -> (1, 0)"
        );

        let empty = Path::new_empty(Cell::new(3, 3));
        assert!(empty.is_empty());
        assert_eq!(empty.target(), Cell::new(3, 3));
        assert_eq!(empty.steps().count(), 0);
    }

    #[test]
    fn test_non_adjacent() {
        let res = Path::from_cells(Cell::new(0, 0), vec![Cell::new(0, 1), Cell::new(1, 2)]);

        assert!(matches!(
            res,
            Err(PathError::NonAdjacent(a, b)) if a == Cell::new(0, 1) && b == Cell::new(1, 2)
        ));
    }

    #[test]
    fn test_check_open() {
        let mut map = WallMap::new(GridSize::new(3, 3));
        let path = Path::from_cells(Cell::new(0, 0), vec![Cell::new(1, 0), Cell::new(1, 1)])
            .unwrap();

        assert!(path.check_open(&map).is_ok());

        map.record_wall(Cell::new(1, 1), Heading::South).unwrap();
        assert!(matches!(
            path.check_open(&map),
            Err(PathError::Blocked(a, _)) if a == Cell::new(1, 0)
        ));
    }
}
