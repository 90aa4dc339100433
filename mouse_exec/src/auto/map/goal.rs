//! # Goal Region

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::MapError;
use crate::auto::loc::{Cell, GridSize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The fixed set of cells which count as reaching the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRegion {
    /// Sorted, deduplicated goal cells
    cells: Vec<Cell>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl GoalRegion {
    /// Build a goal region from explicit cells, all of which must be inside the maze.
    pub fn new(mut cells: Vec<Cell>, size: GridSize) -> Result<Self, MapError> {
        if let Some(c) = cells.iter().find(|c| !size.contains(c)) {
            return Err(MapError::OutsideMap(*c));
        }

        cells.sort();
        cells.dedup();

        if cells.is_empty() {
            return Err(MapError::EmptyGoalRegion);
        }

        Ok(Self { cells })
    }

    /// The standard micromouse goal, the 2x2 block at the centre of the maze.
    ///
    /// For odd sizes the block sits just south-west of the true centre. Mazes narrower than two
    /// cells get a correspondingly smaller block.
    pub fn centre(size: GridSize) -> Self {
        let span = |len: usize| {
            let c = len / 2;
            let mut v = vec![c.saturating_sub(1), c.min(len.saturating_sub(1))];
            v.dedup();
            v
        };

        let xs = span(size.width);
        let ys = span(size.height);

        let mut cells: Vec<Cell> = xs
            .iter()
            .flat_map(|x| ys.iter().map(move |y| Cell::new(*x, *y)))
            .collect();
        cells.sort();

        Self { cells }
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.binary_search(cell).is_ok()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
