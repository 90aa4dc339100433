//! # Wall Map
//!
//! The record of every wall segment the mouse knows about. Unknown walls are assumed absent, so
//! a fresh map is optimistic and only knows the maze boundary.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use serde::Serialize;

use super::MapError;
use crate::auto::loc::{Cell, GridSize, Heading};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Mapping from `(Cell, Heading)` to whether there's a wall on that side of the cell.
///
/// Walls are stored from both sides: recording a wall on one side of a cell also records it on
/// the facing side of the neighbour. There is no way to remove a wall.
#[derive(Debug, Clone, Serialize)]
pub struct WallMap {
    size: GridSize,

    /// Walls of each cell, row-major, indexed by [`Heading::index`].
    walls: Vec<[bool; 4]>,

    /// Number of interior wall segments recorded since construction.
    num_recorded: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WallMap {
    /// Create a new map with only the maze boundary walls present.
    pub fn new(size: GridSize) -> Self {
        let mut walls = vec![[false; 4]; size.num_cells()];

        for cell in size.cells() {
            for heading in Heading::ALL.iter() {
                if size.neighbour(&cell, *heading).is_none() {
                    walls[cell.y * size.width + cell.x][heading.index()] = true;
                }
            }
        }

        Self {
            size,
            walls,
            num_recorded: 0,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Number of interior wall segments recorded so far.
    pub fn num_recorded(&self) -> usize {
        self.num_recorded
    }

    /// Record a wall on the `heading` side of `cell`, mirroring it into the neighbour.
    ///
    /// Returns `true` if the wall was not already known.
    pub fn record_wall(&mut self, cell: Cell, heading: Heading) -> Result<bool, MapError> {
        let idx = self.size.index(&cell).ok_or(MapError::OutsideMap(cell))?;

        if self.walls[idx][heading.index()] {
            return Ok(false);
        }

        self.walls[idx][heading.index()] = true;

        // Boundary walls are seeded at construction, so any new wall has an in-bounds neighbour
        if let Some(neighbour) = self.size.neighbour(&cell, heading) {
            let n_idx = neighbour.y * self.size.width + neighbour.x;
            self.walls[n_idx][heading.opposite().index()] = true;
        }

        self.num_recorded += 1;
        trace!("Recorded wall {} of {}", heading, cell);

        Ok(true)
    }

    /// Returns `true` if there's a known wall on the `heading` side of `cell`.
    ///
    /// Cells outside the maze are walled on all sides.
    pub fn has_wall(&self, cell: Cell, heading: Heading) -> bool {
        match self.size.index(&cell) {
            Some(idx) => self.walls[idx][heading.index()],
            None => true,
        }
    }

    /// The neighbour of `cell` in `heading`, if it's in the maze and no wall is known between
    /// them.
    pub fn open_neighbour(&self, cell: Cell, heading: Heading) -> Option<Cell> {
        if self.has_wall(cell, heading) {
            None
        } else {
            self.size.neighbour(&cell, heading)
        }
    }

    /// All open neighbours of `cell` with the heading leading to them, in heading priority
    /// order.
    pub fn open_neighbours(&self, cell: Cell) -> impl Iterator<Item = (Cell, Heading)> + '_ {
        Heading::ALL
            .iter()
            .filter_map(move |h| self.open_neighbour(cell, *h).map(|n| (n, *h)))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
