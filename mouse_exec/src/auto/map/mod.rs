//! # Map
//!
//! This module implements the maps the mouse builds of the maze:
//!
//! - [`WallMap`] - the authoritative, monotonically growing record of sensed walls.
//! - [`DistanceField`] - a flood-filled hop count grid derived from a [`WallMap`] and a set of
//!   source cells, recomputed lazily when it's found to be stale.
//! - [`GoalRegion`] - the set of cells which count as reaching the goal.

// ------------------------------------------------------------------------------------------------
// MODS
// ------------------------------------------------------------------------------------------------

/// Implements the [`WallMap`] type
mod wall_map;

/// Implements the [`DistanceField`] type
mod dist_field;

/// Implements the [`GoalRegion`] type
mod goal;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use dist_field::{DistanceField, UNREACHABLE};
pub use goal::GoalRegion;
pub use wall_map::WallMap;

use crate::auto::loc::Cell;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Cell {0} is outside the maze")]
    OutsideMap(Cell),

    #[error("A goal region must contain at least one cell")]
    EmptyGoalRegion,
}
