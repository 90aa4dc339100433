//! # Navigation
//!
//! This module provides the navigation of the mouse through the maze.
//!
//! - [`PathPlanner`] - plans minimum hop paths between two cells of a [`WallMap`] using A*.
//! - [`NavCtrl`] - turns headings and planned paths into actuator commands, keeping track of the
//!   mouse's believed pose and of how many moves it has made against the current step budget.
//!
//! [`WallMap`]: crate::auto::map::WallMap

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod nav_ctrl;
mod path_planner;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use nav_ctrl::NavCtrl;
pub use path_planner::PathPlanner;

use comms_if::eqpt::MouseError;

use super::{
    loc::{Cell, Heading},
    path::PathError,
};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("There is no known path from {0} to {1}")]
    NoPathToTarget(Cell, Cell),

    #[error("Cell {0} is outside the maze")]
    PointOutsideMap(Cell),

    #[error("The step budget of {0} moves has been used up")]
    StepBudgetExceeded(usize),

    #[error("Cannot move directly from {0} to {1}")]
    NotAdjacent(Cell, Cell),

    #[error("Moving {1} from {0} would leave the maze")]
    LeavingMaze(Cell, Heading),

    #[error("The path is not valid: {0}")]
    InvalidPath(PathError),

    #[error("The mouse failed to execute a command: {0}")]
    MouseError(MouseError),
}
