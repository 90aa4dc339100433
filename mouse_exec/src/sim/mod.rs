//! # Simulation
//!
//! An in-process stand in for the maze simulator, used by the `maze_test` executable and by the
//! tests of the autonomy modules.
//!
//! - [`MazeLayout`] - the true walls of a maze, parsed from the classic ASCII maze format.
//! - [`SimMouse`] - a [`MouseIf`] implementation which moves around a [`MazeLayout`].
//!
//! [`MouseIf`]: comms_if::eqpt::MouseIf

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod layout;
mod mouse;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use layout::{LayoutError, MazeLayout};
pub use mouse::SimMouse;
