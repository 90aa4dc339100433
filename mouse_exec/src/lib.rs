//! # Mouse library.
//!
//! This library allows the executables in the mouse crate (and its benchmarks) to access the
//! items defined inside it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Autonomy - exploration, mapping, path planning and the mission state machine
pub mod auto;

/// Simulation - an in-process maze and mouse, for running missions without the simulator
pub mod sim;
