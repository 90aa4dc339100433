//! # Communications interface crate.
//!
//! Provides the interface between the mouse software and the equipment it drives, whether that's
//! the mms simulator or an in-process simulated maze.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Sensor, actuator and display interface of the mouse
pub mod eqpt;

/// Client for the mms simulator text protocol
pub mod mms;
