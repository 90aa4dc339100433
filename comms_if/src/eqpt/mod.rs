//! # Equipment Interface
//!
//! This module defines the interface the autonomy software uses to sense and move.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod mouse;

pub use mouse::{Colour, MouseError, MouseIf};
