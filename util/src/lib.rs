//! Utility library for the micromouse software

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod host;
#[macro_use]
pub mod logger;
pub mod params;
pub mod session;
pub mod time;
