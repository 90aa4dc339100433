//! # Autonomy Module
//!
//! This module provides the autonomy of the mouse, allowing it to explore an unknown maze, find
//! the goal, and then run the shortest route it knows from the start to the goal.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use auto_mgr::AutoMgr;

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Automation Manager module
pub mod auto_mgr;

/// Exploration module - covers the maze, sensing walls and looking for the goal
pub mod explore;

/// Localisation module - provides the maze grid geometry and the mouse's pose
pub mod loc;

/// Defines path types
pub mod path;

/// Navigation module - provides path planning and motion control
pub mod nav;

/// Map module - provides the wall map and distance fields
pub mod map;

/// Perception module - converts wall sensor readings into walls in the map
pub mod per;
