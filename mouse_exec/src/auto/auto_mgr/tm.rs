//! # Defines Telemetry Pack for Autonomy

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::auto::{
    explore::ExploreReport,
    loc::{Cell, GridSize, Pose},
    path::Path,
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Summary of the mission, updated as the AutoMgr runs and saved into the session at the end.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AutoTm {
    pub maze_size: Option<GridSize>,

    /// Name of the current (or final) state
    pub state: String,

    pub pose: Option<Pose>,

    pub explore: Option<ExploreReport>,

    /// Number of interior walls known
    pub num_walls: usize,

    /// Number of distance field computations across all phases
    pub num_field_computes: usize,

    pub explore_moves: usize,
    pub return_moves: usize,
    pub optimal_moves: usize,
    pub total_moves: usize,
    pub total_turns: usize,

    /// Expected length of the optimal run, from the goal distances of the map known when the run
    /// starts. Revised whenever the run finds new walls, so on completion it equals
    /// `optimal_moves`.
    pub optimal_path_len: Option<u32>,

    /// Path planned back to the start, for the A* return method
    pub return_path: Option<Path>,

    /// Cells visited on the optimal run
    pub optimal_path: Vec<Cell>,

    pub abort_reason: Option<String>,
}
