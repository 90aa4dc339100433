//! # AutoMgr Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::Colour;
use serde::{Deserialize, Serialize};

use crate::auto::{
    explore::ExploreMode,
    loc::{Cell, Heading},
};

use super::return_to_start::ReturnMethod;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Default maximum number of moves in a single phase.
const DEFAULT_STEP_BUDGET: usize = 5000;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoMgrParams {
    /// Cell the mouse starts the mission in
    pub start_cell: Cell,

    /// Heading the mouse starts the mission facing
    pub start_heading: Heading,

    /// Cells of the goal region. If not given the 2x2 block at the centre of the maze is used.
    pub goal_cells: Option<Vec<Cell>>,

    pub explore: ExploreParams,

    pub return_to_start: ReturnToStartParams,

    pub exec_optimal: ExecOptimalParams,

    pub display: DisplayParams,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreParams {
    pub mode: ExploreMode,

    /// Maximum number of moves allowed while exploring
    pub step_budget: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnToStartParams {
    pub method: ReturnMethod,

    /// Maximum number of moves allowed while returning to the start
    pub step_budget: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecOptimalParams {
    /// Maximum number of moves allowed on the optimal run
    pub step_budget: usize,

    /// Sense walls on every cell of the optimal run, reflooding the goal field when new ones are
    /// found.
    ///
    /// Sensing is always done if exploration didn't cover the whole maze, as the map may then be
    /// missing walls on the route.
    pub sense_walls: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayParams {
    /// Drive the display hooks of the mouse
    pub enabled: bool,

    /// Write the goal distance of each cell as text once distances are computed
    pub show_distances: bool,

    pub explored_colour: Colour,
    pub goal_colour: Colour,
    pub return_colour: Colour,
    pub optimal_colour: Colour,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for AutoMgrParams {
    fn default() -> Self {
        Self {
            start_cell: Cell::new(0, 0),
            start_heading: Heading::North,
            goal_cells: None,
            explore: ExploreParams::default(),
            return_to_start: ReturnToStartParams::default(),
            exec_optimal: ExecOptimalParams::default(),
            display: DisplayParams::default(),
        }
    }
}

impl Default for ExploreParams {
    fn default() -> Self {
        Self {
            mode: ExploreMode::FullCoverage,
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

impl Default for ReturnToStartParams {
    fn default() -> Self {
        Self {
            method: ReturnMethod::AStar,
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

impl Default for ExecOptimalParams {
    fn default() -> Self {
        Self {
            step_budget: DEFAULT_STEP_BUDGET,
            sense_walls: false,
        }
    }
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            enabled: true,
            show_distances: true,
            explored_colour: Colour::DarkYellow,
            goal_colour: Colour::DarkGreen,
            return_colour: Colour::DarkBlue,
            optimal_colour: Colour::DarkCyan,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_params() {
        let params: AutoMgrParams = util::params::from_str(
            r#"
            goal_cells = [{ x = 3, y = 3 }]

            [explore]
            mode = "GoalSeeking"

            [return_to_start]
            method = "FloodFill"
            step_budget = 200

            [display]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(params.start_cell, Cell::new(0, 0));
        assert_eq!(params.goal_cells, Some(vec![Cell::new(3, 3)]));
        assert_eq!(params.explore.mode, ExploreMode::GoalSeeking);
        assert_eq!(params.explore.step_budget, DEFAULT_STEP_BUDGET);
        assert_eq!(params.return_to_start.method, ReturnMethod::FloodFill);
        assert_eq!(params.return_to_start.step_budget, 200);
        assert!(!params.exec_optimal.sense_walls);
        assert!(!params.display.enabled);
        assert_eq!(params.display.goal_colour, Colour::DarkGreen);
    }

    #[test]
    fn test_empty_params() {
        let params: AutoMgrParams = util::params::from_str("").unwrap();

        assert_eq!(params.explore.mode, ExploreMode::FullCoverage);
        assert_eq!(params.return_to_start.method, ReturnMethod::AStar);
        assert_eq!(params.start_heading, Heading::North);
    }
}
