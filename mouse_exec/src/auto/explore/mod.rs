//! # Exploration
//!
//! Drives the mouse around the unknown maze, sensing the walls of every cell it enters into the
//! [`WallMap`] and watching for the goal region.
//!
//! Three strategies are provided, selected by [`ExploreMode`]:
//!
//! - `FullCoverage` - depth-first traversal which visits every reachable cell, backtracking
//!   physically along its own trail, and finishes back at the start.
//! - `GoalSeeking` - the same traversal, but finishing as soon as the goal region is entered.
//! - `FloodGuided` - greedy descent over a goal-sourced [`DistanceField`] which assumes unknown
//!   walls are absent, reflooding whenever the field is found to be stale. Finishes on entering
//!   the goal region.
//!
//! The [`Explorer`] is stepped one decision at a time, each step making at most one move.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod dfs;
mod flood;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{fmt::Display, str::FromStr};

use comms_if::eqpt::MouseIf;
use log::info;
use serde::{Deserialize, Serialize};

use crate::auto::{
    loc::{Cell, GridSize},
    map::{DistanceField, GoalRegion, WallMap},
    nav::{NavCtrl, NavError},
    per::{self, PerError},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Explorer {
    mode: ExploreMode,

    size: GridSize,

    /// Cells which have been entered and sensed, row-major
    visited: Vec<bool>,

    num_visited: usize,

    /// Trail of cells back to the start, used by the depth-first modes
    stack: Vec<Cell>,

    /// Goal-sourced field, used by the flood-guided mode
    field: Option<DistanceField>,

    /// First goal cell entered
    goal_found: Option<Cell>,

    finished: bool,
}

/// Summary of an exploration run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExploreReport {
    pub mode: ExploreMode,

    /// First goal cell entered, if any
    pub goal_found: Option<Cell>,

    pub cells_visited: usize,

    /// `true` if every cell reachable from the start has been visited
    pub complete: bool,

    /// Number of times the guiding distance field was computed, zero for depth-first modes
    pub num_field_computes: usize,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExploreMode {
    FullCoverage,
    GoalSeeking,
    FloodGuided,
}

/// Result of a single exploration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreStatus {
    /// Exploration should be stepped again
    Running,

    /// Exploration has finished
    Finished,
}

#[derive(Debug, thiserror::Error)]
pub enum ExploreError {
    #[error("Navigation error during exploration: {0}")]
    NavError(NavError),

    #[error("Perception error during exploration: {0}")]
    PerError(PerError),

    #[error("The goal region cannot be reached from {0}")]
    GoalUnreachable(Cell),

    #[error("Could not parse {0:?} as an exploration mode")]
    UnknownMode(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Explorer {
    /// Create a new explorer starting from the given cell.
    pub fn new(mode: ExploreMode, size: GridSize, start: Cell) -> Self {
        Self {
            mode,
            size,
            visited: vec![false; size.num_cells()],
            num_visited: 0,
            stack: vec![start],
            field: None,
            goal_found: None,
            finished: false,
        }
    }

    pub fn mode(&self) -> ExploreMode {
        self.mode
    }

    pub fn goal_found(&self) -> Option<Cell> {
        self.goal_found
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_visited(&self, cell: &Cell) -> bool {
        self.size
            .index(cell)
            .map(|i| self.visited[i])
            .unwrap_or(false)
    }

    pub fn report(&self) -> ExploreReport {
        ExploreReport {
            mode: self.mode,
            goal_found: self.goal_found,
            cells_visited: self.num_visited,
            complete: self.finished && self.stack.is_empty(),
            num_field_computes: self.field.as_ref().map_or(0, |f| f.num_computes()),
        }
    }

    /// Make one exploration decision, moving the mouse at most one cell.
    pub fn step<M: MouseIf>(
        &mut self,
        mouse: &mut M,
        nav: &mut NavCtrl,
        map: &mut WallMap,
        goal: &GoalRegion,
    ) -> Result<ExploreStatus, ExploreError> {
        if self.finished {
            return Ok(ExploreStatus::Finished);
        }

        let here = nav.cell();

        // Sense on first entry only, the walls of a visited cell are already known
        if !self.is_visited(&here) {
            self.mark_visited(&here);
            per::sense_walls(mouse, &nav.pose(), map).map_err(ExploreError::PerError)?;

            if goal.contains(&here) && self.goal_found.is_none() {
                info!("Goal region entered at {}", here);
                self.goal_found = Some(here);
            }
        }

        if self.goal_found.is_some() && self.mode != ExploreMode::FullCoverage {
            self.finished = true;
            return Ok(ExploreStatus::Finished);
        }

        let status = match self.mode {
            ExploreMode::FullCoverage | ExploreMode::GoalSeeking => {
                dfs::step(self, mouse, nav, map)?
            }
            ExploreMode::FloodGuided => flood::step(self, mouse, nav, map, goal)?,
        };

        if status == ExploreStatus::Finished {
            self.finished = true;
            info!(
                "Exploration finished after visiting {} cells",
                self.num_visited
            );
        }

        Ok(status)
    }

    fn mark_visited(&mut self, cell: &Cell) {
        if let Some(i) = self.size.index(cell) {
            if !self.visited[i] {
                self.visited[i] = true;
                self.num_visited += 1;
            }
        }
    }
}

impl FromStr for ExploreMode {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(&['-', '_'][..], "").as_str() {
            "fullcoverage" | "dfs" => Ok(ExploreMode::FullCoverage),
            "goalseeking" => Ok(ExploreMode::GoalSeeking),
            "floodguided" | "flood" => Ok(ExploreMode::FloodGuided),
            _ => Err(ExploreError::UnknownMode(s.to_string())),
        }
    }
}

impl Display for ExploreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExploreMode::FullCoverage => write!(f, "FullCoverage"),
            ExploreMode::GoalSeeking => write!(f, "GoalSeeking"),
            ExploreMode::FloodGuided => write!(f, "FloodGuided"),
        }
    }
}

impl Default for ExploreMode {
    fn default() -> Self {
        ExploreMode::FullCoverage
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        auto::loc::Pose,
        sim::{MazeLayout, SimMouse},
    };

    /// A 4x4 maze with a dead end branch and a loop.
    const MAZE_4X4: &str = "
+---+---+---+---+
|           |   |
+   +---+   +   +
|   |       |   |
+   +   +---+   +
|   |   |       |
+   +---+   +   +
|               |
+---+---+---+---+
";

    fn run_explorer(
        layout: MazeLayout,
        mode: ExploreMode,
        goal: &GoalRegion,
    ) -> (Explorer, SimMouse, NavCtrl, WallMap) {
        let size = layout.size();
        let mut mouse = SimMouse::new(layout);
        let mut nav = NavCtrl::new(size, Pose::default());
        let mut map = WallMap::new(size);
        let mut explorer = Explorer::new(mode, size, Cell::new(0, 0));

        let mut steps = 0;
        while explorer.step(&mut mouse, &mut nav, &mut map, goal).unwrap()
            == ExploreStatus::Running
        {
            steps += 1;
            assert!(steps < 10_000, "Exploration did not terminate");
        }

        (explorer, mouse, nav, map)
    }

    #[test]
    fn test_full_coverage() {
        let layout = MazeLayout::parse(MAZE_4X4).unwrap();
        let size = layout.size();
        let goal = GoalRegion::centre(size);
        let truth = layout.walls().clone();

        let (explorer, mouse, nav, map) =
            run_explorer(layout, ExploreMode::FullCoverage, &goal);

        let report = explorer.report();
        assert!(report.complete);
        assert_eq!(report.cells_visited, 16);
        assert!(report.goal_found.is_some());
        assert_eq!(report.num_field_computes, 0);

        // Finished back at the start, without ever hitting a wall
        assert_eq!(nav.cell(), Cell::new(0, 0));
        assert!(!mouse.has_crashed());
        assert_eq!(mouse.pose(), nav.pose());

        // Every cell has been visited, so the map is the true maze
        for cell in size.cells() {
            assert!(explorer.is_visited(&cell));
            for h in crate::auto::loc::Heading::ALL.iter() {
                assert_eq!(map.has_wall(cell, *h), truth.has_wall(cell, *h));
            }
        }

        // Every cell is entered once and left once along a spanning tree
        assert_eq!(nav.total_moves(), 2 * 15);
    }

    #[test]
    fn test_goal_seeking() {
        let layout = MazeLayout::parse(MAZE_4X4).unwrap();
        let goal = GoalRegion::centre(layout.size());

        let (explorer, _, nav, _) = run_explorer(layout, ExploreMode::GoalSeeking, &goal);

        let report = explorer.report();
        assert!(!report.complete);
        assert_eq!(report.goal_found, Some(nav.cell()));
        assert!(goal.contains(&nav.cell()));
        assert!(report.cells_visited < 16);
    }

    #[test]
    fn test_flood_guided() {
        let layout = MazeLayout::parse(MAZE_4X4).unwrap();
        let goal = GoalRegion::centre(layout.size());

        let (explorer, mouse, nav, _) = run_explorer(layout, ExploreMode::FloodGuided, &goal);

        let report = explorer.report();
        assert!(goal.contains(&nav.cell()));
        assert_eq!(report.goal_found, Some(nav.cell()));
        assert!(report.num_field_computes >= 1);
        assert!(!mouse.has_crashed());
    }

    #[test]
    fn test_unreachable_goal() {
        // The goal column is sealed off from the start
        let layout = MazeLayout::parse(
            "
+---+---+---+
|       |   |
+   +   +   +
|       |   |
+---+---+---+
",
        )
        .unwrap();
        let size = layout.size();
        let goal = GoalRegion::new(vec![Cell::new(2, 1)], size).unwrap();

        // Full coverage visits everything reachable and never finds the goal
        let (explorer, _, nav, _) =
            run_explorer(layout.clone(), ExploreMode::FullCoverage, &goal);
        assert!(explorer.report().complete);
        assert_eq!(explorer.report().cells_visited, 4);
        assert_eq!(explorer.goal_found(), None);
        assert_eq!(nav.cell(), Cell::new(0, 0));

        // Flood guided discovers the goal is cut off
        let mut mouse = SimMouse::new(layout);
        let mut nav = NavCtrl::new(size, Pose::default());
        let mut map = WallMap::new(size);
        let mut explorer = Explorer::new(ExploreMode::FloodGuided, size, Cell::new(0, 0));

        let mut result = Ok(ExploreStatus::Running);
        for _ in 0..100 {
            result = explorer.step(&mut mouse, &mut nav, &mut map, &goal);
            if !matches!(result, Ok(ExploreStatus::Running)) {
                break;
            }
        }
        assert!(matches!(result, Err(ExploreError::GoalUnreachable(_))));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(
            "full_coverage".parse::<ExploreMode>().unwrap(),
            ExploreMode::FullCoverage
        );
        assert_eq!(
            "GoalSeeking".parse::<ExploreMode>().unwrap(),
            ExploreMode::GoalSeeking
        );
        assert_eq!(
            "flood".parse::<ExploreMode>().unwrap(),
            ExploreMode::FloodGuided
        );
        assert!("wall-follow".parse::<ExploreMode>().is_err());
    }
}
