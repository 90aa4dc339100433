//! # AutoMgr module
//!
//! This module implements the [`AutoMgr`] state machine, which sequences the phases of the maze
//! mission. The states are:
//!
//! - `Explore` - The mouse explores the unknown maze, building the wall map.
//! - `GoalCheck` - Exploration is finished, check that the goal region was found.
//! - `ComputeDistances` - Flood the goal-sourced distance field over the final map.
//! - `ReturnToStart` - Drive the mouse back to the start cell.
//! - `ExecuteOptimalPath` - Run from the start to the goal along the shortest known route.
//! - `Done` - The mission completed.
//! - `Abort` - The mission failed, see the error returned by [`AutoMgr::run`].
//!
//! Any error raised while stepping a state moves the manager into `Abort`. The mouse is left
//! wherever it was, and the wall map and pose are kept for inspection.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod display;
mod exec_optimal;
mod explore;
mod params;
mod return_to_start;
pub mod tm;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Display;

pub use self::{
    params::{AutoMgrParams, DisplayParams, ExecOptimalParams, ExploreParams, ReturnToStartParams},
    return_to_start::ReturnMethod,
    tm::AutoTm,
};

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub mod states {
    pub use super::exec_optimal::ExecOptimal;
    pub use super::explore::Explore;
    pub use super::return_to_start::ReturnToStart;
}

use comms_if::eqpt::{MouseError, MouseIf};
use log::{error, info};
use serde::{Deserialize, Serialize};
use states::*;

use super::{
    explore::ExploreError,
    loc::{Cell, GridSize, Pose},
    map::{DistanceField, GoalRegion, MapError, WallMap},
    nav::{NavCtrl, NavError},
    per::PerError,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Autonomy Manager
///
/// This struct is responsible for managing the state of the mission, and owns all the data used
/// by the states.
pub struct AutoMgr {
    /// Parameters for the AutoMgr and all it's states.
    pub params: AutoMgrParams,

    /// Persistant data of the AutoMgr.
    ///
    /// This is data which is valid over all states, such as the wall map. This allows the map to
    /// not be lost when a new state is entered.
    pub persistant: AutoMgrPersistantData,

    /// The current state.
    state: AutoMgrState,

    /// The error which caused the manager to abort, until it's taken by [`AutoMgr::run`].
    abort_error: Option<AutoMgrError>,
}

pub struct AutoMgrPersistantData {
    pub size: GridSize,

    pub start: Cell,

    pub goal: GoalRegion,

    /// Every wall the mouse knows about.
    pub wall_map: WallMap,

    /// Distance field sourced from the goal region, computed once exploration is over.
    pub goal_field: DistanceField,

    /// Number of walls in the map when `goal_field` was last computed.
    pub goal_field_walls: usize,

    /// Navigation controller, which holds the pose of the mouse.
    pub nav_ctrl: NavCtrl,

    /// `true` if exploration visited every cell reachable from the start.
    pub explore_complete: bool,

    /// Distance field computations made by fields other than `goal_field`.
    pub extra_field_computes: usize,

    /// Mission summary.
    pub auto_tm: AutoTm,
}

/// Output of a state's step function.
pub struct StepOutput {
    /// Action to perform on the state machine
    pub action: StateAction,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the autonomy manager.
#[derive(Debug, thiserror::Error)]
pub enum AutoMgrError {
    #[error("Invalid maze size {0}x{1}")]
    InvalidMazeSize(usize, usize),

    #[error("The start cell {0} is outside the maze")]
    StartOutsideMaze(Cell),

    #[error("Invalid goal region: {0}")]
    InvalidGoal(MapError),

    #[error("Exploration finished without finding the goal region")]
    GoalNotFound,

    #[error("No path found from {0} to {1}")]
    NoPathFound(Cell, Cell),

    #[error("The {phase} phase used up its budget of {budget} moves")]
    StepBudgetExceeded { phase: Phase, budget: usize },

    #[error("The distance field has no way down from {0}")]
    MapInconsistency(Cell),

    #[error("Expected the mouse to be at the start, but it is at {0}")]
    NotAtStart(Cell),

    #[error("Error in navigation: {0}")]
    NavError(NavError),

    #[error("Error in exploration: {0}")]
    ExploreError(ExploreError),

    #[error("Error in perception: {0}")]
    PerError(PerError),

    #[error("Error communicating with the mouse: {0}")]
    MouseError(MouseError),
}

/// The phases of the mission which move the mouse, and so have a step budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Explore,
    ReturnToStart,
    ExecuteOptimalPath,
}

#[derive(Debug)]
pub enum AutoMgrState {
    // In a box to reduce the size of the state enum
    Explore(Box<Explore>),
    GoalCheck,
    ComputeDistances,
    ReturnToStart(Box<ReturnToStart>),
    ExecuteOptimalPath(ExecOptimal),
    Done,
    Abort,
}

/// Actions that can be performed on the state machine at the end of a state's step function.
#[derive(Debug)]
pub enum StateAction {
    None,
    Replace(AutoMgrState),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl AutoMgr {
    /// Create the manager for a new mission, querying the maze size from the mouse.
    pub fn init<M: MouseIf>(params: AutoMgrParams, mouse: &mut M) -> Result<Self, AutoMgrError> {
        let width = mouse.maze_width().map_err(AutoMgrError::MouseError)?;
        let height = mouse.maze_height().map_err(AutoMgrError::MouseError)?;

        if width == 0 || height == 0 {
            return Err(AutoMgrError::InvalidMazeSize(width, height));
        }

        let size = GridSize::new(width, height);

        if !size.contains(&params.start_cell) {
            return Err(AutoMgrError::StartOutsideMaze(params.start_cell));
        }

        let goal = match params.goal_cells {
            Some(ref cells) => {
                GoalRegion::new(cells.clone(), size).map_err(AutoMgrError::InvalidGoal)?
            }
            None => GoalRegion::centre(size),
        };

        info!(
            "AutoMgr initialised for a {} maze, start {}, goal {:?}",
            size,
            params.start_cell,
            goal.cells()
        );

        let mut persistant = AutoMgrPersistantData::new(
            size,
            Pose::new(params.start_cell, params.start_heading),
            goal,
        );

        display::clear_text(mouse, &params.display);
        display::reset(mouse, &params.display, &persistant.goal);

        let state = AutoMgrState::Explore(Box::new(Explore::new(&params, &mut persistant)));
        persistant.auto_tm.state = state.to_string();

        Ok(Self {
            params,
            persistant,
            state,
            abort_error: None,
        })
    }

    /// Step the current state once.
    ///
    /// Errors raised by the state are logged and move the manager into `Abort`; the error can
    /// then be retrieved with [`AutoMgr::take_abort_error`].
    pub fn step<M: MouseIf>(&mut self, mouse: &mut M) {
        let output = self.state.step(&self.params, &mut self.persistant, mouse);

        match output {
            Ok(StepOutput {
                action: StateAction::Replace(s),
            }) => {
                info!("AutoMgr state change to: {}", s);
                self.state = s;
            }
            Ok(StepOutput {
                action: StateAction::None,
            }) => (),
            Err(e) => {
                error!("{} aborted: {}", self.state, e);
                self.discard_partial_result();
                self.persistant.auto_tm.abort_reason = Some(e.to_string());
                self.state = AutoMgrState::Abort;
                self.abort_error = Some(e);
            }
        }

        self.persistant.update_tm(&self.state);
    }

    /// Step the manager until the mission completes or aborts.
    ///
    /// Returns the final mission summary, or the error which caused the abort.
    pub fn run<M: MouseIf>(&mut self, mouse: &mut M) -> Result<AutoTm, AutoMgrError> {
        while !self.is_finished() {
            self.step(mouse);
        }

        match self.abort_error.take() {
            Some(e) => Err(e),
            None => Ok(self.get_tm()),
        }
    }

    pub fn state(&self) -> &AutoMgrState {
        &self.state
    }

    /// Returns true once the manager is in `Done` or `Abort`.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, AutoMgrState::Done | AutoMgrState::Abort)
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.state, AutoMgrState::Abort)
    }

    pub fn take_abort_error(&mut self) -> Option<AutoMgrError> {
        self.abort_error.take()
    }

    pub fn get_tm(&self) -> AutoTm {
        self.persistant.auto_tm.clone()
    }

    pub fn pose(&self) -> Pose {
        self.persistant.nav_ctrl.pose()
    }

    /// Drop whatever the aborting phase had produced so far.
    fn discard_partial_result(&mut self) {
        let tm = &mut self.persistant.auto_tm;
        match self.state {
            AutoMgrState::ReturnToStart(_) => tm.return_path = None,
            AutoMgrState::ExecuteOptimalPath(_) => tm.optimal_path.clear(),
            _ => (),
        }
    }
}

impl Display for AutoMgrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutoMgrState::Explore(_) => write!(f, "AutoMgrState::Explore"),
            AutoMgrState::GoalCheck => write!(f, "AutoMgrState::GoalCheck"),
            AutoMgrState::ComputeDistances => write!(f, "AutoMgrState::ComputeDistances"),
            AutoMgrState::ReturnToStart(_) => write!(f, "AutoMgrState::ReturnToStart"),
            AutoMgrState::ExecuteOptimalPath(_) => write!(f, "AutoMgrState::ExecuteOptimalPath"),
            AutoMgrState::Done => write!(f, "AutoMgrState::Done"),
            AutoMgrState::Abort => write!(f, "AutoMgrState::Abort"),
        }
    }
}

impl AutoMgrState {
    fn step<M: MouseIf>(
        &mut self,
        params: &AutoMgrParams,
        persistant: &mut AutoMgrPersistantData,
        mouse: &mut M,
    ) -> Result<StepOutput, AutoMgrError> {
        match self {
            AutoMgrState::Explore(explore) => explore.step(params, persistant, mouse),
            AutoMgrState::GoalCheck => goal_check(persistant),
            AutoMgrState::ComputeDistances => compute_distances(params, persistant, mouse),
            AutoMgrState::ReturnToStart(ret) => ret.step(params, persistant, mouse),
            AutoMgrState::ExecuteOptimalPath(exec) => exec.step(params, persistant, mouse),
            AutoMgrState::Done | AutoMgrState::Abort => Ok(StepOutput::none()),
        }
    }
}

impl AutoMgrPersistantData {
    pub fn new(size: GridSize, start_pose: Pose, goal: GoalRegion) -> Self {
        let auto_tm = AutoTm {
            maze_size: Some(size),
            pose: Some(start_pose),
            ..Default::default()
        };

        Self {
            size,
            start: start_pose.cell,
            goal,
            wall_map: WallMap::new(size),
            goal_field: DistanceField::new(size),
            goal_field_walls: 0,
            nav_ctrl: NavCtrl::new(size, start_pose),
            explore_complete: false,
            extra_field_computes: 0,
            auto_tm,
        }
    }

    fn update_tm(&mut self, state: &AutoMgrState) {
        let tm = &mut self.auto_tm;
        tm.state = state.to_string();
        tm.pose = Some(self.nav_ctrl.pose());
        tm.num_walls = self.wall_map.num_recorded();
        tm.num_field_computes = self.extra_field_computes + self.goal_field.num_computes();
        tm.total_moves = self.nav_ctrl.total_moves();
        tm.total_turns = self.nav_ctrl.total_turns();
    }
}

impl AutoMgrError {
    /// Convert a navigation error raised during the given phase, lifting out the errors which
    /// the mission treats specially.
    pub fn from_nav(phase: Phase, e: NavError) -> Self {
        match e {
            NavError::StepBudgetExceeded(budget) => {
                AutoMgrError::StepBudgetExceeded { phase, budget }
            }
            NavError::NoPathToTarget(from, to) => AutoMgrError::NoPathFound(from, to),
            NavError::MouseError(e) => AutoMgrError::MouseError(e),
            e => AutoMgrError::NavError(e),
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Explore => write!(f, "Explore"),
            Phase::ReturnToStart => write!(f, "ReturnToStart"),
            Phase::ExecuteOptimalPath => write!(f, "ExecuteOptimalPath"),
        }
    }
}

impl StepOutput {
    pub fn none() -> Self {
        Self {
            action: StateAction::None,
        }
    }

    pub fn replace(state: AutoMgrState) -> Self {
        Self {
            action: StateAction::Replace(state),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// STATES
// ------------------------------------------------------------------------------------------------

/// GoalCheck state, aborts if exploration never entered the goal region.
fn goal_check(persistant: &mut AutoMgrPersistantData) -> Result<StepOutput, AutoMgrError> {
    match persistant.auto_tm.explore.and_then(|r| r.goal_found) {
        Some(cell) => {
            info!("Goal region was found at {}", cell);
            Ok(StepOutput::replace(AutoMgrState::ComputeDistances))
        }
        None => Err(AutoMgrError::GoalNotFound),
    }
}

/// ComputeDistances state, floods the goal field over the map built by exploration.
fn compute_distances<M: MouseIf>(
    params: &AutoMgrParams,
    persistant: &mut AutoMgrPersistantData,
    mouse: &mut M,
) -> Result<StepOutput, AutoMgrError> {
    persistant
        .goal_field
        .recompute(&persistant.wall_map, persistant.goal.cells());
    persistant.goal_field_walls = persistant.wall_map.num_recorded();

    let start_dist = persistant.goal_field.get(&persistant.start);
    info!(
        "Goal distances computed over {} known walls, start is {:?} moves from the goal",
        persistant.wall_map.num_recorded(),
        start_dist
    );

    if start_dist.is_none() {
        let goal_cell = persistant.goal.cells().first().copied();
        return Err(AutoMgrError::NoPathFound(
            persistant.start,
            goal_cell.unwrap_or(persistant.start),
        ));
    }
    persistant.auto_tm.optimal_path_len = start_dist;

    display::show_distances(mouse, &params.display, &persistant.goal_field);

    Ok(StepOutput::replace(AutoMgrState::ReturnToStart(Box::new(
        ReturnToStart::new(params, persistant),
    ))))
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
