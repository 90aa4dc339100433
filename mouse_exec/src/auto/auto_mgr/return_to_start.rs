//! # [`ReturnToStart`] AutoMgr state
//!
//! The A* method trusts the map and follows the whole plan without sensing only when exploration
//! covered the maze. Full coverage exploration finishes back at the start, so with the current
//! exploration modes that follow never runs: the state either finds the mouse already at the
//! start, or exploration stopped early and the return senses every cell, moving one planned cell
//! per step and replanning when new walls show up.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::str::FromStr;

use comms_if::eqpt::MouseIf;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::auto::{
    map::DistanceField,
    nav::PathPlanner,
    path::Path,
    per,
};

use super::{
    display, exec_optimal::ExecOptimal, params::AutoMgrParams, AutoMgrError,
    AutoMgrPersistantData, AutoMgrState, Phase, StepOutput,
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// ReturnToStart state of the AutoMgr.
///
/// Drives the mouse from wherever exploration left it back to the start cell.
#[derive(Debug)]
pub struct ReturnToStart {
    method: ReturnMethod,

    /// Sense the walls of each cell on the way back
    sense: bool,

    planner: PathPlanner,

    /// Current A* plan, and the index of the next cell to move into
    path: Option<(Path, usize)>,

    /// Start-sourced field for the flood fill method
    field: Option<DistanceField>,
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

/// How the mouse gets back to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnMethod {
    /// Plan with A* over the known map and follow the plan
    AStar,

    /// Greedy descent over a start-sourced distance field, sensing every cell
    FloodFill,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl ReturnToStart {
    pub fn new(params: &AutoMgrParams, persistant: &mut AutoMgrPersistantData) -> Self {
        persistant
            .nav_ctrl
            .begin_phase(Some(params.return_to_start.step_budget));

        let method = params.return_to_start.method;

        // An incomplete map may be missing walls on the way back, so the A* return has to sense
        // and replan
        let sense = method == ReturnMethod::FloodFill || !persistant.explore_complete;

        info!(
            "Returning from {} to start {} using {:?}{}",
            persistant.nav_ctrl.cell(),
            persistant.start,
            method,
            if sense { " with sensing" } else { "" }
        );

        Self {
            method,
            sense,
            planner: PathPlanner::new(),
            path: None,
            field: None,
        }
    }

    pub fn step<M: MouseIf>(
        &mut self,
        params: &AutoMgrParams,
        persistant: &mut AutoMgrPersistantData,
        mouse: &mut M,
    ) -> Result<StepOutput, AutoMgrError> {
        let here = persistant.nav_ctrl.cell();

        if here != persistant.start {
            display::colour_cell(mouse, &params.display, &here, params.display.return_colour);
        }

        let num_new_walls = if self.sense {
            per::sense_walls(mouse, &persistant.nav_ctrl.pose(), &mut persistant.wall_map)
                .map_err(AutoMgrError::PerError)?
        } else {
            0
        };

        if here == persistant.start {
            let moves = persistant.nav_ctrl.phase_moves();
            info!("Back at the start after {} moves", moves);

            persistant.auto_tm.return_moves = moves;
            if let Some(f) = self.field.as_ref() {
                persistant.extra_field_computes += f.num_computes();
            }

            return Ok(StepOutput::replace(AutoMgrState::ExecuteOptimalPath(
                ExecOptimal::new(params, persistant, mouse)?,
            )));
        }

        match self.method {
            ReturnMethod::AStar => self.step_astar(persistant, mouse, num_new_walls)?,
            ReturnMethod::FloodFill => self.step_flood(persistant, mouse, num_new_walls)?,
        }

        Ok(StepOutput::none())
    }

    fn step_astar<M: MouseIf>(
        &mut self,
        persistant: &mut AutoMgrPersistantData,
        mouse: &mut M,
        num_new_walls: usize,
    ) -> Result<(), AutoMgrError> {
        let here = persistant.nav_ctrl.cell();

        if num_new_walls > 0 && self.path.is_some() {
            debug!("{} new walls at {}, replanning", num_new_walls, here);
            self.path = None;
        }

        if self.path.is_none() {
            let path = self
                .planner
                .plan(&persistant.wall_map, here, persistant.start)
                .map_err(|e| AutoMgrError::from_nav(Phase::ReturnToStart, e))?;

            info!("Planned {} move return path", path.len());
            persistant.auto_tm.return_path = Some(path.clone());

            // Without sensing the plan is trusted and followed in one go
            if !self.sense {
                return persistant
                    .nav_ctrl
                    .follow_path(mouse, &path)
                    .map_err(|e| AutoMgrError::from_nav(Phase::ReturnToStart, e));
            }

            self.path = Some((path, 0));
        }

        if let Some((path, next)) = self.path.as_mut() {
            if let Some(cell) = path.cells.get(*next) {
                persistant
                    .nav_ctrl
                    .move_to(mouse, *cell)
                    .map_err(|e| AutoMgrError::from_nav(Phase::ReturnToStart, e))?;
                *next += 1;
            }
        }

        Ok(())
    }

    fn step_flood<M: MouseIf>(
        &mut self,
        persistant: &mut AutoMgrPersistantData,
        mouse: &mut M,
        num_new_walls: usize,
    ) -> Result<(), AutoMgrError> {
        let here = persistant.nav_ctrl.cell();
        let map = &persistant.wall_map;
        let start = persistant.start;

        let field = self.field.get_or_insert_with(|| {
            let mut field = DistanceField::new(map.size());
            field.recompute(map, &[start]);
            field
        });

        if num_new_walls > 0 {
            debug!("{} new walls at {}, reflooding", num_new_walls, here);
            field.refresh(map);
        } else {
            field.ensure_consistent(map, &here);
        }

        let (_, heading) = field
            .descend(map, &here)
            .ok_or(AutoMgrError::NoPathFound(here, start))?;

        persistant
            .nav_ctrl
            .move_towards(mouse, heading)
            .map_err(|e| AutoMgrError::from_nav(Phase::ReturnToStart, e))?;

        Ok(())
    }
}

impl FromStr for ReturnMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(&['-', '_', '*'][..], "").as_str() {
            "astar" | "a" => Ok(ReturnMethod::AStar),
            "floodfill" | "flood" => Ok(ReturnMethod::FloodFill),
            _ => Err(format!("Could not parse {:?} as a return method", s)),
        }
    }
}

impl Default for ReturnMethod {
    fn default() -> Self {
        ReturnMethod::AStar
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
