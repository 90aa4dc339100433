//! # [`ExecOptimal`] AutoMgr state

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use comms_if::eqpt::MouseIf;
use log::{debug, info, warn};

use crate::auto::per;

use super::{
    display, params::AutoMgrParams, AutoMgrError, AutoMgrPersistantData, AutoMgrState, Phase,
    StepOutput,
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// ExecuteOptimalPath state of the AutoMgr.
///
/// Runs from the start to the goal by greedy descent over the goal-sourced distance field.
#[derive(Debug)]
pub struct ExecOptimal {
    /// Sense the walls of each cell on the run
    sense: bool,

    /// Set once the display has been reset for the run
    started: bool,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl ExecOptimal {
    pub fn new<M: MouseIf>(
        params: &AutoMgrParams,
        persistant: &mut AutoMgrPersistantData,
        mouse: &mut M,
    ) -> Result<Self, AutoMgrError> {
        let here = persistant.nav_ctrl.cell();
        if here != persistant.start {
            return Err(AutoMgrError::NotAtStart(here));
        }

        persistant
            .nav_ctrl
            .begin_phase(Some(params.exec_optimal.step_budget));

        let sense = params.exec_optimal.sense_walls || !persistant.explore_complete;
        if sense && !params.exec_optimal.sense_walls {
            warn!("Exploration did not cover the maze, sensing walls on the optimal run");
        }

        // Walls sensed on the way back are not in the goal distances yet
        let num_walls = persistant.wall_map.num_recorded();
        if num_walls > persistant.goal_field_walls {
            debug!(
                "{} walls found since the goal distances were computed, reflooding",
                num_walls - persistant.goal_field_walls
            );
            persistant.goal_field.refresh(&persistant.wall_map);
            persistant.goal_field_walls = num_walls;
            display::show_distances(mouse, &params.display, &persistant.goal_field);
        }

        persistant.auto_tm.optimal_path_len = persistant.goal_field.get(&here);

        info!(
            "Executing optimal path from {}, {:?} moves expected",
            here, persistant.auto_tm.optimal_path_len
        );

        Ok(Self {
            sense,
            started: false,
        })
    }

    pub fn step<M: MouseIf>(
        &mut self,
        params: &AutoMgrParams,
        persistant: &mut AutoMgrPersistantData,
        mouse: &mut M,
    ) -> Result<StepOutput, AutoMgrError> {
        let here = persistant.nav_ctrl.cell();

        if !self.started {
            display::reset(mouse, &params.display, &persistant.goal);
            persistant.auto_tm.optimal_path = vec![here];
            self.started = true;
        }

        display::colour_cell(mouse, &params.display, &here, params.display.optimal_colour);

        if persistant.goal.contains(&here) {
            let moves = persistant.nav_ctrl.phase_moves();
            info!("Goal reached at {} in {} moves", here, moves);
            persistant.auto_tm.optimal_moves = moves;

            return Ok(StepOutput::replace(AutoMgrState::Done));
        }

        let map = &mut persistant.wall_map;
        let field = &mut persistant.goal_field;

        let num_new_walls = if self.sense {
            per::sense_walls(mouse, &persistant.nav_ctrl.pose(), map)
                .map_err(AutoMgrError::PerError)?
        } else {
            0
        };

        let reflooded = if num_new_walls > 0 {
            debug!("{} new walls at {}, reflooding", num_new_walls, here);
            field.refresh(map);
            true
        } else {
            field.ensure_consistent(map, &here)
        };

        if reflooded {
            let moves = persistant.nav_ctrl.phase_moves() as u32;
            persistant.goal_field_walls = map.num_recorded();
            persistant.auto_tm.optimal_path_len = field.get(&here).map(|d| d + moves);
            display::show_distances(mouse, &params.display, field);
        }

        let (next, heading) = field
            .descend(map, &here)
            .ok_or(AutoMgrError::MapInconsistency(here))?;

        persistant
            .nav_ctrl
            .move_towards(mouse, heading)
            .map_err(|e| AutoMgrError::from_nav(Phase::ExecuteOptimalPath, e))?;

        persistant.auto_tm.optimal_path.push(next);

        Ok(StepOutput::none())
    }
}
