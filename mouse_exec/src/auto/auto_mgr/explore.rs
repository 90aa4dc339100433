//! # [`Explore`] AutoMgr state

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use comms_if::eqpt::MouseIf;
use log::{info, warn};

use crate::auto::explore::{ExploreError, ExploreStatus, Explorer};

use super::{
    display, params::AutoMgrParams, AutoMgrError, AutoMgrPersistantData, AutoMgrState, Phase,
    StepOutput,
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Explore state of the AutoMgr.
///
/// Steps the [`Explorer`] until it finishes, then moves on to `GoalCheck`.
#[derive(Debug)]
pub struct Explore {
    explorer: Explorer,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl Explore {
    pub fn new(params: &AutoMgrParams, persistant: &mut AutoMgrPersistantData) -> Self {
        persistant
            .nav_ctrl
            .begin_phase(Some(params.explore.step_budget));

        info!(
            "Exploring in {} mode with a budget of {} moves",
            params.explore.mode, params.explore.step_budget
        );

        Self {
            explorer: Explorer::new(
                params.explore.mode,
                persistant.size,
                persistant.nav_ctrl.cell(),
            ),
        }
    }

    pub fn step<M: MouseIf>(
        &mut self,
        params: &AutoMgrParams,
        persistant: &mut AutoMgrPersistantData,
        mouse: &mut M,
    ) -> Result<StepOutput, AutoMgrError> {
        let here = persistant.nav_ctrl.cell();

        let status = self
            .explorer
            .step(
                mouse,
                &mut persistant.nav_ctrl,
                &mut persistant.wall_map,
                &persistant.goal,
            )
            .map_err(|e| match e {
                ExploreError::NavError(e) => AutoMgrError::from_nav(Phase::Explore, e),
                ExploreError::GoalUnreachable(c) => {
                    warn!("Flood guided exploration found the goal unreachable from {}", c);
                    AutoMgrError::GoalNotFound
                }
                e => AutoMgrError::ExploreError(e),
            })?;

        if !persistant.goal.contains(&here) {
            display::colour_cell(mouse, &params.display, &here, params.display.explored_colour);
        }

        if status == ExploreStatus::Running {
            return Ok(StepOutput::none());
        }

        let report = self.explorer.report();
        info!(
            "Exploration visited {} cells in {} moves, goal found: {:?}",
            report.cells_visited,
            persistant.nav_ctrl.phase_moves(),
            report.goal_found
        );

        persistant.explore_complete = report.complete;
        persistant.extra_field_computes += report.num_field_computes;
        persistant.auto_tm.explore = Some(report);
        persistant.auto_tm.explore_moves = persistant.nav_ctrl.phase_moves();

        Ok(StepOutput::replace(AutoMgrState::GoalCheck))
    }
}
