//! Flood-guided exploration step

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::MouseIf;
use log::debug;

use crate::auto::{
    map::{DistanceField, GoalRegion, WallMap},
    nav::NavCtrl,
};

use super::{ExploreError, ExploreStatus, Explorer};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Descend one cell over the goal-sourced field, reflooding first if the walls sensed since the
/// last flood have made it stale at the current cell.
pub(super) fn step<M: MouseIf>(
    explorer: &mut Explorer,
    mouse: &mut M,
    nav: &mut NavCtrl,
    map: &WallMap,
    goal: &GoalRegion,
) -> Result<ExploreStatus, ExploreError> {
    let here = nav.cell();

    let field = explorer.field.get_or_insert_with(|| {
        let mut field = DistanceField::new(map.size());
        field.recompute(map, goal.cells());
        debug!(
            "Initial exploration field computed, {} from goal",
            field.raw(&here)
        );
        field
    });

    field.ensure_consistent(map, &here);

    match field.descend(map, &here) {
        Some((_, heading)) => {
            nav.move_towards(mouse, heading)
                .map_err(ExploreError::NavError)?;
            Ok(ExploreStatus::Running)
        }
        // Consistent and not a source, with no way down, so nothing connects here to the goal
        None => Err(ExploreError::GoalUnreachable(here)),
    }
}
