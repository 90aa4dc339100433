//! Depth-first exploration step

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::MouseIf;
use log::trace;

use crate::auto::{map::WallMap, nav::NavCtrl};

use super::{ExploreError, ExploreStatus, Explorer};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Move into the first unvisited open neighbour in heading priority order, or retrace one cell
/// along the trail if there is none.
///
/// The mouse's current cell is always the top of the trail.
pub(super) fn step<M: MouseIf>(
    explorer: &mut Explorer,
    mouse: &mut M,
    nav: &mut NavCtrl,
    map: &WallMap,
) -> Result<ExploreStatus, ExploreError> {
    let here = nav.cell();

    let frontier = map
        .open_neighbours(here)
        .find(|(cell, _)| !explorer.is_visited(cell));

    if let Some((next, heading)) = frontier {
        nav.move_towards(mouse, heading)
            .map_err(ExploreError::NavError)?;
        explorer.stack.push(next);
        return Ok(ExploreStatus::Running);
    }

    // Dead end, backtrack
    explorer.stack.pop();

    match explorer.stack.last() {
        Some(prev) => {
            trace!("Backtracking from {} to {}", here, prev);
            nav.move_to(mouse, *prev).map_err(ExploreError::NavError)?;
            Ok(ExploreStatus::Running)
        }
        None => Ok(ExploreStatus::Finished),
    }
}
