//! Display helpers for the AutoMgr states
//!
//! All of these do nothing when the display is disabled in the parameters.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{Colour, MouseIf};

use crate::auto::{
    loc::Cell,
    map::{DistanceField, GoalRegion},
};

use super::params::DisplayParams;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

pub(super) fn colour_cell<M: MouseIf>(
    mouse: &mut M,
    params: &DisplayParams,
    cell: &Cell,
    colour: Colour,
) {
    if params.enabled {
        mouse.set_color(cell.x, cell.y, colour);
    }
}

pub(super) fn colour_goal<M: MouseIf>(mouse: &mut M, params: &DisplayParams, goal: &GoalRegion) {
    for cell in goal.cells() {
        colour_cell(mouse, params, cell, params.goal_colour);
    }
}

/// Write the distance of every reachable cell as its text.
pub(super) fn show_distances<M: MouseIf>(
    mouse: &mut M,
    params: &DisplayParams,
    field: &DistanceField,
) {
    if !(params.enabled && params.show_distances) {
        return;
    }

    mouse.clear_all_text();
    for (cell, dist) in field.iter_reachable() {
        mouse.set_text(cell.x, cell.y, &dist.to_string());
    }
}

/// Clear all colours, then mark the goal region.
pub(super) fn reset<M: MouseIf>(mouse: &mut M, params: &DisplayParams, goal: &GoalRegion) {
    if !params.enabled {
        return;
    }

    mouse.clear_all_color();
    colour_goal(mouse, params, goal);
}

pub(super) fn clear_text<M: MouseIf>(mouse: &mut M, params: &DisplayParams) {
    if params.enabled {
        mouse.clear_all_text();
    }
}
