//! # Navigation Controller
//!
//! Converts target headings, neighbouring cells and planned paths into turn and move commands to
//! the mouse. The believed pose is only updated once the mouse has confirmed each command.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::MouseIf;
use log::trace;
use serde::Serialize;

use crate::auto::{
    loc::{Cell, GridSize, Heading, Pose},
    path::Path,
};

use super::NavError;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct NavCtrl {
    pose: Pose,

    size: GridSize,

    /// Maximum number of moves allowed in the current phase, `None` for no limit
    budget: Option<usize>,

    /// Moves made since the start of the current phase
    phase_moves: usize,

    total_moves: usize,

    total_turns: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavCtrl {
    pub fn new(size: GridSize, pose: Pose) -> Self {
        Self {
            pose,
            size,
            budget: None,
            phase_moves: 0,
            total_moves: 0,
            total_turns: 0,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn cell(&self) -> Cell {
        self.pose.cell
    }

    pub fn heading(&self) -> Heading {
        self.pose.heading
    }

    pub fn phase_moves(&self) -> usize {
        self.phase_moves
    }

    pub fn total_moves(&self) -> usize {
        self.total_moves
    }

    pub fn total_turns(&self) -> usize {
        self.total_turns
    }

    /// Reset the phase move counter and set the budget for the new phase.
    pub fn begin_phase(&mut self, budget: Option<usize>) {
        self.phase_moves = 0;
        self.budget = budget;
    }

    /// Rotate to face `target` with the fewest quarter turns.
    ///
    /// A reversal is always made as two right turns. Returns the number of turns made.
    pub fn turn_to<M: MouseIf>(&mut self, mouse: &mut M, target: Heading) -> Result<usize, NavError> {
        let num_turns = match self.pose.heading.cw_turns_to(target) {
            0 => 0,
            1 => {
                self.turn_right(mouse)?;
                1
            }
            2 => {
                self.turn_right(mouse)?;
                self.turn_right(mouse)?;
                2
            }
            _ => {
                self.turn_left(mouse)?;
                1
            }
        };

        Ok(num_turns)
    }

    fn turn_right<M: MouseIf>(&mut self, mouse: &mut M) -> Result<(), NavError> {
        mouse.turn_right().map_err(NavError::MouseError)?;
        self.pose.heading = self.pose.heading.cw();
        self.total_turns += 1;
        Ok(())
    }

    fn turn_left<M: MouseIf>(&mut self, mouse: &mut M) -> Result<(), NavError> {
        mouse.turn_left().map_err(NavError::MouseError)?;
        self.pose.heading = self.pose.heading.ccw();
        self.total_turns += 1;
        Ok(())
    }

    /// Move one cell forward in the current heading.
    ///
    /// The step budget is checked before the move is commanded, so an exhausted budget leaves
    /// the mouse where it is.
    pub fn advance<M: MouseIf>(&mut self, mouse: &mut M) -> Result<Cell, NavError> {
        if let Some(budget) = self.budget {
            if self.phase_moves >= budget {
                return Err(NavError::StepBudgetExceeded(budget));
            }
        }

        let next = self
            .size
            .neighbour(&self.pose.cell, self.pose.heading)
            .ok_or(NavError::LeavingMaze(self.pose.cell, self.pose.heading))?;

        mouse.move_forward().map_err(NavError::MouseError)?;

        self.pose.cell = next;
        self.phase_moves += 1;
        self.total_moves += 1;

        trace!("Moved to {}", self.pose);

        Ok(next)
    }

    /// Turn to the heading and move one cell in it.
    pub fn move_towards<M: MouseIf>(
        &mut self,
        mouse: &mut M,
        heading: Heading,
    ) -> Result<Cell, NavError> {
        self.turn_to(mouse, heading)?;
        self.advance(mouse)
    }

    /// Move into a neighbouring cell.
    pub fn move_to<M: MouseIf>(&mut self, mouse: &mut M, cell: Cell) -> Result<Cell, NavError> {
        let heading = self
            .pose
            .cell
            .heading_to(&cell)
            .ok_or(NavError::NotAdjacent(self.pose.cell, cell))?;

        self.move_towards(mouse, heading)
    }

    /// Drive along the path without sensing, trusting the map it was planned on.
    pub fn follow_path<M: MouseIf>(&mut self, mouse: &mut M, path: &Path) -> Result<(), NavError> {
        if path.start != self.pose.cell {
            return Err(NavError::NotAdjacent(self.pose.cell, path.start));
        }

        for cell in path.cells.iter() {
            self.move_to(mouse, *cell)?;
        }

        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
