//! # Simulated Mouse
//!
//! A mouse which lives inside a [`MazeLayout`], answering sensor queries from the true walls and
//! refusing to drive through them.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use comms_if::eqpt::{Colour, MouseError, MouseIf};
use log::warn;

use super::MazeLayout;
use crate::auto::loc::{Cell, Heading, Pose};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimMouse {
    layout: MazeLayout,

    /// True pose of the mouse
    pose: Pose,

    crashed: bool,

    num_moves: usize,
    num_left_turns: usize,
    num_right_turns: usize,
    num_sensor_reads: usize,

    /// Current display state
    colours: HashMap<Cell, Colour>,
    texts: HashMap<Cell, String>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimMouse {
    /// Create a mouse in the south-west corner of the maze, facing north.
    pub fn new(layout: MazeLayout) -> Self {
        Self::with_pose(layout, Pose::default())
    }

    pub fn with_pose(layout: MazeLayout, pose: Pose) -> Self {
        Self {
            layout,
            pose,
            crashed: false,
            num_moves: 0,
            num_left_turns: 0,
            num_right_turns: 0,
            num_sensor_reads: 0,
            colours: HashMap::new(),
            texts: HashMap::new(),
        }
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn has_crashed(&self) -> bool {
        self.crashed
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn num_left_turns(&self) -> usize {
        self.num_left_turns
    }

    pub fn num_right_turns(&self) -> usize {
        self.num_right_turns
    }

    pub fn num_sensor_reads(&self) -> usize {
        self.num_sensor_reads
    }

    pub fn colour(&self, cell: &Cell) -> Option<Colour> {
        self.colours.get(cell).copied()
    }

    pub fn text(&self, cell: &Cell) -> Option<&str> {
        self.texts.get(cell).map(|s| s.as_str())
    }

    pub fn num_coloured(&self) -> usize {
        self.colours.len()
    }

    /// Whether there's a wall on the `side` of the cell `lookahead` cells in front of the mouse.
    ///
    /// Looking through a wall, or off the edge of the maze, always sees a wall.
    fn sense(&mut self, side: Heading, lookahead: usize) -> Result<bool, MouseError> {
        if self.crashed {
            return Err(MouseError::Crashed);
        }

        self.num_sensor_reads += 1;

        let size = self.layout.size();
        let mut cell = self.pose.cell;

        for _ in 0..lookahead {
            if self.layout.has_wall(cell, self.pose.heading) {
                return Ok(true);
            }
            cell = match size.neighbour(&cell, self.pose.heading) {
                Some(c) => c,
                None => return Ok(true),
            };
        }

        Ok(self.layout.has_wall(cell, side))
    }
}

impl MouseIf for SimMouse {
    fn maze_width(&mut self) -> Result<usize, MouseError> {
        Ok(self.layout.size().width)
    }

    fn maze_height(&mut self) -> Result<usize, MouseError> {
        Ok(self.layout.size().height)
    }

    fn wall_front(&mut self, lookahead: usize) -> Result<bool, MouseError> {
        self.sense(self.pose.heading, lookahead)
    }

    fn wall_left(&mut self, lookahead: usize) -> Result<bool, MouseError> {
        self.sense(self.pose.heading.ccw(), lookahead)
    }

    fn wall_right(&mut self, lookahead: usize) -> Result<bool, MouseError> {
        self.sense(self.pose.heading.cw(), lookahead)
    }

    fn wall_back(&mut self) -> Result<bool, MouseError> {
        self.sense(self.pose.heading.opposite(), 0)
    }

    fn turn_left(&mut self) -> Result<(), MouseError> {
        if self.crashed {
            return Err(MouseError::Crashed);
        }
        self.pose.heading = self.pose.heading.ccw();
        self.num_left_turns += 1;
        Ok(())
    }

    fn turn_right(&mut self) -> Result<(), MouseError> {
        if self.crashed {
            return Err(MouseError::Crashed);
        }
        self.pose.heading = self.pose.heading.cw();
        self.num_right_turns += 1;
        Ok(())
    }

    fn move_forward(&mut self) -> Result<(), MouseError> {
        if self.crashed {
            return Err(MouseError::Crashed);
        }

        let next = if self.layout.has_wall(self.pose.cell, self.pose.heading) {
            None
        } else {
            self.layout.size().neighbour(&self.pose.cell, self.pose.heading)
        };

        match next {
            Some(c) => {
                self.pose.cell = c;
                self.num_moves += 1;
                Ok(())
            }
            None => {
                warn!("Simulated mouse crashed at {}", self.pose);
                self.crashed = true;
                Err(MouseError::Crashed)
            }
        }
    }

    fn set_color(&mut self, x: usize, y: usize, colour: Colour) {
        self.colours.insert(Cell::new(x, y), colour);
    }

    fn set_text(&mut self, x: usize, y: usize, text: &str) {
        self.texts.insert(Cell::new(x, y), text.to_string());
    }

    fn clear_all_color(&mut self) {
        self.colours.clear();
    }

    fn clear_all_text(&mut self) {
        self.texts.clear();
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
