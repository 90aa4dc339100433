//! # Mouse Equipment Interface
//!
//! The capability set of the mouse: boolean wall sensors relative to the current heading, unit
//! turn and move actuators, the maze size, and optional display hooks.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Interface to the mouse hardware (or a simulation of it).
///
/// Every call blocks until the equipment has completed it. Sensor `lookahead` is the number of
/// cells ahead of the mouse to query, `0` being the mouse's own cell.
pub trait MouseIf {
    /// Width of the maze in cells, queried once at startup.
    fn maze_width(&mut self) -> Result<usize, MouseError>;

    /// Height of the maze in cells, queried once at startup.
    fn maze_height(&mut self) -> Result<usize, MouseError>;

    fn wall_front(&mut self, lookahead: usize) -> Result<bool, MouseError>;

    fn wall_left(&mut self, lookahead: usize) -> Result<bool, MouseError>;

    fn wall_right(&mut self, lookahead: usize) -> Result<bool, MouseError>;

    fn wall_back(&mut self) -> Result<bool, MouseError>;

    /// Rotate 90 degrees anticlockwise in place.
    fn turn_left(&mut self) -> Result<(), MouseError>;

    /// Rotate 90 degrees clockwise in place.
    fn turn_right(&mut self) -> Result<(), MouseError>;

    /// Move one cell forward.
    fn move_forward(&mut self) -> Result<(), MouseError>;

    // ---- DISPLAY HOOKS ----
    //
    // Cosmetic only, the default implementations do nothing.

    fn set_color(&mut self, _x: usize, _y: usize, _colour: Colour) {}

    fn set_text(&mut self, _x: usize, _y: usize, _text: &str) {}

    fn clear_all_color(&mut self) {}

    fn clear_all_text(&mut self) {}
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors raised by the mouse equipment.
#[derive(Debug, thiserror::Error)]
pub enum MouseError {
    #[error("Could not communicate with the mouse: {0}")]
    Io(std::io::Error),

    #[error("The mouse closed the command stream")]
    Disconnected,

    #[error("Unexpected response to `{0}`: {1:?}")]
    UnexpectedResponse(String, String),

    #[error("The mouse crashed into a wall")]
    Crashed,
}

/// Cell colours available on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colour {
    Black,
    Blue,
    Gray,
    Cyan,
    Green,
    Orange,
    Red,
    White,
    Yellow,
    DarkBlue,
    DarkCyan,
    DarkGray,
    DarkGreen,
    DarkRed,
    DarkYellow,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Colour {
    /// Single character code of the colour in the mms protocol.
    pub fn code(&self) -> char {
        match self {
            Colour::Black => 'k',
            Colour::Blue => 'b',
            Colour::Gray => 'a',
            Colour::Cyan => 'c',
            Colour::Green => 'g',
            Colour::Orange => 'o',
            Colour::Red => 'r',
            Colour::White => 'w',
            Colour::Yellow => 'y',
            Colour::DarkBlue => 'B',
            Colour::DarkCyan => 'C',
            Colour::DarkGray => 'A',
            Colour::DarkGreen => 'G',
            Colour::DarkRed => 'R',
            Colour::DarkYellow => 'Y',
        }
    }
}

impl From<std::io::Error> for MouseError {
    fn from(e: std::io::Error) -> Self {
        MouseError::Io(e)
    }
}
