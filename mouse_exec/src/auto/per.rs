//! Perception module - converts the mouse's relative wall sensors into walls in the map

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use comms_if::eqpt::{MouseError, MouseIf};
use log::debug;

use crate::auto::{
    loc::{Heading, Pose},
    map::{MapError, WallMap},
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Walls seen around a cell in one sensing pass, indexed by absolute [`Heading::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallReading {
    pub walls: [bool; 4],
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PerError {
    #[error("Could not read the wall sensors: {0}")]
    SensorError(MouseError),

    #[error("Could not record a sensed wall: {0}")]
    MapError(MapError),
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl WallReading {
    /// Query all four relative sensors of the mouse at the given pose.
    pub fn sense<M: MouseIf>(mouse: &mut M, pose: &Pose) -> Result<Self, PerError> {
        let mut walls = [false; 4];

        walls[pose.heading.index()] = mouse.wall_front(0).map_err(PerError::SensorError)?;
        walls[pose.heading.ccw().index()] =
            mouse.wall_left(0).map_err(PerError::SensorError)?;
        walls[pose.heading.cw().index()] = mouse.wall_right(0).map_err(PerError::SensorError)?;
        walls[pose.heading.opposite().index()] =
            mouse.wall_back().map_err(PerError::SensorError)?;

        Ok(Self { walls })
    }

    pub fn has_wall(&self, heading: Heading) -> bool {
        self.walls[heading.index()]
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Sense the walls around the mouse's current cell and record them in the map.
///
/// Returns the number of walls which were not already known.
pub fn sense_walls<M: MouseIf>(
    mouse: &mut M,
    pose: &Pose,
    map: &mut WallMap,
) -> Result<usize, PerError> {
    let reading = WallReading::sense(mouse, pose)?;
    let mut num_new = 0;

    for heading in Heading::ALL.iter() {
        if reading.has_wall(*heading)
            && map
                .record_wall(pose.cell, *heading)
                .map_err(PerError::MapError)?
        {
            debug!("New wall {} of {}", heading, pose.cell);
            num_new += 1;
        }
    }

    Ok(num_new)
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
