//! # Maze Layout
//!
//! Parses and renders mazes in the ASCII format used by micromouse maze archives:
//!
//! ```text
//! +---+---+---+
//! |       |   |
//! +   +---+   +
//! |           |
//! +---+---+---+
//! ```
//!
//! North is at the top, so the last cell row of the text is `y = 0`. Each cell is four characters
//! wide. A `|` on a cell row is a wall between two cells, a `-` on a post row is a wall between
//! two rows. Boundary walls are always present whatever the text says.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    fmt::{self, Display},
    fs,
    path::Path,
};

use crate::auto::{
    loc::{Cell, GridSize, Heading},
    map::{MapError, WallMap},
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of characters per cell on each line.
const CELL_CHARS: usize = 4;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The true walls of a maze.
#[derive(Debug, Clone)]
pub struct MazeLayout {
    walls: WallMap,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Could not read the maze file: {0}")]
    FileLoadError(std::io::Error),

    #[error("The maze text is empty")]
    Empty,

    #[error("The first line of the maze must be a row of posts starting with '+'")]
    NoTopBoundary,

    #[error("Expected an odd number of lines (2 * height + 1), found {0}")]
    InvalidLineCount(usize),

    #[error("The maze must be at least one cell wide")]
    ZeroWidth,

    #[error("Could not record a maze wall: {0}")]
    MapError(MapError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MazeLayout {
    /// A maze with no walls other than its boundary.
    pub fn open(size: GridSize) -> Self {
        Self {
            walls: WallMap::new(size),
        }
    }

    /// Build a layout from an already populated wall map.
    pub fn from_walls(walls: WallMap) -> Self {
        Self { walls }
    }

    /// Load a layout from an ASCII maze file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path).map_err(LayoutError::FileLoadError)?;
        Self::parse(&text)
    }

    /// Parse a layout from ASCII maze text.
    ///
    /// Leading and trailing blank lines are ignored, and short lines are treated as if they were
    /// padded with spaces.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&[u8]> = text
            .lines()
            .map(|l| l.trim_end().as_bytes())
            .skip_while(|l| l.is_empty())
            .collect();

        let num_lines = lines
            .iter()
            .rposition(|l| !l.is_empty())
            .map(|i| i + 1)
            .ok_or(LayoutError::Empty)?;
        let lines = &lines[..num_lines];

        if lines[0].first() != Some(&b'+') {
            return Err(LayoutError::NoTopBoundary);
        }

        if num_lines < 3 || num_lines % 2 == 0 {
            return Err(LayoutError::InvalidLineCount(num_lines));
        }

        let width = (lines[0].len() - 1) / CELL_CHARS;
        if width == 0 {
            return Err(LayoutError::ZeroWidth);
        }
        let height = (num_lines - 1) / 2;
        let size = GridSize::new(width, height);

        let char_at = |line: usize, col: usize| -> u8 { *lines[line].get(col).unwrap_or(&b' ') };

        let mut walls = WallMap::new(size);

        for cell in size.cells() {
            let cell_line = 2 * (height - 1 - cell.y) + 1;
            let col = cell.x * CELL_CHARS;

            // East wall, the boundary is already present
            if cell.x + 1 < width && char_at(cell_line, col + CELL_CHARS) == b'|' {
                walls
                    .record_wall(cell, Heading::East)
                    .map_err(LayoutError::MapError)?;
            }

            // South wall
            if cell.y > 0 && (1..CELL_CHARS).any(|i| char_at(cell_line + 1, col + i) == b'-') {
                walls
                    .record_wall(cell, Heading::South)
                    .map_err(LayoutError::MapError)?;
            }
        }

        Ok(Self { walls })
    }

    pub fn size(&self) -> GridSize {
        self.walls.size()
    }

    /// The true walls of the maze.
    pub fn walls(&self) -> &WallMap {
        &self.walls
    }

    pub fn has_wall(&self, cell: Cell, heading: Heading) -> bool {
        self.walls.has_wall(cell, heading)
    }
}

impl Display for MazeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(&self.walls))
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Render a wall map in the ASCII maze format.
pub fn render(walls: &WallMap) -> String {
    let size = walls.size();
    let mut out = String::new();

    let post_row = |out: &mut String, y: usize, heading: Heading| {
        out.push('+');
        for x in 0..size.width {
            if walls.has_wall(Cell::new(x, y), heading) {
                out.push_str("---+");
            } else {
                out.push_str("   +");
            }
        }
        out.push('\n');
    };

    for y in (0..size.height).rev() {
        post_row(&mut out, y, Heading::North);

        out.push('|');
        for x in 0..size.width {
            if walls.has_wall(Cell::new(x, y), Heading::East) {
                out.push_str("   |");
            } else {
                out.push_str("    ");
            }
        }
        out.push('\n');
    }

    post_row(&mut out, 0, Heading::South);

    out
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const MAZE: &str = "
+---+---+---+
|       |   |
+   +---+   +
|           |
+---+---+---+
";

    #[test]
    fn test_parse() {
        let layout = MazeLayout::parse(MAZE).unwrap();

        assert_eq!(layout.size(), GridSize::new(3, 2));
        assert!(layout.has_wall(Cell::new(1, 1), Heading::East));
        assert!(layout.has_wall(Cell::new(2, 1), Heading::West));
        assert!(layout.has_wall(Cell::new(1, 1), Heading::South));
        assert!(layout.has_wall(Cell::new(1, 0), Heading::North));
        assert!(!layout.has_wall(Cell::new(0, 0), Heading::North));
        assert!(!layout.has_wall(Cell::new(0, 0), Heading::East));
        assert!(!layout.has_wall(Cell::new(2, 0), Heading::North));
        assert_eq!(layout.walls().num_recorded(), 2);
    }

    #[test]
    fn test_render() {
        let layout = MazeLayout::parse(MAZE).unwrap();

        assert_eq!(format!("{}", layout), MAZE.trim_start());
    }

    #[test]
    fn test_short_lines() {
        // Trailing whitespace on cell rows is often stripped by editors
        let layout = MazeLayout::parse("+---+---+\n|\n+---+---+\n").unwrap();

        assert_eq!(layout.size(), GridSize::new(2, 1));
        assert!(!layout.has_wall(Cell::new(0, 0), Heading::East));
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(MazeLayout::parse("\n\n"), Err(LayoutError::Empty)));
        assert!(matches!(
            MazeLayout::parse("|   |\n"),
            Err(LayoutError::NoTopBoundary)
        ));
        assert!(matches!(
            MazeLayout::parse("+---+\n|   |\n"),
            Err(LayoutError::InvalidLineCount(2))
        ));
        assert!(matches!(
            MazeLayout::parse("+\n|\n+\n"),
            Err(LayoutError::ZeroWidth)
        ));
    }
}
