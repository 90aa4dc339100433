//! Plans minimum hop paths through a [`WallMap`], using an A* algorithm.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::{BinaryHeap, HashMap};

use log::{debug, trace};

use crate::auto::{loc::Cell, map::WallMap, path::Path};

use super::NavError;

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    /// Number of nodes popped from the frontier by the last call to [`PathPlanner::plan`].
    num_expanded: usize,
}

/// An A* frontier node
#[derive(Debug, Clone, Copy)]
struct Node {
    cell: Cell,

    /// Cost from the start, in moves
    g: usize,

    /// `g` plus the Manhattan distance to the target
    f: usize,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl PathPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes expanded by the last plan.
    pub fn num_expanded(&self) -> usize {
        self.num_expanded
    }

    /// Plans a minimum hop path from `start` to `target` through the known map.
    ///
    /// Unknown walls are assumed absent. Ties between frontier nodes of equal `f` go to the
    /// lexicographically smaller cell, so plans are reproducible.
    pub fn plan(&mut self, map: &WallMap, start: Cell, target: Cell) -> Result<Path, NavError> {
        // Check both start and target are in the map
        if !map.size().contains(&start) {
            return Err(NavError::PointOutsideMap(start));
        }
        if !map.size().contains(&target) {
            return Err(NavError::PointOutsideMap(target));
        }

        self.num_expanded = 0;

        let mut heap = BinaryHeap::new();
        let mut g_score: HashMap<Cell, usize> = HashMap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();

        g_score.insert(start, 0);
        heap.push(Node {
            cell: start,
            g: 0,
            f: start.manhattan(&target),
        });

        let mut target_reached = false;

        while let Some(node) = heap.pop() {
            // Skip entries superseded by a cheaper route to the same cell
            if g_score.get(&node.cell).map_or(false, |g| node.g > *g) {
                continue;
            }

            self.num_expanded += 1;

            if node.cell == target {
                target_reached = true;
                break;
            }

            for (neighbour, _) in map.open_neighbours(node.cell) {
                let tentative_g = node.g + 1;

                if g_score.get(&neighbour).map_or(true, |g| tentative_g < *g) {
                    g_score.insert(neighbour, tentative_g);
                    came_from.insert(neighbour, node.cell);
                    heap.push(Node {
                        cell: neighbour,
                        g: tentative_g,
                        f: tentative_g + neighbour.manhattan(&target),
                    });
                }
            }
        }

        if !target_reached {
            debug!(
                "No path from {} to {} after expanding {} nodes",
                start, target, self.num_expanded
            );
            return Err(NavError::NoPathToTarget(start, target));
        }

        // Walk the back pointers from the target to the start
        let mut cells = Vec::new();
        let mut current = target;
        while current != start {
            cells.push(current);
            current = match came_from.get(&current) {
                Some(c) => *c,
                None => unreachable!("Missing back pointer for {} in A* search", current),
            };
        }
        cells.reverse();

        trace!(
            "Planned {} move path from {} to {}, {} nodes expanded",
            cells.len(),
            start,
            target,
            self.num_expanded
        );

        Path::from_cells(start, cells).map_err(NavError::InvalidPath)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.cell == other.cell
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Note that we flip the order here so that the heap will be a min-heap, not a max-heap
        (other.f, other.cell).cmp(&(self.f, self.cell))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::{
        loc::{GridSize, Heading},
        map::DistanceField,
    };

    #[test]
    fn test_heap_order() {
        let mut heap = BinaryHeap::new();
        heap.push(Node {
            cell: Cell::new(1, 0),
            g: 1,
            f: 4,
        });
        heap.push(Node {
            cell: Cell::new(0, 1),
            g: 1,
            f: 4,
        });
        heap.push(Node {
            cell: Cell::new(0, 0),
            g: 0,
            f: 5,
        });

        assert_eq!(heap.pop().map(|n| n.cell), Some(Cell::new(0, 1)));
        assert_eq!(heap.pop().map(|n| n.cell), Some(Cell::new(1, 0)));
        assert_eq!(heap.pop().map(|n| n.cell), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_open_maze() {
        let map = WallMap::new(GridSize::new(4, 4));
        let mut planner = PathPlanner::new();

        let path = planner.plan(&map, Cell::new(0, 0), Cell::new(2, 2)).unwrap();

        assert_eq!(path.len(), 4);
        assert_eq!(path.start, Cell::new(0, 0));
        assert_eq!(path.target(), Cell::new(2, 2));
        assert!(path.check_open(&map).is_ok());
    }

    #[test]
    fn test_detour() {
        let size = GridSize::new(4, 4);
        let mut map = WallMap::new(size);

        // Wall the x = 1 | x = 2 boundary from y = 0 to y = 2, so the path has to go round
        // through the top row
        for y in 0..3 {
            map.record_wall(Cell::new(1, y), Heading::East).unwrap();
        }

        let mut planner = PathPlanner::new();
        let path = planner.plan(&map, Cell::new(0, 0), Cell::new(2, 2)).unwrap();

        assert_eq!(path.len(), 6);
        assert_eq!(Cell::new(0, 0).manhattan(&Cell::new(2, 2)), 4);
        assert!(path.check_open(&map).is_ok());

        let mut field = DistanceField::new(size);
        field.recompute(&map, &[Cell::new(2, 2)]);
        assert_eq!(field.get(&Cell::new(0, 0)), Some(6));
    }

    #[test]
    fn test_single_wall_no_detour() {
        let size = GridSize::new(4, 4);
        let mut map = WallMap::new(size);
        map.record_wall(Cell::new(1, 0), Heading::North).unwrap();

        let mut planner = PathPlanner::new();
        let path = planner.plan(&map, Cell::new(0, 0), Cell::new(2, 2)).unwrap();

        let mut field = DistanceField::new(size);
        field.recompute(&map, &[Cell::new(2, 2)]);

        assert_eq!(Some(path.len() as u32), field.get(&Cell::new(0, 0)));
        assert!(path.check_open(&map).is_ok());
    }

    #[test]
    fn test_matches_distance_field() {
        let size = GridSize::new(5, 5);
        let mut map = WallMap::new(size);
        let walls = [
            (Cell::new(0, 0), Heading::East),
            (Cell::new(1, 1), Heading::North),
            (Cell::new(2, 2), Heading::West),
            (Cell::new(2, 2), Heading::South),
            (Cell::new(3, 1), Heading::East),
            (Cell::new(3, 3), Heading::North),
            (Cell::new(1, 3), Heading::East),
            (Cell::new(4, 0), Heading::North),
        ];
        for (c, h) in walls.iter() {
            map.record_wall(*c, *h).unwrap();
        }

        let target = Cell::new(2, 2);
        let mut field = DistanceField::new(size);
        field.recompute(&map, &[target]);

        let mut planner = PathPlanner::new();
        for start in size.cells() {
            match field.get(&start) {
                Some(d) => {
                    let path = planner.plan(&map, start, target).unwrap();
                    assert_eq!(path.len() as u32, d, "from {}", start);
                    assert!(path.check_open(&map).is_ok());
                }
                None => assert!(planner.plan(&map, start, target).is_err()),
            }
        }
    }

    #[test]
    fn test_no_path() {
        let mut map = WallMap::new(GridSize::new(3, 1));
        map.record_wall(Cell::new(1, 0), Heading::East).unwrap();

        let mut planner = PathPlanner::new();

        assert!(matches!(
            planner.plan(&map, Cell::new(0, 0), Cell::new(2, 0)),
            Err(NavError::NoPathToTarget(_, _))
        ));
        assert!(matches!(
            planner.plan(&map, Cell::new(0, 0), Cell::new(3, 0)),
            Err(NavError::PointOutsideMap(_))
        ));

        // Same start and target is an empty path
        let path = planner.plan(&map, Cell::new(1, 0), Cell::new(1, 0)).unwrap();
        assert!(path.is_empty());
    }
}
