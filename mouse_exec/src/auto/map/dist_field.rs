//! # Distance Field
//!
//! A multi-source breadth-first flood fill over the open edges of a [`WallMap`]. The field holds,
//! for every cell, the hop count to the nearest source cell under the map as it was when the
//! field was last computed.
//!
//! The field is never patched in place. New walls make it stale, which is detected lazily by a
//! local consistency check at the cell the mouse is about to leave, and fixed by a full
//! recompute from the same sources.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::VecDeque;

use log::{debug, warn};
use serde::Serialize;

use super::WallMap;
use crate::auto::loc::{Cell, GridSize, Heading};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Distance of a cell which can't be reached from any source.
pub const UNREACHABLE: u32 = u32::MAX;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DistanceField {
    size: GridSize,

    /// Hop count of each cell, row-major
    dists: Vec<u32>,

    /// Cells the field was last computed from
    sources: Vec<Cell>,

    /// Number of times the field has been (re)computed
    num_computes: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DistanceField {
    /// Create an empty field in which every cell is unreachable.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            dists: vec![UNREACHABLE; size.num_cells()],
            sources: Vec::new(),
            num_computes: 0,
        }
    }

    /// Recompute the whole field from the given sources.
    ///
    /// Sources outside the maze are ignored.
    pub fn recompute(&mut self, map: &WallMap, sources: &[Cell]) {
        self.sources = sources
            .iter()
            .copied()
            .filter(|s| {
                let inside = self.size.contains(s);
                if !inside {
                    warn!("Ignoring distance field source {} outside the maze", s);
                }
                inside
            })
            .collect();

        self.flood(map);
    }

    /// Recompute the whole field from the current sources.
    pub fn refresh(&mut self, map: &WallMap) {
        self.flood(map);
    }

    fn flood(&mut self, map: &WallMap) {
        debug_assert_eq!(map.size(), self.size);

        for d in self.dists.iter_mut() {
            *d = UNREACHABLE;
        }

        let mut queue = VecDeque::with_capacity(self.size.num_cells());

        for source in self.sources.iter() {
            if let Some(idx) = self.size.index(source) {
                self.dists[idx] = 0;
                queue.push_back(*source);
            }
        }

        while let Some(cell) = queue.pop_front() {
            let next_dist = self.raw(&cell).saturating_add(1);

            for (neighbour, _) in map.open_neighbours(cell) {
                if let Some(idx) = self.size.index(&neighbour) {
                    if self.dists[idx] > next_dist {
                        self.dists[idx] = next_dist;
                        queue.push_back(neighbour);
                    }
                }
            }
        }

        self.num_computes += 1;
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn sources(&self) -> &[Cell] {
        &self.sources
    }

    pub fn is_source(&self, cell: &Cell) -> bool {
        self.sources.contains(cell)
    }

    /// Number of times the field has been computed, including the first.
    pub fn num_computes(&self) -> usize {
        self.num_computes
    }

    /// Distance of the cell, `None` if it's unreachable or outside the maze.
    pub fn get(&self, cell: &Cell) -> Option<u32> {
        match self.raw(cell) {
            UNREACHABLE => None,
            d => Some(d),
        }
    }

    /// Distance of the cell, [`UNREACHABLE`] if it's unreachable or outside the maze.
    pub fn raw(&self, cell: &Cell) -> u32 {
        self.size
            .index(cell)
            .map(|i| self.dists[i])
            .unwrap_or(UNREACHABLE)
    }

    /// Check that the distance at `cell` agrees with its open neighbours under `map`.
    ///
    /// A non-source cell is consistent when its distance is one more than the smallest distance
    /// among its open neighbours (unreachable stays unreachable). Source cells are always
    /// consistent.
    pub fn is_consistent(&self, map: &WallMap, cell: &Cell) -> bool {
        if self.is_source(cell) {
            return true;
        }

        let expected = map
            .open_neighbours(*cell)
            .map(|(n, _)| self.raw(&n))
            .min()
            .unwrap_or(UNREACHABLE)
            .saturating_add(1);

        self.raw(cell) == expected
    }

    /// Recompute the field if it's inconsistent at `cell`.
    ///
    /// Returns `true` if a recompute happened.
    pub fn ensure_consistent(&mut self, map: &WallMap, cell: &Cell) -> bool {
        if self.is_consistent(map, cell) {
            return false;
        }

        debug!(
            "Distance field inconsistent at {} (distance {}), reflooding",
            cell,
            self.raw(cell)
        );
        self.refresh(map);

        true
    }

    /// Greedy descent step: the open neighbour of `cell` with the strictly smallest distance
    /// below that of `cell`, ties going to the first heading in priority order.
    ///
    /// Returns `None` if no open neighbour is closer to the sources.
    pub fn descend(&self, map: &WallMap, cell: &Cell) -> Option<(Cell, Heading)> {
        let mut best: Option<(Cell, Heading)> = None;
        let mut best_dist = self.raw(cell);

        for (neighbour, heading) in map.open_neighbours(*cell) {
            let d = self.raw(&neighbour);
            if d < best_dist {
                best_dist = d;
                best = Some((neighbour, heading));
            }
        }

        best
    }

    /// Iterate over every reachable cell and its distance, row-major.
    pub fn iter_reachable(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.size
            .cells()
            .filter_map(move |c| self.get(&c).map(|d| (c, d)))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    /// Reference shortest hop counts by plain BFS from each source separately.
    fn brute_force(map: &WallMap, sources: &[Cell]) -> HashMap<Cell, u32> {
        let mut best = HashMap::new();

        for source in sources {
            let mut seen = HashMap::new();
            let mut queue = VecDeque::new();
            seen.insert(*source, 0u32);
            queue.push_back(*source);

            while let Some(c) = queue.pop_front() {
                let d = seen[&c];
                for h in Heading::ALL.iter() {
                    if let Some(n) = map.open_neighbour(c, *h) {
                        if !seen.contains_key(&n) {
                            seen.insert(n, d + 1);
                            queue.push_back(n);
                        }
                    }
                }
            }

            for (c, d) in seen {
                let e = best.entry(c).or_insert(d);
                if d < *e {
                    *e = d;
                }
            }
        }

        best
    }

    /// Deterministic pseudo-random wall sets for property checks.
    fn random_map(size: GridSize, seed: u64, num_walls: usize) -> WallMap {
        let mut state = seed;
        let mut next = || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as usize
        };

        let mut map = WallMap::new(size);
        for _ in 0..num_walls {
            let cell = Cell::new(next() % size.width, next() % size.height);
            let heading = Heading::from_index(next());
            map.record_wall(cell, heading).unwrap();
        }
        map
    }

    #[test]
    fn test_open_maze() {
        let size = GridSize::new(4, 4);
        let map = WallMap::new(size);
        let mut field = DistanceField::new(size);

        field.recompute(&map, &[Cell::new(2, 2)]);

        assert_eq!(field.get(&Cell::new(0, 0)), Some(4));
        assert_eq!(field.get(&Cell::new(2, 2)), Some(0));
        assert_eq!(field.get(&Cell::new(3, 3)), Some(2));
        assert_eq!(field.get(&Cell::new(4, 0)), None);
        assert_eq!(field.num_computes(), 1);
    }

    #[test]
    fn test_matches_brute_force() {
        let size = GridSize::new(4, 4);
        let source_sets = [
            vec![Cell::new(0, 0)],
            vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(2, 1), Cell::new(2, 2)],
            vec![Cell::new(3, 0), Cell::new(0, 3)],
        ];

        for seed in 0..40u64 {
            let map = random_map(size, seed, (seed as usize % 14) + 2);

            for sources in source_sets.iter() {
                let mut field = DistanceField::new(size);
                field.recompute(&map, sources);
                let expected = brute_force(&map, sources);

                for cell in size.cells() {
                    assert_eq!(
                        field.get(&cell),
                        expected.get(&cell).copied(),
                        "seed {} cell {}",
                        seed,
                        cell
                    );
                }
            }
        }
    }

    #[test]
    fn test_recompute_idempotent() {
        let size = GridSize::new(5, 5);
        let map = random_map(size, 7, 12);
        let mut field = DistanceField::new(size);

        field.recompute(&map, &[Cell::new(2, 2)]);
        let first = field.dists.clone();
        field.recompute(&map, &[Cell::new(2, 2)]);

        assert_eq!(first, field.dists);
        assert_eq!(field.num_computes(), 2);
    }

    #[test]
    fn test_unreachable_region() {
        let size = GridSize::new(3, 3);
        let mut map = WallMap::new(size);
        // Box in the north-east corner cell
        map.record_wall(Cell::new(2, 2), Heading::West).unwrap();
        map.record_wall(Cell::new(2, 2), Heading::South).unwrap();

        let mut field = DistanceField::new(size);
        field.recompute(&map, &[Cell::new(0, 0)]);

        assert_eq!(field.get(&Cell::new(2, 2)), None);
        assert_eq!(field.raw(&Cell::new(2, 2)), UNREACHABLE);
        assert_eq!(field.get(&Cell::new(2, 1)), Some(3));
        assert_eq!(field.iter_reachable().count(), 8);

        // An unreachable cell whose neighbours are all unreachable is consistent, and can't
        // descend
        assert!(field.is_consistent(&map, &Cell::new(2, 2)));
        assert_eq!(field.descend(&map, &Cell::new(2, 2)), None);
    }

    #[test]
    fn test_ignores_outside_sources() {
        let size = GridSize::new(2, 2);
        let map = WallMap::new(size);
        let mut field = DistanceField::new(size);

        field.recompute(&map, &[Cell::new(5, 5), Cell::new(1, 1)]);

        assert_eq!(field.sources(), &[Cell::new(1, 1)]);
        assert_eq!(field.get(&Cell::new(0, 0)), Some(2));
    }

    #[test]
    fn test_lazy_invalidation() {
        let size = GridSize::new(4, 1);
        let mut map = WallMap::new(size);
        let mut field = DistanceField::new(size);
        field.recompute(&map, &[Cell::new(3, 0)]);

        let here = Cell::new(1, 0);
        assert_eq!(field.get(&here), Some(2));
        assert!(field.is_consistent(&map, &here));
        assert!(!field.ensure_consistent(&map, &here));
        assert_eq!(field.num_computes(), 1);

        // A wall between here and the goal side makes the field stale at this cell
        map.record_wall(here, Heading::East).unwrap();
        assert!(!field.is_consistent(&map, &here));
        assert!(field.ensure_consistent(&map, &here));
        assert_eq!(field.num_computes(), 2);

        // The corridor is now cut in two
        assert_eq!(field.get(&here), None);
        assert_eq!(field.get(&Cell::new(2, 0)), Some(1));
        assert!(field.is_consistent(&map, &here));

        // Sources are always consistent
        assert!(field.is_consistent(&map, &Cell::new(3, 0)));
    }

    #[test]
    fn test_descend() {
        let size = GridSize::new(3, 3);
        let map = WallMap::new(size);
        let mut field = DistanceField::new(size);
        field.recompute(&map, &[Cell::new(2, 2)]);

        // From the origin both North and East lead closer, North wins the tie
        assert_eq!(
            field.descend(&map, &Cell::new(0, 0)),
            Some((Cell::new(0, 1), Heading::North))
        );
        assert_eq!(field.descend(&map, &Cell::new(2, 2)), None);
    }

    #[test]
    fn test_greedy_descent_terminates() {
        let size = GridSize::new(5, 5);

        for seed in 0..20u64 {
            let map = random_map(size, seed * 31 + 5, 15);
            let mut field = DistanceField::new(size);
            field.recompute(&map, &[Cell::new(2, 2)]);

            for start in size.cells() {
                let start_dist = match field.get(&start) {
                    Some(d) => d,
                    None => continue,
                };

                let mut cell = start;
                let mut steps = 0;
                while let Some((next, _)) = field.descend(&map, &cell) {
                    cell = next;
                    steps += 1;
                }

                assert!(field.is_source(&cell));
                assert_eq!(steps, start_dist);
            }
        }
    }
}
