//! Structural checks on a carved grid.

use std::collections::VecDeque;

use log::debug;

use crate::error::{MazeError, Result};
use crate::grids::{Direction, PassageGrid};

/// Disjoint sets over cell indices, with path halving and union by size.
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    pub fn find(&mut self, mut index: usize) -> usize {
        while self.parent[index] != index {
            self.parent[index] = self.parent[self.parent[index]];
            index = self.parent[index];
        }
        index
    }

    /// Merges the sets of `a` and `b`. Returns `false` if they already shared one.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        true
    }
}

/// Undirected passages, each counted once.
pub fn passage_count(grid: &PassageGrid) -> usize {
    // every passage appears once as a RIGHT or a BOTTOM
    grid.cells()
        .iter()
        .filter(|cell| cell.has(Direction::Right))
        .count()
        + grid
            .cells()
            .iter()
            .filter(|cell| cell.has(Direction::Bottom))
            .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MazeStats {
    pub cells: usize,
    pub passages: usize,
    pub isolated: usize,
    pub dead_ends: usize,
    pub junctions: usize,
}

pub fn stats(grid: &PassageGrid) -> MazeStats {
    let mut stats = MazeStats {
        cells: grid.len(),
        passages: passage_count(grid),
        ..MazeStats::default()
    };
    for cell in grid.cells() {
        match cell.degree() {
            0 => stats.isolated += 1,
            1 => stats.dead_ends += 1,
            2 => {}
            _ => stats.junctions += 1,
        }
    }
    stats
}

/// Cells reachable from `start` through open passages.
pub fn reachable_from(grid: &PassageGrid, start: usize) -> usize {
    let mut seen = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    seen[start] = true;
    queue.push_back(start);

    let mut count = 0;
    while let Some(index) = queue.pop_front() {
        count += 1;
        for (neighbor, direction) in grid.neighborhood_of(index) {
            if grid.is_open(index, direction) && !seen[neighbor] {
                seen[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }
    count
}

/// Succeeds iff passages are symmetric and form a spanning tree of the grid.
pub fn check_perfect(grid: &PassageGrid) -> Result<()> {
    let mut sets = DisjointSet::new(grid.len());

    for index in 0..grid.len() {
        for direction in Direction::ALL {
            if !grid.is_open(index, direction) {
                continue;
            }
            let (x, y) = grid.coordinates_of(index);
            let neighbor = grid.neighbor_of(index, direction).ok_or_else(|| {
                MazeError::NotPerfect(format!(
                    "cell ({}, {}) opens {:?} off the grid",
                    x, y, direction
                ))
            })?;
            if !grid.is_open(neighbor, -direction) {
                return Err(MazeError::NotPerfect(format!(
                    "passage {:?} of cell ({}, {}) is one-sided",
                    direction, x, y
                )));
            }

            // visit each passage from one side only
            if matches!(direction, Direction::Right | Direction::Bottom)
                && !sets.union(index, neighbor)
            {
                return Err(MazeError::NotPerfect(format!(
                    "passage {:?} of cell ({}, {}) closes a cycle",
                    direction, x, y
                )));
            }
        }
    }

    let passages = passage_count(grid);
    if passages != grid.len() - 1 {
        return Err(MazeError::NotPerfect(format!(
            "{} passages for {} cells",
            passages,
            grid.len()
        )));
    }

    let reached = reachable_from(grid, 0);
    if reached != grid.len() {
        return Err(MazeError::NotPerfect(format!(
            "only {} of {} cells are connected",
            reached,
            grid.len()
        )));
    }

    debug!("grid of {} cells is a perfect maze", grid.len());
    Ok(())
}
