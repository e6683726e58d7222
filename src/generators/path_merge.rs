use log::{debug, trace};
use rand::RngCore;

use crate::error::Result;
use crate::generators::{buffer, directions_where, draw_direction, empty_buffer, shuffle, Generator};
use crate::grids::PassageGrid;

/// Randomized path merging.
///
/// Cells are taken as seeds in a shuffled order. From every seed that is still
/// isolated a walk wanders through isolated cells only, then, once it has
/// nowhere new to go, joins the cells connected before it started. The first
/// walk has nothing to join and just stops.
pub struct PathMerge {
    order: Vec<usize>,
    next_seed: usize,
    /// walk that connected each cell, 0 while isolated
    walk_of: Vec<usize>,
    walks: usize,
    /// open branch of the current walk, tip last
    stack: Vec<usize>,
    pub done: bool,
}

impl PathMerge {
    pub fn new(grid: &PassageGrid, rng: &mut dyn RngCore) -> Result<Self> {
        let mut order = buffer(grid.len(), 0)?;
        for (slot, cell) in order.iter_mut().enumerate() {
            *cell = slot;
        }
        shuffle(&mut order, rng);

        Ok(Self {
            order,
            next_seed: 0,
            walk_of: buffer(grid.len(), 0)?,
            walks: 0,
            stack: empty_buffer(grid.len())?,
            done: grid.is_empty(),
        })
    }

    pub fn walks(&self) -> usize {
        self.walks
    }

    fn walk(&mut self, grid: &mut PassageGrid, seed: usize, rng: &mut dyn RngCore) {
        self.walks += 1;
        let walk = self.walks;
        let joins_structure = walk > 1;

        self.walk_of[seed] = walk;
        self.stack.clear();
        self.stack.push(seed);

        while let Some(&current) = self.stack.last() {
            let view: &PassageGrid = grid;
            let free = directions_where(view, current, |neighbor| view.is_isolated(neighbor));

            if let Some(direction) = draw_direction(&free, rng) {
                let next = grid.open_passage(current, direction);
                trace!("walk {} extends {} -> {}", walk, current, next);
                self.walk_of[next] = walk;
                self.stack.push(next);
                continue;
            }

            if !joins_structure {
                trace!("walk {} blocked at {}", walk, current);
                break;
            }

            // blocked: every neighbour is connected, join one that is not ours
            let walk_of = &self.walk_of;
            let joinable = directions_where(grid, current, |neighbor| walk_of[neighbor] != walk);
            if let Some(direction) = draw_direction(&joinable, rng) {
                let target = grid.open_passage(current, direction);
                trace!("walk {} joins {} -> {}", walk, current, target);
                return;
            }

            // dead end surrounded by this walk
            self.stack.pop();
        }

        // the grid is connected, so a later walk meets earlier structure before its stack empties
        debug_assert!(!joins_structure, "walk {} from seed {} never joined", walk, seed);
    }
}

impl Generator for PathMerge {
    fn step_generation(&mut self, grid: &mut PassageGrid, rng: &mut dyn RngCore) {
        let seed = match self.order.get(self.next_seed) {
            Some(&seed) => seed,
            None => {
                self.done = true;
                return;
            }
        };
        self.next_seed += 1;

        if grid.is_isolated(seed) {
            self.walk(grid, seed, rng);
        } else {
            trace!("seed {} already connected", seed);
        }

        if self.next_seed == self.order.len() {
            debug!(
                "path merge done: {} seeds, {} walks",
                self.order.len(),
                self.walks
            );
            self.done = true;
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
