use log::debug;
use rand::{Rng, RngCore};

use crate::error::Result;
use crate::generators::{buffer, directions_where, draw_direction, Generator};
use crate::grids::PassageGrid;

/// Random walk that opens a passage whenever it steps into an unvisited cell.
pub struct AldousBroder {
    visited: Vec<bool>,
    remaining: usize,
    current_cell: usize,
    pub done: bool,
}

impl AldousBroder {
    pub fn new(grid: &PassageGrid, rng: &mut dyn RngCore) -> Result<Self> {
        let mut visited = buffer(grid.len(), false)?;
        let current_cell = rng.gen_range(0..grid.len());
        visited[current_cell] = true;
        let remaining = grid.len() - 1;

        Ok(Self {
            visited,
            remaining,
            current_cell,
            done: remaining == 0,
        })
    }
}

impl Generator for AldousBroder {
    fn step_generation(&mut self, grid: &mut PassageGrid, rng: &mut dyn RngCore) {
        if self.remaining == 0 {
            self.done = true;
            return;
        }

        let anywhere = directions_where(grid, self.current_cell, |_| true);
        let direction = match draw_direction(&anywhere, rng) {
            Some(direction) => direction,
            None => {
                // only a single cell has no neighbours, and it starts out done
                self.done = true;
                return;
            }
        };

        let neighbor = match grid.neighbor_of(self.current_cell, direction) {
            Some(neighbor) => neighbor,
            None => return,
        };
        if !self.visited[neighbor] {
            grid.open_passage(self.current_cell, direction);
            self.visited[neighbor] = true;
            self.remaining -= 1;
        }
        self.current_cell = neighbor;

        if self.remaining == 0 {
            debug!("aldous-broder visited every cell");
            self.done = true;
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
