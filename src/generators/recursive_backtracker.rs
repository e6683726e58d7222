use log::debug;
use rand::{Rng, RngCore};

use crate::error::Result;
use crate::generators::{buffer, directions_where, draw_direction, empty_buffer, Generator};
use crate::grids::PassageGrid;

/// Depth-first carving from a random cell, backing up at dead ends.
pub struct RecursiveBacktracker {
    stack: Vec<usize>,
    visited: Vec<bool>,
    pub done: bool,
}

impl RecursiveBacktracker {
    pub fn new(grid: &PassageGrid, rng: &mut dyn RngCore) -> Result<Self> {
        let mut visited = buffer(grid.len(), false)?;
        let mut stack = empty_buffer(grid.len())?;
        let start = rng.gen_range(0..grid.len());
        visited[start] = true;
        stack.push(start);

        Ok(Self {
            stack,
            visited,
            done: false,
        })
    }
}

impl Generator for RecursiveBacktracker {
    fn step_generation(&mut self, grid: &mut PassageGrid, rng: &mut dyn RngCore) {
        let current = match self.stack.last() {
            Some(&current) => current,
            None => {
                self.done = true;
                return;
            }
        };

        let visited = &self.visited;
        let unvisited = directions_where(grid, current, |neighbor| !visited[neighbor]);
        match draw_direction(&unvisited, rng) {
            Some(direction) => {
                let next = grid.open_passage(current, direction);
                self.visited[next] = true;
                self.stack.push(next);
            }
            None => {
                self.stack.pop();
            }
        }

        if self.stack.is_empty() {
            debug!("recursive backtracker done");
            self.done = true;
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
