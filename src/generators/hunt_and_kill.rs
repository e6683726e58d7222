use log::{debug, trace};
use rand::{Rng, RngCore};

use crate::error::Result;
use crate::generators::{buffer, directions_where, draw_direction, empty_buffer, Generator};
use crate::grids::PassageGrid;

/// Hunt and kill, hunting from a random carved cell instead of scanning rows.
pub struct HuntAndKill {
    current: Option<usize>,
    /// carved cells that may still have unvisited neighbours
    candidates: Vec<usize>,
    visited: Vec<bool>,
    pub done: bool,
}

impl HuntAndKill {
    pub fn new(grid: &PassageGrid, rng: &mut dyn RngCore) -> Result<Self> {
        let mut visited = buffer(grid.len(), false)?;
        let mut candidates = empty_buffer(grid.len())?;
        let start = rng.gen_range(0..grid.len());
        visited[start] = true;
        candidates.push(start);

        Ok(Self {
            current: Some(start),
            candidates,
            visited,
            done: false,
        })
    }

    fn has_unvisited_neighbor(&self, grid: &PassageGrid, index: usize) -> bool {
        grid.neighborhood_of(index)
            .any(|(neighbor, _)| !self.visited[neighbor])
    }
}

impl Generator for HuntAndKill {
    fn step_generation(&mut self, grid: &mut PassageGrid, rng: &mut dyn RngCore) {
        if self.done {
            return;
        }

        if let Some(current) = self.current {
            let visited = &self.visited;
            let unvisited = directions_where(grid, current, |neighbor| !visited[neighbor]);
            if let Some(direction) = draw_direction(&unvisited, rng) {
                let next = grid.open_passage(current, direction);
                self.visited[next] = true;
                self.candidates.push(next);
                self.current = Some(next);
                return;
            }
            trace!("kill ended at {}", current);
            self.current = None;
        }

        while !self.candidates.is_empty() {
            let pick = rng.gen_range(0..self.candidates.len());
            let cell = self.candidates[pick];
            if self.has_unvisited_neighbor(grid, cell) {
                trace!("hunt resumes from {}", cell);
                self.current = Some(cell);
                return;
            }
            self.candidates.swap_remove(pick);
        }

        debug!("hunt and kill done");
        self.done = true;
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
