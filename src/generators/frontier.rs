use log::{debug, trace};
use rand::{Rng, RngCore};

use crate::error::Result;
use crate::generators::{buffer, directions_where, draw_direction, empty_buffer, shuffle, Generator};
use crate::grids::{Direction, PassageGrid};

/// Random flooding in generations.
///
/// Each frontier cell opens a random number of its sides into unvisited
/// cells, which form the next generation. Unvisited neighbours it skipped go
/// to a tank. Once a generation dies out, a tank cell that is still unvisited
/// is joined to one of its visited neighbours and seeds a new one.
pub struct Frontier {
    frontier: Vec<usize>,
    next_frontier: Vec<usize>,
    tank: Vec<usize>,
    in_tank: Vec<bool>,
    visited: Vec<bool>,
    pub done: bool,
}

impl Frontier {
    pub fn new(grid: &PassageGrid, rng: &mut dyn RngCore) -> Result<Self> {
        let mut visited = buffer(grid.len(), false)?;
        let mut frontier = empty_buffer(grid.len())?;
        let start = rng.gen_range(0..grid.len());
        visited[start] = true;
        frontier.push(start);

        Ok(Self {
            frontier,
            next_frontier: empty_buffer(grid.len())?,
            tank: empty_buffer(grid.len())?,
            in_tank: buffer(grid.len(), false)?,
            visited,
            done: false,
        })
    }

    /// Joins one unvisited tank cell to the maze; false once the tank is empty.
    fn drain_tank(&mut self, grid: &mut PassageGrid, rng: &mut dyn RngCore) -> bool {
        while !self.tank.is_empty() {
            let cell = self.tank.swap_remove(rng.gen_range(0..self.tank.len()));
            self.in_tank[cell] = false;
            if self.visited[cell] {
                continue;
            }

            let visited = &self.visited;
            let joinable = directions_where(grid, cell, |neighbor| visited[neighbor]);
            if let Some(direction) = draw_direction(&joinable, rng) {
                let target = grid.open_passage(cell, direction);
                trace!("tank cell {} joins {}", cell, target);
                self.visited[cell] = true;
                self.frontier.push(cell);
                return true;
            }
        }
        false
    }
}

impl Generator for Frontier {
    fn step_generation(&mut self, grid: &mut PassageGrid, rng: &mut dyn RngCore) {
        if self.done {
            return;
        }

        if self.frontier.is_empty() {
            std::mem::swap(&mut self.frontier, &mut self.next_frontier);
        }
        if self.frontier.is_empty() && !self.drain_tank(grid, rng) {
            debug!("frontier done");
            self.done = true;
            return;
        }

        let pick = rng.gen_range(0..self.frontier.len());
        let cell = self.frontier.swap_remove(pick);

        let mut directions = Direction::ALL;
        shuffle(&mut directions, rng);
        let explore = rng.gen_range(0..=directions.len());

        for (i, direction) in directions.iter().enumerate() {
            let neighbor = match grid.neighbor_of(cell, *direction) {
                Some(neighbor) if !self.visited[neighbor] => neighbor,
                _ => continue,
            };
            if i < explore {
                grid.open_passage(cell, *direction);
                self.visited[neighbor] = true;
                self.next_frontier.push(neighbor);
            } else if !self.in_tank[neighbor] {
                self.in_tank[neighbor] = true;
                self.tank.push(neighbor);
            }
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
