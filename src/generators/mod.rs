pub mod aldous_broder;
pub mod frontier;
pub mod hunt_and_kill;
pub mod path_merge;
pub mod recursive_backtracker;

use log::info;
use rand::{Rng, RngCore};

use crate::error::{MazeError, Result};
use crate::grids::{Direction, PassageGrid};
use aldous_broder::AldousBroder;
use frontier::Frontier;
use hunt_and_kill::HuntAndKill;
use path_merge::PathMerge;
use recursive_backtracker::RecursiveBacktracker;

/// A maze carving algorithm working in place on a [`PassageGrid`].
///
/// Randomness is always passed in, so a seeded rng reproduces the same maze.
pub trait Generator {
    /// Performs one unit of work. Does nothing once [`Generator::is_done`].
    fn step_generation(&mut self, grid: &mut PassageGrid, rng: &mut dyn RngCore);

    fn is_done(&self) -> bool;

    fn generate_maze(&mut self, grid: &mut PassageGrid, rng: &mut dyn RngCore) {
        while !self.is_done() {
            self.step_generation(grid, rng);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GeneratorKind {
    #[default]
    PathMerge,
    RecursiveBacktracker,
    HuntAndKill,
    AldousBroder,
    Frontier,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::PathMerge,
        GeneratorKind::RecursiveBacktracker,
        GeneratorKind::HuntAndKill,
        GeneratorKind::AldousBroder,
        GeneratorKind::Frontier,
    ];
}

/// Builds the generator and its working buffers, failing if they cannot be allocated.
pub fn new_generator(
    kind: GeneratorKind,
    grid: &PassageGrid,
    rng: &mut dyn RngCore,
) -> Result<Box<dyn Generator>> {
    let generator: Box<dyn Generator> = match kind {
        GeneratorKind::PathMerge => Box::new(PathMerge::new(grid, rng)?),
        GeneratorKind::RecursiveBacktracker => Box::new(RecursiveBacktracker::new(grid, rng)?),
        GeneratorKind::HuntAndKill => Box::new(HuntAndKill::new(grid, rng)?),
        GeneratorKind::AldousBroder => Box::new(AldousBroder::new(grid, rng)?),
        GeneratorKind::Frontier => Box::new(Frontier::new(grid, rng)?),
    };
    Ok(generator)
}

/// Carves a complete maze into `grid` with the chosen algorithm.
///
/// Only setup can fail; once the buffers exist generation always completes.
pub fn generate(kind: GeneratorKind, grid: &mut PassageGrid, rng: &mut dyn RngCore) -> Result<()> {
    info!(
        "generating {}x{} maze with {:?}",
        grid.width(),
        grid.height(),
        kind
    );
    let mut generator = new_generator(kind, grid, rng)?;
    generator.generate_maze(grid, rng);
    Ok(())
}

/// A `len` element buffer filled with `value`, or `AllocationFailure`.
pub(crate) fn buffer<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut items = empty_buffer(len)?;
    items.resize(len, value);
    Ok(items)
}

/// An empty buffer that can hold `capacity` items without reallocating.
pub(crate) fn empty_buffer<T>(capacity: usize) -> Result<Vec<T>> {
    let mut items = Vec::new();
    items
        .try_reserve_exact(capacity)
        .map_err(|_| MazeError::AllocationFailure { cells: capacity })?;
    Ok(items)
}

/// Uniformly picks one of the `Some` slots, scanning them in [`Direction::ALL`] order.
///
/// Each available direction is equally likely, whatever the number of empty slots.
pub fn draw_direction(
    available: &[Option<Direction>; 4],
    rng: &mut dyn RngCore,
) -> Option<Direction> {
    let count = available.iter().flatten().count();
    if count == 0 {
        return None;
    }

    let drawn = rng.gen_range(0..count);
    available.iter().flatten().nth(drawn).copied()
}

/// In-place Fisher-Yates, backward pass.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RngCore) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Slots of the in-bounds directions whose neighbour passes `accept`.
pub(crate) fn directions_where<F>(
    grid: &PassageGrid,
    index: usize,
    mut accept: F,
) -> [Option<Direction>; 4]
where
    F: FnMut(usize) -> bool,
{
    let mut slots = [None; 4];
    for (neighbor, direction) in grid.neighborhood_of(index) {
        if accept(neighbor) {
            slots[direction.slot()] = Some(direction);
        }
    }
    slots
}
