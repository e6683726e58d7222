//! Perfect maze generation on rectangular grids.
//!
//! A maze is a [`PassageGrid`]: one [`Passages`] bitmask per cell
//! (LEFT=1, TOP=2, RIGHT=4, BOTTOM=8). A [`Generator`] carves it in place
//! from an injected rng, and the grid renders as rows of two digit values:
//!
//! ```
//! use mazegen::{generate, GeneratorKind, PassageGrid};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut grid = PassageGrid::new(2, 1).unwrap();
//! generate(GeneratorKind::PathMerge, &mut grid, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(grid.to_string(), "04 01 \n");
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod generators;
pub mod grids;

use std::fs::File;
use std::io::{BufWriter, Write};

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use analysis::MazeStats;
pub use config::Config;
pub use error::{MazeError, Result};
pub use generators::{generate, Generator, GeneratorKind};
pub use grids::{Direction, PassageGrid, Passages};

/// Generates the configured maze and writes it to `config.output`.
///
/// The output is opened before anything is generated.
pub fn run(config: &Config) -> Result<MazeStats> {
    let file = File::create(&config.output).map_err(|source| MazeError::OutputUnavailable {
        path: config.output.clone(),
        source,
    })?;

    let mut grid = PassageGrid::new(config.width, config.height)?;

    info!("seed {}", config.seed);
    let mut rng = StdRng::seed_from_u64(config.seed);
    generate(config.algorithm, &mut grid, &mut rng)?;

    if config.check {
        analysis::check_perfect(&grid)?;
    }

    let mut out = BufWriter::new(file);
    grid.write_to(&mut out)?;
    out.flush()?;

    let stats = analysis::stats(&grid);
    info!(
        "wrote {} ({} passages, {} dead ends)",
        config.output.display(),
        stats.passages,
        stats.dead_ends
    );
    Ok(stats)
}
