//! Command line configuration

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::error::{MazeError, Result};
use crate::generators::GeneratorKind;

pub const DEFAULT_OUTPUT: &str = "maze.txt";

/// Generate a perfect maze and write it as a table of cell passage bitmasks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Maze width in cells
    #[arg(allow_negative_numbers = true)]
    pub width: i64,

    /// Maze height in cells
    #[arg(allow_negative_numbers = true)]
    pub height: i64,

    /// File the maze is written to (created or truncated)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Random seed, taken from the clock when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Generation algorithm
    #[arg(short, long, value_enum, default_value_t = GeneratorKind::PathMerge)]
    pub algorithm: GeneratorKind,

    /// Fail unless the result is a perfect maze
    #[arg(long)]
    pub check: bool,
}

/// Validated run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub output: PathBuf,
    pub seed: u64,
    pub algorithm: GeneratorKind,
    pub check: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let invalid = MazeError::InvalidDimension {
            width: args.width,
            height: args.height,
        };
        if args.width <= 0 || args.height <= 0 {
            return Err(invalid);
        }
        let (width, height) = match (usize::try_from(args.width), usize::try_from(args.height)) {
            (Ok(width), Ok(height)) => (width, height),
            _ => return Err(invalid),
        };

        Ok(Self {
            width,
            height,
            output: args.output,
            seed: args.seed.unwrap_or_else(time_seed),
            algorithm: args.algorithm,
            check: args.check,
        })
    }
}

/// Seconds since the Unix epoch.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
