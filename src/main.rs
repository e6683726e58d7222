use anyhow::Context;
use clap::Parser;
use log::debug;

use mazegen::config::{Args, Config};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    debug!("{:?}", args);

    let config = Config::from_args(args)?;
    mazegen::run(&config)
        .with_context(|| format!("could not produce {}", config.output.display()))?;

    Ok(())
}
