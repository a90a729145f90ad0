#![warn(missing_docs)]

//! Entry point for the `cellgrid-tester` binary.

mod cli;
mod error;
mod map;
mod reorder;
mod report;

use std::{io, path::Path, process};

use cellgrid::GridProfile;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    let env_filter = logging::env_filter_from_spec(&log.spec());
    registry()
        .with(env_filter)
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    match command {
        Commands::Reorder(args) => reorder::run(&args),
        Commands::Map(args) => map::run(&args),
    }
}

/// The profile at `path`, or the default single-panel profile.
fn load_profile(path: Option<&Path>) -> Result<GridProfile> {
    Ok(match path {
        Some(p) => GridProfile::load(p)?,
        None => GridProfile::default(),
    })
}
