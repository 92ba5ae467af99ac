//! `use` command: select the must-gather directory to inspect

use crate::config::Config;
use crate::snapshot::Snapshot;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::Path;
use tracing::info;

pub fn command() -> Command {
    Command::new("use")
        .about("Select an extracted must-gather directory")
        .arg(
            clap::Arg::new("path")
                .help("Path to the extracted must-gather root")
                .value_name("PATH")
                .required(true),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let raw = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let expanded = shellexpand::tilde(raw);
    let path = std::fs::canonicalize(Path::new(expanded.as_ref()))?;

    let snapshot = Snapshot::open(&path)?;
    info!(path = %snapshot.root().display(), "selected must-gather");

    let mut config = Config::load()?;
    config.path = Some(snapshot.root().to_path_buf());
    config.save()?;

    println!("Using must-gather: {}", snapshot.root().display());
    Ok(())
}
