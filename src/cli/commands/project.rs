//! `project` command: show or set the default namespace

use crate::config::Config;
use crate::snapshot::Snapshot;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::warn;

pub fn command() -> Command {
    Command::new("project")
        .about("Show or set the default namespace")
        .arg(
            clap::Arg::new("namespace")
                .help("Namespace to use by default")
                .value_name("NAMESPACE"),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = Config::load()?;

    let Some(namespace) = matches.get_one::<String>("namespace") else {
        match &config.namespace {
            Some(current) => println!("Using namespace \"{current}\""),
            None => println!("Using namespace \"default\""),
        }
        return Ok(());
    };

    // Warn when the namespace was not captured, but set it anyway: the user
    // may be about to switch snapshots.
    if let Ok(root) = config.snapshot_path() {
        let snapshot = Snapshot::open(root)?;
        if !snapshot.namespaces()?.iter().any(|ns| ns == namespace) {
            warn!(namespace = %namespace, "namespace not present in the selected must-gather");
        }
    }

    config.namespace = Some(namespace.clone());
    config.save()?;

    println!("Now using namespace \"{namespace}\"");
    Ok(())
}
