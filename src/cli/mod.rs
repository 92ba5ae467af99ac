//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("gatherctl")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Inspect extracted must-gather snapshots with kubectl-style queries")
            .subcommand(commands::use_cmd::command())
            .subcommand(commands::project::command())
            .subcommand(commands::get::command())
            .subcommand(commands::describe::command())
    }

    /// Run the CLI application
    pub fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("use", sub_matches)) => commands::use_cmd::run(sub_matches),
            Some(("project", sub_matches)) => commands::project::run(sub_matches),
            Some(("get", sub_matches)) => commands::get::run(sub_matches),
            Some(("describe", sub_matches)) => commands::describe::run(sub_matches),
            _ => {
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use crate::config::Config;
    use crate::snapshot::Snapshot;
    use anyhow::Result;
    use gatherctl_resolver::KindResolver;

    /// Open the currently selected snapshot and a resolver wired to it.
    pub fn open_session(config: &Config) -> Result<(Snapshot, KindResolver)> {
        let root = config.snapshot_path()?;
        let snapshot = Snapshot::open(root)?;
        let resolver = KindResolver::for_snapshot(root, Config::user_crd_dir().ok());
        Ok((snapshot, resolver))
    }

    /// The namespace a namespaced query applies to; `None` means all
    /// captured namespaces.
    pub fn effective_namespace(
        matches: &clap::ArgMatches,
        config: &Config,
    ) -> Option<String> {
        if matches.get_flag("all-namespaces") {
            return None;
        }
        matches
            .get_one::<String>("namespace")
            .cloned()
            .or_else(|| config.namespace.clone())
            .or_else(|| Some("default".to_string()))
    }
}
