//! `describe` command: dump the full manifests of selected resources

use crate::cli::utils;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("describe")
        .about("Show details of a specific resource or group of resources")
        .arg(
            clap::Arg::new("resources")
                .help("Resource to describe (kind name, or kind/name)")
                .value_name("RESOURCE")
                .num_args(1..)
                .required(true),
        )
        .arg(
            clap::Arg::new("namespace")
                .short('n')
                .long("namespace")
                .help("Namespace to query")
                .value_name("NAMESPACE"),
        )
        .arg(
            clap::Arg::new("all-namespaces")
                .short('A')
                .long("all-namespaces")
                .help("Query every namespace captured in the snapshot")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let (snapshot, resolver) = utils::open_session(&config)?;

    let args: Vec<String> = matches
        .get_many::<String>("resources")
        .expect("resources is a required argument")
        .cloned()
        .collect();
    let query = gatherctl_resolver::parse(&resolver, &args)?;
    let namespace = utils::effective_namespace(matches, &config);

    let mut printed = false;
    for (key, names) in &query.kinds {
        let identity = resolver.resolve(key)?;
        for document in snapshot.collect(&identity, namespace.as_deref(), names)? {
            if printed {
                println!("---");
            }
            print!("{}", serde_yaml::to_string(&document)?);
            printed = true;
        }
    }

    if !printed {
        return Err(anyhow!("no matching resources found in the snapshot"));
    }
    Ok(())
}
