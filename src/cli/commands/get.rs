//! `get` command: list or dump resources from the selected must-gather

use crate::cli::utils;
use crate::config::Config;
use crate::snapshot::document_name;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use gatherctl_resolver::Query;
use serde_yaml::Value;

pub fn command() -> Command {
    Command::new("get")
        .about("Display one or many resources")
        .arg(
            clap::Arg::new("resources")
                .help("Resource types and names (e.g. pods, pods/foo, pods foo bar)")
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
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output format")
                .value_parser(["name", "yaml", "json"]),
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

    // One (identity, documents) batch per requested kind, in key order.
    let mut batches = Vec::new();
    for (key, names) in &query.kinds {
        let identity = resolver.resolve(key)?;
        let documents = snapshot.collect(&identity, namespace.as_deref(), names)?;
        batches.push((identity, documents));
    }

    match matches.get_one::<String>("output").map(String::as_str) {
        Some("name") => {
            for (identity, documents) in &batches {
                for document in documents {
                    let name = document_name(document).unwrap_or("<unknown>");
                    println!("{}/{}", identity.plural, name);
                }
            }
        }
        Some("yaml") => print_yaml(&batches)?,
        Some("json") => print_json(&batches)?,
        None => {
            if query.single_resource {
                // A single kind/name pair renders as one detailed object.
                print_yaml(&batches)?;
            } else {
                print_names(&query, &batches);
            }
        }
        Some(other) => return Err(anyhow!("unsupported output format: {other}")),
    }

    Ok(())
}

fn print_names(query: &Query, batches: &[(gatherctl_resolver::ResourceIdentity, Vec<Value>)]) {
    let mut found = false;
    for (identity, documents) in batches {
        for document in documents {
            let name = document_name(document).unwrap_or("<unknown>");
            if query.show_kind {
                println!("{}/{}", identity.plural, name);
            } else {
                println!("{name}");
            }
            found = true;
        }
    }
    if !found {
        eprintln!("No resources found.");
    }
}

fn print_yaml(batches: &[(gatherctl_resolver::ResourceIdentity, Vec<Value>)]) -> Result<()> {
    let mut first = true;
    for (_, documents) in batches {
        for document in documents {
            if !first {
                println!("---");
            }
            print!("{}", serde_yaml::to_string(document)?);
            first = false;
        }
    }
    Ok(())
}

fn print_json(batches: &[(gatherctl_resolver::ResourceIdentity, Vec<Value>)]) -> Result<()> {
    let documents: Vec<&Value> = batches
        .iter()
        .flat_map(|(_, documents)| documents.iter())
        .collect();
    if documents.len() == 1 {
        println!("{}", serde_json::to_string_pretty(documents[0])?);
    } else {
        println!("{}", serde_json::to_string_pretty(&documents)?);
    }
    Ok(())
}
