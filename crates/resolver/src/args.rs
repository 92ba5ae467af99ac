//! kubectl-compatible argument parsing for get/describe style commands

use crate::error::QueryError;
use crate::resolver::KindResolver;
use std::collections::{BTreeMap, BTreeSet};

/// Resource types expanded from the `all` bulk alias.
pub const ALL_RESOURCE_TYPES: &[&str] = &[
    "pods",
    "services",
    "daemonsets",
    "deployments",
    "replicasets",
    "statefulsets",
    "replicationcontrollers",
    "deploymentconfigs",
    "builds",
    "buildconfigs",
    "jobs",
    "cronjobs",
    "routes",
    "ingresses",
];

/// The parsed form of a get/describe argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Requested instance names per canonical `"plural.group"` key. An empty
    /// set means all instances of that kind.
    pub kinds: BTreeMap<String, BTreeSet<String>>,

    /// True when the query spans more than one kind, so output must label
    /// each result with its kind.
    pub show_kind: bool,

    /// True when exactly one `kind/name` pair was requested, so output
    /// should render a single detailed object rather than a list.
    pub single_resource: bool,
}

impl Query {
    fn names_for(&mut self, key: String) -> &mut BTreeSet<String> {
        self.kinds.entry(key).or_default()
    }
}

/// Parse a raw argument list into a [`Query`].
///
/// Grammar, in precedence order: the `all` bulk alias, a comma-separated
/// kind list, a single bare kind, `kind/name` pairs, or one kind followed by
/// bare instance names. Mixing the slash form with other shapes is an error.
/// Kind tokens are resolved through the [`KindResolver`].
pub fn parse(resolver: &KindResolver, args: &[String]) -> Result<Query, QueryError> {
    if args.is_empty() {
        return Err(QueryError::InvalidArgumentForm(
            "at least one resource type is required".to_string(),
        ));
    }

    let mut args: Vec<String> = args.iter().map(|arg| arg.to_lowercase()).collect();
    if args.len() == 1 && args[0] == "all" {
        args = vec![ALL_RESOURCE_TYPES.join(",")];
    }

    let mut query = Query::default();

    if args.len() == 1 && !args[0].contains('/') {
        let token = &args[0];
        if token.contains(',') {
            query.show_kind = true;
            for segment in token.split(',').filter(|s| !s.is_empty()) {
                let identity = resolver.resolve(segment)?;
                query.names_for(identity.key());
            }
        } else {
            let identity = resolver.resolve(token)?;
            query.names_for(identity.key());
        }
    } else if args[0].contains('/') {
        if args.len() == 1 {
            query.single_resource = true;
        }
        for token in &args {
            let (kind_token, name) = split_slash_form(token)?;
            let identity = resolver.resolve(kind_token)?;
            query.names_for(identity.key()).insert(name.to_string());
        }
        if query.kinds.len() > 1 {
            query.show_kind = true;
        }
    } else {
        // One kind followed by bare instance names.
        let identity = resolver.resolve(&args[0])?;
        if args.len() == 2 {
            query.single_resource = true;
        }
        let key = identity.key();
        query.names_for(key.clone());
        for name in &args[1..] {
            if name.contains('/') {
                return Err(mixed_form_error());
            }
            query.names_for(key.clone()).insert(name.clone());
        }
    }

    Ok(query)
}

/// Split a `kind/name` token, requiring exactly one slash.
fn split_slash_form(token: &str) -> Result<(&str, &str), QueryError> {
    match token.split_once('/') {
        Some((kind, name)) if !name.contains('/') => Ok((kind, name)),
        Some(_) => Err(QueryError::InvalidArgumentForm(format!(
            "argument \"{token}\" must be of the form resource/name"
        ))),
        None => Err(mixed_form_error()),
    }
}

fn mixed_form_error() -> QueryError {
    QueryError::InvalidArgumentForm(
        "there is no need to specify a resource type as a separate argument when passing \
         arguments in resource/name form (e.g. 'get resource/<resource_name>' instead of \
         'get resource resource/<resource_name>')"
            .to_string(),
    )
}
