//! Resolution and argument-parsing errors

/// Errors surfaced by the resolver and argument parser.
///
/// Both variants are terminal for the query; the calling layer decides exit
/// codes and message formatting.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    /// The alias matched no built-in, cached, or on-disk resource type.
    #[error("resource type \"{0}\" not known")]
    ResourceNotKnown(String),

    /// The token sequence violated the argument grammar.
    #[error("invalid arguments: {0}")]
    InvalidArgumentForm(String),
}
