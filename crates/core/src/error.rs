use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single raw snapshot entry could not be normalized.
///
/// Entry-scoped: the ingestion cycle reports it and moves on to the next entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("entry has neither an id nor a permalink")]
    MissingId,

    #[error("no numeric id in permalink '{0}'")]
    InvalidPermalink(String),

    #[error("title '{0}' does not match '<title> [<version>]'")]
    TitleShape(String),

    #[error("entry has an empty title")]
    EmptyTitle,

    #[error("entry has no creator attribution")]
    MissingCreator,

    #[error("entry could not be decoded: {0}")]
    Undecodable(String),
}

/// Failure to read the curated id allow-list.
#[derive(Error, Debug)]
pub enum AllowListError {
    #[error("cannot read allow-list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("allow-list line {line} is not an integer id: '{value}'")]
    InvalidLine { line: usize, value: String },
}
