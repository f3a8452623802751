use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractionError {
    #[error("contraction is stuck: {remaining} queued vertices have a finite priority but none is locally minimal")]
    Stuck { remaining: usize },
    #[error("the preprocessor has already been started")]
    AlreadyStarted,
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse {what} in line '{line}'")]
    Parse { what: &'static str, line: String },
    #[error("no {what} found in line '{line}'")]
    MissingValue { what: &'static str, line: String },
    #[error("unsupported graph file extension of '{0}'")]
    UnknownExtension(PathBuf),
    #[error("file ended before all {expected} {what} were read")]
    UnexpectedEof { what: &'static str, expected: usize },
}
