use std::{io, path::PathBuf};

use thiserror::Error;

use crate::parser::error::SyntaxError;

/// Everything that can go wrong while loading a configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A reader passed to [`read`](crate::read) failed.
    #[error("failed to read configuration: {0}")]
    Read(#[source] io::Error),
    /// The document is malformed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// An included file failed to load.
    #[error("error in load include: {statement}: {source}")]
    Include {
        /// The directive as written, e.g. `include "db.conf"`.
        statement: String,
        /// The resolved path of the included file.
        path: PathBuf,
        /// Why the included file failed.
        source: Box<Error>,
    },
    /// A key path runs through a value that is not an object.
    #[error("cannot merge into key {key:?}: it holds a {found}, not an object")]
    MergeType {
        /// The dotted path of the conflicting value.
        key: String,
        /// The kind of value found there.
        found: &'static str,
    },
    /// A file includes itself, directly or through other files.
    #[error("include cycle detected at {}", path.display())]
    IncludeCycle {
        /// The file that was already being loaded.
        path: PathBuf,
    },
    /// Includes are nested deeper than [`ParserOptions::max_include_depth`](crate::ParserOptions::max_include_depth).
    #[error("includes nested deeper than {limit} levels at {}", path.display())]
    IncludeDepth {
        /// The configured limit.
        limit: usize,
        /// The file that would exceed it.
        path: PathBuf,
    },
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    /// The error that started an include chain, or `self` if this is not an
    /// [`Error::Include`].
    #[must_use]
    pub fn innermost(&self) -> &Error {
        match self {
            Error::Include { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// The syntax error at the root of this error, looking through include
    /// wrappers.
    #[must_use]
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self.innermost() {
            Error::Syntax(err) => Some(err),
            _ => None,
        }
    }
}
