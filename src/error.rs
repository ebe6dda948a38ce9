// WHY: typed errors for the three failure domains; the binary wraps them in anyhow

use std::path::PathBuf;
use thiserror::Error;

/// Failure to build the rewrite engine from the term dictionary (fatal at startup)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("dictionary term #{index} is empty")]
    EmptyTerm { index: usize },

    #[error("dictionary term '{term}' has an empty replacement")]
    EmptyReplacement { term: String },

    #[error("dictionary term '{term}' is listed more than once")]
    DuplicateTerm { term: String },

    #[error("dictionary term '{term}' must be lowercase")]
    NotLowercase { term: String },

    #[error("replacement '{replacement}' is itself a dictionary term")]
    ReplacementIsTerm { replacement: String },

    #[error("gender option '{option}' is listed more than once")]
    DuplicateGenderOption { option: String },

    #[error("gender option list is empty")]
    NoGenderOptions,

    #[error("failed to compile term pattern: {message}")]
    MatchCompilation { message: String },
}

/// Per-file failure while linting; reported and skipped unless fail-fast is set
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("cannot write fixes to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of the storage layer underneath the branch normalizer
#[derive(Debug, Error)]
pub enum BranchError {
    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error("branch '{0}' already exists")]
    AlreadyExists(String),

    #[error("branch '{0}' does not exist")]
    NotFound(String),
}

/// One branch rename that did not go through; the other rename is unaffected
#[derive(Debug, Error)]
#[error("failed to rename branch '{from}' to '{to}': {source}")]
pub struct BranchRenameError {
    pub from: String,
    pub to: String,
    #[source]
    pub source: BranchError,
}
