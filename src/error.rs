use std::path::PathBuf;

use thiserror::Error;

use crate::words::WordCategory;

/// Errors raised while compiling a pattern or checking it against a word bank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("unknown token [{token}] at byte offset {offset}")]
    UnknownToken { token: String, offset: usize },

    #[error("word list for {0} is empty")]
    EmptyWordList(WordCategory),
}

/// Errors raised while assembling a hasher from user-supplied configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("-s must not be set when piping to hhash")]
    ConflictingInput,

    #[error("failed to read word list {path:?}: {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load options from {path:?}: {source}")]
    Options {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
