//! Library error type shared by parsing, config and rendering.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read profile {}: {source}", path.display())]
    Profile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed profile line {line}: {content:?}")]
    Parse { line: usize, content: String },

    #[error("inconsistent statement count for {file}:{start_line}.{start_col} at profile line {line}")]
    InconsistentBlock {
        file: String,
        start_line: u32,
        start_col: u32,
        line: usize,
    },

    #[error("rendering {file}: {source}")]
    Source {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid exclude pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
