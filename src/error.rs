//! Error taxonomy for loading, dispatching, and storing heat-production data.
//!
//! Only whole-resource failures surface as [`Error`]. Problems confined to a
//! single line of input are collected as [`RowIssue`]s next to the records
//! that did parse, so one bad row never aborts a load.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal failures of a load, save, or run.
#[derive(Debug, Error)]
pub enum Error {
    /// The unit catalog expected next to a demand file does not exist.
    #[error("unit catalog not found next to the demand file: {}", .0.display())]
    CatalogNotFound(PathBuf),

    /// A resource exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A destination directory or file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV layer rejected a whole resource (not a single row).
    #[error("invalid CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// A single skipped input line and why it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based line number in the source resource.
    pub line: usize,
    pub reason: String,
}

impl RowIssue {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Records parsed from a resource plus the lines that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub issues: Vec<RowIssue>,
}

impl<T> Parsed<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            issues: Vec::new(),
        }
    }
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self::empty()
    }
}
