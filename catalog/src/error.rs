//! Error types for catalog loading.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or validating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A catalog file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A catalog document is not valid JSON for its record type.
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },

    /// Two records of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: RecordKind, id: String },

    /// A required text field is blank.
    #[error("{kind} {id:?} has an empty {field}")]
    EmptyField {
        kind: RecordKind,
        id: String,
        field: &'static str,
    },
}

/// Which record collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Competency,
    Job,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Competency => f.write_str("competency"),
            Self::Job => f.write_str("job"),
        }
    }
}
