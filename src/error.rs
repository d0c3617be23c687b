use std::{io, path::PathBuf};
use thiserror::Error;

/// Everything that can abort a conversion. None of these are recoverable;
/// the output file is never left half-written.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no data rows found in input")]
    NoDataFound,

    #[error("unexpected column count ({count}) in line: {line}")]
    ColumnCount { line: String, count: usize },

    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv serialization: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
