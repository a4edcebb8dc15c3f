//! Errors raised while loading rating data.

use std::io;

use camino::Utf8PathBuf;
use kindred_core::ItemId;
use thiserror::Error;

/// Failure to load a ratings or product file.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened.
    #[error("failed to open {path}")]
    Open {
        /// Path that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A header or record could not be parsed.
    #[error("failed to parse {path} at line {line}")]
    Parse {
        /// Source of the record.
        path: Utf8PathBuf,
        /// One-based line of the offending record; 0 when unknown.
        line: u64,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
    /// A required column is absent from the header.
    #[error("{path} has no `{column}` column")]
    MissingColumn {
        /// Source of the header.
        path: Utf8PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },
    /// A product id field is not an unsigned integer.
    #[error("invalid product id `{value}` in {path} at line {line}")]
    InvalidProductId {
        /// Source of the record.
        path: Utf8PathBuf,
        /// One-based line of the offending record.
        line: u64,
        /// Raw field text.
        value: String,
    },
    /// The product file lists the same id twice.
    #[error("product {item} appears more than once in the catalogue")]
    DuplicateProduct {
        /// Repeated product id.
        item: ItemId,
    },
}

impl DataError {
    pub(crate) fn parse(path: &camino::Utf8Path, source: csv::Error) -> Self {
        let line = source.position().map_or(0, csv::Position::line);
        Self::Parse {
            path: path.to_owned(),
            line,
            source,
        }
    }
}
