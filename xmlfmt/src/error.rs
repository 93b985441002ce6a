//! Error types for the formatter

use thiserror::Error;

/// Errors that can occur while formatting XML
///
/// The formatting pass itself cannot fail; only turning the source text into
/// a document tree can.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The supplied text could not be parsed into a document tree
    #[error("Failed to parse XML: {0}")]
    Parse(#[from] xot::ParseError),
}
