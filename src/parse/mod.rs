//! reading and parsing UBC text files
//!
//! The mesh dialects are decoded in [mesh](`crate::mesh`). This module holds the shared
//! tokenizer, the error types and the model value reader.

mod error;
mod model;
pub mod tokenize;

pub use error::{FileKind, FormatError, InconsistentDialect, ModelLengthMismatch, ReadError};
pub use error::UnsupportedDialect;
pub use model::{read_model, read_model_with_marker, read_models, read_models_with_marker};
pub use tokenize::{Line, COMMENT_MARKER};

use std::path::Path;
use std::str::FromStr;

/// parse a single token, reporting the line it came from on failure
pub(crate) fn parse_token<T: FromStr>(
    path: &Path,
    line: &Line,
    token: &str,
    kind: FileKind,
    what: &str,
) -> Result<T, FormatError> {
    token.parse().map_err(|_| {
        FormatError::new(
            path,
            Some(line.number),
            kind,
            format!("could not parse `{token}` as {what}"),
        )
    })
}
