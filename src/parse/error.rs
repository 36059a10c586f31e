use crate::mesh::Dimensionality;

use std::fmt;
use std::path::{Path, PathBuf};

/// The kind of file that was being read when an error occured. Used to give
/// some context to a [`FormatError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum FileKind {
    /// a mesh file whose dialect has not been decided yet
    #[display(fmt = "UBC mesh")]
    Mesh,
    #[display(fmt = "UBC 2D mesh")]
    Mesh2D,
    #[display(fmt = "UBC 3D mesh")]
    Mesh3D,
    #[display(fmt = "UBC model")]
    Model,
}

/// A file could not be opened or read
#[derive(Debug, thiserror::Error)]
#[error("could not read `{}`: {source}", .path.display())]
pub struct ReadError {
    path: PathBuf,
    source: std::io::Error,
}

impl ReadError {
    pub(crate) fn new<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// path of the file that could not be read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The contents of a file did not match the grammar of its dialect
#[derive(Debug, thiserror::Error)]
pub struct FormatError {
    path: PathBuf,
    line: Option<usize>,
    kind: FileKind,
    message: String,
}

impl FormatError {
    pub(crate) fn new<P: Into<PathBuf>, M: Into<String>>(
        path: P,
        line: Option<usize>,
        kind: FileKind,
        message: M,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            kind,
            message: message.into(),
        }
    }

    /// 1-based line number in the file where the problem was found, if known
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "malformed {} file `{}` at line {}: {}",
                self.kind,
                self.path.display(),
                line,
                self.message
            ),
            None => write!(
                f,
                "malformed {} file `{}`: {}",
                self.kind,
                self.path.display(),
                self.message
            ),
        }
    }
}

/// The header line of a mesh file matches neither the 2D nor the 3D / OcTree dialect
#[derive(Debug, thiserror::Error)]
#[error("unrecognized mesh header in `{}`: expected 1 or at least 3 integers, found {token_count} tokens", .path.display())]
pub struct UnsupportedDialect {
    path: PathBuf,
    token_count: usize,
}

impl UnsupportedDialect {
    pub(crate) fn new<P: Into<PathBuf>>(path: P, token_count: usize) -> Self {
        Self {
            path: path.into(),
            token_count,
        }
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

/// The dimensionality read from the mesh file disagrees with the shape of the grid
/// the model is being placed on
#[derive(Debug, thiserror::Error, derive_more::Constructor)]
#[error("mesh file describes a {mesh} grid, but the supplied grid is {grid}")]
pub struct InconsistentDialect {
    pub mesh: Dimensionality,
    pub grid: Dimensionality,
}

/// The number of values in a model does not match the number of cells in the grid
#[derive(Debug, thiserror::Error, derive_more::Constructor)]
#[error("model `{name}` holds {model_len} values but the grid has {cell_count} cells")]
pub struct ModelLengthMismatch {
    pub name: String,
    pub model_len: usize,
    pub cell_count: usize,
}
