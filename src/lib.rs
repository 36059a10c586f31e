#![doc = include_str!("../README.md")]

pub mod appender;
pub mod array;
mod data;
pub mod mesh;
pub mod parse;
pub mod prelude;
pub mod reader;
pub mod series;
mod traits;
mod utils;
mod write_ubc;

pub use traits::CellGrid;

pub use data::RectilinearGrid;

pub use mesh::{compute_whole_extent, DecodedMesh, Dimensionality, Extent, MeshHeader};
pub use mesh::{AxisDiscretization, Mesh2D, Mesh3D, Run};

pub use array::{ModelArray, ModelCollection};
pub use parse::{read_model, read_models};
pub use parse::{FileKind, FormatError, InconsistentDialect, ModelLengthMismatch, ReadError};
pub use parse::{UnsupportedDialect, COMMENT_MARKER};

pub use appender::{AppenderConfig, ModelAppender, State};
pub use reader::{MeshReader, ReaderConfig};
pub use series::{Invalidate, ModelFileSet, TimestepTable};

pub use write_ubc::{write_mesh_2d, write_mesh_3d, write_model};

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Read(#[from] ReadError),
    #[error("{0}")]
    Format(#[from] FormatError),
    #[error("{0}")]
    UnsupportedDialect(#[from] UnsupportedDialect),
    #[error("{0}")]
    InconsistentDialect(#[from] InconsistentDialect),
    #[error("{0}")]
    ModelLength(#[from] ModelLengthMismatch),
    #[error("no mesh file has been set on the reader")]
    NoMeshFile,
    #[error("An io error occured while writing: `{0}`")]
    Io(#[from] std::io::Error),
}
