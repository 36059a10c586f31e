//! Common traits and types that are useful for working with `ubc`
#![allow(unused_imports)]

pub use crate::traits::CellGrid;
pub use crate::{AppenderConfig, ModelAppender, ReaderConfig};
pub use crate::{DecodedMesh, Dimensionality, Extent, MeshHeader, MeshReader};
pub use crate::{Invalidate, ModelArray, ModelCollection, RectilinearGrid};
pub use crate::Error;
