//! # Mesh reader
//!
//! Pairs a UBC mesh file with any number of UBC model files. The mesh header is skimmed once
//! and cached until the mesh path changes, so asking for the whole extent repeatedly does
//! not touch the file again. Model files behave as in the
//! [`ModelAppender`](crate::ModelAppender): they are reread lazily, and only when the set
//! of files changed or a reread was requested.
//!
//! ```no_run
//! use ubc::{CellGrid, MeshReader, ReaderConfig};
//!
//! let mut reader = MeshReader::new(ReaderConfig::default());
//! reader.set_mesh_path("mesh.msh");
//! reader.add_model_file("model.den");
//!
//! let extent = reader.whole_extent()?;
//! let grid = reader.produce_for_timestep(0)?;
//! assert_eq!(grid.extent().cell_count(), grid.cell_array("den").unwrap().len());
//! # let _ = extent;
//! # Ok::<(), ubc::Error>(())
//! ```

use crate::array::{place_model, ModelCollection};
use crate::data::RectilinearGrid;
use crate::mesh::{DecodedMesh, Dimensionality, Extent, MeshHeader};
use crate::parse::COMMENT_MARKER;
use crate::series::{Invalidate, ModelSeries};
use crate::Error;

use std::path::{Path, PathBuf};

/// Options for a [`MeshReader`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    pub comment_marker: char,
    /// spacing of the timesteps given to successive model files
    pub time_delta: f64,
    /// dataset name used once extension based naming is turned off
    pub data_name: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            comment_marker: COMMENT_MARKER,
            time_delta: 1.0,
            data_name: "Data".to_string(),
        }
    }
}

impl ReaderConfig {
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    pub fn with_time_delta(mut self, dt: f64) -> Self {
        self.time_delta = dt;
        self
    }

    pub fn with_data_name<S: Into<String>>(mut self, name: S) -> Self {
        self.data_name = name.into();
        self
    }
}

/// Reads a UBC mesh and its model files into populated [`RectilinearGrid`]s
#[derive(Debug, Clone)]
pub struct MeshReader {
    config: ReaderConfig,
    mesh_path: Option<PathBuf>,
    header: Option<MeshHeader>,
    header_reads: usize,
    mesh: Option<DecodedMesh>,
    series: ModelSeries,
}

impl Default for MeshReader {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

impl MeshReader {
    pub fn new(config: ReaderConfig) -> Self {
        let series = ModelSeries::new(config.data_name.clone());

        Self {
            config,
            mesh_path: None,
            header: None,
            header_reads: 0,
            mesh: None,
            series,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Set the mesh file. Changing the path drops the cached header and mesh
    pub fn set_mesh_path<P: Into<PathBuf>>(&mut self, path: P) {
        let path = path.into();

        if self.mesh_path.as_ref() != Some(&path) {
            self.mesh_path = Some(path);
            self.modified(Invalidate::MESH);
        }
    }

    pub fn mesh_path(&self) -> Option<&Path> {
        self.mesh_path.as_deref()
    }

    /// how many times the mesh header has been read from disk
    pub fn header_reads(&self) -> usize {
        self.header_reads
    }

    /// number of full model rereads performed so far
    pub fn model_reads(&self) -> usize {
        self.series.reads()
    }

    /// External invalidation. Naming changes never touch the mesh or the model files
    pub fn modified(&mut self, what: Invalidate) {
        if what.mesh {
            self.header = None;
            self.mesh = None;
        }
        if what.models {
            self.series.files.mark_stale();
        }
    }

    fn require_mesh_path(&self) -> Result<&Path, Error> {
        self.mesh_path.as_deref().ok_or(Error::NoMeshFile)
    }

    /// the mesh header, skimmed from disk only when not cached
    pub fn header(&mut self) -> Result<MeshHeader, Error> {
        if let Some(header) = self.header {
            tracing::debug!("using cached mesh header");
            return Ok(header);
        }

        let path = self.require_mesh_path()?;
        let header = MeshHeader::read(path, self.config.comment_marker)?;

        self.header_reads += 1;
        self.header = Some(header);

        Ok(header)
    }

    /// whole extent of the grid described by the mesh file
    pub fn whole_extent(&mut self) -> Result<Extent, Error> {
        Ok(self.header()?.extent())
    }

    pub fn dimensionality(&mut self) -> Result<Dimensionality, Error> {
        Ok(self.header()?.dimensionality)
    }

    /// full decode of the mesh file, cached like the header
    pub fn read_mesh(&mut self) -> Result<&DecodedMesh, Error> {
        let mesh = match self.mesh.take() {
            Some(mesh) => mesh,
            None => {
                let header = self.header()?;
                let path = self.require_mesh_path()?;
                DecodedMesh::read_with_header(path, self.config.comment_marker, &header)?
            }
        };

        let mesh: &DecodedMesh = self.mesh.insert(mesh);
        Ok(mesh)
    }

    pub fn add_model_file<P: Into<PathBuf>>(&mut self, path: P) -> bool {
        self.series.files.add(path)
    }

    pub fn add_model_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.series.files.extend(paths)
    }

    pub fn clear_models(&mut self) {
        self.series.clear();
    }

    pub fn model_files(&self) -> &[PathBuf] {
        self.series.files.paths()
    }

    pub fn has_models(&self) -> bool {
        !self.series.files.is_empty()
    }

    pub fn set_use_extension_as_name(&mut self, flag: bool) {
        self.series.files.set_use_extension_as_name(flag);
    }

    /// set an explicit dataset name, an empty name returns to extension based naming
    pub fn set_data_name(&mut self, name: &str) {
        self.series.files.set_data_name(name);
    }

    pub fn dataset_name(&self) -> String {
        self.series.files.dataset_name()
    }

    /// one time value per model file, `index * dt`
    pub fn timestep_values(&mut self) -> &[f64] {
        let file_count = self.series.files.len();
        self.series
            .timesteps
            .refresh(file_count, &[], self.config.time_delta);
        self.series.timesteps.values()
    }

    /// every model loaded so far, rereading first if stale
    pub fn models(&mut self) -> Result<&ModelCollection, Error> {
        self.series.ensure_loaded(self.config.comment_marker)?;
        Ok(self.series.models())
    }

    /// Build the grid for the mesh and place the model of timestep `index` on it. A grid
    /// without cell data is returned when there is no model for `index`
    pub fn produce_for_timestep(&mut self, index: usize) -> Result<RectilinearGrid, Error> {
        let mut grid = RectilinearGrid::from(self.read_mesh()?);

        self.series.ensure_loaded(self.config.comment_marker)?;

        if let Some(model) = self.series.model(index) {
            let name = self.series.files.dataset_name();
            place_model(&mut grid, model, &name)?;
        } else {
            tracing::debug!("no model for timestep {index}, returning bare grid");
        }

        Ok(grid)
    }
}
