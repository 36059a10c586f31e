//! # Model appender
//!
//! Attaches a time series of UBC model files to a grid the host already built. The host
//! drives it with two calls per frame:
//!
//! 1. [`ModelAppender::request_information`] with the upstream timesteps (possibly empty)
//!    and the grid, which refreshes the timestep table and classifies the grid as 2D or 3D
//! 2. [`ModelAppender::request_data`] with the grid and the requested timestep index, which
//!    rereads the models if stale and places the matching one on the grid
//!
//! [`ModelAppender::produce_for_timestep`] performs both in order.
//!
//! ```no_run
//! use ubc::{AppenderConfig, ModelAppender, RectilinearGrid};
//!
//! let mut appender = ModelAppender::new(AppenderConfig::default().with_time_delta(0.5));
//! appender.add_model_files(["t0.den", "t1.den"]);
//!
//! let mut grid = RectilinearGrid::new(vec![0., 1., 2.], vec![0., 1., 2.], vec![0., 1., 2.]);
//! appender.produce_for_timestep(&[], &mut grid, 1)?;
//! # Ok::<(), ubc::Error>(())
//! ```

use crate::array::{place_model, ModelCollection};
use crate::mesh::Dimensionality;
use crate::parse::{InconsistentDialect, COMMENT_MARKER};
use crate::series::{Invalidate, ModelSeries, TimestepTable};
use crate::traits::CellGrid;
use crate::Error;

use std::path::{Path, PathBuf};

/// Whether the cached models agree with the model file set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// models are loaded and match the file set
    Clean,
    /// the next data request rereads every model file
    Stale,
}

/// Options for a [`ModelAppender`]
#[derive(Debug, Clone, PartialEq)]
pub struct AppenderConfig {
    pub comment_marker: char,
    /// spacing of synthesized timesteps when the host has none
    pub time_delta: f64,
    /// dataset name used once extension based naming is turned off
    pub data_name: String,
}

impl Default for AppenderConfig {
    fn default() -> Self {
        Self {
            comment_marker: COMMENT_MARKER,
            time_delta: 1.0,
            data_name: "Appended Data".to_string(),
        }
    }
}

impl AppenderConfig {
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

/// Places UBC model files, one per timestep, onto a host supplied grid
#[derive(Debug, Clone)]
pub struct ModelAppender {
    config: AppenderConfig,
    series: ModelSeries,
    grid_dimensionality: Option<Dimensionality>,
    mesh_dimensionality: Option<Dimensionality>,
    relabel_pending: bool,
    placed_name: Option<String>,
}

impl Default for ModelAppender {
    fn default() -> Self {
        Self::new(AppenderConfig::default())
    }
}

impl ModelAppender {
    pub fn new(config: AppenderConfig) -> Self {
        let series = ModelSeries::new(config.data_name.clone());

        Self {
            config,
            series,
            grid_dimensionality: None,
            mesh_dimensionality: None,
            relabel_pending: false,
            placed_name: None,
        }
    }

    pub fn config(&self) -> &AppenderConfig {
        &self.config
    }

    pub fn state(&self) -> State {
        if self.series.files.needs_reread() {
            State::Stale
        } else {
            State::Clean
        }
    }

    /// Add a model file as the next timestep. Duplicates are ignored and do not mark the
    /// appender stale. Returns whether the file was added
    pub fn add_model_file<P: Into<PathBuf>>(&mut self, path: P) -> bool {
        self.series.files.add(path)
    }

    /// Add several model files in timestep order. Returns how many were new
    pub fn add_model_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.series.files.extend(paths)
    }

    /// drop every model file and every loaded model
    pub fn clear_models(&mut self) {
        self.series.clear();
    }

    pub fn model_files(&self) -> &[PathBuf] {
        self.series.files.paths()
    }

    /// path of the file for the `index`th timestep
    pub fn model_file(&self, index: usize) -> Option<&Path> {
        self.series.files.path(index)
    }

    pub fn has_models(&self) -> bool {
        !self.series.files.is_empty()
    }

    pub fn set_use_extension_as_name(&mut self, flag: bool) {
        if self.series.files.set_use_extension_as_name(flag) {
            self.modified(Invalidate::NAMING);
        }
    }

    /// set an explicit dataset name, an empty name returns to extension based naming
    pub fn set_data_name(&mut self, name: &str) {
        if self.series.files.set_data_name(name) {
            self.modified(Invalidate::NAMING);
        }
    }

    /// name the next placement will use
    pub fn dataset_name(&self) -> String {
        self.series.files.dataset_name()
    }

    pub fn set_time_delta(&mut self, dt: f64) {
        if self.config.time_delta != dt {
            self.config.time_delta = dt;
            self.series.timesteps.reset();
        }
    }

    /// Dimensionality of the mesh file the grid was built from, when the host knows it.
    /// A grid whose shape disagrees is rejected with [`InconsistentDialect`]
    pub fn set_mesh_dimensionality(&mut self, dimensionality: Option<Dimensionality>) {
        self.mesh_dimensionality = dimensionality;
    }

    /// External invalidation. The appender never parses meshes, so `mesh` only drops the
    /// cached grid classification
    pub fn modified(&mut self, what: Invalidate) {
        if what.models {
            self.series.files.mark_stale();
        }
        if what.naming {
            self.relabel_pending = true;
        }
        if what.mesh {
            self.grid_dimensionality = None;
        }
    }

    /// Whether a naming change is waiting for the next placement.
    ///
    /// The relabel only happens when a model is actually placed. A request for an index
    /// past the loaded models leaves the grid untouched, so the array placed under the
    /// old name stays until an in-range request replaces it.
    pub fn needs_relabel(&self) -> bool {
        self.relabel_pending
    }

    /// time values to register with the host, one per model file
    pub fn timestep_values(&self) -> &[f64] {
        self.series.timesteps.values()
    }

    pub fn timesteps(&self) -> &TimestepTable {
        &self.series.timesteps
    }

    /// grid classification from the last information request
    pub fn grid_dimensionality(&self) -> Option<Dimensionality> {
        self.grid_dimensionality
    }

    pub fn models(&self) -> &ModelCollection {
        self.series.models()
    }

    /// number of full model rereads performed so far
    pub fn model_reads(&self) -> usize {
        self.series.reads()
    }

    /// Refresh the timestep table from `upstream` and classify `grid`.
    pub fn request_information<G: CellGrid>(
        &mut self,
        upstream: &[f64],
        grid: &G,
    ) -> Result<(), Error> {
        let file_count = self.series.files.len();
        self.series
            .timesteps
            .refresh(file_count, upstream, self.config.time_delta);

        let dimensionality = Dimensionality::of_extent(&grid.extent());
        self.check_consistency(dimensionality)?;
        self.grid_dimensionality = Some(dimensionality);

        Ok(())
    }

    /// Reread the models if stale, then place the model for timestep `index` on `grid`.
    ///
    /// An index past the loaded models is not an error: the grid is left untouched and
    /// `Ok(false)` is returned. `Ok(true)` means an array was placed.
    pub fn request_data<G: CellGrid>(&mut self, grid: &mut G, index: usize) -> Result<bool, Error> {
        let dimensionality = match self.grid_dimensionality {
            Some(dimensionality) => dimensionality,
            None => Dimensionality::of_extent(&grid.extent()),
        };
        self.check_consistency(dimensionality)?;

        self.series.ensure_loaded(self.config.comment_marker)?;

        let model = match self.series.model(index) {
            Some(model) => model,
            None => {
                tracing::debug!(
                    "timestep {index} requested but only {} models are loaded",
                    self.series.models().len()
                );
                return Ok(false);
            }
        };

        let name = self.series.files.dataset_name();
        place_model(grid, model, &name)?;

        if let Some(previous) = self.placed_name.replace(name.clone()) {
            if previous != name {
                grid.remove_cell_array(&previous);
            }
        }
        self.relabel_pending = false;

        Ok(true)
    }

    /// [`request_information`](Self::request_information) followed by
    /// [`request_data`](Self::request_data)
    pub fn produce_for_timestep<G: CellGrid>(
        &mut self,
        upstream: &[f64],
        grid: &mut G,
        index: usize,
    ) -> Result<bool, Error> {
        self.request_information(upstream, grid)?;
        self.request_data(grid, index)
    }

    fn check_consistency(&self, grid: Dimensionality) -> Result<(), InconsistentDialect> {
        match self.mesh_dimensionality {
            Some(mesh) if mesh != grid => Err(InconsistentDialect::new(mesh, grid)),
            _ => Ok(()),
        }
    }
}
