//! # Model series
//!
//! A series is an ordered set of model files, one per timestep, together with the name the
//! values are attached under and the table of time values for each file. Both the
//! [`MeshReader`](crate::MeshReader) and the [`ModelAppender`](crate::ModelAppender) keep one.
//!
//! Models are read lazily. Any change to the file set marks the series stale, and the
//! next request rereads every file. A reread is staged: the new models only replace the
//! cached ones once every file has been read, so a failed reread leaves the previous models
//! in place and the series stale.

use crate::array::{ModelArray, ModelCollection};
use crate::parse;
use crate::utils;
use crate::Error;

use std::path::{Path, PathBuf};

/// What an external `modified` signal wants marked stale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invalidate {
    /// mesh geometry needs to be skimmed / decoded again
    pub mesh: bool,
    /// model files need to be read again
    pub models: bool,
    /// cell arrays need to be relabeled with the current dataset name
    pub naming: bool,
}

impl Invalidate {
    pub const ALL: Self = Self {
        mesh: true,
        models: true,
        naming: true,
    };
    pub const MESH: Self = Self {
        mesh: true,
        models: false,
        naming: false,
    };
    pub const MODELS: Self = Self {
        mesh: false,
        models: true,
        naming: false,
    };
    pub const NAMING: Self = Self {
        mesh: false,
        models: false,
        naming: true,
    };
}

/// Ordered unique model file paths plus the dataset naming options
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFileSet {
    files: Vec<PathBuf>,
    use_extension_as_name: bool,
    data_name: String,
    needs_reread: bool,
}

impl ModelFileSet {
    /// an empty set that names its data by file extension, falling back to `data_name`
    pub fn new<S: Into<String>>(data_name: S) -> Self {
        Self {
            files: Vec::new(),
            use_extension_as_name: true,
            data_name: data_name.into(),
            needs_reread: true,
        }
    }

    /// Append a file. Returns `false` (and changes nothing) if the file is already
    /// in the set.
    pub fn add<P: Into<PathBuf>>(&mut self, path: P) -> bool {
        let path = path.into();

        if self.files.contains(&path) {
            tracing::debug!("ignoring duplicate model file `{}`", path.display());
            return false;
        }

        self.files.push(path);
        self.needs_reread = true;
        true
    }

    /// Append every path, skipping duplicates. Returns how many were added
    pub fn extend<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .map(|path| self.add(path))
            .filter(|added| *added)
            .count()
    }

    /// remove every file from the set
    pub fn clear(&mut self) {
        self.files.clear();
        self.needs_reread = true;
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    /// path of the `index`th file
    pub fn path(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn needs_reread(&self) -> bool {
        self.needs_reread
    }

    pub(crate) fn mark_stale(&mut self) {
        self.needs_reread = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.needs_reread = false;
    }

    pub fn use_extension_as_name(&self) -> bool {
        self.use_extension_as_name
    }

    /// Returns `true` if the flag changed
    pub fn set_use_extension_as_name(&mut self, flag: bool) -> bool {
        if self.use_extension_as_name == flag {
            return false;
        }
        self.use_extension_as_name = flag;
        true
    }

    /// Set an explicit dataset name. An empty name switches back to extension based
    /// naming. Returns `true` if the resolved naming changed
    pub fn set_data_name(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return self.set_use_extension_as_name(true);
        }

        let changed = self.data_name != name || self.use_extension_as_name;
        self.data_name = name.to_string();
        self.use_extension_as_name = false;
        changed
    }

    /// The name cell data is attached under: the extension of the first file, or the
    /// explicit name. An empty set always resolves to the explicit name
    pub fn dataset_name(&self) -> String {
        match (self.use_extension_as_name, self.files.first()) {
            (true, Some(first)) => utils::extension_name(first),
            _ => self.data_name.clone(),
        }
    }
}

/// Time values for each model file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimestepTable {
    values: Vec<f64>,
    recorded_len: usize,
    upstream: Vec<f64>,
}

impl TimestepTable {
    /// Bring the table up to date.
    ///
    /// The table is recomputed when the file count grew past the last recorded length or
    /// when the upstream timesteps changed. Upstream times are copied when there are any,
    /// otherwise the `i`th file is placed at `i * dt`. Returns whether a recompute happened.
    pub fn refresh(&mut self, file_count: usize, upstream: &[f64], dt: f64) -> bool {
        let upstream_changed = self.upstream.as_slice() != upstream;

        if !upstream_changed && file_count <= self.recorded_len {
            return false;
        }

        if upstream_changed {
            self.upstream = upstream.to_vec();
        }

        self.values = if self.upstream.is_empty() {
            (0..file_count).map(|i| i as f64 * dt).collect()
        } else {
            self.upstream.clone()
        };
        self.recorded_len = file_count;

        tracing::debug!("timestep table recomputed with {} values", self.values.len());

        true
    }

    /// forget every value, the next refresh recomputes from scratch
    pub fn reset(&mut self) {
        self.values.clear();
        self.recorded_len = 0;
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// the upstream timesteps seen at the last refresh
    pub fn upstream(&self) -> &[f64] {
        &self.upstream
    }

    /// Index of the last timestep at or before `time`. Times before the first timestep map
    /// to index 0
    pub fn index_for_time(&self, time: f64) -> Option<usize> {
        if self.values.is_empty() {
            return None;
        }

        let after = self.values.partition_point(|value| *value <= time);
        Some(after.saturating_sub(1))
    }
}

/// File set, loaded models and timesteps that move together
#[derive(Debug, Clone)]
pub(crate) struct ModelSeries {
    pub(crate) files: ModelFileSet,
    pub(crate) timesteps: TimestepTable,
    models: ModelCollection,
    reads: usize,
}

impl ModelSeries {
    pub(crate) fn new<S: Into<String>>(data_name: S) -> Self {
        Self {
            files: ModelFileSet::new(data_name),
            timesteps: TimestepTable::default(),
            models: ModelCollection::default(),
            reads: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.files.clear();
        self.models = ModelCollection::default();
        self.timesteps.reset();
    }

    /// reread every model file if the series is stale
    pub(crate) fn ensure_loaded(&mut self, marker: char) -> Result<(), Error> {
        if !self.files.needs_reread() {
            return Ok(());
        }

        // stage the whole batch before touching the cache
        let staged = parse::read_models_with_marker(self.files.paths(), marker)?;

        tracing::info!("read {} model files", staged.len());

        self.models = staged;
        self.reads += 1;
        self.files.mark_clean();

        Ok(())
    }

    pub(crate) fn model(&self, index: usize) -> Option<&ModelArray> {
        self.models.by_index(index)
    }

    pub(crate) fn models(&self) -> &ModelCollection {
        &self.models
    }

    /// number of completed full rereads
    pub(crate) fn reads(&self) -> usize {
        self.reads
    }
}
