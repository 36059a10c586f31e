//! container types for model values read from files

mod placement;

pub use placement::place_model;

use derive_more::{Deref, From, Into};

#[derive(Deref, From, Into, Clone, PartialEq, Default, Debug)]
/// Flat cell-centered model values in the order they appear in a UBC model file.
///
/// A `ModelArray` is never changed after it is read. A reread produces a new array that
/// replaces the old one wholesale. [`ModelArray::to_grid_order_3d`] and
/// [`ModelArray::to_grid_order_2d`] produce the reordered copy that is attached to a grid.
pub struct ModelArray(Vec<f64>);

impl ModelArray {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// get the values that this type wraps
    pub fn inner(self) -> Vec<f64> {
        self.0
    }
}

/// Models read in a single batch, keyed by the basename of the file they came from.
///
/// Insertion order is kept so that the `n`th model belongs to the `n`th timestep.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct ModelCollection {
    entries: Vec<(String, ModelArray)>,
}

impl ModelCollection {
    pub(crate) fn push(&mut self, name: String, model: ModelArray) {
        self.entries.push((name, model));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// model read from the file with this basename. If two files share a basename
    /// the first one is returned
    pub fn get(&self, name: &str) -> Option<&ModelArray> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, model)| model)
    }

    /// model for the `index`th file
    pub fn by_index(&self, index: usize) -> Option<&ModelArray> {
        self.entries.get(index).map(|(_, model)| model)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelArray)> {
        self.entries.iter().map(|(name, model)| (name.as_str(), model))
    }
}
