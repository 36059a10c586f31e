//! # Traits
//!
//! The engine does not own the grid objects it fills. Hosts hand in anything implementing
//! [`CellGrid`], and the placement routines attach model values to it as named cell arrays.
//! [`RectilinearGrid`](crate::RectilinearGrid) is the built in implementation.

use crate::mesh::Extent;

/// A structured grid that can carry named per-cell float arrays.
///
/// Placement never changes the topology of the grid, only its cell data.
///
/// ```
/// use ubc::{CellGrid, Extent, RectilinearGrid};
///
/// let mut grid = RectilinearGrid::new(vec![0., 1., 2.], vec![0., 1.], vec![0., 5.]);
/// assert_eq!(grid.extent(), Extent::new(0, 2, 0, 1, 0, 1));
///
/// grid.set_cell_array("den", vec![1.5, 2.5]);
/// assert_eq!(grid.cell_array("den"), Some(&[1.5, 2.5][..]));
/// ```
pub trait CellGrid {
    /// current cell extent of the grid
    fn extent(&self) -> Extent;

    /// total number of cells
    fn cell_count(&self) -> usize {
        self.extent().cell_count()
    }

    /// the cell array stored under `name`, if any
    fn cell_array(&self, name: &str) -> Option<&[f64]>;

    /// attach `values` under `name`, replacing an existing array with the same name
    fn set_cell_array(&mut self, name: &str, values: Vec<f64>);

    /// remove the array stored under `name`, returning it
    fn remove_cell_array(&mut self, name: &str) -> Option<Vec<f64>>;
}
