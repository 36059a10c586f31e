//! moving model values from UBC file order into grid cell order
//!
//! UBC 3D model files list values with depth changing fastest (from the top of the mesh
//! downwards), then easting, then northing. UBC 2D model files list rows of easting values,
//! top row first. Grids store cell data with X fastest, then Y, then Z from the bottom up.

use super::ModelArray;
use crate::mesh::Dimensionality;
use crate::parse::ModelLengthMismatch;
use crate::traits::CellGrid;
use crate::Error;

use ndarray::{s, ArrayView2, ArrayView3};

impl ModelArray {
    /// reorder a 3D model for a grid with `ne * nn * nz` cells
    pub fn to_grid_order_3d(
        &self,
        ne: usize,
        nn: usize,
        nz: usize,
    ) -> Result<Vec<f64>, ModelLengthMismatch> {
        let cell_count = ne * nn * nz;
        let mismatch = || ModelLengthMismatch::new(String::new(), self.len(), cell_count);

        if self.len() != cell_count {
            return Err(mismatch());
        }

        let arr = ArrayView3::from_shape((nn, ne, nz), self.as_slice()).map_err(|_| mismatch())?;

        // (northing, easting, depth) -> (depth, northing, easting), then flip depth so the
        // bottom layer comes first
        let arr = arr.permuted_axes([2, 0, 1]);
        let arr = arr.slice(s![..;-1, .., ..]);

        Ok(arr.iter().copied().collect())
    }

    /// reorder a 2D model for a grid with `nx * nz` cells
    pub fn to_grid_order_2d(&self, nx: usize, nz: usize) -> Result<Vec<f64>, ModelLengthMismatch> {
        let cell_count = nx * nz;
        let mismatch = || ModelLengthMismatch::new(String::new(), self.len(), cell_count);

        if self.len() != cell_count {
            return Err(mismatch());
        }

        let arr = ArrayView2::from_shape((nz, nx), self.as_slice()).map_err(|_| mismatch())?;
        let arr = arr.slice(s![..;-1, ..]);

        Ok(arr.iter().copied().collect())
    }
}

/// Attach `model` to the cell data of `grid` under `name`, replacing any array that
/// already has that name. The grid's own extent decides between the 2D and 3D ordering.
pub fn place_model<G: CellGrid>(grid: &mut G, model: &ModelArray, name: &str) -> Result<(), Error> {
    let extent = grid.extent();

    let values = match Dimensionality::of_extent(&extent) {
        Dimensionality::TwoD => model.to_grid_order_2d(extent.x_cells(), extent.z_cells()),
        Dimensionality::ThreeD => {
            model.to_grid_order_3d(extent.x_cells(), extent.y_cells(), extent.z_cells())
        }
    }
    .map_err(|mut e| {
        e.name = name.to_string();
        e
    })?;

    grid.set_cell_array(name, values);

    Ok(())
}
