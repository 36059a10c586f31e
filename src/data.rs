use crate::mesh::{DecodedMesh, Extent, Mesh2D, Mesh3D};
use crate::traits::CellGrid;

use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq)]
/// Rectilinear grid built from tick coordinates along each axis, with named cell data.
///
/// Grids built from a [`Mesh2D`] get a single unit-thick layer along Y, so they are
/// classified as 2D by [`Dimensionality::of_extent`](crate::Dimensionality::of_extent).
pub struct RectilinearGrid {
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    pub z_ticks: Vec<f64>,
    cell_data: BTreeMap<String, Vec<f64>>,
}

impl RectilinearGrid {
    /// Construct a grid from its tick coordinates
    pub fn new(x_ticks: Vec<f64>, y_ticks: Vec<f64>, z_ticks: Vec<f64>) -> Self {
        Self {
            x_ticks,
            y_ticks,
            z_ticks,
            cell_data: BTreeMap::new(),
        }
    }

    /// names of every cell array on the grid
    pub fn cell_array_names(&self) -> impl Iterator<Item = &str> {
        self.cell_data.keys().map(String::as_str)
    }
}

impl From<&Mesh2D> for RectilinearGrid {
    fn from(mesh: &Mesh2D) -> Self {
        Self::new(mesh.x_ticks(), vec![0.0, 1.0], mesh.z_ticks())
    }
}

impl From<&Mesh3D> for RectilinearGrid {
    fn from(mesh: &Mesh3D) -> Self {
        Self::new(mesh.x.ticks(), mesh.y.ticks(), mesh.z.ticks())
    }
}

impl From<&DecodedMesh> for RectilinearGrid {
    fn from(mesh: &DecodedMesh) -> Self {
        match mesh {
            DecodedMesh::TwoD(mesh) => Self::from(mesh),
            DecodedMesh::ThreeD(mesh) => Self::from(mesh),
        }
    }
}

impl CellGrid for RectilinearGrid {
    fn extent(&self) -> Extent {
        Extent::from_upper(
            self.x_ticks.len().saturating_sub(1),
            self.y_ticks.len().saturating_sub(1),
            self.z_ticks.len().saturating_sub(1),
        )
    }

    fn cell_array(&self, name: &str) -> Option<&[f64]> {
        self.cell_data.get(name).map(Vec::as_slice)
    }

    fn set_cell_array(&mut self, name: &str, values: Vec<f64>) {
        self.cell_data.insert(name.to_string(), values);
    }

    fn remove_cell_array(&mut self, name: &str) -> Option<Vec<f64>> {
        self.cell_data.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{AxisDiscretization, Dimensionality, Run};

    #[test]
    fn grid_from_2d_mesh_is_2d() {
        let mesh = Mesh2D::new(
            AxisDiscretization::new(0.0, vec![Run::new(1.0, 4)]),
            AxisDiscretization::new(0.0, vec![Run::new(2.0, 3)]),
        );

        let grid = RectilinearGrid::from(&mesh);

        assert_eq!(grid.extent(), Extent::new(0, 4, 0, 1, 0, 3));
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(Dimensionality::of_extent(&grid.extent()), Dimensionality::TwoD);
    }

    #[test]
    fn replace_and_remove_cell_arrays() {
        let mut grid = RectilinearGrid::new(vec![0., 1.], vec![0., 1.], vec![0., 1.]);

        grid.set_cell_array("a", vec![1.0]);
        grid.set_cell_array("a", vec![2.0]);
        assert_eq!(grid.cell_array("a"), Some(&[2.0][..]));

        assert_eq!(grid.remove_cell_array("a"), Some(vec![2.0]));
        assert_eq!(grid.cell_array_names().count(), 0);
    }
}
