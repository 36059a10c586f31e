//! # Mesh Information
//!
//! UBC meshes come in two dialects. The 2D dialect describes the X and Z axes as runs of
//! equal width cells and has no up-front cell total. The 3D dialect (shared by OcTree files)
//! starts with a line holding the cell counts along each axis.
//!
//! A [`MeshHeader`] is the minimum information needed before a full decode: which dialect
//! the file is written in, and how many cells the grid will have. It is what the host
//! needs to allocate a grid, and it is cheap to get for 3D files since only the first line
//! is read. [`Mesh2D`] and [`Mesh3D`] are the full decodes, holding an
//! [`AxisDiscretization`] per axis from which tick coordinates are generated.
//!
//! ## Extents
//!
//! An [`Extent`] carries the min/max index per axis. For 3D meshes the upper bounds are the
//! cell counts from the header. For 2D meshes the upper bounds are the number of tick
//! coordinates along each axis (cell count + 1), and the Y axis is always `0 1`.

mod dim_2;
mod dim_3;

pub use dim_2::Mesh2D;
pub use dim_3::Mesh3D;

use crate::parse::tokenize::{self, COMMENT_MARKER};
use crate::parse::{FileKind, FormatError, UnsupportedDialect};
use crate::Error;

use std::path::Path;

/// Which mesh dialect a file (or grid) uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Dimensionality {
    /// UBC 2D mesh: X and Z axes, Y is a single layer
    #[display(fmt = "2D")]
    TwoD,
    /// UBC 3D tensor mesh or OcTree mesh
    #[display(fmt = "3D")]
    ThreeD,
}

impl Dimensionality {
    /// classify a grid from its extent. A grid with exactly one cell along Y is 2D
    pub fn of_extent(extent: &Extent) -> Self {
        if extent.y_cells() == 1 {
            Self::TwoD
        } else {
            Self::ThreeD
        }
    }
}

/// The min / max index along each axis of a structured grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Constructor)]
pub struct Extent {
    pub x_start: usize,
    pub x_end: usize,
    pub y_start: usize,
    pub y_end: usize,
    pub z_start: usize,
    pub z_end: usize,
}

impl Extent {
    /// an extent starting at zero along every axis
    pub fn from_upper(x_end: usize, y_end: usize, z_end: usize) -> Self {
        Self::new(0, x_end, 0, y_end, 0, z_end)
    }

    /// number of cells along X
    pub fn x_cells(&self) -> usize {
        self.x_end.saturating_sub(self.x_start)
    }

    /// number of cells along Y
    pub fn y_cells(&self) -> usize {
        self.y_end.saturating_sub(self.y_start)
    }

    /// number of cells along Z
    pub fn z_cells(&self) -> usize {
        self.z_end.saturating_sub(self.z_start)
    }

    pub fn cell_count(&self) -> usize {
        self.x_cells() * self.y_cells() * self.z_cells()
    }

    /// `[x_start, x_end, y_start, y_end, z_start, z_end]`
    pub fn as_array(&self) -> [usize; 6] {
        [
            self.x_start,
            self.x_end,
            self.y_start,
            self.y_end,
            self.z_start,
            self.z_end,
        ]
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.x_start, self.x_end, self.y_start, self.y_end, self.z_start, self.z_end
        )
    }
}

/// The part of a mesh file needed to allocate a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHeader {
    pub dimensionality: Dimensionality,
    /// `[nx, ny, nz]`. For 2D meshes `ny` is always 1
    pub cell_counts: [usize; 3],
}

impl MeshHeader {
    /// Read the header of the mesh file at `path`.
    ///
    /// For 3D / OcTree files only the first retained line is read. 2D files have no single
    /// line with the totals, so the X and Z runs are decoded to sum their repeat counts.
    pub fn read(path: &Path, marker: char) -> Result<Self, Error> {
        let first = tokenize::read_first_line(path, marker)?.ok_or_else(|| {
            FormatError::new(path, None, FileKind::Mesh, "mesh file has no header line")
        })?;

        let token_count = first.token_count();

        match token_count {
            1 => {
                // validates the lone token is an integer before the deeper scan
                let token = first.text.as_str();
                let _: usize = crate::parse::parse_token(
                    path,
                    &first,
                    token,
                    FileKind::Mesh2D,
                    "an integer run count",
                )?;

                let mesh = Mesh2D::read_with_marker(path, marker)?;
                let (nx, nz) = mesh.tick_counts();

                tracing::debug!("`{}` is a UBC 2D mesh with {nx} x {nz} ticks", path.display());

                Ok(Self {
                    dimensionality: Dimensionality::TwoD,
                    cell_counts: [nx, 1, nz],
                })
            }
            n if n >= 3 => {
                let mut cell_counts = [0; 3];
                for (count, token) in cell_counts.iter_mut().zip(first.tokens()) {
                    *count = crate::parse::parse_token(
                        path,
                        &first,
                        token,
                        FileKind::Mesh3D,
                        "an integer cell count",
                    )?;
                }

                tracing::debug!(
                    "`{}` is a UBC 3D / OcTree mesh with {:?} cells",
                    path.display(),
                    cell_counts
                );

                Ok(Self {
                    dimensionality: Dimensionality::ThreeD,
                    cell_counts,
                })
            }
            n => Err(UnsupportedDialect::new(path, n).into()),
        }
    }

    /// the whole extent of the grid described by this header
    pub fn extent(&self) -> Extent {
        let [nx, ny, nz] = self.cell_counts;
        Extent::from_upper(nx, ny, nz)
    }
}

/// Detect the dialect of a mesh file and compute the whole extent of its grid
pub fn compute_whole_extent<P: AsRef<Path>>(path: P) -> Result<(Dimensionality, Extent), Error> {
    let header = MeshHeader::read(path.as_ref(), COMMENT_MARKER)?;
    Ok((header.dimensionality, header.extent()))
}

/// A run of `repeat` cells that all have the same `width`
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Constructor)]
pub struct Run {
    pub width: f64,
    pub repeat: usize,
}

/// The cell layout along a single axis
#[derive(Debug, Clone, PartialEq, Default, derive_more::Constructor)]
pub struct AxisDiscretization {
    pub origin: f64,
    pub runs: Vec<Run>,
}

impl AxisDiscretization {
    /// number of cells along the axis
    pub fn cell_count(&self) -> usize {
        self.runs
            .iter()
            .fold(0usize, |cells, run| cells.saturating_add(run.repeat))
    }

    /// width of every cell, in order
    pub fn widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.runs
            .iter()
            .flat_map(|run| std::iter::repeat(run.width).take(run.repeat))
    }

    /// coordinates of the cell boundaries, starting at the origin. There is one more tick
    /// than there are cells
    pub fn ticks(&self) -> Vec<f64> {
        let mut ticks = Vec::with_capacity(self.cell_count() + 1);
        let mut current = self.origin;
        ticks.push(current);

        for width in self.widths() {
            current += width;
            ticks.push(current);
        }

        ticks
    }

    /// coordinates of the cell centers
    pub fn centers(&self) -> Vec<f64> {
        self.ticks()
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    }

    /// total length of the axis
    pub fn length(&self) -> f64 {
        self.widths().sum()
    }
}

/// A fully decoded mesh of either dialect
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMesh {
    TwoD(Mesh2D),
    ThreeD(Mesh3D),
}

impl DecodedMesh {
    /// decode the mesh at `path` in whichever dialect its header describes
    pub fn read(path: &Path, marker: char) -> Result<Self, Error> {
        let header = MeshHeader::read(path, marker)?;
        Self::read_with_header(path, marker, &header)
    }

    pub(crate) fn read_with_header(
        path: &Path,
        marker: char,
        header: &MeshHeader,
    ) -> Result<Self, Error> {
        let mesh = match header.dimensionality {
            Dimensionality::TwoD => Self::TwoD(Mesh2D::read_with_marker(path, marker)?),
            Dimensionality::ThreeD => Self::ThreeD(Mesh3D::read_with_marker(path, marker)?),
        };
        Ok(mesh)
    }

    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            Self::TwoD(_) => Dimensionality::TwoD,
            Self::ThreeD(_) => Dimensionality::ThreeD,
        }
    }
}
