use super::{AxisDiscretization, Extent, Run};
use crate::parse::tokenize::{self, Line, COMMENT_MARKER};
use crate::parse::{parse_token, FileKind, FormatError};
use crate::Error;

use std::path::Path;

/// A decoded UBC 3D tensor mesh
///
/// ```text
/// ne nn nz            ! cells along easting, northing and depth
/// x0 y0 z0            ! south-west-top corner
/// dx_1 dx_2 ...       ! easting widths, `n*w` is n cells of width w
/// dy_1 dy_2 ...
/// dz_1 dz_2 ...       ! depth widths, from the top down
/// ```
///
/// The Z axis is stored bottom-up so that its ticks ascend and end at `z0`.
#[derive(Debug, Clone, PartialEq, derive_more::Constructor)]
pub struct Mesh3D {
    pub x: AxisDiscretization,
    pub y: AxisDiscretization,
    pub z: AxisDiscretization,
}

impl Mesh3D {
    /// decode the 3D tensor mesh at `path`
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::read_with_marker(path.as_ref(), COMMENT_MARKER)
    }

    pub(crate) fn read_with_marker(path: &Path, marker: char) -> Result<Self, Error> {
        let lines = tokenize::read_lines(path, marker)?;
        Ok(Self::from_lines(path, &lines)?)
    }

    /// decode from already tokenized lines. `path` is only used for error reporting
    pub fn from_lines(path: &Path, lines: &[Line]) -> Result<Self, FormatError> {
        let counts = three_values::<usize>(path, lines, 0, "cell counts", "an integer")?;
        let origin = three_values::<f64>(path, lines, 1, "the origin", "a float")?;

        let x = read_widths(path, lines, 2, counts[0], 'X')?;
        let y = read_widths(path, lines, 3, counts[1], 'Y')?;
        let z_top_down = read_widths(path, lines, 4, counts[2], 'Z')?;

        let x = AxisDiscretization::new(origin[0], x);
        let y = AxisDiscretization::new(origin[1], y);

        let depth: f64 = z_top_down.iter().map(|run| run.width * run.repeat as f64).sum();
        let z = AxisDiscretization::new(origin[2] - depth, z_top_down.into_iter().rev().collect());

        Ok(Self { x, y, z })
    }

    /// `[ne, nn, nz]`
    pub fn cell_counts(&self) -> [usize; 3] {
        [self.x.cell_count(), self.y.cell_count(), self.z.cell_count()]
    }

    pub fn extent(&self) -> Extent {
        let [ne, nn, nz] = self.cell_counts();
        Extent::from_upper(ne, nn, nz)
    }
}

fn missing(path: &Path, lines: &[Line], what: &str) -> FormatError {
    let line = lines.last().map(|l| l.number + 1).unwrap_or(1);
    FormatError::new(
        path,
        Some(line),
        FileKind::Mesh3D,
        format!("file ended while expecting {what}"),
    )
}

/// the first three tokens of a line
fn three_values<T: std::str::FromStr + Copy + Default>(
    path: &Path,
    lines: &[Line],
    index: usize,
    what: &str,
    token_kind: &str,
) -> Result<[T; 3], FormatError> {
    let line = lines.get(index).ok_or_else(|| missing(path, lines, what))?;

    let mut out = [T::default(); 3];
    let mut tokens = line.tokens();

    for value in out.iter_mut() {
        let token = tokens.next().ok_or_else(|| {
            FormatError::new(
                path,
                Some(line.number),
                FileKind::Mesh3D,
                format!("{what} needs three values"),
            )
        })?;
        *value = parse_token(path, line, token, FileKind::Mesh3D, token_kind)?;
    }

    Ok(out)
}

/// parse a width line, expanding `n*w` tokens, and check it against the header count
fn read_widths(
    path: &Path,
    lines: &[Line],
    index: usize,
    expected: usize,
    axis: char,
) -> Result<Vec<Run>, FormatError> {
    let line = lines
        .get(index)
        .ok_or_else(|| missing(path, lines, &format!("{axis} cell widths")))?;

    let mut runs = Vec::new();
    let mut found: usize = 0;

    for token in line.tokens() {
        let run = match token.split_once('*') {
            Some((repeat, width)) => Run::new(
                parse_token(path, line, width, FileKind::Mesh3D, "a cell width")?,
                parse_token(path, line, repeat, FileKind::Mesh3D, "a repeat count")?,
            ),
            None => Run::new(
                parse_token(path, line, token, FileKind::Mesh3D, "a cell width")?,
                1,
            ),
        };

        if run.repeat == 0 {
            return Err(FormatError::new(
                path,
                Some(line.number),
                FileKind::Mesh3D,
                "repeat counts must be at least 1",
            ));
        }

        found = found.checked_add(run.repeat).ok_or_else(|| {
            FormatError::new(
                path,
                Some(line.number),
                FileKind::Mesh3D,
                format!("{axis} repeat counts overflow the cell count"),
            )
        })?;

        runs.push(run);
    }

    if found != expected {
        return Err(FormatError::new(
            path,
            Some(line.number),
            FileKind::Mesh3D,
            format!("header declares {expected} {axis} cells but {found} widths were given"),
        ));
    }

    Ok(runs)
}
