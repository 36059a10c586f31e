use super::{AxisDiscretization, Extent, Run};
use crate::parse::tokenize::{self, Line, COMMENT_MARKER};
use crate::parse::{parse_token, FileKind, FormatError};
use crate::Error;

use std::path::Path;

/// A decoded UBC 2D mesh.
///
/// ## Layout
///
/// ```text
/// nx                          ! number of X run lines
/// origin width_0 repeat_0     ! first X run carries the origin
/// width_1 repeat_1
/// ...
/// nz                          ! number of Z run lines
/// origin width_0 repeat_0
/// ...
/// ```
///
/// The Y axis is not described by the file; a 2D mesh is a single layer.
#[derive(Debug, Clone, PartialEq, derive_more::Constructor)]
pub struct Mesh2D {
    pub x: AxisDiscretization,
    pub z: AxisDiscretization,
}

impl Mesh2D {
    /// decode the 2D mesh at `path`
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::read_with_marker(path.as_ref(), COMMENT_MARKER)
    }

    pub(crate) fn read_with_marker(path: &Path, marker: char) -> Result<Self, Error> {
        let lines = tokenize::read_lines(path, marker)?;
        Ok(Self::from_lines(path, &lines)?)
    }

    /// decode from already tokenized lines. `path` is only used for error reporting
    pub fn from_lines(path: &Path, lines: &[Line]) -> Result<Self, FormatError> {
        let nx = read_count(path, lines, 0, 'X')?;
        let x = read_runs(path, lines, 1, nx, 'X')?;

        let nz = read_count(path, lines, nx + 1, 'Z')?;
        let z = read_runs(path, lines, nx + 2, nz, 'Z')?;

        Ok(Self { x, z })
    }

    /// number of tick coordinates along X and Z
    pub fn tick_counts(&self) -> (usize, usize) {
        (
            self.x.cell_count().saturating_add(1),
            self.z.cell_count().saturating_add(1),
        )
    }

    /// whole extent as reported by [`compute_whole_extent`](super::compute_whole_extent)
    pub fn extent(&self) -> Extent {
        let (nx, nz) = self.tick_counts();
        Extent::from_upper(nx, 1, nz)
    }

    pub fn x_ticks(&self) -> Vec<f64> {
        self.x.ticks()
    }

    pub fn z_ticks(&self) -> Vec<f64> {
        self.z.ticks()
    }
}

fn line_at<'a>(
    path: &Path,
    lines: &'a [Line],
    index: usize,
    what: &str,
) -> Result<&'a Line, FormatError> {
    lines.get(index).ok_or_else(|| {
        // report one past the last line we have, that is where the data should have been
        let line = lines.last().map(|l| l.number + 1).unwrap_or(1);
        FormatError::new(
            path,
            Some(line),
            FileKind::Mesh2D,
            format!("file ended while expecting {what}"),
        )
    })
}

/// read the line holding the number of run lines for an axis
fn read_count(path: &Path, lines: &[Line], index: usize, axis: char) -> Result<usize, FormatError> {
    let line = line_at(path, lines, index, &format!("the {axis} run count"))?;

    let mut tokens = line.tokens();
    let count: usize = match (tokens.next(), tokens.next()) {
        (Some(token), None) => parse_token(path, line, token, FileKind::Mesh2D, "a run count")?,
        _ => {
            return Err(FormatError::new(
                path,
                Some(line.number),
                FileKind::Mesh2D,
                format!("the {axis} run count line must hold a single integer"),
            ))
        }
    };

    if count == 0 {
        return Err(FormatError::new(
            path,
            Some(line.number),
            FileKind::Mesh2D,
            format!("the {axis} axis needs at least one run"),
        ));
    }

    Ok(count)
}

/// read `n` run lines for an axis starting at `start`. The first line holds the
/// origin in front of its run
fn read_runs(
    path: &Path,
    lines: &[Line],
    start: usize,
    n: usize,
    axis: char,
) -> Result<AxisDiscretization, FormatError> {
    let mut origin: f64 = 0.0;
    let mut runs = Vec::with_capacity(n.min(lines.len()));
    // cells so far; kept one below `usize::MAX` so the tick count fits
    let mut total: usize = 0;

    for i in 0..n {
        let line = line_at(path, lines, start + i, &format!("{axis} run {}", i + 1))?;
        let tokens: Vec<&str> = line.tokens().collect();

        let expected = if i == 0 { 3 } else { 2 };
        if tokens.len() != expected {
            return Err(FormatError::new(
                path,
                Some(line.number),
                FileKind::Mesh2D,
                format!(
                    "{axis} run {} must have {expected} tokens, found {}",
                    i + 1,
                    tokens.len()
                ),
            ));
        }

        let run_tokens = if i == 0 {
            origin = parse_token(path, line, tokens[0], FileKind::Mesh2D, "an origin")?;
            &tokens[1..]
        } else {
            &tokens[..]
        };

        let width: f64 =
            parse_token(path, line, run_tokens[0], FileKind::Mesh2D, "a cell width")?;
        let repeat: usize =
            parse_token(path, line, run_tokens[1], FileKind::Mesh2D, "a repeat count")?;

        if repeat == 0 {
            return Err(FormatError::new(
                path,
                Some(line.number),
                FileKind::Mesh2D,
                "repeat counts must be at least 1",
            ));
        }

        total = total
            .checked_add(repeat)
            .filter(|cells| cells.checked_add(1).is_some())
            .ok_or_else(|| {
                FormatError::new(
                    path,
                    Some(line.number),
                    FileKind::Mesh2D,
                    format!("{axis} repeat counts overflow the cell count"),
                )
            })?;

        runs.push(Run::new(width, repeat));
    }

    Ok(AxisDiscretization::new(origin, runs))
}
