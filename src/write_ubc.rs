use crate::mesh::{AxisDiscretization, Mesh2D, Mesh3D};
use crate::Error;

use std::io::Write;

/// Write model values to a UBC model file, one value per line
pub fn write_model<W: Write>(mut writer: W, values: &[f64]) -> Result<(), Error> {
    let mut buffer = ryu::Buffer::new();

    for value in values {
        writer.write_all(buffer.format(*value).as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a mesh in the UBC 2D dialect
pub fn write_mesh_2d<W: Write>(mut writer: W, mesh: &Mesh2D) -> Result<(), Error> {
    write_axis_runs(&mut writer, &mesh.x)?;
    write_axis_runs(&mut writer, &mesh.z)?;
    writer.flush()?;
    Ok(())
}

fn write_axis_runs<W: Write>(writer: &mut W, axis: &AxisDiscretization) -> Result<(), Error> {
    let mut buffer = ryu::Buffer::new();

    writeln!(writer, "{}", axis.runs.len())?;

    for (idx, run) in axis.runs.iter().enumerate() {
        if idx == 0 {
            write!(writer, "{} ", buffer.format(axis.origin))?;
        }
        writeln!(writer, "{} {}", buffer.format(run.width), run.repeat)?;
    }

    Ok(())
}

/// Write a mesh in the UBC 3D tensor dialect. Repeated widths are written as `n*w`
pub fn write_mesh_3d<W: Write>(mut writer: W, mesh: &Mesh3D) -> Result<(), Error> {
    let mut buffer = ryu::Buffer::new();
    let [ne, nn, nz] = mesh.cell_counts();

    writeln!(writer, "{ne} {nn} {nz}")?;

    // the file origin is the top of the mesh
    let top = mesh.z.origin + mesh.z.length();
    write!(writer, "{} ", buffer.format(mesh.x.origin))?;
    write!(writer, "{} ", buffer.format(mesh.y.origin))?;
    writeln!(writer, "{}", buffer.format(top))?;

    write_widths(&mut writer, mesh.x.runs.iter())?;
    write_widths(&mut writer, mesh.y.runs.iter())?;
    write_widths(&mut writer, mesh.z.runs.iter().rev())?;

    writer.flush()?;
    Ok(())
}

fn write_widths<'a, W: Write, I: Iterator<Item = &'a crate::mesh::Run>>(
    writer: &mut W,
    runs: I,
) -> Result<(), Error> {
    let mut buffer = ryu::Buffer::new();
    let mut line = String::new();

    for run in runs {
        if !line.is_empty() {
            line.push(' ');
        }
        if run.repeat > 1 {
            line.push_str(&run.repeat.to_string());
            line.push('*');
        }
        line.push_str(buffer.format(run.width));
    }

    writeln!(writer, "{line}")?;
    Ok(())
}
