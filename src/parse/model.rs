use super::error::FileKind;
use super::tokenize::{self, COMMENT_MARKER};
use crate::array::{ModelArray, ModelCollection};
use crate::utils;
use crate::Error;

use std::path::Path;

/// Read a UBC model file into a flat array of cell values.
///
/// The file is a list of whitespace / newline separated floats with no header. Values
/// are returned in the order they appear in the file. No check against a mesh happens here,
/// see [`CellGrid`](crate::CellGrid) placement for that.
pub fn read_model<P: AsRef<Path>>(path: P) -> Result<ModelArray, Error> {
    read_model_with_marker(path, COMMENT_MARKER)
}

/// [`read_model`] with a custom comment marker
pub fn read_model_with_marker<P: AsRef<Path>>(path: P, marker: char) -> Result<ModelArray, Error> {
    let path = path.as_ref();
    let lines = tokenize::read_lines(path, marker)?;

    let mut values = Vec::with_capacity(lines.len());

    for line in &lines {
        for token in line.tokens() {
            let value: f64 = super::parse_token(path, line, token, FileKind::Model, "a float")?;
            values.push(value);
        }
    }

    tracing::debug!("read {} model values from `{}`", values.len(), path.display());

    Ok(ModelArray::new(values))
}

/// Read several model files at once. The result is keyed by the file basename and keeps the
/// order `paths` was given in.
///
/// Reading stops at the first file that fails, nothing partial is returned.
pub fn read_models<I, P>(paths: I) -> Result<ModelCollection, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    read_models_with_marker(paths, COMMENT_MARKER)
}

/// [`read_models`] with a custom comment marker
pub fn read_models_with_marker<I, P>(paths: I, marker: char) -> Result<ModelCollection, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut collection = ModelCollection::default();

    for path in paths {
        let path = path.as_ref();
        let model = read_model_with_marker(path, marker)?;
        collection.push(utils::basename(path), model);
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{scratch_dir, write_file};

    #[test]
    fn values_across_lines_with_comment() {
        let dir = scratch_dir("values_across_lines_with_comment");
        let path = write_file(&dir, "model.den", "1.0 2.0\n3.0 4.0\n! note\n");

        let model = read_model(&path).unwrap();

        assert_eq!(model.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn bad_token_reports_line() {
        let dir = scratch_dir("bad_token_reports_line");
        let path = write_file(&dir, "model.den", "! comment\n1.0\n2.0 abc\n");

        let err = read_model(&path).unwrap_err();

        match err {
            Error::Format(f) => {
                assert_eq!(f.line(), Some(3));
                assert_eq!(f.kind(), FileKind::Model);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn batch_read_keyed_by_basename() {
        let dir = scratch_dir("batch_read_keyed_by_basename");
        let a = write_file(&dir, "a.sus", "1 2 3");
        let b = write_file(&dir, "b.sus", "4\n5\n6\n");

        let models = read_models([&a, &b]).unwrap();

        assert_eq!(models.len(), 2);
        assert_eq!(models.get("a.sus").unwrap().as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(models.get("b.sus").unwrap().as_slice(), &[4.0, 5.0, 6.0]);
        assert_eq!(models.names().collect::<Vec<_>>(), vec!["a.sus", "b.sus"]);
    }

    #[test]
    fn missing_file_in_batch_fails_whole_batch() {
        let dir = scratch_dir("missing_file_in_batch_fails_whole_batch");
        let a = write_file(&dir, "a.sus", "1 2 3");
        let missing = dir.join("missing.sus");

        let err = read_models([a, missing]).unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }
}
