use std::path::Path;

/// final component of a path as a string, or the whole path if it has no file name
pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// text after the last `.` in the file name. A file name without a `.` is returned whole
pub(crate) fn extension_name(path: &Path) -> String {
    let name = basename(path);
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_string(),
        None => name,
    }
}

#[test]
fn extension_of_model_files() {
    assert_eq!(extension_name(Path::new("/data/run.1/model.den")), "den");
    assert_eq!(extension_name(Path::new("model.tar.sus")), "sus");
    assert_eq!(extension_name(Path::new("/data/model")), "model");
    assert_eq!(basename(Path::new("/data/model.den")), "model.den");
}
