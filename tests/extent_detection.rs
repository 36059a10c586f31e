mod common;

use common::{scratch_dir, write_file};
use ubc::{compute_whole_extent, Dimensionality, Error, Extent, FileKind, MeshReader};

#[test]
fn two_dimensional_extent_sums_repeats() {
    let dir = scratch_dir("two_dimensional_extent_sums_repeats");
    let path = write_file(
        &dir,
        "mesh2d.msh",
        "! UBC 2D mesh\n2\n0 10 2\n20 3\n2\n0 10 2\n20 3\n",
    );

    let (dim, extent) = compute_whole_extent(&path).unwrap();

    assert_eq!(dim, Dimensionality::TwoD);
    assert_eq!(extent, Extent::new(0, 6, 0, 1, 0, 6));
}

#[test]
fn two_dimensional_extent_single_z_run() {
    let dir = scratch_dir("two_dimensional_extent_single_z_run");
    let path = write_file(&dir, "mesh2d.msh", "2\n0 10 2\n20 3\n1\n0 10 2\n");

    let (_, extent) = compute_whole_extent(&path).unwrap();

    assert_eq!(extent.as_array(), [0, 6, 0, 1, 0, 3]);
}

#[test]
fn three_dimensional_extent_is_header() {
    let dir = scratch_dir("three_dimensional_extent_is_header");
    let path = write_file(&dir, "mesh3d.msh", "4 5 6\n");

    let (dim, extent) = compute_whole_extent(&path).unwrap();

    assert_eq!(dim, Dimensionality::ThreeD);
    assert_eq!(extent, Extent::new(0, 4, 0, 5, 0, 6));
}

#[test]
fn extent_is_stable_across_calls() {
    let dir = scratch_dir("extent_is_stable_across_calls");
    let path = write_file(&dir, "mesh3d.msh", "4 5 6\n0 0 0\n4*1\n5*1\n6*1\n");

    let mut reader = MeshReader::default();
    reader.set_mesh_path(&path);

    let first = reader.whole_extent().unwrap();

    // the cached header is used even if the file goes away
    std::fs::remove_file(&path).unwrap();
    let second = reader.whole_extent().unwrap();

    assert_eq!(first, second);
    assert_eq!(reader.header_reads(), 1);
}

#[test]
fn missing_mesh_is_read_error() {
    let dir = scratch_dir("missing_mesh_is_read_error");
    let path = dir.join("nothing.msh");

    let err = compute_whole_extent(&path).unwrap_err();

    match err {
        Error::Read(e) => assert_eq!(e.path(), path.as_path()),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn non_integer_header() {
    let dir = scratch_dir("non_integer_header");
    let path = write_file(&dir, "mesh3d.msh", "4 5.5 6\n");

    let err = compute_whole_extent(&path).unwrap_err();

    match err {
        Error::Format(e) => assert_eq!(e.line(), Some(1)),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn non_integer_two_dimensional_header() {
    let dir = scratch_dir("non_integer_two_dimensional_header");
    let path = write_file(&dir, "mesh2d.msh", "2.5\n0 10 2\n1\n0 10 2\n");

    let err = compute_whole_extent(&path).unwrap_err();

    match err {
        Error::Format(e) => {
            assert_eq!(e.line(), Some(1));
            assert_eq!(e.kind(), FileKind::Mesh2D);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn empty_mesh_file() {
    let dir = scratch_dir("empty_mesh_file");
    let path = write_file(&dir, "mesh.msh", "! only a comment\n\n");

    assert!(matches!(compute_whole_extent(&path), Err(Error::Format(_))));
}
