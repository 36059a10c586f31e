mod common;

use common::scratch_dir;
use ubc::{read_model, AxisDiscretization, Mesh2D, Mesh3D, Run};

#[test]
fn written_model_reads_back() {
    let dir = scratch_dir("written_model_reads_back");
    let path = dir.join("model.den");

    let values = vec![0.1, -3.25, 1e-12, 2500.0];
    let file = std::fs::File::create(&path).unwrap();
    ubc::write_model(file, &values).unwrap();

    let model = read_model(&path).unwrap();
    assert_eq!(model.as_slice(), values.as_slice());
}

#[test]
fn written_meshes_decode_to_the_same_ticks() {
    let dir = scratch_dir("written_meshes_decode_to_the_same_ticks");

    let mesh_2d = Mesh2D::new(
        AxisDiscretization::new(-10.0, vec![Run::new(2.5, 4), Run::new(5.0, 2)]),
        AxisDiscretization::new(-100.0, vec![Run::new(10.0, 10)]),
    );
    let path = dir.join("mesh2d.msh");
    ubc::write_mesh_2d(std::fs::File::create(&path).unwrap(), &mesh_2d).unwrap();
    assert_eq!(Mesh2D::read(&path).unwrap(), mesh_2d);

    let mesh_3d = Mesh3D::new(
        AxisDiscretization::new(0.0, vec![Run::new(10.0, 3)]),
        AxisDiscretization::new(0.0, vec![Run::new(10.0, 2), Run::new(20.0, 1)]),
        AxisDiscretization::new(-60.0, vec![Run::new(40.0, 1), Run::new(10.0, 2)]),
    );
    let path = dir.join("mesh3d.msh");
    ubc::write_mesh_3d(std::fs::File::create(&path).unwrap(), &mesh_3d).unwrap();

    let decoded = Mesh3D::read(&path).unwrap();
    assert_eq!(decoded.x.ticks(), mesh_3d.x.ticks());
    assert_eq!(decoded.y.ticks(), mesh_3d.y.ticks());
    assert_eq!(decoded.z.ticks(), mesh_3d.z.ticks());
}
