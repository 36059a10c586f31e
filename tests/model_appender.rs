mod common;

use common::{scratch_dir, write_file};
use ubc::{AppenderConfig, CellGrid, Error, ModelAppender, RectilinearGrid, State};

fn grid_3d() -> RectilinearGrid {
    // 2 x 2 x 2 cells
    RectilinearGrid::new(vec![0., 1., 2.], vec![0., 1., 2.], vec![0., 1., 2.])
}

fn grid_2d() -> RectilinearGrid {
    // 3 x 1 x 2 cells
    RectilinearGrid::new(vec![0., 1., 2., 3.], vec![0., 1.], vec![0., 1., 2.])
}

#[test]
fn timesteps_from_dt_grow_with_files() {
    let mut appender = ModelAppender::new(AppenderConfig::default().with_time_delta(2.0));
    let grid = grid_3d();

    appender.add_model_file("a.mod");
    appender.request_information(&[], &grid).unwrap();
    assert_eq!(appender.timestep_values(), &[0.0]);

    appender.add_model_file("b.mod");
    appender.request_information(&[], &grid).unwrap();
    assert_eq!(appender.timestep_values(), &[0.0, 2.0]);
}

#[test]
fn upstream_timesteps_are_copied() {
    let mut appender = ModelAppender::default();
    appender.add_model_files(["a.mod", "b.mod"]);

    appender
        .request_information(&[0.5, 1.5], &grid_3d())
        .unwrap();

    assert_eq!(appender.timestep_values(), &[0.5, 1.5]);
}

#[test]
fn duplicate_file_keeps_state_clean() {
    let dir = scratch_dir("duplicate_file_keeps_state_clean");
    let a = write_file(&dir, "a.den", "1 2 3 4 5 6 7 8");

    let mut appender = ModelAppender::default();
    appender.add_model_file(&a);

    let mut grid = grid_3d();
    appender.produce_for_timestep(&[], &mut grid, 0).unwrap();
    assert_eq!(appender.state(), State::Clean);

    assert!(!appender.add_model_file(&a));
    assert_eq!(appender.model_files(), &[a.clone()]);
    assert_eq!(appender.state(), State::Clean);
}

#[test]
fn timestep_past_loaded_models_leaves_grid_alone() {
    let dir = scratch_dir("timestep_past_loaded_models_leaves_grid_alone");
    let files: Vec<_> = (0..3)
        .map(|i| write_file(&dir, &format!("t{i}.den"), "1 2 3 4 5 6 7 8"))
        .collect();

    let mut appender = ModelAppender::default();
    appender.add_model_files(&files);

    let mut grid = grid_3d();
    grid.set_cell_array("existing", vec![9.0; 8]);
    let before = grid.clone();

    let placed = appender.produce_for_timestep(&[], &mut grid, 5).unwrap();

    assert!(!placed);
    assert_eq!(grid, before);
    assert_eq!(appender.models().len(), 3);
}

#[test]
fn each_timestep_places_its_own_model() {
    let dir = scratch_dir("each_timestep_places_its_own_model");
    let t0 = write_file(&dir, "t0.sus", "0 0 0 0 0 0");
    let t1 = write_file(&dir, "t1.sus", "! top row first\n1 2 3\n4 5 6\n");

    let mut appender = ModelAppender::default();
    appender.add_model_files([t0, t1]);

    let mut grid = grid_2d();
    appender.produce_for_timestep(&[], &mut grid, 1).unwrap();
    assert_eq!(grid.cell_array("sus"), Some(&[4., 5., 6., 1., 2., 3.][..]));

    appender.produce_for_timestep(&[], &mut grid, 0).unwrap();
    assert_eq!(grid.cell_array("sus"), Some(&[0.; 6][..]));
}

#[test]
fn failed_reread_keeps_previous_models() {
    let dir = scratch_dir("failed_reread_keeps_previous_models");
    let a = write_file(&dir, "a.den", "1 2 3 4 5 6 7 8");

    let mut appender = ModelAppender::default();
    appender.add_model_file(&a);

    let mut grid = grid_3d();
    appender.produce_for_timestep(&[], &mut grid, 0).unwrap();
    let loaded = appender.models().clone();

    appender.add_model_file(dir.join("missing.den"));
    assert_eq!(appender.state(), State::Stale);

    let err = appender.produce_for_timestep(&[], &mut grid, 0).unwrap_err();
    assert!(matches!(err, Error::Read(_)));

    assert_eq!(appender.models(), &loaded);
    assert_eq!(appender.state(), State::Stale);

    // the file shows up, the next request retries and succeeds
    write_file(&dir, "missing.den", "8 7 6 5 4 3 2 1");
    assert!(appender.produce_for_timestep(&[], &mut grid, 1).unwrap());
    assert_eq!(appender.state(), State::Clean);
    assert_eq!(appender.models().len(), 2);
}

#[test]
fn wrong_model_length_is_an_error() {
    let dir = scratch_dir("wrong_model_length_is_an_error");
    let a = write_file(&dir, "a.den", "1 2 3");

    let mut appender = ModelAppender::default();
    appender.add_model_file(&a);

    let mut grid = grid_3d();
    let err = appender.produce_for_timestep(&[], &mut grid, 0).unwrap_err();

    match err {
        Error::ModelLength(e) => {
            assert_eq!(e.name, "den");
            assert_eq!(e.model_len, 3);
            assert_eq!(e.cell_count, 8);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(grid.cell_array("den").is_none());
}

#[test]
fn clearing_models_marks_stale() {
    let dir = scratch_dir("clearing_models_marks_stale");
    let a = write_file(&dir, "a.den", "1 2 3 4 5 6 7 8");

    let mut appender = ModelAppender::default();
    appender.add_model_file(&a);

    let mut grid = grid_3d();
    appender.produce_for_timestep(&[], &mut grid, 0).unwrap();

    appender.clear_models();
    assert_eq!(appender.state(), State::Stale);
    assert!(!appender.has_models());

    assert!(!appender.produce_for_timestep(&[], &mut grid, 0).unwrap());
    assert!(appender.models().is_empty());
}

#[test]
fn explicit_modified_forces_reread() {
    let dir = scratch_dir("explicit_modified_forces_reread");
    let a = write_file(&dir, "a.den", "1 2 3 4 5 6 7 8");

    let mut appender = ModelAppender::default();
    appender.add_model_file(&a);

    let mut grid = grid_3d();
    appender.produce_for_timestep(&[], &mut grid, 0).unwrap();

    write_file(&dir, "a.den", "2 2 2 2 2 2 2 2");
    appender.modified(ubc::Invalidate::MODELS);
    appender.produce_for_timestep(&[], &mut grid, 0).unwrap();

    assert_eq!(appender.model_reads(), 2);
    assert_eq!(grid.cell_array("den"), Some(&[2.0; 8][..]));
}
