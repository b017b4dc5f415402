use csvdrive_importer_core::{
    generate, DataPath, ErrorKind, ImportConfig, MemoryHost, Report, ReportLevel, SceneHost,
    SourceTable, TargetKind, Value,
};
use csvdrive_test_fixtures as fixtures;

/// Load a fixture scene with the fixture root as its project directory.
fn scene(name: &str) -> MemoryHost {
    let host: MemoryHost = fixtures::scenes::load(name).expect("scene fixture");
    host.with_project_dir(fixtures::root())
}

fn run(name: &str) -> ImportConfig {
    fixtures::scenes::run(name)
        .expect("run fixture")
        .expect("scene has a paired run")
}

#[test]
fn manifest_entries_all_resolve() {
    for key in fixtures::tables::keys() {
        assert!(fixtures::tables::path(&key).unwrap().is_file(), "{key}");
    }
    for key in fixtures::scenes::keys() {
        let host: MemoryHost = fixtures::scenes::load(&key).unwrap();
        assert!(host.settings.fps > 0.0, "{key}");
    }
}

#[test]
fn lamp_pulse_matches_worked_example() {
    let mut host = scene("lamp");
    let outcome = generate(&run("lamp"), &mut host);
    let report = Report::from_outcome(&outcome);

    assert_eq!(report.level, ReportLevel::Info);
    assert_eq!(report.message, "Generated 3 keyframes (frame offset -3)");
    assert_eq!(
        host.keyframes.frames_on(&DataPath::LightEnergy),
        vec![-3.0, 27.0, 57.0]
    );
    let energies: Vec<_> = host.keyframes.iter().map(|k| k.value).collect();
    assert_eq!(
        energies,
        vec![Value::f(20.0), Value::f(40.0), Value::f(-10.0)]
    );
}

#[test]
fn buoy_bobs_relative_to_its_rest_height() {
    let mut host = scene("buoy");
    let config = run("buoy");
    let summary = generate(&config, &mut host).unwrap();

    // humidity column: six rows survive (short, blank and non-numeric rows drop out)
    assert_eq!(summary.keyframes, 6);
    assert_eq!(summary.anchor_frame, Some(1.0));

    let keys: Vec<_> = host.keyframes.on_path(&DataPath::Location).cloned().collect();
    assert_eq!(keys[0].frame, 1.0);
    assert_eq!(keys[0].value, Value::vec3(2.0, -1.0, 0.5));

    let frames: Vec<f64> = keys[1..].iter().map(|k| k.frame).collect();
    assert_eq!(frames, vec![0.0, 12.0, 24.0, 48.0, 60.0, 72.0]);

    let heights: Vec<f32> = keys[1..]
        .iter()
        .map(|k| k.keyed_component().unwrap())
        .collect();
    let expected: Vec<f32> = [40.0, 41.0, 42.0, 43.0, 44.0, 46.0]
        .iter()
        .map(|raw: &f64| 0.5f32 + (raw * config.scale) as f32)
        .collect();
    assert_eq!(heights, expected);
}

#[test]
fn plane_scroll_moves_mapping_x() {
    let mut host = scene("textured-plane");
    let summary = generate(&run("textured-plane"), &mut host).unwrap();
    assert_eq!(summary.keyframes, 5);

    let socket = DataPath::node_input("Mapping", "Location");
    let keys: Vec<_> = host.keyframes.on_path(&socket).cloned().collect();
    assert_eq!(keys.len(), 5);
    assert!(keys.iter().all(|k| k.index == Some(0)));
    let xs: Vec<f32> = keys.iter().map(|k| k.keyed_component().unwrap()).collect();
    assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, -0.125]);
    assert_eq!(
        host.node_input("Principled BSDF", "Base Color"),
        Some(Value::rgba(0.8, 0.8, 0.8, 1.0))
    );
}

#[test]
fn sign_gradient_drives_renamed_emission_node() {
    let mut host = scene("emissive-sign");
    generate(&run("emissive-sign"), &mut host).unwrap();

    let socket = DataPath::node_input("Glow", "Color");
    let colors: Vec<Value> = host.keyframes.on_path(&socket).map(|k| k.value).collect();
    assert_eq!(colors.len(), 5);
    assert_eq!(colors[0], Value::rgba(0.0, 0.0, 1.0, 1.0));
    assert_eq!(colors[2], Value::rgba(1.0, 0.2, 0.0, 1.0));
    // 1.5 and -0.25 clamp onto the endpoints
    assert_eq!(colors[3], colors[2]);
    assert_eq!(colors[4], colors[0]);
    assert_eq!(host.keyframes.frames_on(&socket)[1], 0.25 * 25.0);
}

#[test]
fn empty_stage_has_no_target() {
    let mut host = scene("empty-stage");
    let config = ImportConfig::new(
        fixtures::tables::project_path("light-pulse").unwrap(),
        TargetKind::LightEnergy,
    );
    let outcome = generate(&config, &mut host);
    assert_eq!(outcome.as_ref().unwrap_err().kind(), ErrorKind::NoTarget);
    assert!(Report::from_outcome(&outcome).is_error());
}

#[test]
fn empty_and_header_only_tables() {
    let mut host = scene("lamp");
    let empty = ImportConfig::new(
        fixtures::tables::project_path("empty").unwrap(),
        TargetKind::LightEnergy,
    );
    assert_eq!(
        generate(&empty, &mut host).unwrap_err().kind(),
        ErrorKind::EmptyFile
    );

    let header_only = ImportConfig::new(
        fixtures::tables::project_path("header-only").unwrap(),
        TargetKind::LightEnergy,
    );
    assert_eq!(generate(&header_only, &mut host).unwrap().keyframes, 0);
}

#[test]
fn invalid_bytes_are_dropped_from_cells() {
    let mut host = scene("lamp");
    let config = ImportConfig::new(
        fixtures::tables::project_path("latin1-noise").unwrap(),
        TargetKind::LightEnergy,
    );
    assert_eq!(generate(&config, &mut host).unwrap().keyframes, 2);
    let energies: Vec<_> = host.keyframes.iter().map(|k| k.value).collect();
    assert_eq!(energies, vec![Value::f(1.0), Value::f(2.0)]);
}

#[test]
fn sensor_log_table_shape() {
    let text = fixtures::tables::text("sensor-log").unwrap();
    let table = SourceTable::parse(text.as_bytes()).unwrap();
    assert_eq!(
        table.header().unwrap(),
        ["time_s", "temperature", "humidity", "lux"]
    );
    // blank line produces no row
    assert_eq!(table.data_row_count(), 8);
}

#[test]
fn project_relative_paths_need_the_project_dir() {
    let mut host: MemoryHost = fixtures::scenes::load("lamp").unwrap();
    assert!(host
        .resolve_path(&fixtures::tables::project_path("light-pulse").unwrap())
        .is_none());
    let err = generate(&run("lamp"), &mut host).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}
