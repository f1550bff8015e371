//! Loading settings files from disk.

use std::io::Write;

use horo_chart::HouseSystem;
use horo_config::{ConfigError, EngineSettings};

#[test]
fn loads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "house_system = \"porphyry\"\nrefine_exact_times = true\n\n[interval]\nhalf_window_days = 90"
    )
    .expect("write");

    let s = EngineSettings::load(file.path()).expect("loads");
    assert_eq!(s.house_system, HouseSystem::Porphyry);
    assert!(s.refine_exact_times);
    let typed = s.search_settings().expect("valid");
    assert_eq!(typed.interval.half_window_days, 90);
    assert_eq!(typed.interval.open_orb_deg, 1.0);
}

#[test]
fn explicit_path_wins() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "house_system = \"campanus\"").expect("write");
    let s = EngineSettings::resolve(Some(file.path())).expect("loads");
    assert_eq!(s.house_system, HouseSystem::Campanus);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    match EngineSettings::load(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[hourly\ndays = 3").expect("write");
    assert!(matches!(
        EngineSettings::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}
