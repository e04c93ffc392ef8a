use std::io::Write;

use tinsel::{ConfigError, ParticleClass, SceneConfig, SyncPolicy};

#[test]
fn test_load_partial_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "foliage": {{ "count": 2000 }},
            "lights": {{ "count": 50, "chaos": {{ "inner_radius": 5.0, "outer_radius": 9.0, "lift": 2.0 }} }},
            "sync": "shared"
        }}"#
    )
    .unwrap();

    let config = SceneConfig::load(file.path()).unwrap();
    assert_eq!(config.population(ParticleClass::Foliage).count, 2000);
    assert_eq!(config.population(ParticleClass::Light).count, 50);
    assert_eq!(config.sync, SyncPolicy::Shared);

    let layout = config.layout(ParticleClass::Light);
    assert_eq!(layout.chaos.inner_radius, 5.0);
    assert_eq!(layout.chaos.outer_radius, 9.0);

    // Untouched sections keep their defaults.
    let defaults = SceneConfig::default();
    assert_eq!(config.population(ParticleClass::Ball).count, defaults.balls.count);
    assert_eq!(config.layout(ParticleClass::Ball).chaos, defaults.layout(ParticleClass::Ball).chaos);
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");

    let mut config = SceneConfig::default();
    config.boxes.count = 7;
    config.rates.ornaments = 3.5;
    std::fs::write(&path, config.to_json().unwrap()).unwrap();

    let loaded = SceneConfig::load(&path).unwrap();
    assert_eq!(loaded.boxes.count, 7);
    assert_eq!(loaded.rates.ornaments, 3.5);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    match SceneConfig::load(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert!(reported.ends_with("absent.json")),
        other => panic!("expected io error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ \"foliage\": ").unwrap();
    assert!(matches!(SceneConfig::load(file.path()), Err(ConfigError::Parse(_))));
}
