//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::path::PathBuf;

use corridor::config::{AppConfig, SmoothingMode};
use serial_test::serial;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("corridor-config-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    let config = AppConfig::load().unwrap();
    let builtin = AppConfig::default();

    assert_eq!(config.scroll.start_z, builtin.scroll.start_z);
    assert_eq!(config.scroll.end_z, builtin.scroll.end_z);
    assert_eq!(config.corridor.segment_length, builtin.corridor.segment_length);
    assert_eq!(config.parallax.look_at, builtin.parallax.look_at);
    assert_eq!(config.navigation.sections.len(), 3);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("CORRIDOR_WINDOW__TITLE", "Test From Env");
    std::env::set_var("CORRIDOR_SCROLL__SPEED", "0.02");
    let config = AppConfig::load();
    std::env::remove_var("CORRIDOR_WINDOW__TITLE");
    std::env::remove_var("CORRIDOR_SCROLL__SPEED");

    let config = config.unwrap();
    assert_eq!(config.window.title, "Test From Env");
    assert_eq!(config.scroll.speed, 0.02);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = scratch_dir("user");
    std::fs::write(
        dir.join("default.toml"),
        "[scroll]\nstart_z = 8.0\nend_z = -15.0\n\n[corridor]\nsegment_length = 40.0\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("user.toml"),
        "[corridor]\nsegment_length = 20.0\n\n[scroll.smoothing]\nmode = \"half_life\"\nfactor = 0.1\nhalf_life = 0.2\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(config.corridor.segment_length, 20.0);
    assert_eq!(config.scroll.end_z, -15.0);
    assert_eq!(config.scroll.smoothing.mode, SmoothingMode::HalfLife);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.title, "Corridor");
    assert_eq!(config.corridor.window_radius, 2);
}

#[test]
#[serial]
fn test_invalid_value_is_reported() {
    let dir = scratch_dir("invalid");
    std::fs::write(dir.join("default.toml"), "[corridor]\nwindow_radius = \"wide\"\n").unwrap();

    let result = AppConfig::load_from(&dir);
    std::fs::remove_dir_all(&dir).ok();

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error:"));
}
