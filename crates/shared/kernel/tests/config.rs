use dbm_domain::config::ClientConfig;
use dbm_kernel::config::{ConfigError, load_config};
use std::fs;

#[test]
fn loads_toml_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("client.toml");
    fs::write(&path, "[logging]\nlevel = \"debug\"\njson = true\n").expect("write config");

    let cfg: ClientConfig = load_config(Some(&path)).expect("config loads");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert!(cfg.logging.filter.is_none());
}

#[test]
fn no_file_falls_back_to_defaults() {
    let cfg: ClientConfig = load_config(None::<&str>).expect("defaults load");
    assert!(!cfg.logging.level.is_empty());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = load_config::<ClientConfig>(Some(&path)).expect_err("missing file");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}

#[test]
fn mistyped_values_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("client.toml");
    fs::write(&path, "[logging]\njson = \"sometimes\"\n").expect("write config");

    assert!(load_config::<ClientConfig>(Some(&path)).is_err());
}
