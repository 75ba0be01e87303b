use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn dbm() -> Command {
    let mut cmd = Command::cargo_bin("dbm").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn decode_scenarios() {
    dbm().args(["decode", "engine", "MYSQL"]).assert().success().stdout("2\tMYSQL\n");
    dbm().args(["decode", "engine", "7"]).assert().success().stdout("7\tMONGODB\n");
    dbm().args(["decode", "engine", "null"]).assert().success().stdout("-1\tUNRECOGNIZED\n");
    dbm()
        .args(["decode", "engine", "NOT_A_REAL_ENGINE"])
        .assert()
        .success()
        .stdout("-1\tUNRECOGNIZED\n");
}

#[test]
fn encode_scenarios() {
    dbm().args(["encode", "engine", "2"]).assert().success().stdout("MYSQL\n");
    dbm().args(["encode", "engine", "-1"]).assert().success().stdout("UNRECOGNIZED\n");
    dbm().args(["encode", "engine", "0"]).assert().success().stdout("ENGINE_UNSPECIFIED\n");
}

#[test]
fn vocab_lists_the_table() {
    dbm()
        .args(["vocab", "vcs_type"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(" -1  UNRECOGNIZED\n  0  VCS_TYPE_UNSPECIFIED\n"))
        .stdout(predicate::str::contains("AZURE_DEVOPS"));
}

#[test]
fn unknown_vocabulary_fails() {
    dbm()
        .args(["vocab", "color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown vocabulary `color`"));
}

#[test]
fn exports_lists_bindings() {
    dbm()
        .arg("exports")
        .assert()
        .success()
        .stdout(predicate::str::contains("upsert_instance"))
        .stdout(predicate::str::contains("masking_level_for"));
}

#[test]
fn config_file_drives_logging() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[logging]\nlevel = \"trace\"\njson = true").unwrap();

    dbm()
        .args(["decode", "engine", "FUTURE"])
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout("-1\tUNRECOGNIZED\n")
        .stderr(predicate::str::contains("\"level\":\"TRACE\""));
}

#[test]
fn invalid_config_level_fails() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[logging]\nlevel = \"loud\"").unwrap();

    dbm()
        .args(["vocab", "state", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid logging.level"));
}

#[test]
fn missing_config_file_fails() {
    dbm()
        .args(["vocab", "state", "--config", "/nonexistent/dbm.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}
