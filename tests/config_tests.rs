//! Configuration system tests
//!
//! Tests configuration loading, validation, and environment overrides

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use jury_personas::config::JuryConfig;
use jury_personas::error::ErrorCode;

/// Test fixture for configuration testing
struct ConfigFixture {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl ConfigFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        Self {
            temp_dir,
            config_path,
        }
    }

    fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).unwrap();
    }

    fn path(&self) -> &str {
        self.config_path.to_str().unwrap()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("jury-personas").unwrap();
        cmd.current_dir(self.temp_dir.path())
            .env("HOME", self.temp_dir.path())
            .env("XDG_CONFIG_HOME", self.temp_dir.path());
        for var in [
            "JURY_CONFIG",
            "JURY_PERSONAS_DIR",
            "JURY_SIZE",
            "JURY_SKEPTIC_MINIMUM",
            "JURY_SEED",
            "JURY_LOG_LEVEL",
            "JURY_LOG_FILE",
            "JURY_LOG_JSON",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }
}

// ─────────────────────────────────────────────────────────────────
// Valid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_empty_config_uses_defaults() {
    let fixture = ConfigFixture::new();
    fixture.write_config("");

    let config = JuryConfig::load(Some(fixture.path())).unwrap();
    assert_eq!(config.jury.size, 100);
    assert_eq!(config.jury.skeptic_minimum, 0.15);
    assert_eq!(config.personas.root, "personas");
}

#[test]
fn test_full_config() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[personas]
root = "/srv/elmer/personas"

[jury]
size = 40
skeptic_minimum = 0.25
seed = 1234

[logging]
level = "debug"
file = "/tmp/jury.log"
max_file_size_mb = 50
max_files = 3
json_format = true
"#,
    );

    fixture
        .cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .success();

    fixture
        .cmd()
        .args(["config", "show", "--config", fixture.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/elmer/personas"))
        .stdout(predicate::str::contains("size = 40"))
        .stdout(predicate::str::contains("seed = 1234"));
}

#[test]
fn test_config_file_in_working_directory_is_found() {
    let fixture = ConfigFixture::new();
    fs::write(
        fixture.temp_dir.path().join("jury-personas.toml"),
        "[jury]\nsize = 7\n",
    )
    .unwrap();

    fixture
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("size = 7"));
}

#[test]
fn test_home_config_comes_from_fixture_home() {
    let fixture = ConfigFixture::new();
    fixture
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("size = 100"));

    let home_config = fixture.temp_dir.path().join(".jury-personas");
    fs::create_dir_all(&home_config).unwrap();
    fs::write(home_config.join("config.toml"), "[jury]\nsize = 9\n").unwrap();

    fixture
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("size = 9"));
}

// ─────────────────────────────────────────────────────────────────
// Invalid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_skeptic_minimum() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[jury]\nskeptic_minimum = 2.0\n");

    let err = JuryConfig::load(Some(fixture.path())).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConfigValidation);

    fixture
        .cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .failure()
        .code(10);
}

#[test]
fn test_invalid_jury_size() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[jury]\nsize = 0\n");

    fixture
        .cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_invalid_log_level() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[logging]\nlevel = \"invalid_level\"\n");

    fixture
        .cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .failure();
}

#[test]
fn test_malformed_toml() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[jury\nsize = 5\n");

    let err = JuryConfig::load(Some(fixture.path())).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ConfigParseError);

    fixture
        .cmd()
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E101"));
}

#[test]
fn test_missing_explicit_config() {
    let fixture = ConfigFixture::new();
    fixture
        .cmd()
        .args(["config", "show", "--config", "/nonexistent/jury.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config init"));
}

// ─────────────────────────────────────────────────────────────────
// Environment Override Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[jury]\nsize = 40\n");

    fixture
        .cmd()
        .env("JURY_SIZE", "12")
        .env("JURY_SEED", "99")
        .env("JURY_PERSONAS_DIR", "/data/personas")
        .args(["config", "show", "--config", fixture.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("size = 12"))
        .stdout(predicate::str::contains("seed = 99"))
        .stdout(predicate::str::contains("/data/personas"));
}

#[test]
fn test_env_override_is_validated() {
    let fixture = ConfigFixture::new();
    fixture
        .cmd()
        .env("JURY_SKEPTIC_MINIMUM", "-0.5")
        .args(["config", "validate"])
        .assert()
        .failure()
        .code(10);
}
