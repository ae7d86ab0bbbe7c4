use assert_cmd::Command;
use predicates::prelude::*;

fn command() -> Command {
    let mut cmd = Command::cargo_bin("origin-package").expect("binary exists");
    cmd.env_remove("NAUTILUS_SCRIPT_SELECTED_FILE_PATHS")
        .env_remove("NEMO_SCRIPT_SELECTED_FILE_PATHS")
        .env_remove("CAJA_SCRIPT_SELECTED_FILE_PATHS")
        .env_remove("ORIGIN_PACKAGE_DIRS")
        .env_remove("ORIGIN_PACKAGE_OPEN_COMMAND")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_displays_usage() {
    command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn standalone_invocation_fails_with_diagnostic() {
    command()
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'Open Origin Package' can only be used as a file manager add-on.",
        ));
}

#[test]
fn missing_explicit_config_is_an_error() {
    command()
        .args(["--config", "/no/such/origin-package.toml", "/tmp/anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
