#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ATTRIBUTE: &str = "user.SYS:PACKAGE_FILE";

struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        for dir in ["files", "packages", "config"] {
            fs::create_dir_all(temp.path().join(dir)).expect("create dir");
        }
        Self { temp }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.temp.path().join(rel)
    }

    fn file(&self, name: &str) -> PathBuf {
        let path = self.path("files").join(name);
        fs::write(&path, b"data").expect("write file");
        path
    }

    fn log(&self) -> PathBuf {
        self.path("opened.log")
    }

    fn write_config(&self) -> PathBuf {
        let config = self.path("origin-package.toml");
        let contents = format!(
            r#"
[locations]
package_dirs = ['{packages}']

[launcher]
command = ["sh", "-c", "echo \"$0\" >> '{log}'"]

[timing]
settle_base_ms = 1
settle_per_package_ms = 1

[ui]
presenter = "terminal"
"#,
            packages = self.path("packages").display(),
            log = self.log().display(),
        );
        fs::write(&config, contents).expect("write config");
        config
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("origin-package").expect("binary exists");
        cmd.env("XDG_CONFIG_HOME", self.path("config"))
            .env_remove("ORIGIN_PACKAGE_DIRS")
            .env_remove("ORIGIN_PACKAGE_OPEN_COMMAND")
            .env_remove("ORIGIN_PACKAGE_PRESENTER")
            .arg("--config")
            .arg(self.write_config());
        cmd
    }

    fn opened(&self) -> Vec<String> {
        fs::read_to_string(self.log())
            .map(|log| log.lines().map(str::to_owned).collect())
            .unwrap_or_default()
    }
}

fn tag(path: &Path, package: &str) -> bool {
    xattr::set(path, ATTRIBUTE, package.as_bytes()).is_ok()
}

#[test]
fn opens_origin_package_and_reports_unattributed_file() {
    let workspace = Workspace::new();
    fs::write(workspace.path("packages").join("foo.hpkg"), b"hpkg").unwrap();
    let first = workspace.file("foo-bin");
    let second = workspace.file("foo-lib.so");
    let notes = workspace.file("notes.txt");
    if !tag(&first, "foo.hpkg") || !tag(&second, "foo.hpkg") {
        // The temp filesystem does not support user attributes.
        return;
    }

    workspace
        .command()
        .args([&first, &second, &notes])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "The file 'notes.txt' does not belong to any package.",
        ));

    let expected = workspace.path("packages").join("foo.hpkg");
    assert_eq!(workspace.opened(), [expected.display().to_string()]);
}

#[test]
fn reports_packages_missing_from_every_location() {
    let workspace = Workspace::new();
    let tool = workspace.file("tool");
    if !tag(&tool, "gone.hpkg") {
        return;
    }

    workspace
        .command()
        .arg(&tool)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "The package 'gone.hpkg' cannot be found.",
        ));
    assert!(workspace.opened().is_empty());
}

#[test]
fn large_selection_without_terminal_is_declined() {
    let workspace = Workspace::new();
    fs::write(workspace.path("packages").join("foo.hpkg"), b"hpkg").unwrap();
    let files: Vec<PathBuf> = (0..11)
        .map(|i| workspace.file(&format!("file-{i}")))
        .collect();
    for file in &files {
        tag(file, "foo.hpkg");
    }

    workspace
        .command()
        .args(&files)
        .assert()
        .success()
        .stderr(predicate::str::contains("You have selected 11 files."))
        .stderr(predicate::str::contains("does not belong").not());
    assert!(workspace.opened().is_empty());
}

#[test]
fn absolute_package_name_is_not_opened() {
    let workspace = Workspace::new();
    let outside = workspace.file("outside.bin");
    let tool = workspace.file("tool");
    if !tag(&tool, &outside.display().to_string()) {
        return;
    }

    workspace
        .command()
        .arg(&tool)
        .assert()
        .success()
        .stderr(predicate::str::contains("cannot be found"));
    assert!(workspace.opened().is_empty());
}

#[test]
fn reads_selection_from_script_host_environment() {
    let workspace = Workspace::new();
    let notes = workspace.file("notes.txt");

    workspace
        .command()
        .env("NAUTILUS_SCRIPT_SELECTED_FILE_PATHS", format!("{}\n", notes.display()))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "The file 'notes.txt' does not belong to any package.",
        ));
}
