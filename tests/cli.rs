mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

use common::{write_icons, write_vsix};

#[test]
fn prints_the_outline() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_icons(dir.path(), &["file", "vsix"]);
    let path = write_vsix(
        dir.path(),
        "demo.vsix",
        &["extension.vsixmanifest", "extension/", "extension/readme.md"],
    );

    let mut cmd = Command::cargo_bin("vsix-outline")?;
    cmd.arg(&path).arg("--assets").arg(dir.path());
    cmd.assert().success().stdout(
        predicate::str::contains("▾ demo.vsix  [vsix]")
            .and(predicate::str::contains("  ▸ extension  [folder]"))
            .and(predicate::str::contains("    readme.md  [file]"))
            .and(predicate::str::contains("extension.vsixmanifest  [file]")),
    );

    Ok(())
}

#[test]
fn depth_limits_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write_vsix(dir.path(), "demo.vsix", &["extension/readme.md"]);

    let mut cmd = Command::cargo_bin("vsix-outline")?;
    cmd.arg(&path).arg("--depth").arg("1").arg("--no-icons");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("extension").and(predicate::str::contains("readme.md").not()));

    Ok(())
}

#[test]
fn fails_on_corrupt_package() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.vsix");
    std::fs::write(&path, b"not a zip")?;

    let mut cmd = Command::cargo_bin("vsix-outline")?;
    cmd.arg(&path).arg("-q");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));

    Ok(())
}
