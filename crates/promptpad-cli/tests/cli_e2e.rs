use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn promptpad(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("promptpad").unwrap();
    cmd.env("PROMPTPAD_DATA", data_dir.path().as_os_str());
    cmd
}

#[test]
fn test_add_list_show_workflow() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["add", "Greeting", "--content", "Hello there"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created \"Greeting\""));

    promptpad(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Greeting"));

    promptpad(&data)
        .args(["show", "Greeting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello there"));
}

#[test]
fn test_naked_invocation_lists() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("No prompts found"));
}

#[test]
fn test_add_reads_piped_stdin() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["add", "Piped"])
        .write_stdin("content from a pipe")
        .assert()
        .success();

    promptpad(&data)
        .args(["show", "Piped"])
        .assert()
        .success()
        .stdout(predicate::str::contains("content from a pipe"));
}

#[test]
fn test_add_rejects_empty_content() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["add", "Empty"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("content must not be empty"));
}

#[test]
fn test_edit_and_duplicate() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["add", "Draft", "--content", "v1"])
        .assert()
        .success();

    promptpad(&data)
        .args(["edit", "Draft", "--content", "v2"])
        .assert()
        .success();

    promptpad(&data)
        .args(["show", "Draft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v2"));

    promptpad(&data)
        .args(["dup", "Draft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft (copy)"));
}

#[test]
fn test_folder_workflow_with_cascade() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["folder", "add", "Work"])
        .assert()
        .success();

    promptpad(&data)
        .args(["add", "Filed", "--content", "c", "--folder", "Work"])
        .assert()
        .success();

    promptpad(&data)
        .args(["list", "--folder", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filed"));

    promptpad(&data)
        .args(["folder", "rm", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 prompts now unfiled"));

    // The prompt survives its folder.
    promptpad(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filed"));
}

#[test]
fn test_tag_filtering() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["add", "Tagged", "--content", "c", "--tags", "rust,cli"])
        .assert()
        .success();
    promptpad(&data)
        .args(["add", "Plain", "--content", "c"])
        .assert()
        .success();

    promptpad(&data)
        .args(["list", "--tag", "rust"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Tagged").and(predicate::str::contains("Plain").not()),
        );
}

#[test]
fn test_export_import_roundtrip() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let file = source.path().join("backup.json");

    promptpad(&source)
        .args(["add", "Portable", "--content", "c"])
        .assert()
        .success();

    promptpad(&source)
        .args(["export", "--output", file.to_str().unwrap()])
        .assert()
        .success();

    promptpad(&target)
        .args(["import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 prompts"));

    promptpad(&target)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Portable"));
}

#[test]
fn test_import_rejects_malformed_document() {
    let data = TempDir::new().unwrap();
    let file = data.path().join("bad.json");
    fs::write(&file, r#"{"version":"1.0.0"}"#).unwrap();

    promptpad(&data)
        .args(["add", "Keep", "--content", "c"])
        .assert()
        .success();

    promptpad(&data)
        .args(["import", file.to_str().unwrap()])
        .assert()
        .failure();

    // Existing data untouched.
    promptpad(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep"));
}

#[test]
fn test_clear_requires_confirmation() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["add", "Precious", "--content", "c"])
        .assert()
        .success();

    promptpad(&data)
        .args(["clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    promptpad(&data)
        .args(["clear", "--yes"])
        .assert()
        .success();

    promptpad(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No prompts found"));
}

#[test]
fn test_settings_set_and_show() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["settings", "set", "theme", "dark"])
        .assert()
        .success();

    promptpad(&data)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme = dark"));

    promptpad(&data)
        .args(["settings", "set", "bogus", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown setting"));
}

#[test]
fn test_view_mode_is_remembered() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["add", "Entry", "--content", "first line\nsecond line"])
        .assert()
        .success();

    promptpad(&data)
        .args(["list", "--view", "list"])
        .assert()
        .success();

    // Card preview line only shows in cards mode; after switching, a plain
    // list run stays in list mode.
    promptpad(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first line").not());
}

#[test]
fn test_listing_shows_short_ids() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["add", "Idful", "--content", "c"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\([0-9a-f]{8}\)").unwrap());

    promptpad(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"[0-9a-f]{8}").unwrap());
}

#[test]
fn test_show_by_id_prefix() {
    let data = TempDir::new().unwrap();

    let out = promptpad(&data)
        .args(["add", "Prefixed", "--content", "unique body"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    let prefix = stdout
        .split('(')
        .nth(1)
        .unwrap()
        .trim()
        .trim_end_matches(')');

    promptpad(&data)
        .args(["show", prefix])
        .assert()
        .success()
        .stdout(predicate::str::contains("unique body"));
}

#[test]
fn test_unknown_prompt_reference_fails() {
    let data = TempDir::new().unwrap();

    promptpad(&data)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no prompt matching"));
}
