/// Integration tests for the treemenu binary
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_menu() -> &'static str {
    r#"{
        "name": "Root",
        "children": [
            {
                "name": "Docs",
                "children": [
                    { "name": "Intro", "link": "/docs/intro" }
                ]
            },
            { "name": "About", "link": "/about" }
        ]
    }"#
}

fn write_menu(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("menu.json");
    std::fs::write(&path, sample_menu()).expect("Failed to write menu document");
    path
}

fn treemenu() -> Command {
    Command::cargo_bin("treemenu").expect("binary should build")
}

#[test]
fn test_show_lists_local_menu() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);
    let session = temp_dir.path().join("session.json");

    let assert = treemenu()
        .arg("show")
        .arg(&menu)
        .arg("--session")
        .arg(&session)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("Docs"));
    assert!(stdout.contains("(/about)"));
    // A session record is left behind for the next run.
    assert!(session.exists());
}

#[test]
fn test_show_unreachable_source_prints_fallback() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let session = temp_dir.path().join("session.json");

    let assert = treemenu()
        .arg("show")
        .arg(temp_dir.path().join("missing.json"))
        .arg("--session")
        .arg(&session)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("Main Page"));
}

#[test]
fn test_add_link_derives_url_from_parent_chain() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);

    treemenu()
        .arg("add")
        .arg(&menu)
        .arg("Docs")
        .arg("--link")
        .arg("Getting Started")
        .arg("--url-root")
        .arg("/help")
        .assert()
        .success();

    let saved = std::fs::read_to_string(&menu).expect("Failed to read menu document");
    assert!(saved.contains("Getting Started"));
    assert!(saved.contains("/help/docs/getting-started"));
}

#[test]
fn test_add_rejects_non_folder_parent() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);

    treemenu()
        .arg("add")
        .arg(&menu)
        .arg("About")
        .arg("--folder")
        .arg("Team")
        .assert()
        .failure();

    let saved = std::fs::read_to_string(&menu).expect("Failed to read menu document");
    assert!(!saved.contains("Team"));
}

#[test]
fn test_edit_renames_link() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);

    treemenu()
        .arg("edit")
        .arg(&menu)
        .arg("Docs/Intro")
        .arg("--name")
        .arg("Overview")
        .arg("--url")
        .arg("/docs/overview")
        .assert()
        .success();

    let saved = std::fs::read_to_string(&menu).expect("Failed to read menu document");
    assert!(saved.contains("Overview"));
    assert!(saved.contains("/docs/overview"));
    assert!(!saved.contains("Intro"));
}

#[test]
fn test_rm_requires_confirmation() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);

    let assert = treemenu()
        .arg("rm")
        .arg(&menu)
        .arg("Docs/Intro")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("not deleted"));
    let saved = std::fs::read_to_string(&menu).expect("Failed to read menu document");
    assert!(saved.contains("Intro"));
}

#[test]
fn test_rm_with_yes_removes_subtree() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);

    treemenu()
        .arg("rm")
        .arg(&menu)
        .arg("Docs")
        .arg("--yes")
        .assert()
        .success();

    let saved = std::fs::read_to_string(&menu).expect("Failed to read menu document");
    assert!(!saved.contains("Docs"));
    assert!(!saved.contains("Intro"));
    assert!(saved.contains("About"));
}

#[test]
fn test_mv_up_swaps_siblings() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);

    treemenu()
        .arg("mv")
        .arg(&menu)
        .arg("About")
        .arg("--up")
        .assert()
        .success();

    let saved = std::fs::read_to_string(&menu).expect("Failed to read menu document");
    let about = saved.find("About").expect("About should survive the move");
    let docs = saved.find("Docs").expect("Docs should survive the move");
    assert!(about < docs);
}

#[test]
fn test_mv_into_nests_under_sibling_folder() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);

    treemenu()
        .arg("mv")
        .arg(&menu)
        .arg("About")
        .arg("--into")
        .arg("Docs")
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&menu).expect("read"))
            .expect("menu document should stay valid JSON");
    let children = saved["children"].as_array().expect("root children");
    assert_eq!(children.len(), 1);
    let docs_children = children[0]["children"].as_array().expect("Docs children");
    assert_eq!(docs_children.last().map(|c| c["name"].as_str()), Some(Some("About")));
}

#[test]
fn test_mv_rejects_conflicting_flags() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let menu = write_menu(&temp_dir);

    treemenu()
        .arg("mv")
        .arg(&menu)
        .arg("About")
        .arg("--up")
        .arg("--down")
        .assert()
        .failure();
}
