use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

const CATALOG: &str = r#"[
    {
        "name": "beta",
        "description": "Second plugin",
        "authors": [{ "name": "Y", "id": "2" }],
        "vendetta": { "original": "https://e.com/beta/" }
    },
    {
        "name": "Alpha",
        "description": "First plugin",
        "authors": [{ "name": "X" }],
        "vendetta": { "original": "https://e.com/alpha/", "icon": "ic_alpha" }
    }
]"#;

fn vdplugins(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vdplugins").unwrap();
    cmd.env("VDPLUGINS_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn write_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("plugins-full.json");
    std::fs::write(&path, CATALOG).unwrap();
    path
}

#[test]
fn test_search_lists_matches_and_share_link() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(temp_dir.path());

    vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["search", "al"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("by X"))
        .stdout(predicate::str::contains("https://e.com/alpha/"))
        .stdout(predicate::str::contains("beta").not())
        .stdout(predicate::str::contains("https://vd-plugins.github.io/web/#al"));
}

#[test]
fn test_empty_search_lists_whole_catalog() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(temp_dir.path());

    let output = vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog)
        .arg("search")
        .output()
        .unwrap();
    assert!(output.status.success());

    // Catalog order is reversed on load
    let stdout = String::from_utf8(output.stdout).unwrap();
    let alpha = stdout.find("Alpha").unwrap();
    let beta = stdout.find("beta").unwrap();
    assert!(alpha < beta);
}

#[test]
fn test_search_restores_query_from_share_link() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(temp_dir.path());

    vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["search", "--share", "https://vd-plugins.github.io/web/#bet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("Alpha").not());
}

#[test]
fn test_link_encodes_query() {
    let temp_dir = tempfile::tempdir().unwrap();

    vdplugins(temp_dir.path())
        .args(["link", "hello", "world"])
        .assert()
        .success()
        .stdout("https://vd-plugins.github.io/web/#hello%20world\n");
}

#[test]
fn test_link_round_trips_share_link() {
    let temp_dir = tempfile::tempdir().unwrap();

    vdplugins(temp_dir.path())
        .args(["link", "--share", "#caf%C3%A9%20%26%20more"])
        .assert()
        .success()
        .stdout("https://vd-plugins.github.io/web/#caf%C3%A9%20%26%20more\n");
}

#[test]
fn test_malformed_share_link_falls_back_to_empty_query() {
    let temp_dir = tempfile::tempdir().unwrap();

    vdplugins(temp_dir.path())
        .args(["link", "--share", "#%E0%A4%A"])
        .assert()
        .success()
        .stdout("https://vd-plugins.github.io/web/\n");
}

#[test]
fn test_config_set_and_get() {
    let temp_dir = tempfile::tempdir().unwrap();

    vdplugins(temp_dir.path())
        .args(["config", "debounce-ms", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("debounce-ms set to 400"));

    vdplugins(temp_dir.path())
        .args(["config", "debounce-ms"])
        .assert()
        .success()
        .stdout("400\n");

    vdplugins(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("debounce-ms = 400"))
        .stdout(predicate::str::contains("threshold = 0.3"));
}

#[test]
fn test_config_rejects_bad_values() {
    let temp_dir = tempfile::tempdir().unwrap();

    vdplugins(temp_dir.path())
        .args(["config", "threshold", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold must be between"));

    vdplugins(temp_dir.path())
        .args(["config", "colour"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn test_share_url_config_changes_links() {
    let temp_dir = tempfile::tempdir().unwrap();

    vdplugins(temp_dir.path())
        .args(["config", "share-url", "https://example.org/plugins/"])
        .assert()
        .success();

    vdplugins(temp_dir.path())
        .args(["link", "x"])
        .assert()
        .success()
        .stdout("https://example.org/plugins/#x\n");
}

#[test]
fn test_copy_without_match_warns() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(temp_dir.path());

    vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["copy", "zzzzzzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plugin matches \"zzzzzzzz\""));
}

#[test]
fn test_unreadable_catalog_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(temp_dir.path().join("missing.json"))
        .args(["search", "al"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Could not fetch plugins"));
}

#[test]
fn test_malformed_catalog_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = temp_dir.path().join("broken.json");
    std::fs::write(&catalog, "{ not json").unwrap();

    vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog)
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed catalog"));
}

#[test]
fn test_out_of_range_config_file_falls_back_to_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(temp_dir.path());
    std::fs::write(
        temp_dir.path().join("config.json"),
        r#"{"threshold": 1e300}"#,
    )
    .unwrap();

    vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["search", "al"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("beta").not())
        .stderr(predicate::str::contains("falling back to default configuration"));
}

#[test]
fn test_pipe_inside_a_word_is_not_an_alternative() {
    let temp_dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(temp_dir.path());

    vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["search", "^alpha|^beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plugins found."));

    vdplugins(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog)
        .args(["search", "^alpha", "|", "^beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("beta"));
}
