use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run kintai with colors disabled.
fn kintai() -> Command {
    let mut cmd = cargo_bin_cmd!("kintai");
    cmd.env("NO_COLOR", "1").env("CLICOLOR", "0").env_remove("RUST_LOG");
    cmd
}

// ─── Init command ───────────────────────────────────────────────

#[test]
fn init_creates_config_and_export_dir() {
    let dir = assert_fs::TempDir::new().unwrap();

    kintai()
        .current_dir(dir.path())
        .args(["init", "--channel", "attendance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated config.toml"))
        .stdout(predicate::str::contains("attendance.jsonl"));

    dir.child(".kintai/config.toml")
        .assert(predicate::str::contains("channel = \"attendance\""));
    dir.child(".kintai/channels").assert(predicate::path::is_dir());
}

#[test]
fn init_twice_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    kintai()
        .current_dir(dir.path())
        .args(["init", "--channel", "general"])
        .assert()
        .success();

    kintai()
        .current_dir(dir.path())
        .args(["init", "--channel", "general"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_rejects_path_like_channel() {
    let dir = assert_fs::TempDir::new().unwrap();

    kintai()
        .current_dir(dir.path())
        .args(["init", "--channel", "../escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("plain file name"));

    dir.child(".kintai").assert(predicate::path::missing());
}

// ─── Classify / categories ──────────────────────────────────────

#[test]
fn classify_picks_leftmost_marker() {
    kintai()
        .args(["classify", "🍺 then :teiji:"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nomikai"));

    kintai()
        .args(["classify", ":teiji: then 🍺"])
        .assert()
        .success()
        .stdout(predicate::str::contains("teiji"));
}

#[test]
fn classify_reports_missing_marker() {
    kintai()
        .args(["classify", "just a normal message"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No category marker found"));
}

#[test]
fn categories_lists_markers_and_colors() {
    kintai()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains(":zangyo:"))
        .stdout(predicate::str::contains("#ff2424"))
        .stdout(predicate::str::contains("🍺 🍻"));
}

// ─── Status command ─────────────────────────────────────────────

#[test]
fn status_before_sync_shows_empty_cache() {
    let dir = assert_fs::TempDir::new().unwrap();

    kintai()
        .current_dir(dir.path())
        .args(["init", "--channel", "general"])
        .assert()
        .success();

    kintai()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("general"))
        .stdout(predicate::str::contains("Channel export not found"))
        .stdout(predicate::str::is_match(r"Records:\s+0").unwrap())
        .stdout(predicate::str::contains("Run 'kintai sync'"));
}

#[test]
fn status_after_sync_counts_records() {
    let dir = assert_fs::TempDir::new().unwrap();

    kintai()
        .current_dir(dir.path())
        .args(["init", "--channel", "general"])
        .assert()
        .success();
    dir.child(".kintai/channels/general.jsonl")
        .write_str(
            r#"{"id":"1","text":":yukyu:","author":"<@9>","created_at":"2026-04-01T08:00:00Z"}"#,
        )
        .unwrap();

    kintai().current_dir(dir.path()).arg("sync").assert().success();

    kintai()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Records:\s+1").unwrap())
        .stdout(predicate::str::contains("2026-04-01"))
        .stdout(predicate::str::contains("Run 'kintai sync'").not());
}

#[test]
fn status_requires_init() {
    let dir = assert_fs::TempDir::new().unwrap();

    kintai()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("kintai init"));
}
