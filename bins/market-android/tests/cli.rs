use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let android = dir.path().join("android");
    std::fs::create_dir_all(android.join("app")).unwrap();
    for (name, content) in files {
        std::fs::write(android.join(name), content).unwrap();
    }
    dir
}

fn cli(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("market-android").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color").arg("--root").arg(root);
    cmd
}

#[test]
fn resolve_json_uses_defaults_without_property_files() {
    let dir = project(&[]);

    let output = cli(dir.path()).args(["resolve", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["applicationId"], "com.susse.market");
    assert_eq!(json["versionCode"], 1);
    assert_eq!(json["versionName"], "1.0.0");
    assert_eq!(json["signing"]["status"], "unsigned");
}

#[test]
fn resolve_json_reads_property_files_and_redacts_passwords() {
    let dir = project(&[
        ("local.properties", "flutter.versionCode=42\nflutter.versionName=2.3.1\n"),
        ("key.properties", "keyAlias=upload\nkeyPassword=hunter2\n"),
    ]);

    let output = cli(dir.path()).args(["resolve", "--json"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("hunter2"));

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["versionCode"], 42);
    assert_eq!(json["versionName"], "2.3.1");
    assert_eq!(json["buildType"], "release");
    assert_eq!(json["signing"]["status"], "partial");
    assert_eq!(json["signing"]["keyAlias"], "upload");
    assert!(json["signing"]["storeFile"].is_null());
}

#[test]
fn resolve_debug_build_type_leaves_out_release_signing() {
    let dir = project(&[("key.properties", "keyAlias=upload\n")]);

    let output = cli(dir.path())
        .args(["resolve", "--json", "--build-type", "debug"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("upload"));
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["buildType"], "debug");
    assert!(json["signing"].is_null());

    cli(dir.path())
        .args(["resolve", "--build-type", "debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signing (debug)"))
        .stdout(predicate::str::contains("debug keystore"))
        .stdout(predicate::str::contains("upload").not());
}

#[test]
fn resolve_release_build_type_shows_release_signing() {
    let dir = project(&[("key.properties", "keyAlias=upload\n")]);

    cli(dir.path())
        .args(["resolve", "--build-type", "release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signing (release)"))
        .stdout(predicate::str::contains("upload"));
}

#[test]
fn resolve_accepts_zero_version_code() {
    let dir = project(&[("local.properties", "flutter.versionCode=0\n")]);

    let output = cli(dir.path()).args(["resolve", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["versionCode"], 0);
}

#[test]
fn resolve_honours_project_config() {
    let dir = project(&[]);
    std::fs::write(
        dir.path().join(".market-build.toml"),
        "[android]\napplication_id = \"com.example.shop\"\nmin_sdk = 26\n",
    )
    .unwrap();

    let output = cli(dir.path()).args(["resolve", "--json"]).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["applicationId"], "com.example.shop");
    assert_eq!(json["sdk"]["min"], 26);
}

#[test]
fn invalid_version_code_exits_with_config_error() {
    let dir = project(&[("local.properties", "flutter.versionCode=abc\n")]);

    cli(dir.path())
        .arg("resolve")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("flutter.versionCode"))
        .stderr(predicate::str::contains("abc"));
}

#[test]
fn malformed_source_names_the_file() {
    let dir = project(&[("key.properties", "keyAlias upload\n")]);

    cli(dir.path())
        .arg("resolve")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("key.properties"))
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn check_release_fails_on_partial_signing() {
    let dir = project(&[("key.properties", "keyAlias=foo\n")]);

    cli(dir.path())
        .args(["check", "--release"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("keyPassword"))
        .stderr(predicate::str::contains("storeFile"));
}

#[test]
fn check_without_release_only_warns() {
    let dir = project(&[]);

    cli(dir.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("unsigned"));
}

#[test]
fn check_release_passes_with_complete_signing() {
    let dir = project(&[(
        "key.properties",
        "storePassword=a\nkeyPassword=b\nkeyAlias=upload\nstoreFile=upload.jks\n",
    )]);
    std::fs::write(dir.path().join("android/app/upload.jks"), b"keystore").unwrap();

    cli(dir.path())
        .args(["check", "--release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn sources_lists_keys_without_values() {
    let dir = project(&[("key.properties", "keyAlias=upload\nstorePassword=hunter2\n")]);

    cli(dir.path())
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("storePassword"))
        .stdout(predicate::str::contains("hunter2").not())
        .stdout(predicate::str::contains("absent"));
}

#[test]
fn missing_explicit_config_exits_with_config_error() {
    let dir = project(&[]);

    cli(dir.path())
        .args(["--config", "does-not-exist.toml", "resolve"])
        .assert()
        .code(3);
}
