//! Integration tests for appshell

mod support;

mod cli_tests {
    use crate::support::{CURRENT, SHADOW};
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const MANIFEST: &str = "CACHE MANIFEST\n# v1\n/assets/app-v1.js\n\nNETWORK:\n*\n";

    /// appshell isolated from any real global or local config
    fn appshell(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("appshell");
        cmd.arg("--no-local")
            .arg("--config")
            .arg(config_dir.path().join("config.toml"));
        cmd
    }

    fn write_entry(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("index.html");
        fs::write(&path, CURRENT).unwrap();
        path
    }

    fn write_dist(dir: &Path, shadow: &str) {
        let shadow_body = CURRENT.replace(" manifest=\"/manifest.appcache\"", "");
        fs::write(dir.join("index.html"), CURRENT).unwrap();
        let shadow = if shadow.is_empty() { shadow_body.as_str() } else { shadow };
        fs::write(dir.join("appshell.html"), shadow).unwrap();
        fs::write(dir.join("manifest.appcache"), MANIFEST).unwrap();
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        appshell(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("cache-busting bootloader"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        appshell(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("appshell"));
    }

    #[test]
    fn snippet_prints_script_tag() {
        let dir = TempDir::new().unwrap();
        appshell(&dir)
            .arg("snippet")
            .assert()
            .success()
            .stdout(predicate::str::contains("<script src=\"/bootloader.js\"></script>"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        appshell(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        appshell(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[boot]"))
            .stdout(predicate::str::contains("check_timeout_ms = 500"));
    }

    #[test]
    fn config_set_then_show() {
        let dir = TempDir::new().unwrap();
        appshell(&dir)
            .args(["config", "set", "boot.check_timeout_ms", "250"])
            .assert()
            .success();

        appshell(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("check_timeout_ms = 250"));
    }

    #[test]
    fn config_set_rejects_unknown_key() {
        let dir = TempDir::new().unwrap();
        appshell(&dir)
            .args(["config", "set", "boot.nope", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn boot_idle_prints_document() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir);

        appshell(&dir)
            .args(["boot", "--status", "idle", "--entry"])
            .arg(&entry)
            .assert()
            .success()
            .stdout(predicate::str::contains("<title>v1</title>"))
            .stdout(predicate::str::contains("id=\"stale\""));
    }

    #[test]
    fn boot_without_cache() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir);

        appshell(&dir)
            .args(["boot", "--no-cache", "--entry"])
            .arg(&entry)
            .assert()
            .success()
            .stdout(predicate::str::contains("<title>v1</title>"));
    }

    #[test]
    fn boot_checking_times_out_into_boot() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir);

        appshell(&dir)
            .args(["boot", "--status", "checking", "--check-timeout-ms", "20", "--entry"])
            .arg(&entry)
            .assert()
            .success()
            .stdout(predicate::str::contains("<title>v1</title>"));
    }

    #[test]
    fn boot_checking_with_noupdate_event() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir);

        appshell(&dir)
            .args([
                "boot",
                "--status",
                "checking",
                "--event",
                "noupdate",
                "--event-delay-ms",
                "5",
                "--entry",
            ])
            .arg(&entry)
            .assert()
            .success();
    }

    #[test]
    fn boot_reports_unreachable_origin_after_booting() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir);

        appshell(&dir)
            .args(["boot", "--status", "downloading", "--origin", "http://127.0.0.1:9", "--entry"])
            .arg(&entry)
            .assert()
            .failure()
            .stdout(predicate::str::contains("<title>v1</title>"))
            .stderr(predicate::str::contains("Failed to fetch shadow index"));
    }

    #[test]
    fn boot_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir);
        let output = dir.path().join("booted.html");

        appshell(&dir)
            .args(["boot", "--status", "1", "--entry"])
            .arg(&entry)
            .arg("--output")
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache status: idle (1)"));

        let booted = fs::read_to_string(&output).unwrap();
        assert!(booted.starts_with("<!DOCTYPE html>"));
        assert!(booted.contains("manifest=\"/manifest.appcache\""));
    }

    #[test]
    fn boot_missing_entry_fails() {
        let dir = TempDir::new().unwrap();
        appshell(&dir)
            .args(["boot", "--entry"])
            .arg(dir.path().join("missing.html"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn check_consistent_dist_passes() {
        let dir = TempDir::new().unwrap();
        let dist = TempDir::new().unwrap();
        write_dist(dist.path(), "");

        appshell(&dir)
            .args(["check", "--dist"])
            .arg(dist.path())
            .assert()
            .success();
    }

    #[test]
    fn check_diverged_shadow_fails() {
        let dir = TempDir::new().unwrap();
        let dist = TempDir::new().unwrap();
        write_dist(dist.path(), SHADOW);

        appshell(&dir)
            .args(["check", "--dist"])
            .arg(dist.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("head or body differs"));
    }

    #[test]
    fn check_missing_manifest_fails() {
        let dir = TempDir::new().unwrap();
        let dist = TempDir::new().unwrap();
        write_dist(dist.path(), "");
        fs::remove_file(dist.path().join("manifest.appcache")).unwrap();

        appshell(&dir)
            .args(["check", "--dist"])
            .arg(dist.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("manifest.appcache"));
    }
}
