use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn deployer_cmd() -> Command {
    let mut cmd = Command::cargo_bin("nexus-deployer").unwrap();
    cmd.env_remove("NEXUS_USERNAME")
        .env_remove("NEXUS_PASSWORD")
        .env_remove("MOCK_NEXUS");
    cmd
}

const WIDGET: [&str; 12] = [
    "--group-id",
    "com.acme",
    "--artifact-id",
    "widget",
    "--packaging",
    "jar",
    "--artifact",
    "widget.jar",
    "--pom-dir",
    "poms",
    "--url",
    "http://repo.local/maven",
];

#[test]
fn test_dry_run_prints_plan_without_staging() {
    let tmp = TempDir::new().unwrap();

    deployer_cmd()
        .current_dir(tmp.path())
        .args(["deploy", "--dry-run", "--version", "1.2.3"])
        .args(WIDGET)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "http://repo.local/maven/com/acme/widget/maven-metadata.xml",
        ))
        .stdout(predicate::str::contains(
            "http://repo.local/maven/com/acme/widget/1.2.3/widget-1.2.3.jar",
        ))
        .stdout(predicate::str::contains(
            "http://repo.local/maven/com/acme/widget/1.2.3/widget-1.2.3.pom",
        ))
        .stdout(predicate::str::contains("1.2.3/maven-metadata.xml").not());

    assert!(!tmp.path().join("poms").exists());
}

#[test]
fn test_dry_run_with_classifier_and_snapshot() {
    let tmp = TempDir::new().unwrap();

    deployer_cmd()
        .current_dir(tmp.path())
        .args([
            "deploy",
            "--dry-run",
            "--version",
            "1.0-SNAPSHOT",
            "--classifier",
            "sources",
        ])
        .args(WIDGET)
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0-SNAPSHOT/maven-metadata.xml"))
        .stdout(predicate::str::contains("widget-1.0-SNAPSHOT-sources.jar"))
        .stdout(predicate::str::contains("widget-1.0-SNAPSHOT.pom"));
}

#[test]
fn test_version_from_package_json() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("package.json"),
        r#"{ "name": "widget", "version": "4.5.6" }"#,
    )
    .unwrap();

    deployer_cmd()
        .current_dir(tmp.path())
        .args(["deploy", "--dry-run", "--version-from", "package.json"])
        .args(WIDGET)
        .assert()
        .success()
        .stdout(predicate::str::contains("widget-4.5.6.jar"));
}

#[test]
fn test_bare_version_from_reads_default_package_json() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("package.json"),
        r#"{ "name": "widget", "version": "7.0.1" }"#,
    )
    .unwrap();

    deployer_cmd()
        .current_dir(tmp.path())
        .args(["deploy", "--dry-run"])
        .args(WIDGET)
        .arg("--version-from")
        .assert()
        .success()
        .stdout(predicate::str::contains("widget-7.0.1.jar"));
}

#[test]
fn test_missing_url_is_reported() {
    let tmp = TempDir::new().unwrap();

    deployer_cmd()
        .current_dir(tmp.path())
        .args([
            "deploy",
            "--group-id",
            "com.acme",
            "--artifact-id",
            "widget",
            "--version",
            "1.0",
            "--packaging",
            "jar",
            "--artifact",
            "widget.jar",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("url is required"));
}

#[test]
fn test_unreachable_repository_fails_after_staging() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("widget.jar"), b"jar-bytes").unwrap();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/maven", listener.local_addr().unwrap());
    drop(listener);

    deployer_cmd()
        .current_dir(tmp.path())
        .args(["deploy", "--version", "1.2.3", "--quiet"])
        .args(&WIDGET[..10])
        .args(["--url", url.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Upload to"));

    assert!(tmp.path().join("poms/outer.xml").is_file());
}
