use std::collections::BTreeSet;
use std::path::Path;

use nexus_deployer_core::request::DeploymentRequest;
use nexus_deployer_maven::staging::{save, stage, stage_artifact_digests};
use nexus_deployer_util::errors::DeployError;
use nexus_deployer_util::hash::{md5_bytes, sha1_bytes, Digests};
use tempfile::TempDir;

const TS: &str = "11111111111111";
const JAR: &[u8] = b"PK\x03\x04 not really a jar \x00\xff";

fn request(tmp: &TempDir, version: &str) -> DeploymentRequest {
    let artifact = tmp.path().join("widget.jar");
    std::fs::write(&artifact, JAR).unwrap();
    let mut req = DeploymentRequest::new(
        "com.acme",
        "widget",
        version,
        "jar",
        artifact,
        "http://repo.local/maven",
    );
    req.pom_dir = Some(tmp.path().join("poms"));
    req.quiet = true;
    req
}

fn listing(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

fn assert_sidecars_verify(path: &Path) {
    let content = std::fs::read(path).unwrap();
    let md5 = std::fs::read_to_string(format!("{}.md5", path.display())).unwrap();
    let sha1 = std::fs::read_to_string(format!("{}.sha1", path.display())).unwrap();
    assert_eq!(md5, md5_bytes(&content), "md5 of {}", path.display());
    assert_eq!(sha1, sha1_bytes(&content), "sha1 of {}", path.display());
}

#[test]
fn test_save_writes_content_and_sidecars() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("a").join("b");
    let path = save("<metadata/>", &dir, "outer.xml").unwrap();
    assert_eq!(path, dir.join("outer.xml"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "<metadata/>");
    assert_sidecars_verify(&path);
}

#[test]
fn test_stage_release_files() {
    let tmp = TempDir::new().unwrap();
    let req = request(&tmp, "1.2.3");
    let staged = stage(&req, TS).unwrap();

    let expected: BTreeSet<String> = [
        "outer.xml",
        "outer.xml.md5",
        "outer.xml.sha1",
        "pom.xml",
        "pom.xml.md5",
        "pom.xml.sha1",
        "artifact.jar.md5",
        "artifact.jar.sha1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(listing(&staged.dir), expected);
    assert!(staged.inner.is_none());
    assert_eq!(staged.files().len(), 6);

    assert_sidecars_verify(&staged.outer);
    assert_sidecars_verify(&staged.pom);
}

#[test]
fn test_stage_snapshot_adds_inner_metadata() {
    let tmp = TempDir::new().unwrap();
    let req = request(&tmp, "1.0.0-snapshot");
    let staged = stage(&req, TS).unwrap();

    let files = listing(&staged.dir);
    assert_eq!(files.len(), 11);
    for name in ["inner.xml", "inner.xml.md5", "inner.xml.sha1"] {
        assert!(files.contains(name), "missing {name}");
    }
    assert_sidecars_verify(staged.inner.as_ref().unwrap());
    assert_eq!(staged.files().len(), 9);
}

#[test]
fn test_artifact_digests_match_content() {
    let tmp = TempDir::new().unwrap();
    let req = request(&tmp, "1.2.3");
    let staged = stage(&req, TS).unwrap();

    assert_eq!(staged.artifact_digests, Digests::of_bytes(JAR));
    let dir = req.pom_dir();
    assert_eq!(
        std::fs::read_to_string(dir.join("artifact.jar.md5")).unwrap(),
        md5_bytes(JAR)
    );
    assert_eq!(
        std::fs::read_to_string(dir.join("artifact.jar.sha1")).unwrap(),
        sha1_bytes(JAR)
    );
    assert!(!dir.join("widget.jar").exists());
}

#[test]
fn test_staging_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    let req = request(&tmp, "2.0.0-SNAPSHOT");

    let first = stage(&req, TS).unwrap();
    let outer_a = std::fs::read(&first.outer).unwrap();
    let sha_a = std::fs::read(first.dir.join("pom.xml.sha1")).unwrap();

    let second = stage(&req, TS).unwrap();
    assert_eq!(std::fs::read(&second.outer).unwrap(), outer_a);
    assert_eq!(std::fs::read(second.dir.join("pom.xml.sha1")).unwrap(), sha_a);
}

#[test]
fn test_staging_dir_is_reused_not_cleared() {
    let tmp = TempDir::new().unwrap();
    let req = request(&tmp, "1.2.3");
    std::fs::create_dir_all(req.pom_dir()).unwrap();
    std::fs::write(req.pom_dir().join("leftover.txt"), "x").unwrap();
    stage(&req, TS).unwrap();
    assert!(req.pom_dir().join("leftover.txt").is_file());
}

#[test]
fn test_missing_artifact_is_artifact_read_error() {
    let tmp = TempDir::new().unwrap();
    let mut req = request(&tmp, "1.2.3");
    req.artifact = tmp.path().join("missing.jar");
    let err = stage(&req, TS).unwrap_err();
    assert!(matches!(err, DeployError::ArtifactRead { .. }), "got {err:?}");
}

#[test]
fn test_unwritable_staging_dir_is_staging_error() {
    let tmp = TempDir::new().unwrap();
    let mut req = request(&tmp, "1.2.3");
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    req.pom_dir = Some(blocker.join("poms"));
    let err = stage(&req, TS).unwrap_err();
    assert!(matches!(err, DeployError::StagingIo { .. }), "got {err:?}");
}

#[test]
fn test_stage_artifact_digests_for_other_packaging() {
    let tmp = TempDir::new().unwrap();
    let artifact = tmp.path().join("site.zip");
    std::fs::write(&artifact, b"zip bytes").unwrap();
    let dir = tmp.path().join("poms");
    stage_artifact_digests(&artifact, &dir, "zip").unwrap();
    assert!(dir.join("artifact.zip.md5").is_file());
    assert!(dir.join("artifact.zip.sha1").is_file());
}
