use nexus_deployer_core::package::read_version;
use nexus_deployer_util::errors::DeployError;
use tempfile::TempDir;

#[test]
fn test_read_version_from_package_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("package.json");
    std::fs::write(&path, r#"{ "name": "widget", "version": "1.4.0-SNAPSHOT" }"#).unwrap();
    assert_eq!(read_version(&path).unwrap(), "1.4.0-SNAPSHOT");
}

#[test]
fn test_read_version_missing_field() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("package.json");
    std::fs::write(&path, r#"{ "name": "widget" }"#).unwrap();
    let err = read_version(&path).unwrap_err();
    assert!(err.to_string().contains("no version field"), "got: {err}");
}

#[test]
fn test_read_version_invalid_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("package.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        read_version(&path),
        Err(DeployError::Configuration { .. })
    ));
}

#[test]
fn test_read_version_missing_file() {
    let tmp = TempDir::new().unwrap();
    assert!(read_version(&tmp.path().join("package.json")).is_err());
}
