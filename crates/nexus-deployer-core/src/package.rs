//! Reading a version string from a `package.json`.

use serde::Deserialize;
use std::path::Path;

use nexus_deployer_util::errors::{DeployError, DeployResult};

/// Default location of the package descriptor, relative to the working directory.
pub const DEFAULT_PACKAGE_JSON: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageJson {
    version: Option<String>,
}

/// Read the `version` field from a `package.json` file.
pub fn read_version(path: &Path) -> DeployResult<String> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        DeployError::config(format!("Failed to read {}: {e}", path.display()))
    })?;
    let package: PackageJson = serde_json::from_str(&content).map_err(|e| {
        DeployError::config(format!("Failed to parse {}: {e}", path.display()))
    })?;
    match package.version {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(DeployError::config(format!(
            "{} has no version field",
            path.display()
        ))),
    }
}
