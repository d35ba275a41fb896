//! Deployment options loaded from a TOML file and merged with CLI flags.
//!
//! Keys mirror the option names of the deployment request:
//!
//! ```toml
//! groupId = "com.acme"
//! artifactId = "widget"
//! version = "1.2.3"
//! packaging = "jar"
//! artifact = "build/widget.jar"
//! url = "https://nexus.co/repository/releases"
//! parallel = true
//!
//! [auth]
//! username = "deployer"
//! password = "secret"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use nexus_deployer_util::errors::{DeployError, DeployResult};

use crate::request::{Credentials, DeploymentRequest};

/// Credentials as written in the config file; either half may come from flags.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Partially specified deployment options. Every field is optional so a
/// config file and command-line flags can each supply part of the request.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeployConfig {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub artifact: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub insecure: Option<bool>,
    #[serde(default)]
    pub noproxy: Option<String>,
    #[serde(default)]
    pub parallel: Option<bool>,
    #[serde(default)]
    pub quiet: Option<bool>,
    #[serde(default)]
    pub pom_dir: Option<PathBuf>,
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

impl DeployConfig {
    /// Parse a config file from a TOML string.
    pub fn parse_toml(content: &str) -> DeployResult<Self> {
        toml::from_str(content)
            .map_err(|e| DeployError::config(format!("Failed to parse config: {e}")))
    }

    /// Read and parse a config file from disk.
    pub fn from_path(path: &Path) -> DeployResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DeployError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        tracing::debug!("loaded deploy config from {}", path.display());
        Self::parse_toml(&content)
    }

    /// True when no option at all has been supplied.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: DeployConfig) -> Self {
        let auth = match (self.auth, overrides.auth) {
            (Some(base), Some(over)) => Some(AuthConfig {
                username: over.username.or(base.username),
                password: over.password.or(base.password),
            }),
            (base, over) => over.or(base),
        };
        Self {
            group_id: overrides.group_id.or(self.group_id),
            artifact_id: overrides.artifact_id.or(self.artifact_id),
            version: overrides.version.or(self.version),
            packaging: overrides.packaging.or(self.packaging),
            classifier: overrides.classifier.or(self.classifier),
            artifact: overrides.artifact.or(self.artifact),
            url: overrides.url.or(self.url),
            auth,
            insecure: overrides.insecure.or(self.insecure),
            noproxy: overrides.noproxy.or(self.noproxy),
            parallel: overrides.parallel.or(self.parallel),
            quiet: overrides.quiet.or(self.quiet),
            pom_dir: overrides.pom_dir.or(self.pom_dir),
            template_dir: overrides.template_dir.or(self.template_dir),
        }
    }

    /// Turn the collected options into a validated [`DeploymentRequest`].
    pub fn into_request(self) -> DeployResult<DeploymentRequest> {
        if self.is_empty() {
            return Err(DeployError::config("deployment options required"));
        }

        fn required<T>(value: Option<T>, name: &str) -> DeployResult<T> {
            value.ok_or_else(|| DeployError::config(format!("{name} is required")))
        }

        let auth = match self.auth {
            None => None,
            Some(AuthConfig {
                username: Some(username),
                password,
            }) => Some(Credentials {
                username,
                password: password.unwrap_or_default(),
            }),
            Some(AuthConfig { username: None, .. }) => {
                return Err(DeployError::config(
                    "auth.username is required when a password is given",
                ))
            }
        };

        let request = DeploymentRequest {
            group_id: required(self.group_id, "groupId")?,
            artifact_id: required(self.artifact_id, "artifactId")?,
            version: required(self.version, "version")?,
            packaging: required(self.packaging, "packaging")?,
            classifier: self.classifier,
            artifact: required(self.artifact, "artifact")?,
            url: required(self.url, "url")?,
            auth,
            insecure: self.insecure.unwrap_or(false),
            noproxy: self.noproxy,
            parallel: self.parallel.unwrap_or(false),
            quiet: self.quiet.unwrap_or(false),
            pom_dir: self.pom_dir,
            template_dir: self.template_dir,
            last_updated: None,
        };
        request.validate()?;
        Ok(request)
    }
}
