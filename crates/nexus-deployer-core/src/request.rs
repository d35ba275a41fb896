//! The deployment request and the Maven layout paths derived from it.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Url;

use nexus_deployer_util::errors::{DeployError, DeployResult};

/// Staging directory used when the request does not name one.
pub const DEFAULT_POM_DIR: &str = "test/poms";

/// Hosts that bypass any configured proxy when `noproxy` is unset.
pub const DEFAULT_NO_PROXY: &str = "localhost,127.0.0.1";

/// Basic-auth credentials for the target repository.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Everything needed to stage and publish one artifact version.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    pub classifier: Option<String>,
    /// Local path of the file being published.
    pub artifact: PathBuf,
    /// Repository base URL, e.g. `https://nexus.co/repository/releases`.
    pub url: String,
    pub auth: Option<Credentials>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Comma-separated hosts that bypass the proxy.
    pub noproxy: Option<String>,
    pub parallel: bool,
    pub quiet: bool,
    pub pom_dir: Option<PathBuf>,
    /// Directory overriding the embedded metadata/POM templates.
    pub template_dir: Option<PathBuf>,
    /// `yyyymmddHHMMss`; filled in at deploy time when `None`.
    pub last_updated: Option<String>,
}

impl DeploymentRequest {
    /// Create a request with the required coordinates and every option at its default.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        packaging: impl Into<String>,
        artifact: impl Into<PathBuf>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: packaging.into(),
            classifier: None,
            artifact: artifact.into(),
            url: url.into(),
            auth: None,
            insecure: false,
            noproxy: None,
            parallel: false,
            quiet: false,
            pom_dir: None,
            template_dir: None,
            last_updated: None,
        }
    }

    /// Check that every required field is present and the URL is usable.
    pub fn validate(&self) -> DeployResult<()> {
        let required = [
            ("groupId", self.group_id.as_str()),
            ("artifactId", self.artifact_id.as_str()),
            ("version", self.version.as_str()),
            ("packaging", self.packaging.as_str()),
            ("url", self.url.as_str()),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(DeployError::config(format!("{name} is required")));
            }
        }
        if self.artifact.as_os_str().is_empty() {
            return Err(DeployError::config("artifact is required"));
        }
        let parsed = Url::parse(&self.url)
            .map_err(|e| DeployError::config(format!("url '{}' is not valid: {e}", self.url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DeployError::config(format!(
                "url must use http or https, got '{}'",
                self.url
            )));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(DeployError::config(format!("url '{}' has no host", self.url)));
        }
        if matches!(&self.classifier, Some(c) if c.trim().is_empty()) {
            return Err(DeployError::config("classifier must not be empty when set"));
        }
        Ok(())
    }

    /// `com.acme` becomes `com/acme`.
    pub fn group_id_as_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// `com/acme/widget`
    pub fn group_artifact_path(&self) -> String {
        format!("{}/{}", self.group_id_as_path(), self.artifact_id)
    }

    /// `com/acme/widget/1.2.3`
    pub fn group_artifact_version_path(&self) -> String {
        format!("{}/{}", self.group_artifact_path(), self.version)
    }

    /// `widget-1.2.3`, the base name used for the POM.
    pub fn base_name(&self) -> String {
        format!("{}-{}", self.artifact_id, self.version)
    }

    /// Base name plus `-{classifier}` when one is set; used only for the
    /// packaged artifact and its checksums.
    pub fn remote_artifact_name(&self) -> String {
        match &self.classifier {
            Some(c) => format!("{}-{c}", self.base_name()),
            None => self.base_name(),
        }
    }

    /// Whether the version ends in `SNAPSHOT`, ignoring case.
    pub fn is_snapshot(&self) -> bool {
        self.version.to_ascii_uppercase().ends_with("SNAPSHOT")
    }

    pub fn pom_dir(&self) -> &Path {
        self.pom_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_POM_DIR))
    }

    pub fn noproxy(&self) -> &str {
        self.noproxy.as_deref().unwrap_or(DEFAULT_NO_PROXY)
    }

    /// Repository base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
