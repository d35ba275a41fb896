use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for every stage of a deployment.
///
/// Local failures (configuration, templates, staging, artifact reading) are
/// raised before the first upload. `Upload` carries the first failing PUT.
#[derive(Debug, Error, Diagnostic)]
pub enum DeployError {
    /// Required deployment options are missing or invalid.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Pass the missing option on the command line or add it to the config file"))]
    Configuration { message: String },

    /// A metadata or POM template could not be read.
    #[error("Failed to read template '{name}': {source}")]
    #[diagnostic(help("Check that --template-dir holds project-metadata.xml, latest-metadata.xml and pom.xml"))]
    TemplateRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Creating the staging directory or writing a staged file failed.
    #[error("Failed to stage {}: {source}", .path.display())]
    StagingIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be read while computing its checksums.
    #[error("Failed to read artifact {}: {source}", .path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A PUT failed at the transport level or returned a non-2xx status.
    ///
    /// `status` is 0 when no response was received.
    #[error("Upload to {url} failed with status {status}: {reason}")]
    Upload {
        url: String,
        status: u16,
        reason: String,
    },
}

impl DeployError {
    /// Shorthand for a [`DeployError::Configuration`] with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        DeployError::Configuration {
            message: message.into(),
        }
    }
}

/// Convenience alias for results carrying a [`DeployError`].
pub type DeployResult<T> = std::result::Result<T, DeployError>;
