//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use nexus_deployer_core::package::DEFAULT_PACKAGE_JSON;

#[derive(Parser, Debug)]
#[command(
    name = "nexus-deployer",
    version,
    about = "Publish an artifact to a Maven-compatible repository",
    long_about = "Generates maven-metadata.xml and pom.xml for one artifact version, stages \
                  MD5/SHA-1 checksums for every file, and uploads the set with HTTP PUT."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stage metadata and checksums, then upload everything
    #[command(disable_version_flag = true)]
    Deploy {
        #[command(flatten)]
        options: DeployArgs,
        /// Print the upload plan without staging or uploading
        #[arg(long)]
        dry_run: bool,
    },

    /// Stage metadata and checksums without uploading
    #[command(disable_version_flag = true)]
    Stage {
        #[command(flatten)]
        options: DeployArgs,
    },
}

/// Deployment options. Anything given here overrides the config file.
#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// TOML file with deployment options
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Maven groupId, e.g. com.acme
    #[arg(long)]
    pub group_id: Option<String>,
    /// Maven artifactId
    #[arg(long)]
    pub artifact_id: Option<String>,
    /// Version to publish
    #[arg(long)]
    pub version: Option<String>,
    /// Read the version from this package.json
    #[arg(
        long,
        conflicts_with = "version",
        num_args = 0..=1,
        default_missing_value = DEFAULT_PACKAGE_JSON
    )]
    pub version_from: Option<PathBuf>,
    /// Packaging / file extension, e.g. jar, zip, war
    #[arg(long)]
    pub packaging: Option<String>,
    /// Classifier appended to the artifact file name
    #[arg(long)]
    pub classifier: Option<String>,
    /// Path of the file to publish
    #[arg(long)]
    pub artifact: Option<PathBuf>,
    /// Repository base URL
    #[arg(long)]
    pub url: Option<String>,
    /// Repository username
    #[arg(long, env = "NEXUS_USERNAME")]
    pub username: Option<String>,
    /// Repository password
    #[arg(long, env = "NEXUS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
    /// Comma-separated hosts that bypass the proxy [default: localhost,127.0.0.1]
    #[arg(long)]
    pub noproxy: Option<String>,
    /// Upload all files concurrently
    #[arg(long)]
    pub parallel: bool,
    /// Only report failures
    #[arg(short, long)]
    pub quiet: bool,
    /// Staging directory [default: test/poms]
    #[arg(long)]
    pub pom_dir: Option<PathBuf>,
    /// Directory with project-metadata.xml, latest-metadata.xml and pom.xml overrides
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

/// Parse command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}
