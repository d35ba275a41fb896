//! Command dispatch and handler modules.

mod deploy;
mod stage;

use miette::Result;

use nexus_deployer_core::config::{AuthConfig, DeployConfig};
use nexus_deployer_core::package;
use nexus_deployer_core::request::DeploymentRequest;

use crate::cli::{Cli, Command, DeployArgs};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Deploy { options, dry_run } => deploy::exec(options, dry_run).await,
        Command::Stage { options } => stage::exec(options),
    }
}

/// Merge the config file (if any) with flags and validate the result.
fn load_request(args: DeployArgs) -> Result<DeploymentRequest> {
    let file = match &args.config {
        Some(path) => DeployConfig::from_path(path)?,
        None => DeployConfig::default(),
    };

    let version = match (args.version, &args.version_from) {
        (Some(v), _) => Some(v),
        (None, Some(path)) => Some(package::read_version(path)?),
        (None, None) => None,
    };

    let auth = if args.username.is_some() || args.password.is_some() {
        Some(AuthConfig {
            username: args.username,
            password: args.password,
        })
    } else {
        None
    };

    let flags = DeployConfig {
        group_id: args.group_id,
        artifact_id: args.artifact_id,
        version,
        packaging: args.packaging,
        classifier: args.classifier,
        artifact: args.artifact,
        url: args.url,
        auth,
        insecure: args.insecure.then_some(true),
        noproxy: args.noproxy,
        parallel: args.parallel.then_some(true),
        quiet: args.quiet.then_some(true),
        pom_dir: args.pom_dir,
        template_dir: args.template_dir,
    };

    Ok(file.merge(flags).into_request()?)
}
