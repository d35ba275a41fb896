//! Handler for `nexus-deployer deploy`.

use miette::Result;

use nexus_deployer_maven::{deploy, layout};

use crate::cli::DeployArgs;

pub async fn exec(args: DeployArgs, dry_run: bool) -> Result<()> {
    let request = super::load_request(args)?;

    if dry_run {
        let mode = if request.parallel {
            "parallel"
        } else {
            "sequential"
        };
        println!(
            "Upload plan for {}:{}:{} ({mode})",
            request.group_id, request.artifact_id, request.version
        );
        for task in layout::plan(&request) {
            println!(
                "  {} -> {}",
                task.local.display(),
                task.url(request.base_url())
            );
        }
        return Ok(());
    }

    deploy::deploy(request).await?;
    Ok(())
}
