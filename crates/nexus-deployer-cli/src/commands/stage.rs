//! Handler for `nexus-deployer stage`.

use miette::Result;

use nexus_deployer_core::timestamp;
use nexus_deployer_maven::staging::{self, artifact_digest_base};
use nexus_deployer_util::progress::Reporter;

use crate::cli::DeployArgs;

pub fn exec(args: DeployArgs) -> Result<()> {
    let request = super::load_request(args)?;
    let last_updated = timestamp::last_updated();
    let staged = staging::stage(&request, &last_updated)?;

    for file in staged.files() {
        println!("{}", file.display());
    }
    let digest_base = staged.dir.join(artifact_digest_base(&request.packaging));
    println!("{}.md5", digest_base.display());
    println!("{}.sha1", digest_base.display());

    Reporter::new(request.quiet).action(
        "Staged",
        &format!(
            "{} (sha1 {})",
            request.artifact.display(),
            staged.artifact_digests.sha1
        ),
    );
    Ok(())
}
