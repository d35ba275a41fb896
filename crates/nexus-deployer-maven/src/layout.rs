//! The ordered upload plan: which staged file goes to which repository path.

use std::path::PathBuf;

use nexus_deployer_core::request::DeploymentRequest;
use nexus_deployer_util::fs::with_suffix;

use crate::staging::{artifact_digest_base, INNER_FILE, OUTER_FILE, POM_FILE};

/// What a task carries, used for logging and error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Metadata,
    Pom,
    Artifact,
    Checksum,
}

/// One PUT: a local file and the repository-relative path it lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub local: PathBuf,
    pub remote: String,
    pub kind: UploadKind,
}

impl UploadTask {
    fn new(local: PathBuf, remote: String, kind: UploadKind) -> Self {
        Self {
            local,
            remote,
            kind,
        }
    }

    /// Absolute URL of this task under the repository `base` URL.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.remote)
    }
}

/// A staged file plus its two sidecars, in upload order.
fn with_sidecars(
    tasks: &mut Vec<UploadTask>,
    local: PathBuf,
    remote: String,
    kind: UploadKind,
) {
    let sidecar = |ext: &str| {
        UploadTask::new(
            with_suffix(&local, ext),
            format!("{remote}{ext}"),
            UploadKind::Checksum,
        )
    };
    let sha1 = sidecar(".sha1");
    let md5 = sidecar(".md5");
    tasks.push(UploadTask::new(local, remote, kind));
    tasks.push(sha1);
    tasks.push(md5);
}

/// Build the fixed-order upload plan for `request`:
///
/// 1. artifact-level `maven-metadata.xml` and sidecars
/// 2. version-level `maven-metadata.xml` and sidecars (snapshots only)
/// 3. `{artifactId}-{version}.pom` and sidecars
/// 4. the artifact as `{remoteArtifactName}.{packaging}`
/// 5. the artifact's `.sha1` and `.md5`
///
/// The classifier only affects steps 4 and 5.
pub fn plan(request: &DeploymentRequest) -> Vec<UploadTask> {
    let dir = request.pom_dir();
    let ga = request.group_artifact_path();
    let gav = request.group_artifact_version_path();
    let mut tasks = Vec::with_capacity(12);

    with_sidecars(
        &mut tasks,
        dir.join(OUTER_FILE),
        format!("{ga}/maven-metadata.xml"),
        UploadKind::Metadata,
    );

    if request.is_snapshot() {
        with_sidecars(
            &mut tasks,
            dir.join(INNER_FILE),
            format!("{gav}/maven-metadata.xml"),
            UploadKind::Metadata,
        );
    }

    with_sidecars(
        &mut tasks,
        dir.join(POM_FILE),
        format!("{gav}/{}.pom", request.base_name()),
        UploadKind::Pom,
    );

    let artifact_remote = format!(
        "{gav}/{}.{}",
        request.remote_artifact_name(),
        request.packaging
    );
    let digest_base = artifact_digest_base(&request.packaging);
    tasks.push(UploadTask::new(
        request.artifact.clone(),
        artifact_remote.clone(),
        UploadKind::Artifact,
    ));
    tasks.push(UploadTask::new(
        dir.join(format!("{digest_base}.sha1")),
        format!("{artifact_remote}.sha1"),
        UploadKind::Checksum,
    ));
    tasks.push(UploadTask::new(
        dir.join(format!("{digest_base}.md5")),
        format!("{artifact_remote}.md5"),
        UploadKind::Checksum,
    ));

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let task = UploadTask::new(
            PathBuf::from("x"),
            "com/acme/widget/maven-metadata.xml".to_string(),
            UploadKind::Metadata,
        );
        assert_eq!(
            task.url("http://repo.local/maven/"),
            "http://repo.local/maven/com/acme/widget/maven-metadata.xml"
        );
    }

    #[test]
    fn sidecars_follow_their_file() {
        let mut tasks = Vec::new();
        with_sidecars(
            &mut tasks,
            PathBuf::from("poms/pom.xml"),
            "a/b-1.pom".to_string(),
            UploadKind::Pom,
        );
        let remotes: Vec<_> = tasks.iter().map(|t| t.remote.as_str()).collect();
        assert_eq!(remotes, ["a/b-1.pom", "a/b-1.pom.sha1", "a/b-1.pom.md5"]);
        assert_eq!(tasks[2].local, PathBuf::from("poms/pom.xml.md5"));
        assert_eq!(tasks[1].kind, UploadKind::Checksum);
    }
}
