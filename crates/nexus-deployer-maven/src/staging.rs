//! Local staging of rendered metadata and checksum sidecars.
//!
//! Everything is written under the request's `pom_dir`, which is created on
//! demand and never cleared between runs.

use std::path::{Path, PathBuf};

use nexus_deployer_core::request::DeploymentRequest;
use nexus_deployer_util::errors::{DeployError, DeployResult};
use nexus_deployer_util::fs::{ensure_dir, with_suffix};
use nexus_deployer_util::hash::{self, Digests};
use nexus_deployer_util::progress::Reporter;

use crate::template::{self, Template};

pub const OUTER_FILE: &str = "outer.xml";
pub const INNER_FILE: &str = "inner.xml";
pub const POM_FILE: &str = "pom.xml";

/// Name of the staged artifact digest file without its `.md5`/`.sha1` suffix.
pub fn artifact_digest_base(packaging: &str) -> String {
    format!("artifact.{packaging}")
}

/// Paths produced by [`stage`].
#[derive(Debug, Clone)]
pub struct StagedFiles {
    pub dir: PathBuf,
    pub outer: PathBuf,
    /// Only present for snapshot versions.
    pub inner: Option<PathBuf>,
    pub pom: PathBuf,
    pub artifact_digests: Digests,
}

impl StagedFiles {
    /// Every file written during staging, sidecars included.
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for saved in [Some(&self.outer), self.inner.as_ref(), Some(&self.pom)]
            .into_iter()
            .flatten()
        {
            files.push(saved.clone());
            files.push(with_suffix(saved, ".md5"));
            files.push(with_suffix(saved, ".sha1"));
        }
        files
    }
}

fn write(path: &Path, content: &[u8]) -> DeployResult<()> {
    std::fs::write(path, content).map_err(|source| DeployError::StagingIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `content` to `dir/file_name` together with `.md5` and `.sha1`
/// sidecars holding its lowercase hex digests. Creates `dir` if needed.
pub fn save(content: &str, dir: &Path, file_name: &str) -> DeployResult<PathBuf> {
    ensure_dir(dir).map_err(|source| DeployError::StagingIo {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    let digests = Digests::of_bytes(content.as_bytes());
    write(&path, content.as_bytes())?;
    write(&with_suffix(&path, ".md5"), digests.md5.as_bytes())?;
    write(&with_suffix(&path, ".sha1"), digests.sha1.as_bytes())?;
    tracing::debug!("staged {} (sha1 {})", path.display(), digests.sha1);
    Ok(path)
}

/// Stream the artifact through MD5/SHA-1 and stage
/// `artifact.<packaging>.md5` / `.sha1` in `dir`. The artifact itself is
/// not copied.
pub fn stage_artifact_digests(
    artifact: &Path,
    dir: &Path,
    packaging: &str,
) -> DeployResult<Digests> {
    let digests = hash::digest_file(artifact).map_err(|source| DeployError::ArtifactRead {
        path: artifact.to_path_buf(),
        source,
    })?;

    ensure_dir(dir).map_err(|source| DeployError::StagingIo {
        path: dir.to_path_buf(),
        source,
    })?;
    let base = dir.join(artifact_digest_base(packaging));
    write(&with_suffix(&base, ".md5"), digests.md5.as_bytes())?;
    write(&with_suffix(&base, ".sha1"), digests.sha1.as_bytes())?;
    Ok(digests)
}

/// Render every template the request needs and stage it, then checksum the
/// artifact. Templates are all rendered before anything is written.
pub fn stage(request: &DeploymentRequest, last_updated: &str) -> DeployResult<StagedFiles> {
    let dir = request.pom_dir();

    let outer = template::render(Template::OuterMetadata, request, last_updated)?;
    let inner = if request.is_snapshot() {
        Some(template::render(
            Template::InnerMetadata,
            request,
            last_updated,
        )?)
    } else {
        None
    };
    let pom = template::render(Template::Pom, request, last_updated)?;

    let outer = save(&outer, dir, OUTER_FILE)?;
    let inner = match inner {
        Some(content) => Some(save(&content, dir, INNER_FILE)?),
        None => None,
    };
    let pom = save(&pom, dir, POM_FILE)?;

    let sp = Reporter::new(request.quiet)
        .spinner(&format!("Hashing {}...", request.artifact.display()));
    let digests = stage_artifact_digests(&request.artifact, dir, &request.packaging);
    sp.finish_and_clear();

    Ok(StagedFiles {
        dir: dir.to_path_buf(),
        outer,
        inner,
        pom,
        artifact_digests: digests?,
    })
}
