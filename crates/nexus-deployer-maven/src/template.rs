//! Metadata and POM templates.
//!
//! The three templates are compiled into the binary via `include_str!` and
//! can be overridden from a directory on disk. Placeholders use `{{name}}`
//! delimiters so they never collide with XML markup; values are XML-escaped
//! as they are substituted.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use nexus_deployer_core::request::DeploymentRequest;
use nexus_deployer_util::errors::{DeployError, DeployResult};

const PROJECT_METADATA: &str = include_str!("../templates/project-metadata.xml");
const LATEST_METADATA: &str = include_str!("../templates/latest-metadata.xml");
const POM: &str = include_str!("../templates/pom.xml");

/// One of the documents rendered for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Artifact-level `maven-metadata.xml`.
    OuterMetadata,
    /// Version-level `maven-metadata.xml`, snapshots only.
    InnerMetadata,
    Pom,
}

impl Template {
    /// File name looked up in a template override directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Template::OuterMetadata => "project-metadata.xml",
            Template::InnerMetadata => "latest-metadata.xml",
            Template::Pom => "pom.xml",
        }
    }

    fn embedded(self) -> &'static str {
        match self {
            Template::OuterMetadata => PROJECT_METADATA,
            Template::InnerMetadata => LATEST_METADATA,
            Template::Pom => POM,
        }
    }

    /// Template source: from `dir` when given, otherwise the embedded copy.
    pub fn load(self, dir: Option<&Path>) -> DeployResult<Cow<'static, str>> {
        match dir {
            None => Ok(Cow::Borrowed(self.embedded())),
            Some(dir) => {
                let path = dir.join(self.file_name());
                std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| DeployError::TemplateRead {
                        name: path.display().to_string(),
                        source,
                    })
            }
        }
    }
}

/// Variables available for `{{variable}}` interpolation.
#[derive(Debug, Default)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    /// Standard variables for a request: `groupId`, `artifactId`, `version`,
    /// `packaging`, `classifier`, `lastUpdated` and the pre-built
    /// `classifierElement` line used by snapshot metadata.
    pub fn for_request(request: &DeploymentRequest, last_updated: &str) -> Self {
        let mut ctx = Self::default();
        ctx.set("groupId", &request.group_id);
        ctx.set("artifactId", &request.artifact_id);
        ctx.set("version", &request.version);
        ctx.set("packaging", &request.packaging);
        ctx.set("classifier", request.classifier.as_deref().unwrap_or(""));
        ctx.set("lastUpdated", last_updated);

        let element = match &request.classifier {
            Some(c) => format!(
                "        <classifier>{}</classifier>\n",
                quick_xml::escape::escape(c.as_str())
            ),
            None => String::new(),
        };
        ctx.set_raw("classifierElement", element);
        ctx
    }

    /// Add a variable; the value is XML-escaped.
    pub fn set(&mut self, key: impl Into<String>, value: &str) {
        self.vars
            .insert(key.into(), quick_xml::escape::escape(value).into_owned());
    }

    /// Add a variable whose value is inserted verbatim.
    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

/// Replace every `{{key}}` in `input` with its value from `ctx` in a single
/// pass. Unknown keys are left intact, and substituted values are never
/// re-scanned.
pub fn interpolate(input: &str, ctx: &TemplateContext) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match ctx.vars.get(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render one template for `request`.
pub fn render(
    template: Template,
    request: &DeploymentRequest,
    last_updated: &str,
) -> DeployResult<String> {
    let source = template.load(request.template_dir.as_deref())?;
    let ctx = TemplateContext::for_request(request, last_updated);
    Ok(interpolate(&source, &ctx))
}
