//! HTTP PUT transport for repository uploads.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_LENGTH, EXPECT};
use reqwest::{Body, Client, NoProxy, Proxy};

use nexus_deployer_core::request::{Credentials, DeploymentRequest};
use nexus_deployer_util::errors::{DeployError, DeployResult};

use crate::auth;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("nexus-deployer/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest slice of a failure response body kept in the error message.
const MAX_REASON_BODY: usize = 200;

/// Proxy environment variables, checked upper-case first.
const PROXY_ENV: [(ProxyScheme, &str, &str); 3] = [
    (ProxyScheme::Http, "HTTP_PROXY", "http_proxy"),
    (ProxyScheme::Https, "HTTPS_PROXY", "https_proxy"),
    (ProxyScheme::All, "ALL_PROXY", "all_proxy"),
];

/// The payload of a PUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadBody {
    /// A staged document, small enough to hold in memory.
    Bytes(Vec<u8>),
    /// A file streamed from disk. It is reopened for every attempt, so a
    /// challenged request never needs a buffered copy.
    File { path: PathBuf, len: u64 },
}

impl UploadBody {
    /// Stream `path`, taking the length from its metadata.
    pub async fn file(path: &Path) -> std::io::Result<Self> {
        let len = tokio::fs::metadata(path).await?.len();
        Ok(UploadBody::File {
            path: path.to_path_buf(),
            len,
        })
    }

    pub fn content_length(&self) -> u64 {
        match self {
            UploadBody::Bytes(bytes) => bytes.len() as u64,
            UploadBody::File { len, .. } => *len,
        }
    }

    async fn to_body(&self) -> DeployResult<Body> {
        match self {
            UploadBody::Bytes(bytes) => Ok(Body::from(bytes.clone())),
            UploadBody::File { path, .. } => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|source| DeployError::ArtifactRead {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Body::from(file))
            }
        }
    }
}

/// Something that can PUT a body to a URL.
///
/// Resolves to the response status on success (2xx) and to
/// [`DeployError::Upload`] otherwise.
pub trait Uploader {
    fn put(&self, url: &str, body: UploadBody) -> impl Future<Output = DeployResult<u16>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyScheme {
    Http,
    Https,
    All,
}

/// A forward proxy for one URL scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySetting {
    pub scheme: ProxyScheme,
    pub url: String,
}

/// Proxies named by `HTTP_PROXY`, `HTTPS_PROXY` and `ALL_PROXY` (or their
/// lower-case forms).
pub fn proxies_from_env() -> Vec<ProxySetting> {
    PROXY_ENV
        .iter()
        .filter_map(|(scheme, upper, lower)| {
            env_value(upper, lower).map(|url| ProxySetting {
                scheme: *scheme,
                url,
            })
        })
        .collect()
}

fn env_value(upper: &str, lower: &str) -> Option<String> {
    std::env::var(upper)
        .or_else(|_| std::env::var(lower))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Per-client transport settings.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    pub credentials: Option<Credentials>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Comma-separated hosts that bypass every proxy in `proxies`.
    pub no_proxy: String,
    pub proxies: Vec<ProxySetting>,
}

impl TransportOptions {
    /// Settings for `request`, with proxies taken from the environment.
    pub fn from_request(request: &DeploymentRequest) -> Self {
        Self {
            credentials: request.auth.clone(),
            insecure: request.insecure,
            no_proxy: request.noproxy().to_string(),
            proxies: proxies_from_env(),
        }
    }
}

/// Build the reqwest client for `options`.
///
/// System proxy detection is off. Only `options.proxies` are used, each
/// carrying the run's no-proxy hosts, so the process environment is never
/// written to.
pub fn build_client(options: &TransportOptions) -> DeployResult<Client> {
    let mut builder = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .no_proxy();

    if options.insecure {
        tracing::warn!("TLS certificate verification disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    for setting in &options.proxies {
        let proxy = match setting.scheme {
            ProxyScheme::Http => Proxy::http(&setting.url),
            ProxyScheme::Https => Proxy::https(&setting.url),
            ProxyScheme::All => Proxy::all(&setting.url),
        }
        .map_err(|e| DeployError::config(format!("Invalid proxy '{}': {e}", setting.url)))?;
        tracing::debug!(
            "using {:?} proxy {} (bypass: {})",
            setting.scheme,
            setting.url,
            options.no_proxy
        );
        builder = builder.proxy(proxy.no_proxy(NoProxy::from_string(&options.no_proxy)));
    }

    builder
        .build()
        .map_err(|e| DeployError::config(format!("Failed to create HTTP client: {e}")))
}

/// [`Uploader`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: Client,
    credentials: Option<Credentials>,
}

impl HttpUploader {
    pub fn new(options: &TransportOptions) -> DeployResult<Self> {
        Ok(Self {
            client: build_client(options)?,
            credentials: options.credentials.clone(),
        })
    }

    async fn send(
        &self,
        url: &str,
        body: &UploadBody,
        credentials: Option<&Credentials>,
    ) -> DeployResult<reqwest::Response> {
        let mut request = self
            .client
            .put(url)
            .header(ACCEPT, "*/*")
            .header(EXPECT, "100-continue")
            .header(CONTENT_LENGTH, body.content_length())
            .body(body.to_body().await?);
        if let Some(credentials) = credentials {
            request = auth::apply_auth(request, credentials);
        }

        request.send().await.map_err(|e| DeployError::Upload {
            url: url.to_string(),
            status: 0,
            reason: e.to_string(),
        })
    }
}

impl Uploader for HttpUploader {
    async fn put(&self, url: &str, body: UploadBody) -> DeployResult<u16> {
        tracing::debug!("PUT {url} ({} bytes)", body.content_length());
        let mut response = self.send(url, &body, None).await?;

        if let Some(credentials) = &self.credentials {
            if auth::is_basic_challenge(&response) {
                tracing::debug!("PUT {url} challenged, retrying with credentials");
                response = self.send(url, &body, Some(credentials)).await?;
            }
        }

        let status = response.status();
        if status.is_success() {
            return Ok(status.as_u16());
        }

        let mut reason = status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string();
        let text = response.text().await.unwrap_or_default();
        let text = text.trim();
        if !text.is_empty() {
            let snippet: String = text.chars().take(MAX_REASON_BODY).collect();
            reason = format!("{reason} ({snippet})");
        }
        Err(DeployError::Upload {
            url: url.to_string(),
            status: status.as_u16(),
            reason,
        })
    }
}
