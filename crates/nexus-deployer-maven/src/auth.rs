//! Repository authentication.
//!
//! Credentials are never sent up front. A PUT goes out anonymously first and
//! is only repeated with basic auth when the server answers `401` with a
//! `Basic` challenge.

use reqwest::header::{HeaderMap, WWW_AUTHENTICATE};
use reqwest::{RequestBuilder, Response, StatusCode};

use nexus_deployer_core::request::Credentials;

/// Attach basic-auth credentials to a request.
pub fn apply_auth(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    request.basic_auth(&credentials.username, Some(&credentials.password))
}

/// Whether any `WWW-Authenticate` header offers the `Basic` scheme.
pub fn offers_basic(headers: &HeaderMap) -> bool {
    headers.get_all(WWW_AUTHENTICATE).iter().any(|value| {
        value
            .to_str()
            .map(|v| {
                v.split(',')
                    .any(|part| part.trim_start().to_ascii_lowercase().starts_with("basic"))
            })
            .unwrap_or(false)
    })
}

/// A `401` that can be answered with basic credentials.
pub fn is_basic_challenge(response: &Response) -> bool {
    response.status() == StatusCode::UNAUTHORIZED && offers_basic(response.headers())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn basic_realm_is_a_challenge() {
        let mut headers = HeaderMap::new();
        headers.insert(
            WWW_AUTHENTICATE,
            HeaderValue::from_static("BASIC realm=\"Sonatype Nexus Repository Manager\""),
        );
        assert!(offers_basic(&headers));
    }

    #[test]
    fn basic_listed_after_other_scheme() {
        let mut headers = HeaderMap::new();
        headers.append(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer realm=\"x\""));
        headers.append(WWW_AUTHENTICATE, HeaderValue::from_static("Basic realm=\"x\""));
        assert!(offers_basic(&headers));
    }

    #[test]
    fn bearer_only_is_not_basic() {
        let mut headers = HeaderMap::new();
        headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer realm=\"x\""));
        assert!(!offers_basic(&headers));
    }

    #[test]
    fn missing_header_is_not_basic() {
        assert!(!offers_basic(&HeaderMap::new()));
    }
}
