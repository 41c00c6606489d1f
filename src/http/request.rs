//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Reconstruct the request origin (`scheme://host`)
//! - Decode query pairs in request order
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Forwarded headers are only honored when the listener trusts its proxy

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::AppError;
use crate::http::server::AppState;

pub const X_REQUEST_ID: &str = "x-request-id";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID header, if any.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(X_REQUEST_ID).and_then(|v| v.to_str().ok())
}

/// `scheme://host` of the incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    /// Reconstruct the origin from request parts.
    ///
    /// Returns `None` when no host can be determined.
    pub fn from_parts(parts: &Parts, trust_proxy: bool, default_scheme: &str) -> Option<Self> {
        let forwarded = |name: &str| {
            trust_proxy
                .then(|| first_header_value(&parts.headers, name))
                .flatten()
        };

        let host = forwarded(X_FORWARDED_HOST)
            .or_else(|| first_header_value(&parts.headers, header::HOST.as_str()))
            .or_else(|| parts.uri.authority().map(|a| a.as_str().to_string()))?;

        let scheme = forwarded(X_FORWARDED_PROTO)
            .map(|s| s.to_ascii_lowercase())
            .or_else(|| parts.uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| default_scheme.to_string());

        Some(Self { scheme, host })
    }

    /// Full URL of `path` on this origin.
    pub fn url_for(&self, path: &str) -> String {
        format!("{self}{path}")
    }
}

impl std::fmt::Display for RequestOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

fn first_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let listener = &state.config.listener;
        RequestOrigin::from_parts(parts, listener.trust_proxy, &listener.default_scheme)
            .ok_or_else(|| AppError::BadRequest("missing Host header".to_string()))
    }
}

/// Decode a raw query string into pairs, preserving order and duplicates.
pub fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    })
    .unwrap_or_default()
}

/// Query flag semantics: present with a non-empty value.
pub fn query_flag(pairs: &[(String, String)], name: &str) -> bool {
    pairs
        .iter()
        .any(|(key, value)| key == name && !value.is_empty())
}

pub fn query_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_origin_from_host_header() {
        let parts = parts("/robots.txt", &[("Host", "www.example.com:8080")]);
        let origin = RequestOrigin::from_parts(&parts, false, "http").unwrap();
        assert_eq!(origin.to_string(), "http://www.example.com:8080");
        assert_eq!(origin.url_for("/story/a"), "http://www.example.com:8080/story/a");
    }

    #[test]
    fn test_forwarded_headers_ignored_without_trust() {
        let parts = parts(
            "/",
            &[("Host", "internal:3005"), ("X-Forwarded-Proto", "https"), ("X-Forwarded-Host", "www.example.com")],
        );
        let origin = RequestOrigin::from_parts(&parts, false, "http").unwrap();
        assert_eq!(origin.to_string(), "http://internal:3005");
    }

    #[test]
    fn test_forwarded_headers_with_trust() {
        let parts = parts(
            "/",
            &[("Host", "internal:3005"), ("X-Forwarded-Proto", "HTTPS, http"), ("X-Forwarded-Host", "www.example.com, lb")],
        );
        let origin = RequestOrigin::from_parts(&parts, true, "http").unwrap();
        assert_eq!(origin.to_string(), "https://www.example.com");
    }

    #[test]
    fn test_origin_from_absolute_uri() {
        let parts = parts("https://h2.example.com/robots.txt", &[]);
        let origin = RequestOrigin::from_parts(&parts, false, "http").unwrap();
        assert_eq!(origin.to_string(), "https://h2.example.com");
    }

    #[test]
    fn test_missing_host() {
        let parts = parts("/robots.txt", &[]);
        assert!(RequestOrigin::from_parts(&parts, false, "http").is_none());
    }

    #[test]
    fn test_query_pairs() {
        let pairs = query_pairs(Some("a=1&b=x%20y&b=z&preview=&c=a+b"));
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x y".to_string()),
                ("b".to_string(), "z".to_string()),
                ("preview".to_string(), "".to_string()),
                ("c".to_string(), "a b".to_string()),
            ]
        );
        assert!(query_pairs(None).is_empty());
    }

    #[test]
    fn test_query_flag_and_value() {
        let pairs = query_pairs(Some("preview=&publisherId=p1"));
        assert!(!query_flag(&pairs, "preview"));
        assert_eq!(query_value(&pairs, "publisherId"), Some("p1"));

        let pairs = query_pairs(Some("preview=1"));
        assert!(query_flag(&pairs, "preview"));
        assert_eq!(query_value(&pairs, "publisherId"), None);
    }

    #[test]
    fn test_make_request_id() {
        let request = Request::builder().body(()).unwrap();
        let id = MakeRequestUuidV4.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
    }
}
