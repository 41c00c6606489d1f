//! Canonical URL redirects.
//!
//! # Responsibilities
//! - Compare the requested URL (scheme + host + path) with the canonical URL
//! - Build the redirect target, carrying the original query parameters
//! - Suppress the redirect outside production, reporting the target instead

use axum::http::StatusCode;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

use crate::config::Environment;

/// Characters escaped by `encodeURIComponent`: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters escaped in an otherwise well-formed URL. Reserved characters
/// and `%` stay as they are.
const URL_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Status used for canonical redirects.
pub const REDIRECT_STATUS: StatusCode = StatusCode::MOVED_PERMANENTLY;

/// Outcome of comparing a request against the canonical URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    /// The request is already at the canonical URL.
    Canonical,
    /// Redirect the client.
    Redirect { location: String },
    /// A redirect was due but the process is not running in production.
    Suppressed { location: String },
}

impl RedirectDecision {
    /// Status to answer with, if the caller must redirect.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RedirectDecision::Redirect { .. } => Some(REDIRECT_STATUS),
            _ => None,
        }
    }

    /// The `Location` the caller must redirect to.
    pub fn location(&self) -> Option<&str> {
        match self {
            RedirectDecision::Redirect { location } => Some(location.as_str()),
            _ => None,
        }
    }

    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RedirectDecision::Canonical => "canonical",
            RedirectDecision::Redirect { .. } => "redirect",
            RedirectDecision::Suppressed { .. } => "suppressed",
        }
    }
}

/// Decides canonical redirects for a given execution mode.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalResolver {
    environment: Environment,
}

impl CanonicalResolver {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    /// Resolve a request.
    ///
    /// `requested_url` must not carry the query string; `query` holds the
    /// decoded query pairs in request order.
    pub fn resolve(
        &self,
        requested_url: &str,
        query: &[(String, String)],
        canonical_url: &str,
    ) -> RedirectDecision {
        if requested_url == canonical_url {
            return RedirectDecision::Canonical;
        }

        let location = redirect_target(canonical_url, query);
        if self.environment.is_production() {
            tracing::debug!(from = %requested_url, to = %location, "Redirecting to canonical URL");
            RedirectDecision::Redirect { location }
        } else {
            tracing::info!(
                environment = %self.environment,
                from = %requested_url,
                to = %location,
                "Aborting redirect! In production, this page would redirect"
            );
            RedirectDecision::Suppressed { location }
        }
    }
}

/// Canonical URL with the original query parameters appended, safe for a
/// `Location` header.
pub fn redirect_target(canonical_url: &str, query: &[(String, String)]) -> String {
    format!("{}{}", encode_url(canonical_url), query_string(query))
}

/// Escape a URL for use in a header.
///
/// Non-ASCII, whitespace and unsafe characters are percent-encoded. Existing
/// `%XX` escapes are kept; a `%` that does not start one becomes `%25`.
pub fn encode_url(url: &str) -> String {
    let mut encoded = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(index) = rest.find('%') {
        encoded.extend(utf8_percent_encode(&rest[..index], URL_UNSAFE));
        let tail = &rest[index + 1..];
        let escape = tail.len() >= 2 && tail.as_bytes()[..2].iter().all(u8::is_ascii_hexdigit);
        encoded.push_str(if escape { "%" } else { "%25" });
        rest = tail;
    }
    encoded.extend(utf8_percent_encode(rest, URL_UNSAFE));
    encoded
}

/// `?k=v&k2=v2` with `encodeURIComponent` escaping; empty when there are no pairs.
pub fn query_string(query: &[(String, String)]) -> String {
    if query.is_empty() {
        return String::new();
    }

    let pairs = query
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, COMPONENT),
                utf8_percent_encode(value, COMPONENT)
            )
        })
        .collect::<Vec<_>>();

    format!("?{}", pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "https://www.example.com/story/abc";

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_same_url_does_not_redirect() {
        let resolver = CanonicalResolver::new(Environment::Production);
        let decision = resolver.resolve(CANONICAL, &pairs(&[("utm_source", "x")]), CANONICAL);
        assert_eq!(decision, RedirectDecision::Canonical);
        assert_eq!(decision.status(), None);
    }

    #[test]
    fn test_different_url_redirects_with_query() {
        let resolver = CanonicalResolver::new(Environment::Production);
        let decision = resolver.resolve(
            "http://localhost:3005/story/abc",
            &pairs(&[("a", "1"), ("b", "x y")]),
            CANONICAL,
        );
        assert_eq!(
            decision,
            RedirectDecision::Redirect {
                location: "https://www.example.com/story/abc?a=1&b=x%20y".into()
            }
        );
        assert_eq!(decision.status(), Some(StatusCode::MOVED_PERMANENTLY));
        assert_eq!(decision.location(), Some("https://www.example.com/story/abc?a=1&b=x%20y"));
    }

    #[test]
    fn test_redirect_without_query_has_no_question_mark() {
        let resolver = CanonicalResolver::new(Environment::Production);
        let decision = resolver.resolve("http://other.host/story/abc", &[], CANONICAL);
        assert_eq!(decision.location(), Some(CANONICAL));
    }

    #[test]
    fn test_non_production_never_redirects() {
        for environment in [Environment::Development, Environment::Staging] {
            let resolver = CanonicalResolver::new(environment);
            let decision = resolver.resolve("http://localhost/x", &pairs(&[("a", "1")]), CANONICAL);
            assert_eq!(
                decision,
                RedirectDecision::Suppressed {
                    location: format!("{CANONICAL}?a=1")
                }
            );
            assert_eq!(decision.status(), None);
            assert_eq!(decision.location(), None);
        }
    }

    #[test]
    fn test_query_string_encoding() {
        assert_eq!(query_string(&pairs(&[("a", "1"), ("b", "x y")])), "?a=1&b=x%20y");
        assert_eq!(query_string(&[]), "");
        assert_eq!(
            query_string(&pairs(&[("q", "a&b=c/d"), ("k", "it's (ok)!~*")])),
            "?q=a%26b%3Dc%2Fd&k=it's%20(ok)!~*"
        );
        assert_eq!(query_string(&pairs(&[("name", "café")])), "?name=caf%C3%A9");
    }

    #[test]
    fn test_redirect_target_escapes_canonical_url() {
        assert_eq!(
            redirect_target("https://www.example.com/story/café guide", &pairs(&[("a", "1")])),
            "https://www.example.com/story/caf%C3%A9%20guide?a=1"
        );
    }

    #[test]
    fn test_encode_url() {
        assert_eq!(encode_url(CANONICAL), CANONICAL);
        assert_eq!(
            encode_url("https://x.com/a/b?c=d&e=f#g"),
            "https://x.com/a/b?c=d&e=f#g"
        );
        assert_eq!(encode_url("https://x.com/50%25-off"), "https://x.com/50%25-off");
        assert_eq!(encode_url("https://x.com/100%"), "https://x.com/100%25");
        assert_eq!(encode_url("https://x.com/%zz"), "https://x.com/%25zz");
        assert_eq!(encode_url("https://x.com/<a b>"), "https://x.com/%3Ca%20b%3E");
    }

    #[test]
    fn test_query_order_is_preserved() {
        assert_eq!(
            query_string(&pairs(&[("z", "1"), ("a", "2"), ("m", "3")])),
            "?z=1&a=2&m=3"
        );
    }

    #[test]
    fn test_trailing_slash_counts_as_different() {
        let resolver = CanonicalResolver::new(Environment::Production);
        let decision = resolver.resolve(&format!("{CANONICAL}/"), &[], CANONICAL);
        assert_eq!(decision.label(), "redirect");
    }
}
