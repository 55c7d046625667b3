//! CORS policy built from configured origin patterns

use axum::http::{header, HeaderValue, Method};
use regex::Regex;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Matches request origins against exact origins and `*` wildcard patterns
#[derive(Debug, Clone)]
pub struct OriginMatcher {
    any: bool,
    exact: Vec<String>,
    patterns: Vec<Regex>,
}

impl OriginMatcher {
    /// Compile a list of origins; `*` alone allows every origin
    pub fn new(origins: &[String]) -> anyhow::Result<Self> {
        let mut matcher = Self {
            any: false,
            exact: Vec::new(),
            patterns: Vec::new(),
        };

        for origin in origins {
            let origin = origin.trim().trim_end_matches('/');
            if origin == "*" {
                matcher.any = true;
            } else if origin.contains('*') {
                let pattern = origin
                    .split('*')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(".*");
                matcher.patterns.push(Regex::new(&format!("^{}$", pattern))?);
            } else {
                matcher.exact.push(origin.to_string());
            }
        }

        Ok(matcher)
    }

    /// Whether every origin is allowed
    pub fn allows_any(&self) -> bool {
        self.any
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.any
            || self.exact.iter().any(|o| o == origin)
            || self.patterns.iter().any(|p| p.is_match(origin))
    }
}

/// Build the CORS layer for the configured origins
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let matcher = OriginMatcher::new(origins)?;

    let allow_origin = if matcher.allows_any() {
        AllowOrigin::any()
    } else {
        let matcher = Arc::new(matcher);
        AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|origin| matcher.allows(origin))
                .unwrap_or(false)
        })
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(origins: &[&str]) -> OriginMatcher {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        OriginMatcher::new(&origins).unwrap()
    }

    #[test]
    fn test_exact_and_wildcard_origins() {
        let m = matcher(&["http://localhost:3000/", "chrome-extension://*"]);

        assert!(!m.allows_any());
        assert!(m.allows("http://localhost:3000"));
        assert!(m.allows("chrome-extension://abcdefghijklmnop"));
        assert!(!m.allows("http://localhost:5173"));
        assert!(!m.allows("https://chrome-extension.evil.com"));
    }

    #[test]
    fn test_wildcard_subdomain() {
        let m = matcher(&["https://*.ibani.dev"]);
        assert!(m.allows("https://app.ibani.dev"));
        assert!(!m.allows("https://ibani.dev"));
        assert!(!m.allows("https://app.ibani.dev.example.com"));
    }

    #[test]
    fn test_star_allows_everything() {
        let m = matcher(&["*"]);
        assert!(m.allows_any());
        assert!(m.allows("http://anything.example"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let m = matcher(&["http://a.b:3000"]);
        assert!(!m.allows("http://aXb:3000"));

        let m = matcher(&["http://a.b*"]);
        assert!(m.allows("http://a.b:3000"));
        assert!(!m.allows("http://aXb:3000"));
    }
}
