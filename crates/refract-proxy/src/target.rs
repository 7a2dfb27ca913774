//! Upstream target resolution.
//!
//! Forward-proxy clients send the request target in absolute form
//! (`GET http://example.com/page HTTP/1.1`). The target is parsed once per
//! request into host, port and path; the port always ends up populated,
//! defaulting to 443 for `https` targets and 80 otherwise.

use crate::error::ProxyError;
use hyper::Uri;

const HTTP_PORT: u16 = 80;
const HTTPS_PORT: u16 = 443;

/// Where one exchange is headed. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    host: String,
    port: u16,
    path_and_query: String,
}

impl UpstreamTarget {
    /// Resolve the upstream from an inbound request URI.
    ///
    /// Fails with [`ProxyError::MalformedTarget`] when the target carries no
    /// host (origin-form target without an authority); the caller turns that
    /// into a 400 for this exchange.
    pub fn from_uri(uri: &Uri) -> Result<Self, ProxyError> {
        let host = uri
            .host()
            .ok_or_else(|| ProxyError::MalformedTarget(uri.to_string()))?
            .to_string();

        let port = uri.port_u16().unwrap_or_else(|| {
            match uri.scheme_str() {
                Some("https") => HTTPS_PORT,
                _ => HTTP_PORT,
            }
        });

        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .filter(|pq| !pq.is_empty())
            .unwrap_or("/")
            .to_string();

        Ok(Self {
            host,
            port,
            path_and_query,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path_and_query(&self) -> &str {
        &self.path_and_query
    }

    /// Render the outbound request URI. The relay always dials plain HTTP.
    pub fn uri(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path_and_query)
    }
}
