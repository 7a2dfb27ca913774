//! Error taxonomy for the proxy.
//!
//! Configuration errors surface to the caller of `start`; everything else is
//! scoped to a single exchange and turns into an error response for that
//! client only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// `start` was called while the server is already running.
    #[error("proxy server already started")]
    AlreadyStarted,

    /// `start` was called without a configured port.
    #[error("no port configured")]
    MissingPort,

    /// The listener socket could not be created or bound.
    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),

    /// The request target carries no host the relay could resolve.
    #[error("request target has no resolvable host: {0}")]
    MalformedTarget(String),

    /// DNS, connect or mid-flight failure talking to the upstream.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The inject callback returned an error for a triggered exchange.
    #[error("body transform failed: {0}")]
    Transform(#[source] anyhow::Error),
}
