//! Outbound HTTP client creation.
//!
//! One shared hyper-util legacy client dials every upstream. Outbound
//! traffic is plain HTTP/1.1; the connector's built-in pooling is all the
//! reuse the proxy relies on.

use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const KEEPALIVE: Duration = Duration::from_secs(90);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Type alias for the HTTP client used by the relay.
pub type HttpClient = Client<HttpConnector, BoxBody<Bytes, hyper::Error>>;

/// Create the shared outbound client.
pub fn create_http_client() -> HttpClient {
    let mut connector = HttpConnector::new();
    connector.set_keepalive(Some(KEEPALIVE));
    connector.set_connect_timeout(Some(CONNECT_TIMEOUT));

    let client = Client::builder(TokioExecutor::new())
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .build(connector);

    debug!(
        "Outbound client configured (HTTP/1.1): connect_timeout={}s, keepalive={}s",
        CONNECT_TIMEOUT.as_secs(),
        KEEPALIVE.as_secs()
    );

    client
}
