//! Request relay: one inbound request becomes one outbound request.
//!
//! Method and headers are copied verbatim except `accept-encoding`, which is
//! dropped so upstreams answer uncompressed and the dispatcher can inspect
//! body bytes directly. The inbound body streams through without buffering;
//! hyper propagates back-pressure between the two connections.

use super::client::HttpClient;
use crate::error::ProxyError;
use crate::target::UpstreamTarget;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::ACCEPT_ENCODING;
use hyper::{Request, Response};
use std::convert::Infallible;
use tracing::debug;

/// Helper function to create an error response for a failed exchange.
pub fn error_response(status: u16, message: &str) -> Response<BoxBody<Bytes, hyper::Error>> {
    let body = format!(r#"{{"error": "{message}"}}"#);
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(BoxBody::new(
            Full::new(Bytes::from(body)).map_err(|never: Infallible| match never {}),
        ))
        .unwrap()
}

/// Relay one inbound request to its upstream, streaming the request body.
///
/// The `host` header is kept as-is: the client already addressed it to the
/// upstream this exchange resolves to.
pub async fn relay_request(
    http_client: &HttpClient,
    req: Request<Incoming>,
    target: &UpstreamTarget,
) -> Result<Response<Incoming>, ProxyError> {
    let (parts, body) = req.into_parts();

    debug!("Relaying {} {} to {}", parts.method, parts.uri, target.uri());

    let mut upstream_req = Request::builder().method(parts.method).uri(target.uri());

    for (key, value) in parts.headers.iter() {
        if key != &ACCEPT_ENCODING {
            upstream_req = upstream_req.header(key, value);
        }
    }

    // Pass the request body through directly, end-of-inbound ends outbound.
    let upstream_req = upstream_req
        .body(BoxBody::new(body))
        .expect("method, uri and headers were taken from a parsed request");

    Ok(http_client.request(upstream_req).await?)
}
