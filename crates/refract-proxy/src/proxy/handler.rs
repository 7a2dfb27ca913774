//! Per-exchange handling: resolve the target, relay, dispatch.
//!
//! Every failure here is scoped to the exchange. Malformed targets get a
//! 400, unreachable upstreams a 502; the server and other exchanges keep
//! running either way.

use super::client::HttpClient;
use super::context::RequestMeta;
use super::dispatch::{dispatch_response, ExchangeHooks};
use super::forwarding::{error_response, relay_request};
use crate::target::UpstreamTarget;
use chrono::Utc;
use http_body_util::combinators::BoxBody;
use hyper::body::{Bytes, Incoming};
use hyper::{Request, Response};
use std::convert::Infallible;
use tracing::{debug, error, warn};

/// Handle one inbound exchange end to end.
pub async fn handle_request(
    http_client: &HttpClient,
    hooks: ExchangeHooks,
    req: Request<Incoming>,
) -> Result<Response<BoxBody<Bytes, hyper::Error>>, Infallible> {
    let started_at = Utc::now();
    let req_meta = RequestMeta::from_request(&req);

    debug!("Received request: {} {}", req_meta.method, req_meta.uri);

    let target = match UpstreamTarget::from_uri(req.uri()) {
        Ok(target) => target,
        Err(e) => {
            warn!("Rejecting exchange: {}", e);
            return Ok(error_response(
                400,
                "request target has no resolvable host",
            ));
        }
    };

    let upstream_res = match relay_request(http_client, req, &target).await {
        Ok(res) => res,
        Err(e) => {
            error!("Failed to reach upstream {}: {}", target.uri(), e);
            return Ok(error_response(502, "Bad Gateway"));
        }
    };

    Ok(dispatch_response(upstream_res, &req_meta, hooks, started_at).await)
}
