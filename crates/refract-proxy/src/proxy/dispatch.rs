//! Response dispatching: streamed pass-through or buffered rewrite.
//!
//! Once upstream response headers arrive the trigger is evaluated exactly
//! once, against metadata only. Untriggered exchanges stream body frames to
//! the client in bounded memory. Triggered exchanges buffer the whole body,
//! run it through the inject callback and answer with the transformed bytes,
//! with `content-length` recomputed so the declared framing matches what is
//! actually sent.

use super::body::SignalBody;
use super::context::{RequestMeta, ResponseMeta};
use super::forwarding::error_response;
use crate::config::{InjectFn, LoggerFn, ProxyConfig, TriggerFn};
use chrono::{DateTime, Utc};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_LENGTH, TRANSFER_ENCODING};
use hyper::Response;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error};

/// Per-exchange snapshot of the configured callbacks.
///
/// Taken once when the exchange begins, so config edits made while it is in
/// flight only affect later exchanges.
pub struct ExchangeHooks {
    pub trigger: Option<Arc<TriggerFn>>,
    pub inject: Option<Arc<InjectFn>>,
    pub logger: Option<Arc<LoggerFn>>,
}

impl ExchangeHooks {
    pub fn snapshot(config: &ProxyConfig) -> Self {
        Self {
            trigger: config.trigger(),
            inject: config.inject(),
            logger: config.logger(),
        }
    }
}

/// Dispatch one upstream response to the client.
pub async fn dispatch_response(
    upstream_res: Response<Incoming>,
    req_meta: &RequestMeta,
    hooks: ExchangeHooks,
    started_at: DateTime<Utc>,
) -> Response<BoxBody<Bytes, hyper::Error>> {
    let (mut parts, body) = upstream_res.into_parts();
    let res_meta = ResponseMeta::from_parts(&parts);

    // The trigger sees metadata only; no body bytes have been consumed yet.
    // Absent trigger means never triggered.
    let triggered = hooks
        .trigger
        .as_ref()
        .map(|trigger| trigger(req_meta, &res_meta))
        .unwrap_or(false);

    if !triggered {
        // Streaming path: forward frames as they arrive, bounded memory.
        return Response::from_parts(parts, BoxBody::new(body));
    }

    debug!("Trigger matched for {} {}", req_meta.method, req_meta.uri);

    let Some(inject) = hooks.inject else {
        error!("Trigger matched but no inject callback is configured");
        return error_response(500, "inject callback not configured");
    };

    // Buffering path: the whole body is materialized, owned by this
    // exchange alone and dropped with it.
    let buffered = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            error!("Failed to collect upstream response body: {}", e);
            return error_response(502, "Failed to read upstream response");
        }
    };

    let transformed = match inject(buffered) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Inject callback failed: {:#}", e);
            return error_response(502, "body transform failed");
        }
    };

    // The rewrite may have changed the body length; the declared framing has
    // to follow or clients truncate or hang.
    parts.headers.remove(TRANSFER_ENCODING);
    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(transformed.len() as u64));

    let full = Full::new(transformed).map_err(|never: Infallible| match never {});

    match hooks.logger {
        Some(logger) => {
            let (done_tx, done_rx) = oneshot::channel();
            let meta = req_meta.clone();
            tokio::spawn(async move {
                // Fires only once the last frame has been handed to the
                // client connection; skipped if the client went away first.
                if done_rx.await.is_ok() {
                    logger(&meta, started_at, Utc::now());
                }
            });
            Response::from_parts(parts, BoxBody::new(SignalBody::new(full, done_tx)))
        }
        None => Response::from_parts(parts, BoxBody::new(full)),
    }
}
