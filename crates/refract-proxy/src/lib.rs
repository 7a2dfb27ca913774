//! Refract: a forward HTTP proxy that conditionally rewrites response bodies.
//!
//! Requests are relayed untouched to the host named by the request target.
//! On the response path a configurable trigger predicate inspects the
//! upstream status and headers; when it matches, the whole body is buffered,
//! run through the configured inject transformation and the result is sent
//! to the client. Everything else streams straight through.

pub mod config;
pub mod error;
pub mod proxy;
pub mod target;

pub use config::{InjectFn, LoggerFn, ProxyConfig, TriggerFn};
pub use error::ProxyError;
pub use proxy::{ProxyServer, RequestMeta, ResponseMeta};
pub use target::UpstreamTarget;
