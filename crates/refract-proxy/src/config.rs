//! Proxy configuration: the port plus the three pluggable callbacks.
//!
//! Setters store unconditionally (last write wins) and return `&mut Self`
//! for chaining. Nothing is validated at set time; a missing port or a
//! missing inject surfaces at use time (`start`, or the first triggered
//! exchange). The running server keeps the config behind a lock, so values
//! may be changed at any time — changes apply to subsequent exchanges only.

use crate::proxy::context::{RequestMeta, ResponseMeta};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Predicate deciding whether a response body gets intercepted and
/// rewritten. Sees request and response metadata only, never body bytes.
pub type TriggerFn = dyn Fn(&RequestMeta, &ResponseMeta) -> bool + Send + Sync;

/// Transformation applied to a fully buffered response body when triggered.
pub type InjectFn = dyn Fn(Bytes) -> anyhow::Result<Bytes> + Send + Sync;

/// Observer invoked once per triggered exchange after the client response
/// has been sent, with start and end timestamps.
pub type LoggerFn = dyn Fn(&RequestMeta, DateTime<Utc>, DateTime<Utc>) + Send + Sync;

/// Typed option store for the proxy.
#[derive(Clone, Default)]
pub struct ProxyConfig {
    port: Option<u16>,
    trigger: Option<Arc<TriggerFn>>,
    inject: Option<Arc<InjectFn>>,
    logger: Option<Arc<LoggerFn>>,
}

impl ProxyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    pub fn set_trigger<F>(&mut self, trigger: F) -> &mut Self
    where
        F: Fn(&RequestMeta, &ResponseMeta) -> bool + Send + Sync + 'static,
    {
        self.trigger = Some(Arc::new(trigger));
        self
    }

    pub fn set_inject<F>(&mut self, inject: F) -> &mut Self
    where
        F: Fn(Bytes) -> anyhow::Result<Bytes> + Send + Sync + 'static,
    {
        self.inject = Some(Arc::new(inject));
        self
    }

    pub fn set_logger<F>(&mut self, logger: F) -> &mut Self
    where
        F: Fn(&RequestMeta, DateTime<Utc>, DateTime<Utc>) + Send + Sync + 'static,
    {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn trigger(&self) -> Option<Arc<TriggerFn>> {
        self.trigger.clone()
    }

    pub fn inject(&self) -> Option<Arc<InjectFn>> {
        self.inject.clone()
    }

    pub fn logger(&self) -> Option<Arc<LoggerFn>> {
        self.logger.clone()
    }
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("port", &self.port)
            .field("trigger", &self.trigger.as_ref().map(|_| "<fn>"))
            .field("inject", &self.inject.as_ref().map(|_| "<fn>"))
            .field("logger", &self.logger.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
