//! Proxy server module.
//!
//! Data flow: client -> server harness -> request relay -> upstream ->
//! response dispatcher -> (streaming | buffering) -> client.
//!
//! # Module Structure
//!
//! - `server` - ProxyServer struct, lifecycle guard and accept loop
//! - `handler` - per-exchange handling (target resolution, relay, dispatch)
//! - `forwarding` - outbound request construction and relay
//! - `dispatch` - response dispatching (streamed pass-through vs. buffered rewrite)
//! - `body` - completion-signaling body wrapper backing the logger hook
//! - `client` - outbound HTTP client creation
//! - `network` - listener utilities
//! - `context` - exchange metadata handed to the pluggable callbacks

mod body;
mod client;
pub(crate) mod context;
mod dispatch;
mod forwarding;
mod handler;
mod network;
mod server;

pub use context::{RequestMeta, ResponseMeta};
pub use server::ProxyServer;
