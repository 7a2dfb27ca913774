//! ProxyServer struct, lifecycle guard and accept loop.
//!
//! One tokio task per accepted connection; exchanges share nothing mutable
//! beyond the config lock, and callbacks are snapshotted once per exchange.

use super::client::{create_http_client, HttpClient};
use super::dispatch::ExchangeHooks;
use super::handler::handle_request;
use super::network::create_listener;
use crate::config::ProxyConfig;
use crate::error::ProxyError;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use parking_lot::{Mutex, RwLock};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Server lifecycle. Stopped is the initial state; Running is terminal
/// (process-lifetime server, there is no stop operation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServerState {
    Stopped,
    Running,
}

impl ServerState {
    /// Attempt the Stopped -> Running transition.
    fn start(&mut self) -> Result<(), ProxyError> {
        match self {
            ServerState::Stopped => {
                *self = ServerState::Running;
                Ok(())
            }
            ServerState::Running => Err(ProxyError::AlreadyStarted),
        }
    }
}

/// State shared between the server handle and in-flight exchanges.
struct Shared {
    config: RwLock<ProxyConfig>,
    http_client: HttpClient,
}

/// The proxy server: configuration handle plus lifecycle guard.
pub struct ProxyServer {
    shared: Arc<Shared>,
    state: Mutex<ServerState>,
}

impl ProxyServer {
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config: RwLock::new(config),
                http_client: create_http_client(),
            }),
            state: Mutex::new(ServerState::Stopped),
        }
    }

    /// Currently configured port.
    pub fn port(&self) -> Option<u16> {
        self.shared.config.read().port()
    }

    /// Edit the live configuration. Takes effect for subsequent exchanges
    /// only; exchanges already in flight keep their snapshot.
    pub fn configure<F: FnOnce(&mut ProxyConfig)>(&self, f: F) {
        f(&mut self.shared.config.write());
    }

    /// Bind the listener and spawn the accept loop.
    ///
    /// Returns the bound address (useful with port 0). Fails with
    /// [`ProxyError::AlreadyStarted`] when called on a running server,
    /// [`ProxyError::MissingPort`] or [`ProxyError::Bind`] otherwise; on
    /// those the server stays Stopped so a corrected config can retry.
    pub fn start(&self) -> Result<SocketAddr, ProxyError> {
        let mut state = self.state.lock();
        state.start()?;

        let bound = self.bind();
        if bound.is_err() {
            *state = ServerState::Stopped;
        }
        bound
    }

    fn bind(&self) -> Result<SocketAddr, ProxyError> {
        let port = self
            .shared
            .config
            .read()
            .port()
            .ok_or(ProxyError::MissingPort)?;

        let listener = create_listener(SocketAddr::from(([0, 0, 0, 0], port)))?;
        let addr = listener.local_addr()?;

        info!("Proxy listening on {}", addr);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(run_accept_loop(shared, listener));
        Ok(addr)
    }
}

/// Accept loop: dispatch each connection to its own task.
async fn run_accept_loop(shared: Arc<Shared>, listener: TcpListener) {
    loop {
        let (stream, remote_addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        let shared = Arc::clone(&shared);

        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req| {
                let shared = Arc::clone(&shared);
                async move {
                    let hooks = ExchangeHooks::snapshot(&shared.config.read());
                    handle_request(&shared.http_client, hooks, req).await
                }
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                error!("Error serving connection from {}: {}", remote_addr, err);
            }
        });
    }
}
