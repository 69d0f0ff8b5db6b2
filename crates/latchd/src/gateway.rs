//! HTTP gateway.
//!
//! A `tiny_http` accept loop bridged onto the tokio runtime: the blocking
//! `recv` loop runs on a `spawn_blocking` thread and each request is
//! dispatched into the async [`LockService`] with `Handle::block_on`. At one
//! door per deployment the request rate does not justify a framework.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use latch_engine::LockService;
use tokio::runtime::Handle;

use crate::router;

pub struct Gateway {
    server: tiny_http::Server,
    service: Arc<LockService>,
}

impl Gateway {
    /// Bind the listener. Port 0 picks a free port (tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub fn bind(addr: &str, service: Arc<LockService>) -> anyhow::Result<Self> {
        let server = tiny_http::Server::http(addr)
            .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
        Ok(Self { server, service })
    }

    /// The bound socket address.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-IP listener (cannot happen with
    /// [`Self::bind`]).
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .server_addr()
            .to_ip()
            .context("listener has no IP address")
    }

    /// Serve until the process exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the accept loop thread panics or its runtime
    /// handle is lost.
    pub async fn run(self) -> anyhow::Result<()> {
        let handle = Handle::current();
        tokio::task::spawn_blocking(move || self.serve_blocking(&handle))
            .await
            .context("gateway accept loop panicked")?
    }

    fn serve_blocking(self, handle: &Handle) -> anyhow::Result<()> {
        for mut request in self.server.incoming_requests() {
            let mut body = String::new();
            if let Err(error) = request.as_reader().read_to_string(&mut body) {
                tracing::warn!(%error, "failed to read request body");
                let _ = request.respond(tiny_http::Response::from_string("").with_status_code(400));
                continue;
            }

            let method = request.method().to_string();
            let url = request.url().to_string();
            let reply = handle.block_on(router::route(&self.service, &method, &url, &body));

            tracing::debug!(method, url, status = reply.status, "request served");

            let response = tiny_http::Response::from_string(reply.body.to_string())
                .with_status_code(reply.status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json")
                        .expect("static header is valid"),
                );
            if let Err(error) = request.respond(response) {
                tracing::warn!(%error, "failed to send response");
            }
        }
        Ok(())
    }
}
