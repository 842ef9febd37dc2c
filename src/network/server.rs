//! HTTP Server
//!
//! Accepts requests and dispatches them to worker threads.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, SendTimeoutError, Sender};
use tiny_http::{Header, Request, Response};

use crate::controller::Controller;
use crate::error::{PanelError, Result};
use crate::transport::{TcpTransport, Transport};
use super::handler::{ApiResponse, Handler};

/// How often the acceptor checks the shutdown flag
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Largest request body accepted (JSON commands are tiny)
const MAX_BODY_SIZE: u64 = 64 * 1024;

/// Pending requests per worker before the acceptor blocks
const QUEUE_DEPTH_PER_WORKER: usize = 4;

/// Stops a running [`Server`] from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// HTTP server for the control panel
pub struct Server<T = TcpTransport> {
    http: tiny_http::Server,
    handler: Arc<Handler<T>>,
    workers: usize,
    shutdown: ShutdownHandle,
}

impl<T: Transport + 'static> Server<T> {
    /// Bind the listen address from the controller's config
    pub fn new(controller: Controller<T>) -> Result<Self> {
        let addr = controller.config().listen_addr.clone();
        let workers = controller.config().workers.max(1);

        let http = tiny_http::Server::http(addr.as_str())
            .map_err(|e| PanelError::Http(format!("failed to bind {}: {}", addr, e)))?;

        Ok(Self {
            http,
            handler: Arc::new(Handler::new(Arc::new(controller))),
            workers,
            shutdown: ShutdownHandle {
                flag: Arc::new(AtomicBool::new(false)),
            },
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.http.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Serve requests until shutdown (blocking)
    pub fn run(&self) -> Result<()> {
        let (tx, rx) = channel::bounded::<Request>(self.workers * QUEUE_DEPTH_PER_WORKER);

        let mut handles = Vec::with_capacity(self.workers);
        for id in 0..self.workers {
            handles.push(spawn_worker(id, rx.clone(), Arc::clone(&self.handler))?);
        }
        drop(rx);

        if let Some(addr) = self.local_addr() {
            tracing::info!("Listening on http://{} with {} workers", addr, self.workers);
        }

        while !self.shutdown.is_shutdown() {
            match self.http.recv_timeout(POLL_INTERVAL) {
                Ok(Some(request)) => {
                    if !self.enqueue(&tx, request) {
                        break;
                    }
                }
                Ok(None) => continue,
                Err(e) => tracing::warn!("Error accepting request: {}", e),
            }
        }

        tracing::info!("Shutting down, waiting for workers");
        drop(tx);
        for handle in handles {
            if handle.join().is_err() {
                tracing::warn!("Worker thread panicked");
            }
        }

        Ok(())
    }

    /// Hand a request to the pool, waiting while the queue is full.
    /// Returns false when the acceptor should stop.
    fn enqueue(&self, tx: &Sender<Request>, mut request: Request) -> bool {
        loop {
            match tx.send_timeout(request, POLL_INTERVAL) {
                Ok(()) => return true,
                Err(SendTimeoutError::Timeout(pending)) => {
                    if self.shutdown.is_shutdown() {
                        tracing::debug!("Dropping queued request during shutdown");
                        return false;
                    }
                    request = pending;
                }
                Err(SendTimeoutError::Disconnected(_)) => {
                    tracing::error!("All workers exited, stopping acceptor");
                    return false;
                }
            }
        }
    }
}

fn spawn_worker<T: Transport + 'static>(
    id: usize,
    rx: Receiver<Request>,
    handler: Arc<Handler<T>>,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name(format!("panel-worker-{}", id))
        .spawn(move || {
            for request in rx.iter() {
                serve(&handler, request);
            }
            tracing::debug!("Worker {} exiting", id);
        })?;
    Ok(handle)
}

/// Read the body, run the handler, write the response
fn serve<T: Transport>(handler: &Handler<T>, mut request: Request) {
    let peer = request
        .remote_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut body = Vec::new();
    let read = request
        .as_reader()
        .take(MAX_BODY_SIZE + 1)
        .read_to_end(&mut body);

    let response = match read {
        Err(e) => {
            tracing::debug!("Failed to read body from {}: {}", peer, e);
            ApiResponse::error(400, format!("failed to read request body: {}", e))
        }
        Ok(_) if body.len() as u64 > MAX_BODY_SIZE => ApiResponse::error(413, "request body too large"),
        Ok(_) => handler.handle(request.method(), request.url(), &body),
    };

    tracing::trace!("{} {} -> {}", peer, request.url(), response.status);

    if let Err(e) = request.respond(into_http_response(response)) {
        // Client hung up before reading the reply
        tracing::debug!("Failed to write response to {}: {}", peer, e);
    }
}

fn into_http_response(response: ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut http = Response::from_data(response.body).with_status_code(response.status);

    let headers = response
        .content_type
        .map(|ct| ("Content-Type", ct.to_string()))
        .into_iter()
        .chain(response.headers);

    for (name, value) in headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => http.add_header(header),
            Err(()) => tracing::warn!("Dropping invalid header {}: {}", name, value),
        }
    }

    http
}
