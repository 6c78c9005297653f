//! HTTP server lifecycle.
//!
//! # Design
//! `Server` owns the configured routes and, once started, a background task
//! running `axum::serve`. `close` fires a oneshot that drives axum's graceful
//! shutdown and then waits for the task, so the listener is released by the
//! time it returns. Requests that match no API route fall through to the
//! static files under `public_path`; unknown GET paths get
//! `public_path/index.html` so a single-page app can route client-side.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::{Config, DEFAULT_HOST, DEFAULT_PUBLIC_PATH};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server is already running on {0}")]
    AlreadyRunning(SocketAddr),

    #[error("server task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct ServerOptions {
    pub host: String,
    pub port: u16,
    pub public_path: PathBuf,
    pub routes: Router,
}

impl ServerOptions {
    /// Options with the default host and public path.
    pub fn new(port: u16, routes: Router) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port,
            public_path: PathBuf::from(DEFAULT_PUBLIC_PATH),
            routes,
        }
    }

    pub fn from_config(config: &Config, routes: Router) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            public_path: config.public_path.clone(),
            routes,
        }
    }
}

struct Running {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

pub struct Server {
    host: String,
    port: u16,
    public_path: PathBuf,
    routes: Router,
    running: Option<Running>,
}

impl Server {
    pub fn new(options: ServerOptions) -> Self {
        let ServerOptions {
            host,
            port,
            public_path,
            routes,
        } = options;
        Self {
            host,
            port,
            public_path,
            routes,
            running: None,
        }
    }

    /// The full application: API routes, static files, SPA fallback and
    /// middleware. Usable without binding a socket.
    pub fn app(&self) -> Router {
        let index = ServeFile::new(self.public_path.join("index.html"));
        let statics = ServeDir::new(&self.public_path).fallback(index);

        self.routes
            .clone()
            .fallback_service(statics)
            .layer(CompressionLayer::new())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and start serving in the background. Returns the bound address,
    /// which differs from the configured one when port 0 was requested.
    pub async fn start(&mut self) -> Result<SocketAddr, ServerError> {
        if let Some(running) = &self.running {
            return Err(ServerError::AlreadyRunning(running.addr));
        }

        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        let (shutdown, signal) = oneshot::channel::<()>();
        let app = self.app();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    // A dropped sender also means "stop".
                    let _ = signal.await;
                })
                .await
        });

        tracing::info!(
            addr = %local_addr,
            public_path = %self.public_path.display(),
            "server running"
        );
        self.running = Some(Running {
            addr: local_addr,
            shutdown,
            task,
        });
        Ok(local_addr)
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.addr)
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    /// Does nothing if the server is not running.
    pub async fn close(&mut self) -> Result<(), ServerError> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };
        let _ = running.shutdown.send(());
        running
            .task
            .await
            .map_err(|e| ServerError::Task(e.to_string()))??;
        tracing::info!(addr = %running.addr, "server closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    fn options() -> ServerOptions {
        let routes = Router::new().route("/ping", get(|| async { "pong" }));
        let mut options = ServerOptions::new(0, routes);
        options.host = "127.0.0.1".to_string();
        options
    }

    #[tokio::test]
    async fn start_twice_is_rejected() {
        let mut server = Server::new(options());
        let addr = server.start().await.unwrap();
        assert_ne!(addr.port(), 0);
        assert_eq!(server.local_addr(), Some(addr));

        let err = server.start().await.unwrap_err();
        assert!(matches!(err, ServerError::AlreadyRunning(a) if a == addr));
        server.close().await.unwrap();
    }

    #[tokio::test]
    async fn close_releases_the_listener() {
        let mut server = Server::new(options());
        let addr = server.start().await.unwrap();
        server.close().await.unwrap();

        assert!(server.local_addr().is_none());
        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
        // Closing again is harmless.
        server.close().await.unwrap();
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let mut first = Server::new(options());
        let addr = first.start().await.unwrap();

        let mut options = options();
        options.port = addr.port();
        let err = Server::new(options).start().await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { .. }));
        first.close().await.unwrap();
    }
}
