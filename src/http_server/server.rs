//! # HTTP Server
//!
//! Builds the router around an injected storage handle and owns the
//! listen/drain lifecycle.

use std::future::{Future, IntoFuture};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event, log_event_with_fields, Event};
use crate::storage::Storage;

use super::config::HttpServerConfig;
use super::student_routes::student_routes;

/// How the server stopped after a shutdown signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request finished within the grace period
    Drained,
    /// Grace period expired; remaining requests were abandoned
    TimedOut,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// HTTP Server for the students API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given storage handle
    pub fn new<S: Storage>(config: HttpServerConfig, storage: Arc<S>) -> Self {
        let router = Self::build_router(&config, storage);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router<S: Storage>(config: &HttpServerConfig, storage: Arc<S>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest("/api", student_routes(storage))
            .layer(cors)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured listen address
    pub async fn bind(&self) -> io::Result<TcpListener> {
        let raw = self.config.socket_addr();
        let addr: SocketAddr = raw.parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listen address {}: {}", raw, e),
            )
        })?;

        TcpListener::bind(addr).await
    }

    /// Serve on a bound listener until `signal` resolves, then drain for at
    /// most `grace`
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        signal: F,
        grace: Duration,
    ) -> io::Result<ShutdownOutcome>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?.to_string();
        log_event_with_fields(Event::ServerStarted, &[("address", local_addr.as_str())]);

        let (drain_tx, drain_rx) = oneshot::channel::<()>();
        let server = axum::serve(listener, self.router).with_graceful_shutdown(async move {
            let _ = drain_rx.await;
        });
        let mut serving = tokio::spawn(server.into_future());

        tokio::select! {
            result = &mut serving => {
                // Server exited on its own before any signal
                result.map_err(io::Error::other)??;
                return Ok(ShutdownOutcome::Drained);
            }
            _ = signal => {}
        }

        log_event(Event::ShutdownStart);
        let _ = drain_tx.send(());

        match tokio::time::timeout(grace, &mut serving).await {
            Ok(result) => {
                result.map_err(io::Error::other)??;
                Ok(ShutdownOutcome::Drained)
            }
            Err(_) => {
                serving.abort();
                log_event_with_fields(
                    Event::ShutdownTimeout,
                    &[("grace_ms", grace.as_millis().to_string().as_str())],
                );
                Ok(ShutdownOutcome::TimedOut)
            }
        }
    }
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    fn server(config: HttpServerConfig) -> HttpServer {
        HttpServer::new(config, Arc::new(InMemoryStorage::new()))
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = server(config).router();
    }

    #[tokio::test]
    async fn test_serve_drains_on_signal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(server(HttpServerConfig::default()).serve(
            listener,
            async move {
                let _ = rx.await;
            },
            Duration::from_secs(5),
        ));

        tx.send(()).unwrap();
        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome, ShutdownOutcome::Drained);
    }

    #[tokio::test]
    async fn test_bind_rejects_bad_address() {
        let config = HttpServerConfig {
            host: "not an address".to_string(),
            ..Default::default()
        };
        let err = server(config).bind().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let config = HttpServerConfig {
            port: 0,
            ..Default::default()
        };
        let listener = server(config).bind().await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
