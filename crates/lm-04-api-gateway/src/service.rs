//! API Gateway service: binds the listener and serves the router until the
//! shutdown signal fires.

use crate::domain::{GatewayConfig, GatewayError};
use crate::middleware::{cleanup_task, RateLimitLayer, RateLimitState};
use crate::router::build_router;
use crate::state::AppState;
use axum::Router;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// How often idle rate-limit buckets are swept.
const BUCKET_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
    rate_limit: RateLimitLayer,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        library_telemetry::register_metrics()
            .map_err(|e| GatewayError::Telemetry(e.to_string()))?;

        let rate_limit = RateLimitLayer::new(config.rate_limit.clone());
        Ok(Self {
            config,
            state,
            rate_limit,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Shared rate limiter state (bucket count, manual sweeps).
    pub fn rate_limit_state(&self) -> Arc<RateLimitState> {
        self.rate_limit.state()
    }

    /// The full router with every middleware layer applied.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config, self.rate_limit.clone())
    }

    /// Bind the configured HTTP address.
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.http_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))
    }

    /// Serve on `listener` until `shutdown` resolves.
    ///
    /// In-flight requests get `timeouts.shutdown_grace` to finish; connections
    /// still open after that are dropped.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send,
    {
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let sweeper = tokio::spawn(cleanup_task(
            self.rate_limit.state(),
            BUCKET_SWEEP_INTERVAL,
            self.config.rate_limit.idle_bucket_ttl,
        ));

        let (drain_tx, drain_rx) = oneshot::channel::<()>();
        let app = self
            .router()
            .into_make_service_with_connect_info::<SocketAddr>();
        let server = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .into_future();
        tokio::pin!(server);

        info!(addr = %local_addr, "API gateway listening");

        let grace = self.config.timeouts.shutdown_grace;
        let result = tokio::select! {
            result = &mut server => result,
            _ = shutdown => {
                info!(grace_secs = grace.as_secs(), "shutdown signal received, draining connections");
                let _ = drain_tx.send(());
                match tokio::time::timeout(grace, &mut server).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("grace period elapsed, dropping open connections");
                        Ok(())
                    }
                }
            }
        };

        sweeper.abort();
        match result {
            Ok(()) => {
                info!("API gateway stopped");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "HTTP server error");
                Err(GatewayError::Serve(e.to_string()))
            }
        }
    }
}
