//! HTTP observability server.
//!
//! Serves Prometheus metrics and health checks on a dedicated port.
//!
//! ## Endpoints
//! - `GET /metrics` - metrics in the Prometheus text format
//! - `GET /health` - health check with current table sizes
//! - `GET /health/ready` - readiness probe
//! - `GET /health/live` - liveness probe

use super::health::{HealthChecker, HealthDetails, HealthStatus};
use crate::domain::store::AuctionStore;
use crate::shared::metrics::METRICS;
use crate::shared::timestamp::get_fast_timestamp;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Observability server bound to its own port.
pub struct ObservabilityServer<S> {
    addr: SocketAddr,
    health_checker: Arc<HealthChecker>,
    store: Arc<S>,
}

impl<S: AuctionStore + 'static> ObservabilityServer<S> {
    pub fn new(port: u16, store: Arc<S>) -> Self {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        Self {
            addr,
            health_checker: Arc::new(HealthChecker::new(env!("CARGO_PKG_VERSION"))),
            store,
        }
    }

    pub fn health_checker(&self) -> Arc<HealthChecker> {
        self.health_checker.clone()
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler::<S>))
            .route("/health/ready", get(readiness_handler::<S>))
            .route("/health/live", get(liveness_handler::<S>))
            .with_state((self.health_checker.clone(), self.store.clone()));

        info!("observability server listening on {}", self.addr);
        info!("metrics endpoint: http://{}/metrics", self.addr);
        info!("health endpoint: http://{}/health", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn metrics_handler() -> Response {
    let metrics = METRICS.export();
    (StatusCode::OK, metrics).into_response()
}

async fn health_handler<S: AuctionStore>(
    State((checker, store)): State<(Arc<HealthChecker>, Arc<S>)>,
) -> Response {
    let sizes = store.table_sizes(get_fast_timestamp());
    let details = HealthDetails {
        users: sizes.users,
        items: sizes.items,
        open_auctions: sizes.open_items,
        bids: sizes.bids,
        comments: sizes.comments,
        buy_nows: sizes.buy_nows,
    };

    let response = checker.check_health_detailed(details);

    let status_code = match response.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response)).into_response()
}

async fn readiness_handler<S: AuctionStore>(
    State((checker, _)): State<(Arc<HealthChecker>, Arc<S>)>,
) -> Response {
    if checker.check_readiness() {
        StatusCode::OK.into_response()
    } else {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

async fn liveness_handler<S: AuctionStore>(
    State((checker, _)): State<(Arc<HealthChecker>, Arc<S>)>,
) -> Response {
    if checker.check_liveness() {
        StatusCode::OK.into_response()
    } else {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}
