use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{handlers, registry::CollectorRegistry};

pub struct ExporterState {
    pub registry: CollectorRegistry,
}

impl ExporterState {
    pub fn new(registry: CollectorRegistry) -> Self {
        Self { registry }
    }
}

pub fn exporter_router(state: Arc<ExporterState>) -> Router {
    Router::new()
        .route("/", get(handlers::metrics::prometheus_metrics))
        .route("/metrics", get(handlers::metrics::prometheus_metrics))
        .route("/health/live", get(handlers::health::health_live))
        .with_state(state)
}
