use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{ops_handlers, page_handlers, record_handlers, webhook_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page_handlers::index))
        .route("/get-names", get(record_handlers::get_names))
        .route("/webhook", post(webhook_handlers::receive_webhook))
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route("/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
