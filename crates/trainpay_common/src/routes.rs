// --- File: crates/trainpay_common/src/routes.rs ---
use axum::{routing::post, Router};

use crate::handlers::health_handler;

/// Routes that need no external service: currently only the `/test` health check.
pub fn routes() -> Router {
    Router::new().route("/test", post(health_handler))
}
