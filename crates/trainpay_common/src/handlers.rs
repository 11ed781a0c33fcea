// --- File: crates/trainpay_common/src/handlers.rs ---
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const HEALTH_MESSAGE: &str = "🚀 API is running successfully!";

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    /// Current server time, ISO-8601 UTC with milliseconds
    pub time: String,
}

/// Liveness probe. Touches no external service.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/test",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "Health"
))]
#[axum::debug_handler]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: HEALTH_MESSAGE.to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
