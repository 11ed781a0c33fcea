// --- File: crates/trainpay_common/src/http.rs ---
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{HttpStatusCode, TrainpayError};

// Include the client module
pub mod client;

impl TrainpayError {
    /// The axum status code for this error.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Builds the flat `{ "error": message }` body every endpoint uses for failures.
pub fn error_body(message: impl Into<String>) -> Json<Value> {
    Json(json!({ "error": message.into() }))
}

/// Renders any error as `status + { "error": message }`.
///
/// Handlers with a richer failure shape (declined charges, failed uploads)
/// build their own response instead of relying on this.
impl IntoResponse for TrainpayError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, error_body(self.to_string())).into_response()
    }
}

/// Unwraps a JSON body, falling back to `T::default()` when it is absent or unreadable.
///
/// A request without a usable body then fails the handler's own field checks,
/// so callers always see the endpoint's "missing field" message.
pub fn payload_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!("Ignoring unreadable JSON body: {}", rejection.body_text());
            T::default()
        }
    }
}
