//! Route definitions for slip uploads.

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;
use trainpay_common::ObjectStorage;

use crate::handlers::{upload_slip_handler, StorageState};

/// Creates a router for the upload endpoint.
///
/// `max_body_bytes` replaces axum's 2 MiB default for this route only.
pub fn routes(storage: Arc<dyn ObjectStorage>, max_body_bytes: usize) -> Router {
    let state = Arc::new(StorageState { storage });

    Router::new()
        .route("/upload-slip", post(upload_slip_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
