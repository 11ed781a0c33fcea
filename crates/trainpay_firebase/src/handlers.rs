//! HTTP handler for slip uploads.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};
use trainpay_common::{error_body, ObjectStorage, TrainpayError};

use crate::logic::{upload_slip, SlipFile, DEFAULT_CONTENT_TYPE, MISSING_SLIP_OR_FOLDER};

/// Multipart field carrying the file.
pub const SLIP_FIELD: &str = "slip";
/// Multipart field naming the destination folder.
pub const FOLDER_FIELD: &str = "folderPath";

/// Shared state for the upload handler
#[derive(Clone)]
pub struct StorageState {
    pub storage: Arc<dyn ObjectStorage>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadSlipResponse {
    /// Always `"Upload successful"`
    pub message: String,
    /// Object path inside the bucket
    pub path: String,
    /// Read URL, valid for ten minutes
    pub url: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadFailedResponse {
    /// Always `"Upload failed"`
    pub error: String,
    pub details: String,
}

/// Accepts a multipart form with a `slip` file and a `folderPath` text field.
///
/// Only a `slip` part that carries a filename counts as the file. Other fields
/// are ignored. When a field repeats, the last one wins.
#[axum::debug_handler]
pub async fn upload_slip_handler(
    State(state): State<Arc<StorageState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            debug!("Rejected upload body: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, error_body(MISSING_SLIP_OR_FOLDER)).into_response();
        }
    };

    let mut file = None;
    let mut folder_path = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                debug!("Malformed multipart body: {}", e.body_text());
                return (e.status(), error_body(e.body_text())).into_response();
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        let read = match name.as_str() {
            // A `slip` part without a filename is a text field, not a file.
            SLIP_FIELD => match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or(DEFAULT_CONTENT_TYPE)
                        .to_string();
                    field.bytes().await.map(|data| {
                        file = Some(SlipFile {
                            data,
                            file_name,
                            content_type,
                        });
                    })
                }
                None => Ok(()),
            },
            FOLDER_FIELD => field.text().await.map(|text| folder_path = Some(text)),
            _ => Ok(()),
        };

        if let Err(e) = read {
            debug!("Failed to read multipart field {}: {}", name, e.body_text());
            return (e.status(), error_body(e.body_text())).into_response();
        }
    }

    match upload_slip(state.storage.as_ref(), file, folder_path, Utc::now).await {
        Ok(stored) => Json(UploadSlipResponse {
            message: "Upload successful".to_string(),
            path: stored.path,
            url: stored.url,
        })
        .into_response(),
        Err(err @ TrainpayError::ValidationError(_)) => err.into_response(),
        Err(err) => {
            error!("Slip upload failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UploadFailedResponse {
                    error: "Upload failed".to_string(),
                    details: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
