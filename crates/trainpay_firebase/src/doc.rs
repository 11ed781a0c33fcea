//! OpenAPI documentation for the slip upload endpoint

#![allow(dead_code)]
use utoipa::OpenApi;

use crate::handlers::{UploadFailedResponse, UploadSlipResponse};

/// Multipart body of `POST /upload-slip`
#[derive(serde::Deserialize, utoipa::ToSchema)]
struct UploadSlipForm {
    /// The slip image
    #[schema(value_type = String, format = Binary)]
    slip: Vec<u8>,
    /// Destination folder inside the bucket, e.g. `slips/2024`
    #[serde(rename = "folderPath")]
    folder_path: String,
}

#[utoipa::path(
    post,
    path = "/upload-slip",
    request_body(content = UploadSlipForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Slip stored; URL valid for 10 minutes", body = UploadSlipResponse),
        (status = 400, description = "Missing slip file or folderPath"),
        (status = 500, description = "Storage error", body = UploadFailedResponse)
    ),
    tag = "Uploads"
)]
fn doc_upload_slip_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_upload_slip_handler),
    components(schemas(UploadSlipForm, UploadSlipResponse, UploadFailedResponse)),
    tags((name = "Uploads", description = "Payment slip uploads to Firebase Storage"))
)]
pub struct StorageApiDoc;
