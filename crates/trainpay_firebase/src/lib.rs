//! Firebase Storage integration for Trainpay
//!
//! Uploads payment slips into a Firebase Storage bucket through the Cloud
//! Storage JSON API and hands back a V4 signed URL so the uploader can view the
//! file for ten minutes.
//!
//! # API Endpoints
//!
//! - `POST /upload-slip` - multipart upload of a `slip` file into `folderPath`

pub mod auth;
pub mod client;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;
pub mod signing;


// Re-export the routes function to be used by the main backend service
pub use routes::routes;
pub use error::StorageError;
pub use service::FirebaseStorage;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::StorageApiDoc;
}
