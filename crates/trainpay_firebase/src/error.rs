// --- File: crates/trainpay_firebase/src/error.rs ---
use thiserror::Error;
use trainpay_common::TrainpayError;

/// Errors that can occur when talking to Cloud Storage or signing URLs
#[derive(Error, Debug)]
pub enum StorageError {
    /// The service account document is missing, unreadable, or unusable
    #[error("Service account error: {0}")]
    Credentials(String),

    /// Error obtaining an OAuth2 access token
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to the Storage API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Storage API
    #[error("Storage API error ({status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// The private key refused to sign
    #[error("Signing error: {0}")]
    SigningError(String),
}

impl From<StorageError> for TrainpayError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Credentials(_) => TrainpayError::ConfigError(err.to_string()),
            other => TrainpayError::TransportError(other.to_string()),
        }
    }
}
