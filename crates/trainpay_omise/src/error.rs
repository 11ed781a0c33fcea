// --- File: crates/trainpay_omise/src/error.rs ---
use thiserror::Error;
use trainpay_common::TrainpayError;

/// Omise-specific error types.
#[derive(Error, Debug)]
pub enum OmiseError {
    /// The request never produced a response (connect, TLS, timeout)
    #[error("Omise API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Omise answered with an error object, e.g. `authentication_failure`.
    /// Displays Omise's own message so callers see what the gateway said.
    #[error("{message}")]
    ApiError {
        status_code: u16,
        code: Option<String>,
        message: String,
    },

    /// Error parsing Omise API response
    #[error("Failed to parse Omise API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A response parsed but lacked a field the flow depends on
    #[error("Omise response is missing `{0}`")]
    MissingField(&'static str),
}

/// Every Omise failure is a transport failure from the caller's point of view;
/// declined charges are not errors at this level.
impl From<OmiseError> for TrainpayError {
    fn from(err: OmiseError) -> Self {
        TrainpayError::TransportError(err.to_string())
    }
}
