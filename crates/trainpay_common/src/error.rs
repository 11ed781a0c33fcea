// --- File: crates/trainpay_common/src/error.rs ---
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The error type shared by every Trainpay operation.
///
/// Adapter crates keep their own error enums and convert into this one, so the
/// HTTP layer only has to classify four cases.
#[derive(Error, Debug)]
pub enum TrainpayError {
    /// A required request field is missing or unusable
    #[error("{0}")]
    ValidationError(String),

    /// The external service answered, and the answer was "no" (e.g. a declined charge).
    /// `payload` is the provider's response, passed back to the caller untouched.
    #[error("{message}")]
    DomainFailure { message: String, payload: Value },

    /// The external service could not be reached, or reported an error instead of a result
    #[error("{0}")]
    TransportError(String),

    /// The server is missing configuration it needs for this operation
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for TrainpayError {
    fn status_code(&self) -> u16 {
        match self {
            TrainpayError::ValidationError(_) => 400,
            TrainpayError::DomainFailure { .. } => 400,
            TrainpayError::TransportError(_) => 500,
            TrainpayError::ConfigError(_) => 500,
        }
    }
}

impl From<reqwest::Error> for TrainpayError {
    fn from(err: reqwest::Error) -> Self {
        TrainpayError::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for TrainpayError {
    fn from(err: serde_json::Error) -> Self {
        TrainpayError::TransportError(err.to_string())
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> TrainpayError {
    TrainpayError::ValidationError(message.to_string())
}

pub fn transport_error<T: fmt::Display>(message: T) -> TrainpayError {
    TrainpayError::TransportError(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> TrainpayError {
    TrainpayError::ConfigError(message.to_string())
}

pub fn domain_failure<T: fmt::Display>(message: T, payload: Value) -> TrainpayError {
    TrainpayError::DomainFailure {
        message: message.to_string(),
        payload,
    }
}
