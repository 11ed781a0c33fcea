// --- File: crates/trainpay_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod handlers; // Health check handler
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Payment and upload domain types
pub mod routes; // Route definitions
pub mod services; // Service abstractions

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    config_error, domain_failure, transport_error, validation_error, HttpStatusCode,
    TrainpayError,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, DEFAULT_TIMEOUT_SECS},
    error_body, payload_or_default,
};

pub use models::{CardDetails, CardToken, Charge, NewCharge, StoredSlip};
pub use services::{BoxFuture, ObjectStorage, PaymentGateway, ServiceFactory};
